use crate::models::User;
use sqlx::PgPool;

const SELECT_COLUMNS: &str = "id, telegram_id as external_id, display_name, username, \
    first_name, last_name, locale, is_admin, created_at";

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(pool).await
}

pub async fn find_by_external_id(pool: &PgPool, external_id: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM users WHERE telegram_id = $1");
    sqlx::query_as::<_, User>(&sql).bind(external_id).fetch_optional(pool).await
}

/// Idempotent upsert-on-login: creates the user on first contact, or
/// refreshes the denormalized profile fields on every later one. Never
/// touches `is_admin` — that flag is admin-CRUD-only.
pub async fn upsert_profile(
    pool: &PgPool,
    external_id: &str,
    display_name: Option<&str>,
    username: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    locale: Option<&str>,
) -> Result<User, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO users (telegram_id, display_name, username, first_name, last_name, locale)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (telegram_id) DO UPDATE SET
            display_name = coalesce(excluded.display_name, users.display_name),
            username = coalesce(excluded.username, users.username),
            first_name = coalesce(excluded.first_name, users.first_name),
            last_name = coalesce(excluded.last_name, users.last_name),
            locale = coalesce(excluded.locale, users.locale)
        RETURNING {SELECT_COLUMNS}
        "#
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(external_id)
        .bind(display_name)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(locale)
        .fetch_one(pool)
        .await
}

pub async fn is_admin(pool: &PgPool, external_id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(bool,)> =
        sqlx::query_as("SELECT is_admin FROM users WHERE telegram_id = $1")
            .bind(external_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(flag,)| flag).unwrap_or(false))
}
