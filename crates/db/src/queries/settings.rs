use crate::models::SettingRow;
use sqlx::PgPool;

/// Raw read, bypassing the TTL cache that `salon_core::settings` layers on
/// top.
pub async fn get(pool: &PgPool, key: &str) -> Result<Option<SettingRow>, sqlx::Error> {
    sqlx::query_as::<_, SettingRow>("SELECT key, value, updated_at FROM settings WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Writes through to the backing store; the in-process cache entry is
/// invalidated by the caller (`salon_core::settings::Store::set`).
pub async fn set(pool: &PgPool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = now()
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<SettingRow>, sqlx::Error> {
    sqlx::query_as::<_, SettingRow>("SELECT key, value, updated_at FROM settings ORDER BY key")
        .fetch_all(pool)
        .await
}
