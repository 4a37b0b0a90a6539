use crate::models::{Master, MasterService};
use sqlx::PgPool;

const SELECT_COLUMNS: &str =
    "id, telegram_id as external_id, display_name, bio, is_active, created_at";

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Master>, sqlx::Error> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM masters WHERE id = $1");
    sqlx::query_as::<_, Master>(&sql).bind(id).fetch_optional(pool).await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<Master>, sqlx::Error> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM masters WHERE is_active ORDER BY display_name"
    );
    sqlx::query_as::<_, Master>(&sql).fetch_all(pool).await
}

/// Presence in this table is the raw fact `salon_core::auth` resolves the
/// `master` role from.
pub async fn is_master(pool: &PgPool, external_id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM masters WHERE telegram_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// The internal id of the master row for an external id, if any — lets the
/// authorization layer check "is this caller the master of this specific
/// booking" rather than only the bare `is_master` fact.
pub async fn find_by_external_id(pool: &PgPool, external_id: &str) -> Result<Option<Master>, sqlx::Error> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM masters WHERE telegram_id = $1");
    sqlx::query_as::<_, Master>(&sql).bind(external_id).fetch_optional(pool).await
}

pub async fn list_services_for_master(
    pool: &PgPool,
    master_id: i64,
) -> Result<Vec<MasterService>, sqlx::Error> {
    sqlx::query_as::<_, MasterService>(
        "SELECT master_id, service_id, duration_minutes_override \
         FROM master_services WHERE master_id = $1",
    )
    .bind(master_id)
    .fetch_all(pool)
    .await
}

pub async fn duration_override(
    pool: &PgPool,
    master_id: i64,
    service_id: &str,
) -> Result<Option<i32>, sqlx::Error> {
    let row: Option<(Option<i32>,)> = sqlx::query_as(
        "SELECT duration_minutes_override FROM master_services \
         WHERE master_id = $1 AND service_id = $2",
    )
    .bind(master_id)
    .bind(service_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.and_then(|(d,)| d))
}

/// Masters offering every service in `service_ids`.
pub async fn list_offering_all(
    pool: &PgPool,
    service_ids: &[String],
) -> Result<Vec<Master>, sqlx::Error> {
    if service_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM masters m \
         WHERE m.is_active AND (\
            SELECT count(DISTINCT ms.service_id) FROM master_services ms \
            WHERE ms.master_id = m.id AND ms.service_id = ANY($1)\
         ) = $2 \
         ORDER BY m.display_name"
    );
    sqlx::query_as::<_, Master>(&sql)
        .bind(service_ids)
        .bind(service_ids.len() as i64)
        .fetch_all(pool)
        .await
}
