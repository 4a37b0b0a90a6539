use crate::models::Service;
use sqlx::PgPool;

pub async fn list_all(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "SELECT id, name, category, description, price_cents, duration_minutes \
         FROM services ORDER BY category NULLS LAST, name",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "SELECT id, name, category, description, price_cents, duration_minutes \
         FROM services WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Loads several services by id, in no particular order; missing ids are
/// simply absent from the result (the caller validates completeness).
pub async fn find_many(pool: &PgPool, ids: &[String]) -> Result<Vec<Service>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, Service>(
        "SELECT id, name, category, description, price_cents, duration_minutes \
         FROM services WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}
