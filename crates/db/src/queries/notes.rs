use crate::models::MasterClientNote;
use sqlx::PgPool;

/// A single note per (master, user) pair, last-write-wins.
pub async fn upsert(
    pool: &PgPool,
    master_id: i64,
    user_id: i64,
    note: &str,
) -> Result<MasterClientNote, sqlx::Error> {
    sqlx::query_as::<_, MasterClientNote>(
        r#"
        INSERT INTO master_client_notes (master_id, user_id, note)
        VALUES ($1, $2, $3)
        ON CONFLICT (master_id, user_id) DO UPDATE SET note = excluded.note
        RETURNING master_id, user_id, note
        "#,
    )
    .bind(master_id)
    .bind(user_id)
    .bind(note)
    .fetch_one(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    master_id: i64,
    user_id: i64,
) -> Result<Option<MasterClientNote>, sqlx::Error> {
    sqlx::query_as::<_, MasterClientNote>(
        "SELECT master_id, user_id, note FROM master_client_notes \
         WHERE master_id = $1 AND user_id = $2",
    )
    .bind(master_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
