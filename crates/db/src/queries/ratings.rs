use crate::models::BookingRating;
use sqlx::PgPool;

pub async fn find_by_booking(
    pool: &PgPool,
    booking_id: i64,
) -> Result<Option<BookingRating>, sqlx::Error> {
    sqlx::query_as::<_, BookingRating>(
        "SELECT booking_id, rating, comment FROM booking_ratings WHERE booking_id = $1",
    )
    .bind(booking_id)
    .fetch_optional(pool)
    .await
}

/// Fails with a unique-violation if a rating already exists for this
/// booking (enforced by the primary key on
/// `booking_id`); the orchestrator checks existence first so this should
/// never race under normal use, but the constraint is the final guard.
pub async fn create(
    pool: &PgPool,
    booking_id: i64,
    rating: i16,
    comment: Option<&str>,
) -> Result<BookingRating, sqlx::Error> {
    sqlx::query_as::<_, BookingRating>(
        r#"
        INSERT INTO booking_ratings (booking_id, rating, comment)
        VALUES ($1, $2, $3)
        RETURNING booking_id, rating, comment
        "#,
    )
    .bind(booking_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await
}
