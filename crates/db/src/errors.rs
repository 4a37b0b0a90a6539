use thiserror::Error;

/// Errors surfaced by `queries::bookings`, translated to `AppError`/stable
/// codes at the `salon-core` orchestrator boundary.
#[derive(Debug, Error)]
pub enum BookingRepoError {
    /// The exclusion constraint on `(master_id, tstzrange(starts_at, ends_at))`
    /// rejected the write.
    #[error("booking conflicts with an existing reservation for this master")]
    Conflict,

    #[error("booking {0} not found")]
    NotFound(i64),

    /// The booking exists but is not in a status the operation accepts.
    #[error("booking {0} is not in a state that allows this operation")]
    InvalidState(i64),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Postgres SQLSTATE for an exclusion-constraint violation.
const EXCLUSION_VIOLATION: &str = "23P01";

pub(crate) fn classify(err: sqlx::Error) -> BookingRepoError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
            return BookingRepoError::Conflict;
        }
    }
    BookingRepoError::Db(err)
}
