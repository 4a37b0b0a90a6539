use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Retries a transient-error-prone DB operation exactly once after a short
/// jittered backoff, at the repository layer; if still failing, surfaced
/// as `error_retry`. Not a generic retry crate — this calls for exactly
/// one retry, not a policy.
pub async fn retry_once_transient<T, E, F, Fut>(mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsTransient,
{
    match op().await {
        Ok(v) => Ok(v),
        Err(e) if e.is_transient() => {
            let jitter_ms = rand::thread_rng().gen_range(50..=250);
            tokio::time::sleep(Duration::from_millis(jitter_ms)).await;
            op().await
        }
        Err(e) => Err(e),
    }
}

/// Classifies whether an error is worth a single retry: lost connections
/// and deadlocks, not constraint violations or not-found.
pub trait IsTransient {
    fn is_transient(&self) -> bool;
}

impl IsTransient for sqlx::Error {
    fn is_transient(&self) -> bool {
        match self {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => true,
            sqlx::Error::Database(db_err) => {
                // 40001 serialization_failure, 40P01 deadlock_detected
                matches!(db_err.code().as_deref(), Some("40001") | Some("40P01"))
            }
            _ => false,
        }
    }
}

impl IsTransient for crate::errors::BookingRepoError {
    fn is_transient(&self) -> bool {
        matches!(self, crate::errors::BookingRepoError::Db(e) if e.is_transient())
    }
}
