use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Error taxonomy for the booking lifecycle engine.
///
/// Each variant maps to an HTTP status via [`AppError::status_code`] and to
/// one of the stable lowercase codes in [`codes`] at the orchestrator
/// boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A time-window or booking-state rule was violated (lock windows,
    /// terminal-state guards, payment availability).
    #[error("Policy violation: {0}")]
    Policy(String),

    /// An illegal `(old_status, new_status)` transition was attempted.
    #[error("Illegal state transition: {0}")]
    StateTransition(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Database(_) | Self::Internal(_) => 500,
            Self::NotFound(_) => 404,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::BadRequest(_) | Self::Validation(_) => 400,
            Self::Conflict(_) | Self::Policy(_) | Self::StateTransition(_) => 409,
            Self::ExternalService(_) => 502,
        }
    }
}

/// Stable lowercase error codes surfaced by lifecycle orchestrator
/// operations. Never renamed once shipped.
pub mod codes {
    pub const MASTER_REQUIRED: &str = "master_required";
    pub const SERVICE_REQUIRED: &str = "service_required";
    pub const SLOT_UNAVAILABLE: &str = "slot_unavailable";
    pub const SLOT_IN_PAST: &str = "slot_in_past";
    pub const CONFLICT: &str = "conflict";
    pub const BOOKING_NOT_FOUND: &str = "booking_not_found";
    pub const BOOKING_NOT_ACTIVE: &str = "booking_not_active";
    pub const CANCEL_TOO_CLOSE: &str = "cancel_too_close";
    pub const RESCHEDULE_TOO_CLOSE: &str = "reschedule_too_close";
    pub const ALREADY_RATED: &str = "already_rated";
    pub const RATING_ONLY_AFTER_DONE: &str = "rating_only_after_done";
    pub const RATING_INVALID_VALUE: &str = "rating_invalid_value";
    pub const INVOICE_MISSING_PRICE: &str = "invoice_missing_price";
    pub const ONLINE_PAYMENTS_UNAVAILABLE: &str = "online_payments_unavailable";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const NOT_FOUND: &str = "not_found";
    pub const ERROR_RETRY: &str = "error_retry";
}

/// Normalizes an arbitrary error-code candidate to the shape stable codes
/// must take: lowercase, `[a-z0-9_-]`, truncated to 64 chars.
pub fn normalize_error_code(raw: &str) -> String {
    let lowered: String = raw
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    lowered.chars().take(64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_mixed_case_and_strips_invalid_chars() {
        assert_eq!(normalize_error_code("Slot Unavailable!"), "slotunavailable");
    }

    #[test]
    fn truncates_to_64_chars() {
        let long = "a".repeat(100);
        assert_eq!(normalize_error_code(&long).len(), 64);
    }

    #[test]
    fn status_code_mapping() {
        assert_eq!(AppError::Unauthorized.status_code(), 401);
        assert_eq!(AppError::Policy("x".into()).status_code(), 409);
        assert_eq!(AppError::StateTransition("x".into()).status_code(), 409);
    }
}
