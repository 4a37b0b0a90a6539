//! Common API response helpers to reduce error handling boilerplate

use axum::http::StatusCode;
use salon_types::errors::{codes, normalize_error_code};
use salon_types::AppError;

/// Type alias for the common error response tuple
pub type ApiError = (StatusCode, String);

/// Translates an orchestrator [`AppError`] into the `(status, stable_code)`
/// pair every handler returns.
pub fn from_app_error(err: AppError) -> ApiError {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let code = match &err {
        AppError::Unauthorized | AppError::Forbidden => codes::UNAUTHORIZED.to_string(),
        AppError::NotFound(c)
        | AppError::BadRequest(c)
        | AppError::Conflict(c)
        | AppError::Policy(c)
        | AppError::StateTransition(c)
        | AppError::Validation(c) => normalize_error_code(c),
        AppError::Database(_) | AppError::Internal(_) => codes::ERROR_RETRY.to_string(),
        AppError::ExternalService(_) => "external_service_error".to_string(),
    };
    (status, code)
}

/// Create a NOT_FOUND error response
#[allow(dead_code)]
pub fn not_found(resource: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{} not found", resource))
}

/// Create a BAD_REQUEST error response
pub fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, message.into())
}

/// Create an UNAUTHORIZED error response
#[allow(dead_code)]
pub fn unauthorized(message: impl Into<String>) -> ApiError {
    (StatusCode::UNAUTHORIZED, message.into())
}

/// Create a FORBIDDEN error response
#[allow(dead_code)]
pub fn forbidden(message: impl Into<String>) -> ApiError {
    (StatusCode::FORBIDDEN, message.into())
}
