//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use suitter_core::domain::IdParseError;
use suitter_core::error::{DomainError, ReadError};
use suitter_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A required chain identifier is not configured.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// The ledger could not be read or returned something unusable.
    #[error("Ledger error: {0}")]
    Upstream(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(detail) => ErrorResponse::unprocessable(detail),
            AppError::NotConfigured(detail) => ErrorResponse::service_unavailable(detail),
            AppError::Upstream(detail) => {
                tracing::warn!(detail = %detail, "Ledger read failed");
                ErrorResponse::bad_gateway(detail)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<ReadError> for AppError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::NotConfigured(key) => AppError::NotConfigured(format!("{key} is not set")),
            ReadError::NotFound { what, id } => AppError::NotFound(format!("{what} {id} not found")),
            e @ (ReadError::Ledger(_) | ReadError::Decode(_)) => AppError::Upstream(e.to_string()),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotConfigured(key) => AppError::NotConfigured(format!("{key} is not set")),
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<IdParseError> for AppError {
    fn from(err: IdParseError) -> Self {
        AppError::BadRequest(format!("Invalid identifier: {err}"))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use suitter_core::ports::LedgerError;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(ReadError::NotConfigured("SUITTER_MANAGER_ID")), 503),
            (
                AppError::from(ReadError::Ledger(LedgerError::Transport("timeout".into()))),
                502,
            ),
            (AppError::from(DomainError::Validation("empty".into())), 422),
            (AppError::from(IdParseError::Empty), 400),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{err}");
        }
    }
}
