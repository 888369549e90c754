//! Catalog error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by catalog operations.
///
/// An empty result is never an error: unknown identifiers and pages past the
/// end yield empty lists.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Rejected before reaching storage (malformed identifier, negative limit).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Connection, pool or execution failure. Not retried here.
    #[error("storage unavailable")]
    StorageUnavailable(#[from] sqlx::Error),

    /// A result row did not match the expected record shape.
    #[error("malformed result row")]
    MalformedRow(#[from] serde_json::Error),
}

impl CatalogError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CatalogError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::MalformedRow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the logs.
        match &self {
            CatalogError::StorageUnavailable(e) => {
                tracing::error!(error = %e, "storage error");
            }
            CatalogError::MalformedRow(e) => {
                tracing::error!(error = %e, "failed to decode result row");
            }
            CatalogError::InvalidArgument(_) => {}
        }

        (status, self.to_string()).into_response()
    }
}

/// Result type alias using CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_is_bad_request() {
        let err = CatalogError::InvalidArgument("genre id".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid argument: genre id");
    }

    #[test]
    fn storage_failure_is_service_unavailable() {
        let err = CatalogError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn storage_message_is_not_leaked() {
        let err = CatalogError::from(sqlx::Error::Protocol("secret detail".to_string()));
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn malformed_row_is_internal() {
        let Err(decode) = serde_json::from_str::<u32>("\"x\"") else {
            unreachable!("string is not a u32");
        };
        let err = CatalogError::from(decode);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
