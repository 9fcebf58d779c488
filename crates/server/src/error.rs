//! Unified error handling for the QuickBite API.
//!
//! Provides a unified `AppError` type mapping the domain taxonomy onto HTTP
//! responses. All route handlers should return `Result<T, AppError>`.
//! Validation problems report which field was invalid; storage problems are
//! logged and never leak internal detail to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use quickbite_core::{InvalidTransition, ValidationError};

use crate::db::{RepositoryError, StoreError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing caller input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reference to an unknown entity id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Illegal order status change.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// Backing-store failure during checkout; the whole transaction was
    /// rolled back and the caller may retry.
    #[error("checkout transaction failed: {0}")]
    Transaction(RepositoryError),

    /// Generic persistence-layer failure.
    #[error("storage error: {0}")]
    Storage(RepositoryError),

    /// The admin gate rejected the request.
    #[error("unauthorized")]
    Unauthorized,
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("resource".to_owned()),
            RepositoryError::InvalidTransition(t) => Self::InvalidTransition(t),
            other => Self::Storage(other),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(v) => Self::Validation(v),
            StoreError::Repository(r) => r.into(),
        }
    }
}

impl AppError {
    /// Map a checkout failure: validation problems stay 4xx, everything the
    /// backing store did wrong becomes a retryable `Transaction` error.
    #[must_use]
    pub fn from_checkout(err: StoreError) -> Self {
        match err {
            StoreError::Validation(v) => Self::Validation(v),
            StoreError::Repository(r) => Self::Transaction(r),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side failures; client errors are the caller's to fix.
        if matches!(self, Self::Transaction(_) | Self::Storage(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition(_) => StatusCode::CONFLICT,
            Self::Transaction(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Transaction(_) => "Order could not be placed, please try again".to_owned(),
            Self::Storage(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use quickbite_core::OrderStatus;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::Validation(ValidationError::MissingField("name"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("order".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::InvalidTransition(InvalidTransition {
                from: OrderStatus::Completed,
                to: OrderStatus::Rejected,
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::Storage(RepositoryError::DataCorruption(
                "bad".to_owned()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        assert_eq!(
            status_of(RepositoryError::NotFound.into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_checkout_repo_failure_is_transaction() {
        let err = AppError::from_checkout(StoreError::Repository(RepositoryError::NotFound));
        assert!(matches!(err, AppError::Transaction(_)));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
