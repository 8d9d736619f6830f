//! Wishlist Error Types
//!
//! This module provides wishlist-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Wishlist-specific result type alias
pub type WishResult<T> = Result<T, WishError>;

/// Wishlist-specific error variants
#[derive(Debug, Error)]
pub enum WishError {
    /// Wish list does not exist
    #[error("wish list not found")]
    NotFound,

    /// Authenticated, but not the owner of this wish list
    #[error("access denied")]
    AccessDenied,

    /// Malformed input (empty title, negative price)
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl WishError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WishError::NotFound => StatusCode::NOT_FOUND,
            WishError::AccessDenied => StatusCode::FORBIDDEN,
            WishError::Validation(_) => StatusCode::BAD_REQUEST,
            WishError::Database(_) | WishError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WishError::NotFound => ErrorKind::NotFound,
            WishError::AccessDenied => ErrorKind::Forbidden,
            WishError::Validation(_) => ErrorKind::BadRequest,
            WishError::Database(_) | WishError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            WishError::NotFound => err.with_problem_type("wish-not-found"),
            WishError::AccessDenied => err.with_problem_type("ownership-violation"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            WishError::Database(e) => {
                tracing::error!(error = %e, "Wishlist database error");
            }
            WishError::Internal(msg) => {
                tracing::error!(message = %msg, "Wishlist internal error");
            }
            WishError::AccessDenied => {
                tracing::warn!("Ownership violation on wish list access");
            }
            _ => {
                tracing::debug!(error = %self, "Wishlist error");
            }
        }
    }
}

impl IntoResponse for WishError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
