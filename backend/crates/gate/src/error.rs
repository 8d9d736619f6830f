//! Gate Error Types
//!
//! Rejections produced by the request gate. Rate and burst rejections share
//! HTTP 429 but keep distinct problem types so callers and dashboards can
//! tell them apart.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, problem::ProblemDetail};
use thiserror::Error;

/// Gate-specific result type alias
pub type GateResult<T> = Result<T, GateError>;

/// Gate-specific error variants
#[derive(Debug, Error)]
pub enum GateError {
    /// Sliding-window cap exceeded
    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// Burst cap exceeded
    #[error("Too many requests in short time. Please slow down.")]
    BurstLimited,

    /// Declared Content-Length exceeds the configured maximum
    #[error("Request payload too large")]
    PayloadTooLarge,
}

impl GateError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GateError::RateLimited | GateError::BurstLimited => StatusCode::TOO_MANY_REQUESTS,
            GateError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::RateLimited | GateError::BurstLimited => ErrorKind::TooManyRequests,
            GateError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
        }
    }

    /// Problem type slug; rate and burst stay distinguishable here
    pub fn problem_slug(&self) -> &'static str {
        match self {
            GateError::RateLimited => "rate-limit-exceeded",
            GateError::BurstLimited => "burst-limit-exceeded",
            GateError::PayloadTooLarge => "payload-too-large",
        }
    }

    /// Problem title
    fn problem_title(&self) -> &'static str {
        match self {
            GateError::RateLimited => "Rate Limit Exceeded",
            GateError::BurstLimited => "Burst Limit Exceeded",
            GateError::PayloadTooLarge => "Payload Too Large",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string()).with_problem_type(self.problem_slug())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GateError::RateLimited => {
                tracing::warn!("Rate limit exceeded");
            }
            GateError::BurstLimited => {
                tracing::warn!("Burst limit exceeded");
            }
            GateError::PayloadTooLarge => {
                tracing::warn!("Oversized request body rejected");
            }
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        self.log();
        ProblemDetail::new(
            self.problem_slug(),
            self.problem_title(),
            self.status_code().as_u16(),
            self.to_string(),
        )
        .into_response()
    }
}
