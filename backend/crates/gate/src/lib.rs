//! Gate (Admission) Backend Module
//!
//! The request gate wrapped around every inbound request:
//! - `domain/` - Pure sliding-window/burst admission decisions
//! - `application/` - Gate configuration
//! - `infra/` - Bounded in-memory per-client state
//! - `presentation/` - Middleware (size limit, admission, security headers,
//!   suspicious-pattern observability)
//!
//! ## Security Model
//! - Admission state is process-scoped, built once at service start, and
//!   reachable only through the store's interface
//! - Per-client records live behind shard locks; unrelated identities never
//!   serialize on one another, and no admission check touches I/O
//! - The identity map is bounded: idle identities are swept, and at capacity
//!   the longest-idle identity is evicted
//! - Rejected attempts are never recorded, so a rejected burst cannot extend
//!   its own window

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::GateConfig;
pub use domain::window::{AdmissionDecision, RequestWindow};
pub use error::{GateError, GateResult};
pub use infra::memory::InMemoryAdmissionStore;
pub use presentation::middleware::GateState;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryAdmissionStore as AdmissionStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
