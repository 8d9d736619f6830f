//! Domain Layer
//!
//! Pure admission decisions over per-client request history.

pub mod window;

pub use window::{AdmissionDecision, RequestWindow};
