//! Presentation Layer
//!
//! Request gate middleware.

pub mod middleware;

pub use middleware::{
    GateState, admission, enforce_body_limit, observe_suspicious, security_headers,
};
