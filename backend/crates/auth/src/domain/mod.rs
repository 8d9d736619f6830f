//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::account::{Account, FailedAttemptOutcome, LockState};
pub use repository::AccountRepository;
pub use value_object::email::Email;
