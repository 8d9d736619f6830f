//! Wishlist Backend Module
//!
//! CRUD for wish lists and their notes. Every operation runs behind the
//! bearer-auth middleware and enforces ownership: the wish's owning account
//! must equal the authenticated subject.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{WishError, WishResult};
pub use infra::postgres::PgWishRepository;
pub use presentation::router::{wishlist_router, wishlist_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgWishRepository as WishStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
