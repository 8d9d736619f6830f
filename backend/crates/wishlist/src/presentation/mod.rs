//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::WishAppState;
pub use router::{wishlist_router, wishlist_router_generic};
