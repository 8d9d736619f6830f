//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryWishRepository;
pub use postgres::PgWishRepository;
