//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, with a fixed input-length contract)
//! - Client identification (IP extraction behind reverse proxies)

pub mod client;
pub mod password;
