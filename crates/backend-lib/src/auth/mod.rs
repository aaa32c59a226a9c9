// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
mod service;
mod service_impl;

pub use password::{hash_password, hash_password_secure, verify_password, DEFAULT_HASH_COST, MAX_HASH_COST};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
