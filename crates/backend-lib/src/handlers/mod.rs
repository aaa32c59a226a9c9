//! HTTP handlers.

pub mod auth;
pub mod boxes;
