// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REGISTER_SUCCESS: &str = "auth.register.success";
pub const AUTH_REGISTER_FAILURE: &str = "auth.register.failure";
pub const AUTH_LOGIN_SUCCESS: &str = "auth.login.success";
pub const AUTH_LOGIN_FAILURE: &str = "auth.login.failure";
pub const BOX_CREATED: &str = "box.created";
pub const BOX_DELETED: &str = "box.deleted";
