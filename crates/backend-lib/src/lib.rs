// ============================
// boxdepot-backend-lib/src/lib.rs
// ============================
//! Core functionality for the `BoxDepot` HTTP server: user registration and
//! login plus box-inventory CRUD over a pluggable document store.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;

use std::sync::Arc;
use crate::auth::{AuthService, DefaultAuth};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::{open_store, BoxStore, Stores};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Box inventory
    pub boxes: Arc<dyn BoxStore>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state over already-opened stores
    pub fn new(stores: Stores, settings: Settings) -> Self {
        let auth = Arc::new(DefaultAuth::new(stores.credentials, settings.hash_cost));
        Self {
            auth,
            boxes: stores.boxes,
            settings: Arc::new(settings),
        }
    }

    /// Open the store named by `settings.database_url` and build the state
    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let stores = open_store(&settings.database_url)?;
        Ok(Self::new(stores, settings))
    }
}
