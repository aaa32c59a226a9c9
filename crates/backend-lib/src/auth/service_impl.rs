use std::sync::Arc;
use async_trait::async_trait;
use metrics::counter;
use zeroize::Zeroizing;
use crate::auth::{hash_password_secure, verify_password, AuthService};
use crate::error::AppError;
use crate::metrics::{AUTH_LOGIN_FAILURE, AUTH_LOGIN_SUCCESS, AUTH_REGISTER_FAILURE, AUTH_REGISTER_SUCCESS};
use crate::storage::{CredentialStore, Identity, NewIdentity};

/// Authenticator backed by a [`CredentialStore`]
pub struct DefaultAuth {
    store: Arc<dyn CredentialStore>,
    hash_cost: u8,
}

impl DefaultAuth {
    pub fn new(store: Arc<dyn CredentialStore>, hash_cost: u8) -> Self {
        Self { store, hash_cost }
    }

    async fn register_inner(&self, username: &str, password: String) -> Result<Identity, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput("username and password are required".to_string()));
        }

        // scrypt is CPU-bound; keep it off the async workers
        let cost = self.hash_cost;
        let password_hash = tokio::task::spawn_blocking(move || {
            let mut password = password;
            hash_password_secure(&mut password, cost)
        })
        .await??;

        self.store
            .insert(NewIdentity {
                username: username.to_string(),
                password_hash,
            })
            .await
    }

    async fn login_inner(&self, username: &str, password: String) -> Result<Identity, AppError> {
        let password = Zeroizing::new(password);
        let identity = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let stored_hash = identity.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&stored_hash, &password)).await?;
        if !valid {
            return Err(AppError::InvalidCredential);
        }

        self.store
            .find_by_id(identity.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    #[tracing::instrument(skip(self, password))]
    async fn register(&self, username: &str, password: String) -> Result<Identity, AppError> {
        match self.register_inner(username, password).await {
            Ok(identity) => {
                counter!(AUTH_REGISTER_SUCCESS).increment(1);
                tracing::info!(user_id = %identity.id, "user registered");
                Ok(identity)
            },
            Err(e) => {
                counter!(AUTH_REGISTER_FAILURE).increment(1);
                tracing::warn!(error = %e, "registration failed");
                Err(e)
            },
        }
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, username: &str, password: String) -> Result<Identity, AppError> {
        match self.login_inner(username, password).await {
            Ok(identity) => {
                counter!(AUTH_LOGIN_SUCCESS).increment(1);
                tracing::info!(user_id = %identity.id, "login succeeded");
                Ok(identity)
            },
            Err(e) => {
                counter!(AUTH_LOGIN_FAILURE).increment(1);
                tracing::warn!(error = %e, "login failed");
                Err(e)
            },
        }
    }
}
