use async_trait::async_trait;
use crate::error::AppError;
use crate::storage::Identity;

/// Registration and credential verification.
///
/// Stateless: no session is created or remembered between calls.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash `password` with a fresh salt and persist a new identity.
    ///
    /// Fails with `DuplicateUsername` if the username is taken.
    async fn register(&self, username: &str, password: String) -> Result<Identity, AppError>;

    /// Verify `password` against the identity stored for `username`.
    ///
    /// Fails with `NotFound` for an unknown username and `InvalidCredential`
    /// for a wrong password. On success returns the canonical stored record.
    async fn login(&self, username: &str, password: String) -> Result<Identity, AppError>;
}
