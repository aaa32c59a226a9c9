// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with in-memory and flat-file document stores.
use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use boxdepot_common::{BoxPatch, DocumentId, InventoryItem, NewBox, UserView};
use crate::error::AppError;

pub mod flat_file;
pub mod memory;

pub use flat_file::FlatFileStorage;
pub use memory::MemoryStorage;

/// A registered user as persisted by the credential store
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: DocumentId,
    pub username: String,
    pub password_hash: String,
}

impl Identity {
    /// Client-facing view without the password hash
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// An identity before the store has assigned its id
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub username: String,
    pub password_hash: String,
}

/// Persistence for registered identities.
///
/// Implementations must make `insert` atomic with respect to the username
/// check: two concurrent inserts of one username cannot both succeed.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an identity by its exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, AppError>;

    /// Persist a new identity, failing with `DuplicateUsername` if taken
    async fn insert(&self, identity: NewIdentity) -> Result<Identity, AppError>;

    /// Look up an identity by id
    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Identity>, AppError>;
}

/// Persistence for inventory boxes
#[async_trait]
pub trait BoxStore: Send + Sync {
    async fn create(&self, new: NewBox) -> Result<InventoryItem, AppError>;

    /// All boxes, oldest first
    async fn list(&self) -> Result<Vec<InventoryItem>, AppError>;

    async fn get(&self, id: DocumentId) -> Result<Option<InventoryItem>, AppError>;

    async fn count(&self) -> Result<usize, AppError>;

    /// Remove a box, returning it if it existed
    async fn delete(&self, id: DocumentId) -> Result<Option<InventoryItem>, AppError>;

    /// Apply a partial update, returning the updated box if it exists
    async fn update(&self, id: DocumentId, patch: BoxPatch) -> Result<Option<InventoryItem>, AppError>;
}

/// Handles onto one opened backend
#[derive(Clone)]
pub struct Stores {
    pub credentials: Arc<dyn CredentialStore>,
    pub boxes: Arc<dyn BoxStore>,
}

impl Stores {
    fn from_backend<B: CredentialStore + BoxStore + 'static>(backend: B) -> Self {
        let backend = Arc::new(backend);
        Self {
            credentials: backend.clone(),
            boxes: backend,
        }
    }
}

/// Open the store named by a database URL.
///
/// `memory://` selects the in-process store; `file://<dir>` or a bare path
/// selects the flat-file store rooted at that directory.
pub fn open_store(database_url: &str) -> Result<Stores, AppError> {
    if database_url == "memory://" {
        tracing::info!("using in-memory document store");
        return Ok(Stores::from_backend(MemoryStorage::new()));
    }

    let root = match database_url.split_once("://") {
        Some(("file", path)) => path,
        Some((scheme, _)) => {
            return Err(AppError::InvalidInput(format!(
                "unsupported database scheme '{scheme}'"
            )))
        },
        None => database_url,
    };

    tracing::info!(root, "using flat-file document store");
    Ok(Stores::from_backend(FlatFileStorage::new(root)?))
}

/// Ids are UUIDv7, so sorting by id yields creation order
pub(crate) fn new_document_id() -> DocumentId {
    DocumentId::now_v7()
}
