// ============================
// crates/backend-lib/src/storage/flat_file.rs
// ============================
//! Flat-file document store: one pretty-printed JSON file per record.
//!
//! Layout under the root directory:
//! - `users/<id>.json`
//! - `boxes/<id>.json`
//!
//! Usernames are resolved through an in-memory index built when the store is
//! opened, so logins read a single document.
use std::{fs, io::ErrorKind, path::{Path, PathBuf}, sync::Arc};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs as tokio_fs, sync::Mutex};
use boxdepot_common::{BoxPatch, DocumentId, InventoryItem, NewBox};
use crate::error::AppError;
use super::{new_document_id, BoxStore, CredentialStore, Identity, NewIdentity};

const USERS_DIR: &str = "users";
const BOXES_DIR: &str = "boxes";
const DOCUMENT_EXT: &str = "json";

/// Flat-file implementation of the store traits
#[derive(Clone)]
pub struct FlatFileStorage {
    root: PathBuf,
    /// username -> user document id
    usernames: Arc<DashMap<String, DocumentId>>,
    /// Serialises read-modify-write sequences (username check + insert, box updates)
    write_lock: Arc<Mutex<()>>,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, AppError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(USERS_DIR))?;
        fs::create_dir_all(root.join(BOXES_DIR))?;
        let usernames = Self::load_username_index(&root.join(USERS_DIR))?;
        Ok(Self {
            root,
            usernames: Arc::new(usernames),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Unreadable documents are skipped so one bad file cannot lock everyone out
    fn load_username_index(dir: &Path) -> Result<DashMap<String, DocumentId>, AppError> {
        let index = DashMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXT) {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(AppError::from)
                .and_then(|content| Ok(serde_json::from_str::<Identity>(&content)?));
            match parsed {
                Ok(identity) => {
                    index.insert(identity.username, identity.id);
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable user document");
                },
            }
        }
        Ok(index)
    }

    fn document_path(&self, collection: &str, id: DocumentId) -> PathBuf {
        self.root
            .join(collection)
            .join(format!("{id}.{DOCUMENT_EXT}"))
    }

    async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
        match tokio_fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temp file and rename so readers never see a torn document
    async fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(document)?;
        let tmp = path.with_extension(format!("{DOCUMENT_EXT}.tmp"));
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, path).await?;
        Ok(())
    }

    async fn document_paths(&self, collection: &str) -> Result<Vec<PathBuf>, AppError> {
        let mut entries = tokio_fs::read_dir(self.root.join(collection)).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXT) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    async fn read_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        let mut documents = Vec::new();
        for path in self.document_paths(collection).await? {
            // Deleted between listing and reading
            if let Some(document) = Self::read_document(&path).await? {
                documents.push(document);
            }
        }
        Ok(documents)
    }
}

#[async_trait]
impl CredentialStore for FlatFileStorage {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, AppError> {
        let Some(id) = self.usernames.get(username).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, AppError> {
        let _guard = self.write_lock.lock().await;

        if self.usernames.contains_key(&identity.username) {
            return Err(AppError::DuplicateUsername(identity.username));
        }

        let stored = Identity {
            id: new_document_id(),
            username: identity.username,
            password_hash: identity.password_hash,
        };
        Self::write_document(&self.document_path(USERS_DIR, stored.id), &stored).await?;
        self.usernames.insert(stored.username.clone(), stored.id);
        Ok(stored)
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Identity>, AppError> {
        Self::read_document(&self.document_path(USERS_DIR, id)).await
    }
}

#[async_trait]
impl BoxStore for FlatFileStorage {
    async fn create(&self, new: NewBox) -> Result<InventoryItem, AppError> {
        let item = InventoryItem::from_new(new_document_id(), new);
        Self::write_document(&self.document_path(BOXES_DIR, item.id), &item).await?;
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<InventoryItem>, AppError> {
        let mut items: Vec<InventoryItem> = self.read_collection(BOXES_DIR).await?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn get(&self, id: DocumentId) -> Result<Option<InventoryItem>, AppError> {
        Self::read_document(&self.document_path(BOXES_DIR, id)).await
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.document_paths(BOXES_DIR).await?.len())
    }

    async fn delete(&self, id: DocumentId) -> Result<Option<InventoryItem>, AppError> {
        let _guard = self.write_lock.lock().await;
        let path = self.document_path(BOXES_DIR, id);

        let Some(item) = Self::read_document::<InventoryItem>(&path).await? else {
            return Ok(None);
        };
        tokio_fs::remove_file(&path).await?;
        Ok(Some(item))
    }

    async fn update(&self, id: DocumentId, patch: BoxPatch) -> Result<Option<InventoryItem>, AppError> {
        let _guard = self.write_lock.lock().await;
        let path = self.document_path(BOXES_DIR, id);

        let Some(mut item) = Self::read_document::<InventoryItem>(&path).await? else {
            return Ok(None);
        };
        item.apply(patch);
        Self::write_document(&path, &item).await?;
        Ok(Some(item))
    }
}
