//! In-process document store backed by `DashMap`.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use boxdepot_common::{BoxPatch, DocumentId, InventoryItem, NewBox};
use crate::error::AppError;
use super::{new_document_id, BoxStore, CredentialStore, Identity, NewIdentity};

/// Volatile store; contents are lost when the process exits
#[derive(Clone, Default)]
pub struct MemoryStorage {
    users: Arc<DashMap<DocumentId, Identity>>,
    /// Secondary index enforcing username uniqueness
    usernames: Arc<DashMap<String, DocumentId>>,
    boxes: Arc<DashMap<DocumentId, InventoryItem>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStorage {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, AppError> {
        let Some(id) = self.usernames.get(username).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, AppError> {
        // The entry guard holds the shard lock until the identity is stored
        match self.usernames.entry(identity.username.clone()) {
            Entry::Occupied(_) => Err(AppError::DuplicateUsername(identity.username)),
            Entry::Vacant(slot) => {
                let stored = Identity {
                    id: new_document_id(),
                    username: identity.username,
                    password_hash: identity.password_hash,
                };
                self.users.insert(stored.id, stored.clone());
                slot.insert(stored.id);
                Ok(stored)
            },
        }
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Identity>, AppError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl BoxStore for MemoryStorage {
    async fn create(&self, new: NewBox) -> Result<InventoryItem, AppError> {
        let item = InventoryItem::from_new(new_document_id(), new);
        self.boxes.insert(item.id, item.clone());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<InventoryItem>, AppError> {
        let mut items: Vec<InventoryItem> = self
            .boxes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn get(&self, id: DocumentId) -> Result<Option<InventoryItem>, AppError> {
        Ok(self.boxes.get(&id).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.boxes.len())
    }

    async fn delete(&self, id: DocumentId) -> Result<Option<InventoryItem>, AppError> {
        Ok(self.boxes.remove(&id).map(|(_, item)| item))
    }

    async fn update(&self, id: DocumentId, patch: BoxPatch) -> Result<Option<InventoryItem>, AppError> {
        Ok(self.boxes.get_mut(&id).map(|mut entry| {
            entry.apply(patch);
            entry.value().clone()
        }))
    }
}
