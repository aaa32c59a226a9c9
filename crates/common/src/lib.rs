// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between `BoxDepot` clients and the server.
//! This module defines the JSON request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identifier for users and boxes
pub type DocumentId = Uuid;

/// Username/password pair submitted to `/register` and `/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Public projection of a registered user.
///
/// The stored password hash is deliberately absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: DocumentId,
    pub username: String,
}

/// Generic `{ "message": ... }` body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body returned by a successful login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserView,
}

/// Body returned by a failed login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginFailure {
    pub success: bool,
    pub error: String,
}

/// Fields supplied when creating a box
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NewBox {
    pub label: String,
    pub content: String,
    pub manufacturer: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

/// A stored inventory box
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: DocumentId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

impl InventoryItem {
    /// Build a stored box from creation fields and its assigned id
    pub fn from_new(id: DocumentId, new: NewBox) -> Self {
        Self {
            id,
            label: new.label,
            content: new.content,
            manufacturer: new.manufacturer,
            details: new.details,
            empty: new.empty,
        }
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched
    pub fn apply(&mut self, patch: BoxPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(manufacturer) = patch.manufacturer {
            self.manufacturer = manufacturer;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
        if patch.empty.is_some() {
            self.empty = patch.empty;
        }
    }
}

/// Partial update for `PUT /box/{id}`; absent fields are left as stored
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct BoxPatch {
    pub label: Option<String>,
    pub content: Option<String>,
    pub manufacturer: Option<String>,
    pub details: Option<String>,
    pub empty: Option<bool>,
}

/// Body returned by `POST /createbox`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoxCreated {
    pub message: String,
    #[serde(rename = "box")]
    pub item: InventoryItem,
}

/// `{ "box": ... }` body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoxResponse {
    #[serde(rename = "box")]
    pub item: InventoryItem,
}

/// `{ "boxes": [...] }` body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoxesResponse {
    pub boxes: Vec<InventoryItem>,
}

/// `{ "count": n }` body
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct CountResponse {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_box_missing_fields_default() {
        let new: NewBox = serde_json::from_str(r#"{"label":"A1"}"#).unwrap();
        assert_eq!(new.label, "A1");
        assert_eq!(new.content, "");
        assert_eq!(new.empty, None);
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut item = InventoryItem::from_new(
            Uuid::nil(),
            NewBox {
                label: "A1".to_string(),
                content: "cables".to_string(),
                manufacturer: "Acme".to_string(),
                details: "shelf 3".to_string(),
                empty: Some(false),
            },
        );

        let patch: BoxPatch = serde_json::from_str(r#"{"content":"nothing","empty":true}"#).unwrap();
        item.apply(patch);

        assert_eq!(item.label, "A1");
        assert_eq!(item.content, "nothing");
        assert_eq!(item.manufacturer, "Acme");
        assert_eq!(item.empty, Some(true));
    }

    #[test]
    fn test_box_field_is_named_box_on_the_wire() {
        let body = BoxResponse {
            item: InventoryItem::from_new(Uuid::nil(), NewBox::default()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("box").is_some());
        assert!(json["box"].get("empty").is_none());
    }
}
