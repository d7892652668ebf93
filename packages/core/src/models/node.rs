//! Node Data Structures
//!
//! A `Node` is a loosely typed record whose entity-specific data lives in a
//! JSON `properties` object. Its `node_type` tag is the exact runtime type the
//! migration registry dispatches on.
//!
//! # Examples
//!
//! ```rust
//! use nodespace_versioning::models::Node;
//! use serde_json::json;
//!
//! let task = Node::new(
//!     "task".to_string(),
//!     "Write documentation".to_string(),
//!     json!({ "status": "OPEN" }),
//! );
//! assert_eq!(task.property("status"), Some(&json!("OPEN")));
//! ```

use crate::services::migration_registry::Migratable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use uuid::Uuid;

/// Universal record migrated by type tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier
    pub id: String,

    /// Node type (e.g., "text", "task"); also the migration type key
    pub node_type: String,

    /// Primary content/text of the node
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,

    /// All entity-specific fields
    pub properties: serde_json::Value,
}

impl Node {
    /// Create a new Node with auto-generated UUID
    pub fn new(node_type: String, content: String, properties: serde_json::Value) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            node_type,
            content,
            created_at: now,
            modified_at: now,
            properties,
        }
    }

    /// Read a top-level property
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

    /// Write a top-level property and bump `modified_at`
    ///
    /// Non-object `properties` are replaced by an empty object first.
    pub fn set_property(&mut self, name: impl Into<String>, value: serde_json::Value) {
        if !self.properties.is_object() {
            self.properties = serde_json::Value::Object(serde_json::Map::new());
        }
        if let Some(obj) = self.properties.as_object_mut() {
            obj.insert(name.into(), value);
        }
        self.modified_at = Utc::now();
    }

    /// Whether a top-level property is present (null counts as present)
    pub fn has_property(&self, name: &str) -> bool {
        self.properties
            .as_object()
            .is_some_and(|obj| obj.contains_key(name))
    }
}

impl Migratable for Node {
    fn type_key(&self) -> &str {
        &self.node_type
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
