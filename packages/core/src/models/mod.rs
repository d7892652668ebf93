//! Data Models
//!
//! This module contains the data structures the migration registry operates on:
//!
//! - `Node` - Universal node model, migrated by its `node_type` tag
//! - `version` - Version domains (ordered integer versions per subsystem)

mod node;
pub mod version;

pub use node::Node;
pub use version::{VersionDomain, BASELINE_VERSION};
