//! NodeSpace Versioned Migration Registry
//!
//! This crate upgrades objects loaded at an older schema version by applying
//! the migration steps registered for their type, in version order.
//!
//! # Architecture
//!
//! - **Per-Type Step Lists**: Steps are keyed by exact type and kept sorted by target version
//! - **Half-Open Selection**: Migrating from `from` to `to` runs the steps in `(from, to]`
//! - **Explicit Startup Registration**: No static initializers; `migrations::register_all` builds the registry
//!
//! # Modules
//!
//! - [`models`] - Migratable data structures and version domains
//! - [`services`] - Migration registry, version domain registry, helpers
//! - [`config`] - Registry configuration

pub mod config;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::MigrationConfig;
pub use models::*;
pub use services::*;
