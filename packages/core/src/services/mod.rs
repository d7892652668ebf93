//! Migration Services
//!
//! - `MigrationRegistry` - Per-type ordered migration steps and their application
//! - `VersionDomainRegistry` - Known version domains and their latest versions
//! - `property_matches_default` - Default-value check for step bodies
//! - `migrations` - Concrete steps, registered explicitly at startup

pub mod defaults;
pub mod error;
pub mod migration_registry;
pub mod migrations;
pub mod version_registry;

pub use defaults::property_matches_default;
pub use error::MigrationError;
pub use migration_registry::{Migratable, MigrationRegistry, MigrationStep, StepFunction};
pub use version_registry::{VersionDomainInfo, VersionDomainRegistry};
