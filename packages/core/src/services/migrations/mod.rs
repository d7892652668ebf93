//! Migration Step Declarations
//!
//! Each submodule declares the version domain and migration steps for one
//! entity schema and exposes a `register_migrations` function.
//!
//! ## Available Migrations
//!
//! - `task` - Task schema migrations (`TaskVersion`)
//!
//! ## Example Usage
//!
//! ```rust
//! # use nodespace_versioning::services::migration_registry::MigrationRegistry;
//! # use nodespace_versioning::services::version_registry::VersionDomainRegistry;
//! # use nodespace_versioning::services::migrations;
//! # fn main() -> Result<(), nodespace_versioning::services::MigrationError> {
//! let mut registry = MigrationRegistry::new();
//! let mut domains = VersionDomainRegistry::new();
//!
//! // Called once at startup, before the registry is shared
//! migrations::register_all(&mut registry);
//! migrations::register_domains(&mut domains)?;
//! # Ok(())
//! # }
//! ```

use crate::services::error::Result;
use crate::services::migration_registry::MigrationRegistry;
use crate::services::version_registry::VersionDomainRegistry;

pub mod task;

/// Register every schema's migration steps
pub fn register_all(registry: &mut MigrationRegistry) {
    task::register_migrations(registry);
}

/// Register every schema's version domain
pub fn register_domains(domains: &mut VersionDomainRegistry) -> Result<()> {
    domains.register_domain::<task::TaskVersion>()?;
    Ok(())
}
