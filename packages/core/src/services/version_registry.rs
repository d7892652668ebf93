//! Version Domain Registry
//!
//! Records which version domains exist in the process, keyed by GUID, with
//! their names and latest versions. The serialization layer uses it to stamp
//! saved data and to look up the version to migrate loaded data to.

use crate::models::version::VersionDomain;
use crate::services::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Metadata recorded for one registered version domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDomainInfo {
    pub guid: Uuid,
    pub name: String,
    pub latest_version: i32,
}

/// Registry of version domains keyed by GUID
#[derive(Debug, Default)]
pub struct VersionDomainRegistry {
    domains: HashMap<Uuid, VersionDomainInfo>,
}

impl VersionDomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a version domain
    ///
    /// Registering an identical entry again is a no-op.
    ///
    /// # Errors
    ///
    /// - `DomainConflict`: the GUID is already registered with a different
    ///   name or latest version
    pub fn register(
        &mut self,
        guid: Uuid,
        latest_version: i32,
        name: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();

        if let Some(existing) = self.domains.get(&guid) {
            if existing.name == name && existing.latest_version == latest_version {
                return Ok(());
            }
            return Err(MigrationError::domain_conflict(
                guid,
                format!("{} v{}", existing.name, existing.latest_version),
                format!("{} v{}", name, latest_version),
            ));
        }

        tracing::debug!(%guid, name = %name, latest_version, "Registered version domain");

        self.domains.insert(
            guid,
            VersionDomainInfo {
                guid,
                name,
                latest_version,
            },
        );
        Ok(())
    }

    /// Register a domain from its `VersionDomain` declaration
    pub fn register_domain<D: VersionDomain>(&mut self) -> Result<()> {
        self.register(D::GUID, D::LATEST, D::NAME)
    }

    pub fn get(&self, guid: &Uuid) -> Option<&VersionDomainInfo> {
        self.domains.get(guid)
    }

    /// Latest version of a registered domain
    pub fn latest_version(&self, guid: &Uuid) -> Option<i32> {
        self.domains.get(guid).map(|d| d.latest_version)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&VersionDomainInfo> {
        self.domains.values().find(|d| d.name == name)
    }

    /// All registered domains, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &VersionDomainInfo> {
        let mut domains: Vec<_> = self.domains.values().collect();
        domains.sort_by(|a, b| a.name.cmp(&b.name));
        domains.into_iter()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
