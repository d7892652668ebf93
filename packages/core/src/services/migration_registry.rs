//! Versioned Migration Registry
//!
//! This module stores, per object type, an ordered list of migration steps and
//! applies the steps an object is missing when it is loaded at an older
//! version.
//!
//! ## Architecture
//!
//! - **Type-Keyed**: Steps are looked up by the object's exact `type_key()`.
//!   There is no inheritance-aware lookup
//! - **Target Versions**: Each step is tagged with the version it upgrades *to*
//! - **Half-Open Range**: `migrate(obj, from, to)` runs every step with
//!   `from < target <= to`, ascending
//! - **In-Place**: Steps mutate the object; each step sees the previous step's writes
//! - **Explicit Ownership**: The registry is a plain value built at startup and
//!   shared read-only (e.g., behind an `Arc`) afterwards
//!
//! ## Example Usage
//!
//! ```rust
//! # use nodespace_versioning::services::migration_registry::MigrationRegistry;
//! # use nodespace_versioning::models::Node;
//! # use serde_json::json;
//! # fn main() -> Result<(), nodespace_versioning::services::MigrationError> {
//! let mut registry = MigrationRegistry::new();
//!
//! registry.register_typed("task", 1, |node: &mut Node| {
//!     node.set_property("priority", json!(0));
//!     Ok(())
//! });
//!
//! let mut node = Node::new("task".to_string(), "Test".to_string(), json!({}));
//! let changed = registry.migrate(&mut node, 0, 1)?;
//!
//! assert!(changed);
//! assert_eq!(node.properties["priority"], 0);
//! # Ok(())
//! # }
//! ```

use crate::config::MigrationConfig;
use crate::models::version::VersionDomain;
use crate::services::error::{MigrationError, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// An object the registry can migrate
///
/// `type_key` must identify the object's exact runtime type. For Rust types
/// with a single representation `std::any::type_name::<Self>()` is a good key;
/// tagged records return their tag.
pub trait Migratable: Any {
    /// Stable identifier of this object's exact type
    fn type_key(&self) -> &str;

    /// Access to the concrete value for typed step bodies
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Boxed step body owned by the registry
///
/// Step bodies are arbitrary user code. They should be safe to re-run, since a
/// later failing step leaves earlier steps applied.
pub type StepFunction = Box<dyn Fn(&mut dyn Migratable) -> anyhow::Result<()> + Send + Sync>;

/// A single (target version, step body) pair
pub struct MigrationStep {
    target_version: i32,
    step: StepFunction,
}

impl MigrationStep {
    /// Version this step upgrades an object to
    pub fn target_version(&self) -> i32 {
        self.target_version
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("target_version", &self.target_version)
            .finish_non_exhaustive()
    }
}

/// Registry of migration steps keyed by object type
///
/// Registration needs `&mut self` and migration only `&self`, so once the
/// registry is shared no registration can race a migration.
///
/// # Example
///
/// ```ignore
/// let mut registry = MigrationRegistry::new();
/// migrations::register_all(&mut registry);
/// let registry = Arc::new(registry);
///
/// // Loaded at version 1, current is 3: runs the steps targeting 2 and 3
/// registry.migrate(&mut node, 1, 3)?;
/// ```
#[derive(Default)]
pub struct MigrationRegistry {
    /// Map of type_key → steps sorted ascending by target version
    steps: HashMap<String, Vec<MigrationStep>>,

    config: MigrationConfig,
}

impl MigrationRegistry {
    /// Create a new empty migration registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with explicit configuration
    pub fn with_config(config: MigrationConfig) -> Self {
        Self {
            steps: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Register a migration step for a type
    ///
    /// The step is appended to the type's list, which is then stably re-sorted
    /// by target version. Steps sharing a target version run in registration
    /// order. Existing steps are never replaced.
    ///
    /// # Arguments
    ///
    /// * `type_key` - Exact type identifier (e.g., "task")
    /// * `target_version` - The version this step upgrades objects to
    /// * `step` - Step body
    pub fn register<F>(&mut self, type_key: impl Into<String>, target_version: i32, step: F)
    where
        F: Fn(&mut dyn Migratable) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let type_key = type_key.into();

        if self.config.warn_on_unreachable_steps && target_version <= self.config.baseline_version
        {
            tracing::warn!(
                type_key = %type_key,
                target_version,
                baseline_version = self.config.baseline_version,
                "Migration step targets a version at or below the baseline and will not run from it"
            );
        }

        let steps = self.steps.entry(type_key.clone()).or_default();
        steps.push(MigrationStep {
            target_version,
            step: Box::new(step),
        });
        // sort_by_key is stable
        steps.sort_by_key(|s| s.target_version);

        tracing::debug!(
            type_key = %type_key,
            target_version,
            registered = steps.len(),
            "Registered migration step"
        );
    }

    /// Register a step whose body works on the concrete type `T`
    ///
    /// If the registry ever hands the step an object that is not a `T`, the
    /// step fails with `MigrationError::TypeMismatch`.
    pub fn register_typed<T, F>(&mut self, type_key: impl Into<String>, target_version: i32, step: F)
    where
        T: Migratable,
        F: Fn(&mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(type_key, target_version, move |object: &mut dyn Migratable| {
            match object.as_any_mut().downcast_mut::<T>() {
                Some(typed) => step(typed),
                None => Err(MigrationError::type_mismatch(
                    std::any::type_name::<T>(),
                    object.type_key(),
                )
                .into()),
            }
        });
    }

    /// Apply every step with `from_version < target_version <= to_version`
    ///
    /// Steps run in ascending target order on the caller's thread. An empty or
    /// inverted range, or a type with no registered steps, runs nothing.
    ///
    /// # Returns
    ///
    /// `true` if at least one step ran
    ///
    /// # Errors
    ///
    /// - `StepFailed`: a step body returned an error. Later steps were skipped
    ///   and earlier ones stay applied
    pub fn migrate(
        &self,
        object: &mut dyn Migratable,
        from_version: i32,
        to_version: i32,
    ) -> Result<bool> {
        let Some(steps) = self.steps.get(object.type_key()) else {
            return Ok(false);
        };

        let mut changed = false;

        for step in steps {
            if step.target_version > to_version {
                break;
            }
            if step.target_version <= from_version {
                continue;
            }

            tracing::debug!(
                type_key = object.type_key(),
                target_version = step.target_version,
                from_version,
                to_version,
                "Applying migration step"
            );

            if let Err(source) = (step.step)(&mut *object) {
                tracing::warn!(
                    type_key = object.type_key(),
                    target_version = step.target_version,
                    "Migration step failed: {:#}",
                    source
                );
                return Err(MigrationError::step_failed(
                    object.type_key(),
                    step.target_version,
                    source,
                ));
            }

            changed = true;
        }

        Ok(changed)
    }

    /// Migrate an object to the latest version of a domain
    pub fn migrate_to_latest<D: VersionDomain>(
        &self,
        object: &mut dyn Migratable,
        from_version: i32,
    ) -> Result<bool> {
        self.migrate(object, from_version, D::LATEST)
    }

    /// Whether any step is registered for a type
    pub fn has_steps(&self, type_key: &str) -> bool {
        self.steps.get(type_key).is_some_and(|s| !s.is_empty())
    }

    /// Target versions registered for a type, in application order
    pub fn target_versions(&self, type_key: &str) -> Vec<i32> {
        self.steps
            .get(type_key)
            .map(|steps| steps.iter().map(MigrationStep::target_version).collect())
            .unwrap_or_default()
    }

    /// Number of steps `migrate` would run for a type over `(from_version, to_version]`
    pub fn pending_steps(&self, type_key: &str, from_version: i32, to_version: i32) -> usize {
        self.steps
            .get(type_key)
            .map(|steps| {
                steps
                    .iter()
                    .filter(|s| s.target_version > from_version && s.target_version <= to_version)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Get the number of registered steps across all types
    pub fn step_count(&self) -> usize {
        self.steps.values().map(Vec::len).sum()
    }

    /// Get the number of types with registered steps
    pub fn type_count(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationRegistry")
            .field("steps", &self.steps)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    /// Records which steps touched it, in order
    #[derive(Debug, Default)]
    struct Journal {
        applied: Vec<i32>,
    }

    impl Migratable for Journal {
        fn type_key(&self) -> &str {
            "journal"
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug, Default)]
    struct Other;

    impl Migratable for Other {
        fn type_key(&self) -> &str {
            "other"
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn record(registry: &mut MigrationRegistry, target: i32) {
        registry.register_typed("journal", target, move |j: &mut Journal| {
            j.applied.push(target);
            Ok(())
        });
    }

    fn registry_with(targets: &[i32]) -> MigrationRegistry {
        let mut registry = MigrationRegistry::new();
        for &target in targets {
            record(&mut registry, target);
        }
        registry
    }

    #[test]
    fn test_register_migration() {
        let mut registry = MigrationRegistry::new();
        assert_eq!(registry.step_count(), 0);
        assert!(!registry.has_steps("journal"));

        record(&mut registry, 1);
        assert_eq!(registry.step_count(), 1);
        assert_eq!(registry.type_count(), 1);
        assert!(registry.has_steps("journal"));
    }

    #[test]
    fn test_list_sorted_after_out_of_order_registration() {
        let registry = registry_with(&[3, 1, 2]);
        assert_eq!(registry.target_versions("journal"), vec![1, 2, 3]);

        let mut journal = Journal::default();
        assert!(registry.migrate(&mut journal, 0, 3).unwrap());
        assert_eq!(journal.applied, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_targets_keep_registration_order() {
        let mut registry = MigrationRegistry::new();
        for tag in [10, 20, 30] {
            registry.register_typed("journal", 2, move |j: &mut Journal| {
                j.applied.push(tag);
                Ok(())
            });
        }
        registry.register_typed("journal", 1, |j: &mut Journal| {
            j.applied.push(1);
            Ok(())
        });

        let mut journal = Journal::default();
        registry.migrate(&mut journal, 0, 2).unwrap();
        assert_eq!(journal.applied, vec![1, 10, 20, 30]);
    }

    #[test]
    fn test_half_open_range() {
        let registry = registry_with(&[1, 2, 3]);

        let mut j = Journal::default();
        registry.migrate(&mut j, 1, 3).unwrap();
        assert_eq!(j.applied, vec![2, 3]);

        let mut j = Journal::default();
        registry.migrate(&mut j, 0, 2).unwrap();
        assert_eq!(j.applied, vec![1, 2]);
    }

    #[test]
    fn test_no_migration_needed_same_version() {
        let registry = registry_with(&[1, 2]);

        let mut j = Journal::default();
        assert!(!registry.migrate(&mut j, 2, 2).unwrap());
        assert!(!registry.migrate(&mut j, 0, 0).unwrap());
        assert!(j.applied.is_empty());
    }

    #[test]
    fn test_inverted_range_runs_nothing() {
        let registry = registry_with(&[1, 2, 3]);

        let mut j = Journal::default();
        assert!(!registry.migrate(&mut j, 3, 1).unwrap());
        assert!(j.applied.is_empty());
    }

    #[test]
    fn test_unregistered_type_is_unchanged() {
        let registry = registry_with(&[1]);
        let mut other = Other;
        assert!(!registry.migrate(&mut other, 0, 10).unwrap());
    }

    #[test]
    fn test_failure_aborts_remaining_steps() {
        let mut registry = registry_with(&[1, 3]);
        registry.register("journal", 2, |_object: &mut dyn Migratable| {
            bail!("corrupt payload")
        });

        let mut j = Journal::default();
        let err = registry.migrate(&mut j, 0, 3).unwrap_err();

        match err {
            MigrationError::StepFailed {
                type_key,
                target_version,
                source,
            } => {
                assert_eq!(type_key, "journal");
                assert_eq!(target_version, 2);
                assert_eq!(source.to_string(), "corrupt payload");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Step 1 stays applied, step 3 never ran
        assert_eq!(j.applied, vec![1]);
    }

    #[test]
    fn test_typed_step_rejects_wrong_type() {
        let mut registry = MigrationRegistry::new();
        registry.register_typed("other", 1, |_j: &mut Journal| Ok(()));

        let mut other = Other;
        let err = registry.migrate(&mut other, 0, 1).unwrap_err();

        let MigrationError::StepFailed { source, .. } = err else {
            panic!("expected StepFailed");
        };
        assert!(matches!(
            source.downcast_ref::<MigrationError>(),
            Some(MigrationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_unreachable_step_still_registered() {
        let mut registry = MigrationRegistry::with_config(MigrationConfig {
            baseline_version: 0,
            warn_on_unreachable_steps: true,
        });
        record(&mut registry, 0);
        record(&mut registry, -1);

        assert_eq!(registry.target_versions("journal"), vec![-1, 0]);

        let mut j = Journal::default();
        assert!(!registry.migrate(&mut j, 0, 5).unwrap());
        assert!(registry.migrate(&mut j, -2, 0).unwrap());
        assert_eq!(j.applied, vec![-1, 0]);
    }

    #[test]
    fn test_pending_steps_matches_migrate() {
        let registry = registry_with(&[1, 2, 2, 4]);

        assert_eq!(registry.pending_steps("journal", 0, 4), 4);
        assert_eq!(registry.pending_steps("journal", 1, 2), 2);
        assert_eq!(registry.pending_steps("journal", 2, 3), 0);
        assert_eq!(registry.pending_steps("journal", 4, 0), 0);
        assert_eq!(registry.pending_steps("missing", 0, 4), 0);

        let mut j = Journal::default();
        registry.migrate(&mut j, 1, 2).unwrap();
        assert_eq!(j.applied.len(), 2);
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MigrationRegistry>();
    }
}
