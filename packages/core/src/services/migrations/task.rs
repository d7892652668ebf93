//! Task Schema Migrations
//!
//! Steps for `Node`s with `node_type = "task"`, tagged with the `TaskVersion`
//! each one upgrades to.
//!
//! ## Migration History
//!
//! - **AddedPriority (1)**: Added `priority` field (default: 0)
//! - **AddedAssignee (2)**: Added `assignee` field (default: null)
//! - **RenamedStatusValues (3)**: Renamed status values (OPEN → TODO, IN_PROGRESS → DOING, DONE → COMPLETED)
//!
//! Every step leaves already-migrated data untouched, so re-running it is safe.

use crate::models::version::VersionDomain;
use crate::models::Node;
use crate::services::migration_registry::MigrationRegistry;
use serde_json::json;
use uuid::Uuid;

/// Type key of task nodes
pub const TASK_NODE_TYPE: &str = "task";

/// Task schema versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskVersion {
    AddedPriority = 1,
    AddedAssignee = 2,
    RenamedStatusValues = 3,
}

impl VersionDomain for TaskVersion {
    const NAME: &'static str = "Task";
    const GUID: Uuid = Uuid::from_u128(0x7c9e_6679_7425_40de_944b_e07f_c1f9_0ae7);
    const LATEST: i32 = TaskVersion::RenamedStatusValues as i32;

    fn version(self) -> i32 {
        self as i32
    }
}

/// Register all task schema migrations
///
/// # Example
///
/// ```rust
/// # use nodespace_versioning::services::migration_registry::MigrationRegistry;
/// # use nodespace_versioning::services::migrations::task;
/// let mut registry = MigrationRegistry::new();
/// task::register_migrations(&mut registry);
/// assert_eq!(registry.step_count(), 3);
/// ```
pub fn register_migrations(registry: &mut MigrationRegistry) {
    registry.register_typed(
        TASK_NODE_TYPE,
        TaskVersion::AddedPriority.version(),
        |node: &mut Node| {
            add_priority(node);
            Ok(())
        },
    );
    registry.register_typed(
        TASK_NODE_TYPE,
        TaskVersion::AddedAssignee.version(),
        |node: &mut Node| {
            add_assignee(node);
            Ok(())
        },
    );
    registry.register_typed(
        TASK_NODE_TYPE,
        TaskVersion::RenamedStatusValues.version(),
        |node: &mut Node| {
            rename_status_values(node);
            Ok(())
        },
    );
}

/// Add `priority` (0) unless the task already has one
fn add_priority(node: &mut Node) {
    if !node.has_property("priority") {
        node.set_property("priority", json!(0));
    }
}

/// Add a nullable `assignee` unless the task already has one
fn add_assignee(node: &mut Node) {
    if !node.has_property("assignee") {
        node.set_property("assignee", json!(null));
    }
}

/// Rename status values to the current naming convention
///
/// Unknown values are preserved.
fn rename_status_values(node: &mut Node) {
    let renamed = match node.property("status").and_then(|v| v.as_str()) {
        Some("OPEN") => "TODO",
        Some("IN_PROGRESS") => "DOING",
        Some("DONE") => "COMPLETED",
        _ => return,
    };
    node.set_property("status", json!(renamed));
}
