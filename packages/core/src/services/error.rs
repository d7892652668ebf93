//! Migration Error Types
//!
//! This module defines the error type shared by the migration registry, the
//! version domain registry and the default-value helpers.

use thiserror::Error;
use uuid::Uuid;

/// Migration operation errors
///
/// A registry lookup that finds no steps is never an error. Errors only come
/// from failing step bodies, failed casts inside typed steps, conflicting
/// domain registrations and configuration loading.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// A step body returned an error; the remaining steps were skipped
    #[error("Migration step for {type_key} to version {target_version} failed: {source}")]
    StepFailed {
        type_key: String,
        target_version: i32,
        #[source]
        source: anyhow::Error,
    },

    /// A typed step was invoked with an object of another concrete type
    #[error("Type mismatch: step expects {expected}, object is {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The same version domain GUID was registered twice with different metadata
    #[error("Version domain {guid} already registered as {existing}, cannot register as {requested}")]
    DomainConflict {
        guid: Uuid,
        existing: String,
        requested: String,
    },

    /// Property name not present on the serialized object
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MigrationError {
    /// Create a step failed error
    pub fn step_failed(
        type_key: impl Into<String>,
        target_version: i32,
        source: anyhow::Error,
    ) -> Self {
        Self::StepFailed {
            type_key: type_key.into(),
            target_version,
            source,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a domain conflict error
    pub fn domain_conflict(
        guid: Uuid,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::DomainConflict {
            guid,
            existing: existing.into(),
            requested: requested.into(),
        }
    }

    /// Create an unknown property error
    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::UnknownProperty(name.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;
