//! Version Domains
//!
//! A version domain is an ordered integer enumeration owned by one subsystem.
//! Its lowest value is the baseline ("before any version changes were made")
//! and its highest declared value is the latest version.
//!
//! # Examples
//!
//! ```rust
//! use nodespace_versioning::models::version::VersionDomain;
//! use uuid::Uuid;
//!
//! #[derive(Debug, Clone, Copy)]
//! enum WidgetVersion {
//!     AddedColor = 1,
//!     SplitDimensions = 2,
//! }
//!
//! impl VersionDomain for WidgetVersion {
//!     const NAME: &'static str = "Widget";
//!     const GUID: Uuid = Uuid::from_u128(0x5f2e_0c4a_8b1d_4e7f_9a36_1c0d_2b8e_7f41);
//!     const LATEST: i32 = WidgetVersion::SplitDimensions as i32;
//!
//!     fn version(self) -> i32 {
//!         self as i32
//!     }
//! }
//!
//! assert_eq!(WidgetVersion::AddedColor.version(), 1);
//! assert_eq!(WidgetVersion::BASELINE, 0);
//! ```

use uuid::Uuid;

/// Version of an object that never had any migration applied
pub const BASELINE_VERSION: i32 = 0;

/// An ordered integer version enumeration for one subsystem
pub trait VersionDomain: Copy {
    /// Human-readable domain name (e.g., "Task")
    const NAME: &'static str;

    /// Stable identifier under which the domain is registered
    const GUID: Uuid;

    /// Highest declared version
    const LATEST: i32;

    /// Version before any migration was declared
    const BASELINE: i32 = BASELINE_VERSION;

    /// Integer value of a declared version
    fn version(self) -> i32;
}
