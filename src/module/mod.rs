//! Module model: versions, module paths and how they are discovered
//!
//! # Modules
//!
//! - [`version`]: `vX.Y.Z` version value and its total order
//! - [`path`]: module paths and the `/vN` path-versioning convention
//! - [`manifest`]: `go.mod` parsing and working-tree scanning
//! - [`finder`]: `ModuleFinder` trait and the maximum-wins candidate merge
//! - [`error`]: error type shared by the module layer

pub mod error;
pub mod finder;
pub mod manifest;
pub mod path;
pub mod version;

pub use error::ModuleError;
pub use finder::{ModuleFinder, latest_versions};
#[cfg(test)]
pub use finder::MockModuleFinder;
pub use path::{ModulePath, VersionedPath, apply_version_suffix, parse_path_version, strip_version_suffix};
pub use version::{Version, parse_version};
