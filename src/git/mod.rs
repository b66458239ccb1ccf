//! Git layer
//!
//! - clone.rs: run-once clone cache keyed by (URL, ref)
//! - tags.rs: version tags reachable at the checked-out commit
//! - finder.rs: `ModuleFinder` backed by git clones
//! - error.rs: git error type

pub mod clone;
pub mod error;
pub mod finder;
pub mod tags;

pub use clone::{CloneCache, CloneKey, Cloner, GitCloner, Snapshot};
pub use error::GitError;
pub use finder::GitModuleFinder;
pub use tags::list_reachable_version_tags;
