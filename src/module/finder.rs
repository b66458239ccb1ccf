//! Module discovery abstraction

use std::collections::BTreeMap;

#[cfg(test)]
use mockall::automock;

use crate::module::error::ModuleError;
use crate::module::path::{ModulePath, VersionedPath, parse_path_version};
use crate::module::version::Version;

/// Trait for discovering the modules a repository publishes
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ModuleFinder: Send + Sync {
    /// Finds every module path in a repository and its latest version
    ///
    /// # Arguments
    /// * `location` - Clone URL of the repository
    /// * `reference` - Branch, tag or commit to inspect; empty for the default branch
    ///
    /// # Returns
    /// * `Ok(BTreeMap)` - One version per module path, the root included
    /// * `Err(ModuleError)` - If the repository could not be inspected
    async fn find(
        &self,
        location: &str,
        reference: &str,
    ) -> Result<BTreeMap<ModulePath, Version>, ModuleError>;
}

/// Merge tag-derived and manifest-derived candidates into one version per path.
///
/// The root always starts at `v0.0.0`. Tags that are not version-shaped are
/// dropped, and the maximum version wins for each path.
pub fn latest_versions(
    tags: &[String],
    manifests: impl IntoIterator<Item = VersionedPath>,
) -> BTreeMap<ModulePath, Version> {
    let candidates = std::iter::once(VersionedPath::new(ModulePath::root(), Version::default()))
        .chain(tags.iter().map(|tag| parse_path_version(tag)))
        .chain(manifests)
        .filter(|candidate| !candidate.path.is_empty());

    let mut result: BTreeMap<ModulePath, Version> = BTreeMap::new();

    for VersionedPath { path, version } in candidates {
        result
            .entry(path)
            .and_modify(|current| *current = (*current).max(version))
            .or_insert(version);
    }

    result
}
