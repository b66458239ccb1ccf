//! `ModuleFinder` that inspects cloned repositories

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::git::clone::{CloneCache, Cloner, GitCloner};
use crate::git::tags::list_reachable_version_tags;
use crate::module::error::ModuleError;
use crate::module::finder::{ModuleFinder, latest_versions};
use crate::module::manifest::scan_manifests;
use crate::module::path::ModulePath;
use crate::module::version::Version;

/// Discovers modules from tags and go.mod manifests of a clone.
///
/// Clones are shared through the `CloneCache`, so several catalogue entries
/// pointing at one repository and ref cost a single clone.
pub struct GitModuleFinder<C: Cloner = GitCloner> {
    clones: Arc<CloneCache<C>>,
}

impl GitModuleFinder<GitCloner> {
    /// Finder with its own libgit2-backed clone cache
    pub fn new() -> Self {
        Self::with_clones(Arc::new(CloneCache::new()))
    }
}

impl Default for GitModuleFinder<GitCloner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cloner> GitModuleFinder<C> {
    /// Finder sharing `clones` with other finders
    pub fn with_clones(clones: Arc<CloneCache<C>>) -> Self {
        Self { clones }
    }
}

#[async_trait::async_trait]
impl<C: Cloner> ModuleFinder for GitModuleFinder<C> {
    async fn find(
        &self,
        location: &str,
        reference: &str,
    ) -> Result<BTreeMap<ModulePath, Version>, ModuleError> {
        let snapshot = self.clones.resolve(location, reference).await?;

        let (tags, manifests) = tokio::task::spawn_blocking(move || {
            let repo = snapshot.open()?;
            let tags = list_reachable_version_tags(&repo)?;
            let manifests = scan_manifests(snapshot.workdir())?;
            Ok::<_, ModuleError>((tags, manifests))
        })
        .await??;

        debug!(
            "Found {} version tags and {} manifests in {}",
            tags.len(),
            manifests.len(),
            location
        );

        Ok(latest_versions(&tags, manifests))
    }
}
