//! Module finder that serves canonical URLs from local repositories

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use vanity_render::git::GitModuleFinder;
use vanity_render::module::{ModuleError, ModuleFinder, ModulePath, Version};

/// Maps canonical repository URLs to local clone locations and delegates to
/// `GitModuleFinder`
pub struct MirrorFinder {
    mirrors: HashMap<String, String>,
    inner: GitModuleFinder,
    calls: Arc<AtomicUsize>,
}

impl MirrorFinder {
    pub fn new() -> Self {
        Self {
            mirrors: HashMap::new(),
            inner: GitModuleFinder::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_mirror(mut self, url: &str, location: String) -> Self {
        self.mirrors.insert(url.to_string(), location);
        self
    }

    /// Counter of `find` calls, readable after the finder was moved
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ModuleFinder for MirrorFinder {
    async fn find(
        &self,
        location: &str,
        reference: &str,
    ) -> Result<BTreeMap<ModulePath, Version>, ModuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mirror = self
            .mirrors
            .get(location)
            .map(String::as_str)
            .unwrap_or(location);

        self.inner.find(mirror, reference).await
    }
}

pub fn call_count(calls: &AtomicUsize) -> usize {
    calls.load(Ordering::SeqCst)
}
