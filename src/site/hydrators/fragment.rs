//! Hydrator that refreshes only selected repositories
//!
//! With a list of module paths, the site is first taken from the cache and
//! only the listed repositories are resolved again. Any cache miss falls back
//! to resolving the whole site.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::module::{ModulePath, strip_version_suffix};
use crate::site::error::HydrateError;
use crate::site::hydrator::Hydrator;
use crate::site::types::{Repository, Site};

pub struct FragmentHydrator {
    cache: Box<dyn Hydrator>,
    upstream: Box<dyn Hydrator>,
    modules: Vec<String>,
}

impl FragmentHydrator {
    /// # Arguments
    /// * `cache` - Hydrator producing a previously resolved site
    /// * `upstream` - Hydrator resolving repositories from their sources
    /// * `modules` - Module paths to refresh; empty to resolve everything
    pub fn new(
        cache: impl Hydrator + 'static,
        upstream: impl Hydrator + 'static,
        modules: Vec<String>,
    ) -> Self {
        Self {
            cache: Box::new(cache),
            upstream: Box::new(upstream),
            modules,
        }
    }

    async fn hydrate_fragments(
        &self,
        site: &mut Site,
        originals: HashMap<ModulePath, Repository>,
    ) -> Result<(), HydrateError> {
        let requested: HashSet<ModulePath> = self
            .modules
            .iter()
            .map(|module| strip_version_suffix(module))
            .collect();

        let mut fragment = Site {
            page_title: site.page_title.clone(),
            page_description: site.page_description.clone(),
            hostname: site.hostname.clone(),
            source_url: site.source_url.clone(),
            repositories: Vec::with_capacity(requested.len()),
        };
        let mut indexes = Vec::with_capacity(requested.len());

        for (index, repository) in site.repositories.iter().enumerate() {
            let path = strip_version_suffix(&repository.path);

            if !requested.contains(&path) {
                debug!("Cache: {}", path);
                continue;
            }

            let Some(original) = originals.get(&path) else {
                warn!("Requested repository {} is not configured, keeping cached entry", path);
                continue;
            };

            let mut entry = original.clone();
            entry.path = path.to_string();
            entry.modules.clear();

            indexes.push(index);
            fragment.repositories.push(entry);
        }

        self.upstream.hydrate(&mut fragment).await?;

        for (index, repository) in indexes.into_iter().zip(fragment.repositories) {
            site.repositories[index] = repository;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Hydrator for FragmentHydrator {
    async fn hydrate(&self, site: &mut Site) -> Result<(), HydrateError> {
        if self.modules.is_empty() {
            return self.upstream.hydrate(site).await;
        }

        let originals: HashMap<ModulePath, Repository> = site
            .repositories
            .iter()
            .map(|repository| (strip_version_suffix(&repository.path), repository.clone()))
            .collect();

        if let Err(e) = self.cache.hydrate(site).await {
            if e.is_cache_miss() {
                info!("Cache error: {}, resolving all repositories", e);
                return self.upstream.hydrate(site).await;
            }

            return Err(e);
        }

        self.hydrate_fragments(site, originals).await
    }
}
