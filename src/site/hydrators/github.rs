//! Hydrator that resolves repository modules through a `ModuleFinder`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_NUM_WORKERS, DEFAULT_SUPPORTED_HOST};
use crate::module::{ModuleError, ModuleFinder, ModulePath, Version, apply_version_suffix};
use crate::site::error::HydrateError;
use crate::site::hydrator::Hydrator;
use crate::site::types::{Module, Repository, Site};

/// Branch used in source links when a repository has no ref configured
const DEFAULT_BRANCH: &str = "master";

const VCS_GIT: &str = "git";

/// A unit of work: the catalogue index and the entry to hydrate
type WorkQueue<'a> = Mutex<VecDeque<(usize, &'a mut Repository)>>;

/// Hydrates every catalogue entry hosted on the supported host.
///
/// Entries are processed by a fixed number of workers pulling from a shared
/// queue. The first failure stops the workers from taking new entries and is
/// returned once in-flight entries have finished. A failed entry is left as it
/// was.
pub struct GitHubHydrator {
    finder: Arc<dyn ModuleFinder>,
    num_workers: usize,
    supported_host: String,
}

impl GitHubHydrator {
    pub fn new(finder: Arc<dyn ModuleFinder>) -> Self {
        Self {
            finder,
            num_workers: DEFAULT_NUM_WORKERS,
            supported_host: DEFAULT_SUPPORTED_HOST.to_string(),
        }
    }

    /// Sets the number of concurrent workers (at least one)
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Sets the URL prefix an entry must contain to be hydrated
    pub fn with_supported_host(mut self, supported_host: impl Into<String>) -> Self {
        self.supported_host = supported_host.into();
        self
    }

    async fn work(
        &self,
        worker: usize,
        queue: &WorkQueue<'_>,
        cancelled: &AtomicBool,
        first_error: &Mutex<Option<ModuleError>>,
    ) {
        while !cancelled.load(Ordering::SeqCst) {
            let Some((index, repository)) = next_unit(queue) else {
                return;
            };

            debug!("Worker {} takes repository #{}", worker, index);

            if let Err(e) = self.hydrate_repository(repository).await {
                warn!("Failed to hydrate repository #{}: {}", index, e);
                cancelled.store(true, Ordering::SeqCst);

                first_error
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(e);
            }
        }
    }

    async fn hydrate_repository(&self, repository: &mut Repository) -> Result<(), ModuleError> {
        let url = normalize_repository_url(&repository.repository_url);

        if !url.contains(&self.supported_host) {
            debug!("Skipping unsupported repository: {}", repository.repository_url);
            return Ok(());
        }

        info!("Read: {}", url);

        let versions = self.finder.find(&url, &repository.reference).await?;

        let branch = if repository.reference.is_empty() {
            DEFAULT_BRANCH
        } else {
            repository.reference.as_str()
        };

        let mut latest = Version::default();
        let mut modules = Vec::with_capacity(versions.len());

        for (path, version) in &versions {
            let module_path = join_module_path(&repository.path, path);
            info!("Find module: {} {}", module_path, version);

            modules.push(Module {
                path: module_path,
                import_prefix: repository.path.clone(),
                vcs: VCS_GIT.to_string(),
                repository_url: url.clone(),
                home_url: url.clone(),
                directory_url: format!("{}/tree/{}{{/dir}}", url, branch),
                file_url: format!("{}/blob/{}{{/dir}}/{{file}}#L{{line}}", url, branch),
            });

            if path.is_root() && *version > latest {
                latest = *version;
            }
        }

        modules.sort_by(|a, b| a.path.cmp(&b.path));

        repository.repository_name = url.trim_start_matches("https://").to_string();
        repository.repository_url = url;
        if latest.needs_path_suffix() {
            repository.path = apply_version_suffix(&repository.path, latest).to_string();
        }
        repository.latest_version = latest.to_string();
        repository.modules = modules;

        Ok(())
    }
}

#[async_trait::async_trait]
impl Hydrator for GitHubHydrator {
    async fn hydrate(&self, site: &mut Site) -> Result<(), HydrateError> {
        let queue: WorkQueue<'_> = Mutex::new(site.repositories.iter_mut().enumerate().collect());
        let cancelled = AtomicBool::new(false);
        let first_error = Mutex::new(None);

        join_all(
            (0..self.num_workers)
                .map(|worker| self.work(worker, &queue, &cancelled, &first_error)),
        )
        .await;

        match first_error.into_inner().unwrap_or_else(PoisonError::into_inner) {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

fn next_unit<'a>(queue: &WorkQueue<'a>) -> Option<(usize, &'a mut Repository)> {
    queue.lock().unwrap_or_else(PoisonError::into_inner).pop_front()
}

/// Import path of a discovered module under the repository's import path
fn join_module_path(repository_path: &str, module_path: &ModulePath) -> String {
    let base = repository_path.trim_end_matches('/');

    if module_path.as_str() == ModulePath::ROOT {
        repository_path.to_string()
    } else if base.is_empty() {
        module_path.to_string()
    } else {
        format!("{}/{}", base, module_path)
    }
}

/// Canonical `https://` form of a clone URL.
///
/// Accepts `https://`, `http://`, `git@host:owner/repo` and bare `host/owner/repo`
/// forms, with or without a trailing `.git` or `/`.
pub fn normalize_repository_url(url: &str) -> String {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let url = match url.strip_prefix("git@") {
        Some(rest) => rest.replacen(':', "/", 1),
        None => url.to_string(),
    };

    let url = url.trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url).trim_end_matches('/');

    format!("https://{}", url)
}
