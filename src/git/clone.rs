//! Repository clones shared across hydration workers
//!
//! Each `(URL, ref)` pair is cloned at most once per `CloneCache`. Concurrent
//! callers for the same key wait for the first clone to finish and then all see
//! the same result, including the same error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use git2::Repository;
use git2::build::{CheckoutBuilder, RepoBuilder};
use tempfile::TempDir;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::git::error::GitError;

/// Deduplication identity of a clone request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CloneKey {
    pub repository_url: String,
    pub reference: String,
}

/// A working tree checked out at the requested ref
#[derive(Debug)]
pub struct Snapshot {
    workdir: PathBuf,
    // Removes the clone when the last holder goes away.
    _dir: Option<TempDir>,
}

impl Snapshot {
    /// Snapshot that owns (and eventually deletes) its temporary directory
    pub fn owned(dir: TempDir) -> Self {
        Self {
            workdir: dir.path().to_path_buf(),
            _dir: Some(dir),
        }
    }

    /// Snapshot of a directory managed by someone else
    pub fn borrowed(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            _dir: None,
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Opens the repository behind the working tree
    pub fn open(&self) -> Result<Repository, GitError> {
        Repository::open(&self.workdir).map_err(|e| GitError::Open(e.message().to_string()))
    }
}

/// Performs the actual clone and checkout
pub trait Cloner: Send + Sync + 'static {
    /// Clones `url` and, when `reference` is not empty, checks it out
    fn clone_repository(&self, url: &str, reference: &str) -> Result<Snapshot, GitError>;
}

/// `Cloner` backed by libgit2
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCloner;

impl Cloner for GitCloner {
    fn clone_repository(&self, url: &str, reference: &str) -> Result<Snapshot, GitError> {
        let dir = TempDir::new().map_err(|e| GitError::WorkDir(e.to_string()))?;

        let repo = RepoBuilder::new()
            .clone(url, dir.path())
            .map_err(|e| GitError::Clone {
                url: url.to_string(),
                message: e.message().to_string(),
            })?;

        if !reference.is_empty() {
            checkout(&repo, reference)?;
        }

        debug!("Cloned {} into {}", url, dir.path().display());

        Ok(Snapshot::owned(dir))
    }
}

/// Detach HEAD at `reference`, trying `origin/<reference>` for remote branches
fn checkout(repo: &Repository, reference: &str) -> Result<(), GitError> {
    let resolve_error = |e: git2::Error| GitError::ResolveRef {
        reference: reference.to_string(),
        message: e.message().to_string(),
    };

    let object = match repo.revparse_single(reference) {
        Ok(object) => object,
        Err(e) => repo
            .revparse_single(&format!("origin/{}", reference))
            .map_err(|_| resolve_error(e))?,
    };

    let commit = object.peel_to_commit().map_err(resolve_error)?;
    let checkout_error = |e: git2::Error| GitError::Checkout {
        revision: commit.id().to_string(),
        message: e.message().to_string(),
    };

    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
        .map_err(checkout_error)?;
    repo.set_head_detached(commit.id()).map_err(checkout_error)?;

    Ok(())
}

type CloneResult = Result<Arc<Snapshot>, GitError>;

/// Run-once clone table keyed by `CloneKey`
pub struct CloneCache<C: Cloner = GitCloner> {
    cloner: Arc<C>,
    clones: Mutex<HashMap<CloneKey, Arc<OnceCell<CloneResult>>>>,
}

impl CloneCache<GitCloner> {
    pub fn new() -> Self {
        Self::with_cloner(GitCloner)
    }
}

impl Default for CloneCache<GitCloner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cloner> CloneCache<C> {
    pub fn with_cloner(cloner: C) -> Self {
        Self {
            cloner: Arc::new(cloner),
            clones: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the snapshot for `(url, reference)`, cloning it on first request
    pub async fn resolve(&self, url: &str, reference: &str) -> CloneResult {
        let key = CloneKey {
            repository_url: url.to_string(),
            reference: reference.to_string(),
        };

        // The map lock only covers the lookup; the clone itself runs under the cell.
        let cell = {
            let mut clones = self.clones.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(clones.entry(key).or_default())
        };

        cell.get_or_init(|| self.clone_once(url, reference))
            .await
            .clone()
    }

    async fn clone_once(&self, url: &str, reference: &str) -> CloneResult {
        info!("Cloning {} at {:?}", url, reference);

        let cloner = Arc::clone(&self.cloner);
        let (task_url, task_reference) = (url.to_string(), reference.to_string());

        match tokio::task::spawn_blocking(move || {
            cloner.clone_repository(&task_url, &task_reference)
        })
        .await
        {
            Ok(result) => result.map(Arc::new),
            Err(e) => Err(GitError::Clone {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
