use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitError;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("invalid version: {0:?}")]
    InvalidVersion(String),

    #[error("could not parse manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("could not walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("module discovery task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
