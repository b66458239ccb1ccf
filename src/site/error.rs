use std::path::PathBuf;

use thiserror::Error;

use crate::module::ModuleError;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("site has no hostname")]
    NoHostname,

    #[error("metadata not found")]
    MetadataNotFound,

    #[error("invalid metadata: {0}")]
    MetadataInvalid(String),

    #[error("checksum mismatched")]
    ChecksumMismatched,

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CacheError {
    /// Whether the cache simply has nothing usable, as opposed to being unreachable
    pub fn is_miss(&self) -> bool {
        matches!(
            self,
            CacheError::NoHostname
                | CacheError::MetadataNotFound
                | CacheError::MetadataInvalid(_)
                | CacheError::ChecksumMismatched
        )
    }
}

#[derive(Debug, Error)]
pub enum HydrateError {
    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl HydrateError {
    /// True when this is a cache miss rather than a real failure
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, HydrateError::Cache(e) if e.is_miss())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("upstream renderer failed: {0}")]
    Upstream(String),

    #[error("could not serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
