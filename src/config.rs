use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::site::types::{Repository, Site};

// =============================================================================
// Hydration constants
// =============================================================================

/// Number of repositories resolved concurrently
pub const DEFAULT_NUM_WORKERS: usize = 5;

/// Only repositories whose canonical URL contains this prefix are resolved
pub const DEFAULT_SUPPORTED_HOST: &str = "https://github.com/";

// =============================================================================
// Cache constants
// =============================================================================

/// Name of the published metadata file, relative to the site root
pub const METADATA_FILE: &str = "metadata.v1.json";

/// Timeout for fetching the published metadata (10 seconds)
pub const METADATA_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("missing host")]
    MissingHost,
}

/// Site configuration file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page_title: String,
    pub page_description: String,
    pub host: String,
    pub source_url: String,
    pub supported_host: String,
    pub repositories: Vec<RepositoryConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_title: String::new(),
            page_description: String::new(),
            host: String::new(),
            source_url: String::new(),
            supported_host: DEFAULT_SUPPORTED_HOST.to_string(),
            repositories: Vec::new(),
        }
    }
}

/// One configured repository
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RepositoryConfig {
    pub name: String,
    /// Import path below the host, without a major version suffix
    pub path: String,
    /// Clone URL
    pub repository: String,
    #[serde(rename = "ref")]
    pub reference: String,
    /// Deprecation notice; empty when the repository is maintained
    pub deprecated: String,
    pub hidden: bool,
}

impl Config {
    /// Reads, validates and completes the configuration at `path`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(content)?;

        if config.host.is_empty() {
            return Err(ConfigError::MissingHost);
        }

        if config.page_title.is_empty() {
            config.page_title = config.host.clone();
        }

        Ok(config)
    }
}

impl From<Config> for Site {
    fn from(config: Config) -> Self {
        Site {
            page_title: config.page_title,
            page_description: config.page_description,
            hostname: config.host,
            source_url: config.source_url,
            repositories: config
                .repositories
                .into_iter()
                .map(|repository| Repository {
                    name: repository.name,
                    path: repository.path,
                    deprecated: repository.deprecated,
                    hidden: repository.hidden,
                    repository_url: repository.repository,
                    reference: repository.reference,
                    ..Default::default()
                })
                .collect(),
        }
    }
}

/// Lowercase hex SHA-256 of the file at `path`
pub fn checksum(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(format!("{:x}", Sha256::digest(&content)))
}
