//! Hydrator that reuses a previously published build
//!
//! The published `metadata.v1.json` carries the resolved site together with the
//! checksum of the configuration it came from. When that checksum matches the
//! current configuration the whole site is taken from it and no repository is
//! inspected.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::{METADATA_FETCH_TIMEOUT, METADATA_FILE};
use crate::site::error::{CacheError, HydrateError};
use crate::site::hydrator::Hydrator;
use crate::site::types::{Metadata, Site};

/// Hydrator backed by the metadata file served from the site's own host
pub struct MetadataHydrator {
    client: reqwest::Client,
    checksum: String,
    timeout: Duration,
}

impl MetadataHydrator {
    /// Creates a MetadataHydrator expecting `checksum` in the published metadata
    pub fn new(checksum: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("vanity-render")
                .build()
                .expect("Failed to create HTTP client"),
            checksum: checksum.into(),
            timeout: METADATA_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the site with the published one when it is up to date
    ///
    /// # Returns
    /// * `Ok(true)` - The site was replaced by the published metadata
    /// * `Ok(false)` - The site has no hostname; nothing was fetched
    /// * `Err(CacheError)` - A miss (see `CacheError::is_miss`) or a fetch failure
    pub async fn try_fast_path(&self, site: &mut Site) -> Result<bool, CacheError> {
        if site.hostname.is_empty() {
            return Ok(false);
        }

        let metadata = self.fetch_metadata(&site.hostname).await?;

        if metadata.checksum != self.checksum {
            info!(
                "Cached metadata is stale: checksum {} does not match {}",
                metadata.checksum, self.checksum
            );
            return Err(CacheError::ChecksumMismatched);
        }

        info!("Using cached metadata from {}", site.hostname);
        *site = metadata.site;

        Ok(true)
    }

    async fn fetch_metadata(&self, hostname: &str) -> Result<Metadata, CacheError> {
        let url = format!("http://{}/{}", hostname, METADATA_FILE);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CacheError::MetadataNotFound);
        }

        if !status.is_success() {
            warn!("Metadata host returned status {}: {}", status, url);
            return Err(CacheError::UnexpectedStatus(status));
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| CacheError::MetadataInvalid(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Hydrator for MetadataHydrator {
    async fn hydrate(&self, site: &mut Site) -> Result<(), HydrateError> {
        if !self.try_fast_path(site).await? {
            return Err(CacheError::NoHostname.into());
        }

        Ok(())
    }
}
