//! Writes the metadata file that later builds reuse as their cache

use std::path::PathBuf;

use tracing::info;

use crate::config::METADATA_FILE;
use crate::site::error::RenderError;
use crate::site::renderer::Renderer;
use crate::site::types::{Metadata, Site};

/// Renderer that writes `metadata.v1.json` after an optional upstream renderer
pub struct MetadataRenderer {
    upstream: Option<Box<dyn Renderer>>,
    output_dir: PathBuf,
    checksum: String,
}

impl MetadataRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, checksum: impl Into<String>) -> Self {
        Self {
            upstream: None,
            output_dir: output_dir.into(),
            checksum: checksum.into(),
        }
    }

    /// Runs `upstream` before the metadata file is written
    pub fn with_upstream(mut self, upstream: impl Renderer + 'static) -> Self {
        self.upstream = Some(Box::new(upstream));
        self
    }

    fn render_metadata(&self, site: &Site) -> Result<(), RenderError> {
        let metadata = Metadata {
            checksum: self.checksum.clone(),
            site: site.clone(),
        };

        let data = serde_json::to_string_pretty(&metadata)?;
        let path = self.output_dir.join(METADATA_FILE);

        std::fs::write(&path, data).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Render: {}", METADATA_FILE);

        Ok(())
    }
}

impl Renderer for MetadataRenderer {
    fn render(&self, site: &Site) -> Result<(), RenderError> {
        if let Some(upstream) = &self.upstream {
            upstream.render(site)?;
        }

        self.render_metadata(site)
    }
}
