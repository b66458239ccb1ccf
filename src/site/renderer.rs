//! Renderer trait definition

use crate::site::error::RenderError;
use crate::site::types::Site;

/// Trait for turning a hydrated site into output files
pub trait Renderer: Send + Sync {
    fn render(&self, site: &Site) -> Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&Site) -> Result<(), RenderError> + Send + Sync,
{
    fn render(&self, site: &Site) -> Result<(), RenderError> {
        self(site)
    }
}
