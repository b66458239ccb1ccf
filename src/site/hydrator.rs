//! Hydrator trait definition

use crate::site::error::HydrateError;
use crate::site::types::Site;

/// Trait for filling in the derived parts of a site
#[async_trait::async_trait]
pub trait Hydrator: Send + Sync {
    /// Hydrates the site in place
    ///
    /// # Returns
    /// * `Ok(())` - The site was hydrated, or there was nothing to do
    /// * `Err(HydrateError)` - If hydration failed; the site may be partially hydrated
    async fn hydrate(&self, site: &mut Site) -> Result<(), HydrateError>;
}

#[async_trait::async_trait]
impl<F> Hydrator for F
where
    F: Fn(&mut Site) -> Result<(), HydrateError> + Send + Sync,
{
    async fn hydrate(&self, site: &mut Site) -> Result<(), HydrateError> {
        self(site)
    }
}

/// Runs hydrators in order, stopping at the first error
pub async fn hydrate(site: &mut Site, hydrators: &[&dyn Hydrator]) -> Result<(), HydrateError> {
    for hydrator in hydrators {
        hydrator.hydrate(site).await?;
    }

    Ok(())
}
