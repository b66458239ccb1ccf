//! Hydrator implementations
//!
//! - [`github`]: resolves modules of supported repositories concurrently
//! - [`metadata`]: takes the whole site from the published metadata file
//! - [`fragment`]: combines the two to refresh only selected repositories

pub mod fragment;
pub mod github;
pub mod metadata;

pub use fragment::FragmentHydrator;
pub use github::{GitHubHydrator, normalize_repository_url};
pub use metadata::MetadataHydrator;
