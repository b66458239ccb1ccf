//! Site model and the hydrate/render pipeline
//!
//! # Modules
//!
//! - [`types`]: `Site`, `Repository`, `Module` and the published `Metadata`
//! - [`hydrator`]: `Hydrator` trait and sequential chaining
//! - [`hydrators`]: GitHub, metadata cache and fragment hydrators
//! - [`renderer`]: `Renderer` trait
//! - [`renderers`]: metadata cache writer
//! - [`error`]: cache, hydration and rendering errors

pub mod error;
pub mod hydrator;
pub mod hydrators;
pub mod renderer;
pub mod renderers;
pub mod types;

pub use error::{CacheError, HydrateError, RenderError};
pub use hydrator::{Hydrator, hydrate};
pub use renderer::Renderer;
pub use types::{Metadata, Module, Repository, Site};
