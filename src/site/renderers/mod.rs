pub mod metadata;

pub use metadata::MetadataRenderer;
