use thiserror::Error;

/// Git failures.
///
/// Messages are kept as strings so that one clone result, failures included,
/// can be handed to every caller that asked for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitError {
    #[error("could not create working directory: {0}")]
    WorkDir(String),

    #[error("could not clone repository {url}: {message}")]
    Clone { url: String, message: String },

    #[error("could not resolve ref {reference:?}: {message}")]
    ResolveRef { reference: String, message: String },

    #[error("could not checkout revision {revision}: {message}")]
    Checkout { revision: String, message: String },

    #[error("could not open repository: {0}")]
    Open(String),

    #[error("could not get head commit: {0}")]
    Head(String),

    #[error("could not resolve tag {tag:?}: {message}")]
    Tag { tag: String, message: String },

    #[error("could not list tags: {0}")]
    Tags(String),
}
