//! Resolution and caching pipeline for Go vanity import sites
//!
//! # Modules
//!
//! - [`module`]: versions, module paths and module discovery
//! - [`git`]: clones, tags and the git-backed module finder
//! - [`site`]: site model, hydrators and renderers
//! - [`config`]: configuration file and pipeline constants
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod git;
pub mod logging;
pub mod module;
pub mod site;
