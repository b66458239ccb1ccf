//! Site data model shared by hydrators and renderers

use serde::{Deserialize, Serialize};

/// The catalogue behind a vanity host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub page_title: String,
    pub page_description: String,
    pub hostname: String,
    pub source_url: String,
    pub repositories: Vec<Repository>,
}

/// One catalogue entry.
///
/// `name`, `deprecated`, `hidden` and `ref` come from configuration. The other
/// fields are filled in by hydration; `path` gains a `/vN` suffix when the
/// latest root version has a major version of 2 or above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    pub path: String,
    pub deprecated: String,
    pub hidden: bool,
    pub repository_url: String,
    pub repository_name: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub latest_version: String,
    pub modules: Vec<Module>,
}

/// An importable module published by a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub path: String,
    pub import_prefix: String,
    pub vcs: String,
    pub repository_url: String,
    pub home_url: String,
    pub directory_url: String,
    pub file_url: String,
}

/// Content of the published cache file: a resolved site plus the checksum of
/// the configuration it was resolved from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub checksum: String,
    #[serde(flatten)]
    pub site: Site,
}
