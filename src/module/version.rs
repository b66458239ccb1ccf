//! Module version value
//!
//! Go module versions published by tags are plain `vMAJOR.MINOR.PATCH` triples.
//! Pre-release and build suffixes are not part of this model.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::module::error::ModuleError;

/// Matches `1.2.3` or `v1.2.3`
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)$").unwrap());

/// A `vMAJOR.MINOR.PATCH` version.
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether the Go path-versioning convention requires a `/vN` suffix
    pub fn needs_path_suffix(&self) -> bool {
        self.major > 1
    }
}

/// Parse a version string, with or without the leading `v`.
///
/// Anything that is not exactly three dot-separated numbers is rejected.
pub fn parse_version(s: &str) -> Result<Version, ModuleError> {
    let invalid = || ModuleError::InvalidVersion(s.to_string());

    let caps = VERSION_RE.captures(s).ok_or_else(invalid)?;
    let part = |i: usize| caps[i].parse::<u64>().map_err(|_| invalid());

    Ok(Version::new(part(1)?, part(2)?, part(3)?))
}

impl FromStr for Version {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
