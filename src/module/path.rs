//! Module paths and the Go path-versioning convention
//!
//! A module with major version 2 or above lives at an import path ending in
//! `/vN`. Version 0 and 1 modules never carry the suffix.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::module::version::{Version, parse_version};

/// Matches a tag-like string: `v1.2.3` or `some/dir/v1.2.3`
pub static PATH_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z0-9][A-Za-z0-9_.\-/]*)/)?(v\d+\.\d+\.\d+)$").unwrap()
});

/// Matches a bare major version segment: `v2`
static MAJOR_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v?\d+$").unwrap());

/// Location of a module relative to its repository root.
///
/// `"."` is the repository root. The empty path marks a string that was not
/// version-shaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModulePath(String);

impl ModulePath {
    pub const ROOT: &'static str = ".";

    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for `"."` and for a bare major segment such as `v2`
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT || (self.0.starts_with('v') && MAJOR_VERSION_RE.is_match(&self.0))
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModulePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ModulePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A module path paired with one of its versions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionedPath {
    pub path: ModulePath,
    pub version: Version,
}

impl VersionedPath {
    pub fn new(path: impl Into<ModulePath>, version: Version) -> Self {
        Self {
            path: path.into(),
            version,
        }
    }
}

/// Split a tag such as `contrib/v2.3.0` into its module path and version.
///
/// The path is rewritten to carry `/vN` when the major version is 2 or above,
/// so `contrib/v2.3.0` becomes `contrib/v2` and `v2.3.0` becomes `v2`.
/// Strings that are not version-shaped yield the empty path and `v0.0.0`.
pub fn parse_path_version(s: &str) -> VersionedPath {
    let Some(caps) = PATH_VERSION_RE.captures(s) else {
        return VersionedPath::default();
    };

    // Out-of-range numbers are not version tags either.
    let Ok(version) = parse_version(&caps[2]) else {
        return VersionedPath::default();
    };

    let path = caps.get(1).map_or(ModulePath::ROOT, |m| m.as_str());
    let path = if version.needs_path_suffix() {
        apply_version_suffix(path, version)
    } else {
        ModulePath::new(path)
    };

    VersionedPath { path, version }
}

/// Append `/v<major>` to a path, dropping any leading `.` and `/`.
///
/// The suffix is appended for every major version; callers decide whether the
/// convention applies.
pub fn apply_version_suffix(path: &str, version: Version) -> ModulePath {
    let base = path.trim_start_matches(['.', '/']);
    let suffixed = format!("{}/v{}", base, version.major);

    ModulePath::new(suffixed.trim_start_matches('/'))
}

/// Remove a trailing major version segment: `contrib/v2` -> `contrib`, `v2` -> `.`
pub fn strip_version_suffix(path: &str) -> ModulePath {
    match path.rsplit_once('/') {
        Some((head, last)) if MAJOR_VERSION_RE.is_match(last) => ModulePath::new(head),
        Some(_) => ModulePath::new(path),
        None if MAJOR_VERSION_RE.is_match(path) => ModulePath::root(),
        None => ModulePath::new(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("v1.2.0", ".", Version::new(1, 2, 0))]
    #[case("v0.0.0", ".", Version::new(0, 0, 0))]
    #[case("v2.3.0", "v2", Version::new(2, 3, 0))]
    #[case("contrib/v1.2.0", "contrib", Version::new(1, 2, 0))]
    #[case("contrib/v2.3.0", "contrib/v2", Version::new(2, 3, 0))]
    #[case("contrib/module/v3.0.1", "contrib/module/v3", Version::new(3, 0, 1))]
    #[case("go-contrib/v0.4.0", "go-contrib", Version::new(0, 4, 0))]
    #[case("not-a-version", "", Version::new(0, 0, 0))]
    #[case("v1.2", "", Version::new(0, 0, 0))]
    #[case("v1.2.3-rc.1", "", Version::new(0, 0, 0))]
    #[case("release-v1.2.3", "", Version::new(0, 0, 0))]
    #[case("/v1.2.3", "", Version::new(0, 0, 0))]
    fn parse_path_version_returns_expected(
        #[case] input: &str,
        #[case] expected_path: &str,
        #[case] expected_version: Version,
    ) {
        let actual = parse_path_version(input);

        assert_eq!(actual.path, ModulePath::new(expected_path));
        assert_eq!(actual.version, expected_version);
    }

    #[rstest]
    #[case("", Version::new(1, 2, 3), "v1")]
    #[case(".", Version::new(2, 0, 0), "v2")]
    #[case("contrib/test", Version::new(1, 2, 3), "contrib/test/v1")]
    #[case("/contrib", Version::new(3, 0, 0), "contrib/v3")]
    #[case("./contrib", Version::new(4, 1, 0), "contrib/v4")]
    fn apply_version_suffix_returns_expected(
        #[case] path: &str,
        #[case] version: Version,
        #[case] expected: &str,
    ) {
        assert_eq!(apply_version_suffix(path, version), ModulePath::new(expected));
    }

    #[rstest]
    #[case("contrib/v2", "contrib")]
    #[case("contrib/module/v10", "contrib/module")]
    #[case("v2", ".")]
    #[case("contrib", "contrib")]
    #[case("contrib/vendor", "contrib/vendor")]
    #[case(".", ".")]
    fn strip_version_suffix_returns_expected(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(strip_version_suffix(path), ModulePath::new(expected));
    }

    #[rstest]
    #[case(".", true)]
    #[case("v2", true)]
    #[case("v13", true)]
    #[case("contrib", false)]
    #[case("contrib/v2", false)]
    #[case("2", false)]
    #[case("", false)]
    fn is_root_returns_expected(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(ModulePath::new(path).is_root(), expected);
    }
}
