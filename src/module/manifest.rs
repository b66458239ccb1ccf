//! go.mod manifests
//!
//! Only the `module` directive matters here: its path tells whether the module
//! lives on a `/vN` major version line. Format examples:
//! - `module example.com/repo`
//! - `module "example.com/repo/contrib/v2"`

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::module::error::ModuleError;
use crate::module::path::{VersionedPath, parse_path_version};

/// File name of a Go module manifest
pub const MANIFEST_FILE: &str = "go.mod";

/// Match: module path [// comment], the path optionally quoted
static MODULE_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^module\s+(?:"([^"]+)"|(\S+))\s*(?://.*)?$"#).unwrap()
});

/// Match: trailing major version segment of a module path
static MAJOR_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/v(\d+)$").unwrap());

/// Extract the declared module path from go.mod content.
///
/// Blank lines and `//` comments are skipped. The first remaining line must be
/// the `module` directive; a manifest with no significant lines declares nothing.
pub fn parse_module_path(content: &str) -> Result<Option<String>, String> {
    let Some(line) = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("//"))
    else {
        return Ok(None);
    };

    let caps = MODULE_DIRECTIVE_RE
        .captures(line)
        .ok_or_else(|| format!("expected module directive, found {:?}", line))?;

    let path = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().to_string());

    Ok(path)
}

/// Baseline version implied by a declared module path: `vN.0.0` for a `/vN`
/// module, `v0.0.0` otherwise.
pub fn baseline_version(module_path: Option<&str>) -> String {
    module_path
        .and_then(|path| MAJOR_SUFFIX_RE.captures(path))
        .map(|caps| format!("v{}.0.0", &caps[1]))
        .unwrap_or_else(|| "v0.0.0".to_string())
}

/// Walk a working tree and derive one version candidate per go.mod found.
///
/// The candidate path is the manifest's directory relative to `dir`. Candidates
/// whose directory is not version-shaped are dropped.
pub fn scan_manifests(dir: &Path) -> Result<Vec<VersionedPath>, ModuleError> {
    let mut candidates = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry?;

        if !entry.file_type().is_file() || entry.file_name() != MANIFEST_FILE {
            continue;
        }

        let content = std::fs::read_to_string(entry.path())?;
        let module_path =
            parse_module_path(&content).map_err(|message| ModuleError::Manifest {
                path: entry.path().to_path_buf(),
                message,
            })?;

        let version = baseline_version(module_path.as_deref());
        let relative_dir = relative_module_dir(dir, entry.path());

        let tag = if relative_dir.is_empty() {
            version
        } else {
            format!("{}/{}", relative_dir, version)
        };

        let candidate = parse_path_version(&tag);
        if candidate.path.is_empty() {
            debug!("Ignoring manifest with unsupported path: {}", tag);
            continue;
        }

        debug!(
            "Found manifest {} for {} at {}",
            entry.path().display(),
            candidate.path,
            candidate.version
        );
        candidates.push(candidate);
    }

    Ok(candidates)
}

/// Directory of `manifest` relative to `root`, `/`-separated, empty for the root
fn relative_module_dir(root: &Path, manifest: &Path) -> String {
    let parent = manifest.parent().unwrap_or(root);
    let relative = parent.strip_prefix(root).unwrap_or(parent);

    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::path::ModulePath;
    use crate::module::version::Version;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(root: &Path, dir: &str, module: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(MANIFEST_FILE),
            format!("module {}\n\ngo 1.22\n", module),
        )
        .unwrap();
    }

    #[rstest]
    #[case("module example.com/repo\n", Some("example.com/repo"))]
    #[case("// Package repo\n\nmodule example.com/repo // legacy\ngo 1.21\n", Some("example.com/repo"))]
    #[case("module \"example.com/repo/v2\"\n", Some("example.com/repo/v2"))]
    #[case("   \n// only comments\n", None)]
    #[case("", None)]
    fn parse_module_path_returns_expected(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            parse_module_path(content).unwrap(),
            expected.map(|s| s.to_string())
        );
    }

    #[rstest]
    #[case("go 1.22\nmodule example.com/repo\n")]
    #[case("module\n")]
    #[case("require golang.org/x/text v0.14.0\n")]
    fn parse_module_path_rejects_missing_directive(#[case] content: &str) {
        assert!(parse_module_path(content).is_err());
    }

    #[rstest]
    #[case(Some("example.com/repo"), "v0.0.0")]
    #[case(Some("example.com/repo/v2"), "v2.0.0")]
    #[case(Some("example.com/repo/contrib/v13"), "v13.0.0")]
    #[case(Some("example.com/repo/v2/contrib"), "v0.0.0")]
    #[case(None, "v0.0.0")]
    fn baseline_version_returns_expected(#[case] module: Option<&str>, #[case] expected: &str) {
        assert_eq!(baseline_version(module), expected);
    }

    #[test]
    fn scan_manifests_finds_root_and_submodules() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), ".", "host.tld/repository/v2");
        write_manifest(dir.path(), "contrib", "host.tld/repository/contrib/v2");
        write_manifest(dir.path(), "test", "host.tld/repository/test");

        let actual = scan_manifests(dir.path()).unwrap();

        assert_eq!(
            actual,
            vec![
                VersionedPath::new(ModulePath::new("contrib/v2"), Version::new(2, 0, 0)),
                VersionedPath::new(ModulePath::new("v2"), Version::new(2, 0, 0)),
                VersionedPath::new(ModulePath::new("test"), Version::new(0, 0, 0)),
            ]
        );
    }

    #[test]
    fn scan_manifests_skips_git_directory() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), ".", "host.tld/repository");
        write_manifest(dir.path(), ".git/modules", "host.tld/ignored");

        let actual = scan_manifests(dir.path()).unwrap();

        assert_eq!(
            actual,
            vec![VersionedPath::new(ModulePath::root(), Version::new(0, 0, 0))]
        );
    }

    #[test]
    fn scan_manifests_returns_empty_without_manifests() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# Test").unwrap();

        assert!(scan_manifests(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn scan_manifests_fails_on_malformed_manifest() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("broken")).unwrap();
        fs::write(dir.path().join("broken").join(MANIFEST_FILE), "not a manifest\n").unwrap();

        let err = scan_manifests(dir.path()).unwrap_err();

        assert!(matches!(err, ModuleError::Manifest { .. }));
        assert!(err.to_string().contains("expected module directive"));
    }
}
