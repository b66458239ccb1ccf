//! Version tags visible from the checked-out commit

use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, Repository};
use tracing::debug;

use crate::git::error::GitError;
use crate::module::path::PATH_VERSION_RE;

/// Lists version-shaped tags that existed as of HEAD.
///
/// A tag whose commit was committed strictly after HEAD's commit is ignored,
/// so pinning an older ref does not pick up later releases. Names are returned
/// sorted ascending.
pub fn list_reachable_version_tags(repo: &Repository) -> Result<Vec<String>, GitError> {
    let head = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map_err(|e| GitError::Head(e.message().to_string()))?;
    let head_time = commit_time(&head);

    let names = repo
        .tag_names(None)
        .map_err(|e| GitError::Tags(e.message().to_string()))?;

    let mut tags = Vec::new();

    for name in names.iter().flatten() {
        let tag_commit = repo
            .revparse_single(&format!("refs/tags/{}", name))
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| GitError::Tag {
                tag: name.to_string(),
                message: e.message().to_string(),
            })?;

        let tag_time = commit_time(&tag_commit);
        if tag_time > head_time {
            debug!("Ignoring tag {} committed after HEAD ({} > {})", name, tag_time, head_time);
            continue;
        }

        if PATH_VERSION_RE.is_match(name) {
            tags.push(name.to_string());
        }
    }

    tags.sort();

    Ok(tags)
}

/// Committer timestamp of a commit
fn commit_time(commit: &Commit<'_>) -> DateTime<Utc> {
    let seconds = commit.committer().when().seconds();

    Utc.timestamp_opt(seconds, 0).single().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Signature, Time};
    use std::fs;
    use tempfile::TempDir;

    fn commit_at(repo: &Repository, file: &str, content: &str, seconds: i64) -> Oid {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(file), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(std::path::Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let signature = Signature::new("Test User", "test@test.com", &Time::new(seconds, 0)).unwrap();
        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &signature, &signature, "commit", &tree, &parents)
            .unwrap()
    }

    fn tag(repo: &Repository, name: &str, oid: Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    #[test]
    fn list_reachable_version_tags_returns_sorted_version_tags() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let first = commit_at(&repo, "VERSION", "v0.1.0", 1_000);
        tag(&repo, "v0.1.0", first);
        tag(&repo, "nightly", first);
        let second = commit_at(&repo, "VERSION", "v0.2.0", 2_000);
        tag(&repo, "v0.2.0", second);
        tag(&repo, "contrib/v0.1.0", second);

        let actual = list_reachable_version_tags(&repo).unwrap();

        assert_eq!(actual, vec!["contrib/v0.1.0", "v0.1.0", "v0.2.0"]);
    }

    #[test]
    fn list_reachable_version_tags_excludes_tags_after_head() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let first = commit_at(&repo, "VERSION", "v0.1.0", 1_000);
        tag(&repo, "v0.1.0", first);
        let second = commit_at(&repo, "VERSION", "v0.2.0", 2_000);
        tag(&repo, "v0.2.0", second);
        let same_time = commit_at(&repo, "VERSION", "v0.2.1", 2_000);
        tag(&repo, "v0.2.1", same_time);
        let third = commit_at(&repo, "VERSION", "v0.3.0", 3_000);
        tag(&repo, "v0.3.0", third);

        repo.set_head_detached(second).unwrap();

        let actual = list_reachable_version_tags(&repo).unwrap();

        // v0.2.1 shares HEAD's commit time and is kept.
        assert_eq!(actual, vec!["v0.1.0", "v0.2.0", "v0.2.1"]);
    }

    #[test]
    fn list_reachable_version_tags_fails_without_head_commit() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let err = list_reachable_version_tags(&repo).unwrap_err();

        assert!(matches!(err, GitError::Head(_)));
    }
}
