//! Git repository fixtures

use std::fs;
use std::path::Path;

use git2::{Commit, Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// A throwaway repository with explicit commit times
pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Location usable as a clone URL
    pub fn location(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Writes `files` and commits them at `seconds` since the epoch
    pub fn commit(&self, files: &[(&str, &str)], seconds: i64) -> Oid {
        let mut index = self.repo.index().unwrap();

        for (file, content) in files {
            let path = self.dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            index.add_path(Path::new(file)).unwrap();
        }

        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

        let signature =
            Signature::new("Test User", "test@test.com", &Time::new(seconds, 0)).unwrap();
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, "commit", &tree, &parents)
            .unwrap()
    }

    /// Adds a lightweight tag on `oid`
    pub fn tag(&self, name: &str, oid: Oid) -> &Self {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
        self
    }
}

/// go.mod content declaring `module`
pub fn manifest(module: &str) -> String {
    format!("module {}\n\ngo 1.22\n", module)
}
