#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use git2::{IndexAddOption, Repository, Signature};
use tempfile::TempDir;

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create_dir_all should succeed in test temp dirs");
    }
    fs::write(path, content).expect("write should succeed in test temp dirs");
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read should succeed in test temp dirs")
}

/// Throwaway upstream repository with commits on `master`.
pub struct Upstream {
    _tmp: TempDir,
    dir: PathBuf,
    repo: Repository,
}

impl Upstream {
    /// Upstream laid out like the CodeFray API: packaging files plus a `src` payload.
    pub fn codefray() -> Self {
        let upstream = Self::empty();
        upstream.write("LICENSE", "MIT License\n");
        upstream.write("README.md", "# CodeFrayAPI\n");
        upstream.write("src/main.go", "package main\n\nfunc main() {}\n");
        upstream.write("src/api/bot.go", "package api\n\ntype Bot struct{}\n");
        upstream.write("src/api/arena/arena.go", "package arena\n");
        upstream.write("src/run.sh", "#!/bin/sh\ngo run .\n");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(
                upstream.dir.join("src/run.sh"),
                fs::Permissions::from_mode(0o755),
            )
            .expect("set_permissions should succeed");
        }
        upstream.commit("initial import");
        upstream
    }

    pub fn empty() -> Self {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let dir = tmp.path().join("CodeFrayAPI");
        fs::create_dir_all(&dir).expect("create_dir_all should succeed");
        let repo = Repository::init(&dir).expect("git init should succeed");
        Self {
            _tmp: tmp,
            dir,
            repo,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn url(&self) -> String {
        self.dir.to_string_lossy().into_owned()
    }

    pub fn write(&self, rel: &str, content: &str) {
        write_file(&self.dir.join(rel), content);
    }

    /// Commit the whole worktree onto `refs/heads/master`.
    pub fn commit(&self, message: &str) -> git2::Oid {
        let mut index = self.repo.index().expect("index should open");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("add_all should succeed");
        index.write().expect("index write should succeed");
        let tree_id = index.write_tree().expect("write_tree should succeed");
        let tree = self.repo.find_tree(tree_id).expect("tree should exist");
        let sig = Signature::now("Test User", "test@example.com").expect("signature");

        let parent = self
            .repo
            .find_reference("refs/heads/master")
            .ok()
            .and_then(|r| r.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(
                Some("refs/heads/master"),
                &sig,
                &sig,
                message,
                &tree,
                &parents,
            )
            .expect("commit should succeed");
        self.repo
            .set_head("refs/heads/master")
            .expect("set_head should succeed");
        oid
    }
}

/// Deterministic blake3 hash over relative paths and file contents.
pub fn hash_tree(root: &Path) -> String {
    let mut hasher = blake3::Hasher::new();
    hash_dir(&mut hasher, root, "");
    hasher.finalize().to_hex().to_string()
}

fn hash_dir(hasher: &mut blake3::Hasher, dir: &Path, base: &str) {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .expect("read_dir should succeed")
        .collect::<Result<Vec<_>, _>>()
        .expect("dir entries should be readable");
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel = if base.is_empty() {
            name
        } else {
            format!("{base}/{name}")
        };
        hasher.update(rel.as_bytes());
        if entry.path().is_dir() {
            hasher.update(&[0xFF]);
            hash_dir(hasher, &entry.path(), &rel);
        } else {
            hasher.update(&[0x00]);
            hasher.update(&fs::read(entry.path()).expect("read should succeed"));
        }
    }
}

/// Assert every file under `expected` exists under `actual` with equal bytes.
pub fn assert_tree_contains(expected: &Path, actual: &Path) {
    for entry in fs::read_dir(expected).expect("read_dir should succeed") {
        let entry = entry.expect("dir entry should be readable");
        let want = entry.path();
        let got = actual.join(entry.file_name());
        if want.is_dir() {
            assert!(got.is_dir(), "missing directory {}", got.display());
            assert_tree_contains(&want, &got);
        } else {
            assert_eq!(
                fs::read(&want).expect("read should succeed"),
                fs::read(&got).unwrap_or_else(|_| panic!("missing file {}", got.display())),
                "content differs for {}",
                got.display()
            );
        }
    }
}
