use std::fs;
use std::path::{Path, PathBuf};

use git2::{BranchType, Commit, Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// Throwaway repository for tests. Remote-tracking refs are written
/// directly, so nothing ever talks to a real remote.
pub struct GitRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl GitRepo {
    /// Fresh repository whose unborn HEAD points at `main`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The path the evaluator reports for this repository.
    pub fn report_path(&self) -> PathBuf {
        self.repo
            .workdir()
            .unwrap()
            .components()
            .as_path()
            .to_path_buf()
    }

    fn signature() -> Signature<'static> {
        Signature::now("Fixture", "fixture@example.com").unwrap()
    }

    /// Commits the (empty) index on top of HEAD and advances the current branch.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = Self::signature();
        let tree_id = self.repo.index().unwrap().write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    /// Creates a child of `parent` without moving any ref.
    pub fn dangling_commit(&self, parent: Oid, message: &str) -> Oid {
        let sig = Self::signature();
        let parent = self.repo.find_commit(parent).unwrap();
        let tree = parent.tree().unwrap();
        self.repo
            .commit(None, &sig, &sig, message, &tree, &[&parent])
            .unwrap()
    }

    pub fn branch(&self, name: &str, at: Oid) {
        let commit = self.repo.find_commit(at).unwrap();
        self.repo.branch(name, &commit, false).unwrap();
    }

    fn ensure_origin(&self) {
        if self.repo.find_remote("origin").is_err() {
            self.repo
                .remote("origin", "https://example.invalid/upstream.git")
                .unwrap();
        }
    }

    /// Points `origin/<name>` at `remote_at` and makes local `name` track it.
    pub fn track(&self, name: &str, remote_at: Oid) {
        self.ensure_origin();
        self.repo
            .reference(
                &format!("refs/remotes/origin/{name}"),
                remote_at,
                true,
                "fixture: remote-tracking ref",
            )
            .unwrap();
        let mut branch = self.repo.find_branch(name, BranchType::Local).unwrap();
        branch
            .set_upstream(Some(&format!("origin/{name}")))
            .unwrap();
    }

    /// Makes local `name` track another local branch.
    pub fn track_local(&self, name: &str, upstream: &str) {
        let mut branch = self.repo.find_branch(name, BranchType::Local).unwrap();
        branch.set_upstream(Some(upstream)).unwrap();
    }

    /// Configures an upstream for `name` without any remote-tracking ref,
    /// like a branch whose remote was never fetched.
    pub fn track_unfetched(&self, name: &str) {
        self.ensure_origin();
        let mut config = self.repo.config().unwrap();
        config
            .set_str(&format!("branch.{name}.remote"), "origin")
            .unwrap();
        config
            .set_str(&format!("branch.{name}.merge"), &format!("refs/heads/{name}"))
            .unwrap();
    }

    /// Writes a loose branch ref pointing at an object that doesn't exist.
    pub fn corrupt_branch(&self, name: &str) {
        let ref_path = self.repo.path().join("refs").join("heads").join(name);
        fs::write(ref_path, "0123456789abcdef0123456789abcdef01234567\n").unwrap();
    }
}
