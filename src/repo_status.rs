use std::fmt;
use std::path::{Path, PathBuf};

use git2::{Branch, BranchType, ErrorCode, Repository};
use tracing::{debug, info, warn};

use crate::error::{EvaluationError, Result};

/// Where a local branch stands relative to the branch it tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchStatus {
    UpToDate,
    NoRemote,
    /// Local and upstream point at different commits. Ahead, behind and
    /// diverged all land here.
    OutOfDate,
    /// The branch itself could not be read. Carries git's message.
    Unreadable(String),
}

impl BranchStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, BranchStatus::OutOfDate | BranchStatus::Unreadable(_))
    }
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchStatus::UpToDate => f.write_str("up to date"),
            BranchStatus::NoRemote => f.write_str("no remote"),
            BranchStatus::OutOfDate => f.write_str("out of date"),
            BranchStatus::Unreadable(reason) => write!(f, "error: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchReport {
    pub name: String,
    pub status: BranchStatus,
}

/// Snapshot of every local branch in one repository.
///
/// A dead repository (no local branches at all) never carries branch
/// entries; `push` on a dead report is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReport {
    path: PathBuf,
    is_dead: bool,
    branches: Vec<BranchReport>,
}

impl RepositoryReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dead: false,
            branches: vec![],
        }
    }

    pub fn dead(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dead: true,
            branches: vec![],
        }
    }

    pub fn push(&mut self, name: impl Into<String>, status: BranchStatus) {
        if self.is_dead {
            return;
        }
        self.branches.push(BranchReport {
            name: name.into(),
            status,
        });
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Branches in the order the repository listed them.
    pub fn branches(&self) -> &[BranchReport] {
        &self.branches
    }

    pub fn status_of(&self, name: &str) -> Option<&BranchStatus> {
        self.branches
            .iter()
            .find(|branch| branch.name == name)
            .map(|branch| &branch.status)
    }

    /// A dead repository fails, as does any branch that is out of date or
    /// unreadable. Branches without a remote never fail the run.
    pub fn passed(&self) -> bool {
        !self.is_dead && !self.branches.iter().any(|b| b.status.is_failure())
    }
}

/// Opens the repository at exactly `path`. Parent directories are not searched.
pub fn open_repository(path: &Path) -> Result<Repository> {
    debug!(path = %path.display(), "opening repository");
    Repository::open(path).map_err(|source| EvaluationError::InvalidRepository {
        path: path.to_path_buf(),
        source,
    })
}

/// Compares every local branch against its upstream. Only local refs are
/// read, nothing is fetched.
pub fn evaluate(repo: &Repository) -> Result<RepositoryReport> {
    let path = report_path(repo);
    let list_err = |source: git2::Error| EvaluationError::ListBranches {
        path: path.clone(),
        source,
    };

    let mut branches = vec![];
    for entry in repo.branches(Some(BranchType::Local)).map_err(list_err)? {
        let (branch, _) = entry.map_err(list_err)?;
        branches.push(branch);
    }

    if branches.is_empty() {
        info!(path = %path.display(), "repository has no local branches");
        return Ok(RepositoryReport::dead(path));
    }

    let mut report = RepositoryReport::new(&path);
    for branch in &branches {
        let name = String::from_utf8_lossy(branch.get().shorthand_bytes()).into_owned();
        let status = match classify(branch) {
            Ok(status) => status,
            Err(e) => {
                warn!(branch = %name, "unable to read branch: {}", e.message());
                BranchStatus::Unreadable(e.message().to_string())
            }
        };
        debug!(branch = %name, %status, "evaluated branch");
        report.push(name, status);
    }

    info!(
        path = %path.display(),
        branches = report.branches().len(),
        passed = report.passed(),
        "evaluation finished"
    );
    Ok(report)
}

fn classify(branch: &Branch) -> std::result::Result<BranchStatus, git2::Error> {
    let local = branch.get().peel_to_commit()?.id();

    let upstream = match branch.upstream() {
        Ok(upstream) => upstream,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(BranchStatus::NoRemote),
        Err(e) => return Err(e),
    };

    // a tracking ref that doesn't resolve is treated the same as no tracking ref
    let remote = match upstream.get().peel_to_commit() {
        Ok(commit) => commit.id(),
        Err(_) => return Ok(BranchStatus::NoRemote),
    };

    if local == remote {
        Ok(BranchStatus::UpToDate)
    } else {
        Ok(BranchStatus::OutOfDate)
    }
}

fn report_path(repo: &Repository) -> PathBuf {
    // workdir() ends with a separator; components() drops it
    repo.workdir()
        .unwrap_or_else(|| repo.path())
        .components()
        .as_path()
        .to_path_buf()
}
