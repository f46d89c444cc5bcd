//! Fatal errors. Anything that goes wrong with a single branch is folded
//! into that branch's status instead of ending up here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluationError {
    /// The path does not exist or is not a Git repository
    #[error("{} is not a usable repository", path.display())]
    InvalidRepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// The repository opened, but its references could not be listed
    #[error("unable to list branches of {}", path.display())]
    ListBranches {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
