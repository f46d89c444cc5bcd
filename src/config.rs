use std::ffi::OsString;
use std::path::PathBuf;

use clap::{arg, command, value_parser, ArgMatches, Command};

/// Everything a single run needs. There is no config file; the command
/// line is the whole configuration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Config {
    pub path: PathBuf,
}

impl Config {
    pub fn command() -> Command {
        command!()
            .about("Check that every local branch of a Git repository matches its upstream")
            .after_help(
                "Exit status is 0 when every branch is in sync, 1 when a branch is out of date \
                or the repository has no branches, 2 when the repository cannot be read.",
            )
            .arg(
                arg!(<path> "Path to the working directory of a Git repository")
                    .value_parser(value_parser!(PathBuf)),
            )
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let path = matches
            .get_one::<PathBuf>("path")
            .cloned()
            .expect("path is required");
        Self { path }
    }

    /// Parses the process arguments, exiting with a usage message on error.
    pub fn from_args() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}
