use std::io::{self, Write};

use crate::repo_status::RepositoryReport;

pub const EXIT_IN_SYNC: i32 = 0;
pub const EXIT_OUT_OF_SYNC: i32 = 1;
/// Repository could not be opened or listed, or the command line was invalid
pub const EXIT_FATAL: i32 = 2;

pub fn exit_code(report: &RepositoryReport) -> i32 {
    if report.passed() {
        EXIT_IN_SYNC
    } else {
        EXIT_OUT_OF_SYNC
    }
}

/// Writes one line per branch (or the single "is dead" line), flushes, and
/// returns the exit code the process should end with.
pub fn write_report<W: Write>(out: &mut W, report: &RepositoryReport) -> io::Result<i32> {
    let path = report.path().display();
    if report.is_dead() {
        writeln!(out, "repository {path} is dead")?;
    } else {
        for branch in report.branches() {
            writeln!(out, "{path}[{}]: {}", branch.name, branch.status)?;
        }
    }
    out.flush()?;
    Ok(exit_code(report))
}
