use std::io;
use std::process;

use anyhow::{Context, Result};

use branch_sync::config::Config;
use branch_sync::logger;
use branch_sync::repo_status::{evaluate, open_repository};
use branch_sync::report::{write_report, EXIT_FATAL};

fn main() {
    let config = Config::from_args();
    logger::init();

    let code = match run(&config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_FATAL
        }
    };
    process::exit(code);
}

fn run(config: &Config) -> Result<i32> {
    let repo = open_repository(&config.path)?;
    let report = evaluate(&repo)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report).context("failed to write report to stdout")
}
