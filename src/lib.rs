pub mod config;
pub mod error;
pub mod logger;
pub mod repo_status;
pub mod report;
