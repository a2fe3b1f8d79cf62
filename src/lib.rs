//! # dev_appserver_wrapper
//!
//! Launches the App Engine `dev_appserver.py`, taking its location and
//! `--api_port` from environment variables, and replaces the current process
//! with it.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;

/// Exit with status 1 without printing anything.
pub fn exit_failure() -> ! {
    std::process::exit(1);
}
