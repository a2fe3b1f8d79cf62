//! # dev_appserver_wrapper
//!
//! Wraps `dev_appserver.py` and replaces options with environment variables.
//!
//! - `APPENGINE_DEV_APPSERVER_BASE`: `dev_appserver.py` to launch; the first one
//!   on `PATH` is used when unset.
//! - `DEV_APPSERVER_API_PORT`: API port to launch with.
//!
//! Every other argument is passed to `dev_appserver.py` unchanged.

/// Entry point for the CLI tool.
fn main() {
    dev_appserver_wrapper::cli::run_cli();
}
