//! Opt-in diagnostics on stderr.
//!
//! Nothing is installed unless `DEV_APPSERVER_WRAPPER_LOG` holds a filter, so a
//! failed launch stays silent by default.

use tracing_subscriber::EnvFilter;

/// Filter directives for the diagnostic log, in `EnvFilter` syntax.
pub const LOG_VAR: &str = "DEV_APPSERVER_WRAPPER_LOG";

/// Install the stderr subscriber if `DEV_APPSERVER_WRAPPER_LOG` is set.
pub fn init() {
    let Some(directives) = std::env::var(LOG_VAR).ok().filter(|v| !v.is_empty()) else {
        return;
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
