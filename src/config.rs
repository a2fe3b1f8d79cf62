//! Environment snapshot and executable discovery.
//!
//! Every variable the launcher looks at is read once into a [`LauncherConfig`].
//! Discovery and argument building only ever see that snapshot, never the live
//! process environment.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the `dev_appserver.py` lookup when set and non-empty.
pub const DEV_APPSERVER_BASE_VAR: &str = "APPENGINE_DEV_APPSERVER_BASE";
/// Overrides `--api_port` when it consists only of decimal digits.
pub const API_PORT_VAR: &str = "DEV_APPSERVER_API_PORT";
/// Search path for `dev_appserver.py` and the interpreter.
pub const PATH_VAR: &str = "PATH";
/// Interpreter override, same variable the Cloud SDK honors.
pub const PYTHON_VAR: &str = "CLOUDSDK_PYTHON";
/// Test hook: print the launch plan as JSON and exit 0 instead of launching.
pub const DRY_RUN_VAR: &str = "DEV_APPSERVER_WRAPPER_DRY_RUN";

/// File looked up in each `PATH` directory.
pub const DEV_APPSERVER_FILE: &str = "dev_appserver.py";

/// Interpreter names tried on `PATH`, in order.
const PYTHON_CANDIDATES: [&str; 3] = ["python2", "python", "python3"];

/// Snapshot of the environment variables the launcher recognizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherConfig {
    pub dev_appserver_base: Option<OsString>,
    pub api_port: Option<OsString>,
    pub path: Option<OsString>,
    pub python: Option<OsString>,
    pub dry_run: bool,
}

impl LauncherConfig {
    /// Read the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build a config from explicit `(name, value)` pairs. Unknown names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: Into<OsString>,
    {
        let mut config = Self::default();
        for (name, value) in vars {
            let Some(name) = name.as_ref().to_str() else {
                continue;
            };
            let value: OsString = value.into();
            match name {
                DEV_APPSERVER_BASE_VAR => config.dev_appserver_base = Some(value),
                API_PORT_VAR => config.api_port = Some(value),
                PATH_VAR => config.path = Some(value),
                PYTHON_VAR => config.python = Some(value),
                DRY_RUN_VAR => config.dry_run = is_truthy(&value),
                _ => {}
            }
        }
        config
    }

    /// Decimal value of `DEV_APPSERVER_API_PORT`, if it is usable.
    ///
    /// Only a non-empty run of ASCII digits counts; anything else is ignored.
    /// The value has no size limit and comes back without leading zeroes.
    #[must_use]
    pub fn api_port_override(&self) -> Option<String> {
        let raw = self.api_port.as_ref()?;
        let Some(digits) = raw.to_str().filter(|s| is_all_digits(s)) else {
            debug!(value = ?raw, "ignoring non-numeric {API_PORT_VAR}");
            return None;
        };
        Some(strip_leading_zeros(digits).to_string())
    }

    /// Locate `dev_appserver.py`.
    ///
    /// A non-empty `APPENGINE_DEV_APPSERVER_BASE` is returned verbatim without
    /// touching the filesystem. Otherwise the first `PATH` directory holding a
    /// `dev_appserver.py` entry wins.
    #[must_use]
    pub fn find_dev_appserver(&self) -> Option<PathBuf> {
        if let Some(base) = non_empty(self.dev_appserver_base.as_ref()) {
            debug!(path = ?base, "using {DEV_APPSERVER_BASE_VAR}");
            return Some(PathBuf::from(base));
        }

        let search_path = self.path.as_ref()?;
        for dir in std::env::split_paths(search_path) {
            let candidate = dir.join(DEV_APPSERVER_FILE);
            if candidate.exists() {
                debug!(path = %candidate.display(), "found {DEV_APPSERVER_FILE}");
                return Some(candidate);
            }
            debug!(dir = %dir.display(), "no {DEV_APPSERVER_FILE}");
        }
        None
    }

    /// Locate the Python interpreter that runs `dev_appserver.py`.
    #[must_use]
    pub fn find_python(&self) -> Option<PathBuf> {
        if let Some(python) = non_empty(self.python.as_ref()) {
            debug!(python = ?python, "using {PYTHON_VAR}");
            return Some(PathBuf::from(python));
        }

        let search_path = self.path.as_ref()?;
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        PYTHON_CANDIDATES
            .iter()
            .find_map(|name| which_in_path(name, search_path, &cwd))
    }
}

fn which_in_path(name: &str, search_path: &OsStr, cwd: &Path) -> Option<PathBuf> {
    match which::which_in(name, Some(search_path), cwd) {
        Ok(found) => {
            debug!(python = %found.display(), "found interpreter");
            Some(found)
        }
        Err(e) => {
            debug!(candidate = name, error = %e, "interpreter candidate not found");
            None
        }
    }
}

fn non_empty(value: Option<&OsString>) -> Option<&OsString> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `"0080"` -> `"80"`, `"000"` -> `"0"`.
pub(crate) fn strip_leading_zeros(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        rest => rest,
    }
}

fn is_truthy(value: &OsStr) -> bool {
    !matches!(value.to_str(), Some("" | "0" | "false"))
}
