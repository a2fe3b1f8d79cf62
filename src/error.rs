//! Launch failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("dev_appserver.py not found in APPENGINE_DEV_APPSERVER_BASE or PATH")]
    DevAppserverNotFound,

    #[error("no python interpreter found in CLOUDSDK_PYTHON or PATH")]
    PythonNotFound,

    #[error("failed to exec {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
