//! Launch plan construction and the process hand-off.

use crate::config::LauncherConfig;
use crate::error::LaunchError;
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// The interpreter and the argument vector that replace the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Interpreter, also used as `argv[0]`.
    pub program: PathBuf,
    /// `dev_appserver.py` followed by the built arguments.
    pub args: Vec<OsString>,
}

/// JSON view of a plan, printed on a dry run.
#[derive(Debug, Serialize)]
struct PlanSummary {
    program: String,
    args: Vec<String>,
}

impl LaunchPlan {
    #[must_use]
    pub fn new(program: PathBuf, target: PathBuf, arguments: Vec<OsString>) -> Self {
        let mut args = Vec::with_capacity(arguments.len() + 1);
        args.push(target.into_os_string());
        args.extend(arguments);
        Self { program, args }
    }

    /// Resolve `dev_appserver.py` and the interpreter for `arguments`.
    ///
    /// # Errors
    ///
    /// [`LaunchError::DevAppserverNotFound`] or [`LaunchError::PythonNotFound`].
    pub fn resolve(config: &LauncherConfig, arguments: Vec<OsString>) -> Result<Self, LaunchError> {
        let target = config
            .find_dev_appserver()
            .ok_or(LaunchError::DevAppserverNotFound)?;
        let program = config.find_python().ok_or(LaunchError::PythonNotFound)?;
        Ok(Self::new(program, target, arguments))
    }

    /// Command with inherited environment and standard streams.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Pretty JSON of the plan. Non UTF-8 parts are converted lossily.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures.
    pub fn to_json(&self) -> Result<String, LaunchError> {
        let summary = PlanSummary {
            program: self.program.to_string_lossy().into_owned(),
            args: self
                .args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }
}

/// Replace the current process with `plan`.
///
/// Only returns if the hand-off failed.
#[cfg(unix)]
pub fn launch(plan: &LaunchPlan) -> LaunchError {
    use std::os::unix::process::CommandExt;

    debug!(program = %plan.program.display(), args = ?plan.args, "exec");
    let source = plan.command().exec();
    LaunchError::Exec {
        program: plan.program.display().to_string(),
        source,
    }
}

/// Run `plan` to completion and exit with its status, standing in for exec.
///
/// Only returns if the child could not be started.
#[cfg(not(unix))]
pub fn launch(plan: &LaunchPlan) -> LaunchError {
    debug!(program = %plan.program.display(), args = ?plan.args, "spawn");
    match plan.command().status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => LaunchError::Exec {
            program: plan.program.display().to_string(),
            source,
        },
    }
}

/// Resolve the plan for `arguments`, then print it (dry run) or launch it.
///
/// # Errors
///
/// Any resolution failure, or the launch failure itself. Does not return
/// after a successful launch.
pub fn execute(config: &LauncherConfig, arguments: Vec<OsString>) -> Result<(), LaunchError> {
    let plan = LaunchPlan::resolve(config, arguments)?;

    if config.dry_run {
        println!("{}", plan.to_json()?);
        return Ok(());
    }

    Err(launch(&plan))
}
