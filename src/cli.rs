//! Command-line handling for the wrapper.
//!
//! The wrapper owns exactly one option of the wrapped server, `--api_port`, plus
//! its own `--help`. Those tokens are pulled out of the incoming arguments and
//! parsed with clap; every other token is handed to `dev_appserver.py` as is.

use crate::config::{LauncherConfig, is_all_digits, strip_leading_zeros};
use crate::{executor, logging};
use clap::Parser as ClapParser;
use std::ffi::OsString;
use tracing::{debug, warn};

const BIN_NAME: &str = "dev_appserver_wrapper";
const API_PORT_FLAG: &str = "--api_port";
const HELP_FLAG: &str = "--help";

/// Shortest accepted abbreviation of a long option, e.g. `--a` for `--api_port`.
const MIN_ABBREV_LEN: usize = 3;

/// Options the wrapper interprets itself.
#[derive(ClapParser, Debug)]
#[command(name = BIN_NAME)]
#[command(about = "Launch dev_appserver.py with options taken from the environment", long_about = None)]
#[command(disable_version_flag = true, args_override_self = true)]
#[command(after_help = "\
All other arguments are passed to dev_appserver.py unchanged.

Environment:
  APPENGINE_DEV_APPSERVER_BASE   dev_appserver.py to launch (default: first one on PATH)
  DEV_APPSERVER_API_PORT         overrides --api_port when it is all digits
  CLOUDSDK_PYTHON                interpreter used to run dev_appserver.py
  DEV_APPSERVER_WRAPPER_DRY_RUN  test hook: print the launch plan as JSON and exit
                                 without launching
  DEV_APPSERVER_WRAPPER_LOG      diagnostic log filter, e.g. `debug`")]
struct Cli {
    /// API port for dev_appserver.py
    #[arg(
        long = "api_port",
        value_name = "PORT",
        default_value = "0",
        value_parser = parse_port,
        allow_negative_numbers = true
    )]
    api_port: String,
}

/// Accept an optionally signed integer of any size and return it in
/// canonical decimal form (`+007` -> `7`, `-0` -> `0`).
fn parse_port(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    let (negative, digits) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else {
        (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
    };
    if !is_all_digits(digits) {
        return Err(format!("invalid integer value: '{value}'"));
    }

    let magnitude = strip_leading_zeros(digits);
    if negative && magnitude != "0" {
        Ok(format!("-{magnitude}"))
    } else {
        Ok(magnitude.to_string())
    }
}

/// Incoming arguments split into the wrapper's own and the pass-through ones.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitArgs {
    /// Recognized tokens, normalized to `--api_port=<value>` or `--help`.
    pub known: Vec<OsString>,
    /// Everything else, in original order.
    pub passthrough: Vec<OsString>,
}

enum Known {
    ApiPort(Option<String>),
    Help(Option<String>),
}

/// Match a token against the wrapper's options, accepting unambiguous
/// abbreviations of the long names.
fn classify(token: &str) -> Option<Known> {
    if let Some(rest) = token.strip_prefix("-h") {
        // `-hfoo` is `-h` with an argument, which help rejects.
        return Some(Known::Help((!rest.is_empty()).then(|| rest.to_string())));
    }
    if !token.starts_with("--") {
        return None;
    }

    let (name, value) = match token.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (token, None),
    };
    if name.len() < MIN_ABBREV_LEN {
        return None;
    }

    if API_PORT_FLAG.starts_with(name) {
        Some(Known::ApiPort(value))
    } else if HELP_FLAG.starts_with(name) {
        Some(Known::Help(value))
    } else {
        None
    }
}

fn with_value(flag: &str, value: Option<&str>) -> OsString {
    match value {
        Some(value) => format!("{flag}={value}").into(),
        None => flag.into(),
    }
}

/// Separate `--api_port` and `--help` tokens from the pass-through arguments.
///
/// `--api_port <value>` consumes the following token. A bare `--` ends
/// recognition; it and everything after it pass through.
pub fn split_known_args<I, S>(args: I) -> SplitArgs
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut split = SplitArgs::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        if arg == "--" {
            split.passthrough.push(arg);
            split.passthrough.extend(args.by_ref());
            break;
        }

        match arg.to_str().and_then(classify) {
            Some(Known::ApiPort(Some(value))) => {
                split.known.push(with_value(API_PORT_FLAG, Some(value.as_str())));
            }
            Some(Known::ApiPort(None)) => {
                let value = args.next().map(|v| v.to_string_lossy().into_owned());
                split.known.push(with_value(API_PORT_FLAG, value.as_deref()));
            }
            Some(Known::Help(value)) => {
                split.known.push(with_value(HELP_FLAG, value.as_deref()));
            }
            None => split.passthrough.push(arg),
        }
    }

    split
}

/// Build the argument list for `dev_appserver.py`.
///
/// The result is `--api_port=<value>` followed by the pass-through arguments.
/// A numeric `DEV_APPSERVER_API_PORT` wins over any `--api_port` on the
/// command line.
///
/// # Errors
///
/// Returns the clap error for a malformed `--api_port` value, or the help
/// "error" when `--help` was given. Callers normally hand it to
/// [`clap::Error::exit`].
pub fn build_arguments<I, S>(args: I, config: &LauncherConfig) -> Result<Vec<OsString>, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let SplitArgs { known, passthrough } = split_known_args(args);
    let cli = Cli::try_parse_from(std::iter::once(OsString::from(BIN_NAME)).chain(known))?;

    let api_port = match config.api_port_override() {
        Some(port) => {
            debug!(port = %port, parsed = %cli.api_port, "api port taken from environment");
            port
        }
        None => cli.api_port,
    };

    let mut arguments = Vec::with_capacity(passthrough.len() + 1);
    arguments.push(OsString::from(format!("{API_PORT_FLAG}={api_port}")));
    arguments.extend(passthrough);
    Ok(arguments)
}

/// Main CLI logic: build arguments, resolve the launch plan and hand off.
///
/// Returns only on a dry run. Any launch failure exits with status 1 and no
/// output unless diagnostic logging is enabled.
pub fn run_cli() {
    logging::init();

    let config = LauncherConfig::from_env();
    let arguments = build_arguments(std::env::args_os().skip(1), &config).unwrap_or_else(|e| e.exit());

    if let Err(e) = executor::execute(&config, arguments) {
        warn!(error = %e, "launch failed");
        crate::exit_failure();
    }
}
