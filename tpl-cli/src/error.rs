//! Error types emitted by the `tplb` CLI.
//!
//! Keep this error type reasonably small, as every command returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::{io, sync::Arc};

use camino::Utf8PathBuf;
use thiserror::Error;
use tpl_data::LoadError;

/// Errors emitted by the `tplb` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Only one half of a coordinate pair was configured.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing value.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A configured coordinate is outside its valid range.
    #[error("{field} {value} is outside [{min}, {max}]")]
    CoordinateOutOfRange {
        /// Flag name of the offending value.
        field: &'static str,
        /// Value supplied.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// The data directory does not exist or is not a directory.
    #[error("data directory {path:?} does not exist or is not a directory")]
    MissingDataDir {
        /// Configured directory.
        path: Utf8PathBuf,
    },
    /// The data directory could not be inspected or opened.
    #[error("failed to open data directory {path:?}: {source}")]
    OpenDataDir {
        /// Configured directory.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A collection failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// No loaded branch has the requested code.
    #[error("no branch with code {code:?}")]
    UnknownBranch {
        /// Code requested on the command line.
        code: String,
    },
    /// The async runtime could not be started.
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] io::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[from] io::Error),
}
