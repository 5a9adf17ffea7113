//! Error types for the `fakery` command line.

use thiserror::Error;

use crate::error::InvokeError;

/// Errors surfaced by the command-line flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The requested function is not registered.
    #[error(
        "Could not find function to run\nRun fakery --help or fakery list for available functions"
    )]
    UnknownFunction {
        /// Name that was not found.
        name: String,
    },
    /// `list` was given a category with no functions.
    #[error("unknown category '{category}'")]
    UnknownCategory {
        /// Category that was requested.
        category: String,
    },
    /// A registered function could not run.
    #[error(transparent)]
    Invoke(InvokeError),
    /// The `tracing` subscriber could not be installed.
    #[error("failed to initialise tracing: {message}")]
    Tracing {
        /// Description of the failure.
        message: String,
    },
}

impl From<InvokeError> for CliError {
    fn from(error: InvokeError) -> Self {
        match error {
            InvokeError::NotFound(lookup) => Self::UnknownFunction { name: lookup.name },
            other => Self::Invoke(other),
        }
    }
}
