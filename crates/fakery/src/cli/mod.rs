//! Command-line front end.
//!
//! The `fakery` binary delegates to these functions so the command flow can
//! be exercised in tests without spawning a process.

mod error;

use std::io;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

pub use self::error::CliError;
use crate::invoker::Invoker;
use crate::registry::{Descriptor, Registry};

/// Keyword that lists the available functions.
const LIST_COMMAND: &str = "list";

/// `fakery` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fakery",
    about = "Generate deterministic fake data by function name",
    version
)]
pub struct CliArgs {
    /// Seed for the random source. Overrides `FAKERY_SEED`.
    #[arg(long, value_name = "n")]
    pub seed: Option<u64>,
    /// Function to run, `list`, or `json`.
    #[arg(value_name = "function")]
    pub function: String,
    /// Positional parameters for the function.
    #[arg(value_name = "params", trailing_var_arg = true, allow_hyphen_values = true)]
    pub params: Vec<String>,
}

impl CliArgs {
    /// Resolves the parsed arguments into a command.
    #[must_use]
    pub fn to_command(&self) -> Command {
        Command::parse(&self.function, &self.params)
    }
}

/// A resolved command-line request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List functions, optionally for one category.
    List {
        /// Category filter.
        category: Option<String>,
    },
    /// Call one registered function, `json` included.
    Call {
        /// Function name.
        function: String,
        /// Positional parameter tokens.
        tokens: Vec<String>,
    },
}

impl Command {
    /// Classifies a function name and its trailing tokens.
    ///
    /// # Example
    ///
    /// ```
    /// use fakery::cli::Command;
    ///
    /// let command = Command::parse("list", &["person".to_owned()]);
    ///
    /// assert_eq!(command, Command::List { category: Some("person".to_owned()) });
    /// ```
    #[must_use]
    pub fn parse(function: &str, tokens: &[String]) -> Self {
        match function {
            LIST_COMMAND => Self::List {
                category: tokens.first().cloned(),
            },
            _ => Self::Call {
                function: function.to_owned(),
                tokens: tokens.to_vec(),
            },
        }
    }
}

/// Runs a command and returns the text to print.
///
/// Called functions print strings raw, scalars via `Display` and structured
/// values as compact JSON.
///
/// # Errors
///
/// Returns [`CliError`] when the function or category is unknown or when
/// the call fails.
pub fn run(command: &Command, invoker: Invoker<'_>) -> Result<String, CliError> {
    match command {
        Command::List { category } => list_output(invoker.registry(), category.as_deref()),
        Command::Call { function, tokens } => {
            debug!(function = %function, tokens = tokens.len(), "running function");
            let value = invoker.call_positional(function, tokens)?;
            Ok(value.to_string())
        }
    }
}

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// Output is JSON when `json` is set; the filter comes from `RUST_LOG`.
///
/// # Errors
///
/// Returns [`CliError::Tracing`] when a global subscriber is already set.
pub fn init_tracing(json: bool) -> Result<(), CliError> {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|err| CliError::Tracing {
        message: err.to_string(),
    })
}

/// Renders the function listing.
///
/// Categories are sorted; each is followed by its functions sorted by name
/// and one indented line per parameter.
///
/// # Errors
///
/// Returns [`CliError::UnknownCategory`] when `category` matches nothing.
pub fn list_output(registry: &Registry, category: Option<&str>) -> Result<String, CliError> {
    let mut categories = registry.categories();
    categories.retain(|name| category.is_none_or(|wanted| *name == wanted));

    if let Some(wanted) = category.filter(|_| categories.is_empty()) {
        return Err(CliError::UnknownCategory {
            category: wanted.to_owned(),
        });
    }

    let mut out = String::new();
    for name in categories {
        out.push_str(name);
        out.push('\n');
        for descriptor in registry.list(Some(name)) {
            push_function(&mut out, descriptor);
        }
    }
    Ok(out.trim_end().to_owned())
}

fn push_function(out: &mut String, descriptor: &Descriptor) {
    out.push_str(&format!(
        "    {} - {}\n",
        descriptor.name(),
        descriptor.description()
    ));
    for param in descriptor.params() {
        out.push_str(&format!(
            "        Field Name: {} Type: {} Default: {} - {}\n",
            param.field(),
            param.kind(),
            param.default_value().unwrap_or_default(),
            param.description()
        ));
    }
}
