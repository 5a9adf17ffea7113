//! `fakery` command: run a fake data generator by name.
//!
//! This binary delegates to `fakery::cli` for command handling, keeping the
//! behaviour testable without spawning a process.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use fakery::cli::{CliArgs, init_tracing, run};
use fakery::{FakerySettings, Invoker, RandomSource, Registry};
use ortho_config::OrthoConfig;
use tracing::{info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let settings = match FakerySettings::load_from_iter([OsString::from("fakery")]) {
        Ok(settings) => settings,
        Err(err) => {
            write_line(io::stderr().lock(), &format!("failed to load settings: {err}"));
            return ExitCode::FAILURE;
        }
    };
    // No subscriber is installed on failure, so report it directly.
    if let Err(err) = init_tracing(settings.json_logs) {
        write_line(io::stderr().lock(), &err.to_string());
    }

    let seed = args.seed.unwrap_or_else(|| settings.seed());
    let registry = Registry::with_catalog();
    let random = RandomSource::from_seed(seed);
    info!(seed, function = %args.function, "starting fakery");

    match run(&args.to_command(), Invoker::new(&registry, &random)) {
        Ok(output) => {
            write_line(io::stdout().lock(), &output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!(error = %err, function = %args.function, "command failed");
            write_line(io::stderr().lock(), &err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn write_line(mut out: impl Write, message: &str) {
    if let Err(err) = writeln!(out, "{message}") {
        drop(err);
    }
}
