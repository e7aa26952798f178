//! Aspectra CLI entrypoint for review sentiment analysis.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use aspectra::logging::{self, ConsoleOutput};
use aspectra::{AnalysisError, AspectraConfig, OperationMode};
use ortho_config::OrthoConfig;

mod cli;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AnalysisError> {
    let config = load_config()?;

    let mode = config.operation_mode();
    logging::init(
        config.log_file.as_deref().map(Path::new),
        ConsoleOutput::for_mode(mode),
    )
    .map_err(|error| AnalysisError::Configuration {
        message: error.to_string(),
    })?;

    match mode {
        OperationMode::OneShot => cli::one_shot::run(&config),
        OperationMode::Interactive => cli::interactive::run(&config),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`AnalysisError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<AspectraConfig, AnalysisError> {
    AspectraConfig::load().map_err(|error| AnalysisError::Configuration {
        message: error.to_string(),
    })
}
