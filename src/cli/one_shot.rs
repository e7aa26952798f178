//! One-shot mode: analyse a single review and print the results.

use std::io::{self, Write};

use aspectra::analysis::needs_input;
use aspectra::{
    AnalysisError, AnalysisOutcome, AspectraConfig, ModelHandle, ModelLoader, analyze,
    render_raw_json, render_table,
};

use super::output::{io_error, write_loading_notice};

/// Analyses the configured review and writes the table to stdout.
///
/// Blank reviews are reported without constructing the model.
///
/// # Errors
///
/// Returns an error if the review is missing, the model cannot be loaded,
/// the prediction fails, or stdout cannot be written.
pub fn run(config: &AspectraConfig) -> Result<(), AnalysisError> {
    let review = config.require_review()?;
    let mut stdout = io::stdout().lock();

    if needs_input(review) {
        return write_outcome(&mut stdout, &AnalysisOutcome::NeedsInput, false);
    }

    let loader = ModelLoader::http(config.extractor_config()?);
    let handle = loader.get_model(|notice| {
        write_loading_notice(&mut io::stderr().lock(), notice);
    })?;

    run_with_model(&mut stdout, review, &handle, config.raw)
}

/// Analyses `review` with an already loaded model and writes the outcome.
///
/// # Errors
///
/// Returns an error if the prediction fails or the writer fails.
pub fn run_with_model<W: Write>(
    writer: &mut W,
    review: &str,
    handle: &ModelHandle,
    raw: bool,
) -> Result<(), AnalysisError> {
    let outcome = analyze(review, handle)?;
    write_outcome(writer, &outcome, raw)
}

fn write_outcome<W: Write>(
    writer: &mut W,
    outcome: &AnalysisOutcome,
    raw: bool,
) -> Result<(), AnalysisError> {
    match outcome {
        AnalysisOutcome::Results { rows, record } => {
            write!(writer, "{}", render_table(rows)).map_err(|error| io_error(&error))?;
            if raw {
                writeln!(writer, "{}", render_raw_json(record)).map_err(|error| io_error(&error))?;
            }
        }
        AnalysisOutcome::NeedsInput | AnalysisOutcome::NoAspectsDetected { .. } => {
            if let Some(warning) = outcome.warning() {
                writeln!(writer, "Warning: {warning}").map_err(|error| io_error(&error))?;
            }
        }
    }
    Ok(())
}
