//! Interactive mode: terminal interface for analysing reviews.
//!
//! The model is loaded before the terminal switches to the alternate
//! screen, so the loading notice and any load failure are visible on
//! stderr.

use std::io::{self, Write};

use bubbletea_rs::Program;

use aspectra::tui::{AnalyzerApp, set_model_handle};
use aspectra::{AnalysisError, AspectraConfig, ModelLoader};

use super::output::write_loading_notice;

/// Loads the model and runs the analyzer TUI until the user quits.
///
/// # Errors
///
/// Returns an error if:
/// - The model settings are invalid
/// - The model cannot be constructed
/// - The TUI fails to initialise
pub fn run(config: &AspectraConfig) -> Result<(), AnalysisError> {
    let loader = ModelLoader::http(config.extractor_config()?);
    let handle = loader.get_model(|notice| {
        write_loading_notice(&mut io::stderr().lock(), notice);
    })?;

    // Store the handle for Model::init() to retrieve. If already set, the
    // existing handle remains.
    if !set_model_handle(handle) {
        tracing::debug!("model handle already stored; reusing it");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| AnalysisError::Terminal {
            message: format!("failed to start async runtime: {error}"),
        })?;

    runtime
        .block_on(run_tui())
        .map_err(|error| AnalysisError::Terminal {
            message: format!("TUI error: {error}"),
        })
}

/// Runs the bubbletea-rs program with the `AnalyzerApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // AnalyzerApp::init() will retrieve the model from module-level storage.
    let program = Program::<AnalyzerApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    // Ensure stdout is flushed
    io::stdout().flush().ok();

    Ok(())
}
