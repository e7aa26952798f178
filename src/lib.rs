//! Aspectra library crate providing aspect-based sentiment analysis of
//! product reviews.
//!
//! The library loads an aspect extractor once per process, sends reviews to
//! it, and turns the returned aspect/sentiment/confidence triples into
//! decorated display rows for the CLI and the terminal interface.

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod tui;

pub use analysis::{
    AnalysisOutcome, AnalysisPhase, DisplayRow, NEEDS_INPUT_MESSAGE, NO_ASPECTS_MESSAGE, analyze,
    render_raw_json, render_table,
};
pub use config::{AspectraConfig, OperationMode};
pub use error::AnalysisError;
pub use model::{
    AspectExtractor, AspectSentiment, HttpAspectExtractor, HttpExtractorConfig, LOADING_MESSAGE,
    LoadingNotice, ModelHandle, ModelLoader, PredictionRecord, PredictionRequest,
};
