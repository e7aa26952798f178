//! Error types surfaced while loading the model or analysing a review.

use thiserror::Error;

/// Errors surfaced while configuring, loading, or calling the ABSA model.
///
/// Empty input and reviews without aspects are not errors; they are
/// reported as [`crate::AnalysisOutcome`] variants instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The pretrained model could not be constructed.
    #[error("failed to load ABSA model: {message}")]
    ModelLoad {
        /// Details about the construction failure.
        message: String,
    },

    /// Networking failed while calling the inference runtime.
    #[error("network error talking to the inference runtime: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The inference runtime answered with a non-success status.
    #[error("inference runtime returned status {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// A result record was missing a field or had the wrong shape.
    #[error("malformed prediction record: {message}")]
    MalformedRecord {
        /// Description of the decoding failure.
        message: String,
    },

    /// The aspect, sentiment, and confidence sequences differ in length.
    #[error(
        "misaligned prediction record: {aspects} aspects, {sentiments} sentiments, \
         {confidences} confidences"
    )]
    MisalignedRecord {
        /// Length of the aspect sequence.
        aspects: usize,
        /// Length of the sentiment sequence.
        sentiments: usize,
        /// Length of the confidence sequence.
        confidences: usize,
    },

    /// The model returned a different number of records than texts sent.
    #[error("expected {expected} prediction record(s), received {received}")]
    UnexpectedRecordCount {
        /// Number of texts in the request batch.
        expected: usize,
        /// Number of records returned.
        received: usize,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The terminal interface failed to start or run.
    #[error("terminal UI error: {message}")]
    Terminal {
        /// Error detail reported by the TUI runtime.
        message: String,
    },
}
