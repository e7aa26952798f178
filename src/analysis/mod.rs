//! Review analysis: validation, one prediction call, and projection into
//! display rows.

use std::fmt;

use crate::error::AnalysisError;
use crate::model::{ModelHandle, PredictionRecord, PredictionRequest};

pub mod display;
pub mod table;

pub use display::{DisplayRow, decorate_sentiment, format_confidence};
pub use table::{render_raw_json, render_table};

/// Warning shown when no review text was supplied.
pub const NEEDS_INPUT_MESSAGE: &str = "Please enter a review to analyze.";
/// Warning shown when the model found no aspects.
pub const NO_ASPECTS_MESSAGE: &str = "No specific aspects were detected in this review.";

/// Stages of a single analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    /// No request in progress.
    #[default]
    Idle,
    /// Checking the review text.
    Validating,
    /// The review was empty after trimming.
    NeedsInput,
    /// Waiting for the model.
    Predicting,
    /// The model found no aspects.
    NoAspectsDetected,
    /// Rows are available.
    Results,
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::NeedsInput => "needs input",
            Self::Predicting => "predicting",
            Self::NoAspectsDetected => "no aspects detected",
            Self::Results => "results",
        };
        formatter.write_str(label)
    }
}

/// Final state of one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The review was empty or whitespace; the model was not called.
    NeedsInput,
    /// The model returned a record without aspects.
    NoAspectsDetected {
        /// Record returned by the model.
        record: PredictionRecord,
    },
    /// The model extracted at least one aspect.
    Results {
        /// One row per aspect, in model order.
        rows: Vec<DisplayRow>,
        /// Record returned by the model.
        record: PredictionRecord,
    },
}

impl AnalysisOutcome {
    /// Terminal phase that corresponds to this outcome.
    #[must_use]
    pub const fn phase(&self) -> AnalysisPhase {
        match self {
            Self::NeedsInput => AnalysisPhase::NeedsInput,
            Self::NoAspectsDetected { .. } => AnalysisPhase::NoAspectsDetected,
            Self::Results { .. } => AnalysisPhase::Results,
        }
    }

    /// Display rows; empty unless the outcome is [`Self::Results`].
    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        match self {
            Self::Results { rows, .. } => rows,
            Self::NeedsInput | Self::NoAspectsDetected { .. } => &[],
        }
    }

    /// Inline warning for the non-result outcomes.
    #[must_use]
    pub const fn warning(&self) -> Option<&'static str> {
        match self {
            Self::NeedsInput => Some(NEEDS_INPUT_MESSAGE),
            Self::NoAspectsDetected { .. } => Some(NO_ASPECTS_MESSAGE),
            Self::Results { .. } => None,
        }
    }
}

/// Returns `true` when `review` is empty after trimming whitespace.
#[must_use]
pub fn needs_input(review: &str) -> bool {
    review.trim().is_empty()
}

/// Analyses one review with the given model.
///
/// Empty input short-circuits without calling the model. Otherwise the
/// review is submitted unchanged as a batch of one text with result
/// persistence and printing disabled.
///
/// # Errors
///
/// Propagates any [`AnalysisError`] raised by the model unchanged, and
/// returns [`AnalysisError::UnexpectedRecordCount`] when the model does not
/// return exactly one record.
pub fn analyze(review: &str, model: &ModelHandle) -> Result<AnalysisOutcome, AnalysisError> {
    tracing::debug!(phase = %AnalysisPhase::Validating, "analysis started");
    if needs_input(review) {
        tracing::debug!(phase = %AnalysisPhase::NeedsInput, "analysis finished");
        return Ok(AnalysisOutcome::NeedsInput);
    }

    tracing::debug!(phase = %AnalysisPhase::Predicting, chars = review.chars().count());
    let request = PredictionRequest::single(review);
    let records = model
        .extractor()
        .predict(&request)
        .inspect_err(|error| tracing::warn!("prediction failed: {error}"))?;

    let received = records.len();
    let mut records = records.into_iter();
    let (Some(record), None) = (records.next(), records.next()) else {
        return Err(AnalysisError::UnexpectedRecordCount {
            expected: request.texts().len(),
            received,
        });
    };

    let outcome = if record.is_empty() {
        AnalysisOutcome::NoAspectsDetected { record }
    } else {
        let rows = record.aspects().iter().map(DisplayRow::from).collect();
        AnalysisOutcome::Results { rows, record }
    };
    tracing::debug!(
        phase = %outcome.phase(),
        aspects = outcome.rows().len(),
        "analysis finished"
    );
    Ok(outcome)
}
