//! Display-ready projection of extracted aspects.

use crate::model::AspectSentiment;

/// Positive decoration.
pub const POSITIVE_LABEL: &str = "😄 Positive";
/// Negative decoration.
pub const NEGATIVE_LABEL: &str = "😞 Negative";
/// Decoration for neutral and unrecognised labels.
pub const NEUTRAL_LABEL: &str = "😐 Neutral";

/// One table row describing an extracted aspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Aspect text as extracted.
    pub aspect: String,
    /// Emoji-decorated sentiment label.
    pub sentiment: String,
    /// Confidence formatted as a percentage, e.g. `87.30%`.
    pub confidence: String,
}

impl From<&AspectSentiment> for DisplayRow {
    fn from(item: &AspectSentiment) -> Self {
        Self {
            aspect: item.aspect.clone(),
            sentiment: decorate_sentiment(item.sentiment.as_str()).to_owned(),
            confidence: format_confidence(item.confidence),
        }
    }
}

/// Maps a sentiment label to its decorated form.
///
/// Only the exact labels `Positive` and `Negative` are recognised; every
/// other label decorates as neutral.
#[must_use]
pub fn decorate_sentiment(label: &str) -> &'static str {
    match label {
        "Positive" => POSITIVE_LABEL,
        "Negative" => NEGATIVE_LABEL,
        _ => NEUTRAL_LABEL,
    }
}

/// Formats a `[0, 1]` score as a percentage with two decimals.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "percentage scaling of a model score"
)]
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}
