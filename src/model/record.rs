//! Typed view of one prediction result returned by the model.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AnalysisError;

/// One extracted aspect with its sentiment and confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectSentiment {
    /// Text span naming the aspect, e.g. `battery life`.
    pub aspect: String,
    /// Sentiment label reported by the model.
    pub sentiment: String,
    /// Probability-like score in `[0, 1]`.
    pub confidence: f64,
}

impl AspectSentiment {
    /// Builds a triple from its parts.
    #[must_use]
    pub fn new(aspect: impl Into<String>, sentiment: impl Into<String>, confidence: f64) -> Self {
        Self {
            aspect: aspect.into(),
            sentiment: sentiment.into(),
            confidence,
        }
    }
}

/// Validated result record for a single review.
///
/// The aspect, sentiment, and confidence sequences of the raw document are
/// zipped into [`AspectSentiment`] triples, so index alignment holds by
/// construction. The raw document is kept verbatim for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    aspects: Vec<AspectSentiment>,
    raw: Value,
}

#[derive(Debug, Deserialize)]
struct RecordFields {
    aspect: Vec<String>,
    sentiment: Vec<String>,
    confidence: Vec<f64>,
}

impl PredictionRecord {
    /// Decodes a raw key-value record returned by the runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MalformedRecord`] when a field is missing,
    /// has the wrong type, or a confidence lies outside `[0, 1]`, and
    /// [`AnalysisError::MisalignedRecord`] when the sequences differ in
    /// length.
    pub fn from_value(raw: Value) -> Result<Self, AnalysisError> {
        let fields =
            RecordFields::deserialize(&raw).map_err(|error| AnalysisError::MalformedRecord {
                message: error.to_string(),
            })?;

        let aligned = fields.aspect.len() == fields.sentiment.len()
            && fields.aspect.len() == fields.confidence.len();
        if !aligned {
            return Err(AnalysisError::MisalignedRecord {
                aspects: fields.aspect.len(),
                sentiments: fields.sentiment.len(),
                confidences: fields.confidence.len(),
            });
        }

        if let Some(invalid) = fields
            .confidence
            .iter()
            .find(|confidence| !(0.0..=1.0).contains(*confidence))
        {
            return Err(AnalysisError::MalformedRecord {
                message: format!("confidence {invalid} is outside [0, 1]"),
            });
        }

        let aspects = fields
            .aspect
            .into_iter()
            .zip(fields.sentiment)
            .zip(fields.confidence)
            .map(|((aspect, sentiment), confidence)| AspectSentiment {
                aspect,
                sentiment,
                confidence,
            })
            .collect();

        Ok(Self { aspects, raw })
    }

    /// Builds a record from triples, synthesising the raw document.
    #[must_use]
    pub fn from_triples(aspects: Vec<AspectSentiment>) -> Self {
        let raw = json!({
            "aspect": aspects.iter().map(|item| item.aspect.as_str()).collect::<Vec<_>>(),
            "sentiment": aspects.iter().map(|item| item.sentiment.as_str()).collect::<Vec<_>>(),
            "confidence": aspects.iter().map(|item| item.confidence).collect::<Vec<_>>(),
        });
        Self { aspects, raw }
    }

    /// Extracted triples in model order.
    #[must_use]
    pub fn aspects(&self) -> &[AspectSentiment] {
        &self.aspects
    }

    /// Returns `true` when the model found no aspects.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }

    /// Raw document as returned by the runtime.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{AspectSentiment, PredictionRecord};
    use crate::error::AnalysisError;

    #[test]
    fn decodes_aligned_sequences_and_keeps_extra_keys() {
        let raw = json!({
            "sentence": "The battery life is amazing, but the camera is a bit disappointing.",
            "aspect": ["battery life", "camera"],
            "sentiment": ["Positive", "Negative"],
            "confidence": [0.98, 0.87],
            "position": [[1, 2], [7]]
        });

        let record = PredictionRecord::from_value(raw.clone()).expect("record should decode");

        assert_eq!(
            record.aspects(),
            [
                AspectSentiment::new("battery life", "Positive", 0.98),
                AspectSentiment::new("camera", "Negative", 0.87),
            ]
        );
        assert_eq!(record.raw(), &raw);
    }

    #[test]
    fn decodes_empty_sequences() {
        let record = PredictionRecord::from_value(json!({
            "aspect": [],
            "sentiment": [],
            "confidence": []
        }))
        .expect("empty record should decode");

        assert!(record.is_empty());
    }

    #[rstest]
    #[case::missing_confidence(json!({"aspect": ["screen"], "sentiment": ["Positive"]}))]
    #[case::aspect_not_a_list(json!({"aspect": "screen", "sentiment": ["Positive"], "confidence": [0.5]}))]
    #[case::confidence_not_numeric(json!({"aspect": ["screen"], "sentiment": ["Positive"], "confidence": ["high"]}))]
    #[case::confidence_above_one(json!({"aspect": ["screen"], "sentiment": ["Positive"], "confidence": [1.5]}))]
    #[case::confidence_negative(json!({"aspect": ["screen"], "sentiment": ["Positive"], "confidence": [-0.1]}))]
    #[case::not_an_object(json!(["screen"]))]
    fn rejects_malformed_records(#[case] raw: Value) {
        let error = PredictionRecord::from_value(raw).expect_err("record should be rejected");

        assert!(
            matches!(error, AnalysisError::MalformedRecord { .. }),
            "expected MalformedRecord, got {error:?}"
        );
    }

    #[test]
    fn rejects_misaligned_sequences_instead_of_truncating() {
        let error = PredictionRecord::from_value(json!({
            "aspect": ["battery life", "camera"],
            "sentiment": ["Positive"],
            "confidence": [0.9, 0.8]
        }))
        .expect_err("misaligned record should be rejected");

        assert_eq!(
            error,
            AnalysisError::MisalignedRecord {
                aspects: 2,
                sentiments: 1,
                confidences: 2,
            }
        );
    }

    #[test]
    fn from_triples_synthesises_raw_document() {
        let record = PredictionRecord::from_triples(vec![AspectSentiment::new(
            "keyboard", "Neutral", 0.5,
        )]);

        assert_eq!(
            record.raw(),
            &json!({"aspect": ["keyboard"], "sentiment": ["Neutral"], "confidence": [0.5]})
        );
    }
}
