//! Test-support utilities for code that consumes an [`AspectExtractor`].

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::AnalysisError;

use super::{AspectExtractor, AspectSentiment, PredictionRecord, PredictionRequest};

/// Deterministic extractor stub that records every request it receives.
#[derive(Debug, Clone)]
pub struct StubAspectExtractor {
    response: Result<Vec<PredictionRecord>, AnalysisError>,
    requests: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl StubAspectExtractor {
    /// Creates a stub that answers every request with one record built
    /// from `aspects`.
    #[must_use]
    pub fn with_aspects(aspects: Vec<AspectSentiment>) -> Self {
        Self::with_records(vec![PredictionRecord::from_triples(aspects)])
    }

    /// Creates a stub that answers every request with `records`.
    #[must_use]
    pub fn with_records(records: Vec<PredictionRecord>) -> Self {
        Self {
            response: Ok(records),
            requests: Arc::default(),
        }
    }

    /// Creates a stub that always fails with `error`.
    #[must_use]
    pub fn failure(error: AnalysisError) -> Self {
        Self {
            response: Err(error),
            requests: Arc::default(),
        }
    }

    /// Requests received so far, shared across clones.
    #[must_use]
    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AspectExtractor for StubAspectExtractor {
    fn predict(&self, request: &PredictionRequest) -> Result<Vec<PredictionRecord>, AnalysisError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.response.clone()
    }
}
