//! Boundary to the pretrained aspect-extraction model.
//!
//! The model itself runs in an external inference runtime. This module
//! defines the [`AspectExtractor`] seam, the request sent to it, the
//! validated [`PredictionRecord`] it returns, and the process-wide
//! [`ModelLoader`] that constructs the extractor once.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::AnalysisError;

mod device;
mod http;
mod loader;
mod record;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use device::{DeviceSelection, DeviceSelectionParseError};
pub use http::{HttpAspectExtractor, HttpExtractorConfig};
pub use loader::{LOADING_MESSAGE, LoadingNotice, ModelFactory, ModelLoader};
pub use record::{AspectSentiment, PredictionRecord};

/// Batch submitted to the model's prediction entrypoint.
///
/// `save_result` and `print_result` are controls of the underlying
/// library. Requests built by this crate always switch both off so the
/// runtime performs no side-channel writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    texts: Vec<String>,
    save_result: bool,
    print_result: bool,
}

impl PredictionRequest {
    /// Builds a batch holding exactly one text with persistence and
    /// printing disabled.
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
            save_result: false,
            print_result: false,
        }
    }

    /// Texts in submission order.
    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Whether the runtime may persist results.
    #[must_use]
    pub const fn save_result(&self) -> bool {
        self.save_result
    }

    /// Whether the runtime may print results.
    #[must_use]
    pub const fn print_result(&self) -> bool {
        self.print_result
    }
}

/// Prediction contract implemented by every model backend.
#[cfg_attr(test, mockall::automock)]
pub trait AspectExtractor: Send + Sync + fmt::Debug {
    /// Runs aspect extraction and sentiment classification for a batch.
    ///
    /// Implementations return one decoded record per input text, in order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] when the runtime call fails or a record
    /// cannot be decoded.
    fn predict(&self, request: &PredictionRequest) -> Result<Vec<PredictionRecord>, AnalysisError>;
}

/// Shared, read-only handle to a constructed extractor.
///
/// Clones refer to the same extractor; inference never mutates it.
#[derive(Debug, Clone)]
pub struct ModelHandle(Arc<dyn AspectExtractor>);

impl ModelHandle {
    /// Wraps an extractor in a new handle.
    #[must_use]
    pub fn new(extractor: impl AspectExtractor + 'static) -> Self {
        Self(Arc::new(extractor))
    }

    /// Wraps an already shared extractor.
    #[must_use]
    pub const fn from_shared(extractor: Arc<dyn AspectExtractor>) -> Self {
        Self(extractor)
    }

    /// Returns the underlying extractor.
    #[must_use]
    pub fn extractor(&self) -> &dyn AspectExtractor {
        self.0.as_ref()
    }

    /// Returns `true` when both handles point at the same extractor.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}
