//! Process-wide, lazily constructed model handle.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use crate::error::AnalysisError;

use super::http::{HttpAspectExtractor, HttpExtractorConfig};
use super::{AspectExtractor, ModelHandle};

/// Notice shown to users while the model is being constructed.
pub const LOADING_MESSAGE: &str = "Loading ABSA model... This may take a moment on first run.";

/// Factory that constructs the extractor on first use.
pub type ModelFactory =
    Box<dyn Fn() -> Result<Arc<dyn AspectExtractor>, AnalysisError> + Send + Sync>;

/// Emitted once, immediately before construction starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingNotice {
    /// Checkpoint being loaded.
    pub checkpoint: String,
    /// User-facing message.
    pub message: &'static str,
}

/// Holder that constructs the model at most once per process.
///
/// Construction runs under a lock, so concurrent callers wait for the
/// first construction instead of starting their own. A failed
/// construction caches nothing and is returned to the caller unchanged.
pub struct ModelLoader {
    checkpoint: String,
    factory: ModelFactory,
    cached: Mutex<Option<ModelHandle>>,
}

impl std::fmt::Debug for ModelLoader {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ModelLoader")
            .field("checkpoint", &self.checkpoint)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

impl ModelLoader {
    /// Creates a loader around an arbitrary factory.
    #[must_use]
    pub fn new(checkpoint: impl Into<String>, factory: ModelFactory) -> Self {
        Self {
            checkpoint: checkpoint.into(),
            factory,
            cached: Mutex::new(None),
        }
    }

    /// Creates a loader that connects an [`HttpAspectExtractor`].
    #[must_use]
    pub fn http(config: HttpExtractorConfig) -> Self {
        let checkpoint = config.checkpoint.clone();
        Self::new(
            checkpoint,
            Box::new(move || {
                let extractor = HttpAspectExtractor::connect(&config)?;
                tracing::info!(device = extractor.device(), "inference runtime placed model");
                Ok(Arc::new(extractor) as Arc<dyn AspectExtractor>)
            }),
        )
    }

    /// Returns `true` once a handle has been cached.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns the cached handle, constructing it on the first call.
    ///
    /// `notify` runs only when construction is about to start.
    ///
    /// # Errors
    ///
    /// Returns the factory's [`AnalysisError`] when construction fails.
    pub fn get_model(
        &self,
        notify: impl FnOnce(&LoadingNotice),
    ) -> Result<ModelHandle, AnalysisError> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = cached.as_ref() {
            return Ok(handle.clone());
        }

        let notice = LoadingNotice {
            checkpoint: self.checkpoint.clone(),
            message: LOADING_MESSAGE,
        };
        tracing::info!(checkpoint = %self.checkpoint, "{LOADING_MESSAGE}");
        notify(&notice);

        let started = Instant::now();
        let extractor = (self.factory)().inspect_err(|error| {
            tracing::error!(checkpoint = %self.checkpoint, "model construction failed: {error}");
        })?;
        tracing::info!(
            checkpoint = %self.checkpoint,
            elapsed_ms = started.elapsed().as_millis(),
            "ABSA model loaded"
        );

        let handle = ModelHandle::from_shared(extractor);
        *cached = Some(handle.clone());
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::{LOADING_MESSAGE, ModelLoader};
    use crate::error::AnalysisError;
    use crate::model::{AspectExtractor, MockAspectExtractor};

    fn counting_loader(constructions: Arc<AtomicUsize>) -> ModelLoader {
        ModelLoader::new(
            "multilingual",
            Box::new(move || {
                constructions.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(MockAspectExtractor::new()) as Arc<dyn AspectExtractor>)
            }),
        )
    }

    #[test]
    fn first_call_notifies_and_later_calls_reuse_handle() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(Arc::clone(&constructions));
        let mut notices = Vec::new();

        let first = loader
            .get_model(|notice| notices.push(notice.clone()))
            .expect("first load should succeed");
        let second = loader
            .get_model(|notice| notices.push(notice.clone()))
            .expect("second load should succeed");

        assert!(first.ptr_eq(&second), "handles should be identical");
        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        assert_eq!(notices.len(), 1, "only construction should notify");
        assert_eq!(
            notices.first().map(|notice| notice.message),
            Some(LOADING_MESSAGE)
        );
        assert!(loader.is_loaded());
    }

    #[test]
    fn concurrent_callers_share_one_construction() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let loader = Arc::new(counting_loader(Arc::clone(&constructions)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&loader);
                thread::spawn(move || shared.get_model(|_| {}))
            })
            .collect();
        let loaded: Vec<_> = handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .expect("thread should not panic")
                    .expect("load should succeed")
            })
            .collect();

        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        let first = loaded.first().expect("at least one handle");
        assert!(loaded.iter().all(|handle| handle.ptr_eq(first)));
    }

    #[test]
    fn construction_failure_propagates_and_is_not_cached() {
        let loader = ModelLoader::new(
            "multilingual",
            Box::new(|| {
                Err(AnalysisError::ModelLoad {
                    message: "runtime unreachable".to_owned(),
                })
            }),
        );

        let error = loader
            .get_model(|_| {})
            .expect_err("failing factory should propagate");

        assert_eq!(
            error,
            AnalysisError::ModelLoad {
                message: "runtime unreachable".to_owned(),
            }
        );
        assert!(!loader.is_loaded());
    }
}
