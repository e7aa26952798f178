//! Terminal user interface for analysing reviews.
//!
//! This module provides the interactive demo page using the bubbletea-rs
//! framework: a review input, an Analyze action, and a results table.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::AnalyzerApp`]
//! - **View**: Rendering logic in `app::rendering`
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Initial Data Loading
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the loaded model handle is passed through module-level
//! storage. Call [`set_model_handle`] before starting the program, and
//! `AnalyzerApp::init()` will retrieve it.

use std::sync::OnceLock;

use crate::model::ModelHandle;

pub mod app;
pub mod input;
pub mod messages;
pub mod state;

pub use app::AnalyzerApp;

/// Global storage for the loaded model handle.
static MODEL_HANDLE: OnceLock<ModelHandle> = OnceLock::new();

/// Stores the model handle used by the TUI.
///
/// Returns `true` if the handle was stored, `false` if one was already set.
pub fn set_model_handle(handle: ModelHandle) -> bool {
    MODEL_HANDLE.set(handle).is_ok()
}

/// Returns a clone of the stored model handle, if any.
pub(crate) fn get_model_handle() -> Option<ModelHandle> {
    MODEL_HANDLE.get().cloned()
}
