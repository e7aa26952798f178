//! Message types for the TUI update loop.
//!
//! Messages represent user actions, async command results, and system
//! events.

use crate::analysis::AnalysisOutcome;
use crate::error::AnalysisError;

/// Messages for the analyzer TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Review editing
    /// Append a character to the review.
    InsertChar(char),
    /// Delete the last character of the review.
    Backspace,
    /// Clear the review text.
    ClearInput,

    // Analysis
    /// Run the analysis for the current review.
    AnalyzeRequested,
    /// The analysis command finished.
    AnalysisFinished(Result<AnalysisOutcome, AnalysisError>),

    // Application lifecycle
    /// Show or hide the raw model output.
    ToggleRawOutput,
    /// Toggle help overlay.
    ToggleHelp,
    /// Quit the application.
    Quit,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns `true` for messages that edit the review text.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self, Self::InsertChar(_) | Self::Backspace | Self::ClearInput)
    }
}
