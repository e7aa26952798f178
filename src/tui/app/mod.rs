//! Main TUI application model implementing the MVU pattern.
//!
//! This module holds the demo page state: the review being edited, the
//! latest analysis outcome, and the display toggles. Analysis runs on a
//! blocking worker so the terminal stays responsive while the model
//! predicts.
//!
//! # Module Structure
//!
//! - `rendering`: View rendering methods for terminal output

use std::any::Any;

use bubbletea_rs::{Cmd, Model};

use crate::analysis::{AnalysisOutcome, AnalysisPhase, analyze, needs_input};
use crate::error::AnalysisError;
use crate::model::ModelHandle;

use super::input::map_key_to_message;
use super::messages::AppMsg;
use super::state::ReviewInput;
use rendering::{clip_lines, line_count};

mod rendering;

/// Main application model for the review analyzer TUI.
#[derive(Debug)]
pub struct AnalyzerApp {
    /// Loaded model, absent only when the program was started without one.
    model: Option<ModelHandle>,
    /// Review text being edited.
    pub(crate) input: ReviewInput,
    /// Current step of the analysis flow.
    pub(crate) phase: AnalysisPhase,
    /// Outcome of the most recent analysis.
    pub(crate) outcome: Option<AnalysisOutcome>,
    /// Current error message, if any.
    pub(crate) error: Option<String>,
    /// Whether the raw model output is shown below the table.
    pub(crate) show_raw: bool,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    /// Terminal dimensions.
    width: u16,
    height: u16,
}

impl AnalyzerApp {
    /// Creates a new application backed by `model`.
    #[must_use]
    pub fn new(model: ModelHandle) -> Self {
        Self::with_optional_model(Some(model))
    }

    /// Creates an application without a model.
    ///
    /// Analyze requests report an error until a model is supplied.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_optional_model(None)
    }

    fn with_optional_model(model: Option<ModelHandle>) -> Self {
        Self {
            model,
            input: ReviewInput::default(),
            phase: AnalysisPhase::Idle,
            outcome: None,
            error: None,
            show_raw: false,
            show_help: false,
            width: 80,
            height: 24,
        }
    }

    /// Replaces the initial review text.
    #[must_use]
    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.input = ReviewInput::new(review);
        self
    }

    /// Current review text.
    #[must_use]
    pub const fn review(&self) -> &str {
        self.input.text()
    }

    /// Current analysis phase.
    #[must_use]
    pub const fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    /// Outcome of the most recent analysis, if any.
    #[must_use]
    pub const fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    /// Current error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns `true` while a prediction is in flight.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.phase == AnalysisPhase::Predicting
    }

    /// Handles a message and updates state accordingly.
    ///
    /// This is the core update function that processes all application
    /// messages and returns any commands to execute.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        // The review stays frozen while its prediction is in flight
        if msg.is_edit() && self.is_analyzing() {
            return None;
        }

        match msg {
            AppMsg::InsertChar(character) => {
                self.input.push_char(*character);
                None
            }
            AppMsg::Backspace => {
                self.input.backspace();
                None
            }
            AppMsg::ClearInput => {
                self.input.clear();
                None
            }
            AppMsg::AnalyzeRequested => self.handle_analyze_requested(),
            AppMsg::AnalysisFinished(result) => {
                self.handle_analysis_finished(result);
                None
            }
            AppMsg::ToggleRawOutput => {
                self.show_raw = !self.show_raw;
                None
            }
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                None
            }
        }
    }

    fn handle_analyze_requested(&mut self) -> Option<Cmd> {
        if self.is_analyzing() {
            return None;
        }

        let Some(model) = self.model.clone() else {
            self.error = Some("ABSA model is not loaded".to_owned());
            return None;
        };

        self.phase = AnalysisPhase::Validating;
        self.error = None;

        if needs_input(self.input.text()) {
            self.phase = AnalysisPhase::NeedsInput;
            self.outcome = Some(AnalysisOutcome::NeedsInput);
            return None;
        }

        self.phase = AnalysisPhase::Predicting;
        self.outcome = None;
        Some(spawn_analysis(model, self.input.text().to_owned()))
    }

    fn handle_analysis_finished(&mut self, result: &Result<AnalysisOutcome, AnalysisError>) {
        match result {
            Ok(outcome) => {
                self.phase = outcome.phase();
                self.outcome = Some(outcome.clone());
                self.error = None;
            }
            Err(error) => {
                self.phase = AnalysisPhase::Idle;
                self.outcome = None;
                self.error = Some(error.to_string());
            }
        }
    }
}

/// Runs the analysis on a blocking worker thread.
///
/// The model client performs blocking I/O, so it must not run on the async
/// executor driving the terminal program.
fn spawn_analysis(model: ModelHandle, review: String) -> Cmd {
    Box::pin(async move {
        let result =
            match tokio::task::spawn_blocking(move || analyze(&review, &model)).await {
                Ok(result) => result,
                Err(error) => Err(AnalysisError::Terminal {
                    message: format!("analysis task failed: {error}"),
                }),
            };

        Some(Box::new(AppMsg::AnalysisFinished(result)) as Box<dyn Any + Send>)
    })
}

impl Model for AnalyzerApp {
    fn init() -> (Self, Option<Cmd>) {
        // Retrieve the loaded model from module-level storage
        let model = match super::get_model_handle() {
            Some(handle) => Self::new(handle),
            None => Self::empty(),
        };
        (model, None)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        // Try to downcast to our message type
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        // Handle key events from bubbletea-rs
        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            // Any key dismisses the help overlay
            if self.show_help {
                self.show_help = false;
                return None;
            }
            if let Some(mapped) = map_key_to_message(key_msg) {
                return self.handle_message(&mapped);
            }
        }

        // Handle window size messages
        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        // If help is shown, render overlay instead
        if self.show_help {
            return self.render_help_overlay();
        }

        let header = self.render_header();
        let input = self.render_input();
        let status = self.render_status_bar();

        // Layout: header + blank + input + blank + results + blank + status bar
        let chrome_height = line_count(&header) + line_count(&input) + line_count(&status) + 3;
        let body_height = usize::from(self.height).saturating_sub(chrome_height);

        let mut output = String::new();

        output.push_str(&header);
        output.push('\n');
        output.push_str(&input);
        output.push('\n');
        output.push_str(&clip_lines(&self.render_results(), body_height));
        output.push('\n');
        output.push_str(&status);

        output
    }
}
