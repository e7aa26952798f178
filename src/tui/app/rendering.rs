//! Rendering logic for the analyzer TUI application.
//!
//! This module contains the view rendering methods that produce string output
//! for display in the terminal. These are pure query methods that read state
//! without modification.

use unicode_width::UnicodeWidthStr;

use super::AnalyzerApp;
use crate::analysis::{AnalysisOutcome, render_raw_json, render_table};

/// Page title shown in the header.
pub(crate) const TITLE: &str = "Aspect-Based Sentiment Analysis for E-commerce";

/// Notice shown while a prediction is in flight.
pub(crate) const ANALYZING_MESSAGE: &str = "Analyzing aspect sentiments...";

const INTRO: &str = "This app analyzes customer reviews to identify sentiments \
(Positive, Negative, Neutral) for specific product aspects (like 'battery life' \
or 'camera quality').";

const RAW_OUTPUT_HEADING: &str = "Show Raw Model Output (JSON)";

/// Hint shown in place of an empty review.
pub(crate) const INPUT_PLACEHOLDER: &str =
    "e.g., The screen is great but the battery dies quickly.";

impl AnalyzerApp {
    /// Renders the header with the title and a progress indicator.
    pub(super) fn render_header(&self) -> String {
        let analyzing = if self.is_analyzing() {
            format!(" [{ANALYZING_MESSAGE}]")
        } else {
            String::new()
        };
        let mut header = format!("{TITLE}{analyzing}\n");
        header.push_str(&wrap_text(INTRO, self.content_width()));
        header
    }

    /// Renders the review input area.
    pub(super) fn render_input(&self) -> String {
        let mut output = String::from("Analyze a Review\nEnter your review:\n");
        let line = if self.input.text().is_empty() {
            format!("> _ {INPUT_PLACEHOLDER}")
        } else {
            format!("> {}_", self.input.text())
        };
        output.push_str(&wrap_text(&line, self.content_width()));
        output
    }

    /// Renders the results of the last analysis.
    pub(super) fn render_results(&self) -> String {
        let Some(outcome) = &self.outcome else {
            return String::new();
        };

        let mut output = String::new();
        match outcome {
            AnalysisOutcome::NeedsInput | AnalysisOutcome::NoAspectsDetected { .. } => {
                if let Some(warning) = outcome.warning() {
                    output.push_str(&format!("Warning: {warning}\n"));
                }
            }
            AnalysisOutcome::Results { rows, record } => {
                output.push_str("Analysis Results:\n");
                output.push_str(&render_table(rows));
                output.push('\n');
                if self.show_raw {
                    output.push_str(&format!("{RAW_OUTPUT_HEADING}:\n"));
                    output.push_str(&render_raw_json(record));
                    output.push('\n');
                } else {
                    output.push_str(&format!("[Tab] {RAW_OUTPUT_HEADING}\n"));
                }
            }
        }
        output
    }

    /// Renders the status bar with help hints.
    pub(super) fn render_status_bar(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {error}\n");
        }

        if self.is_analyzing() {
            return format!("{ANALYZING_MESSAGE}\n");
        }

        "Enter:analyze  Tab:raw JSON  Ctrl+U:clear  F1:help  Esc:quit\n".to_owned()
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== How to use this app ===

1. Type or paste a customer review into the input.
2. Press Enter to analyze it.
3. Each detected aspect is listed with its sentiment and confidence.

Keys:
  Enter      Analyze the review
  Tab        Toggle raw model output (JSON)
  Ctrl+U     Clear the review
  Backspace  Delete the last character
  F1         Toggle this help
  Esc        Quit

Example reviews:
  The battery life is amazing, but the camera is a bit disappointing.
  I love the screen resolution, but the speakers are too quiet.
  Great performance and sleek design. The keyboard feels nice too.

Press any key to close this help.
";
        help_text.to_owned()
    }

    fn content_width(&self) -> usize {
        usize::from(self.width).max(20)
    }
}

/// Number of lines in `text`.
pub(super) fn line_count(text: &str) -> usize {
    text.lines().count()
}

/// Keeps at most `max_lines` lines of `text`.
///
/// When lines are dropped, the last kept line reports how many were hidden.
pub(super) fn clip_lines(text: &str, max_lines: usize) -> String {
    let total = line_count(text);
    if total <= max_lines {
        return text.to_owned();
    }
    let Some(kept) = max_lines.checked_sub(1) else {
        return String::new();
    };

    let mut output = String::new();
    for line in text.lines().take(kept) {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&format!("... ({} more lines)\n", total - kept));
    output
}

/// Greedily wraps `text` on whitespace to at most `width` display columns.
///
/// Words wider than `width` are placed on their own line unbroken.
fn wrap_text(text: &str, width: usize) -> String {
    let mut output = String::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate_width = if line.is_empty() {
            word.width()
        } else {
            line.width() + 1 + word.width()
        };
        if candidate_width > width && !line.is_empty() {
            output.push_str(&line);
            output.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    output.push_str(&line);
    output.push('\n');
    output
}
