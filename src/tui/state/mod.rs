//! State types for the analyzer TUI.

mod review_input;

pub use review_input::{DEFAULT_REVIEW, ReviewInput};
