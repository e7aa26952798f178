//! Editable review text buffer.

/// Review shown in the input when the app starts.
pub const DEFAULT_REVIEW: &str =
    "The battery life is amazing, but the camera is a bit disappointing.";

/// Single-field text buffer holding the review being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    text: String,
}

impl Default for ReviewInput {
    fn default() -> Self {
        Self::new(DEFAULT_REVIEW)
    }
}

impl ReviewInput {
    /// Creates a buffer holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Current text.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Appends one character.
    pub fn push_char(&mut self, character: char) {
        self.text.push(character);
    }

    /// Removes the last character, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}
