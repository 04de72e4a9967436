//! Composition buffer holding the romanization typed so far.
//!
//! The buffer only ever contains lowercase ASCII letters. Editing is
//! append/remove-last; there is no cursor inside the buffer.

/// Raw romanization input (e.g. "neihou").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Create a new empty input buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a letter. Returns false (and leaves the buffer unchanged) for
    /// anything outside `a..=z`.
    pub fn push(&mut self, ch: char) -> bool {
        if ch.is_ascii_lowercase() {
            self.text.push(ch);
            true
        } else {
            false
        }
    }

    /// Remove the last letter (backspace).
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
