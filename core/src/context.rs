//! IME context for platform communication.
//!
//! The `ImeContext` struct is a simple data container with public fields.
//! After a keystroke has been processed, the host syncs the session into a
//! context and reads these fields to update its composition, candidate and
//! page displays. Committed text is not part of the context; it travels in
//! [`crate::KeyOutcome::commit_text`].

/// IME context for platform communication.
///
/// # Fields
///
/// - `preedit_text`: romanization typed so far
/// - `candidates`: candidates visible on the current page
/// - `page_label`: "2/3" style page indicator
/// - `auxiliary_text`: optional hint text (mode indicator)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeContext {
    /// Romanization being composed
    pub preedit_text: String,

    /// Candidate strings on the current page
    pub candidates: Vec<String>,

    /// Page indicator, empty when there are no candidates
    pub page_label: String,

    /// Auxiliary text for UI hints
    pub auxiliary_text: String,
}

impl ImeContext {
    /// Create a new empty IME context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all display state.
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.candidates.clear();
        self.page_label.clear();
        self.auxiliary_text.clear();
    }

    /// Numbered candidate line, e.g. `1. 你 2. 你好`.
    pub fn match_line(&self) -> String {
        self.candidates
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}", i + 1, c))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_line_numbers_from_one() {
        let mut ctx = ImeContext::new();
        assert_eq!(ctx.match_line(), "");
        ctx.candidates = vec!["你".into(), "你好".into()];
        assert_eq!(ctx.match_line(), "1. 你 2. 你好");
    }

    #[test]
    fn test_clear_resets_display_state() {
        let mut ctx = ImeContext::new();
        ctx.preedit_text = "nei".into();
        ctx.candidates = vec!["你".into()];
        ctx.page_label = "1/1".into();
        ctx.auxiliary_text = "English | Ctrl+Enter".into();

        ctx.clear();
        assert_eq!(ctx, ImeContext::new());
    }
}
