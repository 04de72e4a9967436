//! IME session state.
//!
//! `ImeSession` is the per-user state threaded through
//! [`crate::ImeEngine::process_key`]: the current mode, the romanization
//! buffer and the resolved candidates with their page. The host owns the
//! session; the engine only borrows it for the duration of one keystroke.

use crate::candidate::CandidateList;
use crate::context::ImeContext;
use crate::input_buffer::InputBuffer;

/// Current input mode of the IME session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keystrokes build a romanization buffer
    #[default]
    Composition,
    /// Keys go to the host (apart from punctuation substitution)
    Passthrough,
}

impl InputMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Composition => Self::Passthrough,
            Self::Passthrough => Self::Composition,
        }
    }
}

/// IME session state.
///
/// `candidates` is `None` when the buffer matches no dictionary key (or the
/// buffer is empty), which the host renders as "no match".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeSession {
    /// Raw input buffer (e.g., "neihou")
    input_buffer: InputBuffer,

    /// Candidates for the current buffer
    candidates: Option<CandidateList>,

    /// Current input mode
    mode: InputMode,
}

impl ImeSession {
    /// Create a new empty session in composition mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_buffer(&self) -> &InputBuffer {
        &self.input_buffer
    }

    pub fn input_buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.input_buffer
    }

    pub fn candidates(&self) -> Option<&CandidateList> {
        self.candidates.as_ref()
    }

    pub fn candidates_mut(&mut self) -> Option<&mut CandidateList> {
        self.candidates.as_mut()
    }

    /// Replace the candidates with a freshly resolved list, back on page one.
    pub fn set_candidates(&mut self, resolved: Option<Vec<String>>) {
        self.candidates = resolved.map(CandidateList::new);
    }

    pub fn has_candidates(&self) -> bool {
        self.candidates.is_some()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Check if the session is composing (buffer non-empty).
    pub fn is_composing(&self) -> bool {
        !self.input_buffer.is_empty()
    }

    /// Drop buffer, candidates and paging. The mode is kept.
    pub fn clear(&mut self) {
        self.input_buffer.clear();
        self.candidates = None;
    }

    /// Sync session state to an ImeContext for platform communication.
    pub fn sync_to_context(&self, context: &mut ImeContext) {
        context.clear();
        context.preedit_text = self.input_buffer.text().to_string();

        if let Some(list) = &self.candidates {
            let page = list.paginate();
            context.candidates = page.items.to_vec();
            context.page_label = page.label;
        }

        if self.mode == InputMode::Passthrough {
            context.auxiliary_text = "English | Ctrl+Enter".to_string();
        }
    }
}
