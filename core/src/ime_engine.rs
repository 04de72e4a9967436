//! IME engine with key event processing.
//!
//! The `ImeEngine` owns the immutable data snapshots (dictionary, conversion
//! table, punctuation table) and the resolver cache. Per-user state lives in
//! an [`ImeSession`] that the host passes to [`ImeEngine::process_key`] for
//! every keystroke. Method and charset switches go through
//! [`ImeEngine::apply_command`].

use std::sync::Arc;
use tracing::debug;

use crate::conversion::ConversionTable;
use crate::method::{Charset, Command, InputMethod};
use crate::pager::Slot;
use crate::provider::DataProvider;
use crate::punctuation::PunctuationTable;
use crate::resolver::Resolver;
use crate::session::{ImeSession, InputMode};
use crate::Config;

/// Key event types that the IME can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character input (letters, punctuation, etc.)
    Char(char),
    /// Number key for candidate selection (1-9, 0)
    Number(u8),
    /// Space key (select first candidate of the page)
    Space,
    /// Backspace key
    Backspace,
    /// Enter/Return key; with Ctrl it toggles the input mode
    Enter,
    /// Escape key (clear/cancel)
    Escape,
    /// Left arrow key (previous page)
    Left,
    /// Right arrow key (next page)
    Right,
    /// Up arrow key (previous page)
    Up,
    /// Down arrow key (next page)
    Down,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
}

/// Modifier keys held with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
    };

    pub const ALT: Modifiers = Modifiers {
        ctrl: false,
        alt: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt
    }
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the IME
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
}

/// Outcome of one keystroke: whether it was consumed and what to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub result: KeyResult,
    pub commit_text: Option<String>,
}

impl KeyOutcome {
    pub fn handled() -> Self {
        Self {
            result: KeyResult::Handled,
            commit_text: None,
        }
    }

    pub fn not_handled() -> Self {
        Self {
            result: KeyResult::NotHandled,
            commit_text: None,
        }
    }

    pub fn commit<S: Into<String>>(text: S) -> Self {
        Self {
            result: KeyResult::Handled,
            commit_text: Some(text.into()),
        }
    }

    pub fn is_handled(&self) -> bool {
        self.result == KeyResult::Handled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageMove {
    Forward,
    Back,
}

fn page_move(key: KeyEvent) -> Option<PageMove> {
    match key {
        KeyEvent::PageDown | KeyEvent::Right | KeyEvent::Down => Some(PageMove::Forward),
        KeyEvent::PageUp | KeyEvent::Left | KeyEvent::Up => Some(PageMove::Back),
        KeyEvent::Char('=' | '+' | '.' | '>' | ']' | '}') => Some(PageMove::Forward),
        KeyEvent::Char('-' | '_' | ',' | '<' | '[' | '{') => Some(PageMove::Back),
        _ => None,
    }
}

/// Fold raw characters into the dedicated key variants.
fn normalize_key(key: KeyEvent) -> KeyEvent {
    match key {
        KeyEvent::Char(' ') => KeyEvent::Space,
        KeyEvent::Char(ch) if ch.is_ascii_digit() => KeyEvent::Number(ch as u8 - b'0'),
        other => other,
    }
}

/// IME engine bound to a data provider.
pub struct ImeEngine<D: DataProvider> {
    provider: D,
    config: Config,
    resolver: Resolver,
    punctuation: PunctuationTable,
    /// Loaded on first switch to simplified output
    conversion: Option<Arc<ConversionTable>>,
}

impl<D: DataProvider> ImeEngine<D> {
    /// Create an engine for the method and charset named in `config`.
    pub fn new(provider: D, config: Config) -> Self {
        let dictionary = provider.dictionary(config.method);
        let conversion = match config.charset {
            Charset::Simplified => Some(provider.conversion_table()),
            Charset::Traditional => None,
        };
        let resolver = Resolver::new(
            dictionary,
            conversion.clone(),
            config.phrases_first,
            config.max_cache_size,
        );
        let punctuation = provider.punctuation_table();

        debug!(
            method = %config.method,
            charset = %config.charset,
            entries = resolver.dictionary().len(),
            "engine ready"
        );

        Self {
            provider,
            config,
            resolver,
            punctuation,
            conversion,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn method(&self) -> InputMethod {
        self.config.method
    }

    pub fn charset(&self) -> Charset {
        self.config.charset
    }

    pub fn provider(&self) -> &D {
        &self.provider
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn punctuation(&self) -> &PunctuationTable {
        &self.punctuation
    }

    /// Process one keystroke against `session`.
    ///
    /// Returns whether the key was consumed and any text the host should
    /// insert. The session is updated in place; render it with
    /// [`ImeSession::sync_to_context`].
    pub fn process_key(&self, session: &mut ImeSession, key: KeyEvent, modifiers: Modifiers) -> KeyOutcome {
        let key = normalize_key(key);

        if key == KeyEvent::Enter && modifiers.ctrl {
            Self::toggle_mode(session);
            return KeyOutcome::handled();
        }

        if session.mode() == InputMode::Passthrough {
            if self.config.passthrough_punctuation && modifiers.is_empty() {
                if let Some(outcome) = self.substitute_punctuation(key) {
                    return outcome;
                }
            }
            return KeyOutcome::not_handled();
        }

        // Host shortcuts
        if !modifiers.is_empty() {
            return KeyOutcome::not_handled();
        }

        match key {
            KeyEvent::Char(ch) if ch.is_ascii_alphabetic() => {
                session.input_buffer_mut().push(ch.to_ascii_lowercase());
                self.refresh(session);
                return KeyOutcome::handled();
            }
            KeyEvent::Backspace => {
                if session.input_buffer_mut().pop().is_none() {
                    return KeyOutcome::not_handled();
                }
                self.refresh(session);
                return KeyOutcome::handled();
            }
            KeyEvent::Escape => {
                if !session.is_composing() {
                    return KeyOutcome::not_handled();
                }
                session.clear();
                return KeyOutcome::handled();
            }
            KeyEvent::Enter => {
                return if session.is_composing() {
                    KeyOutcome::handled()
                } else {
                    KeyOutcome::not_handled()
                };
            }
            _ => {}
        }

        if let Some(list) = session.candidates_mut() {
            if let Some(step) = page_move(key) {
                match step {
                    PageMove::Forward => list.page_down(),
                    PageMove::Back => list.page_up(),
                };
                return KeyOutcome::handled();
            }

            let slot = match key {
                KeyEvent::Number(n @ 1..=9) => Some(Slot::Digit(n)),
                KeyEvent::Space => Some(Slot::FirstOfPage),
                _ => None,
            };
            if let Some(slot) = slot {
                let chosen = list.select(slot).map(str::to_string);
                return match chosen {
                    Some(text) => {
                        debug!(text = %text, "commit candidate");
                        session.clear();
                        KeyOutcome::commit(text)
                    }
                    // Out of range: swallow the key, keep the state
                    None => KeyOutcome::handled(),
                };
            }
        }

        self.substitute_punctuation(key)
            .unwrap_or_else(KeyOutcome::not_handled)
    }

    /// Apply a host command. The session is reset in the same step.
    pub fn apply_command(&mut self, session: &mut ImeSession, command: Command) {
        match command {
            Command::SelectMethod(method) => {
                let dictionary = self.provider.dictionary(method);
                debug!(method = %method, entries = dictionary.len(), "switch input method");
                self.config.method = method;
                self.resolver.set_dictionary(dictionary);
                session.clear();
            }
            Command::SelectCharset(charset) => {
                debug!(charset = %charset, "switch charset");
                let conversion = match charset {
                    Charset::Simplified => Some(self.conversion_table()),
                    Charset::Traditional => None,
                };
                self.config.charset = charset;
                self.resolver.set_conversion(conversion);
                session.clear();
            }
            Command::ToggleInputMode => Self::toggle_mode(session),
        }
    }

    fn conversion_table(&mut self) -> Arc<ConversionTable> {
        let provider = &self.provider;
        Arc::clone(
            self.conversion
                .get_or_insert_with(|| provider.conversion_table()),
        )
    }

    fn toggle_mode(session: &mut ImeSession) {
        let mode = session.mode().toggled();
        debug!(?mode, "toggle input mode");
        session.clear();
        session.set_mode(mode);
    }

    /// Re-run the resolver after the buffer changed. Paging restarts at 0.
    fn refresh(&self, session: &mut ImeSession) {
        let resolved = if session.input_buffer().is_empty() {
            None
        } else {
            self.resolver.resolve(session.input_buffer().text())
        };
        session.set_candidates(resolved);
    }

    fn substitute_punctuation(&self, key: KeyEvent) -> Option<KeyOutcome> {
        match key {
            KeyEvent::Char(ch) => self.punctuation.get(ch).map(KeyOutcome::commit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::provider::MemoryData;

    fn engine() -> ImeEngine<MemoryData> {
        let data = MemoryData::new()
            .with_dictionary(
                InputMethod::Yale,
                Dictionary::parse("neih 你 妳\nneihhou 你好\nngoh 我\n"),
            )
            .with_dictionary(InputMethod::Jyutping, Dictionary::parse("nei5 你\n"))
            .with_conversion(ConversionTable::parse("妳 你\n"));
        ImeEngine::new(data, Config::default())
    }

    fn type_str(engine: &ImeEngine<MemoryData>, session: &mut ImeSession, s: &str) {
        for ch in s.chars() {
            engine.process_key(session, KeyEvent::Char(ch), Modifiers::NONE);
        }
    }

    fn candidates(session: &ImeSession) -> Vec<String> {
        session
            .candidates()
            .map(|l| l.candidates().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_letters_build_buffer_and_candidates() {
        let engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "NEI");
        assert_eq!(session.input_buffer().text(), "nei");
        assert_eq!(candidates(&session), vec!["你", "妳", "你好"]);
    }

    #[test]
    fn test_digit_commits_and_resets() {
        let engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "neih");
        let out = engine.process_key(&mut session, KeyEvent::Char('2'), Modifiers::NONE);
        assert_eq!(out, KeyOutcome::commit("妳"));
        assert!(!session.is_composing());
        assert!(!session.has_candidates());
    }

    #[test]
    fn test_out_of_range_digit_is_swallowed() {
        let engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "ngoh");
        let out = engine.process_key(&mut session, KeyEvent::Number(5), Modifiers::NONE);
        assert_eq!(out, KeyOutcome::handled());
        assert_eq!(session.input_buffer().text(), "ngoh");
        assert_eq!(candidates(&session), vec!["我"]);
    }

    #[test]
    fn test_space_commits_first_of_page() {
        let engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "ng");
        let out = engine.process_key(&mut session, KeyEvent::Space, Modifiers::NONE);
        assert_eq!(out.commit_text.as_deref(), Some("我"));
    }

    #[test]
    fn test_backspace_and_escape_on_empty_buffer_pass_through() {
        let engine = engine();
        let mut session = ImeSession::new();
        assert!(!engine.process_key(&mut session, KeyEvent::Backspace, Modifiers::NONE).is_handled());
        assert!(!engine.process_key(&mut session, KeyEvent::Escape, Modifiers::NONE).is_handled());
        assert!(!engine.process_key(&mut session, KeyEvent::Enter, Modifiers::NONE).is_handled());
    }

    #[test]
    fn test_backspace_to_empty_drops_candidates() {
        let engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "n");
        assert!(session.has_candidates());
        assert!(engine.process_key(&mut session, KeyEvent::Backspace, Modifiers::NONE).is_handled());
        assert!(!session.has_candidates());
    }

    #[test]
    fn test_punctuation_without_candidates_is_substituted() {
        let engine = engine();
        let mut session = ImeSession::new();
        let out = engine.process_key(&mut session, KeyEvent::Char(','), Modifiers::NONE);
        assert_eq!(out, KeyOutcome::commit("，"));
    }

    #[test]
    fn test_navigation_alias_with_candidates_is_consumed() {
        let engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "n");
        let out = engine.process_key(&mut session, KeyEvent::Char(','), Modifiers::NONE);
        assert_eq!(out, KeyOutcome::handled());
        assert_eq!(session.input_buffer().text(), "n");
    }

    #[test]
    fn test_modified_keys_go_to_host() {
        let engine = engine();
        let mut session = ImeSession::new();
        let out = engine.process_key(&mut session, KeyEvent::Char('c'), Modifiers::CTRL);
        assert_eq!(out, KeyOutcome::not_handled());
        let out = engine.process_key(&mut session, KeyEvent::Char('x'), Modifiers::ALT);
        assert_eq!(out, KeyOutcome::not_handled());
        assert!(!session.is_composing());
    }

    #[test]
    fn test_ctrl_enter_toggles_passthrough() {
        let engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "nei");

        let out = engine.process_key(&mut session, KeyEvent::Enter, Modifiers::CTRL);
        assert!(out.is_handled());
        assert_eq!(session.mode(), InputMode::Passthrough);
        assert!(!session.is_composing());

        let out = engine.process_key(&mut session, KeyEvent::Char('a'), Modifiers::NONE);
        assert_eq!(out, KeyOutcome::not_handled());
        let out = engine.process_key(&mut session, KeyEvent::Char('.'), Modifiers::NONE);
        assert_eq!(out, KeyOutcome::commit("。"));

        engine.process_key(&mut session, KeyEvent::Enter, Modifiers::CTRL);
        assert_eq!(session.mode(), InputMode::Composition);
    }

    #[test]
    fn test_passthrough_punctuation_can_be_disabled() {
        let config = Config {
            passthrough_punctuation: false,
            ..Config::default()
        };
        let engine = ImeEngine::new(MemoryData::new(), config);
        let mut session = ImeSession::new();
        session.set_mode(InputMode::Passthrough);
        let out = engine.process_key(&mut session, KeyEvent::Char('.'), Modifiers::NONE);
        assert_eq!(out, KeyOutcome::not_handled());
    }

    #[test]
    fn test_commands_switch_snapshots_and_reset() {
        let mut engine = engine();
        let mut session = ImeSession::new();
        type_str(&engine, &mut session, "nei");

        engine.apply_command(&mut session, Command::SelectMethod(InputMethod::Jyutping));
        assert_eq!(engine.method(), InputMethod::Jyutping);
        assert!(!session.is_composing());
        assert_eq!(engine.resolver().cache_size(), 0);
        type_str(&engine, &mut session, "nei");
        assert_eq!(candidates(&session), vec!["你"]);

        engine.apply_command(&mut session, Command::SelectMethod(InputMethod::Yale));
        engine.apply_command(&mut session, Command::SelectCharset(Charset::Simplified));
        type_str(&engine, &mut session, "neih");
        assert_eq!(candidates(&session), vec!["你", "你好"]);

        engine.apply_command(&mut session, Command::ToggleInputMode);
        assert_eq!(session.mode(), InputMode::Passthrough);
        assert!(!session.is_composing());
    }
}
