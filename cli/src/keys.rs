//! Keystroke scripts and `:` commands read from stdin.
//!
//! A script line is a run of plain characters and named keys in angle
//! brackets, e.g. `neih<space>` or `si<pgdn>3`. A `<` that does not open a
//! known key name is the literal `<` key.

use anyhow::{anyhow, bail, Result};
use cantoinput_core::{Charset, Command, InputMethod, KeyEvent, Modifiers};

/// One key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: KeyEvent,
    pub modifiers: Modifiers,
}

impl Keystroke {
    fn plain(key: KeyEvent) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}

/// Host-level command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Engine(Command),
    /// Print the host text buffer
    ShowText,
    /// Empty the host text buffer
    ClearText,
}

const NAMED_KEYS: &[(&str, KeyEvent, Modifiers)] = &[
    ("bs", KeyEvent::Backspace, Modifiers::NONE),
    ("esc", KeyEvent::Escape, Modifiers::NONE),
    ("enter", KeyEvent::Enter, Modifiers::NONE),
    ("c-enter", KeyEvent::Enter, Modifiers::CTRL),
    ("space", KeyEvent::Space, Modifiers::NONE),
    ("left", KeyEvent::Left, Modifiers::NONE),
    ("right", KeyEvent::Right, Modifiers::NONE),
    ("up", KeyEvent::Up, Modifiers::NONE),
    ("down", KeyEvent::Down, Modifiers::NONE),
    ("pgup", KeyEvent::PageUp, Modifiers::NONE),
    ("pgdn", KeyEvent::PageDown, Modifiers::NONE),
];

fn named_key(name: &str) -> Option<Keystroke> {
    NAMED_KEYS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|&(_, key, modifiers)| Keystroke { key, modifiers })
}

/// Split a script line into keystrokes.
pub fn parse_script(line: &str) -> Vec<Keystroke> {
    let mut out = Vec::new();
    let mut rest = line;

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(end) = rest.find('>') {
                if let Some(stroke) = named_key(&rest[1..end]) {
                    out.push(stroke);
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }
        out.push(Keystroke::plain(KeyEvent::Char(ch)));
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Parse a line starting with `:`.
pub fn parse_command(line: &str) -> Result<HostCommand> {
    let body = line
        .strip_prefix(':')
        .ok_or_else(|| anyhow!("commands start with ':'"))?;
    let mut parts = body.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let command = match (name, arg) {
        ("method", Some(value)) => {
            HostCommand::Engine(Command::SelectMethod(value.parse::<InputMethod>().map_err(|e| anyhow!(e))?))
        }
        ("charset", Some(value)) => {
            HostCommand::Engine(Command::SelectCharset(value.parse::<Charset>().map_err(|e| anyhow!(e))?))
        }
        ("toggle", None) => HostCommand::Engine(Command::ToggleInputMode),
        ("text", None) => HostCommand::ShowText,
        ("clear", None) => HostCommand::ClearText,
        ("method" | "charset", None) => bail!(":{} needs an argument", name),
        _ => bail!("unknown command: {}", line),
    };
    Ok(command)
}
