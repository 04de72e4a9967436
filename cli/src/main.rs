//! cantoinput: drive the engine from stdin.
//!
//! Each input line is either a keystroke script (`neih<space>`) or a
//! `:` command (`:method jyutping`). After every line the preedit, the
//! numbered candidates, the page label and the host text are printed.
//! Keys the engine does not consume are applied to the host text the way
//! an editor would.

mod keys;

use anyhow::Result;
use cantoinput_core::{
    Command, Config, DataDir, ImeContext, ImeEngine, ImeSession, InputMode, KeyEvent, KeyResult,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use keys::{HostCommand, Keystroke};

#[derive(Parser, Debug)]
#[command(name = "cantoinput", about = "Cantonese/Mandarin romanization input")]
struct Args {
    /// Directory holding input-*.utf-8, trad-simp.utf-8 and punct.utf-8
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// TOML config file; method and charset changes are written back to it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input method (yale, jyutping, pinyin); overrides the config file
    #[arg(long)]
    method: Option<cantoinput_core::InputMethod>,

    /// Output charset (traditional, simplified); overrides the config file
    #[arg(long)]
    charset: Option<cantoinput_core::Charset>,
}

/// Text area standing in for the focused application.
#[derive(Debug, Default)]
struct HostText {
    text: String,
}

impl HostText {
    fn insert(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Apply a key the engine passed through.
    fn apply(&mut self, stroke: Keystroke) {
        if stroke.modifiers.ctrl || stroke.modifiers.alt {
            return;
        }
        match stroke.key {
            KeyEvent::Char(ch) => self.text.push(ch),
            KeyEvent::Number(n) => self.text.push(char::from(b'0' + n)),
            KeyEvent::Space => self.text.push(' '),
            KeyEvent::Enter => self.text.push('\n'),
            KeyEvent::Backspace => {
                self.text.pop();
            }
            _ => {}
        }
    }
}

fn load_config(args: &Args) -> Config {
    let mut config = match &args.config {
        Some(path) if path.exists() => match Config::load_toml(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                Config::default()
            }
        },
        _ => Config::default(),
    };
    if let Some(method) = args.method {
        config.method = method;
    }
    if let Some(charset) = args.charset {
        config.charset = charset;
    }
    config
}

fn print_state(out: &mut impl Write, session: &ImeSession, host: &HostText) -> io::Result<()> {
    let mut ctx = ImeContext::new();
    session.sync_to_context(&mut ctx);

    if session.mode() == InputMode::Passthrough {
        writeln!(out, "  [{}]", ctx.auxiliary_text)?;
    }
    if !ctx.preedit_text.is_empty() {
        writeln!(out, "  input:  {}", ctx.preedit_text)?;
        if ctx.candidates.is_empty() {
            writeln!(out, "  (no match)")?;
        } else {
            writeln!(out, "  {}  [{}]", ctx.match_line(), ctx.page_label)?;
        }
    }
    writeln!(out, "  text:   {}", host.text)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config(&args);
    info!(data_dir = %args.data_dir.display(), method = %config.method, charset = %config.charset, "starting");

    let mut engine = ImeEngine::new(DataDir::new(&args.data_dir), config.clone());
    let mut session = ImeSession::new();
    let mut host = HostText::default();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        if line.starts_with(':') {
            match keys::parse_command(line) {
                Ok(HostCommand::Engine(command)) => {
                    engine.apply_command(&mut session, command);
                    if matches!(command, Command::SelectMethod(_) | Command::SelectCharset(_)) {
                        config.method = engine.method();
                        config.charset = engine.charset();
                        if let Some(path) = &args.config {
                            config.save_toml(path)?;
                            debug!(path = %path.display(), "saved config");
                        }
                    }
                    writeln!(out, "  {} | {}", engine.method().label(), engine.charset().label())?;
                }
                Ok(HostCommand::ShowText) => {}
                Ok(HostCommand::ClearText) => host.text.clear(),
                Err(e) => {
                    writeln!(out, "  error: {}", e)?;
                    continue;
                }
            }
            print_state(&mut out, &session, &host)?;
            continue;
        }

        for stroke in keys::parse_script(line) {
            let outcome = engine.process_key(&mut session, stroke.key, stroke.modifiers);
            if let Some(text) = &outcome.commit_text {
                host.insert(text);
            }
            if outcome.result == KeyResult::NotHandled {
                host.apply(stroke);
            }
        }
        print_state(&mut out, &session, &host)?;
    }

    Ok(())
}
