//! cantoinput-core
//!
//! Romanization → Chinese candidate resolution for a Cantonese/Mandarin
//! input method: dictionaries, traditional → simplified conversion,
//! punctuation substitution, paging and the keystroke state machine.
//!
//! Dictionaries are FST maps over sorted keys with bincode-serializable
//! payloads, so a prefix scan is a single range walk.
//!
//! Public API:
//! - `Dictionary` - Romanization key → candidate text lookup with prefix scan
//! - `ConversionTable` - Per-character traditional → simplified mapping
//! - `resolve` / `Resolver` - Buffer → ordered, deduplicated candidates
//! - `ImeEngine` - Keystroke handling over an `ImeSession`
//! - `DataProvider` - Source of dictionary and table snapshots
//! - `Config` - Configuration and feature flags

use serde::{Deserialize, Serialize};

mod table;

pub mod dictionary;
pub use dictionary::Dictionary;

pub mod conversion;
pub use conversion::ConversionTable;

pub mod method;
pub use method::{Charset, Command, InputMethod};

pub mod punctuation;
pub use punctuation::PunctuationTable;

pub mod resolver;
pub use resolver::{phrases_first, resolve, Direction, Resolver};

pub mod provider;
pub use provider::{DataDir, DataProvider, MemoryData};

// IME components
pub mod pager;
pub use pager::{Page, Slot, PAGE_SIZE};

pub mod candidate;
pub use candidate::CandidateList;

pub mod context;
pub use context::ImeContext;

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod session;
pub use session::{ImeSession, InputMode};

pub mod ime_engine;
pub use ime_engine::{ImeEngine, KeyEvent, KeyOutcome, KeyResult, Modifiers};

/// Engine and host configuration.
///
/// The engine reads `method`, `charset`, `max_cache_size`, `phrases_first`
/// and `passthrough_punctuation`. `font` and `font_size` are host display
/// preferences stored alongside them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Active romanization scheme
    pub method: InputMethod,

    /// Output character set
    pub charset: Charset,

    // Cache Management
    /// Maximum number of entries in the buffer -> candidates cache
    pub max_cache_size: usize,

    /// List multi-character candidates before single characters
    pub phrases_first: bool,

    /// Substitute full-width punctuation while in passthrough mode
    pub passthrough_punctuation: bool,

    // Host display preferences
    pub font: Option<String>,
    pub font_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: InputMethod::Yale,
            charset: Charset::Traditional,
            // 1000 entries covers every prefix a user types in a session
            max_cache_size: 1000,
            phrases_first: false,
            passthrough_punctuation: true,
            font: None,
            font_size: 18,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
