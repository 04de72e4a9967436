//! Input method and character set selection, and the commands a host can
//! send to switch between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Romanization scheme, each backed by its own dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// Cantonese, Yale romanization
    #[default]
    Yale,
    /// Cantonese, Jyutping romanization
    Jyutping,
    /// Mandarin, Hanyu Pinyin
    Pinyin,
}

impl InputMethod {
    pub const ALL: [InputMethod; 3] = [Self::Yale, Self::Jyutping, Self::Pinyin];

    /// Text dictionary file name inside a data directory.
    pub fn data_file(self) -> &'static str {
        match self {
            Self::Yale => "input-yale.utf-8",
            Self::Jyutping => "input-jyutping.utf-8",
            Self::Pinyin => "input-pinyin.utf-8",
        }
    }

    /// File stem shared by the compiled `.fst` / `.bincode` artifacts.
    pub fn compiled_stem(self) -> &'static str {
        match self {
            Self::Yale => "input-yale",
            Self::Jyutping => "input-jyutping",
            Self::Pinyin => "input-pinyin",
        }
    }

    /// Human readable label, e.g. for a settings menu.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yale => "Cantonese/Yale",
            Self::Jyutping => "Cantonese/Jyutping",
            Self::Pinyin => "Mandarin/Pinyin",
        }
    }
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yale" => Ok(Self::Yale),
            "jyutping" => Ok(Self::Jyutping),
            "pinyin" => Ok(Self::Pinyin),
            other => Err(format!("unknown input method '{}' (expected yale, jyutping or pinyin)", other)),
        }
    }
}

/// Character set the candidates are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// Dictionary text as-is
    #[default]
    Traditional,
    /// Dictionary text passed through the trad → simp table
    Simplified,
}

impl Charset {
    pub fn label(self) -> &'static str {
        match self {
            Self::Traditional => "Traditional",
            Self::Simplified => "Simplified",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "traditional" | "trad" => Ok(Self::Traditional),
            "simplified" | "simp" => Ok(Self::Simplified),
            other => Err(format!("unknown charset '{}' (expected traditional or simplified)", other)),
        }
    }
}

/// Settings command sent by the host, e.g. from a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectMethod(InputMethod),
    SelectCharset(Charset),
    /// Same as the Ctrl+Enter toggle key
    ToggleInputMode,
}
