//! ASCII → full-width punctuation substitution.
//!
//! When Chinese input is active, a punctuation keystroke that is not used
//! for composition is replaced by its full-width form. The built-in table
//! can be replaced by a `punct.utf-8` data file in the same line format as
//! the conversion table.

use ahash::AHashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

use crate::table;

#[derive(Debug, Clone)]
pub struct PunctuationTable {
    map: AHashMap<char, String>,
}

impl PunctuationTable {
    /// Create a table with the default full-width mappings.
    pub fn new() -> Self {
        let mut map = AHashMap::new();

        map.insert(',', "，".to_string());
        map.insert('.', "。".to_string());
        map.insert(';', "；".to_string());
        map.insert(':', "：".to_string());
        map.insert('?', "？".to_string());
        map.insert('!', "！".to_string());

        // Quotes
        map.insert('"', "\u{201C}".to_string());
        map.insert('\'', "\u{2018}".to_string());

        // Parentheses and brackets
        map.insert('(', "（".to_string());
        map.insert(')', "）".to_string());
        map.insert('[', "【".to_string());
        map.insert(']', "】".to_string());
        map.insert('{', "｛".to_string());
        map.insert('}', "｝".to_string());
        map.insert('<', "《".to_string());
        map.insert('>', "》".to_string());

        map.insert('-', "—".to_string());
        map.insert('~', "～".to_string());
        map.insert('\\', "、".to_string());
        map.insert('$', "￥".to_string());

        Self { map }
    }

    /// Create a table with no mappings.
    pub fn empty() -> Self {
        Self {
            map: AHashMap::new(),
        }
    }

    /// Load mappings from text in the line format.
    pub fn load<R: BufRead>(reader: R) -> Self {
        Self {
            map: table::read_char_map(reader),
        }
    }

    /// Load a punctuation file. A missing or unreadable file yields an empty
    /// table.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let table = match table::open(path) {
            Some(reader) => Self::load(reader),
            None => Self::empty(),
        };
        debug!(path = %path.display(), entries = table.len(), "loaded punctuation table");
        table
    }

    /// Full-width replacement for `ch`, if any.
    pub fn get(&self, ch: char) -> Option<&str> {
        self.map.get(&ch).map(String::as_str)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.map.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for PunctuationTable {
    fn default() -> Self {
        Self::new()
    }
}
