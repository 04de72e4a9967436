//! Character substitution table (traditional → simplified).
//!
//! The table file uses the dictionary line format with single-character
//! keys. Conversion walks the input one Unicode scalar value at a time and
//! replaces each mapped character, leaving everything else untouched.

use ahash::AHashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

use crate::table;

#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    map: AHashMap<char, String>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from text in the line format. Keys longer than one
    /// character are skipped.
    pub fn load<R: BufRead>(reader: R) -> Self {
        Self {
            map: table::read_char_map(reader),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self::load(text.as_bytes())
    }

    /// Load a table file. A missing or unreadable file yields an empty table.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let table = match table::open(path) {
            Some(reader) => Self::load(reader),
            None => Self::new(),
        };
        debug!(path = %path.display(), entries = table.len(), "loaded conversion table");
        table
    }

    /// Insert or replace a single mapping.
    pub fn insert<T: Into<String>>(&mut self, from: char, to: T) {
        self.map.insert(from, to.into());
    }

    pub fn get(&self, ch: char) -> Option<&str> {
        self.map.get(&ch).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replace every mapped character of `text`.
    pub fn convert(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match self.map.get(&ch) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(ch),
            }
        }
        out
    }
}
