//! Romanization dictionary with sorted prefix range queries.
//!
//! Keys live in an `fst::Map` that maps each romanization key to an index
//! into a payload vector of merged candidate strings. The key space is
//! sorted at load time and never changes afterwards, which makes a prefix
//! query a single range scan: seek to the first key `>= prefix` and stream
//! until the first key that no longer starts with it.
//!
//! Two on-disk forms are supported:
//! - the UTF-8 text format (`<key> <candidates…>` per line)
//! - a compiled pair of `<name>.fst` (key → index) and `<name>.bincode`
//!   (`Vec<String>` payloads in key order), produced by `compile_dict`

use anyhow::{bail, Result};
use fst::{IntoStreamer, Map, MapBuilder, Streamer};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::table;

/// Immutable romanization → candidates dictionary.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    // key -> index into `values`
    keys: Map<Vec<u8>>,
    // merged, space separated candidate strings in key order
    values: Vec<String>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from text in the line format.
    ///
    /// Lines without a value are skipped, and repeated keys are merged by
    /// appending their values in file order.
    pub fn load<R: BufRead>(reader: R) -> Self {
        Self::from_merged(table::read_merged(reader))
    }

    /// Load a dictionary from an in-memory string.
    pub fn parse(text: &str) -> Self {
        Self::load(text.as_bytes())
    }

    /// Load a dictionary file. A missing or unreadable file yields an empty
    /// dictionary.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let dict = match table::open(path) {
            Some(reader) => Self::load(reader),
            None => Self::new(),
        };
        debug!(path = %path.display(), entries = dict.len(), "loaded dictionary");
        dict
    }

    fn from_merged(merged: BTreeMap<String, String>) -> Self {
        let mut builder = MapBuilder::memory();
        let mut values = Vec::with_capacity(merged.len());

        // BTreeMap yields keys in ascending byte order, which the fst builder requires.
        for (key, value) in merged {
            let index = values.len() as u64;
            match builder.insert(&key, index) {
                Ok(()) => values.push(value),
                Err(e) => warn!(key = %key, error = %e, "skipping dictionary key"),
            }
        }

        Self {
            keys: builder.into_map(),
            values,
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Exact-key lookup of the merged value string.
    ///
    /// Candidate resolution never uses this; it always goes through
    /// [`Dictionary::lookup_prefix`].
    pub fn get(&self, key: &str) -> Option<&str> {
        let index = self.keys.get(key)?;
        self.values.get(index as usize).map(String::as_str)
    }

    /// Every entry whose key starts with `prefix`, in ascending key order.
    ///
    /// An empty prefix returns nothing.
    pub fn lookup_prefix(&self, prefix: &str) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        if prefix.is_empty() {
            return out;
        }

        let mut stream = self.keys.range().ge(prefix).into_stream();
        while let Some((key, index)) = stream.next() {
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            if let Some(value) = self.values.get(index as usize) {
                out.push((String::from_utf8_lossy(key).into_owned(), value.as_str()));
            }
        }
        out
    }

    /// All entries in ascending key order.
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stream = self.keys.stream();
        while let Some((key, index)) = stream.next() {
            if let Some(value) = self.values.get(index as usize) {
                out.push((String::from_utf8_lossy(key).into_owned(), value.as_str()));
            }
        }
        out
    }

    /// Write the compiled fst + bincode artifact pair.
    pub fn save_compiled<P: AsRef<Path>>(&self, fst_path: P, bincode_path: P) -> Result<()> {
        let mut f = File::create(fst_path.as_ref())?;
        f.write_all(self.keys.as_fst().as_bytes())?;
        f.flush()?;

        let mut w = BufWriter::new(File::create(bincode_path.as_ref())?);
        bincode::serialize_into(&mut w, &self.values)?;
        w.flush()?;
        Ok(())
    }

    /// Load a compiled fst + bincode artifact pair.
    ///
    /// - fst_path: key index mapping each romanization key to a payload index
    /// - bincode_path: `Vec<String>` payloads in key order
    pub fn load_compiled<P: AsRef<Path>>(fst_path: P, bincode_path: P) -> Result<Self> {
        let fst_path = fst_path.as_ref();
        let bincode_path = bincode_path.as_ref();

        let keys = {
            let mut f = File::open(fst_path)?;
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            Map::new(buf)?
        };

        let values: Vec<String> = {
            let mut f = File::open(bincode_path)?;
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            bincode::deserialize(&buf)?
        };

        if keys.len() != values.len() {
            bail!(
                "{} has {} keys but {} has {} payloads",
                fst_path.display(),
                keys.len(),
                bincode_path.display(),
                values.len()
            );
        }

        debug!(path = %fst_path.display(), entries = values.len(), "loaded compiled dictionary");
        Ok(Self { keys, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::parse(
            "nei5hou2 你好\n\
             nei5 你 妳\n\
             ne1 呢\n\
             neoi5 女\n\
             nei6 膩\n\
             ngo5 我\n\
             nei5 你 尼\n",
        )
    }

    #[test]
    fn test_repeated_keys_are_merged_in_file_order() {
        let dict = sample();
        assert_eq!(dict.get("nei5"), Some("你 妳 你 尼"));
        assert_eq!(dict.len(), 6);
    }

    #[test]
    fn test_lookup_prefix_returns_ascending_matches() {
        let dict = sample();
        let keys: Vec<String> = dict.lookup_prefix("nei").into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["nei5", "nei5hou2", "nei6"]);
    }

    #[test]
    fn test_lookup_prefix_exact_key_first() {
        let dict = sample();
        let found = dict.lookup_prefix("nei5");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, "nei5");
        assert_eq!(found[1], ("nei5hou2".to_string(), "你好"));
    }

    #[test]
    fn test_lookup_prefix_matches_literal_prefix_only() {
        let dict = sample();
        let found = dict.lookup_prefix("n");
        let keys: Vec<&str> = found.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["ne1", "nei5", "nei5hou2", "nei6", "neoi5", "ngo5"]);

        assert!(dict.lookup_prefix("xyz").is_empty());
        assert!(dict.lookup_prefix("nei7").is_empty());
        assert!(dict.lookup_prefix("zzzz").is_empty());
    }

    #[test]
    fn test_lookup_prefix_empty_prefix_returns_nothing() {
        assert!(sample().lookup_prefix("").is_empty());
    }

    #[test]
    fn test_lookup_prefix_agrees_with_linear_filter() {
        let dict = sample();
        for prefix in ["n", "ne", "nei", "nei5", "nei5h", "ng", "o", "neoi5x"] {
            let expected: Vec<String> = dict
                .entries()
                .into_iter()
                .filter(|(k, _)| k.starts_with(prefix))
                .map(|(k, _)| k)
                .collect();
            let got: Vec<String> = dict.lookup_prefix(prefix).into_iter().map(|(k, _)| k).collect();
            assert_eq!(got, expected, "prefix {prefix:?}");
        }
    }

    #[test]
    fn test_lines_without_value_are_skipped() {
        let dict = Dictionary::parse("a 亞\nb\n\nc 詞\n");
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("b"), None);
        assert_eq!(dict.get("c"), Some("詞"));
    }

    #[test]
    fn test_missing_file_gives_empty_dictionary() {
        let path = std::env::temp_dir().join("cantoinput_missing_dictionary.utf-8");
        let dict = Dictionary::load_file(&path);
        assert!(dict.is_empty());
        assert!(dict.lookup_prefix("a").is_empty());
    }
}
