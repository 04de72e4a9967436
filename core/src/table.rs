//! Line-oriented data file reader shared by the dictionary, conversion and
//! punctuation tables.
//!
//! Every data file uses the same shape: one entry per line,
//! `<key><whitespace><value…>`, where whitespace means ASCII space, tab,
//! CR, LF or form feed. The key is the first whitespace-delimited token and
//! the value is the trimmed remainder of the line, kept byte for byte. Loading is
//! best-effort: a bad line is skipped and never affects the lines after it.

use ahash::AHashMap;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{trace, warn};

/// Split a raw line into `(key, value)`.
///
/// Returns `None` for blank lines and for lines that carry a key but no value.
pub(crate) fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line
        .trim_start_matches('\u{feff}')
        .trim_start_matches(|c: char| c.is_ascii_whitespace());
    let split = line.find(|c: char| c.is_ascii_whitespace())?;
    let (key, rest) = line.split_at(split);
    let value = rest.trim_matches(|c: char| c.is_ascii_whitespace());
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Read every line of `reader`, merging values of repeated keys.
///
/// A repeated key appends its value to the earlier one, separated by a single
/// space, so file order is preserved. The returned map iterates in ascending
/// byte order of the keys.
pub(crate) fn read_merged<R: BufRead>(mut reader: R) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = BTreeMap::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => line_no += 1,
            Err(e) => {
                warn!(line = line_no, error = %e, "stopped reading data source");
                break;
            }
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            trace!(line = line_no, "skipping line that is not valid UTF-8");
            continue;
        };
        let Some((key, value)) = parse_line(line) else {
            trace!(line = line_no, "skipping line without a value");
            continue;
        };

        match merged.get_mut(key) {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(value);
            }
            None => {
                merged.insert(key.to_string(), value.to_string());
            }
        }
    }

    merged
}

/// Read a table whose keys are single characters.
///
/// Lines whose key is longer than one character are skipped. The replacement
/// for a key is the first token of its (merged) value.
pub(crate) fn read_char_map<R: BufRead>(reader: R) -> AHashMap<char, String> {
    let mut map = AHashMap::new();
    for (key, value) in read_merged(reader) {
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            trace!(key = %key, "skipping multi-character key");
            continue;
        };
        if let Some(first) = value.split_ascii_whitespace().next() {
            map.insert(ch, first.to_string());
        }
    }
    map
}

/// Open a data file for buffered reading.
///
/// A missing or unreadable file is not an error for the engine: the caller
/// gets `None` and falls back to an empty table.
pub(crate) fn open<P: AsRef<Path>>(path: P) -> Option<BufReader<File>> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(f) => Some(BufReader::new(f)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "data file unavailable, using an empty table");
            None
        }
    }
}
