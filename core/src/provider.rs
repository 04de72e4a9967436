//! Data sources for dictionaries and substitution tables.
//!
//! The engine asks a [`DataProvider`] for a fresh snapshot whenever the
//! active input method or charset changes. [`DataDir`] reads the standard
//! data file names from a directory; [`MemoryData`] serves tables that were
//! built in memory (embedded data, tests).

use ahash::AHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::conversion::ConversionTable;
use crate::dictionary::Dictionary;
use crate::method::InputMethod;
use crate::punctuation::PunctuationTable;

/// Trait the engine uses to obtain immutable table snapshots.
pub trait DataProvider {
    /// Dictionary for `method`. Unavailable data yields an empty dictionary.
    fn dictionary(&self, method: InputMethod) -> Arc<Dictionary>;

    /// Traditional → simplified table.
    fn conversion_table(&self) -> Arc<ConversionTable>;

    /// ASCII → full-width punctuation table.
    fn punctuation_table(&self) -> PunctuationTable;
}

/// File name of the traditional → simplified table.
pub const TRAD_SIMP_FILE: &str = "trad-simp.utf-8";
/// File name of the punctuation override table.
pub const PUNCT_FILE: &str = "punct.utf-8";

/// Directory holding `input-*.utf-8`, `trad-simp.utf-8` and optionally
/// `punct.utf-8`, plus compiled `input-*.fst` / `input-*.bincode` pairs.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths of the compiled artifact pair for `method`.
    pub fn compiled_paths(&self, method: InputMethod) -> (PathBuf, PathBuf) {
        let stem = method.compiled_stem();
        (
            self.root.join(format!("{}.fst", stem)),
            self.root.join(format!("{}.bincode", stem)),
        )
    }
}

impl DataProvider for DataDir {
    fn dictionary(&self, method: InputMethod) -> Arc<Dictionary> {
        // Prefer compiled artifacts; fall back to the text file.
        let (fst_path, bincode_path) = self.compiled_paths(method);
        if fst_path.exists() && bincode_path.exists() {
            match Dictionary::load_compiled(&fst_path, &bincode_path) {
                Ok(dict) => return Arc::new(dict),
                Err(e) => warn!(method = %method, error = %e, "compiled dictionary unusable, reading text file"),
            }
        }
        Arc::new(Dictionary::load_file(self.root.join(method.data_file())))
    }

    fn conversion_table(&self) -> Arc<ConversionTable> {
        Arc::new(ConversionTable::load_file(self.root.join(TRAD_SIMP_FILE)))
    }

    fn punctuation_table(&self) -> PunctuationTable {
        let path = self.root.join(PUNCT_FILE);
        if path.exists() {
            PunctuationTable::load_file(path)
        } else {
            debug!("no punctuation file, using built-in table");
            PunctuationTable::new()
        }
    }
}

/// In-memory provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    dictionaries: AHashMap<InputMethod, Arc<Dictionary>>,
    conversion: Arc<ConversionTable>,
    punctuation: PunctuationTable,
}

impl MemoryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, method: InputMethod, dictionary: Dictionary) -> Self {
        self.dictionaries.insert(method, Arc::new(dictionary));
        self
    }

    pub fn with_conversion(mut self, table: ConversionTable) -> Self {
        self.conversion = Arc::new(table);
        self
    }

    pub fn with_punctuation(mut self, table: PunctuationTable) -> Self {
        self.punctuation = table;
        self
    }
}

impl DataProvider for MemoryData {
    fn dictionary(&self, method: InputMethod) -> Arc<Dictionary> {
        self.dictionaries.get(&method).cloned().unwrap_or_default()
    }

    fn conversion_table(&self) -> Arc<ConversionTable> {
        Arc::clone(&self.conversion)
    }

    fn punctuation_table(&self) -> PunctuationTable {
        self.punctuation.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_data_serves_per_method() {
        let data = MemoryData::new()
            .with_dictionary(InputMethod::Yale, Dictionary::parse("neih 你\n"))
            .with_dictionary(InputMethod::Pinyin, Dictionary::parse("ni 你\n"));
        assert_eq!(data.dictionary(InputMethod::Yale).get("neih"), Some("你"));
        assert_eq!(data.dictionary(InputMethod::Pinyin).get("ni"), Some("你"));
        assert!(data.dictionary(InputMethod::Jyutping).is_empty());
        assert!(data.conversion_table().is_empty());
        assert_eq!(data.punctuation_table().get(','), Some("，"));
    }

    #[test]
    fn test_data_dir_without_files_is_empty_but_usable() {
        let dir = DataDir::new(std::env::temp_dir().join("cantoinput_no_such_data_dir"));
        assert!(dir.dictionary(InputMethod::Yale).is_empty());
        assert!(dir.conversion_table().is_empty());
        assert_eq!(dir.punctuation_table().get('.'), Some("。"));
    }
}
