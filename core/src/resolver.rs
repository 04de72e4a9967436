// core/src/resolver.rs
//
// Candidate resolution: buffer -> prefix scan -> token split -> optional
// charset conversion -> first-occurrence dedup.

use ahash::AHashSet;
use lru::LruCache;
use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::conversion::ConversionTable;
use crate::dictionary::Dictionary;

/// How resolved tokens are rendered.
#[derive(Debug, Clone, Copy)]
pub enum Direction<'a> {
    /// Dictionary text as-is (traditional)
    Identity,
    /// Convert every token through the table (traditional -> simplified)
    Convert(&'a ConversionTable),
}

/// Resolve `buffer` against `dictionary`.
///
/// Returns `None` when no key starts with `buffer` (or the buffer is empty).
/// Otherwise the candidates of every matching entry are listed in ascending
/// key order, so an exact key comes before longer keys sharing the prefix.
/// Each entry's value is split on ASCII whitespace in source order,
/// converted when `direction` asks for it, and duplicates are dropped
/// keeping the first occurrence.
pub fn resolve(buffer: &str, dictionary: &Dictionary, direction: Direction<'_>) -> Option<Vec<String>> {
    if buffer.is_empty() {
        return None;
    }

    let entries = dictionary.lookup_prefix(buffer);
    if entries.is_empty() {
        return None;
    }

    let mut seen: AHashSet<String> = AHashSet::new();
    let mut out = Vec::new();
    for (_, value) in &entries {
        for token in value.split_ascii_whitespace() {
            let token = match direction {
                Direction::Identity => token.to_string(),
                Direction::Convert(table) => table.convert(token),
            };
            if seen.insert(token.clone()) {
                out.push(token);
            }
        }
    }
    Some(out)
}

/// Stable partition putting multi-character candidates ahead of single
/// characters, each group keeping its relative order.
pub fn phrases_first(candidates: Vec<String>) -> Vec<String> {
    let (mut phrases, singles): (Vec<String>, Vec<String>) =
        candidates.into_iter().partition(|c| c.chars().count() > 1);
    phrases.extend(singles);
    phrases
}

/// Resolver bound to the active dictionary and conversion table.
///
/// Results are memoized per buffer in an LRU cache. Swapping the dictionary
/// or the conversion table clears the cache, so a cached list never outlives
/// the snapshot it was computed from.
pub struct Resolver {
    dictionary: Arc<Dictionary>,
    conversion: Option<Arc<ConversionTable>>,
    phrases_first: bool,
    cache: RefCell<LruCache<String, Option<Vec<String>>>>,
    cache_hits: Cell<usize>,
    cache_misses: Cell<usize>,
}

impl Resolver {
    /// Create a resolver. `conversion` is `Some` for simplified output.
    pub fn new(
        dictionary: Arc<Dictionary>,
        conversion: Option<Arc<ConversionTable>>,
        phrases_first: bool,
        cache_size: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            dictionary,
            conversion,
            phrases_first,
            cache: RefCell::new(LruCache::new(capacity)),
            cache_hits: Cell::new(0),
            cache_misses: Cell::new(0),
        }
    }

    /// Resolve a buffer, consulting the cache first.
    pub fn resolve(&self, buffer: &str) -> Option<Vec<String>> {
        if let Some(cached) = self.cache.borrow_mut().get(buffer) {
            self.cache_hits.set(self.cache_hits.get() + 1);
            return cached.clone();
        }
        self.cache_misses.set(self.cache_misses.get() + 1);

        let direction = match &self.conversion {
            Some(table) => Direction::Convert(table),
            None => Direction::Identity,
        };
        let mut found = resolve(buffer, &self.dictionary, direction);
        if self.phrases_first {
            found = found.map(phrases_first);
        }

        self.cache.borrow_mut().put(buffer.to_string(), found.clone());
        found
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn conversion(&self) -> Option<&Arc<ConversionTable>> {
        self.conversion.as_ref()
    }

    /// Swap in another dictionary snapshot.
    pub fn set_dictionary(&mut self, dictionary: Arc<Dictionary>) {
        self.dictionary = dictionary;
        self.clear_cache();
    }

    /// Swap the output direction. `None` means traditional (identity).
    pub fn set_conversion(&mut self, conversion: Option<Arc<ConversionTable>>) {
        self.conversion = conversion;
        self.clear_cache();
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.cache_hits.get(), self.cache_misses.get())
    }

    /// Get current cache size (number of entries).
    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.borrow().cap().get()
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        self.cache_hits.set(0);
        self.cache_misses.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::parse(
            "nei5 你\n\
             nei5hou2 你好\n",
        )
    }

    #[test]
    fn test_exact_match_before_longer_prefix_match() {
        let got = resolve("nei5", &dict(), Direction::Identity);
        assert_eq!(got, Some(vec!["你".to_string(), "你好".to_string()]));
    }

    #[test]
    fn test_no_match_is_none() {
        assert_eq!(resolve("xyz", &dict(), Direction::Identity), None);
        assert_eq!(resolve("", &dict(), Direction::Identity), None);
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let d = Dictionary::parse(
            "si 詩 師 時\n\
             si 師 史\n\
             sik 食 時 識\n",
        );
        let got = resolve("si", &d, Direction::Identity).unwrap_or_default();
        assert_eq!(got, vec!["詩", "師", "時", "史", "食", "識"]);
    }

    #[test]
    fn test_conversion_can_create_duplicates_that_are_removed() {
        let d = Dictionary::parse("fat 發 髮 法\n");
        let table = ConversionTable::parse("發 发\n髮 发\n");
        let got = resolve("fat", &d, Direction::Convert(&table)).unwrap_or_default();
        assert_eq!(got, vec!["发", "法"]);
    }

    #[test]
    fn test_conversion_applies_per_character_in_phrases() {
        let d = Dictionary::parse("gwok 國家 國\n");
        let table = ConversionTable::parse("國 国\n");
        let got = resolve("gwok", &d, Direction::Convert(&table)).unwrap_or_default();
        assert_eq!(got, vec!["国家", "国"]);
    }

    #[test]
    fn test_compatibility_ideographs_stay_distinct() {
        let d = Dictionary::parse("lohng \u{F92C} \u{90CE}\n");
        let got = resolve("lohng", &d, Direction::Identity).unwrap_or_default();
        assert_eq!(got, vec!["\u{F92C}", "\u{90CE}"]);
    }

    #[test]
    fn test_ideographic_space_stays_inside_a_candidate() {
        let d = Dictionary::parse("gaap 甲\u{3000}乙 丙\n");
        let got = resolve("gaap", &d, Direction::Identity).unwrap_or_default();
        assert_eq!(got, vec!["甲\u{3000}乙", "丙"]);
    }

    #[test]
    fn test_phrases_first_is_stable() {
        let input: Vec<String> = ["你", "你好", "妳", "你們", "尼"].iter().map(|s| s.to_string()).collect();
        assert_eq!(phrases_first(input), vec!["你好", "你們", "你", "妳", "尼"]);
    }

    #[test]
    fn test_resolver_caches_results() {
        let resolver = Resolver::new(Arc::new(dict()), None, false, 8);
        assert_eq!(resolver.resolve("nei5").map(|v| v.len()), Some(2));
        assert_eq!(resolver.resolve("nei5").map(|v| v.len()), Some(2));
        assert_eq!(resolver.resolve("xyz"), None);
        assert_eq!(resolver.resolve("xyz"), None);
        assert_eq!(resolver.cache_stats(), (2, 2));
        assert_eq!(resolver.cache_size(), 2);
    }

    #[test]
    fn test_resolver_cache_respects_capacity() {
        let resolver = Resolver::new(Arc::new(dict()), None, false, 2);
        resolver.resolve("n");
        resolver.resolve("ne");
        resolver.resolve("nei");
        assert_eq!(resolver.cache_size(), 2);
        assert_eq!(resolver.cache_capacity(), 2);

        let zero = Resolver::new(Arc::new(dict()), None, false, 0);
        assert_eq!(zero.cache_capacity(), 1);
    }

    #[test]
    fn test_swapping_snapshots_clears_cache() {
        let mut resolver = Resolver::new(Arc::new(dict()), None, false, 8);
        assert_eq!(resolver.resolve("nei5").map(|v| v.len()), Some(2));

        resolver.set_conversion(Some(Arc::new(ConversionTable::parse("你 祢\n"))));
        assert_eq!(resolver.cache_size(), 0);
        assert_eq!(
            resolver.resolve("nei5"),
            Some(vec!["祢".to_string(), "祢好".to_string()])
        );

        resolver.set_dictionary(Arc::new(Dictionary::parse("ngo5 我\n")));
        assert_eq!(resolver.resolve("nei5"), None);
        assert_eq!(resolver.resolve("ngo"), Some(vec!["我".to_string()]));
    }

    #[test]
    fn test_resolver_phrases_first_option() {
        let resolver = Resolver::new(Arc::new(dict()), None, true, 8);
        assert_eq!(
            resolver.resolve("nei"),
            Some(vec!["你好".to_string(), "你".to_string()])
        );
    }
}
