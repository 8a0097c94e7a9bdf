//! Validation cache
//!
//! Remembers every (language, word) verdict for the life of the cache, so a
//! word is sent to the oracle at most once. Oracle failures are stored as
//! "not a word" like any genuine negative.

use std::collections::HashMap;
use std::sync::Mutex;

use super::oracle::DictionaryOracle;
use crate::language::LanguageCode;

#[derive(Debug, Default)]
pub struct ValidationCache {
    entries: Mutex<HashMap<(LanguageCode, String), bool>>,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached verdict, if any
    pub fn get(&self, language: LanguageCode, word: &str) -> Option<bool> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(&(language, word.to_lowercase())).copied()
    }

    fn insert(&self, language: LanguageCode, word: String, valid: bool) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert((language, word), valid);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check a word, consulting the oracle only on a cache miss.
    ///
    /// The lock is never held across the oracle call; two concurrent misses
    /// for the same key both ask the oracle and write the same answer.
    pub async fn is_real_word<O: DictionaryOracle>(
        &self,
        oracle: &O,
        word: &str,
        language: LanguageCode,
    ) -> bool {
        let key = word.to_lowercase();
        if let Some(valid) = self.get(language, &key) {
            return valid;
        }

        let valid = match oracle.lookup(&key, language.dictionary_locale()).await {
            Ok(valid) => valid,
            Err(e) => {
                log::warn!("Lookup of '{}' ({}) failed: {}", key, language.as_str(), e);
                false
            }
        };

        log::debug!("Validated '{}' ({}): {}", key, language.as_str(), valid);
        self.insert(language, key, valid);
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::oracle::OracleError;
    use std::cell::Cell;

    /// Counts calls; accepts a fixed word, fails on "boom"
    struct CountingOracle {
        calls: Cell<usize>,
    }

    impl CountingOracle {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl DictionaryOracle for CountingOracle {
        async fn lookup(&self, word: &str, _locale: &str) -> Result<bool, OracleError> {
            self.calls.set(self.calls.get() + 1);
            match word {
                "boom" => Err(OracleError::Transport("connection reset".into())),
                "word" => Ok(true),
                _ => Ok(false),
            }
        }
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache() {
        let cache = ValidationCache::new();
        let oracle = CountingOracle::new();
        assert!(cache.is_real_word(&oracle, "word", LanguageCode::En).await);
        assert!(cache.is_real_word(&oracle, "WORD", LanguageCode::En).await);
        assert_eq!(oracle.calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_is_per_language() {
        let cache = ValidationCache::new();
        let oracle = CountingOracle::new();
        cache.is_real_word(&oracle, "word", LanguageCode::En).await;
        cache.is_real_word(&oracle, "word", LanguageCode::De).await;
        assert_eq!(oracle.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_failures_cached_as_false() {
        let cache = ValidationCache::new();
        let oracle = CountingOracle::new();
        assert!(!cache.is_real_word(&oracle, "boom", LanguageCode::En).await);
        assert!(!cache.is_real_word(&oracle, "boom", LanguageCode::En).await);
        assert_eq!(oracle.calls.get(), 1);
        assert_eq!(cache.get(LanguageCode::En, "boom"), Some(false));
    }
}
