//! Word resolution
//!
//! Turns the tray's letters into a dictionary word: wildcards are expanded
//! into concrete letters (most frequent letters first), and candidates are
//! checked in order until one validates.

use serde::{Deserialize, Serialize};

use super::cache::ValidationCache;
use super::oracle::DictionaryOracle;
use crate::consts::{MAX_CANDIDATES, MAX_WILDCARDS, WILDCARD};
use crate::language::{LanguageCode, LanguageProfile};

/// Every spelling the tray letters could stand for, best guesses first.
///
/// No wildcards yields the literal word; more than [`MAX_WILDCARDS`] yields
/// nothing. The list never exceeds [`MAX_CANDIDATES`].
pub fn wildcard_candidates(letters: &[char], profile: &LanguageProfile) -> Vec<String> {
    let wildcards = letters.iter().filter(|&&c| c == WILDCARD).count();
    if wildcards == 0 {
        return vec![letters.iter().collect()];
    }
    if wildcards > MAX_WILDCARDS {
        return Vec::new();
    }

    let alphabet = profile.letters_by_frequency();
    let mut results = Vec::new();
    let mut current = String::with_capacity(letters.len() * 2);
    expand(letters, alphabet, &mut current, &mut results);
    results
}

fn expand(rest: &[char], alphabet: &[char], current: &mut String, results: &mut Vec<String>) {
    if results.len() >= MAX_CANDIDATES {
        return;
    }
    let Some((&first, tail)) = rest.split_first() else {
        results.push(current.clone());
        return;
    };

    if first != WILDCARD {
        current.push(first);
        expand(tail, alphabet, current, results);
        current.pop();
        return;
    }

    for &letter in alphabet {
        current.push(letter);
        expand(tail, alphabet, current, results);
        current.pop();
        if results.len() >= MAX_CANDIDATES {
            return;
        }
    }
}

/// First candidate the dictionary accepts, uppercased
pub async fn resolve_submitted_word<O: DictionaryOracle>(
    letters: &[char],
    language: LanguageCode,
    oracle: &O,
    cache: &ValidationCache,
) -> Option<String> {
    for candidate in wildcard_candidates(letters, language.profile()) {
        if cache.is_real_word(oracle, &candidate, language).await {
            return Some(candidate.to_uppercase());
        }
    }
    None
}

/// Issues validation sequence numbers; only the newest one may update state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSequence {
    latest: u64,
}

impl ValidationSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// A validation pass captured at the moment it was issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTicket {
    pub seq: u64,
    pub letters: Vec<char>,
    pub language: LanguageCode,
}

/// Result of running a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub seq: u64,
    pub resolved: Option<String>,
}

impl ValidationTicket {
    pub async fn run<O: DictionaryOracle>(
        &self,
        oracle: &O,
        cache: &ValidationCache,
    ) -> ValidationOutcome {
        let resolved = resolve_submitted_word(&self.letters, self.language, oracle, cache).await;
        ValidationOutcome {
            seq: self.seq,
            resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LetterEntry;
    use crate::words::oracle::{OracleError, WordListOracle};
    use proptest::prelude::*;
    use std::cell::RefCell;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_no_wildcards_is_literal() {
        let out = wildcard_candidates(&chars("GAME"), LanguageCode::En.profile());
        assert_eq!(out, vec!["GAME".to_string()]);
    }

    #[test]
    fn test_too_many_wildcards() {
        let out = wildcard_candidates(&chars("G***"), LanguageCode::En.profile());
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_wildcard_most_frequent_first() {
        let profile = LanguageCode::En.profile();
        let out = wildcard_candidates(&chars("G*ME"), profile);
        assert_eq!(out.len(), 26);
        assert_eq!(out[0], "GEME");
        assert!(out.contains(&"GAME".to_string()));
    }

    #[test]
    fn test_two_wildcards_english() {
        let out = wildcard_candidates(&chars("*A*E"), LanguageCode::En.profile());
        assert_eq!(out.len(), 26 * 26);
    }

    #[test]
    fn test_candidate_cap() {
        // 33 letters squared is well past the cap
        let out = wildcard_candidates(&chars("**ОТ"), LanguageCode::Ru.profile());
        assert_eq!(out.len(), MAX_CANDIDATES);
    }

    #[test]
    fn test_custom_profile_order() {
        let profile = LanguageProfile::from_entries(vec![
            LetterEntry {
                letter: 'X',
                value: 8,
                weight: 1,
            },
            LetterEntry {
                letter: 'O',
                value: 1,
                weight: 9,
            },
        ]);
        assert_eq!(wildcard_candidates(&chars("B*X"), &profile), vec!["BOX", "BXX"]);
    }

    #[tokio::test]
    async fn test_resolve_expands_wildcard() {
        let oracle = WordListOracle::builtin();
        let cache = ValidationCache::new();
        let word = resolve_submitted_word(&chars("G*ME"), LanguageCode::En, &oracle, &cache).await;
        assert_eq!(word.as_deref(), Some("GAME"));
        let none = resolve_submitted_word(&chars("QXZJ"), LanguageCode::En, &oracle, &cache).await;
        assert_eq!(none, None);
    }

    struct RecordingOracle {
        asked: RefCell<Vec<String>>,
    }

    impl DictionaryOracle for RecordingOracle {
        async fn lookup(&self, word: &str, _locale: &str) -> Result<bool, OracleError> {
            self.asked.borrow_mut().push(word.to_string());
            Ok(word == "tree")
        }
    }

    #[tokio::test]
    async fn test_resolution_stops_at_first_hit() {
        let oracle = RecordingOracle {
            asked: RefCell::new(Vec::new()),
        };
        let cache = ValidationCache::new();
        let word = resolve_submitted_word(&chars("TR*E"), LanguageCode::En, &oracle, &cache).await;
        assert_eq!(word.as_deref(), Some("TREE"));
        let asked = oracle.asked.borrow();
        // E is the most frequent English letter, so it is tried first
        assert_eq!(asked.as_slice(), ["tree"]);
    }

    #[tokio::test]
    async fn test_ticket_carries_sequence() {
        let mut seq = ValidationSequence::default();
        let oracle = WordListOracle::builtin();
        let cache = ValidationCache::new();
        let ticket = ValidationTicket {
            seq: seq.issue(),
            letters: chars("WORD"),
            language: LanguageCode::En,
        };
        let outcome = ticket.run(&oracle, &cache).await;
        assert_eq!(outcome.seq, 1);
        assert!(seq.is_current(outcome.seq));
        seq.issue();
        assert!(!seq.is_current(outcome.seq));
    }

    proptest! {
        #[test]
        fn prop_candidates_bounded(word in "[A-Z*]{0,8}") {
            let letters: Vec<char> = word.chars().collect();
            let out = wildcard_candidates(&letters, LanguageCode::En.profile());
            prop_assert!(out.len() <= MAX_CANDIDATES);
            for candidate in &out {
                prop_assert_eq!(candidate.chars().count(), letters.len());
                prop_assert!(!candidate.contains(WILDCARD));
            }
        }
    }
}
