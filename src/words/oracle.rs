//! Dictionary oracle
//!
//! The oracle answers "is this a word in this language". The remote service
//! is reached through whatever HTTP client the host provides; this module
//! owns the request URL and how a response is read.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;

use once_cell::sync::Lazy;

use crate::language::LanguageCode;

/// Base URL of the public dictionary lookup service
pub const DICTIONARY_API_BASE: &str = "https://api.dictionaryapi.dev/api/v2/entries";

/// Why a lookup produced no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Network failure or similar; the request never completed
    Transport(String),
    /// Any non-success status other than 404
    UnexpectedStatus(u16),
    /// Success status with a body that is not the expected JSON
    Malformed(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::Transport(reason) => write!(f, "dictionary unreachable: {}", reason),
            OracleError::UnexpectedStatus(status) => {
                write!(f, "dictionary returned status {}", status)
            }
            OracleError::Malformed(reason) => write!(f, "dictionary response malformed: {}", reason),
        }
    }
}

impl std::error::Error for OracleError {}

/// Asynchronous "is this a real word" check
pub trait DictionaryOracle {
    /// `word` is lowercase; `locale` comes from [`LanguageCode::dictionary_locale`]
    fn lookup(&self, word: &str, locale: &str) -> impl Future<Output = Result<bool, OracleError>>;
}

/// Lookup URL for a word
pub fn dictionary_lookup_url(word: &str, locale: &str) -> String {
    format!("{}/{}/{}", DICTIONARY_API_BASE, locale, word.to_lowercase())
}

/// Read a lookup response.
///
/// 404 means "not a word". A success status counts only with a non-empty JSON
/// array body. Everything else is an error for the caller to downgrade.
pub fn interpret_lookup_response(status: u16, body: &str) -> Result<bool, OracleError> {
    match status {
        404 => Ok(false),
        200..=299 => {
            let value: serde_json::Value = serde_json::from_str(body)
                .map_err(|e| OracleError::Malformed(e.to_string()))?;
            Ok(value.as_array().is_some_and(|entries| !entries.is_empty()))
        }
        other => Err(OracleError::UnexpectedStatus(other)),
    }
}

/// Common English words accepted without a network
static BUILTIN_ENGLISH: &[&str] = &[
    "able", "acid", "also", "apple", "area", "army", "away", "baby", "back", "ball", "band",
    "bank", "base", "bath", "bear", "beat", "bird", "blue", "boat", "body", "bone", "book",
    "born", "both", "cake", "call", "calm", "came", "camp", "card", "care", "case", "cash",
    "cast", "cat", "city", "club", "coat", "code", "cold", "come", "cook", "cool", "core",
    "dark", "data", "date", "dear", "deep", "desk", "dog", "door", "down", "draw", "drop",
    "earn", "east", "easy", "edge", "else", "even", "face", "fact", "fair", "fall", "farm",
    "fast", "fear", "feel", "file", "fill", "film", "find", "fine", "fire", "fish", "five",
    "game", "gate", "gave", "gift", "girl", "give", "glad", "goal", "gold", "gone", "good",
    "green", "grow", "hair", "half", "hall", "hand", "hard", "hate", "have", "head", "hear",
    "heat", "held", "help", "here", "hero", "high", "hill", "hold", "home", "hope", "horse",
    "house", "idea", "into", "iron", "item", "join", "joke", "jump", "just", "keep", "kind",
    "king", "know", "lake", "land", "last", "late", "lead", "left", "less", "life", "line",
    "lion", "list", "live", "load", "lock", "long", "look", "lose", "lost", "love", "main",
    "make", "male", "many", "mark", "meal", "meat", "meet", "mile", "milk", "mind", "mine",
    "miss", "moon", "more", "most", "move", "much", "name", "near", "neck", "need", "news",
    "next", "nice", "nine", "none", "nose", "note", "once", "only", "open", "over", "page",
    "pain", "pair", "park", "part", "pass", "past", "path", "phone", "pick", "plan", "play",
    "plus", "poem", "pool", "poor", "port", "post", "pull", "pure", "push", "race", "rain",
    "rare", "rate", "read", "real", "rest", "rice", "rich", "ride", "ring", "rise", "risk",
    "road", "rock", "role", "roof", "room", "root", "rose", "rule", "safe", "sail", "salt",
    "same", "sand", "save", "score", "seat", "seed", "seek", "seem", "sell", "send", "ship",
    "shop", "shot", "show", "side", "sign", "sing", "site", "size", "skin", "slow", "snow",
    "soft", "soil", "sold", "song", "soon", "sort", "star", "stay", "step", "stone", "stop",
    "such", "sun", "sure", "tail", "take", "tale", "talk", "tall", "tank", "tape", "task",
    "team", "tear", "tell", "tend", "term", "test", "text", "than", "that", "them", "then",
    "they", "thin", "this", "tide", "time", "tiny", "tone", "tool", "tour", "town", "tree",
    "trip", "true", "tune", "turn", "type", "unit", "upon", "used", "user", "vast", "very",
    "view", "vote", "wait", "wake", "walk", "wall", "want", "warm", "wash", "wave", "weak",
    "wear", "week", "well", "went", "west", "what", "when", "wide", "wife", "wild", "will",
    "wind", "wine", "wing", "wise", "wish", "with", "wood", "word", "work", "world", "yard",
    "year", "zero", "zone",
];

static BUILTIN: Lazy<HashMap<&'static str, HashSet<String>>> = Lazy::new(|| {
    let mut lists = HashMap::new();
    lists.insert(
        LanguageCode::En.dictionary_locale(),
        BUILTIN_ENGLISH.iter().map(|w| w.to_string()).collect(),
    );
    lists
});

/// In-memory oracle backed by word lists, keyed by locale
#[derive(Debug, Clone, Default)]
pub struct WordListOracle {
    words: HashMap<String, HashSet<String>>,
}

impl WordListOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle preloaded with the built-in common word list
    pub fn builtin() -> Self {
        let words = BUILTIN
            .iter()
            .map(|(locale, list)| (locale.to_string(), list.clone()))
            .collect();
        Self { words }
    }

    pub fn with_words<I, S>(mut self, locale: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = self.words.entry(locale.to_string()).or_default();
        list.extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn contains(&self, word: &str, locale: &str) -> bool {
        word.chars().count() >= 2
            && self
                .words
                .get(locale)
                .is_some_and(|list| list.contains(&word.to_lowercase()))
    }
}

impl DictionaryOracle for WordListOracle {
    async fn lookup(&self, word: &str, locale: &str) -> Result<bool, OracleError> {
        Ok(self.contains(word, locale))
    }
}
