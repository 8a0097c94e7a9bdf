//! Per-language letter tables
//!
//! Every language contributes a value table (tile points) and a small bonus
//! table for very common letters. Frequency weights are derived the same way
//! for every language: rare, valuable letters are drawn less often.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Supported game languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    De,
    Fr,
    It,
    Ru,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 5] = [
        LanguageCode::En,
        LanguageCode::De,
        LanguageCode::Fr,
        LanguageCode::It,
        LanguageCode::Ru,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::De => "de",
            LanguageCode::Fr => "fr",
            LanguageCode::It => "it",
            LanguageCode::Ru => "ru",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(LanguageCode::En),
            "de" | "deutsch" | "german" => Some(LanguageCode::De),
            "fr" | "francais" | "français" | "french" => Some(LanguageCode::Fr),
            "it" | "italiano" | "italian" => Some(LanguageCode::It),
            "ru" | "russian" => Some(LanguageCode::Ru),
            _ => None,
        }
    }

    /// Locale passed to the dictionary service
    pub fn dictionary_locale(&self) -> &'static str {
        self.as_str()
    }

    /// Letter table for this language
    pub fn profile(&self) -> &'static LanguageProfile {
        match self {
            LanguageCode::En => &ENGLISH,
            LanguageCode::De => &GERMAN,
            LanguageCode::Fr => &FRENCH,
            LanguageCode::It => &ITALIAN,
            LanguageCode::Ru => &RUSSIAN,
        }
    }
}

/// One drawable letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterEntry {
    pub letter: char,
    pub value: u32,
    pub weight: u32,
}

/// Letter values and draw weights for one language
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    entries: Vec<LetterEntry>,
    total_weight: u32,
    /// Letters sorted by descending weight (ties keep table order)
    by_frequency: Vec<char>,
}

impl LanguageProfile {
    /// Build a profile from point values plus a bonus for common letters.
    ///
    /// Weight = max(1, round(14 / value)) + bonus.
    pub fn from_values(values: &[(char, u32)], common_bonus: &[(char, u32)]) -> Self {
        let entries: Vec<LetterEntry> = values
            .iter()
            .map(|&(letter, value)| {
                let inverse = (14.0 / value.max(1) as f32).round().max(1.0) as u32;
                let bonus = common_bonus
                    .iter()
                    .find(|(c, _)| *c == letter)
                    .map(|(_, b)| *b)
                    .unwrap_or(0);
                LetterEntry {
                    letter,
                    value,
                    weight: inverse + bonus,
                }
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Build a profile from explicit entries
    pub fn from_entries(entries: Vec<LetterEntry>) -> Self {
        let total_weight = entries.iter().map(|e| e.weight).sum();
        let mut ranked: Vec<&LetterEntry> = entries.iter().collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
        let by_frequency = ranked.iter().map(|e| e.letter).collect();
        Self {
            entries,
            total_weight,
            by_frequency,
        }
    }

    pub fn entries(&self) -> &[LetterEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Alphabet ordered most-frequent first
    pub fn letters_by_frequency(&self) -> &[char] {
        &self.by_frequency
    }

    /// Point value of a letter, if it belongs to this alphabet
    pub fn value_of(&self, letter: char) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.letter == letter)
            .map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static ENGLISH: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::from_values(
        &[
            ('A', 1), ('B', 3), ('C', 3), ('D', 2), ('E', 1), ('F', 4), ('G', 2),
            ('H', 4), ('I', 1), ('J', 8), ('K', 5), ('L', 1), ('M', 3), ('N', 1),
            ('O', 1), ('P', 3), ('Q', 10), ('R', 1), ('S', 1), ('T', 1), ('U', 1),
            ('V', 4), ('W', 4), ('X', 8), ('Y', 4), ('Z', 10),
        ],
        &[
            ('E', 4), ('T', 3), ('A', 3), ('O', 3), ('I', 2), ('N', 2), ('R', 2),
            ('S', 2), ('H', 1), ('L', 1), ('D', 1), ('U', 1),
        ],
    )
});

static GERMAN: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::from_values(
        &[
            ('A', 1), ('Ä', 6), ('B', 3), ('C', 4), ('D', 1), ('E', 1), ('F', 4),
            ('G', 2), ('H', 2), ('I', 1), ('J', 6), ('K', 4), ('L', 2), ('M', 3),
            ('N', 1), ('O', 2), ('Ö', 8), ('P', 4), ('Q', 10), ('R', 1), ('S', 1),
            ('T', 1), ('U', 1), ('Ü', 6), ('V', 6), ('W', 3), ('X', 8), ('Y', 10),
            ('Z', 3),
        ],
        &[
            ('E', 5), ('N', 3), ('I', 2), ('S', 2), ('R', 2), ('A', 2), ('T', 2),
            ('D', 1), ('H', 1), ('U', 1),
        ],
    )
});

static FRENCH: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::from_values(
        &[
            ('A', 1), ('B', 3), ('C', 3), ('D', 2), ('E', 1), ('F', 4), ('G', 2),
            ('H', 4), ('I', 1), ('J', 8), ('K', 10), ('L', 1), ('M', 2), ('N', 1),
            ('O', 1), ('P', 3), ('Q', 8), ('R', 1), ('S', 1), ('T', 1), ('U', 1),
            ('V', 4), ('W', 10), ('X', 10), ('Y', 10), ('Z', 10),
        ],
        &[
            ('E', 5), ('A', 3), ('S', 3), ('I', 2), ('N', 2), ('T', 2), ('R', 2),
            ('U', 2), ('L', 1), ('O', 1),
        ],
    )
});

static ITALIAN: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::from_values(
        &[
            ('A', 1), ('B', 4), ('C', 1), ('D', 4), ('E', 1), ('F', 4), ('G', 4),
            ('H', 8), ('I', 1), ('L', 2), ('M', 2), ('N', 2), ('O', 1), ('P', 3),
            ('Q', 10), ('R', 1), ('S', 1), ('T', 1), ('U', 4), ('V', 4), ('Z', 8),
        ],
        &[
            ('E', 3), ('A', 3), ('I', 3), ('O', 3), ('N', 1), ('R', 1), ('T', 1),
            ('L', 1),
        ],
    )
});

static RUSSIAN: Lazy<LanguageProfile> = Lazy::new(|| {
    LanguageProfile::from_values(
        &[
            ('А', 1), ('Б', 3), ('В', 1), ('Г', 3), ('Д', 2), ('Е', 1), ('Ё', 3),
            ('Ж', 5), ('З', 5), ('И', 1), ('Й', 4), ('К', 2), ('Л', 2), ('М', 2),
            ('Н', 1), ('О', 1), ('П', 2), ('Р', 1), ('С', 1), ('Т', 1), ('У', 2),
            ('Ф', 10), ('Х', 5), ('Ц', 5), ('Ч', 5), ('Ш', 8), ('Щ', 10), ('Ъ', 10),
            ('Ы', 4), ('Ь', 3), ('Э', 8), ('Ю', 8), ('Я', 3),
        ],
        &[
            ('О', 4), ('Е', 3), ('А', 3), ('И', 2), ('Н', 2), ('Т', 2), ('С', 2),
            ('Р', 1), ('В', 1),
        ],
    )
});
