//! Weighted letter generation
//!
//! Roulette selection over a language profile's frequency weights, with a
//! small fixed chance of drawing a wildcard instead.

use rand::Rng;

use crate::consts::{WILDCARD, WILDCARD_PROBABILITY};
use crate::language::LanguageProfile;

/// Result of a single letter draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterDraw {
    pub letter: char,
    pub value: u32,
}

impl LetterDraw {
    pub fn wildcard() -> Self {
        Self {
            letter: WILDCARD,
            value: 0,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.letter == WILDCARD
    }
}

/// Draw one letter (or the wildcard marker) from the profile
pub fn draw_letter<R: Rng + ?Sized>(profile: &LanguageProfile, rng: &mut R) -> LetterDraw {
    draw_letter_with(profile, WILDCARD_PROBABILITY, rng)
}

/// Draw with an explicit wildcard probability
pub fn draw_letter_with<R: Rng + ?Sized>(
    profile: &LanguageProfile,
    wildcard_probability: f64,
    rng: &mut R,
) -> LetterDraw {
    if wildcard_probability > 0.0 && rng.random::<f64>() < wildcard_probability {
        return LetterDraw::wildcard();
    }

    let entries = profile.entries();
    let Some(first) = entries.first() else {
        return LetterDraw::wildcard();
    };

    let mut pick = rng.random::<f64>() * profile.total_weight() as f64;
    for entry in entries {
        let weight = entry.weight as f64;
        if pick < weight {
            return LetterDraw {
                letter: entry.letter,
                value: entry.value,
            };
        }
        pick -= weight;
    }

    // Rounding left the pick past the last bucket
    LetterDraw {
        letter: first.letter,
        value: first.value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{LanguageCode, LetterEntry};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_seeded_draws_are_deterministic() {
        let profile = LanguageCode::En.profile();
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(draw_letter(profile, &mut a), draw_letter(profile, &mut b));
        }
    }

    #[test]
    fn test_draws_follow_weights() {
        let profile = LanguageCode::En.profile();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts: HashMap<char, u32> = HashMap::new();
        for _ in 0..20_000 {
            let draw = draw_letter_with(profile, 0.0, &mut rng);
            *counts.entry(draw.letter).or_insert(0) += 1;
        }
        // E (weight 18) should be drawn far more often than Z (weight 1)
        assert!(counts[&'E'] > counts.get(&'Z').copied().unwrap_or(0) * 5);
        assert!(!counts.contains_key(&WILDCARD));
    }

    #[test]
    fn test_draw_values_match_profile() {
        let profile = LanguageCode::De.profile();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let draw = draw_letter(profile, &mut rng);
            if draw.is_wildcard() {
                assert_eq!(draw.value, 0);
            } else {
                assert_eq!(profile.value_of(draw.letter), Some(draw.value));
            }
        }
    }

    #[test]
    fn test_wildcard_probability_one() {
        let profile = LanguageCode::Fr.profile();
        let mut rng = Pcg32::seed_from_u64(1);
        let draw = draw_letter_with(profile, 1.0, &mut rng);
        assert_eq!(draw, LetterDraw::wildcard());
    }

    #[test]
    fn test_single_entry_profile() {
        let profile = LanguageProfile::from_entries(vec![LetterEntry {
            letter: 'K',
            value: 5,
            weight: 3,
        }]);
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(draw_letter_with(&profile, 0.0, &mut rng).letter, 'K');
        }
    }
}
