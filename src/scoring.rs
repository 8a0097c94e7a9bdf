//! Word scoring
//!
//! The same functions score the live tray preview and the final submission,
//! so the number shown before submitting is the number awarded (before combo
//! and power-up bonuses).

use serde::{Deserialize, Serialize};

use crate::consts::{COMBO_BONUS_STEP, COMBO_MAX_MULTIPLIER, COMBO_WINDOW_SECONDS};
use crate::sim::TrayTile;

/// Sum of tile values with letter multipliers applied
pub fn base_score(tray: &[TrayTile]) -> u32 {
    tray.iter().map(|t| t.value * t.letter_multiplier()).sum()
}

/// Product of every tile's word multiplier (two double-words make x4)
pub fn word_multiplier(tray: &[TrayTile]) -> u32 {
    tray.iter().map(|t| t.word_multiplier()).product()
}

/// Bonus for long words: nothing up to 4 letters, then steeply rising
pub fn length_bonus(length: usize) -> u32 {
    match length {
        0..=4 => 0,
        5 => 4,
        6 => 8,
        7 => 16,
        8 | 9 => 32,
        10 => 64,
        n => 64 + (n - 10) as u32,
    }
}

/// (base + length bonus) x word multiplier
pub fn tray_score(tray: &[TrayTile], word_length: usize) -> u32 {
    (base_score(tray) + length_bonus(word_length)) * word_multiplier(tray)
}

/// Live score breakdown for the tray panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrayBreakdown {
    pub base: u32,
    pub length_bonus: u32,
    pub word_multiplier: u32,
    pub total: u32,
}

impl TrayBreakdown {
    pub fn of(tray: &[TrayTile]) -> Self {
        Self {
            base: base_score(tray),
            length_bonus: length_bonus(tray.len()),
            word_multiplier: word_multiplier(tray),
            total: tray_score(tray, tray.len()),
        }
    }
}

/// Session-level combo escalation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub multiplier: f32,
    pub window_left: u32,
}

impl Default for Combo {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            window_left: 0,
        }
    }
}

impl Combo {
    /// Record an accepted word and return the multiplier that applies to it
    pub fn register_submission(&mut self) -> f32 {
        self.multiplier = if self.window_left > 0 {
            (self.multiplier + COMBO_BONUS_STEP).min(COMBO_MAX_MULTIPLIER)
        } else {
            1.0
        };
        self.window_left = COMBO_WINDOW_SECONDS;
        self.multiplier
    }

    /// Second tick; the multiplier drops back to 1 when the window closes
    pub fn tick_second(&mut self) {
        if self.window_left == 0 {
            return;
        }
        self.window_left -= 1;
        if self.window_left == 0 {
            self.multiplier = 1.0;
        }
    }

    pub fn is_open(&self) -> bool {
        self.window_left > 0
    }
}

/// Bonuses layered on top of the tray score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AwardFactors {
    pub combo: f32,
    /// x2 power-up window running
    pub multiplier_window: bool,
    /// Double-word power-up armed
    pub double_word: bool,
}

/// Final points: round(tray score x combo), then each x2 bonus.
///
/// The double-word power-up is its own factor and composes with tile word
/// multipliers rather than replacing them.
pub fn awarded_points(tray_score: u32, factors: AwardFactors) -> u32 {
    let mut points = (tray_score as f32 * factors.combo).round() as u32;
    if factors.multiplier_window {
        points *= 2;
    }
    if factors.double_word {
        points *= 2;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TileModifier;
    use proptest::prelude::*;

    fn tile(value: u32, modifier: Option<TileModifier>) -> TrayTile {
        TrayTile {
            id: 0,
            letter: 'A',
            value,
            modifier,
            locked: false,
            is_wildcard: false,
        }
    }

    #[test]
    fn test_four_plain_ones() {
        let tray = vec![tile(1, None); 4];
        assert_eq!(tray_score(&tray, 4), 4);
    }

    #[test]
    fn test_word_multiplier_with_length_bonus() {
        let mut tray = vec![tile(1, None); 4];
        tray[2].modifier = Some(TileModifier::DoubleWord);
        let bonus = length_bonus(5);
        assert!(bonus > 0);
        assert_eq!(tray_score(&tray, 5), (4 + bonus) * 2);
    }

    #[test]
    fn test_word_multipliers_stack() {
        let tray = vec![
            tile(1, Some(TileModifier::DoubleWord)),
            tile(1, Some(TileModifier::DoubleWord)),
            tile(1, Some(TileModifier::TripleWord)),
            tile(1, None),
        ];
        assert_eq!(word_multiplier(&tray), 12);
    }

    #[test]
    fn test_letter_multiplier() {
        let tray = vec![
            tile(10, Some(TileModifier::TripleLetter)),
            tile(2, Some(TileModifier::DoubleLetter)),
            tile(1, None),
        ];
        assert_eq!(base_score(&tray), 35);
    }

    #[test]
    fn test_length_bonus_table() {
        assert_eq!(length_bonus(4), 0);
        assert_eq!(length_bonus(5), 4);
        assert_eq!(length_bonus(9), 32);
        assert_eq!(length_bonus(10), 64);
        assert_eq!(length_bonus(13), 67);
    }

    #[test]
    fn test_breakdown_matches_tray_score() {
        let tray = vec![
            tile(3, Some(TileModifier::DoubleWord)),
            tile(1, None),
            tile(4, Some(TileModifier::DoubleLetter)),
            tile(1, None),
            tile(2, None),
        ];
        let breakdown = TrayBreakdown::of(&tray);
        assert_eq!(breakdown.base, 15);
        assert_eq!(breakdown.length_bonus, 4);
        assert_eq!(breakdown.word_multiplier, 2);
        assert_eq!(breakdown.total, tray_score(&tray, 5));
    }

    #[test]
    fn test_combo_saturates() {
        let mut combo = Combo::default();
        let mut last = 0.0;
        for i in 0..9 {
            last = combo.register_submission();
            assert!((last - (1.0 + i as f32 * 0.25)).abs() < 1e-6);
        }
        assert!((last - 3.0).abs() < 1e-6);
        assert!((combo.register_submission() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_combo_resets_after_window() {
        let mut combo = Combo::default();
        combo.register_submission();
        combo.register_submission();
        assert!((combo.multiplier - 1.25).abs() < 1e-6);
        for _ in 0..COMBO_WINDOW_SECONDS {
            combo.tick_second();
        }
        assert!(!combo.is_open());
        assert_eq!(combo.multiplier, 1.0);
        assert_eq!(combo.register_submission(), 1.0);
    }

    #[test]
    fn test_awarded_points_rounding_and_bonuses() {
        let plain = AwardFactors {
            combo: 1.25,
            multiplier_window: false,
            double_word: false,
        };
        assert_eq!(awarded_points(10, plain), 13); // 12.5 rounds up
        let both = AwardFactors {
            multiplier_window: true,
            double_word: true,
            ..plain
        };
        assert_eq!(awarded_points(10, both), 52);
    }

    proptest! {
        #[test]
        fn prop_length_bonus_monotonic(len in 0usize..40) {
            prop_assert!(length_bonus(len + 1) >= length_bonus(len));
        }
    }
}
