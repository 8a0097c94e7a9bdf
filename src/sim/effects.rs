//! Power-up catalog and timed effects
//!
//! Timed effects are whole-second countdowns, decremented once per second
//! tick and never below zero.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_EFFECT_SECONDS;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    /// Clear the field and refill it tile by tile
    Bomb,
    /// Double points and double the tile count for a while
    Multiplier,
    /// Stop all movement
    Freeze,
    /// Protect the tray from backspace and clear
    Shield,
    /// Tiles bounce forever instead of leaving
    Wall,
    /// Add a wildcard tile to the tray
    Wild,
    /// Replace every 1-point tile on the field
    Reroll,
    /// Slow the simulation down
    Slow,
    /// Double the next valid word
    Double,
    /// Pull tiles toward the pointer
    Magnet,
    /// Add seconds to the round clock
    ExtraTime,
    /// Lock the next collected tile into the tray
    Lock,
    /// Replace every rare (8+ point) tile on the field
    Purge,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 13] = [
        PowerUpKind::Bomb,
        PowerUpKind::Multiplier,
        PowerUpKind::Freeze,
        PowerUpKind::Shield,
        PowerUpKind::Wall,
        PowerUpKind::Wild,
        PowerUpKind::Reroll,
        PowerUpKind::Slow,
        PowerUpKind::Double,
        PowerUpKind::Magnet,
        PowerUpKind::ExtraTime,
        PowerUpKind::Lock,
        PowerUpKind::Purge,
    ];

    /// Requested duration for timed kinds (before the global cap)
    pub fn duration_seconds(&self) -> Option<u32> {
        match self {
            PowerUpKind::Multiplier => Some(12),
            PowerUpKind::Freeze => Some(5),
            PowerUpKind::Shield => Some(10),
            PowerUpKind::Wall => Some(15),
            PowerUpKind::Slow => Some(8),
            PowerUpKind::Magnet => Some(8),
            PowerUpKind::Double | PowerUpKind::Lock => Some(MAX_EFFECT_SECONDS),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Bomb => "BOMB",
            PowerUpKind::Multiplier => "x2",
            PowerUpKind::Freeze => "FRZ",
            PowerUpKind::Shield => "SHD",
            PowerUpKind::Wall => "WALL",
            PowerUpKind::Wild => "*",
            PowerUpKind::Reroll => "RR",
            PowerUpKind::Slow => "SLOW",
            PowerUpKind::Double => "DW",
            PowerUpKind::Magnet => "MAG",
            PowerUpKind::ExtraTime => "+10",
            PowerUpKind::Lock => "LOCK",
            PowerUpKind::Purge => "PRG",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0)
    }
}

/// Relative spawn weights per power-up kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpWeights {
    weights: [u32; 13],
}

impl Default for PowerUpWeights {
    fn default() -> Self {
        Self { weights: [1; 13] }
    }
}

impl PowerUpWeights {
    /// Only the listed kinds, equally weighted
    pub fn only(kinds: &[PowerUpKind]) -> Self {
        let mut weights = [0; 13];
        for kind in kinds {
            weights[kind.index()] = 1;
        }
        Self { weights }
    }

    pub fn with(mut self, kind: PowerUpKind, weight: u32) -> Self {
        self.weights[kind.index()] = weight;
        self
    }

    pub fn weight(&self, kind: PowerUpKind) -> u32 {
        self.weights[kind.index()]
    }

    /// Roulette pick; an all-zero table falls back to a bomb
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> PowerUpKind {
        let total: u32 = self.weights.iter().sum();
        if total == 0 {
            return PowerUpKind::Bomb;
        }
        let mut roll = rng.random_range(0..total);
        for (kind, &weight) in PowerUpKind::ALL.iter().zip(self.weights.iter()) {
            if roll < weight {
                return *kind;
            }
            roll -= weight;
        }
        PowerUpKind::Bomb
    }
}

/// Effects shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Multiplier,
    Freeze,
    Shield,
    Wall,
    Slow,
    Magnet,
    DoubleWord,
    Lock,
}

/// One running effect for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub seconds_left: u32,
    /// Lock charges; zero for every other effect
    pub charges: u32,
}

/// Countdown per timed effect, in whole seconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTimers {
    pub multiplier: u32,
    pub freeze: u32,
    pub shield: u32,
    pub wall: u32,
    pub slow: u32,
    pub magnet: u32,
    pub double_word: u32,
    pub lock: u32,
    pub lock_charges: u32,
}

impl EffectTimers {
    /// Start or extend a timed effect. Totals never pass the global cap.
    pub fn extend(&mut self, kind: EffectKind, seconds: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(seconds).min(MAX_EFFECT_SECONDS);
    }

    fn slot_mut(&mut self, kind: EffectKind) -> &mut u32 {
        match kind {
            EffectKind::Multiplier => &mut self.multiplier,
            EffectKind::Freeze => &mut self.freeze,
            EffectKind::Shield => &mut self.shield,
            EffectKind::Wall => &mut self.wall,
            EffectKind::Slow => &mut self.slow,
            EffectKind::Magnet => &mut self.magnet,
            EffectKind::DoubleWord => &mut self.double_word,
            EffectKind::Lock => &mut self.lock,
        }
    }

    /// Second tick. Returns true when the lock window just ran out.
    pub fn tick_second(&mut self) -> bool {
        self.multiplier = self.multiplier.saturating_sub(1);
        self.freeze = self.freeze.saturating_sub(1);
        self.shield = self.shield.saturating_sub(1);
        self.wall = self.wall.saturating_sub(1);
        self.slow = self.slow.saturating_sub(1);
        self.magnet = self.magnet.saturating_sub(1);
        self.double_word = self.double_word.saturating_sub(1);

        if self.lock == 0 {
            return false;
        }
        self.lock -= 1;
        if self.lock == 0 {
            self.lock_charges = 0;
            return true;
        }
        false
    }

    pub fn is_multiplier_active(&self) -> bool {
        self.multiplier > 0
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze > 0
    }

    pub fn is_shielded(&self) -> bool {
        self.shield > 0
    }

    pub fn is_wall_active(&self) -> bool {
        self.wall > 0
    }

    pub fn is_slowed(&self) -> bool {
        self.slow > 0
    }

    pub fn is_magnet_active(&self) -> bool {
        self.magnet > 0
    }

    pub fn is_double_word_ready(&self) -> bool {
        self.double_word > 0
    }

    /// Spend a lock charge if one is available
    pub fn take_lock_charge(&mut self) -> bool {
        if self.lock_charges == 0 {
            return false;
        }
        self.lock_charges -= 1;
        true
    }

    pub fn active(&self) -> Vec<ActiveEffect> {
        let timed = [
            (EffectKind::Multiplier, self.multiplier),
            (EffectKind::Freeze, self.freeze),
            (EffectKind::Shield, self.shield),
            (EffectKind::Wall, self.wall),
            (EffectKind::Slow, self.slow),
            (EffectKind::Magnet, self.magnet),
            (EffectKind::DoubleWord, self.double_word),
        ];
        let mut effects: Vec<ActiveEffect> = timed
            .into_iter()
            .filter(|(_, left)| *left > 0)
            .map(|(kind, seconds_left)| ActiveEffect {
                kind,
                seconds_left,
                charges: 0,
            })
            .collect();
        if self.lock_charges > 0 {
            effects.push(ActiveEffect {
                kind: EffectKind::Lock,
                seconds_left: self.lock,
                charges: self.lock_charges,
            });
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_extend_caps_duration() {
        let mut timers = EffectTimers::default();
        timers.extend(EffectKind::Freeze, 5);
        assert_eq!(timers.freeze, 5);
        timers.extend(EffectKind::Freeze, 100);
        assert_eq!(timers.freeze, MAX_EFFECT_SECONDS);
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut timers = EffectTimers::default();
        timers.extend(EffectKind::Slow, 1);
        timers.tick_second();
        timers.tick_second();
        assert_eq!(timers.slow, 0);
        assert!(!timers.is_slowed());
    }

    #[test]
    fn test_lock_expiry_drops_charges() {
        let mut timers = EffectTimers::default();
        timers.lock_charges = 2;
        timers.extend(EffectKind::Lock, 2);
        assert!(!timers.tick_second());
        assert_eq!(timers.lock_charges, 2);
        assert!(timers.tick_second());
        assert_eq!(timers.lock_charges, 0);
        assert!(!timers.tick_second());
    }

    #[test]
    fn test_active_lists_running_effects() {
        let mut timers = EffectTimers::default();
        timers.extend(EffectKind::Magnet, 8);
        timers.lock_charges = 1;
        timers.extend(EffectKind::Lock, 30);
        let active = timers.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].kind, EffectKind::Magnet);
        assert_eq!(active[1].charges, 1);
    }

    #[test]
    fn test_weighted_pick_respects_zero_weights() {
        let weights = PowerUpWeights::only(&[PowerUpKind::Wall, PowerUpKind::Freeze]);
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let kind = weights.pick(&mut rng);
            assert!(matches!(kind, PowerUpKind::Wall | PowerUpKind::Freeze));
        }
    }

    #[test]
    fn test_default_weights_cover_catalog() {
        let weights = PowerUpWeights::default();
        let mut rng = Pcg32::seed_from_u64(8);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(weights.pick(&mut rng));
        }
        assert_eq!(seen.len(), PowerUpKind::ALL.len());
    }

    #[test]
    fn test_empty_weights_fall_back_to_bomb() {
        let weights = PowerUpWeights::only(&[]);
        let mut rng = Pcg32::seed_from_u64(2);
        assert_eq!(weights.pick(&mut rng), PowerUpKind::Bomb);
    }
}
