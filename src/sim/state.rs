//! Simulation data model
//!
//! Tiles, power-ups and tray contents, plus the id allocator and RNG seed
//! owned by a match.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::PowerUpKind;
use super::entity::MovingEntity;
use crate::consts::WILDCARD;

/// Scoring badge carried by a tile. A tile has at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileModifier {
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl TileModifier {
    pub fn letter_multiplier(&self) -> u32 {
        match self {
            TileModifier::DoubleLetter => 2,
            TileModifier::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(&self) -> u32 {
        match self {
            TileModifier::DoubleWord => 2,
            TileModifier::TripleWord => 3,
            _ => 1,
        }
    }

    /// Short badge text for the presentation layer
    pub fn badge(&self) -> &'static str {
        match self {
            TileModifier::DoubleLetter => "DL",
            TileModifier::TripleLetter => "TL",
            TileModifier::DoubleWord => "DW",
            TileModifier::TripleWord => "TW",
        }
    }
}

/// A collectible letter tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub entity: MovingEntity,
    pub letter: char,
    pub value: u32,
    pub modifier: Option<TileModifier>,
}

impl Tile {
    pub fn id(&self) -> u32 {
        self.entity.id
    }

    pub fn is_wildcard(&self) -> bool {
        self.letter == WILDCARD
    }
}

/// The single power-up that may be on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub entity: MovingEntity,
    pub kind: PowerUpKind,
}

/// A collected tile sitting in the word tray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrayTile {
    pub id: u32,
    pub letter: char,
    pub value: u32,
    pub modifier: Option<TileModifier>,
    /// Protected from backspace and clear
    pub locked: bool,
    pub is_wildcard: bool,
}

impl TrayTile {
    pub fn from_tile(tile: &Tile, locked: bool) -> Self {
        Self {
            id: tile.id(),
            letter: tile.letter,
            value: tile.value,
            modifier: tile.modifier,
            locked,
            is_wildcard: tile.is_wildcard(),
        }
    }

    /// Wildcard granted directly into the tray by a power-up
    pub fn wildcard(id: u32) -> Self {
        Self {
            id,
            letter: WILDCARD,
            value: 0,
            modifier: None,
            locked: false,
            is_wildcard: true,
        }
    }

    pub fn letter_multiplier(&self) -> u32 {
        self.modifier.map(|m| m.letter_multiplier()).unwrap_or(1)
    }

    pub fn word_multiplier(&self) -> u32 {
        self.modifier.map(|m| m.word_multiplier()).unwrap_or(1)
    }
}

/// An accepted word. Never modified once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedWord {
    pub word: String,
    pub points: u32,
}

/// Hands out unique, increasing entity ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIdAllocator {
    next_id: u32,
}

impl Default for EntityIdAllocator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl EntityIdAllocator {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn peek(&self) -> u32 {
        self.next_id
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// Fresh stream for the next round, same seed
    pub fn next_stream(&mut self) -> Pcg32 {
        self.stream += 1;
        self.to_rng()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::Rng;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = EntityIdAllocator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a, 1);
        assert!(b > a);
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn test_modifier_multipliers() {
        assert_eq!(TileModifier::TripleLetter.letter_multiplier(), 3);
        assert_eq!(TileModifier::TripleLetter.word_multiplier(), 1);
        assert_eq!(TileModifier::DoubleWord.word_multiplier(), 2);
        assert_eq!(TileModifier::DoubleWord.letter_multiplier(), 1);
    }

    #[test]
    fn test_tray_tile_carries_modifier() {
        let tile = Tile {
            entity: MovingEntity::new(5, Vec2::ZERO, Vec2::ZERO),
            letter: 'Q',
            value: 10,
            modifier: Some(TileModifier::DoubleLetter),
        };
        let tray = TrayTile::from_tile(&tile, true);
        assert_eq!(tray.id, 5);
        assert_eq!(tray.letter_multiplier(), 2);
        assert_eq!(tray.word_multiplier(), 1);
        assert!(tray.locked);
        assert!(!tray.is_wildcard);
        assert!(TrayTile::wildcard(9).is_wildcard);
    }

    #[test]
    fn test_rng_streams_differ() {
        let mut state = RngState::new(11);
        let first: u32 = state.to_rng().random();
        let second: u32 = state.next_stream().random();
        assert_ne!(first, second);
        assert_eq!(first, RngState::new(11).to_rng().random::<u32>());
    }
}
