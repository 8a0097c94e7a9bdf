//! Tile and power-up factory
//!
//! New entities appear just outside a random field edge and drift inward.

use glam::Vec2;
use rand::Rng;

use super::effects::{PowerUpKind, PowerUpWeights};
use super::entity::MovingEntity;
use super::letters::draw_letter;
use super::state::{PowerUp, Tile, TileModifier};
use crate::consts::*;
use crate::language::LanguageProfile;

/// Field edge an entity enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];
}

/// Random spawn velocity, scaled by the configured speed multiplier
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed_multiplier: f32) -> Vec2 {
    let speed = (SPAWN_SPEED_MIN + rng.random::<f32>() * SPAWN_SPEED_SPREAD) * speed_multiplier;
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Place a new entity just outside a random edge, heading into the field
pub fn spawn_entity<R: Rng + ?Sized>(
    id: u32,
    size: f32,
    speed_multiplier: f32,
    rng: &mut R,
) -> MovingEntity {
    let edge = Edge::ALL[rng.random_range(0..4)];
    spawn_from_edge(id, size, speed_multiplier, edge, rng)
}

pub fn spawn_from_edge<R: Rng + ?Sized>(
    id: u32,
    size: f32,
    speed_multiplier: f32,
    edge: Edge,
    rng: &mut R,
) -> MovingEntity {
    let max = FIELD_SIZE - size;
    let mut vel = random_velocity(rng, speed_multiplier);
    let offset = rng.random::<f32>() * max;

    let pos = match edge {
        Edge::Left => {
            vel.x = vel.x.abs();
            Vec2::new(-size * 0.75, offset)
        }
        Edge::Right => {
            vel.x = -vel.x.abs();
            Vec2::new(FIELD_SIZE - size * 0.25, offset)
        }
        Edge::Top => {
            vel.y = vel.y.abs();
            Vec2::new(offset, -size * 0.75)
        }
        Edge::Bottom => {
            vel.y = -vel.y.abs();
            Vec2::new(offset, FIELD_SIZE - size * 0.25)
        }
    };

    MovingEntity::new(id, pos, vel)
}

/// Map a uniform roll onto the modifier bands
pub fn modifier_for_roll(roll: f64) -> Option<TileModifier> {
    if roll < DOUBLE_LETTER_BAND {
        Some(TileModifier::DoubleLetter)
    } else if roll < TRIPLE_LETTER_BAND {
        Some(TileModifier::TripleLetter)
    } else if roll < DOUBLE_WORD_BAND {
        Some(TileModifier::DoubleWord)
    } else if roll < TRIPLE_WORD_BAND {
        Some(TileModifier::TripleWord)
    } else {
        None
    }
}

pub fn make_tile<R: Rng + ?Sized>(
    id: u32,
    profile: &LanguageProfile,
    speed_multiplier: f32,
    rng: &mut R,
) -> Tile {
    let entity = spawn_entity(id, TILE_SIZE, speed_multiplier, rng);
    let draw = draw_letter(profile, rng);
    let modifier = if draw.is_wildcard() {
        None
    } else {
        modifier_for_roll(rng.random::<f64>())
    };

    log::debug!("Spawned tile {} '{}' ({:?})", id, draw.letter, modifier);

    Tile {
        entity,
        letter: draw.letter,
        value: draw.value,
        modifier,
    }
}

/// Spawn a power-up; `forced` skips the weighted pick
pub fn make_power_up<R: Rng + ?Sized>(
    id: u32,
    forced: Option<PowerUpKind>,
    weights: &PowerUpWeights,
    speed_multiplier: f32,
    rng: &mut R,
) -> PowerUp {
    let entity = spawn_entity(id, POWERUP_SIZE, speed_multiplier, rng);
    let kind = forced.unwrap_or_else(|| weights.pick(rng));

    log::debug!("Spawned power-up {} {:?}", id, kind);

    PowerUp { entity, kind }
}
