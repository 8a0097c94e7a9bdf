//! Bounce Words - an arcade word-building game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity physics, spawning, effects, match state)
//! - `words`: Wildcard expansion and dictionary validation with caching
//! - `scoring`: Tray scoring and combo escalation
//! - `rounds`: Round goals and pacing
//! - `settings`: Enumerated configuration and difficulty presets
//! - `language`: Per-language letter tables

pub mod language;
pub mod rounds;
pub mod scoring;
pub mod settings;
pub mod sim;
pub mod status;
pub mod words;

pub use language::{LanguageCode, LanguageProfile};
pub use settings::{DifficultyPreset, Settings};
pub use status::StatusMessage;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Side length of the square play field (pixels)
    pub const FIELD_SIZE: f32 = 480.0;
    /// Letter tile edge length
    pub const TILE_SIZE: f32 = 42.0;
    /// Power-up edge length
    pub const POWERUP_SIZE: f32 = 42.0;

    /// Fade in/out duration for entering and exiting entities (seconds)
    pub const TRANSITION_SECONDS: f32 = 0.24;
    /// Largest frame delta the simulation will integrate in one step
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Spawn speed range before the speed multiplier (pixels/s)
    pub const SPAWN_SPEED_MIN: f32 = 80.0;
    pub const SPAWN_SPEED_SPREAD: f32 = 130.0;

    /// Chance that a letter draw yields a wildcard
    pub const WILDCARD_PROBABILITY: f64 = 0.02;
    /// Marker used for wildcard letters
    pub const WILDCARD: char = '*';

    /// Tile modifier probability bands (cumulative upper bounds)
    pub const DOUBLE_LETTER_BAND: f64 = 0.08;
    pub const TRIPLE_LETTER_BAND: f64 = 0.11;
    pub const DOUBLE_WORD_BAND: f64 = 0.15;
    pub const TRIPLE_WORD_BAND: f64 = 0.165;

    /// Shortest tray that may be submitted
    pub const MIN_WORD_LENGTH: usize = 4;
    /// More wildcards than this resolve to nothing
    pub const MAX_WILDCARDS: usize = 2;
    /// Upper bound on expanded wildcard candidates
    pub const MAX_CANDIDATES: usize = 700;
    /// Delay between a tray change and the validation pass (seconds)
    pub const VALIDATION_DEBOUNCE_SECONDS: f32 = 0.22;

    /// Combo escalation
    pub const COMBO_WINDOW_SECONDS: u32 = 8;
    pub const COMBO_BONUS_STEP: f32 = 0.25;
    pub const COMBO_MAX_MULTIPLIER: f32 = 3.0;

    /// Round goals: 45 points in round 1, +15 per round after that
    pub const GOAL_BASE_SCORE: u32 = 45;
    pub const GOAL_STEP_SCORE: u32 = 15;
    /// Extra simulation speed per round beyond the first
    pub const ROUND_PACE_STEP: f32 = 0.08;
    /// Floor for the pace-scaled power-up respawn delay (ms)
    pub const MIN_POWERUP_RESPAWN_MS: u32 = 650;

    /// Longest any timed effect may run (seconds)
    pub const MAX_EFFECT_SECONDS: u32 = 30;
    /// Bomb refresh: one tile every 130 ms until the field is full again
    pub const REFRESH_SPAWN_SECONDS: f32 = 0.13;
    /// Power-up delay once a bomb refresh completes
    pub const REFRESH_POWERUP_DELAY_SECONDS: f32 = 0.25;
    /// Seconds granted by the extra-time power-up
    pub const EXTRA_TIME_SECONDS: u32 = 10;
    /// Speed factor while slow time is active
    pub const SLOW_FACTOR: f32 = 0.45;
    /// Magnet pull toward the pointer (pixels/s^2)
    pub const MAGNET_ACCEL: f32 = 230.0;
}

/// Center of an axis-aligned square given its top-left corner
#[inline]
pub fn square_center(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}
