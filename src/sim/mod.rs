//! Deterministic simulation module
//!
//! All gameplay state lives here. Given the same seed, settings and inputs
//! the simulation replays identically:
//! - Seeded RNG only, one stream per round
//! - Entity ids from a single allocator owned by the session
//! - No rendering, audio or network dependencies

pub mod effects;
pub mod entity;
pub mod letters;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use effects::{ActiveEffect, EffectKind, EffectTimers, PowerUpKind, PowerUpWeights};
pub use entity::{Advance, Lifecycle, MovingEntity, opacity};
pub use letters::{LetterDraw, draw_letter};
pub use session::{
    GamePhase, PowerUpView, Session, Snapshot, SubmitRejection, SubmitTicket, TileView,
    WordValidation,
};
pub use spawn::{make_power_up, make_tile, spawn_entity};
pub use state::{
    EntityIdAllocator, PowerUp, RngState, SubmittedWord, Tile, TileModifier, TrayTile,
};
pub use tick::{TickInput, second_tick, tick};
