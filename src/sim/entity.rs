//! Moving entity physics
//!
//! Tiles and power-ups are axis-aligned squares that drift across the field,
//! bounce off its walls and leave once they have bounced too often. Position
//! is the top-left corner; the field spans `[0, FIELD_SIZE]` on both axes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_SIZE, MAGNET_ACCEL, TRANSITION_SECONDS};
use crate::square_center;

/// Entry/exit phase of a moving entity. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Fading in after spawning
    Entering,
    /// Fully visible and bouncing
    Active,
    /// Bounced out; fading and leaving the field
    Exiting,
}

/// Outcome of advancing an entity by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Alive,
    Removed,
}

/// Shared state of every bouncing square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingEntity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub bounces: u32,
    pub lifecycle: Lifecycle,
    /// Seconds spent in the current lifecycle state
    pub state_age: f32,
}

/// Which side of an axis a wall hit happened on
enum Wall {
    Low,
    High,
}

impl MovingEntity {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            bounces: 0,
            lifecycle: Lifecycle::Entering,
            state_age: 0.0,
        }
    }

    /// Integrate one step.
    ///
    /// Pass `u32::MAX` as `max_bounces` to keep the entity bouncing forever.
    pub fn advance(&mut self, size: f32, dt: f32, max_bounces: u32) -> Advance {
        self.state_age += dt;
        self.pos += self.vel * dt;

        if self.lifecycle == Lifecycle::Entering && self.state_age >= TRANSITION_SECONDS {
            self.lifecycle = Lifecycle::Active;
            self.state_age = 0.0;
        }

        if self.lifecycle == Lifecycle::Exiting {
            if self.is_outside_field(size) || self.state_age >= TRANSITION_SECONDS {
                return Advance::Removed;
            }
            return Advance::Alive;
        }

        let limit = FIELD_SIZE - size;
        let exited_on_x = self.collide_axis(0, limit, max_bounces);
        // One exit per step: skip Y once X has started the exit
        if !exited_on_x {
            self.collide_axis(1, limit, max_bounces);
        }

        Advance::Alive
    }

    /// Resolve a wall hit on one axis. Returns true if the hit started an exit.
    fn collide_axis(&mut self, axis: usize, limit: f32, max_bounces: u32) -> bool {
        let wall = if self.pos[axis] <= 0.0 {
            Wall::Low
        } else if self.pos[axis] >= limit {
            Wall::High
        } else {
            return false;
        };

        self.bounces = self.bounces.saturating_add(1);
        let exiting = self.bounces > max_bounces;

        match (wall, exiting) {
            (Wall::Low, true) => {
                self.pos[axis] = -2.0;
                self.vel[axis] = -self.vel[axis].abs();
            }
            (Wall::Low, false) => {
                self.pos[axis] = 0.0;
                self.vel[axis] = self.vel[axis].abs();
            }
            (Wall::High, true) => {
                self.pos[axis] = limit + 2.0;
                self.vel[axis] = self.vel[axis].abs();
            }
            (Wall::High, false) => {
                self.pos[axis] = limit;
                self.vel[axis] = -self.vel[axis].abs();
            }
        }

        if exiting {
            self.lifecycle = Lifecycle::Exiting;
            self.state_age = 0.0;
        }
        exiting
    }

    fn is_outside_field(&self, size: f32) -> bool {
        let low = -size * 1.2;
        let high = FIELD_SIZE + size * 0.2;
        self.pos.x < low || self.pos.x > high || self.pos.y < low || self.pos.y > high
    }

    /// Accelerate toward a pointer (magnet effect). Exiting entities are left alone.
    pub fn pull_toward(&mut self, size: f32, target: Vec2, dt: f32) {
        if self.lifecycle == Lifecycle::Exiting {
            return;
        }
        let delta = target - square_center(self.pos, size);
        let dist = delta.length();
        let dir = if dist > 0.0 { delta / dist } else { delta };
        self.vel += dir * MAGNET_ACCEL * dt;
    }

    pub fn opacity(&self) -> f32 {
        opacity(self.lifecycle, self.state_age)
    }

    /// Whether a point (e.g. a click) lands on this square
    pub fn contains(&self, size: f32, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + size
            && point.y >= self.pos.y
            && point.y <= self.pos.y + size
    }
}

/// Render opacity for a lifecycle state: linear fade in, linear fade out
pub fn opacity(lifecycle: Lifecycle, state_age: f32) -> f32 {
    match lifecycle {
        Lifecycle::Entering => (state_age / TRANSITION_SECONDS).min(1.0),
        Lifecycle::Active => 1.0,
        Lifecycle::Exiting => (1.0 - state_age / TRANSITION_SECONDS).max(0.0),
    }
}
