//! Simulation ticks
//!
//! `tick` runs once per rendered frame with the real frame delta. It moves
//! entities, runs the bomb refresh and power-up respawn, counts down the
//! validation debounce, and feeds whole seconds to `second_tick`, which owns
//! the round clock and effect timers.

use glam::Vec2;

use super::entity::Advance;
use super::session::{GamePhase, Session};
use crate::consts::*;
use crate::status::StatusMessage;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in field coordinates; `None` when outside the field
    pub pointer: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.pause {
        session.toggle_pause();
    }
    if session.phase != GamePhase::Running {
        return;
    }

    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    step_validation_debounce(session, dt);
    step_tiles(session, input, dt);
    step_refresh(session, dt);
    step_power_up(session, dt);

    session.second_accumulator += dt;
    while session.second_accumulator >= 1.0 && session.phase == GamePhase::Running {
        session.second_accumulator -= 1.0;
        second_tick(session);
    }
}

/// One second of game time: round clock, combo window and effect timers
pub fn second_tick(session: &mut Session) {
    session.combo.tick_second();

    if session.effects.tick_second() {
        log::debug!("Lock window expired");
        session.unlock_tray();
    }

    if session.time_left <= 1 {
        session.finish_round();
    } else {
        session.time_left -= 1;
    }
}

fn step_validation_debounce(session: &mut Session, dt: f32) {
    if let Some(pending) = session.pending_validation.as_mut() {
        pending.debounce_left = (pending.debounce_left - dt).max(0.0);
    }
}

/// Simulation delta after freeze, slow and round pace
fn field_dt(session: &Session, dt: f32) -> f32 {
    let factor = if session.effects.is_frozen() {
        0.0
    } else if session.effects.is_slowed() {
        SLOW_FACTOR
    } else {
        1.0
    };
    dt * factor * session.pace()
}

fn step_tiles(session: &mut Session, input: &TickInput, dt: f32) {
    let sim_dt = field_dt(session, dt);
    let max_bounces = if session.effects.is_wall_active() {
        u32::MAX
    } else {
        session.settings.max_bounces.get()
    };
    let magnet = input
        .pointer
        .filter(|_| session.effects.is_magnet_active());

    // Frozen: nothing moves, ages or bounces
    if sim_dt > 0.0 {
        session.tiles.retain_mut(|tile| {
            if let Some(target) = magnet {
                tile.entity.pull_toward(TILE_SIZE, target, sim_dt);
            }
            tile.entity.advance(TILE_SIZE, sim_dt, max_bounces) == Advance::Alive
        });
    }

    if !session.is_refreshing() {
        session.replenish_tiles();
    }
}

/// Bomb refresh: drop tiles in one at a time until the field is full
fn step_refresh(session: &mut Session, dt: f32) {
    let Some(mut next_spawn) = session.refresh else {
        return;
    };

    next_spawn -= dt;
    while next_spawn <= 0.0 && session.tiles.len() < session.tile_target() {
        session.spawn_tile();
        next_spawn += REFRESH_SPAWN_SECONDS;
    }

    if session.tiles.len() >= session.tile_target() {
        session.refresh = None;
        session.power_up_respawn_left = REFRESH_POWERUP_DELAY_SECONDS;
        session.status = StatusMessage::BombRefreshComplete;
        session.on_tray_changed();
        log::info!("Bomb refresh complete");
    } else {
        session.refresh = Some(next_spawn);
    }
}

fn step_power_up(session: &mut Session, dt: f32) {
    let sim_dt = field_dt(session, dt);
    let max_bounces = session.settings.max_bounces.get();
    if let Some(power_up) = session.power_up.as_mut() {
        if sim_dt > 0.0
            && power_up.entity.advance(POWERUP_SIZE, sim_dt, max_bounces) == Advance::Removed
        {
            log::debug!("Power-up {:?} left the field", power_up.kind);
            session.power_up = None;
            session.power_up_respawn_left = session.power_up_respawn_seconds();
        }
        return;
    }

    // No respawn while the field refills or time is frozen
    if session.is_refreshing() || session.effects.is_frozen() {
        return;
    }
    session.power_up_respawn_left -= dt;
    if session.power_up_respawn_left <= 0.0 {
        session.spawn_power_up(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::effects::EffectKind;
    use crate::sim::entity::Lifecycle;

    fn session(seed: u64) -> Session {
        Session::new(Settings::default(), seed)
    }

    /// Park the first tile mid-field with a known velocity
    fn place_first_tile(s: &mut Session) -> (Vec2, Vec2) {
        let pos = Vec2::new(200.0, 200.0);
        let vel = Vec2::new(100.0, 50.0);
        s.tiles[0].entity.pos = pos;
        s.tiles[0].entity.vel = vel;
        (pos, vel)
    }

    #[test]
    fn test_tick_pause() {
        let mut s = session(12345);
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut s, &input, 0.016);
        assert_eq!(s.phase, GamePhase::Paused);
        tick(&mut s, &input, 0.016);
        assert_eq!(s.phase, GamePhase::Running);
    }

    #[test]
    fn test_clock_counts_whole_seconds() {
        let mut s = session(1);
        for _ in 0..70 {
            tick(&mut s, &TickInput::default(), 0.05);
        }
        assert_eq!(s.time_left, 87);
    }

    #[test]
    fn test_large_frame_is_clamped() {
        let mut s = session(1);
        let (before, vel) = place_first_tile(&mut s);
        tick(&mut s, &TickInput::default(), 5.0);
        let moved = s.tiles[0].entity.pos - before;
        assert!((moved - vel * MAX_FRAME_DT).length() < 1e-3);
        assert_eq!(s.time_left, 90);
    }

    #[test]
    fn test_freeze_stops_movement() {
        let mut s = session(3);
        s.effects.extend(EffectKind::Freeze, 5);
        let positions: Vec<Vec2> = s.tiles.iter().map(|t| t.entity.pos).collect();
        for _ in 0..10 {
            tick(&mut s, &TickInput::default(), 0.05);
        }
        let after: Vec<Vec2> = s.tiles.iter().map(|t| t.entity.pos).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_freeze_holds_power_up_respawn() {
        let mut s = session(3);
        s.power_up = None;
        s.power_up_respawn_left = 0.5;
        s.effects.extend(EffectKind::Freeze, 5);
        for _ in 0..20 {
            tick(&mut s, &TickInput::default(), 0.05);
        }
        assert!(s.power_up.is_none());
        assert_eq!(s.power_up_respawn_left, 0.5);

        s.effects.freeze = 0;
        for _ in 0..11 {
            tick(&mut s, &TickInput::default(), 0.05);
        }
        assert!(s.power_up.is_some());
    }

    #[test]
    fn test_slow_scales_movement() {
        let mut s = session(4);
        s.effects.extend(EffectKind::Slow, 8);
        let (before, vel) = place_first_tile(&mut s);
        tick(&mut s, &TickInput::default(), 0.02);
        let moved = s.tiles[0].entity.pos - before;
        assert!((moved - vel * 0.02 * SLOW_FACTOR).length() < 1e-3);
    }

    #[test]
    fn test_round_pace_speeds_up_field() {
        let mut s = session(4);
        s.round = 3;
        let (before, vel) = place_first_tile(&mut s);
        tick(&mut s, &TickInput::default(), 0.02);
        let moved = s.tiles[0].entity.pos - before;
        assert!((moved - vel * 0.02 * 1.16).length() < 1e-3);
    }

    #[test]
    fn test_magnet_pulls_toward_pointer() {
        let mut s = session(5);
        s.effects.extend(EffectKind::Magnet, 8);
        let pointer = Vec2::new(400.0, 400.0);
        let (_, vel_before) = place_first_tile(&mut s);
        let center = crate::square_center(s.tiles[0].entity.pos, TILE_SIZE);
        let input = TickInput {
            pointer: Some(pointer),
            ..Default::default()
        };
        tick(&mut s, &input, 0.02);
        let dv = s.tiles[0].entity.vel - vel_before;
        assert!(dv.dot(pointer - center) > 0.0);

        // No pull without a pointer
        let vel_before = s.tiles[0].entity.vel;
        tick(&mut s, &TickInput::default(), 0.02);
        assert_eq!(s.tiles[0].entity.vel, vel_before);
    }

    #[test]
    fn test_wall_keeps_tiles_on_field() {
        let mut s = session(6);
        s.effects.extend(EffectKind::Wall, 15);
        let ids: Vec<u32> = s.tiles.iter().map(|t| t.id()).collect();
        for tile in &mut s.tiles {
            tile.entity.bounces = 50;
        }
        for _ in 0..100 {
            tick(&mut s, &TickInput::default(), 0.05);
        }
        let after: Vec<u32> = s.tiles.iter().map(|t| t.id()).collect();
        assert_eq!(ids, after);
        assert!(s.tiles.iter().all(|t| t.entity.lifecycle != Lifecycle::Exiting));
    }

    #[test]
    fn test_field_is_replenished() {
        let mut s = session(7);
        s.tiles.truncate(3);
        tick(&mut s, &TickInput::default(), 0.016);
        assert_eq!(s.tiles.len(), 8);
    }

    #[test]
    fn test_debounce_gates_validation() {
        let mut s = session(8);
        s.tray = (0..4)
            .map(|i| crate::sim::TrayTile::wildcard(900 + i))
            .collect();
        s.on_tray_changed();
        // Clamped to one 0.05 step
        tick(&mut s, &TickInput::default(), 0.1);
        assert!(s.take_validation_request().is_none());
        for _ in 0..3 {
            tick(&mut s, &TickInput::default(), 0.05);
        }
        assert!(s.take_validation_request().is_none());
        tick(&mut s, &TickInput::default(), 0.05);
        let ticket = s.take_validation_request().expect("debounce elapsed");
        assert_eq!(ticket.letters.len(), 4);
        assert!(s.take_validation_request().is_none());
    }

    #[test]
    fn test_time_up_ends_round() {
        let mut s = session(9);
        s.time_left = 2;
        for _ in 0..50 {
            tick(&mut s, &TickInput::default(), 0.05);
        }
        assert_eq!(s.time_left, 0);
        assert_eq!(s.phase, GamePhase::GameOver);

        // Ticks are no-ops once the round is over
        let positions: Vec<Vec2> = s.tiles.iter().map(|t| t.entity.pos).collect();
        tick(&mut s, &TickInput::default(), 0.05);
        let after: Vec<Vec2> = s.tiles.iter().map(|t| t.entity.pos).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_determinism() {
        let mut s1 = session(99999);
        let mut s2 = session(99999);
        let inputs = [
            TickInput::default(),
            TickInput {
                pointer: Some(Vec2::new(100.0, 300.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for step in 0..300 {
            let input = &inputs[step % inputs.len()];
            tick(&mut s1, input, 1.0 / 60.0);
            tick(&mut s2, input, 1.0 / 60.0);
        }

        assert_eq!(s1.tiles, s2.tiles);
        assert_eq!(s1.power_up, s2.power_up);
        assert_eq!(s1.ids.peek(), s2.ids.peek());
        assert_eq!(s1.time_left, s2.time_left);
    }
}
