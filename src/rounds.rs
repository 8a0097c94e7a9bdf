//! Round goals and pacing

use crate::consts::{GOAL_BASE_SCORE, GOAL_STEP_SCORE, MIN_POWERUP_RESPAWN_MS, ROUND_PACE_STEP};

/// Points a round must earn before the clock runs out
pub fn goal_score(round: u32) -> u32 {
    GOAL_BASE_SCORE + round.saturating_sub(1) * GOAL_STEP_SCORE
}

/// Simulation speed-up for later rounds
pub fn pace_multiplier(round: u32) -> f32 {
    1.0 + round.saturating_sub(1) as f32 * ROUND_PACE_STEP
}

/// Power-up respawn delay after pace scaling, floored
pub fn power_up_respawn_ms(base_ms: u32, round: u32) -> u32 {
    let scaled = (base_ms as f32 / pace_multiplier(round)).round() as u32;
    scaled.max(MIN_POWERUP_RESPAWN_MS)
}
