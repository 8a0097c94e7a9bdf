//! Match session
//!
//! Owns everything a match needs: settings, RNG, id allocator, the field,
//! the tray, timers and the round/phase state machine. Player actions are
//! plain method calls; the frame and second steps live in `tick`.

use std::fmt;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{ActiveEffect, EffectKind, EffectTimers, PowerUpKind};
use super::spawn::{make_power_up, make_tile};
use super::state::{EntityIdAllocator, PowerUp, RngState, SubmittedWord, Tile, TrayTile};
use crate::consts::*;
use crate::rounds::{goal_score, pace_multiplier, power_up_respawn_ms};
use crate::scoring::{AwardFactors, Combo, TrayBreakdown, awarded_points, tray_score};
use crate::settings::Settings;
use crate::status::StatusMessage;
use crate::words::{
    DictionaryOracle, ValidationCache, ValidationOutcome, ValidationSequence, ValidationTicket,
    resolve_submitted_word,
};

/// Match phase. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Stopped by the player or by an open menu
    Paused,
    /// Goal reached, waiting for the next round
    BetweenRounds,
    /// Goal missed; only a restart leaves this phase
    GameOver,
}

/// Live verdict on the current tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordValidation {
    TooShort,
    Checking,
    Valid,
    Invalid,
}

/// Why a submission was refused before any lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    NotRunning,
    Refreshing,
    AlreadyChecking,
    TooShort,
    NotValidated,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejection::NotRunning => write!(f, "the round is not running"),
            SubmitRejection::Refreshing => write!(f, "letters are still refreshing"),
            SubmitRejection::AlreadyChecking => write!(f, "a submission is already being checked"),
            SubmitRejection::TooShort => {
                write!(f, "word must have at least {} letters", MIN_WORD_LENGTH)
            }
            SubmitRejection::NotValidated => write!(f, "current tray is not a valid word"),
        }
    }
}

impl std::error::Error for SubmitRejection {}

/// A submission in flight: the tray as it was when the player pressed submit
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    epoch: u64,
    pub letters: Vec<char>,
    pub language: crate::LanguageCode,
    pub tray: Vec<TrayTile>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingValidation {
    pub seq: u64,
    /// Seconds until the pass may be dispatched
    pub debounce_left: f32,
    pub dispatched: bool,
}

/// Tile as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub id: u32,
    pub pos: Vec2,
    pub opacity: f32,
    pub letter: char,
    pub value: u32,
    pub badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub pos: Vec2,
    pub opacity: f32,
    pub kind: PowerUpKind,
    pub label: String,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub round: u32,
    pub goal: u32,
    pub round_score: u32,
    pub score: u32,
    pub time_left: u32,
    pub tiles: Vec<TileView>,
    pub power_up: Option<PowerUpView>,
    pub tray: Vec<TrayTile>,
    pub breakdown: TrayBreakdown,
    pub validation: WordValidation,
    pub checking: bool,
    pub refreshing: bool,
    pub combo: f32,
    pub effects: Vec<ActiveEffect>,
    pub submitted: Vec<SubmittedWord>,
    pub status: StatusMessage,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub rng_state: RngState,
    pub rng: Pcg32,
    pub ids: EntityIdAllocator,

    pub phase: GamePhase,
    /// Player asked for a pause (as opposed to a menu being open)
    pub user_paused: bool,
    pub modal_open: bool,
    pub round: u32,
    pub score: u32,
    /// Score when the current round began
    pub round_score_start: u32,
    pub goal: u32,
    pub time_left: u32,
    /// Real seconds not yet consumed by the second step
    pub second_accumulator: f32,

    pub tiles: Vec<Tile>,
    pub power_up: Option<PowerUp>,
    /// Seconds until the next power-up may appear
    pub power_up_respawn_left: f32,
    /// Bomb refresh in progress: seconds until the next tile drops in
    pub refresh: Option<f32>,

    pub tray: Vec<TrayTile>,
    /// Words accepted this round, oldest first
    pub submitted: Vec<SubmittedWord>,
    pub combo: Combo,
    pub effects: EffectTimers,
    pub validation: WordValidation,
    pub validation_seq: ValidationSequence,
    pub pending_validation: Option<PendingValidation>,
    /// A submission is awaiting its lookup
    pub checking: bool,

    pub status: StatusMessage,
    /// Bumped on every round reset; in-flight submissions from an older
    /// epoch are dropped
    pub epoch: u64,
}

impl Session {
    /// Start a new game at round 1
    pub fn new(settings: Settings, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        let mut session = Self {
            settings,
            rng_state,
            rng,
            ids: EntityIdAllocator::default(),
            phase: GamePhase::Running,
            user_paused: false,
            modal_open: false,
            round: 1,
            score: 0,
            round_score_start: 0,
            goal: goal_score(1),
            time_left: 0,
            second_accumulator: 0.0,
            tiles: Vec::new(),
            power_up: None,
            power_up_respawn_left: 0.0,
            refresh: None,
            tray: Vec::new(),
            submitted: Vec::new(),
            combo: Combo::default(),
            effects: EffectTimers::default(),
            validation: WordValidation::TooShort,
            validation_seq: ValidationSequence::default(),
            pending_validation: None,
            checking: false,
            status: StatusMessage::Initial,
            epoch: 0,
        };
        session.reset_round();
        session
    }

    /// Points earned since the round began
    pub fn round_score(&self) -> u32 {
        self.score.saturating_sub(self.round_score_start)
    }

    /// Tiles the field is kept topped up to; doubled while x2 runs
    pub fn tile_target(&self) -> usize {
        let base = self.settings.tile_count.count();
        if self.effects.is_multiplier_active() {
            base * 2
        } else {
            base
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    /// Running and not blocked by a bomb refresh
    pub fn accepts_actions(&self) -> bool {
        self.phase == GamePhase::Running && !self.is_refreshing()
    }

    pub fn pace(&self) -> f32 {
        pace_multiplier(self.round)
    }

    pub fn tray_word(&self) -> String {
        self.tray.iter().map(|t| t.letter).collect()
    }

    pub fn tray_breakdown(&self) -> TrayBreakdown {
        TrayBreakdown::of(&self.tray)
    }

    // --- Field management ---

    pub(crate) fn spawn_tile(&mut self) {
        let id = self.ids.next_id();
        let profile = self.settings.language.profile();
        let tile = make_tile(id, profile, self.settings.speed.multiplier(), &mut self.rng);
        self.tiles.push(tile);
    }

    pub(crate) fn spawn_power_up(&mut self, forced: Option<PowerUpKind>) {
        let id = self.ids.next_id();
        let power_up = make_power_up(
            id,
            forced,
            &self.settings.power_up_weights,
            self.settings.speed.multiplier(),
            &mut self.rng,
        );
        self.power_up = Some(power_up);
    }

    /// Spawn tiles until the field holds the target count
    pub(crate) fn replenish_tiles(&mut self) {
        while self.tiles.len() < self.tile_target() {
            self.spawn_tile();
        }
    }

    /// Pace-scaled power-up respawn delay in seconds
    pub(crate) fn power_up_respawn_seconds(&self) -> f32 {
        power_up_respawn_ms(self.settings.power_up_respawn.millis(), self.round) as f32 / 1000.0
    }

    /// Swap every matching field tile for a freshly spawned one
    fn replace_tiles(&mut self, predicate: impl Fn(&Tile) -> bool) -> usize {
        let mut replaced = 0;
        for index in 0..self.tiles.len() {
            if predicate(&self.tiles[index]) {
                let id = self.ids.next_id();
                let profile = self.settings.language.profile();
                self.tiles[index] =
                    make_tile(id, profile, self.settings.speed.multiplier(), &mut self.rng);
                replaced += 1;
            }
        }
        replaced
    }

    // --- Round lifecycle ---

    /// Fresh field, tray and timers for the current round number
    fn reset_round(&mut self) {
        self.rng = self.rng_state.next_stream();
        self.epoch += 1;
        self.goal = goal_score(self.round);
        self.round_score_start = self.score;
        self.time_left = self.settings.round_duration.seconds();
        self.second_accumulator = 0.0;

        self.effects = EffectTimers::default();
        self.combo = Combo::default();
        self.tiles.clear();
        self.refresh = None;
        self.tray.clear();
        self.submitted.clear();
        self.checking = false;

        self.replenish_tiles();
        // First power-up of every round is a bomb
        self.spawn_power_up(Some(PowerUpKind::Bomb));
        self.power_up_respawn_left = 0.0;

        self.user_paused = false;
        self.phase = if self.modal_open {
            GamePhase::Paused
        } else {
            GamePhase::Running
        };
        self.status = StatusMessage::Initial;
        self.on_tray_changed();

        log::info!(
            "Round {} started: goal {}, {}s",
            self.round,
            self.goal,
            self.time_left
        );
    }

    /// Time ran out: decide between the next round and game over
    pub(crate) fn finish_round(&mut self) {
        self.time_left = 0;
        if self.round_score() >= self.goal {
            self.phase = GamePhase::BetweenRounds;
            self.status = StatusMessage::TimeUp { round: self.round };
            log::info!(
                "Round {} cleared with {} points (goal {})",
                self.round,
                self.round_score(),
                self.goal
            );
        } else {
            self.phase = GamePhase::GameOver;
            self.status = StatusMessage::ScoreRequired { goal: self.goal };
            log::info!(
                "Game over in round {}: {} of {} points",
                self.round,
                self.round_score(),
                self.goal
            );
        }
        self.on_tray_changed();
    }

    /// Replay the current round, keeping the score earned so far.
    /// After a game over this starts a new game.
    pub fn restart_round(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.start_new_game();
            return;
        }
        self.reset_round();
    }

    /// Advance after a cleared round. Ignored in any other phase.
    pub fn start_next_round(&mut self) -> bool {
        if self.phase != GamePhase::BetweenRounds {
            return false;
        }
        self.round += 1;
        self.reset_round();
        true
    }

    pub fn start_new_game(&mut self) {
        self.round = 1;
        self.score = 0;
        self.round_score_start = 0;
        self.reset_round();
        log::info!("New game");
    }

    /// Replace the settings; a new game starts with them
    pub fn apply_settings(&mut self, settings: Settings) {
        log::info!(
            "Applying settings: {} preset, language {}",
            settings.preset().as_str(),
            settings.language.as_str()
        );
        self.settings = settings;
        self.start_new_game();
    }

    // --- Pause handling ---

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.user_paused = true;
                self.pause();
            }
            GamePhase::Paused => {
                self.user_paused = false;
                if !self.modal_open {
                    self.resume();
                }
            }
            _ => {}
        }
    }

    /// Menus and dialogs pause the game while they are open
    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
        match self.phase {
            GamePhase::Running if open => self.pause(),
            GamePhase::Paused if !open && !self.user_paused => self.resume(),
            _ => {}
        }
    }

    fn pause(&mut self) {
        self.phase = GamePhase::Paused;
        self.status = StatusMessage::Paused;
        self.on_tray_changed();
        log::debug!("Paused");
    }

    fn resume(&mut self) {
        self.phase = GamePhase::Running;
        self.status = StatusMessage::Initial;
        self.on_tray_changed();
        log::debug!("Resumed");
    }

    // --- Tray actions ---

    /// Move a field tile into the tray. Returns false if nothing happened.
    pub fn collect(&mut self, tile_id: u32) -> bool {
        if !self.accepts_actions() {
            return false;
        }
        let Some(index) = self.tiles.iter().position(|t| t.id() == tile_id) else {
            return false;
        };

        let tile = self.tiles.remove(index);
        let locked = self.effects.take_lock_charge();
        self.tray.push(TrayTile::from_tile(&tile, locked));
        if self.tiles.len() < self.tile_target() {
            self.spawn_tile();
        }
        self.on_tray_changed();
        true
    }

    /// Tile under a field point, topmost (most recently spawned) first
    pub fn tile_at(&self, point: Vec2) -> Option<u32> {
        self.tiles
            .iter()
            .rev()
            .find(|t| t.entity.contains(TILE_SIZE, point))
            .map(|t| t.id())
    }

    /// Remove the last unlocked tray tile
    pub fn backspace(&mut self) -> bool {
        if !self.accepts_actions() || self.effects.is_shielded() {
            return false;
        }
        let Some(index) = self.tray.iter().rposition(|t| !t.locked) else {
            return false;
        };
        self.tray.remove(index);
        self.on_tray_changed();
        true
    }

    /// Remove every unlocked tray tile
    pub fn clear(&mut self) -> bool {
        if !self.accepts_actions() || self.effects.is_shielded() {
            return false;
        }
        let before = self.tray.len();
        self.tray.retain(|t| t.locked);
        if self.tray.len() == before {
            return false;
        }
        self.on_tray_changed();
        true
    }

    // --- Validation ---

    /// Schedule a fresh validation pass for the current tray.
    ///
    /// Always issues a new sequence number, so any pass still in flight
    /// becomes stale.
    pub fn on_tray_changed(&mut self) {
        let seq = self.validation_seq.issue();
        if !self.accepts_actions() || self.tray.len() < MIN_WORD_LENGTH {
            self.validation = WordValidation::TooShort;
            self.pending_validation = None;
            return;
        }
        self.validation = WordValidation::Checking;
        self.pending_validation = Some(PendingValidation {
            seq,
            debounce_left: VALIDATION_DEBOUNCE_SECONDS,
            dispatched: false,
        });
    }

    /// Hand out the pending validation pass once its debounce has elapsed
    pub fn take_validation_request(&mut self) -> Option<ValidationTicket> {
        let pending = self.pending_validation.as_mut()?;
        if pending.dispatched || pending.debounce_left > 0.0 {
            return None;
        }
        pending.dispatched = true;
        Some(ValidationTicket {
            seq: pending.seq,
            letters: self.tray.iter().map(|t| t.letter).collect(),
            language: self.settings.language,
        })
    }

    /// Apply a finished pass. Results from superseded passes are dropped.
    pub fn apply_validation(&mut self, outcome: ValidationOutcome) -> bool {
        if !self.validation_seq.is_current(outcome.seq) {
            log::debug!("Dropping stale validation #{}", outcome.seq);
            return false;
        }
        self.validation = if outcome.resolved.is_some() {
            WordValidation::Valid
        } else {
            WordValidation::Invalid
        };
        self.pending_validation = None;
        true
    }

    /// Run the pending pass immediately, skipping the debounce
    pub async fn validate_now<O: DictionaryOracle>(
        &mut self,
        oracle: &O,
        cache: &ValidationCache,
    ) -> WordValidation {
        if let Some(pending) = self.pending_validation.as_mut() {
            pending.debounce_left = 0.0;
        }
        if let Some(ticket) = self.take_validation_request() {
            let outcome = ticket.run(oracle, cache).await;
            self.apply_validation(outcome);
        }
        self.validation
    }

    // --- Submission ---

    /// First half of a submission: check the rules and freeze the tray
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitRejection> {
        if self.checking {
            return Err(SubmitRejection::AlreadyChecking);
        }
        if self.phase != GamePhase::Running {
            return Err(SubmitRejection::NotRunning);
        }
        if self.is_refreshing() {
            return Err(SubmitRejection::Refreshing);
        }
        if self.tray.len() < MIN_WORD_LENGTH {
            self.status = StatusMessage::WordTooShort {
                min: MIN_WORD_LENGTH,
            };
            return Err(SubmitRejection::TooShort);
        }
        if self.validation != WordValidation::Valid {
            self.status = StatusMessage::TrayInvalid;
            return Err(SubmitRejection::NotValidated);
        }

        let letters: Vec<char> = self.tray.iter().map(|t| t.letter).collect();
        self.checking = true;
        self.status = StatusMessage::Checking {
            word: letters.iter().collect::<String>().to_lowercase(),
        };
        Ok(SubmitTicket {
            epoch: self.epoch,
            letters,
            language: self.settings.language,
            tray: self.tray.clone(),
        })
    }

    /// Second half: award the resolved word, or report that none was found.
    ///
    /// Scores the tray as it was at submit time and removes exactly those
    /// tiles. Dropped if the round was reset or ended in the meantime.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        resolved: Option<String>,
    ) -> Option<SubmittedWord> {
        if ticket.epoch != self.epoch {
            log::debug!("Dropping submission from a previous round");
            return None;
        }
        self.checking = false;
        if matches!(self.phase, GamePhase::BetweenRounds | GamePhase::GameOver) {
            log::debug!("Dropping submission that finished after time ran out");
            return None;
        }

        let Some(word) = resolved else {
            self.status = StatusMessage::NoValidWord;
            return None;
        };

        let combo = self.combo.register_submission();
        let double_word = self.effects.is_double_word_ready();
        let points = awarded_points(
            tray_score(&ticket.tray, ticket.tray.len()),
            AwardFactors {
                combo,
                multiplier_window: self.effects.is_multiplier_active(),
                double_word,
            },
        );
        if double_word {
            self.effects.double_word = 0;
        }

        self.score += points;
        let record = SubmittedWord {
            word: word.clone(),
            points,
        };
        self.submitted.push(record.clone());
        self.tray
            .retain(|t| !ticket.tray.iter().any(|submitted| submitted.id == t.id));
        self.status = StatusMessage::GreatWord {
            word,
            points,
            combo,
            double_word,
        };
        log::info!(
            "Accepted '{}' for {} points (combo x{:.2}, score {})",
            record.word,
            points,
            combo,
            self.score
        );
        self.on_tray_changed();
        Some(record)
    }

    /// Submit the tray, resolving wildcards against the oracle
    pub async fn submit_word<O: DictionaryOracle>(
        &mut self,
        oracle: &O,
        cache: &ValidationCache,
    ) -> Result<Option<SubmittedWord>, SubmitRejection> {
        let ticket = self.begin_submit()?;
        let resolved = resolve_submitted_word(&ticket.letters, ticket.language, oracle, cache).await;
        Ok(self.finish_submit(ticket, resolved))
    }

    // --- Power-ups ---

    /// Trigger the power-up on the field, if any
    pub fn activate_power_up(&mut self) -> Option<PowerUpKind> {
        if !self.accepts_actions() {
            return None;
        }
        let kind = self.power_up.take()?.kind;
        self.power_up_respawn_left = self.power_up_respawn_seconds();

        match kind {
            PowerUpKind::Bomb => {
                self.tiles.clear();
                self.refresh = Some(REFRESH_SPAWN_SECONDS);
                self.on_tray_changed();
            }
            PowerUpKind::Multiplier => self.extend_effect(EffectKind::Multiplier, kind),
            PowerUpKind::Freeze => self.extend_effect(EffectKind::Freeze, kind),
            PowerUpKind::Shield => self.extend_effect(EffectKind::Shield, kind),
            PowerUpKind::Wall => self.extend_effect(EffectKind::Wall, kind),
            PowerUpKind::Slow => self.extend_effect(EffectKind::Slow, kind),
            PowerUpKind::Magnet => self.extend_effect(EffectKind::Magnet, kind),
            PowerUpKind::Double => self.extend_effect(EffectKind::DoubleWord, kind),
            PowerUpKind::Lock => {
                self.effects.lock_charges += 1;
                self.extend_effect(EffectKind::Lock, kind);
            }
            PowerUpKind::Wild => {
                let id = self.ids.next_id();
                self.tray.push(TrayTile::wildcard(id));
                self.on_tray_changed();
            }
            PowerUpKind::Reroll => {
                let n = self.replace_tiles(|t| t.value == 1);
                log::debug!("Rerolled {} tiles", n);
            }
            PowerUpKind::Purge => {
                let n = self.replace_tiles(|t| t.value >= 8);
                log::debug!("Purged {} tiles", n);
            }
            PowerUpKind::ExtraTime => self.time_left += EXTRA_TIME_SECONDS,
        }

        self.status = StatusMessage::PowerUpActivated { kind };
        log::info!("Power-up activated: {:?}", kind);
        Some(kind)
    }

    fn extend_effect(&mut self, effect: EffectKind, kind: PowerUpKind) {
        let seconds = kind.duration_seconds().unwrap_or(0);
        self.effects.extend(effect, seconds);
    }

    /// Lock window ran out: nothing in the tray stays protected
    pub(crate) fn unlock_tray(&mut self) {
        for tile in &mut self.tray {
            tile.locked = false;
        }
    }

    // --- Presentation ---

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round,
            goal: self.goal,
            round_score: self.round_score(),
            score: self.score,
            time_left: self.time_left,
            tiles: self
                .tiles
                .iter()
                .map(|t| TileView {
                    id: t.id(),
                    pos: t.entity.pos,
                    opacity: t.entity.opacity(),
                    letter: t.letter,
                    value: t.value,
                    badge: t.modifier.map(|m| m.badge().to_string()),
                })
                .collect(),
            power_up: self.power_up.as_ref().map(|p| PowerUpView {
                id: p.entity.id,
                pos: p.entity.pos,
                opacity: p.entity.opacity(),
                kind: p.kind,
                label: p.kind.label().to_string(),
            }),
            tray: self.tray.clone(),
            breakdown: self.tray_breakdown(),
            validation: self.validation,
            checking: self.checking,
            refreshing: self.is_refreshing(),
            combo: self.combo.multiplier,
            effects: self.effects.active(),
            submitted: self.submitted.clone(),
            status: self.status.clone(),
        }
    }
}
