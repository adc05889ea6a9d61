//! Session controller
//!
//! Wraps a `World` with the Playing/Cleared mode, the score and the tick
//! counters. `reset` is the only way back to a fresh session.

use serde::{Deserialize, Serialize};

use super::level::Level;
use super::state::{Coin, Enemy, GameEvent, Goal, Mode, Platform, Player, ResetCause, World};
use crate::tuning::{ConfigError, Tuning};

/// One playthrough of a stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub(crate) world: World,
    pub(crate) mode: Mode,
    pub(crate) score: u64,
    pub(crate) elapsed_ticks: u64,
    /// `elapsed_ticks` at the moment the goal was reached
    pub(crate) clear_elapsed_ticks: u64,
    /// Ticks spent on the clear screen
    pub(crate) post_clear_ticks: u64,
    /// Remaining-coin bonus granted at the goal
    pub(crate) coin_bonus: u64,
}

impl Default for Session {
    /// The built-in stage under default tuning
    fn default() -> Self {
        let tuning = Tuning::default();
        let level = Level::default_stage(&tuning);
        Self::from_world(World::build(tuning, &level))
    }
}

impl Session {
    /// Validate the configuration and start a session at spawn
    pub fn new(tuning: Tuning, level: &Level) -> Result<Self, ConfigError> {
        tuning.validate()?;
        level.validate(&tuning)?;
        log::info!(
            "New session: stage {}px, {} platforms, {} enemies, {} coins",
            tuning.stage_width,
            level.platforms.len(),
            level.enemies.len(),
            level.coins.len()
        );
        Ok(Self::from_world(World::build(tuning, level)))
    }

    fn from_world(world: World) -> Self {
        Self {
            world,
            mode: Mode::Playing,
            score: 0,
            elapsed_ticks: 0,
            clear_elapsed_ticks: 0,
            post_clear_ticks: 0,
            coin_bonus: 0,
        }
    }

    /// Return every entity and counter to its starting value
    pub fn reset(&mut self, cause: ResetCause) -> GameEvent {
        log::info!(
            "Session reset ({:?}) at tick {} with score {}",
            cause,
            self.elapsed_ticks,
            self.score
        );
        self.mode = Mode::Playing;
        self.score = 0;
        self.elapsed_ticks = 0;
        self.clear_elapsed_ticks = 0;
        self.post_clear_ticks = 0;
        self.coin_bonus = 0;
        self.world.restore();
        GameEvent::SessionReset { cause }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn clear_elapsed_ticks(&self) -> u64 {
        self.clear_elapsed_ticks
    }

    pub fn post_clear_ticks(&self) -> u64 {
        self.post_clear_ticks
    }

    /// Bonus awarded for uncollected coins when the goal was reached
    pub fn coin_bonus(&self) -> u64 {
        self.coin_bonus
    }

    pub fn remaining_coins(&self) -> usize {
        self.world.remaining_coins()
    }

    /// Clear time in seconds at the simulation rate
    pub fn clear_time_secs(&self) -> f32 {
        self.clear_elapsed_ticks as f32 / self.world.tuning.ticks_per_second as f32
    }

    /// Whether restart input is accepted this tick
    pub fn restart_ready(&self) -> bool {
        self.mode == Mode::Cleared && self.post_clear_ticks >= self.world.tuning.restart_delay_ticks
    }

    /// Owned copy of everything a renderer draws for the current frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.world.player.clone(),
            platforms: self.world.platforms.clone(),
            enemies: self.world.enemies.clone(),
            coins: self.world.coins.clone(),
            goal: self.world.goal.clone(),
            camera_x: self.world.camera_x,
            score: self.score,
            mode: self.mode,
            elapsed_ticks: self.elapsed_ticks,
            clear_elapsed_ticks: self.clear_elapsed_ticks,
            post_clear_ticks: self.post_clear_ticks,
        }
    }
}

/// Frame state between two ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
    pub camera_x: f32,
    pub score: u64,
    pub mode: Mode,
    pub elapsed_ticks: u64,
    pub clear_elapsed_ticks: u64,
    pub post_clear_ticks: u64,
}
