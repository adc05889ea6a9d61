//! Flagpole - simulation core of a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `tuning`: Data-driven physics and scoring constants
//! - `controls`: Key bindings to per-tick input snapshots
//! - `audio`: One-shot sound cues for simulation events
//! - `highscores`: In-process leaderboard of stage clears

pub mod audio;
pub mod controls;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Simulation rate the tick counters are expressed in
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Visible playfield
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Full scrolling stage width
    pub const STAGE_WIDTH: f32 = 2400.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;

    /// Downward acceleration per tick (y grows downward)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_POWER: f32 = -12.0;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f32 = 4.0;
    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 15.0;
    /// Ticks between walk animation frame flips
    pub const WALK_ANIM_TICKS: u32 = 8;

    /// Score for a coin pickup
    pub const COIN_REWARD: u64 = 10;
    /// Score for stomping an enemy
    pub const STOMP_BONUS: u64 = 100;
    /// Upward bounce after a stomp
    pub const STOMP_BOUNCE: f32 = -8.0;
    /// Bonus per coin still uncollected when the goal is reached
    pub const REMAINING_COIN_BONUS: u64 = 50;

    /// Width of the goal trigger zone starting at the pole
    pub const GOAL_ZONE_WIDTH: f32 = 30.0;
    /// Flag descent per tick after the goal is reached
    pub const FLAG_STEP: f32 = 2.0;
    /// Gap kept between the lowered flag and the pole base
    pub const FLAG_TOP_MARGIN: f32 = 20.0;
    /// Ticks on the clear screen before restart input is accepted
    pub const RESTART_DELAY_TICKS: u64 = 30;
}
