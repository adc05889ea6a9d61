//! Data-driven game balance
//!
//! Every physics, scoring and framing constant the simulation reads. Values
//! are fixed once a world is built; out-of-range values are rejected before
//! construction instead of being clamped at runtime.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning file or level layout cannot be used to build a world
#[derive(Debug)]
pub enum ConfigError {
    /// Tuning JSON failed to parse
    Parse(serde_json::Error),
    /// A value is NaN or infinite
    NonFinite { field: &'static str, value: f32 },
    /// A size or rate that must be strictly positive was not
    NonPositive { field: &'static str, value: f32 },
    /// A speed or distance that must not be negative was
    Negative { field: &'static str, value: f32 },
    /// The stage is narrower than the visible playfield
    StageNarrowerThanScreen { stage_width: f32, screen_width: f32 },
    /// The player cannot fit inside the stage
    PlayerWiderThanStage { player_width: f32, stage_width: f32 },
    /// Jump power must point upward (negative y)
    JumpNotUpward(f32),
    /// Stomp bounce must not push the player downward
    BounceNotUpward(f32),
    /// Enemy patrol bounds are inverted
    InvertedPatrol { enemy: usize, left: f32, right: f32 },
    /// Enemy spawns outside its own patrol bounds
    SpawnOutsidePatrol { enemy: usize, x: f32 },
    /// Coin radius is negative
    NegativeCoinRadius { coin: usize, radius: f32 },
    /// Goal pole is too short to lower the flag
    PoleTooShort { pole_height: f32, margin: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid tuning JSON: {}", err),
            ConfigError::NonFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            ConfigError::StageNarrowerThanScreen {
                stage_width,
                screen_width,
            } => write!(
                f,
                "stage width ({}) must be at least the screen width ({})",
                stage_width, screen_width
            ),
            ConfigError::PlayerWiderThanStage {
                player_width,
                stage_width,
            } => write!(
                f,
                "player width ({}) must fit inside the stage width ({})",
                player_width, stage_width
            ),
            ConfigError::JumpNotUpward(power) => {
                write!(f, "jump power must be negative (upward), got {}", power)
            }
            ConfigError::BounceNotUpward(bounce) => {
                write!(f, "stomp bounce must not be positive, got {}", bounce)
            }
            ConfigError::InvertedPatrol { enemy, left, right } => write!(
                f,
                "enemy {} patrol bounds are inverted: [{}, {}]",
                enemy, left, right
            ),
            ConfigError::SpawnOutsidePatrol { enemy, x } => {
                write!(f, "enemy {} spawns at x={} outside its patrol bounds", enemy, x)
            }
            ConfigError::NegativeCoinRadius { coin, radius } => {
                write!(f, "coin {} has negative radius {}", coin, radius)
            }
            ConfigError::PoleTooShort {
                pole_height,
                margin,
            } => write!(
                f,
                "goal pole height ({}) must be at least the flag margin ({})",
                pole_height, margin
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Simulation constants, one set per world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Framing ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub stage_width: f32,
    pub ticks_per_second: u32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub move_speed: f32,
    pub max_fall_speed: f32,
    pub walk_anim_ticks: u32,

    // === Scoring ===
    pub coin_reward: u64,
    pub stomp_bonus: u64,
    pub stomp_bounce: f32,
    pub remaining_coin_bonus: u64,

    // === Goal ===
    pub goal_zone_width: f32,
    pub flag_step: f32,
    pub flag_top_margin: f32,
    pub restart_delay_ticks: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            stage_width: STAGE_WIDTH,
            ticks_per_second: TICKS_PER_SECOND,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            move_speed: MOVE_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            walk_anim_ticks: WALK_ANIM_TICKS,

            coin_reward: COIN_REWARD,
            stomp_bonus: STOMP_BONUS,
            stomp_bounce: STOMP_BOUNCE,
            remaining_coin_bonus: REMAINING_COIN_BONUS,

            goal_zone_width: GOAL_ZONE_WIDTH,
            flag_step: FLAG_STEP,
            flag_top_margin: FLAG_TOP_MARGIN,
            restart_delay_ticks: RESTART_DELAY_TICKS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reals = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("stage_width", self.stage_width),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("jump_power", self.jump_power),
            ("move_speed", self.move_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("stomp_bounce", self.stomp_bounce),
            ("goal_zone_width", self.goal_zone_width),
            ("flag_step", self.flag_step),
            ("flag_top_margin", self.flag_top_margin),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("stage_width", self.stage_width),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("flag_step", self.flag_step),
            ("ticks_per_second", self.ticks_per_second as f32),
            ("walk_anim_ticks", self.walk_anim_ticks as f32),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("goal_zone_width", self.goal_zone_width),
            ("flag_top_margin", self.flag_top_margin),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.stage_width < self.screen_width {
            return Err(ConfigError::StageNarrowerThanScreen {
                stage_width: self.stage_width,
                screen_width: self.screen_width,
            });
        }
        if self.player_width > self.stage_width {
            return Err(ConfigError::PlayerWiderThanStage {
                player_width: self.player_width,
                stage_width: self.stage_width,
            });
        }
        if self.jump_power >= 0.0 {
            return Err(ConfigError::JumpNotUpward(self.jump_power));
        }
        if self.stomp_bounce > 0.0 {
            return Err(ConfigError::BounceNotUpward(self.stomp_bounce));
        }
        Ok(())
    }

    /// Highest point the goal flag may be lowered to, relative to the pole top
    #[inline]
    pub fn flag_limit(&self, pole_height: f32) -> f32 {
        pole_height - self.flag_top_margin
    }
}
