//! Stage layouts
//!
//! A `Level` is the immutable description a `World` is built from. Enemy
//! spawn records are copied into each enemy so a reset never has to look
//! back at the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Platform, PlatformKind};
use crate::tuning::{ConfigError, Tuning};

/// Immutable starting values for one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub size: Vec2,
    pub vx: f32,
    pub left_bound: f32,
    pub right_bound: f32,
}

/// Starting values for one coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinSpawn {
    pub pos: Vec2,
    pub radius: f32,
}

/// A complete stage description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<EnemySpawn>,
    pub coins: Vec<CoinSpawn>,
    pub goal_pos: Vec2,
    pub goal_pole_height: f32,
}

/// Ground strip height and top edge
const GROUND_Y: f32 = 550.0;
const GROUND_HEIGHT: f32 = 50.0;
/// Floating ledge thickness
const LEDGE_HEIGHT: f32 = 20.0;
/// Side length of the standard walker enemy
const ENEMY_SIZE: f32 = 24.0;
const COIN_RADIUS: f32 = 12.0;

/// Floating ledges: (x, y, width)
const LEDGES: [(f32, f32, f32); 12] = [
    // Area 1
    (200.0, 450.0, 150.0),
    (400.0, 350.0, 150.0),
    (600.0, 450.0, 150.0),
    (350.0, 250.0, 100.0),
    // Area 2
    (1000.0, 450.0, 150.0),
    (1200.0, 350.0, 150.0),
    (1400.0, 450.0, 150.0),
    (1150.0, 250.0, 100.0),
    // Area 3
    (1800.0, 450.0, 150.0),
    (2000.0, 350.0, 150.0),
    (2200.0, 450.0, 150.0),
    (1950.0, 250.0, 100.0),
];

/// Walkers: (x, y, vx, left_bound, right_bound)
const WALKERS: [(f32, f32, f32, f32, f32); 12] = [
    (250.0, 426.0, 2.0, 200.0, 326.0),
    (450.0, 326.0, -2.0, 400.0, 526.0),
    (650.0, 426.0, -2.0, 600.0, 726.0),
    (375.0, 226.0, 1.5, 350.0, 426.0),
    (1050.0, 426.0, -2.0, 1000.0, 1126.0),
    (1250.0, 326.0, 2.0, 1200.0, 1326.0),
    (1450.0, 426.0, -2.0, 1400.0, 1526.0),
    (1175.0, 226.0, 1.5, 1150.0, 1226.0),
    (1850.0, 426.0, 2.0, 1800.0, 1926.0),
    (2050.0, 326.0, -2.0, 2000.0, 2126.0),
    (2250.0, 426.0, -2.0, 2200.0, 2326.0),
    (1975.0, 226.0, 1.5, 1950.0, 2026.0),
];

const COINS: [(f32, f32); 19] = [
    (150.0, 500.0),
    (280.0, 410.0),
    (350.0, 410.0),
    (480.0, 310.0),
    (520.0, 310.0),
    (680.0, 410.0),
    (400.0, 210.0),
    (250.0, 350.0),
    (550.0, 350.0),
    (400.0, 450.0),
    (100.0, 500.0),
    (950.0, 410.0),
    (1100.0, 310.0),
    (1300.0, 410.0),
    (1180.0, 210.0),
    (1750.0, 500.0),
    (1900.0, 410.0),
    (2100.0, 310.0),
    (2300.0, 500.0),
];

impl Level {
    /// The three-area stage: ground over the whole width, ledges, walkers
    /// patrolling each ledge, coins, and the goal pole near the right edge
    pub fn default_stage(tuning: &Tuning) -> Self {
        let mut platforms = vec![Platform {
            rect: Rect::new(0.0, GROUND_Y, tuning.stage_width, GROUND_HEIGHT),
            kind: PlatformKind::Ground,
        }];
        platforms.extend(LEDGES.iter().map(|&(x, y, width)| Platform {
            rect: Rect::new(x, y, width, LEDGE_HEIGHT),
            kind: PlatformKind::Ledge,
        }));

        let enemies = WALKERS
            .iter()
            .map(|&(x, y, vx, left_bound, right_bound)| EnemySpawn {
                pos: Vec2::new(x, y),
                size: Vec2::splat(ENEMY_SIZE),
                vx,
                left_bound,
                right_bound,
            })
            .collect();

        let coins = COINS
            .iter()
            .map(|&(x, y)| CoinSpawn {
                pos: Vec2::new(x, y),
                radius: COIN_RADIUS,
            })
            .collect();

        Self {
            spawn: Vec2::new(100.0, 100.0),
            platforms,
            enemies,
            coins,
            // Clear of the last ledge, which ends at 2350
            goal_pos: Vec2::new(tuning.stage_width - 25.0, 450.0),
            goal_pole_height: 150.0,
        }
    }

    /// Check entity invariants against the tuning they will run under
    pub fn validate(&self, tuning: &Tuning) -> Result<(), ConfigError> {
        for platform in &self.platforms {
            if !(platform.rect.width > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "platform.width",
                    value: platform.rect.width,
                });
            }
            if !(platform.rect.height > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "platform.height",
                    value: platform.rect.height,
                });
            }
        }
        for (enemy, spawn) in self.enemies.iter().enumerate() {
            if spawn.left_bound > spawn.right_bound {
                return Err(ConfigError::InvertedPatrol {
                    enemy,
                    left: spawn.left_bound,
                    right: spawn.right_bound,
                });
            }
            if spawn.pos.x < spawn.left_bound || spawn.pos.x > spawn.right_bound {
                return Err(ConfigError::SpawnOutsidePatrol {
                    enemy,
                    x: spawn.pos.x,
                });
            }
        }
        for (coin, spawn) in self.coins.iter().enumerate() {
            if spawn.radius < 0.0 {
                return Err(ConfigError::NegativeCoinRadius {
                    coin,
                    radius: spawn.radius,
                });
            }
        }
        if self.goal_pole_height < tuning.flag_top_margin {
            return Err(ConfigError::PoleTooShort {
                pole_height: self.goal_pole_height,
                margin: tuning.flag_top_margin,
            });
        }
        Ok(())
    }
}
