//! Game state and core simulation types
//!
//! Entities own only their own fields. Anything that involves two entities
//! (landing, pickups, stomps) is computed by the tick, which reads the
//! containers on `World` side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{EnemySpawn, Level};
use crate::tuning::Tuning;

/// Top-level session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Active gameplay
    Playing,
    /// Goal reached; flag lowering, waiting for restart
    Cleared,
}

/// Why a session was reset to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    /// Player dropped below the playfield
    FellOut,
    /// Player touched a live enemy without stomping it
    HazardHit { enemy: usize },
    /// Player asked to restart from the clear screen
    Restart,
}

/// Discrete notifications emitted by a tick, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    JumpStarted,
    CoinCollected { index: usize },
    EnemyDefeated { index: usize },
    /// Goal reached; `coin_bonus` is already included in the score
    GoalReached { coin_bonus: u64 },
    SessionReset { cause: ResetCause },
}

/// Player behavior derived each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Walking,
    Jumping,
}

/// Two-phase walk cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimPhase {
    /// 0 or 1
    pub frame: u8,
    /// Ticks since the last frame flip
    pub counter: u32,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub facing_right: bool,
    pub anim: AnimPhase,
    pub state: PlayerState,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            grounded: false,
            facing_right: true,
            anim: AnimPhase::default(),
            state: PlayerState::Idle,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Apply one tick of input, gravity and animation
    ///
    /// `axis` is -1, 0 or 1. Returns true when a jump started this tick.
    pub fn apply_input(&mut self, axis: f32, jump_held: bool, tuning: &Tuning) -> bool {
        self.vel.x = tuning.move_speed * axis;
        if axis > 0.0 {
            self.facing_right = true;
        } else if axis < 0.0 {
            self.facing_right = false;
        }

        let jumped = jump_held && self.grounded;
        if jumped {
            self.vel.y = tuning.jump_power;
            self.grounded = false;
        }

        self.vel.y = (self.vel.y + tuning.gravity).min(tuning.max_fall_speed);

        if !self.grounded {
            self.state = PlayerState::Jumping;
        } else if self.vel.x != 0.0 {
            self.state = PlayerState::Walking;
            self.anim.counter += 1;
            if self.anim.counter >= tuning.walk_anim_ticks {
                self.anim.counter = 0;
                self.anim.frame = 1 - self.anim.frame;
            }
        } else {
            self.state = PlayerState::Idle;
            self.anim = AnimPhase::default();
        }

        jumped
    }

    /// Move by the current velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Put the player back at spawn, keeping the facing direction
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.anim = AnimPhase::default();
        self.state = PlayerState::Idle;
    }
}

/// Display tag for platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Ground,
    Ledge,
}

/// Static solid geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub vx: f32,
    pub left_bound: f32,
    pub right_bound: f32,
    pub alive: bool,
    /// Where this enemy starts every session
    pub spawn: EnemySpawn,
}

impl Enemy {
    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        Self {
            pos: spawn.pos,
            size: spawn.size,
            vx: spawn.vx,
            left_bound: spawn.left_bound,
            right_bound: spawn.right_bound,
            alive: true,
            spawn: spawn.clone(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Advance one patrol step, reflecting off either bound
    pub fn patrol(&mut self) {
        if !self.alive {
            return;
        }
        self.pos.x += self.vx;
        if self.pos.x <= self.left_bound {
            self.pos.x = self.left_bound;
            self.vx = -self.vx;
        }
        if self.pos.x >= self.right_bound {
            self.pos.x = self.right_bound;
            self.vx = -self.vx;
        }
    }

    /// Restore spawn position and velocity, alive
    pub fn restore(&mut self) {
        self.pos = self.spawn.pos;
        self.vx = self.spawn.vx;
        self.alive = true;
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Coin {
    /// Whether a player centred at `center` is close enough to pick this up
    pub fn in_reach(&self, center: Vec2, player_half_width: f32) -> bool {
        !self.collected && center.distance(self.pos) < self.radius + player_half_width
    }
}

/// Goal pole and flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub pole_height: f32,
    /// Distance the flag has been lowered from the pole top
    pub flag_height: f32,
    pub reached: bool,
}

impl Goal {
    /// Whether a player spanning `[left, right]` is inside the trigger zone
    pub fn zone_contains(&self, left: f32, right: f32, zone_width: f32) -> bool {
        right >= self.pos.x && left <= self.pos.x + zone_width
    }

    /// Lower the flag one step, never past `limit`
    pub fn lower_flag(&mut self, step: f32, limit: f32) {
        self.flag_height = (self.flag_height + step).min(limit);
    }
}

/// Everything the simulation mutates for one stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub tuning: Tuning,
    pub spawn: Vec2,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
    /// Derived each tick from the player position
    pub camera_x: f32,
}

impl World {
    /// Build a world from an already validated tuning and level
    pub(crate) fn build(tuning: Tuning, level: &Level) -> Self {
        let player = Player::new(level.spawn, &tuning);
        Self {
            spawn: level.spawn,
            player,
            platforms: level.platforms.clone(),
            enemies: level.enemies.iter().map(Enemy::from_spawn).collect(),
            coins: level
                .coins
                .iter()
                .map(|coin| Coin {
                    pos: coin.pos,
                    radius: coin.radius,
                    collected: false,
                })
                .collect(),
            goal: Goal {
                pos: level.goal_pos,
                pole_height: level.goal_pole_height,
                flag_height: 0.0,
                reached: false,
            },
            camera_x: 0.0,
            tuning,
        }
    }

    /// Horizontal extent of the stage
    pub fn stage_width(&self) -> f32 {
        self.tuning.stage_width
    }

    /// Coins not yet picked up
    pub fn remaining_coins(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected).count()
    }

    /// Hard-snap the camera so the player sits mid-screen, within the stage
    pub fn update_camera(&mut self) {
        let max_x = self.stage_width() - self.tuning.screen_width;
        self.camera_x = (self.player.pos.x - self.tuning.screen_width / 2.0).clamp(0.0, max_x);
    }

    /// Keep the player inside the stage horizontally
    pub fn clamp_player(&mut self) {
        let max_x = self.stage_width() - self.player.size.x;
        self.player.pos.x = self.player.pos.x.clamp(0.0, max_x);
    }

    /// Restore every entity to its spawn state
    pub fn restore(&mut self) {
        self.player.respawn(self.spawn);
        self.camera_x = 0.0;
        for enemy in &mut self.enemies {
            enemy.restore();
        }
        for coin in &mut self.coins {
            coin.collected = false;
        }
        self.goal.reached = false;
        self.goal.flag_height = 0.0;
    }
}
