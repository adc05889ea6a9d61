//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame)
//! - Stable iteration order (platform, coin and enemy storage order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod level;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{ContactSide, Rect, Resolution, overlaps, resolve_platform_collision};
pub use level::{CoinSpawn, EnemySpawn, Level};
pub use session::{Session, Snapshot};
pub use state::{
    AnimPhase, Coin, Enemy, GameEvent, Goal, Mode, Platform, PlatformKind, Player, PlayerState,
    ResetCause, World,
};
pub use tick::{TickInput, tick};
