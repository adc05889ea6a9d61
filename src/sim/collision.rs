//! Collision detection and response for axis-aligned geometry
//!
//! The player and every platform are plain rectangles. Resolution picks the
//! contact side from the sign of the player's velocity rather than from the
//! penetration depth, so a player falling past a ledge corner while moving
//! sideways gets snapped onto the ledge top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at the top-left, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at `pos` with the given size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// True iff the interiors intersect; shared edges do not count
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.right() > b.left() && a.left() < b.right() && a.bottom() > b.top() && a.top() < b.bottom()
}

/// Which face of the platform the player was pushed out of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactSide {
    /// Player's head hit the platform underside
    Bottom,
    /// Player landed on the platform
    Top,
    /// Player ran into the platform's left face
    Left,
    /// Player ran into the platform's right face
    Right,
}

/// Corrected player kinematics after a platform contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Set only by a landing
    pub grounded: bool,
    pub side: ContactSide,
}

/// Push the player out of one platform along a single axis
///
/// Returns `None` when the rectangles do not overlap or when no velocity rule
/// matches the overlap (e.g. a player at rest embedded in a wall).
pub fn resolve_platform_collision(player: &Rect, vel: Vec2, platform: &Rect) -> Option<Resolution> {
    if !overlaps(player, platform) {
        return None;
    }

    // Moving up into the underside
    if vel.y < 0.0 && player.top() < platform.bottom() && player.bottom() > platform.bottom() {
        return Some(Resolution {
            pos: Vec2::new(player.x, platform.bottom()),
            vel: Vec2::new(vel.x, 0.0),
            grounded: false,
            side: ContactSide::Bottom,
        });
    }

    // Falling onto the top
    if vel.y > 0.0 && player.bottom() > platform.top() && player.top() < platform.top() {
        return Some(Resolution {
            pos: Vec2::new(player.x, platform.top() - player.height),
            vel: Vec2::new(vel.x, 0.0),
            grounded: true,
            side: ContactSide::Top,
        });
    }

    // Running right into the left face
    if vel.x > 0.0 && player.right() > platform.left() && player.left() < platform.left() {
        return Some(Resolution {
            pos: Vec2::new(platform.left() - player.width, player.y),
            vel,
            grounded: false,
            side: ContactSide::Left,
        });
    }

    // Running left into the right face
    if vel.x < 0.0 && player.left() < platform.right() && player.right() > platform.right() {
        return Some(Resolution {
            pos: Vec2::new(platform.right(), player.y),
            vel,
            grounded: false,
            side: ContactSide::Right,
        });
    }

    None
}
