//! Key bindings
//!
//! Turns the set of keys held this frame into a `TickInput`. Bindings are
//! plain data so a front end can load them from JSON.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the default bindings refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    D,
    W,
    S,
    Space,
    Enter,
    Escape,
}

/// Which keys drive each control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<Key>,
    pub right: Vec<Key>,
    pub jump: Vec<Key>,
    pub restart: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![Key::ArrowLeft, Key::A],
            right: vec![Key::ArrowRight, Key::D],
            jump: vec![Key::Space, Key::ArrowUp, Key::W],
            // Shares Space with jump; the restart delay keeps a held jump from
            // skipping the clear screen
            restart: vec![Key::Space],
        }
    }
}

impl KeyBindings {
    /// Parse bindings from JSON; missing controls keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Input snapshot for the keys held this frame
    pub fn input(&self, held: &[Key]) -> TickInput {
        TickInput {
            left: any_held(&self.left, held),
            right: any_held(&self.right, held),
            jump: any_held(&self.jump, held),
            restart: any_held(&self.restart, held),
        }
    }
}

fn any_held(bound: &[Key], held: &[Key]) -> bool {
    bound.iter().any(|k| held.contains(k))
}
