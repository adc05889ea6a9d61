//! Sound cues for simulation events
//!
//! The simulation never plays audio. A presentation layer maps each event to
//! a short sine tone and synthesizes it however the platform allows.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Coin picked up
    Coin,
    /// Enemy stomped
    EnemyDefeat,
    /// Goal reached
    Goal,
}

/// A one-shot sine tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
    /// Peak amplitude in [0, 1]
    pub amplitude: f32,
}

/// Shared peak amplitude for every cue
const CUE_AMPLITUDE: f32 = 0.3;

impl SoundEffect {
    /// Cue for an event; resets are silent
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::JumpStarted => Some(SoundEffect::Jump),
            GameEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEvent::EnemyDefeated { .. } => Some(SoundEffect::EnemyDefeat),
            GameEvent::GoalReached { .. } => Some(SoundEffect::Goal),
            GameEvent::SessionReset { .. } => None,
        }
    }

    pub fn tone(&self) -> Tone {
        let (frequency_hz, duration_ms) = match self {
            SoundEffect::Jump => (440, 100),
            SoundEffect::Coin => (880, 150),
            SoundEffect::EnemyDefeat => (220, 200),
            SoundEffect::Goal => (660, 500),
        };
        Tone {
            frequency_hz,
            duration_ms,
            amplitude: CUE_AMPLITUDE,
        }
    }

    /// Sample count for this cue at `sample_rate`
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (sample_rate as u64 * self.tone().duration_ms as u64 / 1000) as usize
    }
}
