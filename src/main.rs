//! Flagpole headless runner
//!
//! Plays the built-in stage with a simple autopilot, logging every event and
//! its sound cue, then prints the final frame snapshot as JSON.
//!
//! Usage: `flagpole [tuning.json]` (set `RUST_LOG=info` or `debug` for logs)

use flagpole::audio::SoundEffect;
use flagpole::controls::{Key, KeyBindings};
use flagpole::highscores::ClearRecord;
use flagpole::sim::{Level, Mode, Session, World, tick};
use flagpole::{HighScores, Tuning};

/// One minute at the simulation rate
const MAX_TICKS: u64 = 60 * 60;
/// How far ahead the autopilot looks for enemies
const LOOKAHEAD: f32 = 40.0;
/// Output rate the cue lengths are reported at
const SAMPLE_RATE: u32 = 44_100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Tuning::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => Tuning::default(),
    };
    let level = Level::default_stage(&tuning);
    let mut session = Session::new(tuning, &level)?;
    let mut high_scores = HighScores::new();
    let bindings = KeyBindings::default();

    let mut last_x = session.world().player.pos.x;
    for frame in 0..MAX_TICKS {
        let input = bindings.input(&autopilot(session.world(), last_x));
        last_x = session.world().player.pos.x;

        for event in tick(&mut session, &input) {
            match SoundEffect::for_event(&event) {
                Some(effect) => {
                    let tone = effect.tone();
                    log::info!(
                        "frame {}: {:?} -> {:?} ({} Hz, {} ms, {} samples)",
                        frame,
                        event,
                        effect,
                        tone.frequency_hz,
                        tone.duration_ms,
                        effect.sample_count(SAMPLE_RATE)
                    );
                }
                None => log::info!("frame {}: {:?}", frame, event),
            }
        }

        if session.mode() == Mode::Cleared {
            break;
        }
    }

    if session.mode() == Mode::Cleared {
        let record = ClearRecord::from_session(&session);
        high_scores.add(record);
        log::info!(
            "STAGE CLEAR - time {:.2}s, score {}, coin bonus {}",
            session.clear_time_secs(),
            session.score(),
            session.coin_bonus()
        );
    } else {
        log::warn!("Autopilot did not reach the goal within {} ticks", MAX_TICKS);
    }

    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

/// Keys to hold this frame: run right; jump at enemies ahead and whenever
/// progress stalls
fn autopilot(world: &World, last_x: f32) -> Vec<Key> {
    let player = world.player.rect();
    let enemy_ahead = world.enemies.iter().filter(|e| e.alive).any(|e| {
        let enemy = e.rect();
        enemy.left() >= player.right()
            && enemy.left() - player.right() < LOOKAHEAD
            && enemy.top() < player.bottom()
            && enemy.bottom() > player.top()
    });
    let stalled = world.player.grounded && world.player.pos.x <= last_x;

    let mut held = vec![Key::ArrowRight];
    if enemy_ahead || stalled {
        // Not Space, which is also bound to restart
        held.push(Key::ArrowUp);
    }
    held
}
