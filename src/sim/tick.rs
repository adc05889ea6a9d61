//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by exactly one frame. The order of
//! the playing steps matters: pickups and combat read the position already
//! corrected by platform collisions.

use serde::{Deserialize, Serialize};

use super::collision::{overlaps, resolve_platform_collision};
use super::session::Session;
use super::state::{GameEvent, Mode, ResetCause, World};

/// Input commands for a single tick (held state, not edges)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Restart from the clear screen
    pub restart: bool,
}

impl TickInput {
    /// Horizontal axis; right wins when both directions are held
    pub fn axis(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }
}

/// Advance the session by one fixed timestep, returning the events it emitted
pub fn tick(session: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    match session.mode {
        Mode::Playing => tick_playing(session, input, &mut events),
        Mode::Cleared => tick_cleared(session, input, &mut events),
    }
    events
}

fn tick_cleared(session: &mut Session, input: &TickInput, events: &mut Vec<GameEvent>) {
    let world = &mut session.world;
    let limit = world.tuning.flag_limit(world.goal.pole_height);
    world.goal.lower_flag(world.tuning.flag_step, limit);

    session.post_clear_ticks += 1;

    if input.restart && session.restart_ready() {
        events.push(session.reset(ResetCause::Restart));
    }
}

fn tick_playing(session: &mut Session, input: &TickInput, events: &mut Vec<GameEvent>) {
    let world = &mut session.world;

    // Input, gravity, animation
    if world.player.apply_input(input.axis(), input.jump, &world.tuning) {
        events.push(GameEvent::JumpStarted);
    }
    world.player.integrate();

    resolve_platforms(world);

    let coin_reward = collect_coins(world, events);
    session.score += coin_reward;

    let world = &mut session.world;
    for enemy in &mut world.enemies {
        enemy.patrol();
    }

    let contacts = resolve_enemy_contacts(world, events);
    session.score += contacts.stomp_bonus;
    if let Some(enemy) = contacts.hazard {
        events.push(session.reset(ResetCause::HazardHit { enemy }));
        return;
    }

    let world = &mut session.world;
    world.update_camera();
    world.clamp_player();

    // Goal
    let player_rect = world.player.rect();
    if !world.goal.reached
        && world
            .goal
            .zone_contains(player_rect.left(), player_rect.right(), world.tuning.goal_zone_width)
    {
        world.goal.reached = true;
        let coin_bonus = world.remaining_coins() as u64 * world.tuning.remaining_coin_bonus;
        session.clear_elapsed_ticks = session.elapsed_ticks;
        session.post_clear_ticks = 0;
        session.coin_bonus = coin_bonus;
        session.score += coin_bonus;
        session.mode = Mode::Cleared;
        log::info!(
            "Goal reached at tick {} - score {} (coin bonus {})",
            session.elapsed_ticks,
            session.score,
            coin_bonus
        );
        events.push(GameEvent::GoalReached { coin_bonus });
    }

    // Fell below the playfield
    if session.world.player.pos.y > session.world.tuning.screen_height {
        events.push(session.reset(ResetCause::FellOut));
        return;
    }

    session.elapsed_ticks += 1;
}

/// Push the player out of every platform in order; only a landing grounds
fn resolve_platforms(world: &mut World) {
    let player = &mut world.player;
    player.grounded = false;
    for platform in &world.platforms {
        if let Some(hit) = resolve_platform_collision(&player.rect(), player.vel, &platform.rect) {
            player.pos = hit.pos;
            player.vel = hit.vel;
            if hit.grounded {
                player.grounded = true;
            }
        }
    }
}

/// Mark coins within reach of the player's centre; returns the score earned
fn collect_coins(world: &mut World, events: &mut Vec<GameEvent>) -> u64 {
    let center = world.player.center();
    let half_width = world.player.size.x / 2.0;
    let mut reward = 0;
    for (index, coin) in world.coins.iter_mut().enumerate() {
        if coin.in_reach(center, half_width) {
            coin.collected = true;
            reward += world.tuning.coin_reward;
            log::debug!("Coin {} collected", index);
            events.push(GameEvent::CoinCollected { index });
        }
    }
    reward
}

/// Outcome of the player-enemy scan
#[derive(Debug, Default)]
struct EnemyContacts {
    stomp_bonus: u64,
    /// First enemy that touched the player without being stomped
    hazard: Option<usize>,
}

/// Stomp enemies hit from above; stop at the first hazard contact
fn resolve_enemy_contacts(world: &mut World, events: &mut Vec<GameEvent>) -> EnemyContacts {
    let mut contacts = EnemyContacts::default();
    for (index, enemy) in world.enemies.iter_mut().enumerate() {
        if !enemy.alive {
            continue;
        }
        let player_rect = world.player.rect();
        let enemy_rect = enemy.rect();
        if !overlaps(&player_rect, &enemy_rect) {
            continue;
        }

        let above_midpoint = player_rect.bottom() < enemy_rect.top() + enemy_rect.height / 2.0;
        if above_midpoint && world.player.vel.y > 0.0 {
            enemy.alive = false;
            contacts.stomp_bonus += world.tuning.stomp_bonus;
            world.player.vel.y = world.tuning.stomp_bounce;
            log::debug!("Enemy {} stomped", index);
            events.push(GameEvent::EnemyDefeated { index });
            continue;
        }

        contacts.hazard = Some(index);
        break;
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;
    use crate::sim::level::{CoinSpawn, EnemySpawn, Level};
    use crate::sim::state::{Platform, PlatformKind, PlayerState};
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Resting y for a 48-tall player on the test ground
    const REST_Y: f32 = 502.0;

    fn test_tuning() -> Tuning {
        Tuning {
            stage_width: 1000.0,
            ..Default::default()
        }
    }

    fn ground(tuning: &Tuning) -> Platform {
        Platform {
            rect: Rect::new(0.0, 550.0, tuning.stage_width, 50.0),
            kind: PlatformKind::Ground,
        }
    }

    fn walker(x: f32, vx: f32, left_bound: f32, right_bound: f32) -> EnemySpawn {
        EnemySpawn {
            pos: Vec2::new(x, 526.0),
            size: Vec2::splat(24.0),
            vx,
            left_bound,
            right_bound,
        }
    }

    /// Stationary 24x24 enemy at an arbitrary height
    fn blocker(x: f32, y: f32) -> EnemySpawn {
        EnemySpawn {
            pos: Vec2::new(x, y),
            size: Vec2::splat(24.0),
            vx: 0.0,
            left_bound: x - 20.0,
            right_bound: x + 20.0,
        }
    }

    fn coin(x: f32, y: f32) -> CoinSpawn {
        CoinSpawn {
            pos: Vec2::new(x, y),
            radius: 12.0,
        }
    }

    fn flat_level(spawn: Vec2, enemies: Vec<EnemySpawn>, coins: Vec<CoinSpawn>, goal_x: f32) -> Level {
        let tuning = test_tuning();
        Level {
            spawn,
            platforms: vec![ground(&tuning)],
            enemies,
            coins,
            goal_pos: Vec2::new(goal_x, 450.0),
            goal_pole_height: 150.0,
        }
    }

    fn start(level: &Level) -> Session {
        Session::new(test_tuning(), level).expect("test level should be valid")
    }

    fn right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    /// Walk right from rest into a goal at x=300 with two unreachable coins
    fn cleared_session() -> Session {
        let level = flat_level(
            Vec2::new(100.0, REST_Y),
            vec![],
            vec![coin(116.0, 526.0), coin(600.0, 100.0), coin(700.0, 100.0)],
            300.0,
        );
        let mut session = start(&level);
        for _ in 0..42 {
            tick(&mut session, &right());
        }
        assert_eq!(session.mode(), Mode::Cleared);
        session
    }

    #[test]
    fn test_resting_player_stays_grounded() {
        let level = flat_level(Vec2::new(100.0, REST_Y), vec![], vec![], 900.0);
        let mut session = start(&level);

        tick(&mut session, &TickInput::default());
        assert!(session.world().player.grounded);

        for _ in 0..120 {
            let events = tick(&mut session, &TickInput::default());
            assert!(events.is_empty());
            let player = &session.world().player;
            assert!(player.grounded);
            assert_eq!(player.pos.y, REST_Y);
            assert_eq!(player.vel.y, 0.0);
            assert_eq!(player.state, PlayerState::Idle);
        }
    }

    #[test]
    fn test_walk_right_until_stage_edge() {
        // Goal behind the spawn so it can never trigger
        let level = flat_level(Vec2::new(100.0, REST_Y), vec![], vec![], 0.0);
        let mut session = start(&level);
        tick(&mut session, &TickInput::default());

        let tuning = test_tuning();
        let max_x = tuning.stage_width - tuning.player_width;
        let mut expected = 100.0_f32;
        for _ in 0..300 {
            tick(&mut session, &right());
            expected = (expected + tuning.move_speed).min(max_x);
            assert_eq!(session.world().player.pos.x, expected);
            assert_eq!(session.mode(), Mode::Playing);
        }
        assert_eq!(session.world().player.pos.x, max_x);
        assert_eq!(session.world().camera_x, tuning.stage_width - tuning.screen_width);
        assert!(session.world().player.facing_right);
    }

    #[test]
    fn test_camera_follows_player_midscreen() {
        let level = flat_level(Vec2::new(100.0, REST_Y), vec![], vec![], 0.0);
        let mut session = start(&level);
        tick(&mut session, &TickInput::default());
        assert_eq!(session.world().camera_x, 0.0);

        // 100 + 4 * 100 = 500
        for _ in 0..100 {
            tick(&mut session, &right());
        }
        assert_eq!(session.world().player.pos.x, 500.0);
        assert_eq!(session.world().camera_x, 100.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let level = flat_level(Vec2::new(100.0, REST_Y), vec![], vec![], 900.0);
        let mut session = start(&level);
        tick(&mut session, &TickInput::default());

        let tuning = test_tuning();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let events = tick(&mut session, &jump);
        assert_eq!(events, vec![GameEvent::JumpStarted]);
        assert_eq!(session.world().player.vel.y, tuning.jump_power + tuning.gravity);
        assert!(!session.world().player.grounded);

        let mut airborne_ticks = 0;
        loop {
            let prev_vy = session.world().player.vel.y;
            tick(&mut session, &TickInput::default());
            airborne_ticks += 1;
            let player = &session.world().player;
            if player.grounded {
                assert_eq!(player.vel.y, 0.0);
                assert_eq!(player.pos.y, REST_Y);
                break;
            }
            assert_eq!(player.vel.y, prev_vy + tuning.gravity);
            assert_eq!(player.state, PlayerState::Jumping);
            assert!(airborne_ticks < 100, "player never landed");
        }
        assert_eq!(airborne_ticks, 47);
    }

    #[test]
    fn test_coin_collection_is_idempotent() {
        let level = flat_level(Vec2::new(100.0, REST_Y), vec![], vec![coin(116.0, 526.0)], 900.0);
        let mut session = start(&level);

        let events = tick(&mut session, &TickInput::default());
        assert_eq!(events, vec![GameEvent::CoinCollected { index: 0 }]);
        assert_eq!(session.score(), 10);

        for _ in 0..30 {
            let events = tick(&mut session, &TickInput::default());
            assert!(events.is_empty());
        }
        assert_eq!(session.score(), 10);
        assert!(session.world().coins[0].collected);
    }

    #[test]
    fn test_stomp_defeats_enemy_without_reset() {
        let level = flat_level(
            Vec2::new(96.0, 400.0),
            vec![walker(100.0, 0.0, 80.0, 200.0)],
            vec![],
            900.0,
        );
        let mut session = start(&level);

        let mut defeats = 0;
        for _ in 0..60 {
            let events = tick(&mut session, &TickInput::default());
            assert!(
                !events.iter().any(|e| matches!(e, GameEvent::SessionReset { .. })),
                "stomp must not reset"
            );
            if events.contains(&GameEvent::EnemyDefeated { index: 0 }) {
                defeats += 1;
                assert_eq!(session.world().player.vel.y, -8.0);
            }
        }
        assert_eq!(defeats, 1);
        assert_eq!(session.score(), 100);
        assert!(!session.world().enemies[0].alive);
        assert_eq!(session.mode(), Mode::Playing);
        assert!(session.world().player.grounded);
    }

    #[test]
    fn test_side_hit_resets_session() {
        let level = flat_level(
            Vec2::new(100.0, REST_Y),
            vec![walker(200.0, -2.0, 50.0, 300.0)],
            vec![coin(116.0, 526.0)],
            900.0,
        );
        let mut session = start(&level);

        let mut reset_tick = None;
        for n in 1..=60 {
            let events = tick(&mut session, &TickInput::default());
            if n == 1 {
                assert_eq!(session.score(), 10);
            }
            if let Some(last) = events.last() {
                if *last
                    == (GameEvent::SessionReset {
                        cause: ResetCause::HazardHit { enemy: 0 },
                    })
                {
                    reset_tick = Some(n);
                    break;
                }
            }
        }
        // Enemy left edge passes 132 on tick 35
        assert_eq!(reset_tick, Some(35));

        let world = session.world();
        assert_eq!(session.score(), 0);
        assert_eq!(session.mode(), Mode::Playing);
        assert_eq!(session.elapsed_ticks(), 0);
        assert!(!world.coins[0].collected);
        assert!(world.enemies[0].alive);
        assert_eq!(world.enemies[0].pos.x, 200.0);
        assert_eq!(world.enemies[0].vx, -2.0);
        assert_eq!(world.player.pos, Vec2::new(100.0, REST_Y));
    }

    #[test]
    fn test_goal_awards_remaining_coins_once() {
        let mut session = cleared_session();

        // One coin picked up on the way, two left for the bonus
        assert_eq!(session.score(), 10 + 2 * 50);
        assert_eq!(session.coin_bonus(), 100);
        assert_eq!(session.clear_elapsed_ticks(), 41);
        assert!(session.world().goal.reached);
        let parked = session.world().player.pos;

        for n in 1..=20 {
            let events = tick(&mut session, &right());
            assert!(events.is_empty());
            assert_eq!(session.post_clear_ticks(), n);
            assert_eq!(session.world().goal.flag_height, 2.0 * n as f32);
        }
        assert_eq!(session.score(), 110);
        assert_eq!(session.elapsed_ticks(), 42);
        assert_eq!(session.world().player.pos, parked);
    }

    #[test]
    fn test_goal_event_reports_bonus() {
        let level = flat_level(Vec2::new(100.0, REST_Y), vec![], vec![coin(600.0, 100.0)], 300.0);
        let mut session = start(&level);
        let mut seen = Vec::new();
        for _ in 0..42 {
            seen.extend(tick(&mut session, &right()));
        }
        assert_eq!(seen, vec![GameEvent::GoalReached { coin_bonus: 50 }]);
    }

    #[test]
    fn test_flag_stops_at_limit() {
        let mut session = cleared_session();
        for _ in 0..200 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.world().goal.flag_height, 150.0 - 20.0);
    }

    #[test]
    fn test_restart_waits_for_delay() {
        let mut session = cleared_session();
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let delay = session.world().tuning.restart_delay_ticks;

        for _ in 1..delay {
            let events = tick(&mut session, &restart);
            assert!(events.is_empty());
            assert_eq!(session.mode(), Mode::Cleared);
        }

        let events = tick(&mut session, &restart);
        assert_eq!(
            events,
            vec![GameEvent::SessionReset {
                cause: ResetCause::Restart
            }]
        );
        assert_eq!(session.mode(), Mode::Playing);
        assert_eq!(session.score(), 0);
        assert!(!session.world().goal.reached);
        assert!(session.world().coins.iter().all(|c| !c.collected));
    }

    #[test]
    fn test_falling_off_world_resets() {
        let tuning = test_tuning();
        let level = Level {
            spawn: Vec2::new(100.0, 100.0),
            platforms: vec![],
            enemies: vec![],
            coins: vec![],
            goal_pos: Vec2::new(900.0, 450.0),
            goal_pole_height: 150.0,
        };
        let mut session = Session::new(tuning, &level).expect("valid level");

        let mut cause = None;
        for _ in 0..200 {
            let events = tick(&mut session, &TickInput::default());
            if let Some(GameEvent::SessionReset { cause: c }) = events.last() {
                cause = Some(*c);
                break;
            }
            assert!(session.world().player.vel.y <= session.world().tuning.max_fall_speed);
        }
        assert_eq!(cause, Some(ResetCause::FellOut));
        assert_eq!(session.world().player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(session.elapsed_ticks(), 0);
    }

    #[test]
    fn test_platform_corrections_accumulate_in_order() {
        let level = flat_level(Vec2::new(100.0, REST_Y), vec![], vec![], 900.0);
        let mut session = start(&level);
        let world = &mut session.world;
        world.platforms.push(Platform {
            rect: Rect::new(130.0, 460.0, 20.0, 100.0),
            kind: PlatformKind::Ledge,
        });
        world.player.pos = Vec2::new(100.0, 505.0);
        world.player.vel = Vec2::new(4.0, 3.0);
        world.player.grounded = false;

        resolve_platforms(world);

        // Ground lifts the player to 502 first; the wall then sees the
        // lifted rectangle with vy = 0 and pushes it out of its left face
        let player = &world.player;
        assert_eq!(player.pos, Vec2::new(98.0, REST_Y));
        assert_eq!(player.vel, Vec2::new(4.0, 0.0));
        assert!(player.grounded);
    }

    #[test]
    fn test_walking_off_ledge_starts_falling() {
        let level = Level {
            spawn: Vec2::new(150.0, REST_Y),
            platforms: vec![Platform {
                rect: Rect::new(0.0, 550.0, 200.0, 50.0),
                kind: PlatformKind::Ledge,
            }],
            enemies: vec![],
            coins: vec![],
            goal_pos: Vec2::new(900.0, 450.0),
            goal_pole_height: 150.0,
        };
        let mut session = start(&level);
        tick(&mut session, &TickInput::default());
        assert!(session.world().player.grounded);

        // Left edge reaches 198 after 12 steps, still over the ledge
        for n in 1..=12 {
            tick(&mut session, &right());
            let player = &session.world().player;
            assert_eq!(player.pos.x, 150.0 + 4.0 * n as f32);
            assert!(player.grounded);
            assert_eq!(player.pos.y, REST_Y);
        }

        tick(&mut session, &right());
        let player = &session.world().player;
        assert_eq!(player.pos.x, 202.0);
        assert!(!player.grounded);
        assert_eq!(player.state, PlayerState::Walking);

        tick(&mut session, &right());
        let player = &session.world().player;
        assert!(!player.grounded);
        assert_eq!(player.state, PlayerState::Jumping);
        assert_eq!(player.vel.y, 1.0);
        assert!(player.pos.y > REST_Y);
    }

    #[test]
    fn test_stomp_then_hazard_in_one_tick() {
        // Player bottom lands at 523.5: above the first enemy's midpoint
        // (527), inside the second enemy's body
        let level = flat_level(
            Vec2::new(100.0, 470.0),
            vec![blocker(100.0, 515.0), blocker(110.0, 490.0)],
            vec![],
            900.0,
        );
        let mut session = start(&level);
        session.world.player.vel.y = 5.0;

        let events = tick(&mut session, &TickInput::default());
        assert_eq!(
            events,
            vec![
                GameEvent::EnemyDefeated { index: 0 },
                GameEvent::SessionReset {
                    cause: ResetCause::HazardHit { enemy: 1 }
                },
            ]
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.mode(), Mode::Playing);
        assert!(session.world().enemies.iter().all(|e| e.alive));
        assert_eq!(session.world().player.pos, Vec2::new(100.0, 470.0));
    }

    #[test]
    fn test_dead_enemy_is_ignored() {
        let level = flat_level(
            Vec2::new(100.0, REST_Y),
            vec![walker(110.0, 0.0, 80.0, 200.0)],
            vec![],
            900.0,
        );
        let mut session = start(&level);
        session.world.enemies[0].alive = false;

        for _ in 0..30 {
            let events = tick(&mut session, &TickInput::default());
            assert!(events.is_empty());
        }
        assert_eq!(session.mode(), Mode::Playing);
        assert_eq!(session.elapsed_ticks(), 30);
        assert_eq!(session.world().player.pos, Vec2::new(100.0, REST_Y));
        assert!(!session.world().enemies[0].alive);

        // The same overlap is a hazard once the enemy is alive
        session.world.enemies[0].alive = true;
        let events = tick(&mut session, &TickInput::default());
        assert_eq!(
            events,
            vec![GameEvent::SessionReset {
                cause: ResetCause::HazardHit { enemy: 0 }
            }]
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::default();
        let mut b = Session::default();
        let inputs = [
            right(),
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                left: true,
                ..Default::default()
            },
        ];
        for n in 0..400 {
            let input = &inputs[(n / 25) % inputs.len()];
            assert_eq!(tick(&mut a, input), tick(&mut b, input));
        }
        let a = serde_json::to_string(&a.snapshot()).expect("serializable");
        let b = serde_json::to_string(&b.snapshot()).expect("serializable");
        assert_eq!(a, b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn kinematic_bounds_hold(
                inputs in proptest::collection::vec(
                    (any::<bool>(), any::<bool>(), any::<bool>()),
                    1..600,
                )
            ) {
                let mut session = Session::default();
                for (left, right, jump) in inputs {
                    let input = TickInput { left, right, jump, restart: false };
                    tick(&mut session, &input);

                    let world = session.world();
                    let tuning = &world.tuning;
                    prop_assert!(world.player.vel.y <= tuning.max_fall_speed);
                    prop_assert!(world.player.pos.x >= 0.0);
                    prop_assert!(world.player.pos.x <= tuning.stage_width - tuning.player_width);
                    prop_assert!(world.camera_x >= 0.0);
                    prop_assert!(world.camera_x <= tuning.stage_width - tuning.screen_width);
                    for enemy in world.enemies.iter().filter(|e| e.alive) {
                        prop_assert!(enemy.pos.x >= enemy.left_bound);
                        prop_assert!(enemy.pos.x <= enemy.right_bound);
                    }
                }
            }

            #[test]
            fn score_only_drops_on_reset(
                inputs in proptest::collection::vec(
                    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                    1..600,
                )
            ) {
                let mut session = Session::default();
                for (left, right, jump, restart) in inputs {
                    let before = session.score();
                    let events = tick(&mut session, &TickInput { left, right, jump, restart });
                    let reset = events
                        .iter()
                        .any(|e| matches!(e, GameEvent::SessionReset { .. }));
                    if reset {
                        prop_assert_eq!(session.score(), 0);
                    } else {
                        prop_assert!(session.score() >= before);
                    }
                }
            }
        }
    }
}
