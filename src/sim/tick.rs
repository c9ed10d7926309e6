//! Per-frame simulation tick
//!
//! Core game loop that advances the run by one host frame.

use super::enemy::{EnemyAgent, RewardEvent};
use super::progression::PlayerProgression;
use super::run::RunTick;
use super::scroll::{self, ScrollSpeedModel};
use super::state::{GameEvent, GameState};

/// Commands and observations for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A new run is starting (scene/run transition)
    pub new_run: bool,
    /// Jump button pressed
    pub jump: bool,
    /// Buy a move speed level
    pub upgrade: bool,
    /// End the run (e.g. the player fell out of the world)
    pub game_over: bool,
    /// Enemy ids the collision collaborator saw touching the player
    pub collisions: Vec<u32>,
}

/// Advance the game state by one frame of `dt` seconds.
///
/// Returns the side effects the host should carry out, in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = dt.max(0.0);

    if input.new_run {
        state.begin_new_run();
        events.push(GameEvent::RunStarted {
            run: state.run.run_index(),
        });
    }

    // Shop works whether or not a run is in progress
    if input.upgrade {
        let cost = state.progression.upgrade_cost();
        match state.progression.upgrade_move_speed() {
            Ok(level) => events.push(GameEvent::UpgradePurchased { level, cost }),
            Err(err) => {
                log::info!("Upgrade rejected: {}", err);
                events.push(GameEvent::UpgradeRejected {
                    cost,
                    balance: state.progression.coin_balance(),
                });
            }
        }
    }

    if input.game_over && state.trigger_game_over() {
        events.push(GameEvent::GameOver);
    }

    // Nothing moves once the run has ended
    if !state.run.is_active() {
        state
            .scroll
            .update(state.progression.actual_move_speed(), false);
        return events;
    }

    state.time_ticks += 1;

    if input.jump {
        events.push(GameEvent::JumpImpulse {
            force: state.tuning.player.jump_force,
        });
    }

    // One authoritative scroll speed for this frame
    let speed = state
        .scroll
        .update(state.progression.actual_move_speed(), true);

    if state.run.tick(dt, speed) == RunTick::TimedOut {
        events.push(GameEvent::TimeUp);
    }

    if let Some(request) = state.spawner.tick(dt) {
        let archetype = request.spec.archetype.clone();
        let position = request.position;
        let id = state.spawn_enemy(request);
        events.push(GameEvent::EnemySpawned {
            id,
            archetype,
            position,
        });
    }

    let cull_x = state.tuning.play_field.cull_x();
    for id in advance_enemies(&mut state.enemies, dt, Some(&state.scroll), cull_x) {
        log::debug!("Enemy {} left the field", id);
        events.push(GameEvent::EnemyCulled { id });
    }

    for &id in &input.collisions {
        let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == id) else {
            continue;
        };
        // Repeat reports for the same enemy fall through here
        let Some(reward) = enemy.on_player_collision() else {
            continue;
        };

        apply_reward(&reward, Some(&mut state.progression));
        state.run.record_reward(reward.coins, reward.item);

        let effects = &state.tuning.effects;
        events.push(GameEvent::EnemyDefeated { id, reward });
        events.push(GameEvent::SpawnEffect {
            effect_id: effects.effect_id.clone(),
            position: reward.position + effects.offset,
            lifetime: effects.lifetime_secs,
        });
    }
    state.enemies.retain(|e| e.is_alive());

    events
}

/// Move every enemy and remove the ones that left the field.
///
/// Removal happens after the pass so no enemy is skipped or moved twice.
/// Without a scroll model the fallback scroll speed is used.
/// Returns the ids of the removed enemies in iteration order.
pub fn advance_enemies(
    enemies: &mut Vec<EnemyAgent>,
    dt: f32,
    scroll: Option<&ScrollSpeedModel>,
    cull_x: f32,
) -> Vec<u32> {
    let speed = scroll::speed_or_default(scroll);
    let culled: Vec<u32> = enemies
        .iter_mut()
        .filter_map(|enemy| {
            let was_alive = enemy.is_alive();
            (!enemy.tick(dt, speed, cull_x) && was_alive).then_some(enemy.id)
        })
        .collect();
    enemies.retain(|e| !culled.contains(&e.id));
    culled
}

/// Credit a reward to the player's wallet and inventory.
///
/// Returns false (and drops the reward) if there is nowhere to put it.
pub fn apply_reward(reward: &RewardEvent, sink: Option<&mut PlayerProgression>) -> bool {
    let Some(progression) = sink else {
        log::warn!("No progression to receive reward of {} coins, dropping it", reward.coins);
        return false;
    };
    progression.add_coins(reward.coins as i64);
    progression.add_reward_item(reward.item);
    true
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::sim::enemy::EnemySpec;
    use crate::sim::progression::{ItemKind, ItemReward};
    use crate::sim::run::RunPhase;
    use crate::sim::spawner::SpawnRequest;
    use crate::tuning::Tuning;

    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        // Far-off interval keeps the field empty unless a test spawns by hand
        tuning.spawner.interval_secs = 1.0e6;
        tuning
    }

    fn spawn_at(state: &mut GameState, x: f32) -> u32 {
        let spec = Rc::new(EnemySpec {
            item_reward: Some(ItemReward {
                kind: ItemKind::Coin,
                count: 1,
            }),
            ..EnemySpec::new("slime")
        });
        state.spawn_enemy(SpawnRequest {
            spec,
            position: Vec2::new(x, 0.0),
        })
    }

    #[test]
    fn test_sixty_second_run_scenario() {
        let mut tuning = quiet_tuning();
        tuning.clock.duration_secs = 60.0;
        tuning.scroll.base_speed = 1.0;
        tuning.scroll.player_influence = 0.0;
        let mut state = GameState::new(tuning);

        let input = TickInput::default();
        let mut time_ups = 0;
        for _ in 0..60 {
            time_ups += tick(&mut state, &input, 1.0)
                .iter()
                .filter(|e| **e == GameEvent::TimeUp)
                .count();
        }

        assert_eq!(state.run.remaining_time(), 0.0);
        assert!(state.run.is_time_up());
        assert_eq!(state.run.distance(), 60.0);
        assert_eq!(time_ups, 1);

        // Further ticks change nothing
        for _ in 0..10 {
            assert!(tick(&mut state, &input, 1.0).is_empty());
        }
        assert_eq!(state.run.distance(), 60.0);
        assert_eq!(state.hud().scroll_speed, 0.0);
        assert_eq!(state.summary().outcome, RunPhase::TimeUp);
    }

    #[test]
    fn test_sixty_hz_run_ends_on_last_frame() {
        let mut state = GameState::new(quiet_tuning());
        let input = TickInput::default();
        let dt = 1.0 / 60.0;

        let mut timed_out_on = None;
        for frame in 1..=3600 {
            if tick(&mut state, &input, dt).contains(&GameEvent::TimeUp) {
                timed_out_on = Some(frame);
            }
        }

        assert_eq!(timed_out_on, Some(3600));
        assert_eq!(state.run.remaining_time(), 0.0);
        assert!((state.run.distance() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_includes_player_speed() {
        let mut tuning = quiet_tuning();
        tuning.scroll.base_speed = 1.0;
        tuning.scroll.player_influence = 0.5;
        tuning.progression.base_move_speed = 4.0;
        let mut state = GameState::new(tuning);

        tick(&mut state, &TickInput::default(), 1.0);
        // 1 + 4 * 0.5
        assert_eq!(state.scroll.current(), 3.0);
        assert_eq!(state.run.distance(), 3.0);
    }

    #[test]
    fn test_spawner_emits_enemy() {
        let mut tuning = Tuning::default();
        tuning.spawner.interval_secs = 0.5;
        tuning.spawner.lanes = vec![1.5];
        let spawn_x = tuning.play_field.spawn_x();
        let mut state = GameState::new(tuning);

        let events = tick(&mut state, &TickInput::default(), 0.5);
        let spawned = events.iter().find_map(|e| match e {
            GameEvent::EnemySpawned { id, position, .. } => Some((*id, *position)),
            _ => None,
        });
        let (id, position) = spawned.expect("enemy should spawn");
        assert_eq!(position, Vec2::new(spawn_x, 1.5));
        // It already moved this frame
        let enemy = state.enemy(id).expect("enemy is live");
        assert!(enemy.pos.x < spawn_x);
    }

    #[test]
    fn test_enemy_culled_off_left_edge() {
        let mut state = GameState::new(quiet_tuning());
        let cull_x = state.tuning.play_field.cull_x();
        let id = spawn_at(&mut state, cull_x + 0.1);

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert!(events.contains(&GameEvent::EnemyCulled { id }));
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_collision_rewards_once() {
        let mut state = GameState::new(quiet_tuning());
        let id = spawn_at(&mut state, 0.0);

        let input = TickInput {
            collisions: vec![id, id],
            ..Default::default()
        };
        let events = tick(&mut state, &input, 0.016);

        let defeats = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDefeated { .. }))
            .count();
        assert_eq!(defeats, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::SpawnEffect { effect_id, .. } if effect_id == "slash"
        )));
        assert_eq!(state.progression.coin_balance(), 10);
        assert_eq!(state.progression.item_count(ItemKind::Coin), 1);
        assert_eq!(state.run.coins_collected(), 10);
        assert!(state.enemies.is_empty());

        // Stale report on a later frame
        let events = tick(&mut state, &input, 0.016);
        assert!(events.is_empty());
        assert_eq!(state.progression.coin_balance(), 10);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = GameState::new(quiet_tuning());
        let id = spawn_at(&mut state, 0.0);
        tick(&mut state, &TickInput::default(), 1.0);
        let distance = state.run.distance();
        let enemy_x = state.enemy(id).map(|e| e.pos.x);

        let events = tick(
            &mut state,
            &TickInput {
                game_over: true,
                ..Default::default()
            },
            1.0,
        );
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert_eq!(state.phase(), RunPhase::GameOver);

        // Collisions and time no longer count
        let events = tick(
            &mut state,
            &TickInput {
                collisions: vec![id],
                game_over: true,
                ..Default::default()
            },
            1.0,
        );
        assert!(events.is_empty());
        assert_eq!(state.run.distance(), distance);
        assert_eq!(state.enemy(id).map(|e| e.pos.x), enemy_x);
        assert_eq!(state.progression.coin_balance(), 0);
    }

    #[test]
    fn test_new_run_after_time_up() {
        let mut tuning = quiet_tuning();
        tuning.clock.duration_secs = 1.0;
        let mut state = GameState::new(tuning);
        state.progression.add_coins(50);
        tick(&mut state, &TickInput::default(), 2.0);
        assert!(state.run.is_time_up());

        let events = tick(
            &mut state,
            &TickInput {
                new_run: true,
                ..Default::default()
            },
            0.5,
        );
        assert_eq!(events.first(), Some(&GameEvent::RunStarted { run: 2 }));
        assert_eq!(state.phase(), RunPhase::Active);
        assert_eq!(state.run.remaining_time(), 0.5);
        assert_eq!(state.progression.coin_balance(), 50);
    }

    #[test]
    fn test_upgrade_commands() {
        let mut tuning = quiet_tuning();
        tuning.progression.initial_upgrade_cost = 10;
        tuning.progression.cost_increase_per_level = std::num::NonZeroU32::new(5).unwrap();
        let mut state = GameState::new(tuning);
        state.progression.add_coins(10);

        let input = TickInput {
            upgrade: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, 0.0);
        assert!(events.contains(&GameEvent::UpgradePurchased { level: 2, cost: 10 }));

        let events = tick(&mut state, &input, 0.0);
        assert!(events.contains(&GameEvent::UpgradeRejected { cost: 15, balance: 0 }));
        assert_eq!(state.progression.move_speed_level(), 2);
    }

    #[test]
    fn test_jump_emits_impulse() {
        let mut state = GameState::new(quiet_tuning());
        let events = tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
            0.016,
        );
        assert!(events.contains(&GameEvent::JumpImpulse {
            force: crate::consts::PLAYER_JUMP_FORCE
        }));
    }

    #[test]
    fn test_advance_enemies_without_scroll_model() {
        let spec = Rc::new(EnemySpec {
            self_speed: 0.0,
            ..EnemySpec::new("slime")
        });
        let mut enemies = vec![
            EnemyAgent::new(1, Rc::clone(&spec), Vec2::new(0.0, 0.0)),
            EnemyAgent::new(2, Rc::clone(&spec), Vec2::new(-1.5, 0.0)),
            EnemyAgent::new(3, Rc::clone(&spec), Vec2::new(5.0, 0.0)),
        ];
        // Fallback speed 1.0 for one second
        let culled = advance_enemies(&mut enemies, 1.0, None, -2.0);
        assert_eq!(culled, vec![2]);
        let ids: Vec<u32> = enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(enemies[0].pos.x, -1.0);
    }

    #[test]
    fn test_apply_reward_without_sink() {
        let reward = RewardEvent {
            coins: 10,
            item: None,
            position: Vec2::ZERO,
        };
        assert!(!apply_reward(&reward, None));

        let mut progression = PlayerProgression::default();
        assert!(apply_reward(&reward, Some(&mut progression)));
        assert_eq!(progression.coin_balance(), 10);
    }

    #[test]
    fn test_determinism() {
        let mut tuning = Tuning::default();
        tuning.seed = 1234;
        tuning.spawner.interval_secs = 0.25;
        tuning.spawner.archetypes = vec![EnemySpec::new("slime"), EnemySpec::new("bat")];
        tuning.spawner.lanes = vec![0.0, 2.0];

        let mut a = GameState::new(tuning.clone());
        let mut b = GameState::new(tuning);
        let input = TickInput::default();
        for _ in 0..200 {
            assert_eq!(tick(&mut a, &input, 0.05), tick(&mut b, &input, 0.05));
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
    }
}
