//! Game state and core simulation types
//!
//! The host owns one `GameState` and passes it to `tick` every frame. There
//! is no global state: every component lives here and is reached through it.

use std::rc::Rc;

use glam::Vec2;
use serde::Serialize;

use super::enemy::{EnemyAgent, RewardEvent};
use super::progression::{ItemKind, PlayerProgression};
use super::run::{RunPhase, RunState};
use super::scroll::ScrollSpeedModel;
use super::spawner::{EnemySpawnScheduler, SpawnRequest};
use crate::results::RunSummary;
use crate::tuning::Tuning;

/// Side effects for the host to carry out (spawning, effects, physics, UI cues)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    RunStarted { run: u32 },
    EnemySpawned { id: u32, archetype: String, position: Vec2 },
    /// Enemy left the play-field and was removed
    EnemyCulled { id: u32 },
    /// Enemy touched the player, paid out and was removed
    EnemyDefeated { id: u32, reward: RewardEvent },
    /// Play a cosmetic effect that removes itself after `lifetime` seconds
    SpawnEffect { effect_id: String, position: Vec2, lifetime: f32 },
    /// Upward impulse for the host's physics
    JumpImpulse { force: f32 },
    TimeUp,
    GameOver,
    UpgradePurchased { level: u32, cost: u64 },
    UpgradeRejected { cost: u64, balance: u64 },
}

/// Read-only values the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub remaining_time: f32,
    pub distance: f32,
    pub scroll_speed: f32,
    pub coin_balance: u64,
    pub item_counts: Vec<(ItemKind, u32)>,
    pub move_speed_level: u32,
    pub move_speed: f32,
    pub next_move_speed: f32,
    pub upgrade_cost: u64,
    /// Whether the shop's upgrade button should be enabled
    pub can_afford_upgrade: bool,
    pub is_time_up: bool,
    pub is_game_over: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub run: RunState,
    pub scroll: ScrollSpeedModel,
    /// Survives across runs
    pub progression: PlayerProgression,
    pub spawner: EnemySpawnScheduler,
    /// Live enemies (sorted by id)
    pub enemies: Vec<EnemyAgent>,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state and start the first run
    pub fn new(tuning: Tuning) -> Self {
        let spawner = EnemySpawnScheduler::new(
            &tuning.spawner,
            tuning.play_field.spawn_x(),
            tuning.seed,
        );
        let mut state = Self {
            run: RunState::new(tuning.clock.duration_secs),
            scroll: ScrollSpeedModel::new(tuning.scroll),
            progression: PlayerProgression::new(tuning.progression),
            spawner,
            enemies: Vec::new(),
            time_ticks: 0,
            next_id: 1,
            tuning,
        };
        state.begin_new_run();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run. Progression carries over; the field is cleared.
    pub fn begin_new_run(&mut self) {
        self.run.begin_new_run();
        self.enemies.clear();
        self.spawner.reset();
        self.time_ticks = 0;
        self.scroll
            .update(self.progression.actual_move_speed(), self.run.is_active());
    }

    /// End the run early. Returns false if it had already ended.
    pub fn trigger_game_over(&mut self) -> bool {
        if !self.run.trigger_game_over() {
            return false;
        }
        self.scroll.update(self.progression.actual_move_speed(), false);
        true
    }

    /// Add an enemy from a spawn request and return its id
    pub fn spawn_enemy(&mut self, request: SpawnRequest) -> u32 {
        let id = self.next_entity_id();
        self.enemies
            .push(EnemyAgent::new(id, Rc::clone(&request.spec), request.position));
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&EnemyAgent> {
        self.enemies.iter().find(|e| e.id == id)
    }

    #[inline]
    pub fn phase(&self) -> RunPhase {
        self.run.phase()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            remaining_time: self.run.remaining_time(),
            distance: self.run.distance(),
            scroll_speed: self.scroll.current(),
            coin_balance: self.progression.coin_balance(),
            item_counts: self
                .progression
                .item_counts()
                .iter()
                .map(|(&kind, &count)| (kind, count))
                .collect(),
            move_speed_level: self.progression.move_speed_level(),
            move_speed: self.progression.actual_move_speed(),
            next_move_speed: self.progression.next_move_speed(),
            upgrade_cost: self.progression.upgrade_cost(),
            can_afford_upgrade: self.progression.can_afford_upgrade(),
            is_time_up: self.run.is_time_up(),
            is_game_over: self.run.is_game_over(),
        }
    }

    /// Result-screen numbers for the current (or just finished) run
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_run(&self.run)
    }
}
