//! Per-run state: phase, distance and the tallies shown on the result screen

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::progression::{ItemKind, ItemReward};

/// Phase of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Clock running, world scrolling
    Active,
    /// Clock hit zero
    TimeUp,
    /// Ended by a game-over trigger
    GameOver,
}

impl RunPhase {
    /// TimeUp and GameOver are both terminal for the run
    #[inline]
    pub fn is_ended(&self) -> bool {
        !matches!(self, RunPhase::Active)
    }
}

/// What a single `RunState::tick` changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTick {
    /// Run was already over, nothing moved
    Inactive,
    /// Distance and clock advanced
    Advanced,
    /// This tick ran the clock out
    TimedOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    clock: Clock,
    game_over: bool,
    /// Meters traveled, summed in f64 like the clock
    distance: f64,
    /// Coins picked up this run (the wallet is in PlayerProgression)
    coins_collected: u64,
    items_collected: BTreeMap<ItemKind, u32>,
    /// Runs started this session
    run_index: u32,
}

impl RunState {
    pub fn new(duration: f32) -> Self {
        Self {
            clock: Clock::new(duration),
            game_over: false,
            distance: 0.0,
            coins_collected: 0,
            items_collected: BTreeMap::new(),
            run_index: 0,
        }
    }

    /// Reset everything for a fresh run. Calling it twice in a row just re-zeroes.
    pub fn begin_new_run(&mut self) {
        self.clock.reset();
        self.game_over = false;
        self.distance = 0.0;
        self.coins_collected = 0;
        self.items_collected.clear();
        self.run_index += 1;
        log::info!(
            "Run {} started ({:.0}s on the clock)",
            self.run_index,
            self.clock.duration()
        );
    }

    /// Integrate distance at `scroll_speed`, then advance the clock.
    ///
    /// Activity is judged at the start of the tick, so the tick that runs
    /// the clock out still contributes its distance.
    pub fn tick(&mut self, dt: f32, scroll_speed: f32) -> RunTick {
        if !self.is_active() {
            return RunTick::Inactive;
        }

        self.distance += (scroll_speed * dt).max(0.0) as f64;

        if self.clock.tick(dt) {
            log::info!("Run {} timed out at {:.2}m", self.run_index, self.distance);
            RunTick::TimedOut
        } else {
            RunTick::Advanced
        }
    }

    /// End the run. Returns false if it had already ended.
    pub fn trigger_game_over(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        log::info!("Run {} game over at {:.2}m", self.run_index, self.distance);
        true
    }

    /// Record a collected reward in this run's tallies
    pub fn record_reward(&mut self, coins: u32, item: Option<ItemReward>) {
        self.coins_collected += coins as u64;
        if let Some(item) = item.filter(|item| item.count > 0) {
            *self.items_collected.entry(item.kind).or_insert(0) += item.count;
        }
    }

    pub fn phase(&self) -> RunPhase {
        if self.game_over {
            RunPhase::GameOver
        } else if self.clock.is_time_up() {
            RunPhase::TimeUp
        } else {
            RunPhase::Active
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.phase().is_ended()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn is_time_up(&self) -> bool {
        self.clock.is_time_up()
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance as f32
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    #[inline]
    pub fn remaining_time(&self) -> f32 {
        self.clock.remaining()
    }

    #[inline]
    pub fn elapsed_time(&self) -> f32 {
        self.clock.elapsed()
    }

    #[inline]
    pub fn coins_collected(&self) -> u64 {
        self.coins_collected
    }

    pub fn items_collected(&self) -> &BTreeMap<ItemKind, u32> {
        &self.items_collected
    }

    #[inline]
    pub fn run_index(&self) -> u32 {
        self.run_index
    }
}
