//! Timed enemy spawning
//!
//! Every `interval_secs` the scheduler picks an archetype uniformly at random
//! and asks the host to spawn it just past the right edge, in that
//! archetype's lane. A broken table disables spawning instead of failing.

use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enemy::EnemySpec;
use crate::consts::*;

/// Spawner configuration: archetypes and their lanes are parallel lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerTuning {
    pub interval_secs: f32,
    pub archetypes: Vec<EnemySpec>,
    /// Spawn Y for each archetype, same length as `archetypes`
    pub lanes: Vec<f32>,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            interval_secs: SPAWN_INTERVAL_SECS,
            archetypes: vec![EnemySpec::new("slime")],
            lanes: vec![0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnConfigError {
    #[error("spawn table is empty")]
    EmptyTable,
    #[error("spawn table has {archetypes} archetypes but {lanes} lanes")]
    LengthMismatch { archetypes: usize, lanes: usize },
    #[error("spawn table entry {index} has no archetype id")]
    MissingArchetype { index: usize },
    #[error("spawn lane {index} is not a finite number")]
    InvalidLane { index: usize },
    #[error("spawn interval must be positive, got {0}")]
    InvalidInterval(f32),
}

impl SpawnerTuning {
    pub fn validate(&self) -> Result<(), SpawnConfigError> {
        if !(self.interval_secs > 0.0) || !self.interval_secs.is_finite() {
            return Err(SpawnConfigError::InvalidInterval(self.interval_secs));
        }
        if self.archetypes.is_empty() {
            return Err(SpawnConfigError::EmptyTable);
        }
        if self.archetypes.len() != self.lanes.len() {
            return Err(SpawnConfigError::LengthMismatch {
                archetypes: self.archetypes.len(),
                lanes: self.lanes.len(),
            });
        }
        if let Some(index) = self
            .archetypes
            .iter()
            .position(|spec| spec.archetype.trim().is_empty())
        {
            return Err(SpawnConfigError::MissingArchetype { index });
        }
        if let Some(index) = self.lanes.iter().position(|lane| !lane.is_finite()) {
            return Err(SpawnConfigError::InvalidLane { index });
        }
        Ok(())
    }
}

/// A request for the host to put an enemy into the world
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub spec: Rc<EnemySpec>,
    pub position: Vec2,
}

#[derive(Debug, Clone)]
struct SpawnEntry {
    spec: Rc<EnemySpec>,
    lane_y: f32,
}

#[derive(Debug, Clone)]
pub struct EnemySpawnScheduler {
    interval: f32,
    timer: f32,
    spawn_x: f32,
    /// Empty when disabled
    table: Vec<SpawnEntry>,
    rng: Pcg32,
    config_error: Option<SpawnConfigError>,
}

impl EnemySpawnScheduler {
    /// Build from tuning. Invalid tuning is logged once and yields a disabled scheduler.
    pub fn new(tuning: &SpawnerTuning, spawn_x: f32, seed: u64) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        match tuning.validate() {
            Ok(()) => {
                let table = tuning
                    .archetypes
                    .iter()
                    .zip(&tuning.lanes)
                    .map(|(spec, &lane_y)| SpawnEntry {
                        spec: Rc::new(spec.clone()),
                        lane_y,
                    })
                    .collect();
                Self {
                    interval: tuning.interval_secs,
                    timer: tuning.interval_secs,
                    spawn_x,
                    table,
                    rng,
                    config_error: None,
                }
            }
            Err(err) => {
                log::error!("Enemy spawning disabled: {}", err);
                Self {
                    interval: 0.0,
                    timer: 0.0,
                    spawn_x,
                    table: Vec::new(),
                    rng,
                    config_error: Some(err),
                }
            }
        }
    }

    /// Count down; when the timer runs out pick an archetype and restart the timer
    pub fn tick(&mut self, dt: f32) -> Option<SpawnRequest> {
        if self.table.is_empty() {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        self.timer = self.interval;

        let index = self.rng.random_range(0..self.table.len());
        let entry = &self.table[index];
        log::debug!(
            "Spawning '{}' in lane {:.2}",
            entry.spec.archetype,
            entry.lane_y
        );
        Some(SpawnRequest {
            spec: Rc::clone(&entry.spec),
            position: Vec2::new(self.spawn_x, entry.lane_y),
        })
    }

    /// Restart the countdown (new run)
    pub fn reset(&mut self) {
        self.timer = self.interval;
    }

    pub fn config_error(&self) -> Option<&SpawnConfigError> {
        self.config_error.as_ref()
    }
}
