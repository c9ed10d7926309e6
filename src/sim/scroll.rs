//! World scroll speed
//!
//! One authoritative speed per tick, read by distance accumulation and
//! every enemy so nothing drifts apart.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Snapshot of one scroll speed computation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollSpeedSample {
    pub base_speed: f32,
    pub player_influence: f32,
    pub player_speed: f32,
    pub effective_speed: f32,
}

/// Scroll speed = base + player speed * influence while the run is active, else 0
#[inline]
pub fn compute(base: f32, influence: f32, player_speed: f32, active: bool) -> f32 {
    if !active {
        return 0.0;
    }
    base + player_speed * influence
}

/// Scroll speed from an optional model, falling back to a fixed speed
pub fn speed_or_default(model: Option<&ScrollSpeedModel>) -> f32 {
    match model {
        Some(model) => model.current(),
        None => {
            log::warn!(
                "No scroll speed model available, using fallback speed {}",
                FALLBACK_SCROLL_SPEED
            );
            FALLBACK_SCROLL_SPEED
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    pub base_speed: f32,
    pub player_influence: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SCROLL_SPEED,
            player_influence: PLAYER_SPEED_INFLUENCE,
        }
    }
}

/// Holds the scroll tuning and caches the last sample for consumers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrollSpeedModel {
    tuning: ScrollTuning,
    last: ScrollSpeedSample,
}

impl ScrollSpeedModel {
    pub fn new(tuning: ScrollTuning) -> Self {
        Self {
            tuning,
            last: ScrollSpeedSample {
                base_speed: tuning.base_speed,
                player_influence: tuning.player_influence,
                ..Default::default()
            },
        }
    }

    /// Recompute for this tick and cache the result
    pub fn update(&mut self, player_speed: f32, active: bool) -> f32 {
        let effective_speed = compute(
            self.tuning.base_speed,
            self.tuning.player_influence,
            player_speed,
            active,
        );
        self.last = ScrollSpeedSample {
            base_speed: self.tuning.base_speed,
            player_influence: self.tuning.player_influence,
            player_speed,
            effective_speed,
        };
        effective_speed
    }

    /// Effective speed from the most recent update
    #[inline]
    pub fn current(&self) -> f32 {
        self.last.effective_speed
    }

    #[inline]
    pub fn sample(&self) -> ScrollSpeedSample {
        self.last
    }
}
