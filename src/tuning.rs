//! Data-driven game balance
//!
//! Every knob the simulation reads, loadable from JSON. Missing sections and
//! fields fall back to the defaults in `consts`.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::progression::ProgressionTuning;
use crate::sim::scroll::ScrollTuning;
use crate::sim::spawner::SpawnerTuning;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockTuning {
    pub duration_secs: f32,
}

impl Default for ClockTuning {
    fn default() -> Self {
        Self {
            duration_secs: RUN_DURATION_SECS,
        }
    }
}

/// Horizontal extent of the visible play-field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayField {
    pub left: f32,
    pub right: f32,
    pub spawn_margin: f32,
    pub cull_margin: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            left: PLAY_FIELD_LEFT,
            right: PLAY_FIELD_RIGHT,
            spawn_margin: SPAWN_MARGIN,
            cull_margin: CULL_MARGIN,
        }
    }
}

impl PlayField {
    /// X where new enemies appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.right + self.spawn_margin
    }

    /// Enemies left of this X are removed
    #[inline]
    pub fn cull_x(&self) -> f32 {
        self.left - self.cull_margin
    }
}

/// Cosmetic effect played where an enemy is hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    pub effect_id: String,
    pub offset: Vec2,
    pub lifetime_secs: f32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            effect_id: HIT_EFFECT_ID.to_string(),
            offset: Vec2::ZERO,
            lifetime_secs: HIT_EFFECT_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub jump_force: f32,
    /// Where the host draws the player (used by the default overlap test)
    pub position: Vec2,
    pub radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            jump_force: PLAYER_JUMP_FORCE,
            position: Vec2::new(PLAYER_X, 0.0),
            radius: PLAYER_RADIUS,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seed for enemy selection
    pub seed: u64,
    pub clock: ClockTuning,
    pub scroll: ScrollTuning,
    pub progression: ProgressionTuning,
    pub spawner: SpawnerTuning,
    pub play_field: PlayField,
    pub effects: EffectTuning,
    pub player: PlayerTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0,
            clock: ClockTuning::default(),
            scroll: ScrollTuning::default(),
            progression: ProgressionTuning::default(),
            spawner: SpawnerTuning::default(),
            play_field: PlayField::default(),
            effects: EffectTuning::default(),
            player: PlayerTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json_string(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check numeric ranges.
    ///
    /// The spawn table is not checked here: a bad table only disables
    /// spawning (see `EnemySpawnScheduler::new`).
    pub fn validate(&self) -> Result<(), TuningError> {
        let duration = self.clock.duration_secs;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(invalid("clock.duration_secs", format!("{duration} is not positive")));
        }
        if !self.scroll.base_speed.is_finite() || !self.scroll.player_influence.is_finite() {
            return Err(invalid("scroll", "speeds must be finite"));
        }
        if self.progression.base_move_speed < 0.0 || self.progression.speed_gain_per_level < 0.0 {
            return Err(invalid("progression", "move speeds must not be negative"));
        }
        let field = &self.play_field;
        if !(field.left < field.right) {
            return Err(invalid(
                "play_field",
                format!("left {} must be less than right {}", field.left, field.right),
            ));
        }
        if field.spawn_margin < 0.0 || field.cull_margin < 0.0 {
            return Err(invalid("play_field", "margins must not be negative"));
        }
        if self.effects.lifetime_secs < 0.0 {
            return Err(invalid("effects.lifetime_secs", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json_str(
            r#"{ "seed": 9, "clock": { "duration_secs": 30 }, "scroll": { "player_influence": 0.2 } }"#,
        )
        .unwrap();
        assert_eq!(tuning.seed, 9);
        assert_eq!(tuning.clock.duration_secs, 30.0);
        assert_eq!(tuning.scroll.base_speed, BASE_SCROLL_SPEED);
        assert_eq!(tuning.scroll.player_influence, 0.2);
        assert_eq!(tuning.progression, ProgressionTuning::default());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json_string().unwrap();
        assert_eq!(Tuning::from_json_str(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_flat_cost_curve() {
        let err = Tuning::from_json_str(r#"{ "progression": { "cost_increase_per_level": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_inverted_play_field() {
        let err = Tuning::from_json_str(r#"{ "play_field": { "left": 5, "right": -5 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "play_field", .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json_str("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_bad_spawn_table_still_loads() {
        let tuning = Tuning::from_json_str(
            r#"{ "spawner": { "archetypes": [{ "archetype": "a" }, { "archetype": "b" }], "lanes": [0] } }"#,
        )
        .unwrap();
        assert!(tuning.spawner.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_play_field_edges() {
        let field = PlayField::default();
        assert_eq!(field.spawn_x(), PLAY_FIELD_RIGHT + SPAWN_MARGIN);
        assert_eq!(field.cull_x(), PLAY_FIELD_LEFT - CULL_MARGIN);
    }
}
