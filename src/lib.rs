//! Endless Runner - simulation core for a side-scrolling runner
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (clock, scroll speed, progression, enemies)
//! - `tuning`: Data-driven game balance
//! - `results`: End-of-run summary

pub mod results;
pub mod sim;
pub mod tuning;

pub use results::RunSummary;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Length of one run in seconds
    pub const RUN_DURATION_SECS: f32 = 60.0;

    /// Scroll speed with no player contribution
    pub const BASE_SCROLL_SPEED: f32 = 1.0;
    /// How much of the player's move speed feeds into the scroll speed
    pub const PLAYER_SPEED_INFLUENCE: f32 = 0.0;
    /// Scroll speed assumed when no scroll model is wired up
    pub const FALLBACK_SCROLL_SPEED: f32 = 1.0;

    /// Move speed at upgrade level 1
    pub const BASE_MOVE_SPEED: f32 = 5.0;
    /// Move speed added per upgrade level
    pub const SPEED_GAIN_PER_LEVEL: f32 = 0.5;
    /// Cost of the first move speed upgrade
    pub const INITIAL_UPGRADE_COST: u32 = 10;
    /// Cost added per level already bought
    pub const COST_INCREASE_PER_LEVEL: u32 = 5;

    /// Seconds between enemy spawns
    pub const SPAWN_INTERVAL_SECS: f32 = 3.0;

    /// Visible play-field edges (world units)
    pub const PLAY_FIELD_LEFT: f32 = -9.0;
    pub const PLAY_FIELD_RIGHT: f32 = 9.0;
    /// Enemies appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 2.0;
    /// Enemies are culled this far past the left edge
    pub const CULL_MARGIN: f32 = 2.0;

    /// Enemy defaults
    pub const ENEMY_SELF_SPEED: f32 = 1.0;
    pub const ENEMY_COIN_REWARD: u32 = 10;
    pub const ENEMY_RADIUS: f32 = 0.5;

    /// Hit effect defaults
    pub const HIT_EFFECT_ID: &str = "slash";
    pub const HIT_EFFECT_LIFETIME_SECS: f32 = 0.5;

    /// Player defaults
    pub const PLAYER_JUMP_FORCE: f32 = 500.0;
    pub const PLAYER_X: f32 = -5.0;
    pub const PLAYER_RADIUS: f32 = 0.5;
}
