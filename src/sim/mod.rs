//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by the host's `tick(dt)`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod enemy;
pub mod progression;
pub mod run;
pub mod scroll;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::{CollisionResult, circle_overlap, player_hits};
pub use enemy::{EnemyAgent, EnemySpec, RewardEvent};
pub use progression::{ItemKind, ItemReward, PlayerProgression, UpgradeError};
pub use run::{RunPhase, RunState, RunTick};
pub use scroll::{ScrollSpeedModel, ScrollSpeedSample};
pub use spawner::{EnemySpawnScheduler, SpawnConfigError, SpawnRequest};
pub use state::{GameEvent, GameState, HudSnapshot};
pub use tick::{TickInput, advance_enemies, apply_reward, tick};
