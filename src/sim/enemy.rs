//! Enemy archetypes and live enemy behaviour
//!
//! An enemy slides left at scroll speed plus its own speed, is culled past
//! the left edge, and pays out a reward the first time the player touches it.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::progression::ItemReward;
use crate::consts::*;

/// Immutable enemy template, shared by every live instance spawned from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub archetype: String,
    /// Leftward speed on top of the world scroll
    #[serde(default = "default_self_speed")]
    pub self_speed: f32,
    #[serde(default = "default_coin_reward")]
    pub coin_reward: u32,
    #[serde(default)]
    pub item_reward: Option<ItemReward>,
    /// Collision radius (used by the default overlap test)
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_self_speed() -> f32 {
    ENEMY_SELF_SPEED
}

fn default_coin_reward() -> u32 {
    ENEMY_COIN_REWARD
}

fn default_radius() -> f32 {
    ENEMY_RADIUS
}

impl EnemySpec {
    pub fn new(archetype: impl Into<String>) -> Self {
        Self {
            archetype: archetype.into(),
            self_speed: ENEMY_SELF_SPEED,
            coin_reward: ENEMY_COIN_REWARD,
            item_reward: None,
            radius: ENEMY_RADIUS,
        }
    }
}

/// Payout from defeating an enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardEvent {
    pub coins: u32,
    pub item: Option<ItemReward>,
    /// Where the enemy was when it was hit
    pub position: Vec2,
}

/// A live enemy
#[derive(Debug, Clone)]
pub struct EnemyAgent {
    pub id: u32,
    pub spec: Rc<EnemySpec>,
    pub pos: Vec2,
    alive: bool,
}

impl EnemyAgent {
    pub fn new(id: u32, spec: Rc<EnemySpec>, pos: Vec2) -> Self {
        Self {
            id,
            spec,
            pos,
            alive: true,
        }
    }

    /// Slide left and report whether the enemy is still on the field.
    ///
    /// Returns false once it is dead or has passed `cull_x`; the caller removes it.
    pub fn tick(&mut self, dt: f32, scroll_speed: f32, cull_x: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.pos.x -= (scroll_speed + self.spec.self_speed) * dt;
        self.pos.x >= cull_x
    }

    /// React to the collision collaborator reporting a hit.
    ///
    /// Only the first call pays out; the enemy goes inert immediately.
    pub fn on_player_collision(&mut self) -> Option<RewardEvent> {
        if !self.alive {
            return None;
        }
        self.alive = false;
        Some(RewardEvent {
            coins: self.spec.coin_reward,
            item: self.spec.item_reward,
            position: self.pos,
        })
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn archetype(&self) -> &str {
        &self.spec.archetype
    }
}
