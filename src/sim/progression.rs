//! Player progression: coin wallet, collected items and the move speed upgrade
//!
//! Lives for the whole session; runs come and go around it.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Collectible item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    Gem,
    HealthPotion,
    Feather,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Coin,
        ItemKind::Gem,
        ItemKind::HealthPotion,
        ItemKind::Feather,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Coin => "Coin",
            ItemKind::Gem => "Gem",
            ItemKind::HealthPotion => "HealthPotion",
            ItemKind::Feather => "Feather",
        }
    }
}

/// An item grant: kind plus how many
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReward {
    pub kind: ItemKind,
    pub count: u32,
}

/// Why an upgrade purchase was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UpgradeError {
    #[error("upgrade costs {cost} coins but only {balance} available")]
    InsufficientCoins { cost: u64, balance: u64 },
}

/// Balance knobs for the upgrade curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    pub base_move_speed: f32,
    pub speed_gain_per_level: f32,
    pub initial_upgrade_cost: u32,
    /// Non-zero so every level costs strictly more than the last
    pub cost_increase_per_level: NonZeroU32,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            base_move_speed: BASE_MOVE_SPEED,
            speed_gain_per_level: SPEED_GAIN_PER_LEVEL,
            initial_upgrade_cost: INITIAL_UPGRADE_COST,
            cost_increase_per_level: NonZeroU32::new(COST_INCREASE_PER_LEVEL)
                .unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Session-wide player progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProgression {
    coin_balance: u64,
    /// One entry per item kind, sorted by kind for stable iteration
    item_counts: BTreeMap<ItemKind, u32>,
    /// Starts at 1, only ever goes up
    move_speed_level: u32,
    tuning: ProgressionTuning,
}

impl Default for PlayerProgression {
    fn default() -> Self {
        Self::new(ProgressionTuning::default())
    }
}

impl PlayerProgression {
    pub fn new(tuning: ProgressionTuning) -> Self {
        Self {
            coin_balance: 0,
            item_counts: ItemKind::ALL.iter().map(|&kind| (kind, 0)).collect(),
            move_speed_level: 1,
            tuning,
        }
    }

    /// Credit coins. Zero or negative amounts are ignored.
    pub fn add_coins(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        self.coin_balance = self.coin_balance.saturating_add(amount as u64);
    }

    /// Add `count` of an item. Zero or negative counts are ignored.
    pub fn add_item(&mut self, kind: ItemKind, count: i64) {
        if count <= 0 {
            return;
        }
        let entry = self.item_counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(count.min(u32::MAX as i64) as u32);
    }

    /// Apply an optional item grant (the usual enemy reward shape)
    pub fn add_reward_item(&mut self, item: Option<ItemReward>) {
        if let Some(item) = item {
            self.add_item(item.kind, item.count as i64);
        }
    }

    /// Price of the next move speed level
    pub fn upgrade_cost(&self) -> u64 {
        let increase = self.tuning.cost_increase_per_level.get() as u64;
        self.tuning.initial_upgrade_cost as u64 + (self.move_speed_level as u64 - 1) * increase
    }

    /// Buy one move speed level, reporting why it failed.
    ///
    /// On success returns the new level.
    pub fn upgrade_move_speed(&mut self) -> Result<u32, UpgradeError> {
        let cost = self.upgrade_cost();
        if self.coin_balance < cost {
            return Err(UpgradeError::InsufficientCoins {
                cost,
                balance: self.coin_balance,
            });
        }

        self.coin_balance -= cost;
        self.move_speed_level += 1;
        log::info!(
            "Move speed upgraded to level {} for {} coins ({} left)",
            self.move_speed_level,
            cost,
            self.coin_balance
        );
        Ok(self.move_speed_level)
    }

    /// Buy one move speed level. Returns false (and changes nothing) if unaffordable.
    pub fn try_upgrade_move_speed(&mut self) -> bool {
        self.upgrade_move_speed().is_ok()
    }

    #[inline]
    pub fn coin_balance(&self) -> u64 {
        self.coin_balance
    }

    pub fn item_count(&self, kind: ItemKind) -> u32 {
        self.item_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn item_counts(&self) -> &BTreeMap<ItemKind, u32> {
        &self.item_counts
    }

    #[inline]
    pub fn move_speed_level(&self) -> u32 {
        self.move_speed_level
    }

    fn move_speed_at(&self, level: u32) -> f32 {
        self.tuning.base_move_speed + (level - 1) as f32 * self.tuning.speed_gain_per_level
    }

    /// Current move speed derived from the upgrade level
    pub fn actual_move_speed(&self) -> f32 {
        self.move_speed_at(self.move_speed_level)
    }

    /// Move speed after one more upgrade (shop preview)
    pub fn next_move_speed(&self) -> f32 {
        self.move_speed_at(self.move_speed_level + 1)
    }

    pub fn can_afford_upgrade(&self) -> bool {
        self.coin_balance >= self.upgrade_cost()
    }
}
