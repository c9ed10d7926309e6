//! End-of-run results
//!
//! The numbers the result screen reads once a run has ended.

use serde::{Deserialize, Serialize};

use crate::sim::progression::ItemKind;
use crate::sim::run::{RunPhase, RunState};

/// What the result screen shows for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Session run number (1-based)
    pub run: u32,
    pub outcome: RunPhase,
    /// Coins picked up during the run
    pub coins: u64,
    /// Items picked up during the run, only kinds with a non-zero count, sorted by kind
    pub items: Vec<(ItemKind, u32)>,
    /// Distance traveled (meters)
    pub distance: f32,
    /// Seconds the run lasted
    pub elapsed: f32,
}

impl RunSummary {
    pub fn from_run(run: &RunState) -> Self {
        Self {
            run: run.run_index(),
            outcome: run.phase(),
            coins: run.coins_collected(),
            items: run
                .items_collected()
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(&kind, &count)| (kind, count))
                .collect(),
            distance: run.distance(),
            elapsed: run.elapsed_time(),
        }
    }
}
