//! Endless Runner headless host
//!
//! Runs the simulation without a renderer: a fixed 60 Hz frame loop, the
//! built-in overlap test standing in for physics, and the shop visited
//! between runs. Pass a tuning JSON path as the first argument to override
//! the defaults; set `RUST_LOG=debug` to watch spawns and culls.

use endless_runner::Tuning;
use endless_runner::sim::{GameEvent, GameState, TickInput, player_hits, tick};

/// Host frame time
const FRAME_DT: f32 = 1.0 / 60.0;
/// Runs played before exiting
const RUNS: u32 = 3;

fn main() {
    env_logger::init();
    log::info!("Endless Runner (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}, falling back to default tuning");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let player = tuning.player;
    let mut state = GameState::new(tuning);

    for run in 0..RUNS {
        let mut input = TickInput {
            new_run: run > 0,
            ..Default::default()
        };

        while state.run.is_active() || input.new_run {
            // Overlaps from the previous frame's positions
            input.collisions = player_hits(player.position, player.radius, &state.enemies);
            // Hop every second
            input.jump = state.time_ticks % 60 == 0;

            for event in tick(&mut state, &input, FRAME_DT) {
                match event {
                    GameEvent::EnemyDefeated { id, reward } => {
                        log::debug!("Enemy {} defeated for {} coins", id, reward.coins)
                    }
                    GameEvent::TimeUp => log::info!("Time up!"),
                    _ => {}
                }
            }
            input.new_run = false;
        }

        let summary = state.summary();
        let items: Vec<String> = summary
            .items
            .iter()
            .map(|(kind, count)| format!("{} x{}", kind.as_str(), count))
            .collect();
        log::info!(
            "Run {} over: {:.2} m, {} coins, items [{}]",
            summary.run,
            summary.distance,
            summary.coins,
            items.join(", ")
        );

        // Visit the shop between runs
        let shop = TickInput {
            upgrade: true,
            ..Default::default()
        };
        while state.hud().can_afford_upgrade {
            tick(&mut state, &shop, 0.0);
        }
        let hud = state.hud();
        log::info!(
            "Wallet {} coins, move speed level {} ({:.1} -> {:.1} for {} coins)",
            hud.coin_balance,
            hud.move_speed_level,
            hud.move_speed,
            hud.next_move_speed,
            hud.upgrade_cost
        );
    }
}
