//! Headless demo driver
//!
//! Runs complete rounds with the built-in enemy policy driving every
//! seat, player's included, and logs the outcomes. Useful for watching
//! balance changes and for soak-testing determinism from the command
//! line. Renderers integrate against the library crate instead.

use glam::IVec2;

use gridblast::config::{EnemySpawn, GameConfig, Wave};
use gridblast::consts::SIM_DT;
use gridblast::sim::{AiState, Controller, GameState, Phase, SimulationClock, TickInput};

/// Rounds that outlive this are called off as stalled
const ROUND_TIME_LIMIT: f32 = 300.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if std::env::args().any(|arg| arg == "--help") {
        println!("Usage: gridblast [--seed N] [--rounds N]");
        std::process::exit(0);
    }
    let seed = arg_value("--seed").unwrap_or(4242);
    let rounds = arg_value("--rounds").unwrap_or(3);

    let config = demo_config();
    if let Err(err) = config.validate() {
        log::error!("demo config rejected: {err}");
        std::process::exit(1);
    }

    log::info!("running {rounds} rounds from seed {seed}");
    let mut last_standing = 0u64;
    let mut draws = 0u64;
    let mut stalls = 0u64;
    for round in 0..rounds {
        match run_round(config.clone(), seed.wrapping_add(round)) {
            Phase::Won => last_standing += 1,
            Phase::Draw => draws += 1,
            Phase::Playing => stalls += 1,
            // No human seat, so a loss cannot happen
            Phase::Lost => {}
        }
    }
    log::info!(
        "demo complete: {last_standing} rounds with a last survivor, {draws} draws, {stalls} stalled"
    );
}

/// Default round plus a late reinforcement wave through the middle
fn demo_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.waves.push(Wave {
        at: 25.0,
        spawns: vec![
            EnemySpawn {
                archetype: "scout".to_string(),
                tile: IVec2::new(7, 1),
            },
            EnemySpawn {
                archetype: "sapper".to_string(),
                tile: IVec2::new(7, 11),
            },
        ],
    });
    config
}

fn run_round(config: GameConfig, seed: u64) -> Phase {
    let mut state = GameState::new(config, seed);

    // Hand the player seat to the built-in policy so the round plays
    // itself; last actor standing wins.
    let interval = state.config.ai.decision_interval;
    if let Some(player) = state.actors.iter_mut().find(|a| a.is_human()) {
        player.controller = Controller::Ai(AiState::new(interval));
    }

    let mut clock = SimulationClock::default();
    let mut input = TickInput::default();
    while state.phase == Phase::Playing && state.time < ROUND_TIME_LIMIT {
        clock.advance(&mut state, &mut input, SIM_DT);
    }

    match state.phase {
        Phase::Playing => log::warn!(
            "seed {seed}: stalled at {:.0}s with {} actors left",
            state.time,
            state.actors.len()
        ),
        phase => log::info!(
            "seed {seed}: {phase:?} at {:.1}s after {} ticks",
            state.time,
            state.ticks
        ),
    }
    state.phase
}

fn arg_value(flag: &str) -> Option<u64> {
    let args: Vec<String> = std::env::args().collect();
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1)?.parse().ok()
}
