//! Quadroids headless runner
//!
//! Runs the simulation on autopilot and prints a JSON summary.
//!
//! Usage: `quadroids [config.json] [ticks] [seed]` (use `-` for the default config)

use serde::Serialize;

use quadroids::SimConfig;
use quadroids::sim::{GamePhase, Outcome, TickInput, World, tick};

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_SEED: u64 = 12345;

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    ticks_run: u64,
    game_over: bool,
    bodies_left: usize,
    asteroids_destroyed: u64,
    bounces: usize,
    destructions: usize,
    degenerate: usize,
    max_nodes: usize,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.first().map(String::as_str) {
        None | Some("-") => SimConfig::default(),
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
    };
    let ticks = parse_arg(&args, 1, "ticks", DEFAULT_TICKS);
    let seed = parse_arg(&args, 2, "seed", DEFAULT_SEED);

    log::info!(
        "Quadroids starting: arena {}, {} asteroids, {} ticks, seed {}",
        config.arena_size,
        config.asteroid_count,
        ticks,
        seed
    );

    let mut world = World::new(config, seed);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut summary = RunSummary {
        seed,
        ..Default::default()
    };

    for _ in 0..ticks {
        if world.phase == GamePhase::GameOver {
            break;
        }
        let report = tick(&mut world, &input);
        summary.bounces += report.count(Outcome::Bounced);
        summary.destructions += report.count(Outcome::Destroyed);
        summary.degenerate += report.count(Outcome::Degenerate);
        summary.max_nodes = summary.max_nodes.max(report.nodes);
    }

    summary.ticks_run = world.time_ticks;
    summary.game_over = world.phase == GamePhase::GameOver;
    summary.bodies_left = world.bodies.len();
    summary.asteroids_destroyed = world.asteroids_destroyed;

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to encode summary: {}", err),
    }
}

fn parse_arg(args: &[String], index: usize, name: &str, default: u64) -> u64 {
    match args.get(index) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {} '{}', using {}", name, raw, default);
            default
        }),
    }
}
