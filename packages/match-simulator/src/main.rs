//! Match simulator CLI - plays complete matches between random bots in
//! memory, auditing every state the engine produces.

mod bot;
mod simulator;

use std::time::Instant;

use bot::RandomBot;
use clap::Parser;
use serde::Serialize;
use simulator::{GameResult, Simulator};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Plays random legal matches and checks engine invariants")]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value = "100")]
    games: u32,

    /// Seats per match (2-6)
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(2..=6))]
    players: u8,

    /// Cards per hand (2 or 3)
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u8).range(2..=3))]
    hand_size: u8,

    /// Base seed; match N uses seed + N. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Abandon a match after this many intents
    #[arg(long, default_value = "10000")]
    max_steps: u32,

    /// Print one JSON line per match
    #[arg(long)]
    jsonl: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    games: u32,
    finished: u32,
    failures: u32,
    avg_steps: f64,
    avg_challenges: f64,
    avg_blocks: f64,
    /// Wins per seat index.
    wins_by_seat: Vec<u32>,
    elapsed_ms: f64,
}

fn summarize(results: &[GameResult], players: usize, failures: u32, elapsed_ms: f64) -> Summary {
    let n = results.len().max(1) as f64;
    let mut wins_by_seat = vec![0; players];
    for winner in results.iter().filter_map(|r| r.winner.as_deref()) {
        if let Some(seat) = winner
            .strip_prefix('p')
            .and_then(|s| s.parse::<usize>().ok())
        {
            if let Some(slot) = wins_by_seat.get_mut(seat) {
                *slot += 1;
            }
        }
    }
    Summary {
        games: results.len() as u32 + failures,
        finished: results.iter().filter(|r| r.finished).count() as u32,
        failures,
        avg_steps: results.iter().map(|r| f64::from(r.steps)).sum::<f64>() / n,
        avg_challenges: results.iter().map(|r| f64::from(r.challenges)).sum::<f64>() / n,
        avg_blocks: results.iter().map(|r| f64::from(r.blocks)).sum::<f64>() / n,
        wins_by_seat,
        elapsed_ms,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    engine::telemetry::init_tracing(filter, args.json_logs);

    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(games = args.games, players = args.players, base_seed, "starting simulation");

    let sim = Simulator {
        players: usize::from(args.players),
        hand_size: args.hand_size,
        max_steps: args.max_steps,
    };

    let start = Instant::now();
    let mut results = Vec::new();
    let mut failures = 0;
    for game in 0..u64::from(args.games) {
        let seed = base_seed.wrapping_add(game);
        let bot = RandomBot::new(Some(seed));
        match sim.run_game(seed, &bot) {
            Ok(result) => {
                if args.jsonl {
                    println!("{}", serde_json::to_string(&result)?);
                }
                results.push(result);
            }
            Err(e) => {
                error!(seed, error = %e, "match failed");
                failures += 1;
            }
        }
    }

    let summary = summarize(
        &results,
        sim.players,
        failures,
        start.elapsed().as_secs_f64() * 1000.0,
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if failures > 0 {
        return Err(format!("{failures} match(es) failed an audit").into());
    }
    Ok(())
}
