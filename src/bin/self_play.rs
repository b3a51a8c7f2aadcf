//! Self-play runner.
//!
//! Plays games on the standard board with MCTS and the uniform oracle,
//! logs each result, and optionally saves the games as an example history.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use rust_tafl::board::Board;
use rust_tafl::nn::{Oracle, UniformOracle};
use rust_tafl::training::{ExampleHistory, SelfPlayConfig, SelfPlayWorker};
use rust_tafl::Side;

#[derive(Parser, Debug)]
#[command(name = "self_play")]
#[command(about = "Play Tafl self-play games with MCTS")]
struct Args {
    /// Games to play
    #[arg(long, default_value_t = 4)]
    games: usize,

    /// Search iterations per move
    #[arg(long, default_value_t = 200)]
    iterations: u32,

    /// Move cap per game
    #[arg(long, default_value_t = 200)]
    max_moves: usize,

    /// Moves sampled with temperature before play turns greedy
    #[arg(long, default_value_t = 20)]
    temperature_threshold: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the played games here (bincode)
    #[arg(long)]
    history_out: Option<String>,

    /// Fallback log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = SelfPlayConfig::default()
        .with_mcts_iterations(args.iterations)
        .with_max_moves(args.max_moves)
        .with_temperature_threshold(args.temperature_threshold)
        .with_history_games(args.games)
        .with_seed(args.seed);
    info!(games = args.games, iterations = args.iterations, "starting self-play");

    let worker = SelfPlayWorker::new(config);
    let oracle = UniformOracle::new(Board::new().action_size());
    let mut history = ExampleHistory::new(args.games);
    let (mut attacker_wins, mut defender_wins, mut unfinished) = (0usize, 0usize, 0usize);

    for game in 0..args.games {
        let seed = args.seed.wrapping_add(game as u64);
        let record = worker.play_episode(Some(&oracle as &dyn Oracle), seed)?;
        match record.winner {
            Some(Side::Attacker) => attacker_wins += 1,
            Some(Side::Defender) => defender_wins += 1,
            None => unfinished += 1,
        }
        info!(game, moves = record.len(), winner = ?record.winner, "game finished");
        history.push(record);
    }

    info!(attacker_wins, defender_wins, unfinished, "self-play finished");

    if let Some(path) = &args.history_out {
        history.save(path)?;
        info!(path = %path, examples = history.total_examples(), "saved history");
    }

    Ok(())
}
