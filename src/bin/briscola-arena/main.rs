//! Pit two Briscola agents against each other over a series of games
//!
//! Usage: briscola-arena --player1 mcts --player2 heuristic --games 100 --seed 7

use std::time::Instant;

use briscola_solver::{
    play_match, AgentKind, AgentSettings, AlphaBetaConfig, Briscola, HybridConfig, MctsConfig,
    RolloutPolicy,
};
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(Parser)]
#[command(name = "briscola-arena")]
#[command(about = "Play Briscola matches between two agents")]
struct Args {
    /// Agent for player 1
    #[arg(long, default_value = "mcts")]
    player1: AgentType,

    /// Agent for player 2
    #[arg(long, default_value = "heuristic")]
    player2: AgentType,

    /// Number of games to play
    #[arg(short, long, default_value = "10")]
    games: usize,

    /// Match seed; omit for a random match
    #[arg(long)]
    seed: Option<u64>,

    /// MCTS trials per candidate move
    #[arg(long, default_value = "200")]
    simulations: usize,

    /// MCTS rollout policy
    #[arg(long, default_value = "random")]
    rollout: Rollout,

    /// Worker threads for MCTS
    #[arg(long, default_value = "1")]
    threads: usize,

    /// Alpha-beta depth limit in plies (exact search when omitted)
    #[arg(long)]
    depth: Option<usize>,

    /// Cards in hand at which the hybrid agent switches to alpha-beta
    #[arg(long, default_value = "3")]
    endgame_tricks: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentType {
    Random,
    Heuristic,
    Mcts,
    AlphaBeta,
    Hybrid,
}

impl From<AgentType> for AgentKind {
    fn from(value: AgentType) -> Self {
        match value {
            AgentType::Random => AgentKind::Random,
            AgentType::Heuristic => AgentKind::Heuristic,
            AgentType::Mcts => AgentKind::Mcts,
            AgentType::AlphaBeta => AgentKind::AlphaBeta,
            AgentType::Hybrid => AgentKind::Hybrid,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Rollout {
    Random,
    Heuristic,
}

impl From<Rollout> for RolloutPolicy {
    fn from(value: Rollout) -> Self {
        match value {
            Rollout::Random => RolloutPolicy::Random,
            Rollout::Heuristic => RolloutPolicy::Heuristic,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mcts = MctsConfig {
        simulations: args.simulations,
        rollout: args.rollout.into(),
        threads: args.threads,
    };
    let alpha_beta = AlphaBetaConfig {
        max_depth: args.depth,
        ..AlphaBetaConfig::default()
    };
    let settings = AgentSettings {
        mcts: mcts.clone(),
        alpha_beta: alpha_beta.clone(),
        hybrid: HybridConfig {
            endgame_tricks: args.endgame_tricks,
            mcts,
            alpha_beta,
        },
    };
    let kinds = [AgentKind::from(args.player1), AgentKind::from(args.player2)];
    info!(player1 = %kinds[0], player2 = %kinds[1], games = args.games, "starting match");

    let start = Instant::now();
    let summary = play_match(&Briscola::new(), kinds, &settings, args.games, args.seed)?;
    println!("{summary}");
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
