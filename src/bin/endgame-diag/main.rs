//! Solve a Briscola endgame with and without pruning and compare the work done
//!
//! A position is either given explicitly:
//!   endgame-diag --hands "AB 4C / 2S" --table 3D --active 1 --trump KB --taken1 "AD AS AC 3B JB"
//! (player 2 is credited with every card not placed elsewhere), or generated
//! by random play from a seeded deal:
//!   endgame-diag --seed 7 --cards 3

use std::time::Instant;

use briscola_solver::{
    deal, parse_cards, search, AlphaBetaConfig, Briscola, Card, Cards, GameState, Hands, Player,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

#[derive(Parser)]
#[command(name = "endgame-diag")]
#[command(about = "Alpha-beta endgame diagnostics")]
struct Args {
    /// Hands as "<player 1> / <player 2>", '-' for an empty hand
    #[arg(long, requires_all = ["trump", "active"])]
    hands: Option<String>,

    /// Card already led to the current trick
    #[arg(long, requires = "hands")]
    table: Option<String>,

    /// Trump indicator card
    #[arg(long)]
    trump: Option<String>,

    /// Player to move (1 or 2)
    #[arg(long)]
    active: Option<u8>,

    /// Cards captured by player 1
    #[arg(long, requires = "hands")]
    taken1: Option<String>,

    /// Seed for a randomly played-out position
    #[arg(long, conflicts_with = "hands", default_value = "1")]
    seed: u64,

    /// Cards left in the mover's hand for a random position
    #[arg(long, default_value = "3")]
    cards: usize,

    /// Depth limit in plies
    #[arg(long)]
    depth: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_card(s: &str) -> Result<Card, String> {
    s.parse::<Card>().map_err(|e| e.to_string())
}

fn explicit_position(args: &Args, hands: &str) -> Result<GameState, String> {
    let hands = Hands::parse(hands).ok_or_else(|| format!("bad hands {hands:?}"))?;
    let table = match &args.table {
        Some(t) => parse_cards(t).ok_or_else(|| format!("bad table {t:?}"))?,
        None => Vec::new(),
    };
    let trump = parse_card(args.trump.as_deref().unwrap_or_default())?;
    let active = args
        .active
        .and_then(Player::from_number)
        .ok_or("active must be 1 or 2")?;
    let taken1: Cards = match &args.taken1 {
        Some(t) => parse_cards(t)
            .ok_or_else(|| format!("bad taken pile {t:?}"))?
            .into_iter()
            .collect(),
        None => Cards::new(),
    };

    let mut used = hands.all_cards();
    used.add_cards(table.iter().collect());
    used.add_cards(taken1);
    let taken2 = used.complement();
    GameState::from_parts(hands, table, active, [taken1, taken2], trump, Vec::new())
        .map_err(|e| e.to_string())
}

fn random_position(seed: u64, cards: usize) -> Result<GameState, String> {
    let game = Briscola::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = deal(&mut rng);
    while state.deck_len() > 0 || state.hand(state.active_player()).len() > cards {
        let card = *game
            .legal_moves(&state)
            .choose(&mut rng)
            .ok_or("game ended before the requested position")?;
        game.play(&mut state, card).map_err(|e| e.to_string())?;
    }
    Ok(state)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = match &args.hands {
        Some(hands) => explicit_position(&args, hands)?,
        None => random_position(args.seed, args.cards)?,
    };
    println!("{state}");
    println!();

    let game = Briscola::new();
    for pruning in [true, false] {
        let config = AlphaBetaConfig {
            max_depth: args.depth,
            pruning,
        };
        debug!(?config, "solving");
        let start = Instant::now();
        let outcome = search(&game, &state, &config)?;
        println!(
            "{:<10} best {}  value {:.4}  nodes {:>10}  time {:.3}s",
            if pruning { "alphabeta" } else { "minimax" },
            outcome.best,
            outcome.value,
            outcome.nodes,
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}
