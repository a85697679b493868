//! Two-player Briscola engine and search agents
//!
//! The rules engine ([`Briscola`]) drives a [`GameState`] through leads,
//! follows, trick resolution and draws. Agents choose cards through the
//! [`Agent`] trait:
//! - [`RandomAgent`] and [`HeuristicAgent`] as baselines
//! - [`MctsAgent`]: determinized Monte Carlo evaluation of every legal card
//! - [`AlphaBetaAgent`]: exact or depth-limited minimax with pruning
//! - [`HybridAgent`]: MCTS until the deck runs out, then alpha-beta
//!
//! # Example
//!
//! ```
//! use briscola_solver::{
//!     create_agent, play_game, AgentKind, AgentSettings, Briscola, DECK_POINTS,
//! };
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let game = Briscola::new();
//! let settings = AgentSettings::default();
//! let mut one = create_agent(AgentKind::Heuristic, &settings, Some(1));
//! let mut two = create_agent(AgentKind::Random, &settings, Some(2));
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let record = play_game(&game, [&mut *one, &mut *two], &mut rng).unwrap();
//! assert_eq!(record.tricks.len(), 20);
//! assert_eq!(record.points[0] + record.points[1], DECK_POINTS);
//! ```

mod agent;
pub mod cards;
mod deal;
mod determinize;
mod error;
mod game;
mod hands;
mod heuristic;
mod hybrid;
mod mcts;
mod play;
mod rules;
mod search;
mod state;
pub mod types;

pub use agent::{create_agent, Agent, AgentKind, AgentSettings, RandomAgent};
pub use cards::{
    card_points, card_value, Card, Cards, Points, DECK_POINTS, POINT_SCALE, WINNING_THRESHOLD,
};
pub use deal::{deal, full_deck};
pub use determinize::{determinize, unseen_cards};
pub use error::GameError;
pub use game::{Briscola, TrickResult, Utility};
pub use hands::{format_cards, parse_cards, Hands};
pub use heuristic::{evaluate_follow, heuristic_move, HeuristicAgent};
pub use hybrid::{HybridAgent, HybridConfig};
pub use mcts::{best_move, rollout, MctsAgent, MctsConfig, MoveStats, RolloutPolicy};
pub use play::{play_from, play_game, play_match, GameRecord, MatchSummary};
pub use rules::{beats, trick_winner, TrickOutcome};
pub use search::{evaluate, search, AlphaBetaAgent, AlphaBetaConfig, SearchOutcome, Searcher};
pub use state::{GameState, Phase};
pub use types::{Player, Rank, Suit, HAND_SIZE, NUM_PLAYERS, TOTAL_CARDS, TOTAL_TRICKS};
