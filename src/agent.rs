//! Move-selection agents
//!
//! Every strategy implements [`Agent`]. The driver hands each agent an
//! immutable snapshot of the live state; agents that explore copy it.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::cards::Card;
use super::error::GameError;
use super::game::Briscola;
use super::heuristic::HeuristicAgent;
use super::hybrid::{HybridAgent, HybridConfig};
use super::mcts::{MctsAgent, MctsConfig};
use super::search::{AlphaBetaAgent, AlphaBetaConfig};
use super::state::GameState;

/// A move-selection strategy
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose a card from `game.legal_moves(state)`
    fn generate_move(&mut self, state: &GameState, game: &Briscola) -> Result<Card, GameError>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate_move(&mut self, state: &GameState, game: &Briscola) -> Result<Card, GameError> {
        (**self).generate_move(state, game)
    }
}

/// Seeded RNG, or entropy when no seed is given
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Plays a uniformly random legal card
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub const NAME: &'static str = "random";

    pub fn new(seed: Option<u64>) -> Self {
        RandomAgent {
            rng: make_rng(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn generate_move(&mut self, state: &GameState, game: &Briscola) -> Result<Card, GameError> {
        game.legal_moves(state)
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalMoves)
    }
}

/// The registered strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Random,
    Heuristic,
    Mcts,
    /// Full-game alpha-beta. It searches the state it is handed, so it sees
    /// the real opponent hand and draw order; pass it a determinized or
    /// endgame state when it must play fair.
    AlphaBeta,
    Hybrid,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Random,
        AgentKind::Heuristic,
        AgentKind::Mcts,
        AgentKind::AlphaBeta,
        AgentKind::Hybrid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Random => RandomAgent::NAME,
            AgentKind::Heuristic => HeuristicAgent::NAME,
            AgentKind::Mcts => MctsAgent::NAME,
            AgentKind::AlphaBeta => AlphaBetaAgent::NAME,
            AgentKind::Hybrid => HybridAgent::NAME,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown agent {s:?}"))
    }
}

/// Search settings shared by the factory
#[derive(Clone, Debug, Default)]
pub struct AgentSettings {
    pub mcts: MctsConfig,
    pub alpha_beta: AlphaBetaConfig,
    pub hybrid: HybridConfig,
}

/// Build an agent of the given kind
pub fn create_agent(
    kind: AgentKind,
    settings: &AgentSettings,
    seed: Option<u64>,
) -> Box<dyn Agent + Send> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::new(seed)),
        AgentKind::Heuristic => Box::new(HeuristicAgent::new()),
        AgentKind::Mcts => Box::new(MctsAgent::new(settings.mcts.clone(), seed)),
        AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::new(settings.alpha_beta.clone())),
        AgentKind::Hybrid => Box::new(HybridAgent::new(settings.hybrid.clone(), seed)),
    }
}
