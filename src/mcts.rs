//! Determinized Monte Carlo move evaluation
//!
//! For each candidate card the agent runs independent trials: sample the
//! hidden cards, play the candidate, roll the game out to the end, and count
//! wins. The candidate with the most wins is played (earliest in hand order on
//! ties). Candidates can be spread over worker threads; each candidate owns
//! an RNG seeded before any trial runs, so the thread count never changes
//! the result.

use std::thread;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::agent::{make_rng, Agent};
use super::cards::Card;
use super::determinize::determinize;
use super::error::GameError;
use super::game::{Briscola, Utility};
use super::heuristic::heuristic_move;
use super::state::GameState;
use super::types::Player;

/// Move policy used for both sides during rollouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RolloutPolicy {
    #[default]
    Random,
    Heuristic,
}

#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Trials per candidate move
    pub simulations: usize,
    pub rollout: RolloutPolicy,
    /// Worker threads (1 = evaluate on the calling thread)
    pub threads: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            simulations: 200,
            rollout: RolloutPolicy::Random,
            threads: 1,
        }
    }
}

/// Trial results for one candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveStats {
    pub card: Card,
    pub wins: usize,
    pub trials: usize,
}

impl MoveStats {
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.wins as f64 / self.trials as f64
        }
    }
}

pub struct MctsAgent {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsAgent {
    pub const NAME: &'static str = "mcts";

    pub fn new(config: MctsConfig, seed: Option<u64>) -> Self {
        MctsAgent {
            config,
            rng: make_rng(seed),
        }
    }

    /// Run the trials for every legal move of the active player
    pub fn evaluate(
        &mut self,
        state: &GameState,
        game: &Briscola,
    ) -> Result<Vec<MoveStats>, GameError> {
        let me = state.active_player();
        let jobs: Vec<(Card, u64)> = game
            .legal_moves(state)
            .into_iter()
            .map(|card| (card, self.rng.gen()))
            .collect();

        let threads = self.config.threads.max(1).min(jobs.len().max(1));
        let config = &self.config;
        let results: Vec<Result<MoveStats, GameError>> = if threads <= 1 {
            jobs.iter()
                .map(|&(card, seed)| run_trials(game, state, me, card, seed, config))
                .collect()
        } else {
            let chunk = jobs.len().div_ceil(threads);
            thread::scope(|scope| {
                let handles: Vec<_> = jobs
                    .chunks(chunk)
                    .map(|part| {
                        scope.spawn(move || {
                            part.iter()
                                .map(|&(card, seed)| run_trials(game, state, me, card, seed, config))
                                .collect::<Vec<_>>()
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .flat_map(|handle| match handle.join() {
                        Ok(part) => part,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                    .collect()
            })
        };
        results.into_iter().collect()
    }
}

impl Agent for MctsAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn generate_move(&mut self, state: &GameState, game: &Briscola) -> Result<Card, GameError> {
        let moves = game.legal_moves(state);
        match moves.as_slice() {
            [] => Err(GameError::NoLegalMoves),
            [only] => Ok(*only),
            _ => {
                let stats = self.evaluate(state, game)?;
                for s in &stats {
                    debug!(card = %s.card, wins = s.wins, trials = s.trials, "mcts candidate");
                }
                best_move(&stats).ok_or(GameError::NoLegalMoves)
            }
        }
    }
}

/// Most wins, earliest candidate on ties
pub fn best_move(stats: &[MoveStats]) -> Option<Card> {
    let mut best: Option<&MoveStats> = None;
    for s in stats {
        if best.map_or(true, |b| s.wins > b.wins) {
            best = Some(s);
        }
    }
    best.map(|s| s.card)
}

fn run_trials(
    game: &Briscola,
    state: &GameState,
    me: Player,
    card: Card,
    seed: u64,
    config: &MctsConfig,
) -> Result<MoveStats, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut wins = 0;
    for _ in 0..config.simulations {
        let mut sim = determinize(state, me, &mut rng)?;
        game.play(&mut sim, card)?;
        rollout(game, &mut sim, config.rollout, &mut rng)?;
        if game.utility(&sim, me) == Utility::Win {
            wins += 1;
        }
    }
    Ok(MoveStats {
        card,
        wins,
        trials: config.simulations,
    })
}

/// Play the game out to the end with `policy` for both sides
pub fn rollout<R: Rng + ?Sized>(
    game: &Briscola,
    state: &mut GameState,
    policy: RolloutPolicy,
    rng: &mut R,
) -> Result<(), GameError> {
    while !game.is_terminal(state) {
        let card = match policy {
            RolloutPolicy::Random => state.hand(state.active_player()).choose(rng).copied(),
            RolloutPolicy::Heuristic => heuristic_move(state),
        }
        .ok_or(GameError::NoLegalMoves)?;
        game.play(state, card)?;
    }
    Ok(())
}
