//! MCTS for most of the game, exact alpha-beta once the deck is gone
//!
//! With an empty deck every unseen card is in the opponent's hand, so a
//! determinization is the true position and the endgame can be solved.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::agent::{make_rng, Agent};
use super::cards::Card;
use super::determinize::determinize;
use super::error::GameError;
use super::game::Briscola;
use super::mcts::{MctsAgent, MctsConfig};
use super::search::{search, AlphaBetaConfig};
use super::state::GameState;

#[derive(Clone, Debug)]
pub struct HybridConfig {
    /// Switch to alpha-beta when the deck is empty and the hand holds at
    /// most this many cards
    pub endgame_tricks: usize,
    pub mcts: MctsConfig,
    pub alpha_beta: AlphaBetaConfig,
}

impl Default for HybridConfig {
    fn default() -> Self {
        HybridConfig {
            endgame_tricks: 3,
            mcts: MctsConfig::default(),
            alpha_beta: AlphaBetaConfig::default(),
        }
    }
}

pub struct HybridAgent {
    endgame_tricks: usize,
    alpha_beta: AlphaBetaConfig,
    mcts: MctsAgent,
    rng: StdRng,
}

impl HybridAgent {
    pub const NAME: &'static str = "hybrid";

    pub fn new(config: HybridConfig, seed: Option<u64>) -> Self {
        let mut rng = make_rng(seed);
        let mcts_seed: u64 = rng.gen();
        HybridAgent {
            endgame_tricks: config.endgame_tricks,
            alpha_beta: config.alpha_beta,
            mcts: MctsAgent::new(config.mcts, Some(mcts_seed)),
            rng,
        }
    }

    /// True when `state` is handed to the endgame solver
    pub fn in_endgame(&self, state: &GameState) -> bool {
        state.deck_len() == 0 && state.hand(state.active_player()).len() <= self.endgame_tricks
    }
}

impl Agent for HybridAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn generate_move(&mut self, state: &GameState, game: &Briscola) -> Result<Card, GameError> {
        if !self.in_endgame(state) {
            return self.mcts.generate_move(state, game);
        }
        let me = state.active_player();
        let known = determinize(state, me, &mut self.rng)?;
        let outcome = search(game, &known, &self.alpha_beta)?;
        debug!(best = %outcome.best, value = outcome.value, "hybrid endgame");
        Ok(outcome.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::deal;
    use rand::seq::SliceRandom;

    fn config(endgame_tricks: usize) -> HybridConfig {
        let mut config = HybridConfig {
            endgame_tricks,
            ..HybridConfig::default()
        };
        config.mcts.simulations = 6;
        config
    }

    #[test]
    fn test_switches_only_after_deck_is_empty() {
        let game = Briscola::new();
        let mut rng = make_rng(Some(19));
        let mut state = deal(&mut rng);
        let agent = HybridAgent::new(config(3), Some(1));
        assert!(!agent.in_endgame(&state));
        while state.deck_len() > 0 {
            assert!(!agent.in_endgame(&state));
            let card = *game.legal_moves(&state).choose(&mut rng).unwrap();
            game.play(&mut state, card).unwrap();
        }
        assert!(agent.in_endgame(&state));
        assert!(!HybridAgent::new(config(2), Some(1)).in_endgame(&state));
    }

    #[test]
    fn test_endgame_move_matches_alpha_beta_on_true_state() {
        let game = Briscola::new();
        let mut rng = make_rng(Some(23));
        let mut state = deal(&mut rng);
        while state.deck_len() > 0 {
            let card = *game.legal_moves(&state).choose(&mut rng).unwrap();
            game.play(&mut state, card).unwrap();
        }
        let mut agent = HybridAgent::new(config(3), Some(5));
        let expected = search(&game, &state, &AlphaBetaConfig::default()).unwrap().best;
        assert_eq!(agent.generate_move(&state, &game).unwrap(), expected);
    }

    #[test]
    fn test_early_move_is_legal() {
        let game = Briscola::new();
        let state = deal(&mut make_rng(Some(8)));
        let mut agent = HybridAgent::new(config(3), Some(2));
        let card = agent.generate_move(&state, &game).unwrap();
        assert!(game.legal_moves(&state).contains(&card));
    }
}
