//! Alpha-beta minimax over a fully observable state
//!
//! Values are from the searching player's point of view: 1.0 for a win, 0.0
//! for a loss (60-60 included). When a depth limit is set, positions at the
//! limit are scored by [`evaluate`], which stays strictly inside (0, 1) so a
//! proven result always dominates an estimate.
//!
//! Inner nodes try the heuristic card first when pruning. The root always
//! walks the legal moves in hand order and keeps the first strictly better
//! value, so pruned and unpruned searches choose the same card.

use std::time::Instant;

use tracing::debug;

use super::agent::Agent;
use super::cards::*;
use super::error::GameError;
use super::game::{Briscola, Utility};
use super::heuristic::heuristic_move;
use super::state::GameState;
use super::types::*;

pub const WIN_VALUE: f64 = 1.0;
pub const LOSS_VALUE: f64 = 0.0;

const EVAL_CENTER: f64 = 0.5;
const EVAL_SPREAD: f64 = 0.49;
const EVAL_MIN: f64 = 0.01;
const EVAL_MAX: f64 = 0.99;

#[derive(Clone, Debug)]
pub struct AlphaBetaConfig {
    /// Plies below the root before falling back to [`evaluate`]; `None`
    /// searches to the end of the game
    pub max_depth: Option<usize>,
    /// `false` runs plain minimax over the same tree
    pub pruning: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        AlphaBetaConfig {
            max_depth: None,
            pruning: true,
        }
    }
}

/// Result of a root search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    pub best: Card,
    pub value: f64,
    pub nodes: u64,
}

/// Static score of a non-terminal position for `player`: captured plus
/// in-hand point differential, squeezed into (0.01, 0.99)
pub fn evaluate(state: &GameState, player: Player) -> f64 {
    let holding = |p: Player| {
        let in_hand: Points = state.hand(p).iter().map(|&c| card_points(c)).sum();
        points_to_value(state.points(p) + in_hand)
    };
    let diff = holding(player) - holding(player.other());
    (EVAL_CENTER + EVAL_SPREAD * diff / 120.0).clamp(EVAL_MIN, EVAL_MAX)
}

fn terminal_value(game: &Briscola, state: &GameState, player: Player) -> f64 {
    match game.utility(state, player) {
        Utility::Win => WIN_VALUE,
        Utility::Loss => LOSS_VALUE,
    }
}

/// Put the heuristic choice first, keeping the rest in hand order
fn order_moves(state: &GameState, moves: &mut [Card]) {
    if let Some(pick) = heuristic_move(state) {
        if let Some(pos) = moves.iter().position(|&c| c == pick) {
            moves[..=pos].rotate_right(1);
        }
    }
}

/// Recursive minimax with optional alpha-beta cutoffs
pub struct Searcher<'a> {
    game: &'a Briscola,
    config: &'a AlphaBetaConfig,
    player: Player,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    /// Search on behalf of `player`
    pub fn new(game: &'a Briscola, config: &'a AlphaBetaConfig, player: Player) -> Self {
        Searcher {
            game,
            config,
            player,
            nodes: 0,
        }
    }

    /// Positions visited so far
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Value of `state`, `depth` plies below the root. Fail-soft: a result
    /// outside (alpha, beta) is a bound, inside it is exact.
    pub fn value(
        &mut self,
        state: &GameState,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64, GameError> {
        self.nodes += 1;
        if self.game.is_terminal(state) {
            return Ok(terminal_value(self.game, state, self.player));
        }
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            return Ok(evaluate(state, self.player));
        }

        let maximizing = self.game.to_move(state) == self.player;
        let mut moves = self.game.legal_moves(state);
        if moves.is_empty() {
            return Err(GameError::NoLegalMoves);
        }
        if self.config.pruning {
            order_moves(state, &mut moves);
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for card in moves {
            let child = self.game.apply_move(state, card)?;
            let value = self.value(&child, depth + 1, alpha, beta)?;
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if self.config.pruning && alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}

/// Best move for the active player of a fully observable `state`
pub fn search(
    game: &Briscola,
    state: &GameState,
    config: &AlphaBetaConfig,
) -> Result<SearchOutcome, GameError> {
    let start = Instant::now();
    let player = game.to_move(state);
    let mut searcher = Searcher::new(game, config, player);
    let mut best: Option<(Card, f64)> = None;
    let mut alpha = f64::NEG_INFINITY;

    for card in game.legal_moves(state) {
        let child = game.apply_move(state, card)?;
        let value = searcher.value(&child, 1, alpha, f64::INFINITY)?;
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((card, value));
        }
        if config.pruning {
            alpha = alpha.max(value);
        }
    }

    let (best, value) = best.ok_or(GameError::NoLegalMoves)?;
    debug!(
        %best,
        value,
        nodes = searcher.nodes(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "alpha-beta search"
    );
    Ok(SearchOutcome {
        best,
        value,
        nodes: searcher.nodes(),
    })
}

/// Plays the alpha-beta choice, reading the real opponent hand
pub struct AlphaBetaAgent {
    config: AlphaBetaConfig,
}

impl AlphaBetaAgent {
    pub const NAME: &'static str = "alphabeta";

    pub fn new(config: AlphaBetaConfig) -> Self {
        AlphaBetaAgent { config }
    }
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn generate_move(&mut self, state: &GameState, game: &Briscola) -> Result<Card, GameError> {
        match game.legal_moves(state).as_slice() {
            [] => Err(GameError::NoLegalMoves),
            [only] => Ok(*only),
            _ => search(game, state, &self.config).map(|outcome| outcome.best),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::make_rng;
    use crate::deal::deal;
    use crate::hands::Hands;
    use rand::seq::SliceRandom;

    fn card(s: &str) -> Card {
        Card::parse(s).unwrap()
    }

    fn exact(pruning: bool) -> AlphaBetaConfig {
        AlphaBetaConfig {
            max_depth: None,
            pruning,
        }
    }

    /// Random play from a fresh deal until the deck is gone and each hand
    /// holds at most `cards`
    fn endgame(seed: u64, cards: usize) -> GameState {
        let game = Briscola::new();
        let mut rng = make_rng(Some(seed));
        let mut state = deal(&mut rng);
        while state.deck_len() > 0 || state.hand(state.active_player()).len() > cards {
            let card = *game.legal_moves(&state).choose(&mut rng).unwrap();
            game.play(&mut state, card).unwrap();
        }
        state
    }

    #[test]
    fn test_evaluate_is_inside_open_interval() {
        let state = deal(&mut make_rng(Some(6)));
        for player in Player::BOTH {
            let v = evaluate(&state, player);
            assert!(v > LOSS_VALUE && v < WIN_VALUE);
        }
        let sum = evaluate(&state, Player::One) + evaluate(&state, Player::Two);
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_finds_the_winning_capture() {
        // Player 2 led 3D; player 1 (45 points) wins only by trumping it
        let hands = Hands::parse("AB 4C / 2S").unwrap();
        let table = vec![card("3D")];
        let mut used = hands.all_cards();
        used.add(card("3D"));
        let one: Cards = ["AD", "AS", "AC", "3B", "JB"]
            .iter()
            .filter_map(|s| Card::parse(s))
            .collect();
        let two = used.complement().different(one);
        let state =
            GameState::from_parts(hands, table, Player::One, [one, two], card("KB"), Vec::new())
                .unwrap();
        let outcome = search(&Briscola::new(), &state, &exact(true)).unwrap();
        assert_eq!(outcome.best, card("AB"));
        assert_eq!(outcome.value, WIN_VALUE);
    }

    #[test]
    fn test_pruning_matches_minimax() {
        let game = Briscola::new();
        for seed in 0..12 {
            let state = endgame(seed, 2);
            let pruned = search(&game, &state, &exact(true)).unwrap();
            let full = search(&game, &state, &exact(false)).unwrap();
            assert_eq!(pruned.best, full.best, "seed {seed}");
            assert_eq!(pruned.value, full.value, "seed {seed}");
            assert!(pruned.nodes <= full.nodes);
        }
    }

    #[test]
    fn test_depth_limit_on_fresh_deal() {
        let game = Briscola::new();
        let state = deal(&mut make_rng(Some(12)));
        let config = AlphaBetaConfig {
            max_depth: Some(3),
            pruning: true,
        };
        let outcome = search(&game, &state, &config).unwrap();
        assert!(game.legal_moves(&state).contains(&outcome.best));
        assert!(outcome.value > LOSS_VALUE && outcome.value < WIN_VALUE);

        let full = search(&game, &state, &AlphaBetaConfig { pruning: false, ..config }).unwrap();
        assert_eq!(outcome.best, full.best);
        assert_eq!(outcome.value, full.value);
    }

    #[test]
    fn test_value_is_a_proven_result_with_empty_deck() {
        let game = Briscola::new();
        let state = endgame(31, 3);
        let outcome = search(&game, &state, &exact(true)).unwrap();
        assert!(outcome.value == WIN_VALUE || outcome.value == LOSS_VALUE);
    }

    #[test]
    fn test_agent_shortcuts_single_move() {
        let game = Briscola::new();
        let state = endgame(3, 1);
        let mut agent = AlphaBetaAgent::new(AlphaBetaConfig::default());
        let only = game.legal_moves(&state)[0];
        assert_eq!(agent.generate_move(&state, &game).unwrap(), only);
    }
}
