//! Engine and agent errors

use thiserror::Error;

use super::cards::Card;
use super::types::Player;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A proposed move is not in the active player's hand
    #[error("illegal move: {card} is not in the hand of {player}")]
    IllegalMove { card: Card, player: Player },

    /// An agent was asked to move in a state with nothing to play
    #[error("no legal moves available")]
    NoLegalMoves,

    /// Fewer unseen cards than the opponent is known to hold
    #[error("cannot determinize: {unseen} unseen cards for a hand of {needed}")]
    DeterminizationImpossible { unseen: usize, needed: usize },

    /// A state that breaks the card conservation rules
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("cannot parse card: {0:?}")]
    ParseCard(String),
}
