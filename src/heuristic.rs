//! Greedy one-trick heuristic
//!
//! Leading: throw the cheapest card. Following: score every card by the value
//! of the trick it produces, positive when it wins and negative when it loses,
//! and play the best score. Losing a rich trick is worse than losing a poor
//! one, so high cards are not dumped into a lost trick.

use super::agent::Agent;
use super::cards::*;
use super::error::GameError;
use super::game::Briscola;
use super::rules::beats;
use super::state::GameState;
use super::types::Suit;

/// Signed value of following `led` with `card`, in ten-thousandths
#[inline]
pub fn evaluate_follow(led: Card, card: Card, trump: Suit) -> i64 {
    let total = i64::from(card_points(led) + card_points(card));
    if beats(led, card, trump) {
        total
    } else {
        -total
    }
}

/// Heuristic choice for the active player, `None` with an empty hand.
/// Ties keep the earliest card in hand order.
pub fn heuristic_move(state: &GameState) -> Option<Card> {
    let hand = state.hand(state.active_player());
    match state.led_card() {
        None => first_best(hand, |&card| -i64::from(card_points(card))),
        Some(led) => first_best(hand, |&card| evaluate_follow(led, card, state.trump_suit())),
    }
}

/// First element with the maximum key
fn first_best<F: Fn(&Card) -> i64>(cards: &[Card], key: F) -> Option<Card> {
    let mut best: Option<(Card, i64)> = None;
    for card in cards {
        let value = key(card);
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((*card, value));
        }
    }
    best.map(|(card, _)| card)
}

/// Agent wrapper around [`heuristic_move`]
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicAgent;

impl HeuristicAgent {
    pub const NAME: &'static str = "heuristic";

    pub fn new() -> Self {
        HeuristicAgent
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn generate_move(&mut self, state: &GameState, _game: &Briscola) -> Result<Card, GameError> {
        heuristic_move(state).ok_or(GameError::NoLegalMoves)
    }
}
