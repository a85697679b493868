//! Trick resolution

use super::cards::*;
use super::types::*;

/// Which position takes a two-card trick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrickOutcome {
    LedWins,
    FollowWins,
}

/// Resolve a trick.
///
/// A lone trump wins. Two cards of the same suit compare by point value.
/// Otherwise the led card wins whatever its value.
pub fn trick_winner(led: Card, followed: Card, trump: Suit) -> TrickOutcome {
    match (led.suit == trump, followed.suit == trump) {
        (true, false) => TrickOutcome::LedWins,
        (false, true) => TrickOutcome::FollowWins,
        _ if led.suit == followed.suit => {
            let led_points = card_points(led);
            let followed_points = card_points(followed);
            // Values are injective within a suit, so equality means a duplicated card
            assert_ne!(
                led_points, followed_points,
                "same-suit cards with equal value: {led} and {followed}"
            );
            if followed_points > led_points {
                TrickOutcome::FollowWins
            } else {
                TrickOutcome::LedWins
            }
        }
        _ => TrickOutcome::LedWins,
    }
}

/// True if `card`, played second, takes the trick led by `led`
#[inline]
pub fn beats(led: Card, card: Card, trump: Suit) -> bool {
    trick_winner(led, card, trump) == TrickOutcome::FollowWins
}
