//! Deck construction and dealing

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards::*;
use super::hands::Hands;
use super::state::GameState;
use super::types::*;

/// The 40-card deck in index order
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(TOTAL_CARDS);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// Shuffle and deal a fresh game: three cards each, one trump indicator,
/// the rest face down, and a uniformly random first player.
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> GameState {
    let mut cards = full_deck();
    cards.shuffle(rng);

    // Deal from the top (end) of the shuffled cards
    let mut hands = Hands::new();
    for player in Player::BOTH {
        for _ in 0..HAND_SIZE {
            if let Some(card) = cards.pop() {
                hands[player].push(card);
            }
        }
    }
    // The bottom card is turned face up and stays under the rest
    let trump = cards[0];

    let active = if rng.gen_bool(0.5) {
        Player::One
    } else {
        Player::Two
    };

    GameState {
        hands,
        table: Vec::new(),
        active,
        taken: [Cards::new(); NUM_PLAYERS],
        trump,
        deck: cards,
    }
}
