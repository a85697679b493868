//! Cards and card sets
//!
//! A `Card` is a (rank, suit) pair. `Cards` is a 40-bit set where each bit
//! represents one card: bit = suit * 10 + rank, suits ordered B D S C and
//! ranks ordered A 2 3 4 5 6 7 J H K.

use std::fmt;
use std::str::FromStr;

use super::error::GameError;
use super::types::*;

/// Point totals are kept in ten-thousandths of a point
pub type Points = u32;

/// Ten-thousandths per point
pub const POINT_SCALE: Points = 10_000;

/// Total points in a deck (120 plus the low-card fractions)
pub const DECK_POINTS: Points = 120 * POINT_SCALE + NUM_SUITS as Points * (7 + 6 + 5 + 4 + 2);

/// More than this many points wins the game
pub const WINNING_THRESHOLD: Points = 60 * POINT_SCALE;

/// A single playing card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[inline]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Bit index (0-39)
    #[inline]
    pub fn index(self) -> usize {
        self.suit.index() * NUM_RANKS + self.rank.index()
    }

    /// Card from a bit index (0-39)
    #[inline]
    pub fn from_index(index: usize) -> Option<Card> {
        if index >= TOTAL_CARDS {
            return None;
        }
        Some(Card::new(
            Rank::from_index(index % NUM_RANKS)?,
            Suit::from_index(index / NUM_RANKS)?,
        ))
    }

    /// Parse two-character notation, e.g. `AB`, `3C`, `HS`
    pub fn parse(s: &str) -> Option<Card> {
        let mut chars = s.trim().chars();
        let rank = char_to_rank(chars.next()?)?;
        let suit = char_to_suit(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_name(self.rank), suit_letter(self.suit))
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::parse(s).ok_or_else(|| GameError::ParseCard(s.to_string()))
    }
}

/// Exact point value of a card in ten-thousandths.
///
/// The low ranks carry tiny fractions so that point totals never tie by
/// accident; they can never move a total across the 60 point line.
#[inline]
pub fn card_points(card: Card) -> Points {
    match card.rank {
        Rank::Ace => 11 * POINT_SCALE,
        Rank::Three => 10 * POINT_SCALE,
        Rank::King => 4 * POINT_SCALE,
        Rank::Horse => 3 * POINT_SCALE,
        Rank::Jack => 2 * POINT_SCALE,
        Rank::Seven => 7,
        Rank::Six => 6,
        Rank::Five => 5,
        Rank::Four => 4,
        Rank::Two => 2,
    }
}

/// Point value of a card: Ace 11, 3 10, King 4, Horse 3, Jack 2, 7 0.0007 .. 2 0.0002
#[inline]
pub fn card_value(card: Card) -> f64 {
    f64::from(card_points(card)) / f64::from(POINT_SCALE)
}

/// Convert a points total into game points
#[inline]
pub fn points_to_value(points: Points) -> f64 {
    f64::from(points) / f64::from(POINT_SCALE)
}

fn suit_mask(suit: Suit) -> u64 {
    0x3FF << (suit.index() * NUM_RANKS)
}

const ALL_BITS: u64 = (1u64 << TOTAL_CARDS) - 1;

#[inline]
fn bit(card: Card) -> u64 {
    1u64 << card.index()
}

/// A set of cards, one bit per card.
///
/// Used for taken piles and for the visible/unseen partition of the deck,
/// where order does not matter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cards {
    bits: u64,
}

impl Cards {
    #[inline]
    pub const fn new() -> Self {
        Cards { bits: 0 }
    }

    /// Every card of the deck
    #[inline]
    pub const fn all() -> Self {
        Cards { bits: ALL_BITS }
    }

    #[inline]
    const fn masked(bits: u64) -> Self {
        Cards {
            bits: bits & ALL_BITS,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn have(&self, card: Card) -> bool {
        self.bits & bit(card) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// The members of one suit
    #[inline]
    pub fn suit(&self, suit: Suit) -> Cards {
        Cards::masked(self.bits & suit_mask(suit))
    }

    #[inline]
    pub fn union(&self, other: Cards) -> Cards {
        Cards::masked(self.bits | other.bits)
    }

    #[inline]
    pub fn intersect(&self, other: Cards) -> Cards {
        Cards::masked(self.bits & other.bits)
    }

    /// Members of `self` missing from `other`
    #[inline]
    pub fn different(&self, other: Cards) -> Cards {
        Cards::masked(self.bits & !other.bits)
    }

    /// Every card of the deck not in `self`
    #[inline]
    pub fn complement(&self) -> Cards {
        Cards::masked(!self.bits)
    }

    #[inline]
    pub fn add(&mut self, card: Card) -> &mut Self {
        self.bits |= bit(card);
        self
    }

    #[inline]
    pub fn remove(&mut self, card: Card) -> &mut Self {
        self.bits &= !bit(card);
        self
    }

    /// Merge `other` into `self`
    #[inline]
    pub fn add_cards(&mut self, other: Cards) -> &mut Self {
        *self = self.union(other);
        self
    }

    /// Total points of the set, in ten-thousandths
    pub fn points(&self) -> Points {
        self.iter().map(card_points).sum()
    }

    /// Cards in index order: suit B D S C, rank A to K within a suit
    pub fn iter(&self) -> CardsIterator {
        CardsIterator { rest: self.bits }
    }
}

impl FromIterator<Card> for Cards {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Cards {
            bits: iter.into_iter().fold(0, |bits, card| bits | bit(card)),
        }
    }
}

impl<'a> FromIterator<&'a Card> for Cards {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl fmt::Debug for Cards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|c| c.to_string())).finish()
    }
}

/// One group per suit, e.g. `B:A3 D:- S:7 C:K`
impl fmt::Display for Cards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups = Vec::with_capacity(NUM_SUITS);
        for suit in Suit::ALL {
            let ranks: String = self.suit(suit).iter().map(|c| rank_name(c.rank)).collect();
            let ranks = if ranks.is_empty() { "-".to_string() } else { ranks };
            groups.push(format!("{}:{ranks}", suit_letter(suit)));
        }
        f.write_str(&groups.join(" "))
    }
}

pub struct CardsIterator {
    rest: u64,
}

impl Iterator for CardsIterator {
    type Item = Card;

    #[inline]
    fn next(&mut self) -> Option<Card> {
        if self.rest == 0 {
            return None;
        }
        let index = self.rest.trailing_zeros() as usize;
        self.rest &= self.rest - 1;
        Card::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count_ones() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> CardsIterator {
        self.iter()
    }
}

impl IntoIterator for &Cards {
    type Item = Card;
    type IntoIter = CardsIterator;

    fn into_iter(self) -> CardsIterator {
        self.iter()
    }
}
