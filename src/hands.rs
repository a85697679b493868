//! Two ordered hands, indexed by player

use super::cards::*;
use super::types::*;

/// One hand per player. Order matters: legal moves are listed in hand order.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Hands {
    hands: [Vec<Card>; NUM_PLAYERS],
}

impl Hands {
    /// Create empty hands
    #[inline]
    pub fn new() -> Self {
        Hands::default()
    }

    pub fn from_vecs(one: Vec<Card>, two: Vec<Card>) -> Self {
        Hands { hands: [one, two] }
    }

    /// Get hand for a player
    #[inline]
    pub fn hand(&self, player: Player) -> &[Card] {
        &self.hands[player.index()]
    }

    /// Get mutable reference to hand
    #[inline]
    pub fn hand_mut(&mut self, player: Player) -> &mut Vec<Card> {
        &mut self.hands[player.index()]
    }

    /// Hand of a player as a set
    #[inline]
    pub fn cards(&self, player: Player) -> Cards {
        self.hands[player.index()].iter().collect()
    }

    /// Get all cards across both hands
    #[inline]
    pub fn all_cards(&self) -> Cards {
        self.cards(Player::One).union(self.cards(Player::Two))
    }

    /// Total number of cards held
    #[inline]
    pub fn len(&self) -> usize {
        self.hands.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hands.iter().all(Vec::is_empty)
    }

    /// Remove a card from a player's hand, keeping the order of the rest.
    /// Returns false if the card was not there.
    pub fn take(&mut self, player: Player, card: Card) -> bool {
        let hand = self.hand_mut(player);
        match hand.iter().position(|&c| c == card) {
            Some(pos) => {
                hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Parse from a two-hand string
    /// Format: "AB 3C 7S / KD HD 2B" (player 1 before the slash, `-` for an empty hand)
    pub fn parse(s: &str) -> Option<Self> {
        let (one, two) = s.split_once('/')?;
        Some(Hands::from_vecs(parse_cards(one)?, parse_cards(two)?))
    }
}

impl std::ops::Index<Player> for Hands {
    type Output = Vec<Card>;

    #[inline]
    fn index(&self, player: Player) -> &Self::Output {
        &self.hands[player.index()]
    }
}

impl std::ops::IndexMut<Player> for Hands {
    #[inline]
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        &mut self.hands[player.index()]
    }
}

impl std::fmt::Debug for Hands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for player in Player::BOTH {
            write!(f, "{}: {} ", player.number(), format_cards(self.hand(player)))?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Hands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {}",
            format_cards(self.hand(Player::One)),
            format_cards(self.hand(Player::Two))
        )
    }
}

/// Parse whitespace-separated cards. A lone `-` is an empty list.
pub fn parse_cards(s: &str) -> Option<Vec<Card>> {
    let s = s.trim();
    if s == "-" {
        return Some(Vec::new());
    }
    s.split_whitespace().map(Card::parse).collect()
}

/// Format cards space-separated, `-` when empty
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
