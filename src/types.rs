//! Core type definitions: suits, ranks, players and deck constants

use std::fmt;

/// Suits of the Italian 40-card deck
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Bastoni,
    Denari,
    Spade,
    Coppe,
}

/// Ranks in deck order: Ace, 2..7, Jack, Horse, King
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Jack,
    Horse,
    King,
}

pub const NUM_SUITS: usize = 4;
pub const NUM_RANKS: usize = 10;
pub const TOTAL_CARDS: usize = NUM_RANKS * NUM_SUITS;
pub const HAND_SIZE: usize = 3;
pub const NUM_PLAYERS: usize = 2;
pub const TOTAL_TRICKS: usize = TOTAL_CARDS / NUM_PLAYERS;

impl Suit {
    pub const ALL: [Suit; NUM_SUITS] = [Suit::Bastoni, Suit::Denari, Suit::Spade, Suit::Coppe];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Suit> {
        Suit::ALL.get(index).copied()
    }
}

impl Rank {
    pub const ALL: [Rank; NUM_RANKS] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Jack,
        Rank::Horse,
        Rank::King,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Rank> {
        Rank::ALL.get(index).copied()
    }
}

/// The two seats. Player numbers are 1 and 2 when printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; NUM_PLAYERS] = [Player::One, Player::Two];

    /// Array index (0 or 1)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The opponent
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Player number as printed (1 or 2)
    #[inline]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Player> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Get suit name
pub fn suit_name(suit: Suit) -> &'static str {
    const NAMES: [&str; NUM_SUITS] = ["Bastoni", "Denari", "Spade", "Coppe"];
    NAMES[suit.index()]
}

/// Get suit letter
pub fn suit_letter(suit: Suit) -> char {
    const LETTERS: [char; NUM_SUITS] = ['B', 'D', 'S', 'C'];
    LETTERS[suit.index()]
}

/// Get rank name (character). Horse is `H`.
pub fn rank_name(rank: Rank) -> char {
    const NAMES: [char; NUM_RANKS] = ['A', '2', '3', '4', '5', '6', '7', 'J', 'H', 'K'];
    NAMES[rank.index()]
}

/// Convert character to suit
pub fn char_to_suit(c: char) -> Option<Suit> {
    match c.to_ascii_uppercase() {
        'B' => Some(Suit::Bastoni),
        'D' => Some(Suit::Denari),
        'S' => Some(Suit::Spade),
        'C' => Some(Suit::Coppe),
        _ => None,
    }
}

/// Convert character to rank
pub fn char_to_rank(c: char) -> Option<Rank> {
    match c.to_ascii_uppercase() {
        'A' | '1' => Some(Rank::Ace),
        '2' => Some(Rank::Two),
        '3' => Some(Rank::Three),
        '4' => Some(Rank::Four),
        '5' => Some(Rank::Five),
        '6' => Some(Rank::Six),
        '7' => Some(Rank::Seven),
        'J' => Some(Rank::Jack),
        'H' => Some(Rank::Horse),
        'K' => Some(Rank::King),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
        assert_eq!(Player::One.other().other(), Player::One);
    }

    #[test]
    fn test_player_numbers() {
        assert_eq!(Player::One.number(), 1);
        assert_eq!(Player::Two.number(), 2);
        assert_eq!(Player::from_number(2), Some(Player::Two));
        assert_eq!(Player::from_number(1), Some(Player::One));
        assert_eq!(Player::from_number(3), None);
        assert_eq!(Player::Two.to_string(), "Player 2");
    }

    #[test]
    fn test_char_to_suit() {
        assert_eq!(char_to_suit('B'), Some(Suit::Bastoni));
        assert_eq!(char_to_suit('d'), Some(Suit::Denari));
        assert_eq!(char_to_suit('C'), Some(Suit::Coppe));
        assert_eq!(char_to_suit('H'), None);
    }

    #[test]
    fn test_char_to_rank() {
        assert_eq!(char_to_rank('A'), Some(Rank::Ace));
        assert_eq!(char_to_rank('h'), Some(Rank::Horse));
        assert_eq!(char_to_rank('7'), Some(Rank::Seven));
        assert_eq!(char_to_rank('8'), None);
    }

    #[test]
    fn test_index_roundtrip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_index(suit.index()), Some(suit));
            assert_eq!(char_to_suit(suit_letter(suit)), Some(suit));
        }
        for rank in Rank::ALL {
            assert_eq!(Rank::from_index(rank.index()), Some(rank));
            assert_eq!(char_to_rank(rank_name(rank)), Some(rank));
        }
        assert_eq!(Suit::from_index(NUM_SUITS), None);
    }
}
