//! Game state
//!
//! The deck keeps the face-up trump at index 0 until it is drawn; draws pop
//! from the end. Every card of the 40 sits in exactly one of: a hand, the
//! table, the deck, a taken pile.

use std::fmt;

use super::cards::*;
use super::error::GameError;
use super::hands::{format_cards, Hands};
use super::types::*;

/// Where the current trick stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Table empty, active player leads
    AwaitingLead,
    /// One card on the table, active player follows
    AwaitingFollow,
    /// All cards taken
    Finished,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub(crate) hands: Hands,
    pub(crate) table: Vec<Card>,
    pub(crate) active: Player,
    pub(crate) taken: [Cards; NUM_PLAYERS],
    pub(crate) trump: Card,
    pub(crate) deck: Vec<Card>,
}

impl GameState {
    /// Build a state from its parts, checking card conservation.
    ///
    /// `deck` lists face-down cards with the last element drawn first. The
    /// trump is put underneath automatically when the deck is non-empty.
    pub fn from_parts(
        hands: Hands,
        table: Vec<Card>,
        active: Player,
        taken: [Cards; NUM_PLAYERS],
        trump: Card,
        face_down: Vec<Card>,
    ) -> Result<Self, GameError> {
        let mut deck = face_down;
        if !deck.is_empty() {
            deck.insert(0, trump);
        }
        let state = GameState {
            hands,
            table,
            active,
            taken,
            trump,
            deck,
        };
        state.check_invariants()?;
        Ok(state)
    }

    #[inline]
    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    #[inline]
    pub fn hand(&self, player: Player) -> &[Card] {
        self.hands.hand(player)
    }

    /// Cards on the table: led card first
    #[inline]
    pub fn table(&self) -> &[Card] {
        &self.table
    }

    #[inline]
    pub fn active_player(&self) -> Player {
        self.active
    }

    #[inline]
    pub fn taken(&self, player: Player) -> Cards {
        self.taken[player.index()]
    }

    /// The trump indicator card
    #[inline]
    pub fn trump(&self) -> Card {
        self.trump
    }

    #[inline]
    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    /// Remaining deck, trump included while undrawn
    #[inline]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Cards still to be drawn, counting the trump
    #[inline]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// True while the face-up trump has not been drawn
    #[inline]
    pub fn trump_in_deck(&self) -> bool {
        !self.deck.is_empty()
    }

    /// The led card, if a trick is in progress
    #[inline]
    pub fn led_card(&self) -> Option<Card> {
        self.table.first().copied()
    }

    pub fn phase(&self) -> Phase {
        match self.table.len() {
            0 if self.taken_count() == TOTAL_CARDS => Phase::Finished,
            0 => Phase::AwaitingLead,
            _ => Phase::AwaitingFollow,
        }
    }

    /// Cards in both taken piles
    #[inline]
    pub fn taken_count(&self) -> usize {
        self.taken.iter().map(Cards::size).sum()
    }

    /// Points captured so far by a player
    #[inline]
    pub fn points(&self, player: Player) -> Points {
        self.taken[player.index()].points()
    }

    /// Tricks still to be played, counting the one in progress
    pub fn tricks_remaining(&self) -> usize {
        (TOTAL_CARDS - self.taken_count()) / NUM_PLAYERS
    }

    /// Cards `player` can see: own hand, table, both taken piles and the
    /// face-up trump while it is still in the deck
    pub fn visible_to(&self, player: Player) -> Cards {
        let mut seen = self.hands.cards(player);
        seen.add_cards(self.table.iter().collect());
        seen.add_cards(self.taken[0]);
        seen.add_cards(self.taken[1]);
        if self.trump_in_deck() {
            seen.add(self.trump);
        }
        seen
    }

    /// Verify that every card is in exactly one place and the shape is sane
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let mut seen = Cards::new();
        let mut count = 0;
        let mut place = |card: Card, what: &str| -> Result<(), GameError> {
            if seen.have(card) {
                return Err(GameError::InvariantViolation(format!(
                    "{card} appears twice (again in {what})"
                )));
            }
            seen.add(card);
            count += 1;
            Ok(())
        };

        for player in Player::BOTH {
            let hand = self.hands.hand(player);
            if hand.len() > HAND_SIZE {
                return Err(GameError::InvariantViolation(format!(
                    "{player} holds {} cards",
                    hand.len()
                )));
            }
            for &card in hand {
                place(card, "a hand")?;
            }
        }
        if self.table.len() >= NUM_PLAYERS {
            return Err(GameError::InvariantViolation(format!(
                "{} cards on the table",
                self.table.len()
            )));
        }
        for &card in &self.table {
            place(card, "the table")?;
        }
        for &card in &self.deck {
            place(card, "the deck")?;
        }
        for pile in &self.taken {
            for card in pile.iter() {
                place(card, "a taken pile")?;
            }
        }

        if count != TOTAL_CARDS {
            return Err(GameError::InvariantViolation(format!(
                "{count} cards accounted for"
            )));
        }
        if let Some(&bottom) = self.deck.first() {
            if bottom != self.trump {
                return Err(GameError::InvariantViolation(format!(
                    "trump {} is not at the bottom of the deck",
                    self.trump
                )));
            }
        }
        if self.deck.len() % NUM_PLAYERS != 0 {
            return Err(GameError::InvariantViolation(format!(
                "odd deck of {} cards",
                self.deck.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("hands", &self.hands)
            .field("table", &format_cards(&self.table))
            .field("active", &self.active)
            .field("taken1", &self.taken[0])
            .field("taken2", &self.taken[1])
            .field("trump", &self.trump.to_string())
            .field("deck", &self.deck.len())
            .finish()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trump {} ({}), deck {}",
            self.trump,
            suit_name(self.trump.suit),
            self.deck.len()
        )?;
        for player in Player::BOTH {
            let marker = if player == self.active { '*' } else { ' ' };
            writeln!(
                f,
                "{marker}{}: {:<12} taken {:>3} cards, {:.4} points",
                player.number(),
                format_cards(self.hand(player)),
                self.taken(player).size(),
                points_to_value(self.points(player))
            )?;
        }
        write!(f, "Table: {}", format_cards(&self.table))
    }
}
