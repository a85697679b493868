//! Game state transitions
//!
//! `play` is the one place a state changes: card to table, trick resolution,
//! draws, turn handover.

use tracing::trace;

use super::cards::*;
use super::error::GameError;
use super::rules::{trick_winner, TrickOutcome};
use super::state::GameState;
use super::types::*;

/// Result of the game for one player. A 60-60 split is a loss for both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Utility {
    Win,
    Loss,
}

/// A resolved trick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrickResult {
    pub led: Card,
    pub followed: Card,
    pub leader: Player,
    pub winner: Player,
    pub points: Points,
}

/// The two-player Briscola rules engine
#[derive(Clone, Copy, Debug, Default)]
pub struct Briscola;

impl Briscola {
    pub fn new() -> Self {
        Briscola
    }

    /// Player to act
    #[inline]
    pub fn to_move(&self, state: &GameState) -> Player {
        state.active
    }

    /// The active player's hand, in hand order. Briscola has no duty to follow suit.
    pub fn legal_moves(&self, state: &GameState) -> Vec<Card> {
        state.hand(state.active).to_vec()
    }

    /// Apply a move to a copy of the state
    pub fn apply_move(&self, state: &GameState, card: Card) -> Result<GameState, GameError> {
        let mut next = state.clone();
        self.play(&mut next, card)?;
        Ok(next)
    }

    /// Apply a move in place. Returns the trick when this card completed one.
    pub fn play(
        &self,
        state: &mut GameState,
        card: Card,
    ) -> Result<Option<TrickResult>, GameError> {
        let player = state.active;
        if !state.hands.take(player, card) {
            return Err(GameError::IllegalMove { card, player });
        }
        state.table.push(card);

        if state.table.len() < NUM_PLAYERS {
            state.active = player.other();
            return Ok(None);
        }

        let led = state.table[0];
        let followed = state.table[1];
        let leader = player.other();
        let winner = match trick_winner(led, followed, state.trump.suit) {
            TrickOutcome::LedWins => leader,
            TrickOutcome::FollowWins => player,
        };

        draw(state, winner);

        let pile = &mut state.taken[winner.index()];
        pile.add(led);
        pile.add(followed);
        state.table.clear();
        state.active = winner;

        let points = card_points(led) + card_points(followed);
        trace!(%led, %followed, %winner, points, "trick resolved");
        Ok(Some(TrickResult {
            led,
            followed,
            leader,
            winner,
            points,
        }))
    }

    /// All 40 cards captured
    #[inline]
    pub fn is_terminal(&self, state: &GameState) -> bool {
        state.taken_count() == TOTAL_CARDS
    }

    /// Win iff the player's captured points strictly exceed 60
    pub fn utility(&self, state: &GameState, player: Player) -> Utility {
        if state.points(player) > WINNING_THRESHOLD {
            Utility::Win
        } else {
            Utility::Loss
        }
    }

    /// Points captured by a player
    #[inline]
    pub fn score(&self, state: &GameState, player: Player) -> Points {
        state.points(player)
    }

    /// The player with more than 60 points, if any
    pub fn winner(&self, state: &GameState) -> Option<Player> {
        Player::BOTH
            .into_iter()
            .find(|&p| self.utility(state, p) == Utility::Win)
    }
}

/// Refill hands after a trick: winner first, then loser. When only the
/// trump is left under a single face-down card, the loser gets the trump.
fn draw(state: &mut GameState, winner: Player) {
    for player in [winner, winner.other()] {
        if let Some(card) = state.deck.pop() {
            state.hands[player].push(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::deal;
    use crate::hands::{parse_cards, Hands};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn card(s: &str) -> Card {
        Card::parse(s).unwrap()
    }

    /// Both hands full, three face-down cards plus the trump left in the deck
    fn near_deck_end() -> GameState {
        let hands = Hands::parse("AB 2C 4S / KB 5D 6D").unwrap();
        let trump = card("7B");
        let face_down = parse_cards("3S HS JS").unwrap(); // JS is drawn first
        let mut used = hands.all_cards();
        used.add(trump);
        face_down.iter().for_each(|&c| {
            used.add(c);
        });
        let rest = used.complement();
        let pile_one: Cards = rest.iter().take(15).collect();
        let pile_two = rest.different(pile_one);
        GameState::from_parts(
            hands,
            Vec::new(),
            Player::One,
            [pile_one, pile_two],
            trump,
            face_down,
        )
        .unwrap()
    }

    #[test]
    fn test_legal_moves_are_hand_in_order() {
        let game = Briscola::new();
        let state = near_deck_end();
        assert_eq!(game.legal_moves(&state), parse_cards("AB 2C 4S").unwrap());
    }

    #[test]
    fn test_illegal_move_rejected() {
        let game = Briscola::new();
        let state = near_deck_end();
        let err = game.apply_move(&state, card("KB")).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                card: card("KB"),
                player: Player::One
            }
        );
    }

    #[test]
    fn test_lead_passes_turn() {
        let game = Briscola::new();
        let state = near_deck_end();
        let next = game.apply_move(&state, card("2C")).unwrap();
        assert_eq!(next.table(), &[card("2C")]);
        assert_eq!(next.active_player(), Player::Two);
        assert_eq!(next.hand(Player::One).len(), 2);
        // input state untouched
        assert_eq!(state.hand(Player::One).len(), 3);
        next.check_invariants().unwrap();
    }

    #[test]
    fn test_trick_resolution_and_draw_order() {
        let game = Briscola::new();
        let mut state = near_deck_end();
        // 2C led, 5D follows: different suits, neither trump, led wins
        game.play(&mut state, card("2C")).unwrap();
        let trick = game.play(&mut state, card("5D")).unwrap().unwrap();
        assert_eq!(trick.winner, Player::One);
        assert_eq!(trick.leader, Player::One);
        assert_eq!(state.active_player(), Player::One);
        assert!(state.taken(Player::One).have(card("2C")));
        assert!(state.taken(Player::One).have(card("5D")));
        // winner draws the top card, loser the next
        assert_eq!(*state.hand(Player::One).last().unwrap(), card("JS"));
        assert_eq!(*state.hand(Player::Two).last().unwrap(), card("HS"));
        assert_eq!(state.deck(), &[card("7B"), card("3S")]);
        state.check_invariants().unwrap();
    }

    #[test]
    fn test_trump_is_last_draw_for_loser() {
        let game = Briscola::new();
        let hands = Hands::parse("AB 2C 4S / KB 5D 6D").unwrap();
        let trump = card("7B");
        let mut used = hands.all_cards();
        used.add(trump);
        used.add(card("3S"));
        let rest = used.complement();
        let pile_one: Cards = rest.iter().take(17).collect();
        let mut state = GameState::from_parts(
            hands,
            Vec::new(),
            Player::Two,
            [pile_one, rest.different(pile_one)],
            trump,
            vec![card("3S")],
        )
        .unwrap();
        assert_eq!(state.deck_len(), 2);

        // 6D led by player 2, AB (trump) follows: follower wins
        game.play(&mut state, card("6D")).unwrap();
        let trick = game.play(&mut state, card("AB")).unwrap().unwrap();
        assert_eq!(trick.winner, Player::One);
        assert_eq!(*state.hand(Player::One).last().unwrap(), card("3S"));
        assert_eq!(*state.hand(Player::Two).last().unwrap(), trump);
        assert!(state.deck().is_empty());
        assert!(!state.trump_in_deck());
        state.check_invariants().unwrap();
    }

    #[test]
    fn test_empty_deck_no_draw() {
        let game = Briscola::new();
        let hands = Hands::parse("AB 2C / KB 5D").unwrap();
        let rest = hands.all_cards().complement();
        let pile_one: Cards = rest.iter().take(20).collect();
        let mut state = GameState::from_parts(
            hands,
            Vec::new(),
            Player::One,
            [pile_one, rest.different(pile_one)],
            card("7B"),
            Vec::new(),
        )
        .unwrap();
        game.play(&mut state, card("AB")).unwrap();
        game.play(&mut state, card("KB")).unwrap();
        assert_eq!(state.hand(Player::One).len(), 1);
        assert_eq!(state.hand(Player::Two).len(), 1);
        state.check_invariants().unwrap();
    }

    #[test]
    fn test_utility_threshold_is_strict() {
        let game = Briscola::new();
        // Four aces, one three, a king and a jack: exactly 60 points
        let sixty: Cards = parse_cards("AB AD AS AC 3B KB JB").unwrap().iter().collect();
        assert_eq!(sixty.points(), WINNING_THRESHOLD);
        let hands = Hands::new();
        let state = GameState::from_parts(
            hands,
            Vec::new(),
            Player::One,
            [sixty, sixty.complement()],
            card("KD"),
            Vec::new(),
        )
        .unwrap();
        assert!(game.is_terminal(&state));
        assert_eq!(game.utility(&state, Player::One), Utility::Loss);
        // the rest is 60 points plus the low-card fractions
        assert_eq!(game.utility(&state, Player::Two), Utility::Win);
        assert_eq!(game.winner(&state), Some(Player::Two));
    }

    #[test]
    fn test_utility_sixty_sixty_without_fractions() {
        let game = Briscola::new();
        // 60 points exactly on each side, low cards still in play
        let one: Cards = parse_cards("AB AD AS AC 3B KB JB").unwrap().iter().collect();
        let two: Cards = parse_cards("3D 3S 3C KD KS KC HB HD HS HC JD JS JC")
            .unwrap()
            .iter()
            .collect();
        assert_eq!(two.points(), WINNING_THRESHOLD);
        let low = one.union(two).complement();
        let low_cards: Vec<Card> = low.iter().collect();
        let (hand_one, rest) = low_cards.split_at(1);
        let (hand_two, rest) = rest.split_at(1);
        let mut face_down = rest.to_vec();
        let trump = face_down.remove(0);
        let state = GameState::from_parts(
            Hands::from_vecs(hand_one.to_vec(), hand_two.to_vec()),
            Vec::new(),
            Player::One,
            [one, two],
            trump,
            face_down,
        )
        .unwrap();
        assert_eq!(game.utility(&state, Player::One), Utility::Loss);
        assert_eq!(game.utility(&state, Player::Two), Utility::Loss);
        assert_eq!(game.winner(&state), None);
        assert!(!game.is_terminal(&state));
    }

    #[test]
    fn test_random_game_terminates() {
        let game = Briscola::new();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut state = deal(&mut rng);
        let mut plies = 0;
        while !game.is_terminal(&state) {
            let moves = game.legal_moves(&state);
            let card = *moves.choose(&mut rng).unwrap();
            game.play(&mut state, card).unwrap();
            state.check_invariants().unwrap();
            plies += 1;
        }
        assert_eq!(plies, TOTAL_CARDS);
        assert!(state.hands().is_empty());
        assert_eq!(
            state.points(Player::One) + state.points(Player::Two),
            DECK_POINTS
        );
    }
}
