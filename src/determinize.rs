//! Sampling the hidden part of a state
//!
//! From one player's seat the opponent's hand and the order of the face-down
//! deck are unknown. A determinization deals the unseen cards into those
//! places at random, giving a fully observable state consistent with what
//! the player knows.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards::*;
use super::error::GameError;
use super::state::GameState;
use super::types::*;

/// Cards `player` cannot see: opponent hand plus face-down deck
pub fn unseen_cards(state: &GameState, player: Player) -> Cards {
    state.visible_to(player).complement()
}

/// Replace the opponent's hand and the face-down deck of a copy of `state`
/// with a uniformly random arrangement of the unseen cards.
pub fn determinize<R: Rng + ?Sized>(
    state: &GameState,
    player: Player,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let opponent = player.other();
    let needed = state.hand(opponent).len();
    let mut unseen: Vec<Card> = unseen_cards(state, player).iter().collect();
    if unseen.len() < needed {
        return Err(GameError::DeterminizationImpossible {
            unseen: unseen.len(),
            needed,
        });
    }
    let face_down = state.deck_len().saturating_sub(1);
    if unseen.len() != needed + face_down {
        return Err(GameError::InvariantViolation(format!(
            "{} unseen cards for a hand of {needed} and {face_down} face-down cards",
            unseen.len()
        )));
    }

    unseen.shuffle(rng);
    let mut sampled = state.clone();
    let rest = unseen.split_off(needed);
    sampled.hands[opponent] = unseen;
    if sampled.trump_in_deck() {
        sampled.deck.clear();
        sampled.deck.push(state.trump);
        sampled.deck.extend(rest);
    }
    Ok(sampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::deal;
    use crate::game::Briscola;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_determinize_keeps_own_view() {
        let mut rng = StdRng::seed_from_u64(17);
        let state = deal(&mut rng);
        let me = state.active_player();
        for _ in 0..20 {
            let sampled = determinize(&state, me, &mut rng).unwrap();
            sampled.check_invariants().unwrap();
            assert_eq!(sampled.hand(me), state.hand(me));
            assert_eq!(sampled.trump(), state.trump());
            assert_eq!(sampled.deck_len(), state.deck_len());
            assert_eq!(sampled.hand(me.other()).len(), HAND_SIZE);
            let opp: Cards = sampled.hand(me.other()).iter().collect();
            assert!(opp.intersect(state.visible_to(me)).is_empty());
        }
    }

    #[test]
    fn test_determinize_varies_hidden_hand() {
        let mut rng = StdRng::seed_from_u64(4);
        let state = deal(&mut rng);
        let me = state.active_player();
        let first = determinize(&state, me, &mut rng).unwrap();
        let differs = (0..20).any(|_| {
            determinize(&state, me, &mut rng).unwrap().hand(me.other()) != first.hand(me.other())
        });
        assert!(differs);
    }

    #[test]
    fn test_exact_when_deck_empty() {
        let game = Briscola::new();
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = deal(&mut rng);
        while state.deck_len() > 0 {
            let card = game.legal_moves(&state)[0];
            game.play(&mut state, card).unwrap();
        }
        let me = state.active_player();
        let sampled = determinize(&state, me, &mut rng).unwrap();
        let real: Cards = state.hand(me.other()).iter().collect();
        let guess: Cards = sampled.hand(me.other()).iter().collect();
        assert_eq!(real, guess);
    }

    #[test]
    fn test_impossible_when_too_few_unseen() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = deal(&mut rng);
        let me = state.active_player();
        // Corrupt the state: opponent claims more cards than are hidden
        let hidden: Vec<Card> = unseen_cards(&state, me).iter().collect();
        state.deck.truncate(1);
        state.hands[me.other()] = hidden;
        state.hands[me.other()].truncate(3);
        let mut taken = Cards::all();
        taken.remove(state.trump);
        for player in Player::BOTH {
            for &card in state.hand(player) {
                taken.remove(card);
            }
        }
        state.taken = [taken, Cards::new()];
        let mine = state.hand(me)[0];
        state.hands[me.other()].push(mine);
        let err = determinize(&state, me, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::DeterminizationImpossible {
                unseen: 3,
                needed: 4
            }
        );
    }
}
