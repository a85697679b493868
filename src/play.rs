//! Game driver
//!
//! Alternates turns between two agents, each of which sees a private copy
//! of the state, and collects per-game and per-match results.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::agent::{create_agent, make_rng, Agent, AgentKind, AgentSettings};
use super::cards::*;
use super::deal::deal;
use super::error::GameError;
use super::game::{Briscola, TrickResult};
use super::state::GameState;
use super::types::*;

/// Everything that happened in one game
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub first_player: Player,
    pub trump: Card,
    pub tricks: Vec<TrickResult>,
    pub points: [Points; NUM_PLAYERS],
    /// `None` on a 60-60 split
    pub winner: Option<Player>,
}

impl GameRecord {
    pub fn points_value(&self, player: Player) -> f64 {
        points_to_value(self.points[player.index()])
    }
}

/// Play `state` to the end. `agents[0]` plays for player 1.
pub fn play_from(
    game: &Briscola,
    mut state: GameState,
    agents: [&mut dyn Agent; NUM_PLAYERS],
) -> Result<GameRecord, GameError> {
    let [one, two] = agents;
    let first_player = state.active_player();
    let trump = state.trump();
    let mut tricks = Vec::with_capacity(TOTAL_TRICKS);

    while !game.is_terminal(&state) {
        let player = game.to_move(&state);
        let view = state.clone();
        let card = match player {
            Player::One => one.generate_move(&view, game)?,
            Player::Two => two.generate_move(&view, game)?,
        };
        debug!(%player, %card, "move");
        if let Some(trick) = game.play(&mut state, card)? {
            tricks.push(trick);
        }
    }

    let points = [game.score(&state, Player::One), game.score(&state, Player::Two)];
    Ok(GameRecord {
        first_player,
        trump,
        tricks,
        points,
        winner: game.winner(&state),
    })
}

/// Deal a fresh game with `rng` and play it out
pub fn play_game<R: Rng + ?Sized>(
    game: &Briscola,
    agents: [&mut dyn Agent; NUM_PLAYERS],
    rng: &mut R,
) -> Result<GameRecord, GameError> {
    play_from(game, deal(rng), agents)
}

/// Tallies over a series of games
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchSummary {
    pub names: [String; NUM_PLAYERS],
    pub games: usize,
    pub wins: [usize; NUM_PLAYERS],
    /// 60-60 splits
    pub ties: usize,
    pub total_points: [u64; NUM_PLAYERS],
}

impl MatchSummary {
    fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        match record.winner {
            Some(player) => self.wins[player.index()] += 1,
            None => self.ties += 1,
        }
        for player in Player::BOTH {
            self.total_points[player.index()] += u64::from(record.points[player.index()]);
        }
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins[player.index()] as f64 / self.games as f64
        }
    }

    pub fn average_points(&self, player: Player) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_points[player.index()] as f64 / POINT_SCALE as f64 / self.games as f64
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games: {}", self.games)?;
        for player in Player::BOTH {
            writeln!(
                f,
                "{player} ({}): {} wins ({:.1}%), {:.2} points per game",
                self.names[player.index()],
                self.wins[player.index()],
                100.0 * self.win_rate(player),
                self.average_points(player)
            )?;
        }
        write!(f, "60-60 ties: {}", self.ties)
    }
}

/// Play `games` games between two agent kinds. Each game gets fresh agents
/// and a fresh deal, all derived from `seed`.
pub fn play_match(
    game: &Briscola,
    kinds: [AgentKind; NUM_PLAYERS],
    settings: &AgentSettings,
    games: usize,
    seed: Option<u64>,
) -> Result<MatchSummary, GameError> {
    let mut master = make_rng(seed);
    let mut summary = MatchSummary {
        names: kinds.map(|kind| kind.name().to_string()),
        ..MatchSummary::default()
    };

    for index in 0..games {
        let mut one = create_agent(kinds[0], settings, Some(master.gen()));
        let mut two = create_agent(kinds[1], settings, Some(master.gen()));
        let mut deal_rng = StdRng::seed_from_u64(master.gen());
        let record = play_game(game, [&mut *one, &mut *two], &mut deal_rng)?;
        info!(
            game = index + 1,
            first = %record.first_player,
            winner = ?record.winner.map(Player::number),
            p1 = record.points_value(Player::One),
            p2 = record.points_value(Player::Two),
            "game finished"
        );
        summary.record(&record);
    }
    Ok(summary)
}
