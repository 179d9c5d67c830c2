//! Move strategies and a match runner that plays them against each other on a
//! live game.

use std::fmt;

use tracing::{debug, info, warn};

use crate::board::Color;
use crate::constants::MATCH_TURNS_PER_CELL;
use crate::error::GameError;
use crate::game::{GameState, Player};
use crate::mcts::{SearchConfig, choose_move};

/// How a player picks colors.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy {
    /// Uniformly random legal move
    Random,
    /// One-ply greedy
    Greedy,
    /// Bounded-depth lookahead
    Lookahead(usize),
    /// Tree search
    Mcts(SearchConfig),
}

impl Strategy {
    /// Pick a color for `player` on `game`.
    pub fn choose(
        &self,
        game: &GameState,
        player: Player,
        rng: &mut fastrand::Rng,
    ) -> Result<Color, GameError> {
        match self {
            Strategy::Random => Ok(game.random_move(rng)),
            Strategy::Greedy => Ok(game.greedy_move(player)),
            Strategy::Lookahead(depth) => Ok(game
                .bounded_depth_move(player, *depth)
                .unwrap_or_else(|| game.greedy_move(player))),
            Strategy::Mcts(config) => {
                choose_move(game, player, config, fastrand::Rng::with_seed(rng.u64(..)))
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random => write!(f, "random"),
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Lookahead(depth) => write!(f, "lookahead({depth})"),
            Strategy::Mcts(config) => write!(f, "mcts({} iterations)", config.iterations),
        }
    }
}

/// A finished (or abandoned) match.
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<(Player, Color)>,
    pub score: (usize, usize),
    /// `None` on a tie or when the turn cap was hit first
    pub winner: Option<Player>,
    pub finished: bool,
}

/// Play `strategies[0]` (player 1) against `strategies[1]` (player 2) on
/// `game`, starting with `first`, until the board is covered.
///
/// Stops after a fixed number of turns per cell if the board never fills.
pub fn play_game(
    game: &mut GameState,
    strategies: &[Strategy; 2],
    first: Player,
    rng: &mut fastrand::Rng,
) -> Result<GameRecord, GameError> {
    let max_turns = MATCH_TURNS_PER_CELL * game.area();
    let mut moves = Vec::new();
    let mut to_move = first;

    while !game.is_over() && moves.len() < max_turns {
        let strategy = match to_move {
            Player::One => &strategies[0],
            Player::Two => &strategies[1],
        };
        let mv = strategy.choose(game, to_move, rng)?;
        let captured = game.apply_move(to_move, mv)?;
        debug!(player = %to_move, %strategy, %mv, captured, score = ?game.score(), "move");
        moves.push((to_move, mv));
        to_move = to_move.other();
    }

    let finished = game.is_over();
    if !finished {
        warn!(turns = moves.len(), score = ?game.score(), "match hit the turn cap");
    }
    let winner = if finished { game.leader() } else { None };
    info!(score = ?game.score(), ?winner, turns = moves.len(), "match over");

    Ok(GameRecord {
        moves,
        score: game.score(),
        winner,
        finished,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::random_game;

    #[test]
    fn test_random_vs_random_fills_board() {
        let mut rng = fastrand::Rng::with_seed(21);
        let mut game = random_game(5, 6, &mut rng).unwrap();
        let record = play_game(
            &mut game,
            &[Strategy::Random, Strategy::Random],
            Player::One,
            &mut rng,
        )
        .unwrap();
        assert!(record.finished);
        assert_eq!(record.score.0 + record.score.1, 30);
        assert_eq!(record.moves[0].0, Player::One);
        assert_eq!(record.moves[1].0, Player::Two);
    }

    #[test]
    fn test_moves_alternate_and_are_legal() {
        let mut rng = fastrand::Rng::with_seed(22);
        let mut game = random_game(6, 6, &mut rng).unwrap();
        let mut replay = game.clone();
        let record = play_game(
            &mut game,
            &[Strategy::Greedy, Strategy::Lookahead(2)],
            Player::Two,
            &mut rng,
        )
        .unwrap();
        for (i, &(player, mv)) in record.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Player::Two } else { Player::One };
            assert_eq!(player, expected);
            replay.apply_move(player, mv).unwrap();
        }
        assert_eq!(replay, game);
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Lookahead(3).to_string(), "lookahead(3)");
        let mcts = Strategy::Mcts(SearchConfig::default().with_iterations(5));
        assert_eq!(mcts.to_string(), "mcts(5 iterations)");
    }
}
