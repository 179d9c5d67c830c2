//! Random playouts (game simulation to completion).
//!
//! A playout alternates uniformly random legal moves, opponent first, until
//! the territories cover the board. The result is scored from the searching
//! player's point of view.

use tracing::{trace, warn};

use crate::constants::PLAYOUT_ROUNDS_PER_CELL;
use crate::error::GameError;
use crate::game::{GameState, Player};

/// Result of a playout for the searching player.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Outcome {
    /// 1 for a win, 0 otherwise
    pub win: f64,
    /// `2 * final_score / cells` for a win, 0 otherwise
    pub score_value: f64,
}

impl Outcome {
    pub const LOSS: Outcome = Outcome {
        win: 0.0,
        score_value: 0.0,
    };

    /// Score a finished (or abandoned) game for `player`.
    pub fn of(state: &GameState, player: Player) -> Outcome {
        if state.leader() == Some(player) {
            let (s1, s2) = state.score();
            let mine = if player == Player::One { s1 } else { s2 };
            Outcome {
                win: 1.0,
                score_value: 2.0 * mine as f64 / state.area() as f64,
            }
        } else {
            Outcome::LOSS
        }
    }
}

/// Play random moves for `player.other()` then `player` until the board is
/// covered, and score the result for `player`.
///
/// Gives up after [`PLAYOUT_ROUNDS_PER_CELL`] rounds per cell and scores the
/// game as a draw.
pub fn random_playout(
    state: &mut GameState,
    player: Player,
    rng: &mut fastrand::Rng,
) -> Result<Outcome, GameError> {
    let max_rounds = PLAYOUT_ROUNDS_PER_CELL * state.area();
    bounded_playout(state, player, rng, max_rounds)
}

/// [`random_playout`] with an explicit round limit. A game still open after
/// `max_rounds` rounds is scored as a draw.
pub fn bounded_playout(
    state: &mut GameState,
    player: Player,
    rng: &mut fastrand::Rng,
    max_rounds: usize,
) -> Result<Outcome, GameError> {
    let mut rounds = 0;

    while !state.is_over() {
        if rounds >= max_rounds {
            warn!(rounds, score = ?state.score(), "playout did not finish, scoring as draw");
            return Ok(Outcome::LOSS);
        }
        let mv = state.random_move(rng);
        state.apply_move(player.other(), mv)?;
        let mv = state.random_move(rng);
        state.apply_move(player, mv)?;
        rounds += 1;
    }

    let outcome = Outcome::of(state, player);
    trace!(rounds, score = ?state.score(), ?outcome, "playout finished");
    Ok(outcome)
}
