use std::fmt;

use crate::board::Color;
use crate::game::Player;

/// Errors raised by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The chosen color is the opponent's current color.
    OpponentColor { player: Player, color: Color },
    /// The chosen color is the player's own color and the rule forbids it.
    OwnColor { player: Player, color: Color },
    /// A player identifier outside {1, 2}.
    InvalidPlayer(u8),
    /// The grid cannot host a game.
    InvalidGrid(String),
    /// A color name or index that does not exist.
    UnknownColor(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OpponentColor { player, color } => {
                write!(f, "Illegal move: {player} cannot take opponent color {color}")
            }
            GameError::OwnColor { player, color } => {
                write!(f, "Illegal move: {player} already has color {color}")
            }
            GameError::InvalidPlayer(id) => write!(f, "Invalid player number {id}"),
            GameError::InvalidGrid(reason) => write!(f, "Invalid grid: {reason}"),
            GameError::UnknownColor(name) => write!(f, "Unknown color '{name}'"),
        }
    }
}

impl std::error::Error for GameError {}
