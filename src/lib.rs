//! Filler-MCTS: a move-selection engine for the two-player color-capture game.
//!
//! Each turn a player picks a color; their territory is repainted and every
//! adjacent cell already showing that color joins it. The engine chooses moves
//! with Monte Carlo Tree Search that models the opponent with a short
//! lookahead.
//!
//! ## Modules
//!
//! - [`constants`] - Default dimensions and search parameters
//! - [`board`] - Colors, coordinates and the grid
//! - [`game`] - Game state, capture rule, greedy and lookahead heuristics
//! - [`generate`] - Random initial boards
//! - [`tree`] - Search tree storage
//! - [`playout`] - Random playouts for move evaluation
//! - [`mcts`] - Monte Carlo Tree Search with opponent modelling
//! - [`play`] - Strategies and a match runner
//!
//! ## Example
//!
//! ```
//! use filler_mcts::game::Player;
//! use filler_mcts::generate::random_game;
//! use filler_mcts::mcts::{SearchConfig, SearchEngine};
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! let mut game = random_game(7, 8, &mut rng).unwrap();
//!
//! // Search on a private copy, then commit the move to the live game
//! let mut engine = SearchEngine::new(&game, Player::One, SearchConfig::default(), rng);
//! let color = engine.select_move(50, false).unwrap();
//! game.apply_move(Player::One, color).unwrap();
//! println!("{game}");
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod generate;
pub mod mcts;
pub mod play;
pub mod playout;
pub mod tree;
