//! Constants for board dimensions, search parameters, and thresholds.
//!
//! These are the defaults used when nothing else is configured. Board
//! dimensions are runtime values on [`crate::board::Grid`]; the numbers here
//! only seed the generator and the command line.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default number of rows.
pub const DEFAULT_ROWS: usize = 7;

/// Default number of columns.
pub const DEFAULT_COLS: usize = 8;

/// Number of distinct cell colors.
pub const NUM_COLORS: usize = 6;

/// Smallest board the generator can repair (the corner fixes look two cells in).
pub const MIN_GENERATED_SIDE: usize = 3;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default UCB exploration constant.
pub const EXPLORATION: f64 = 2.0;

/// Default probability that the modelled opponent plays a lookahead move
/// instead of a uniformly random one.
pub const INTELLIGENCE: f64 = 0.5;

/// Default number of search iterations per move.
pub const N_ITERATIONS: usize = 100;

/// Population standard deviation of the root ratios below which the search is
/// considered undecided and the greedy move is played instead.
pub const STD_DEV_THRESHOLD: f64 = 0.05;

// =============================================================================
// Opponent Lookahead Depth
// =============================================================================

/// Completion below which the modelled opponent looks three plies ahead.
pub const EARLY_GAME_COMPLETION: f64 = 0.5;

/// Completion below which the modelled opponent looks two plies ahead.
pub const MID_GAME_COMPLETION: f64 = 0.75;

/// Lookahead depth in the early game.
pub const EARLY_GAME_DEPTH: usize = 3;

/// Lookahead depth in the middle game.
pub const MID_GAME_DEPTH: usize = 2;

/// Lookahead depth in the late game (plain greedy).
pub const LATE_GAME_DEPTH: usize = 1;

// =============================================================================
// Termination Bounds
// =============================================================================

/// A playout gives up after this many rounds per board cell and scores a draw.
pub const PLAYOUT_ROUNDS_PER_CELL: usize = 3;

/// A match gives up after this many turns per board cell.
pub const MATCH_TURNS_PER_CELL: usize = 10;
