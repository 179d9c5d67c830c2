//! Random initial boards.
//!
//! A board starts as uniformly random colors and is then repaired so that it
//! plays like a standard game:
//! - no two orthogonally adjacent cells share a color;
//! - the two starting corners have different colors;
//! - neither player starts with two neighbors of the same color.

use tracing::debug;

use crate::board::{Color, Coord, Grid};
use crate::constants::MIN_GENERATED_SIDE;
use crate::error::GameError;
use crate::game::GameState;

/// Generate a repaired random grid.
pub fn random_grid(rows: usize, cols: usize, rng: &mut fastrand::Rng) -> Result<Grid, GameError> {
    if rows < MIN_GENERATED_SIDE || cols < MIN_GENERATED_SIDE {
        return Err(GameError::InvalidGrid(format!(
            "generated boards need at least {MIN_GENERATED_SIDE}x{MIN_GENERATED_SIDE} cells, got {rows}x{cols}"
        )));
    }
    let cells = (0..rows)
        .map(|_| (0..cols).map(|_| Color::ALL[rng.usize(..Color::ALL.len())]).collect())
        .collect();
    let mut grid = Grid::from_rows(cells)?;
    repair(&mut grid, rng);
    Ok(grid)
}

/// Generate a fresh game on a repaired random grid.
pub fn random_game(rows: usize, cols: usize, rng: &mut fastrand::Rng) -> Result<GameState, GameError> {
    let grid = random_grid(rows, cols, rng)?;
    debug!(rows, cols, "generated board\n{grid}");
    GameState::new(grid)
}

/// Pick a random color not in `avoid`.
fn pick_avoiding(avoid: &[Color], rng: &mut fastrand::Rng) -> Color {
    let choices: Vec<Color> = Color::ALL
        .into_iter()
        .filter(|c| !avoid.contains(c))
        .collect();
    choices[rng.usize(..choices.len())]
}

fn colors_at(grid: &Grid, cells: &[Coord]) -> Vec<Color> {
    cells.iter().map(|&pt| grid.get(pt)).collect()
}

fn repair(grid: &mut Grid, rng: &mut fastrand::Rng) {
    // Same-colored neighbors, fixed in row-major order.
    for pt in grid.coords() {
        let around: Vec<Color> = grid.neighbors(pt).map(|n| grid.get(n)).collect();
        if around.contains(&grid.get(pt)) {
            let color = pick_avoiding(&around, rng);
            grid.set(pt, color);
        }
    }

    let (rows, cols) = (grid.rows(), grid.cols());

    // Equal starting colors: recolor player 2's corner.
    let p2 = grid.top_right();
    if grid.get(grid.bottom_left()) == grid.get(p2) {
        let avoid = colors_at(grid, &[p2, (0, cols - 2), (1, cols - 1)]);
        grid.set(p2, pick_avoiding(&avoid, rng));
    }

    // Player 1 would start with two same-colored neighbors.
    if grid.get((rows - 2, 0)) == grid.get((rows - 1, 1)) {
        let avoid = colors_at(grid, &[(rows - 3, 0), (rows - 1, 0), (rows - 2, 1), (rows - 1, 1)]);
        grid.set((rows - 2, 0), pick_avoiding(&avoid, rng));
    }

    // Same for player 2.
    if grid.get((0, cols - 2)) == grid.get((1, cols - 1)) {
        let avoid = colors_at(grid, &[(0, cols - 3), (0, cols - 1), (1, cols - 2), (1, cols - 1)]);
        grid.set((0, cols - 2), pick_avoiding(&avoid, rng));
    }
}
