//! Colors, coordinates and the fixed-shape color grid.

use std::fmt;
use std::str::FromStr;

use crate::constants::NUM_COLORS;
use crate::error::GameError;

/// One of the six cell colors. Only identity matters; the discriminant is
/// used as an array index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red = 0,
    Green = 1,
    Yellow = 2,
    Blue = 3,
    Purple = 4,
    Black = 5,
}

impl Color {
    /// All colors in index order.
    pub const ALL: [Color; NUM_COLORS] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Black,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Color> {
        Color::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Black => "black",
        }
    }

    /// Single-letter symbol used by the text rendering.
    fn symbol(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Yellow => 'y',
            Color::Blue => 'b',
            Color::Purple => 'p',
            Color::Black => 'k',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    /// Accepts a color name or its index, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Color::from_index(index).ok_or_else(|| GameError::UnknownColor(s.to_string()));
        }
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GameError::UnknownColor(s.to_string()))
    }
}

/// A cell position as (row, column), row 0 at the top.
pub type Coord = (usize, usize);

/// A fixed-size 2D array of colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Build a grid from row-major rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, GameError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(GameError::InvalidGrid("grid has no cells".into()));
        }
        if rows.iter().any(|r| r.len() != n_cols) {
            return Err(GameError::InvalidGrid("rows have different lengths".into()));
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a grid from color indices, as written in tests and fixtures.
    pub fn from_indices(rows: &[&[usize]]) -> Result<Self, GameError> {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&i| {
                        Color::from_index(i).ok_or_else(|| GameError::UnknownColor(i.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    fn idx(&self, (r, c): Coord) -> usize {
        r * self.cols + c
    }

    #[inline]
    pub fn get(&self, pt: Coord) -> Color {
        self.cells[self.idx(pt)]
    }

    #[inline]
    pub fn set(&mut self, pt: Coord, color: Color) {
        let i = self.idx(pt);
        self.cells[i] = color;
    }

    /// Bottom-left corner, where player 1 starts.
    pub fn bottom_left(&self) -> Coord {
        (self.rows - 1, 0)
    }

    /// Top-right corner, where player 2 starts.
    pub fn top_right(&self) -> Coord {
        (0, self.cols - 1)
    }

    /// The in-bounds orthogonal neighbors of a cell.
    pub fn neighbors(&self, (r, c): Coord) -> impl Iterator<Item = Coord> + use<> {
        let mut v = Vec::with_capacity(4);
        if r + 1 < self.rows {
            v.push((r + 1, c));
        }
        if r > 0 {
            v.push((r - 1, c));
        }
        if c + 1 < self.cols {
            v.push((r, c + 1));
        }
        if c > 0 {
            v.push((r, c - 1));
        }
        v.into_iter()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{} ", self.get((r, c)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
