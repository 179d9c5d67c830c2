//! Game state and the capture-expansion rule.
//!
//! A [`GameState`] is a color grid plus two disjoint territories, one per
//! player. A move repaints the mover's territory with the chosen color and
//! annexes every frontier cell already showing that color. The annexation is a
//! single pass: cells captured by a move do not trigger further captures in the
//! same move.
//!
//! The module also provides the one-ply greedy heuristic and the bounded-depth
//! single-player lookahead used to model the opponent during search.

use std::collections::HashSet;
use std::fmt;

use crate::board::{Color, Coord, Grid};
use crate::error::GameError;

/// A set of owned cells.
pub type Territory = HashSet<Coord>;

/// One of the two players. Player 1 starts bottom-left, player 2 top-right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Parse a numeric player identifier.
    pub fn from_id(id: u8) -> Result<Player, GameError> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(GameError::InvalidPlayer(other)),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Player {
    type Error = GameError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Player::from_id(id)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.id())
    }
}

/// Whether a player may pick the color they already have.
///
/// The official rules allow it (the move captures nothing new); some variants
/// forbid it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OwnColorRule {
    #[default]
    Permitted,
    Forbidden,
}

/// A player's current color and owned cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub color: Color,
    pub territory: Territory,
}

/// Grid plus both players' states.
///
/// Invariants kept by [`GameState::apply_move`]:
/// - every cell of a territory shows its owner's current color;
/// - the territories are disjoint;
/// - the two current colors differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    players: [PlayerState; 2],
    rule: OwnColorRule,
}

impl GameState {
    /// Start a game on `grid`: player 1 owns the bottom-left corner, player 2
    /// the top-right corner, each with the corner's color.
    pub fn new(grid: Grid) -> Result<Self, GameError> {
        let p1 = grid.bottom_left();
        let p2 = grid.top_right();
        if p1 == p2 {
            return Err(GameError::InvalidGrid(
                "starting corners coincide".into(),
            ));
        }
        let (c1, c2) = (grid.get(p1), grid.get(p2));
        if c1 == c2 {
            return Err(GameError::InvalidGrid(format!(
                "both players would start with {c1}"
            )));
        }
        Ok(Self {
            grid,
            players: [
                PlayerState {
                    color: c1,
                    territory: Territory::from([p1]),
                },
                PlayerState {
                    color: c2,
                    territory: Territory::from([p2]),
                },
            ],
            rule: OwnColorRule::default(),
        })
    }

    /// Replace the own-color rule.
    pub fn with_rule(mut self, rule: OwnColorRule) -> Self {
        self.rule = rule;
        self
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.grid.area()
    }

    #[inline]
    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    /// A player's current color.
    #[inline]
    pub fn color(&self, player: Player) -> Color {
        self.player(player).color
    }

    #[inline]
    pub fn territory(&self, player: Player) -> &Territory {
        &self.player(player).territory
    }

    /// Every color except the two current colors.
    pub fn legal_moves(&self) -> Vec<Color> {
        let taken = [self.players[0].color, self.players[1].color];
        Color::ALL
            .into_iter()
            .filter(|c| !taken.contains(c))
            .collect()
    }

    /// Check whether `player` may choose `color` under the current rule.
    pub fn check_move(&self, player: Player, color: Color) -> Result<(), GameError> {
        if color == self.color(player.other()) {
            return Err(GameError::OpponentColor { player, color });
        }
        if self.rule == OwnColorRule::Forbidden && color == self.color(player) {
            return Err(GameError::OwnColor { player, color });
        }
        Ok(())
    }

    /// Play `color` for `player`. Returns the number of cells captured.
    ///
    /// # Errors
    /// - [`GameError::OpponentColor`] if `color` is the other player's color
    /// - [`GameError::OwnColor`] if `color` is the mover's own color and the
    ///   rule is [`OwnColorRule::Forbidden`]
    pub fn apply_move(&mut self, player: Player, color: Color) -> Result<usize, GameError> {
        self.check_move(player, color)?;

        let captured: Vec<Coord> = frontier(
            &self.grid,
            self.territory(player),
            self.territory(player.other()),
        )
        .into_iter()
        .filter(|&pt| self.grid.get(pt) == color)
        .collect();

        let state = &mut self.players[player.index()];
        for &pt in &state.territory {
            self.grid.set(pt, color);
        }
        state.territory.extend(captured.iter().copied());
        state.color = color;
        Ok(captured.len())
    }

    /// Territory sizes as (player 1, player 2).
    pub fn score(&self) -> (usize, usize) {
        (
            self.players[0].territory.len(),
            self.players[1].territory.len(),
        )
    }

    /// Fraction of the board owned by either player.
    pub fn percentage_complete(&self) -> f64 {
        let (s1, s2) = self.score();
        (s1 + s2) as f64 / self.area() as f64
    }

    /// True once the territories cover the whole grid.
    pub fn is_over(&self) -> bool {
        let (s1, s2) = self.score();
        s1 + s2 >= self.area()
    }

    /// The player with the larger territory, `None` on a tie.
    pub fn leader(&self) -> Option<Player> {
        let (s1, s2) = self.score();
        match s1.cmp(&s2) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// A uniformly random legal move.
    pub fn random_move(&self, rng: &mut fastrand::Rng) -> Color {
        let moves = self.legal_moves();
        moves[rng.usize(..moves.len())]
    }

    /// The legal color with the most unowned cells bordering `player`'s
    /// territory. Ties go to the lowest color index.
    pub fn greedy_move(&self, player: Player) -> Color {
        let mut counts = [0i32; Color::ALL.len()];
        for pt in frontier(
            &self.grid,
            self.territory(player),
            self.territory(player.other()),
        ) {
            counts[self.grid.get(pt).index()] += 1;
        }
        counts[self.color(player).index()] = -1;
        counts[self.color(player.other()).index()] = -1;

        let mut best = Color::ALL[0];
        let mut best_count = i32::MIN;
        for c in Color::ALL {
            if counts[c.index()] > best_count {
                best_count = counts[c.index()];
                best = c;
            }
        }
        best
    }

    /// The legal first move from which `player` can reach the largest
    /// territory within `depth` plies, with the opponent's territory frozen.
    ///
    /// Plies after the first branch over all six colors. Depths below 2 fall
    /// back to [`GameState::greedy_move`]. Returns `None` only when there is
    /// no legal move.
    pub fn bounded_depth_move(&self, player: Player, depth: usize) -> Option<Color> {
        if depth < 2 {
            return Some(self.greedy_move(player));
        }
        let own = self.territory(player);
        let opponent = self.territory(player.other());

        let mut best_move = None;
        let mut best_territory = 0;
        for mv in self.legal_moves() {
            let grown = grow(&self.grid, own, opponent, mv);
            let reachable = best_reachable(&self.grid, &grown, opponent, depth - 1);
            if reachable > best_territory {
                best_territory = reachable;
                best_move = Some(mv);
            }
        }
        best_move
    }
}

/// In-bounds cells bordering `territory` that belong to neither territory.
pub fn frontier(grid: &Grid, territory: &Territory, other: &Territory) -> HashSet<Coord> {
    territory
        .iter()
        .flat_map(|&pt| grid.neighbors(pt))
        .filter(|pt| !territory.contains(pt) && !other.contains(pt))
        .collect()
}

/// `territory` plus its frontier cells showing `color`.
fn grow(grid: &Grid, territory: &Territory, other: &Territory, color: Color) -> Territory {
    let mut grown = territory.clone();
    grown.extend(
        frontier(grid, territory, other)
            .into_iter()
            .filter(|&pt| grid.get(pt) == color),
    );
    grown
}

/// Largest territory size reachable in `plies` more moves of any color.
fn best_reachable(grid: &Grid, territory: &Territory, other: &Territory, plies: usize) -> usize {
    if plies == 0 {
        return territory.len();
    }
    Color::ALL
        .into_iter()
        .map(|c| best_reachable(grid, &grow(grid, territory, other, c), other, plies - 1))
        .max()
        .unwrap_or(territory.len())
}

impl fmt::Display for GameState {
    /// Owned cells are upper-case, free cells lower-case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.grid.to_string();
        for (r, line) in rendered.lines().enumerate() {
            for (c, sym) in line.split_whitespace().enumerate() {
                let owned = self.players.iter().any(|p| p.territory.contains(&(r, c)));
                if owned {
                    write!(f, "{} ", sym.to_uppercase())?;
                } else {
                    write!(f, "{sym} ")?;
                }
            }
            writeln!(f)?;
        }
        let (s1, s2) = self.score();
        writeln!(f, "score: {s1} - {s2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 2x2 board `[[0,1],[2,3]]`: player 1 on yellow at (1,0), player 2
    /// on green at (0,1).
    fn tiny() -> GameState {
        GameState::new(Grid::from_indices(&[&[0, 1], &[2, 3]]).unwrap()).unwrap()
    }

    fn assert_invariants(state: &GameState) {
        let t1 = state.territory(Player::One);
        let t2 = state.territory(Player::Two);
        assert!(t1.is_disjoint(t2));
        for p in [Player::One, Player::Two] {
            for &pt in state.territory(p) {
                assert_eq!(state.grid().get(pt), state.color(p));
            }
        }
        assert!(t1.len() + t2.len() <= state.area());
    }

    #[test]
    fn test_tiny_legal_moves() {
        let state = tiny();
        assert_eq!(state.color(Player::One), Color::Yellow);
        assert_eq!(state.color(Player::Two), Color::Green);
        assert_eq!(
            state.legal_moves(),
            vec![Color::Red, Color::Blue, Color::Purple, Color::Black]
        );
    }

    #[test]
    fn test_tiny_capture() {
        let mut state = tiny();
        let captured = state.apply_move(Player::One, Color::Red).unwrap();
        assert_eq!(captured, 1);
        assert!(state.territory(Player::One).contains(&(0, 0)));
        assert!(!state.territory(Player::One).contains(&(1, 1)));
        assert_eq!(state.grid().get((1, 0)), Color::Red);
        assert_eq!(state.score(), (2, 1));
        assert_invariants(&state);
    }

    #[test]
    fn test_opponent_color_rejected() {
        let mut state = tiny();
        let before = state.clone();
        let err = state.apply_move(Player::One, Color::Green).unwrap_err();
        assert_eq!(
            err,
            GameError::OpponentColor {
                player: Player::One,
                color: Color::Green
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_own_color_is_noop() {
        let mut state = tiny();
        let before = state.clone();
        let captured = state.apply_move(Player::One, Color::Yellow).unwrap();
        assert_eq!(captured, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_own_color_forbidden_variant() {
        let mut state = tiny().with_rule(OwnColorRule::Forbidden);
        let err = state.apply_move(Player::One, Color::Yellow).unwrap_err();
        assert!(matches!(err, GameError::OwnColor { .. }));
    }

    #[test]
    fn test_single_pass_expansion() {
        // Player 1 at (2,0) on blue; the red cells at (1,0) and (0,0) form a
        // chain, but only the adjacent one is taken in one move.
        let grid = Grid::from_indices(&[&[0, 2, 1], &[0, 4, 5], &[3, 2, 4]]).unwrap();
        let mut state = GameState::new(grid).unwrap();
        state.apply_move(Player::One, Color::Red).unwrap();
        assert!(state.territory(Player::One).contains(&(1, 0)));
        assert!(!state.territory(Player::One).contains(&(0, 0)));
        assert_eq!(state.score(), (2, 1));
        assert_invariants(&state);
    }

    #[test]
    fn test_does_not_capture_opponent_cells() {
        // Players are adjacent; player 1 must not absorb player 2's corner.
        let mut state = tiny();
        state.apply_move(Player::Two, Color::Red).unwrap();
        assert_eq!(state.score(), (1, 2));
        let t2 = state.territory(Player::Two).clone();
        state.apply_move(Player::One, Color::Blue).unwrap();
        assert_eq!(state.territory(Player::Two), &t2);
        assert_eq!(state.score(), (2, 2));
        assert!(state.is_over());
        assert_eq!(state.percentage_complete(), 1.0);
        assert_invariants(&state);
    }

    #[test]
    fn test_greedy_prefers_largest_tally() {
        // Player 1 at (2,0) is yellow with neighbors (1,0)=blue and (2,1)=blue.
        let grid = Grid::from_indices(&[&[0, 1, 5], &[3, 4, 0], &[2, 3, 4]]).unwrap();
        let state = GameState::new(grid).unwrap();
        assert_eq!(state.greedy_move(Player::One), Color::Blue);
    }

    #[test]
    fn test_greedy_tie_takes_lowest_index() {
        let state = tiny();
        // Frontier of player 1: (0,0)=red and (1,1)=blue, one each.
        assert_eq!(state.greedy_move(Player::One), Color::Red);
    }

    #[test]
    fn test_greedy_skips_current_colors() {
        // Every frontier cell of player 2 shows player 1's color.
        let grid = Grid::from_indices(&[&[2, 2, 3], &[4, 2, 2], &[2, 5, 0]]).unwrap();
        let state = GameState::new(grid).unwrap();
        assert_eq!(state.color(Player::One), Color::Yellow);
        let mv = state.greedy_move(Player::Two);
        assert!(state.legal_moves().contains(&mv));
        assert_eq!(mv, Color::Red);
    }

    #[test]
    fn test_bounded_depth_below_two_is_greedy() {
        let state = tiny();
        for depth in 0..2 {
            assert_eq!(
                state.bounded_depth_move(Player::One, depth),
                Some(state.greedy_move(Player::One))
            );
        }
    }

    #[test]
    fn test_bounded_depth_sees_past_greedy() {
        // Player 1 on black at (3,0). Red and blue tie for greedy, but blue
        // opens two rings of purple while red leads nowhere.
        let grid = Grid::from_indices(&[
            &[4, 4, 2, 1],
            &[4, 4, 2, 2],
            &[3, 4, 2, 2],
            &[5, 0, 1, 1],
        ])
        .unwrap();
        let state = GameState::new(grid).unwrap();
        assert_eq!(state.greedy_move(Player::One), Color::Red);
        assert_eq!(state.bounded_depth_move(Player::One, 3), Some(Color::Blue));
        assert_eq!(state.bounded_depth_move(Player::One, 2), Some(Color::Blue));
    }

    #[test]
    fn test_player_ids() {
        assert_eq!(Player::from_id(1), Ok(Player::One));
        assert_eq!(Player::try_from(2u8), Ok(Player::Two));
        assert_eq!(Player::from_id(3), Err(GameError::InvalidPlayer(3)));
        assert_eq!(Player::One.other(), Player::Two);
    }

    #[test]
    fn test_same_start_colors_rejected() {
        let err = GameState::new(Grid::from_indices(&[&[0, 1], &[1, 3]]).unwrap()).unwrap_err();
        assert!(matches!(err, GameError::InvalidGrid(_)));
    }
}
