//! Monte Carlo Tree Search with opponent modelling.
//!
//! Each iteration runs four phases on a fresh copy of the game:
//! - **select**: descend by UCB weight, skipping children that are illegal
//!   because they match the opponent's current color. After every step the
//!   opponent replies, either uniformly at random or with a bounded-depth
//!   lookahead whose depth shrinks as the board fills up;
//! - **expand**: give the leaf one child per color other than the searching
//!   player's current color;
//! - **simulate**: run a random playout from every new child that is legal;
//! - **backpropagate**: add each playout outcome to the child and all of its
//!   ancestors.
//!
//! When the search ends, the root child with the best `(wins + score) / visits`
//! is played, unless the root children are nearly indistinguishable, in which
//! case the greedy move is played instead.

use tracing::{debug, info};

use crate::board::Color;
use crate::constants::{
    EARLY_GAME_COMPLETION, EARLY_GAME_DEPTH, EXPLORATION, INTELLIGENCE, LATE_GAME_DEPTH,
    MID_GAME_COMPLETION, MID_GAME_DEPTH, N_ITERATIONS, STD_DEV_THRESHOLD,
};
use crate::error::GameError;
use crate::game::{GameState, Player};
use crate::playout::random_playout;
use crate::tree::{Node, NodeId, SearchTree};

/// Search parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// UCB exploration constant
    pub exploration: f64,
    /// Probability that the modelled opponent plays a lookahead move
    pub intelligence: f64,
    /// Iterations per move
    pub iterations: usize,
    /// Log per-move statistics at the end of each search
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: EXPLORATION,
            intelligence: INTELLIGENCE,
            iterations: N_ITERATIONS,
            verbose: false,
        }
    }
}

impl SearchConfig {
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_intelligence(mut self, intelligence: f64) -> Self {
        self.intelligence = intelligence;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Statistics for one root move.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveStats {
    pub color: Color,
    pub visits: u32,
    /// `(wins + score_value) / visits`
    pub ratio: f64,
    /// `wins / visits`
    pub win_percentage: f64,
    /// Average final territory in a won playout, in cells
    pub average_score: f64,
}

/// UCB weight of `child` under a parent with `parent_visits` visits.
#[inline]
pub fn ucb_weight(child: &Node, parent_visits: u32, exploration: f64) -> f64 {
    let visits = child.visits as f64;
    child.ratio() + exploration * ((parent_visits as f64).ln() / visits).sqrt()
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Pick the move to play from the root statistics.
///
/// Returns `fallback` when there are no statistics or when the population
/// standard deviation of the ratios is below [`STD_DEV_THRESHOLD`]. Otherwise
/// returns the color with the highest ratio; the first one wins an exact tie.
pub fn decide(stats: &[MoveStats], fallback: Color) -> Color {
    let ratios: Vec<f64> = stats.iter().map(|s| s.ratio).collect();
    let spread = std_dev(&ratios);
    if spread < STD_DEV_THRESHOLD {
        debug!(spread, "root moves undecided, playing fallback");
        return fallback;
    }

    let mut best: Option<&MoveStats> = None;
    for s in stats {
        if best.is_none_or(|b| s.ratio > b.ratio) {
            best = Some(s);
        }
    }
    best.map_or(fallback, |s| s.color)
}

/// Lookahead depth for the modelled opponent at a given board completion.
pub fn opponent_depth(completion: f64) -> usize {
    if completion < EARLY_GAME_COMPLETION {
        EARLY_GAME_DEPTH
    } else if completion < MID_GAME_COMPLETION {
        MID_GAME_DEPTH
    } else {
        LATE_GAME_DEPTH
    }
}

/// MCTS controller for one player's move decision.
///
/// The engine keeps its own copy of the game; the caller's state is never
/// touched and the chosen color must be applied by the caller.
pub struct SearchEngine {
    game: GameState,
    player: Player,
    config: SearchConfig,
    tree: SearchTree,
    rng: fastrand::Rng,
}

impl SearchEngine {
    /// Build an engine for `player` on a copy of `game`. The root gets one
    /// child per legal move.
    pub fn new(game: &GameState, player: Player, config: SearchConfig, rng: fastrand::Rng) -> Self {
        let mut tree = SearchTree::new();
        let root = tree.root();
        for mv in game.legal_moves() {
            tree.add_child(root, mv);
        }
        Self {
            game: game.clone(),
            player,
            config,
            tree,
            rng,
        }
    }

    /// Run `iterations` iterations and return the color to play.
    pub fn select_move(&mut self, iterations: usize, verbose: bool) -> Result<Color, GameError> {
        for i in 0..iterations {
            self.iterate()?;
            if (i + 1) % 100 == 0 {
                debug!(iteration = i + 1, nodes = self.tree.node_count(), "search progress");
            }
        }

        let stats = self.root_stats();
        if verbose {
            for s in &stats {
                info!(
                    "{} has win percentage {:.3} with an average score of {:.2}",
                    s.color, s.win_percentage, s.average_score
                );
            }
        }

        let greedy = self.game.greedy_move(self.player);
        let mv = decide(&stats, greedy);
        debug!(%mv, %greedy, nodes = self.tree.node_count(), "search finished");
        Ok(mv)
    }

    /// Per-move statistics for the root's children, in child order.
    pub fn root_stats(&self) -> Vec<MoveStats> {
        let size_scale = self.game.area() as f64 / 2.0;
        self.tree
            .children(self.tree.root())
            .iter()
            .map(|&id| {
                let node = self.tree.node(id);
                MoveStats {
                    color: node.color,
                    visits: node.visits,
                    ratio: node.ratio(),
                    win_percentage: node.winrate(),
                    average_score: node.score_value / node.visits as f64 * size_scale,
                }
            })
            .collect()
    }

    /// One select / expand / simulate / backpropagate round.
    fn iterate(&mut self) -> Result<(), GameError> {
        let (leaf, search) = self.select()?;
        self.expand(leaf, &search);
        self.simulate(leaf, &search)
    }

    /// Descend to a leaf, playing the path and the modelled replies on a copy
    /// of the game.
    fn select(&mut self) -> Result<(NodeId, GameState), GameError> {
        let opponent = self.player.other();
        let mut search = self.game.clone();
        let mut current = self.tree.root();

        while !self.tree.children(current).is_empty() {
            let parent_visits = self.tree.node(current).visits;
            let blocked = search.color(opponent);

            let mut selected = None;
            let mut best_weight = 0.0;
            for &child in self.tree.children(current) {
                let node = self.tree.node(child);
                if node.color == blocked {
                    continue;
                }
                let weight = ucb_weight(node, parent_visits, self.config.exploration);
                if weight >= best_weight {
                    best_weight = weight;
                    selected = Some(child);
                }
            }

            let Some(child) = selected else {
                debug!("no eligible child, stopping descent");
                break;
            };
            current = child;

            search.apply_move(self.player, self.tree.node(current).color)?;
            let reply = self.opponent_reply(&search);
            search.apply_move(opponent, reply)?;
        }

        Ok((current, search))
    }

    /// The modelled opponent's move: random with probability
    /// `1 - intelligence`, otherwise a lookahead move.
    fn opponent_reply(&mut self, search: &GameState) -> Color {
        let opponent = self.player.other();
        if self.rng.f64() > self.config.intelligence {
            return search.random_move(&mut self.rng);
        }
        let depth = opponent_depth(search.percentage_complete());
        search
            .bounded_depth_move(opponent, depth)
            .unwrap_or_else(|| search.greedy_move(opponent))
    }

    fn expand(&mut self, leaf: NodeId, search: &GameState) {
        if !self.tree.children(leaf).is_empty() {
            return;
        }
        let own = search.color(self.player);
        for color in Color::ALL {
            if color != own {
                self.tree.add_child(leaf, color);
            }
        }
    }

    /// Play out every legal child of `leaf` and backpropagate the results.
    fn simulate(&mut self, leaf: NodeId, search: &GameState) -> Result<(), GameError> {
        let blocked = search.color(self.player.other());
        let children = self.tree.children(leaf).to_vec();
        for child in children {
            let color = self.tree.node(child).color;
            if color == blocked {
                continue;
            }
            let mut sim = search.clone();
            sim.apply_move(self.player, color)?;
            let outcome = random_playout(&mut sim, self.player, &mut self.rng)?;
            self.tree.backpropagate(child, outcome.win, outcome.score_value);
        }
        Ok(())
    }
}

/// Search `game` for `player` with `config` and return the chosen color.
pub fn choose_move(
    game: &GameState,
    player: Player,
    config: &SearchConfig,
    rng: fastrand::Rng,
) -> Result<Color, GameError> {
    let mut engine = SearchEngine::new(game, player, config.clone(), rng);
    engine.select_move(config.iterations, config.verbose)
}
