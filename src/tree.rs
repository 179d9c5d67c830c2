//! Search tree storage.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. A node's
//! `children` list is the only owning edge; `parent` is a plain index used to
//! walk back to the root during backpropagation. Dropping the tree drops every
//! node at once.

use crate::board::Color;

/// Index of a node in its [`SearchTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// The move that leads to this node. Meaningless at the root.
    pub color: Color,
    /// Visit count. Starts at 1 so ratios never divide by zero.
    pub visits: u32,
    /// Cumulative wins
    pub wins: f64,
    /// Cumulative score value
    pub score_value: f64,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(color: Color, parent: Option<NodeId>) -> Self {
        Self {
            color,
            visits: 1,
            wins: 0.0,
            score_value: 0.0,
            children: Vec::new(),
            parent,
        }
    }

    /// Combined value per visit: `(wins + score_value) / visits`.
    #[inline]
    pub fn ratio(&self) -> f64 {
        (self.wins + self.score_value) / self.visits as f64
    }

    #[inline]
    pub fn winrate(&self) -> f64 {
        self.wins / self.visits as f64
    }

    /// Add one visit and accumulate an outcome.
    pub fn record_outcome(&mut self, win: f64, score_value: f64) {
        self.visits += 1;
        self.wins += win;
        self.score_value += score_value;
    }
}

/// Arena-backed rooted tree.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// A tree holding only a root. The root's color is a placeholder.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Color::ALL[0], None)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append a child for `color` under `parent` and return it.
    pub fn add_child(&mut self, parent: NodeId, color: Color) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(color, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Record an outcome on `from` and every ancestor up to the root.
    pub fn backpropagate(&mut self, from: NodeId, win: f64, score_value: f64) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.record_outcome(win, score_value);
            current = node.parent;
        }
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_one_visit() {
        let tree = SearchTree::new();
        let root = tree.node(tree.root());
        assert_eq!(root.visits, 1);
        assert_eq!(root.ratio(), 0.0);
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let a = tree.add_child(root, Color::Blue);
        let b = tree.add_child(root, Color::Red);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.node(a).parent, Some(root));
        assert_eq!(tree.node(b).color, Color::Red);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_backpropagate_reaches_root_only_along_path() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let a = tree.add_child(root, Color::Blue);
        let sibling = tree.add_child(root, Color::Green);
        let leaf = tree.add_child(a, Color::Purple);

        tree.backpropagate(leaf, 1.0, 0.5);

        for id in [leaf, a, root] {
            let node = tree.node(id);
            assert_eq!(node.visits, 2);
            assert_eq!(node.wins, 1.0);
            assert_eq!(node.score_value, 0.5);
            assert_eq!(node.ratio(), 0.75);
        }
        assert_eq!(tree.node(sibling).visits, 1);
    }

    #[test]
    fn test_record_outcome_accumulates() {
        let mut tree = SearchTree::new();
        let id = tree.add_child(tree.root(), Color::Yellow);
        tree.node_mut(id).record_outcome(1.0, 1.5);
        tree.node_mut(id).record_outcome(0.0, 0.0);
        let node = tree.node(id);
        assert_eq!(node.visits, 3);
        assert_eq!(node.winrate(), 1.0 / 3.0);
    }
}
