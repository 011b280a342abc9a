//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. Parents are never
//! linked from children; each simulation records its own path.

use crate::node::{Node, NodeId};
use rand::Rng;

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index.
/// The root always sits at [`NodeId::ROOT`].
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only `root`.
    pub fn new(root: Node) -> Self {
        Self { nodes: vec![root] }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Attach `child` under `parent` for `column`, returning its ID.
    ///
    /// The caller guarantees `column` is a legal, unexpanded move of `parent`.
    pub fn expand(&mut self, parent: NodeId, column: usize, child: Node) -> NodeId {
        debug_assert!(self.get(parent).legal.contains(&column));
        debug_assert!(self.get(parent).child(column).is_none());

        let id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.get_mut(parent).children[column] = Some(id);
        id
    }

    /// Drop every node and start over from a fresh root.
    pub fn reset(&mut self, root: Node) {
        self.nodes.clear();
        self.nodes.push(root);
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should never be true as root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }

    /// UCB1 score of every expanded child of `id`, ascending by column.
    ///
    /// `Q` is the child's mean reward seen by the player to move at `id`:
    /// `Q + c * sqrt(ln(N_parent) / N_child)`. An unvisited child scores infinity.
    pub fn ucb_scores(&self, id: NodeId, exploration: f64) -> Vec<(usize, f64)> {
        let parent = self.get(id);
        let log_parent = (parent.stats.visits.max(1) as f64).ln();

        parent
            .expanded()
            .map(|(col, child_id)| {
                let child = &self.get(child_id).stats;
                let score = if child.visits == 0 {
                    f64::INFINITY
                } else {
                    let q = child.value_for(parent.to_move);
                    q + exploration * (log_parent / child.visits as f64).sqrt()
                };
                (col, score)
            })
            .collect()
    }

    /// Expanded child of `id` with the highest UCB1 score.
    ///
    /// Ties go to the lowest column. Returns `None` if `id` has no children.
    pub fn select_uct_child(&self, id: NodeId, exploration: f64) -> Option<(usize, NodeId)> {
        let mut best: Option<(usize, f64)> = None;
        for (col, score) in self.ucb_scores(id, exploration) {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }
        best.and_then(|(col, _)| self.get(id).child(col).map(|child| (col, child)))
    }

    /// Uniformly random expanded child of `id`.
    pub fn select_random_child<R: Rng>(&self, id: NodeId, rng: &mut R) -> Option<(usize, NodeId)> {
        let expanded: Vec<(usize, NodeId)> = self.get(id).expanded().collect();
        if expanded.is_empty() {
            return None;
        }
        Some(expanded[rng.gen_range(0..expanded.len())])
    }
}
