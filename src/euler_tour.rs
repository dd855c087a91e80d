//! Euler tour of a rooted tree.
//! # Overview
//! The tour records a node every time the depth-first traversal stands on it: once on
//! arrival and once more after returning from each child, so a node with k children
//! appears k+1 times and consecutive depths differ by exactly one.
//! The position of the first appearance is the node's canonical index; it is written
//! into the node's id slot while the tour is built.
use crate::error::{Precondition, Result};
use crate::tree::{Traversal, TreeNodes};
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EulerTour<N> {
    depths: Vec<usize>,
    nodes: Vec<N>,
}

impl<N> Default for EulerTour<N> {
    fn default() -> Self {
        Self {
            depths: vec![],
            nodes: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Cursor<N> {
    // Index of the next child to visit.
    Indexed(usize),
    // The next child to visit.
    Sibling(Option<N>),
}

#[derive(Debug, Clone, Copy)]
struct Frame<N> {
    node: N,
    cursor: Cursor<N>,
}

impl<N: Copy + Eq + Debug> Frame<N> {
    fn new<T: TreeNodes<Node = N>>(tree: &T, node: N, traversal: Traversal) -> Self {
        let cursor = match traversal {
            Traversal::IndexedChildren => Cursor::Indexed(0),
            Traversal::FirstChildNextSibling => Cursor::Sibling(tree.first_child(node)),
        };
        Self { node, cursor }
    }
    fn next_child<T: TreeNodes<Node = N>>(&mut self, tree: &T) -> Option<N> {
        match &mut self.cursor {
            Cursor::Indexed(i) => {
                let child = tree.child(self.node, *i)?;
                *i += 1;
                Some(child)
            }
            Cursor::Sibling(next) => {
                let child = (*next)?;
                *next = tree.next_sibling(child);
                Some(child)
            }
        }
    }
}

impl<N: Copy + Eq + Debug> EulerTour<N> {
    /// Traverse the tree below `root`, assigning each node its canonical index.
    /// The traversal keeps its own stack, so arbitrarily deep trees are fine.
    /// Fails if `root` is not in `tree` or `tree` cannot be walked with `traversal`.
    pub fn build<T: TreeNodes<Node = N>>(
        tree: &mut T,
        root: N,
        traversal: Traversal,
    ) -> Result<Self> {
        if !tree.supports(traversal) {
            return Err(Precondition::UnsupportedTraversal(traversal).into());
        }
        if !tree.contains(root) {
            return Err(Precondition::UnknownNode.into());
        }
        let mut tour = Self::default();
        tour.arrive(tree, root, 0);
        let mut stack = vec![Frame::new(tree, root, traversal)];
        while let Some(top) = stack.last_mut() {
            match top.next_child(tree) {
                Some(child) => {
                    let depth = stack.len();
                    tour.arrive(tree, child, depth);
                    stack.push(Frame::new(tree, child, traversal));
                }
                None => {
                    stack.pop();
                    if let Some(parent) = stack.last() {
                        tour.push(parent.node, stack.len() - 1);
                    }
                }
            }
        }
        log::debug!(
            "euler tour: {} entries over {} nodes",
            tour.len(),
            tour.len() / 2 + 1
        );
        Ok(tour)
    }
    fn arrive<T: TreeNodes<Node = N>>(&mut self, tree: &mut T, node: N, depth: usize) {
        tree.set_node_id(node, self.nodes.len());
        self.push(node, depth);
    }
    fn push(&mut self, node: N, depth: usize) {
        self.nodes.push(node);
        self.depths.push(depth);
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn depths(&self) -> &[usize] {
        &self.depths
    }
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
    pub fn node(&self, position: usize) -> Option<N> {
        self.nodes.get(position).copied()
    }
    /// Canonical index of `node`, if it was visited by this tour.
    pub fn first_occurrence<T: TreeNodes<Node = N>>(&self, tree: &T, node: N) -> Option<usize> {
        tree.node_id(node)
            .filter(|&position| self.nodes.get(position) == Some(&node))
    }
    pub fn clear(&mut self) {
        self.depths.clear();
        self.nodes.clear();
    }
}
