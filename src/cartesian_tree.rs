//! Range minimum query on an arbitrary ordered array in O(n) preprocessing and
//! O(1) query, by way of a Cartesian tree and [`LowestCommonAncestor`].
//! # Overview
//! The minimum of `xs[i..=j]` is the lowest common ancestor of `i` and `j` in the
//! Cartesian tree of `xs`. The tree is built online: a new value pops the right spine
//! while the spine holds larger values, adopts the last popped node as its left child
//! and hangs itself as the right child of what remains. Equal values are not popped,
//! so among equal minima the leftmost is the ancestor.
use crate::error::{Precondition, Result};
use crate::lca::LowestCommonAncestor;
use crate::range_minimum_query::{validate_range, RangeMinimumQuery};
use crate::tree::{Traversal, TreeNodes};
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartesianNode<T> {
    pub value: T,
    pub left: Option<usize>,
    pub right: Option<usize>,
    node_id: Option<usize>,
}

/// Cartesian tree whose node `i` holds the `i`-th appended value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartesianTree<T> {
    nodes: Vec<CartesianNode<T>>,
    root: Option<usize>,
    right_spine: Vec<usize>,
}

impl<T> Default for CartesianTree<T> {
    fn default() -> Self {
        Self {
            nodes: vec![],
            root: None,
            right_spine: vec![],
        }
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> CartesianTree<T> {
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }
    /// Append `value` as the rightmost node. Amortized O(1).
    pub fn push(&mut self, value: T) {
        let idx = self.nodes.len();
        let mut left = None;
        while let Some(&top) = self.right_spine.last() {
            if self.nodes[top].value <= value {
                break;
            }
            left = self.right_spine.pop();
        }
        match self.right_spine.last() {
            Some(&parent) => self.nodes[parent].right = Some(idx),
            None => self.root = Some(idx),
        }
        self.nodes.push(CartesianNode {
            value,
            left,
            right: None,
            node_id: None,
        });
        self.right_spine.push(idx);
    }
    pub fn root(&self) -> Option<usize> {
        self.root
    }
    pub fn node(&self, idx: usize) -> &CartesianNode<T> {
        &self.nodes[idx]
    }
    pub fn value(&self, idx: usize) -> T {
        self.nodes[idx].value
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.right_spine.clear();
        self.root = None;
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> TreeNodes for CartesianTree<T> {
    type Node = usize;
    fn contains(&self, node: usize) -> bool {
        node < self.nodes.len()
    }
    // Nodes keep no parent link, so there is no way to step to a sibling.
    fn supports(&self, traversal: Traversal) -> bool {
        traversal == Traversal::IndexedChildren
    }
    fn node_id(&self, node: usize) -> Option<usize> {
        self.nodes.get(node).and_then(|n| n.node_id)
    }
    fn set_node_id(&mut self, node: usize, id: usize) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.node_id = Some(id);
        }
    }
    // The first existing child comes first, so a lone right child is child 0.
    fn child(&self, node: usize, i: usize) -> Option<usize> {
        let node = self.nodes.get(node)?;
        node.left.into_iter().chain(node.right).nth(i)
    }
    fn first_child(&self, node: usize) -> Option<usize> {
        self.child(node, 0)
    }
    fn next_sibling(&self, _node: usize) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartesianTreeRangeMinimumQuery<T> {
    tree: CartesianTree<T>,
    lca: LowestCommonAncestor<usize>,
    preprocessed: bool,
}

impl<T> Default for CartesianTreeRangeMinimumQuery<T> {
    fn default() -> Self {
        Self {
            tree: CartesianTree::default(),
            lca: LowestCommonAncestor::default(),
            preprocessed: false,
        }
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> RangeMinimumQuery for CartesianTreeRangeMinimumQuery<T> {
    fn min(&self, i: usize, j: usize) -> Result<usize> {
        self.query_index(i, j)
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> CartesianTreeRangeMinimumQuery<T> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_capacity(capacity: usize) -> Self {
        let mut rmq = Self::new();
        rmq.reserve(capacity);
        rmq
    }
    /// Append all of `input` and preprocess.
    pub fn from_slice(input: &[T]) -> Result<Self> {
        let mut rmq = Self::with_capacity(input.len());
        input.iter().for_each(|&x| rmq.tree.push(x));
        rmq.preprocess()?;
        Ok(rmq)
    }
    pub fn reserve(&mut self, additional: usize) {
        self.tree.reserve(additional);
    }
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.preprocessed {
            return Err(Precondition::AlreadyPreprocessed.into());
        }
        self.tree.push(value);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.tree.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed
    }
    pub fn tree(&self) -> &CartesianTree<T> {
        &self.tree
    }
    pub fn clear(&mut self) {
        self.tree.clear();
        self.lca.clear();
        self.preprocessed = false;
    }
    /// Hand the Cartesian tree to the LCA engine.
    /// Calling it again on a frozen structure is a no-op.
    pub fn preprocess(&mut self) -> Result<()> {
        if self.preprocessed {
            return Ok(());
        }
        if let Some(root) = self.tree.root() {
            self.lca
                .preprocess(&mut self.tree, root, Traversal::IndexedChildren)?;
        }
        log::debug!("cartesian tree rmq: {} elements", self.tree.len());
        self.preprocessed = true;
        Ok(())
    }
    /// Position of the minimum over the inclusive range between `i` and `j`.
    pub fn query_index(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = validate_range(self.preprocessed, self.tree.len(), i, j)?;
        if i == j {
            return Ok(i);
        }
        self.lca.query(&self.tree, i, j)
    }
    /// The minimum value over the inclusive range between `i` and `j`.
    pub fn query(&self, i: usize, j: usize) -> Result<T> {
        self.query_index(i, j).map(|idx| self.tree.value(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RmqError;
    use crate::range_minimum_query::naive_min;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoroshiro128PlusPlus;
    fn in_order<T: Ord + Copy + Debug>(tree: &CartesianTree<T>) -> Vec<usize> {
        let mut order = vec![];
        let mut stack = vec![];
        let mut current = tree.root();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = tree.node(node).left;
            }
            let node = stack.pop().unwrap();
            order.push(node);
            current = tree.node(node).right;
        }
        order
    }
    #[test]
    fn shape() {
        let input = vec![5, 2, 4, 1, 3];
        let mut tree = CartesianTree::default();
        input.iter().for_each(|&x| tree.push(x));
        assert_eq!(tree.root(), Some(3));
        assert_eq!(tree.node(3).left, Some(1));
        assert_eq!(tree.node(3).right, Some(4));
        assert_eq!(tree.node(1).left, Some(0));
        assert_eq!(tree.node(1).right, Some(2));
        assert_eq!(in_order(&tree), vec![0, 1, 2, 3, 4]);
        // Node 4 is a leaf; node 2 too.
        assert_eq!(tree.child(4, 0), None);
        assert_eq!(tree.child(3, 1), Some(4));
    }
    #[test]
    fn lone_right_child_is_first() {
        let mut tree = CartesianTree::default();
        [1, 2, 3].iter().for_each(|&x| tree.push(x));
        assert_eq!(tree.node(0).left, None);
        assert_eq!(tree.child(0, 0), Some(1));
        assert_eq!(tree.child(0, 1), None);
    }
    #[test]
    fn heap_and_in_order() {
        let mut rng: Xoroshiro128PlusPlus = SeedableRng::seed_from_u64(12908320);
        let input: Vec<u32> = (0..500).map(|_| rng.gen_range(0..50)).collect();
        let mut tree = CartesianTree::default();
        input.iter().for_each(|&x| tree.push(x));
        assert_eq!(in_order(&tree), (0..input.len()).collect::<Vec<_>>());
        for idx in 0..tree.len() {
            let node = tree.node(idx);
            for child in node.left.into_iter().chain(node.right) {
                assert!(node.value <= tree.value(child));
            }
        }
    }
    #[test]
    fn only_indexed_children() {
        let mut tree = CartesianTree::default();
        [5, 2, 4, 1, 3].iter().for_each(|&x| tree.push(x));
        let root = tree.root().unwrap();
        assert!(!tree.supports(Traversal::FirstChildNextSibling));
        assert_eq!(
            LowestCommonAncestor::build(&mut tree, root, Traversal::FirstChildNextSibling)
                .map(|_| ()),
            Err(RmqError::PreconditionViolation(
                Precondition::UnsupportedTraversal(Traversal::FirstChildNextSibling)
            ))
        );
        let lca = LowestCommonAncestor::build(&mut tree, root, Traversal::IndexedChildren).unwrap();
        assert_eq!(lca.tour().len(), 9);
        assert_eq!(lca.query(&tree, 0, 4), Ok(3));
        assert_eq!(
            LowestCommonAncestor::build(&mut tree, 5, Traversal::IndexedChildren).map(|_| ()),
            Err(RmqError::PreconditionViolation(Precondition::UnknownNode))
        );
    }
    #[test]
    fn small_example() {
        let rmq = CartesianTreeRangeMinimumQuery::from_slice(&[5, 2, 4, 1, 3]).unwrap();
        assert_eq!(rmq.query_index(0, 4), Ok(3));
        assert_eq!(rmq.query(0, 4), Ok(1));
        assert_eq!(rmq.query_index(0, 1), Ok(1));
        assert_eq!(rmq.query(1, 0), Ok(2));
        assert_eq!(rmq.query_index(2, 2), Ok(2));
    }
    #[test]
    fn lifecycle() {
        let mut rmq = CartesianTreeRangeMinimumQuery::new();
        rmq.push_back(3).unwrap();
        assert_eq!(
            rmq.query(0, 0),
            Err(RmqError::PreconditionViolation(Precondition::NotPreprocessed))
        );
        rmq.preprocess().unwrap();
        assert_eq!(rmq.query(0, 0), Ok(3));
        assert!(rmq.push_back(1).is_err());
        rmq.clear();
        rmq.preprocess().unwrap();
        assert_eq!(
            rmq.query(0, 0),
            Err(RmqError::PreconditionViolation(Precondition::Empty))
        );
    }
    #[test]
    fn random_check() {
        let mut rng: Xoroshiro128PlusPlus = SeedableRng::seed_from_u64(348203);
        for len in [1, 2, 3, 4, 10, 100, 3_000] {
            let input: Vec<u32> = (0..len).map(|_| rng.gen_range(0..30)).collect();
            let rmq = CartesianTreeRangeMinimumQuery::from_slice(&input).unwrap();
            for _ in 0..500 {
                let i = rng.gen_range(0..len);
                let j = rng.gen_range(0..len);
                let (s, e) = (i.min(j), i.max(j));
                assert_eq!(rmq.min(i, j), Ok(naive_min(&input, s, e)), "{i},{j}");
            }
        }
    }
    #[test]
    fn sorted_input_is_a_path() {
        let input: Vec<usize> = (0..50_000).collect();
        let rmq = CartesianTreeRangeMinimumQuery::from_slice(&input).unwrap();
        assert_eq!(rmq.query(10, 40_000), Ok(10));
        let input: Vec<usize> = (0..50_000).rev().collect();
        let rmq = CartesianTreeRangeMinimumQuery::from_slice(&input).unwrap();
        assert_eq!(rmq.query_index(10, 40_000), Ok(40_000));
    }
}
