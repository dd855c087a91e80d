//! Lowest common ancestor in O(n) preprocessing and O(1) query.
//! # Overview
//! Between the first occurrences of `a` and `b` in the Euler tour, the traversal
//! climbs no higher than their lowest common ancestor and passes through it, so the
//! ancestor is the node at the shallowest position of that stretch of the tour.
//! The depths of the tour step by exactly one, which is what
//! [`RestrictedRangeMinimumQuery`] needs.
use crate::error::{Precondition, Result};
use crate::euler_tour::EulerTour;
use crate::restricted_rmq::RestrictedRangeMinimumQuery;
use crate::tree::{Traversal, TreeNodes};
use std::fmt::Debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowestCommonAncestor<N> {
    tour: EulerTour<N>,
    rmq: RestrictedRangeMinimumQuery,
    preprocessed: bool,
}

impl<N> Default for LowestCommonAncestor<N> {
    fn default() -> Self {
        Self {
            tour: EulerTour::default(),
            rmq: RestrictedRangeMinimumQuery::default(),
            preprocessed: false,
        }
    }
}

impl<N: Copy + Eq + Debug> LowestCommonAncestor<N> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Preprocess the tree below `root` and return the engine.
    pub fn build<T: TreeNodes<Node = N>>(
        tree: &mut T,
        root: N,
        traversal: Traversal,
    ) -> Result<Self> {
        let mut lca = Self::new();
        lca.preprocess(tree, root, traversal)?;
        Ok(lca)
    }
    /// Build the Euler tour of the tree below `root`, writing the canonical index of
    /// every node into its id slot, and preprocess the tour depths.
    /// Any previous state is discarded first. A `root` outside `tree` is
    /// `UnknownNode`; a traversal the tree does not provide is `UnsupportedTraversal`.
    pub fn preprocess<T: TreeNodes<Node = N>>(
        &mut self,
        tree: &mut T,
        root: N,
        traversal: Traversal,
    ) -> Result<()> {
        self.clear();
        self.tour = EulerTour::build(tree, root, traversal)?;
        self.rmq = RestrictedRangeMinimumQuery::from_slice(self.tour.depths())?;
        self.preprocessed = true;
        Ok(())
    }
    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed
    }
    pub fn tour(&self) -> &EulerTour<N> {
        &self.tour
    }
    pub fn root(&self) -> Option<N> {
        self.tour.node(0)
    }
    pub fn clear(&mut self) {
        self.tour.clear();
        self.rmq.clear();
        self.preprocessed = false;
    }
    /// The lowest common ancestor of `a` and `b`. The order of `a` and `b` does not matter.
    /// `tree` must be the tree given to `preprocess`.
    pub fn query<T: TreeNodes<Node = N>>(&self, tree: &T, a: N, b: N) -> Result<N> {
        if !self.preprocessed {
            return Err(Precondition::NotPreprocessed.into());
        }
        let i = self
            .tour
            .first_occurrence(tree, a)
            .ok_or(Precondition::UnknownNode)?;
        let j = self
            .tour
            .first_occurrence(tree, b)
            .ok_or(Precondition::UnknownNode)?;
        let position = self.rmq.query(i, j)?;
        Ok(self.tour.nodes()[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RmqError;
    use crate::tree::{NodeIndex, Tree};
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoroshiro128PlusPlus;
    fn naive_lca(tree: &Tree, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        let ancestors: Vec<_> = std::iter::successors(Some(a), |&n| tree.parent(n)).collect();
        std::iter::successors(Some(b), |&n| tree.parent(n))
            .find(|n| ancestors.contains(n))
            .unwrap()
    }
    fn random_tree(rng: &mut Xoroshiro128PlusPlus, len: usize, max_branch: usize) -> Tree {
        let mut tree = Tree::with_capacity(len);
        let mut cursor = 0;
        while tree.len() < len {
            let parent = tree.node_indices().nth(cursor).unwrap();
            cursor += 1;
            for _ in 0..rng.gen_range(1..=max_branch) {
                if tree.len() < len {
                    tree.append_child(parent);
                }
            }
        }
        tree
    }
    #[test]
    fn small_tree() {
        let mut tree = Tree::new();
        let r = tree.root();
        let a = tree.append_child(r);
        let b = tree.append_child(r);
        let c = tree.append_child(a);
        let lca = LowestCommonAncestor::build(&mut tree, r, Traversal::IndexedChildren).unwrap();
        assert_eq!(lca.query(&tree, c, b), Ok(r));
        assert_eq!(lca.query(&tree, b, c), Ok(r));
        assert_eq!(lca.query(&tree, c, a), Ok(a));
        assert_eq!(lca.query(&tree, c, c), Ok(c));
        assert_eq!(lca.query(&tree, r, c), Ok(r));
        assert_eq!(lca.root(), Some(r));
    }
    #[test]
    fn errors() {
        let mut tree = Tree::new();
        let r = tree.root();
        let a = tree.append_child(r);
        let b = tree.append_child(a);
        let mut lca = LowestCommonAncestor::new();
        assert_eq!(
            lca.query(&tree, a, b),
            Err(RmqError::PreconditionViolation(Precondition::NotPreprocessed))
        );
        lca.preprocess(&mut tree, a, Traversal::IndexedChildren).unwrap();
        assert_eq!(lca.query(&tree, a, b), Ok(a));
        assert_eq!(
            lca.query(&tree, r, b),
            Err(RmqError::PreconditionViolation(Precondition::UnknownNode))
        );
        lca.clear();
        assert!(!lca.is_preprocessed());
        // A root taken from a larger tree.
        let mut small = Tree::new();
        assert_eq!(
            lca.preprocess(&mut small, b, Traversal::IndexedChildren),
            Err(RmqError::PreconditionViolation(Precondition::UnknownNode))
        );
        assert!(!lca.is_preprocessed());
        assert_eq!(
            LowestCommonAncestor::build(&mut small, b, Traversal::FirstChildNextSibling).map(|_| ()),
            Err(RmqError::PreconditionViolation(Precondition::UnknownNode))
        );
        let root = small.root();
        lca.preprocess(&mut small, root, Traversal::IndexedChildren).unwrap();
        assert_eq!(lca.query(&small, root, root), Ok(root));
    }
    #[test]
    fn random_check() {
        let mut rng: Xoroshiro128PlusPlus = SeedableRng::seed_from_u64(348203);
        for (len, branch) in [(1, 1), (2, 1), (5, 3), (50, 1), (300, 4), (2_000, 8)] {
            for traversal in [Traversal::IndexedChildren, Traversal::FirstChildNextSibling] {
                let mut tree = random_tree(&mut rng, len, branch);
                let root = tree.root();
                let lca = LowestCommonAncestor::build(&mut tree, root, traversal).unwrap();
                let nodes: Vec<_> = tree.node_indices().collect();
                for _ in 0..500 {
                    let a = nodes[rng.gen_range(0..len)];
                    let b = nodes[rng.gen_range(0..len)];
                    assert_eq!(lca.query(&tree, a, b), Ok(naive_lca(&tree, a, b)));
                }
            }
        }
    }
}
