//! Range minimum queries and lowest common ancestors in constant time.
//!
//! - [`SparseTableRangeMinimumQuery`]: O(n log n) preprocessing on any ordered array.
//! - [`LowestCommonAncestor`]: O(n) preprocessing on a rooted tree, through its Euler
//!   tour and [`RestrictedRangeMinimumQuery`].
//! - [`CartesianTreeRangeMinimumQuery`]: O(n) preprocessing on any ordered array, by
//!   reducing it to LCA on its Cartesian tree.
//! - [`AdaptiveRangeMinimumQuery`]: picks one of the above (or a plain scan) by size.
//!
//! Every structure is filled by appending, frozen by a single `preprocess`, and then
//! answers read-only queries, which can be shared across threads.
//! To query maxima, wrap the values in [`std::cmp::Reverse`].
#[macro_use]
extern crate serde;
extern crate num;
pub mod adaptive;
pub mod cartesian_tree;
pub mod error;
pub mod euler_tour;
pub mod lca;
pub mod log_table;
pub mod range_minimum_query;
pub mod restricted_rmq;
pub mod tree;

pub use adaptive::{AdaptiveConfig, AdaptiveRangeMinimumQuery, Tier};
pub use cartesian_tree::{CartesianTree, CartesianTreeRangeMinimumQuery};
pub use error::{Precondition, Result, RmqError};
pub use lca::LowestCommonAncestor;
pub use range_minimum_query::{RangeMinimumQuery, SparseTableRangeMinimumQuery};
pub use restricted_rmq::RestrictedRangeMinimumQuery;
pub use tree::{NodeIndex, Traversal, Tree, TreeNodes};
