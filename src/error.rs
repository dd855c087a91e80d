//! Errors reported by the range minimum query and LCA structures.
use crate::tree::Traversal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RmqError>;

/// A broken usage contract. None of these are transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("the structure has not been preprocessed yet")]
    NotPreprocessed,
    #[error("the structure is frozen by preprocess; clear it before appending")]
    AlreadyPreprocessed,
    #[error("the structure is empty")]
    Empty,
    #[error("the node was not part of the preprocessed tree")]
    UnknownNode,
    #[error("the tree cannot enumerate children by {0:?}")]
    UnsupportedTraversal(Traversal),
    #[error("depths at {position} and {} do not differ by exactly one", .position + 1)]
    NotUnitStep { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RmqError {
    #[error("precondition violated: {0}")]
    PreconditionViolation(#[from] Precondition),
    /// The linear threshold must not be smaller than the sparse one.
    #[error("invalid configuration: linear threshold {linear} is smaller than sparse threshold {sparse}")]
    InvalidConfiguration { sparse: usize, linear: usize },
    #[error("index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}
