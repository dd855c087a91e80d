//! Range minimum query choosing its strategy by the number of appended values.
//! # Overview
//! - Fewer than `sparse_threshold` values: a linear scan per query, no preprocessing.
//! - Fewer than `linear_threshold` values: [`SparseTableRangeMinimumQuery`].
//! - Otherwise: [`CartesianTreeRangeMinimumQuery`]. Values buffered so far are moved
//!   into it the moment the count reaches `linear_threshold`.
//!
//! Tiers only move forward, and only while appending. `preprocess` freezes the tier.
use crate::cartesian_tree::CartesianTreeRangeMinimumQuery;
use crate::error::{Precondition, Result, RmqError};
use crate::range_minimum_query::{naive_min, validate_range};
use crate::range_minimum_query::{RangeMinimumQuery, SparseTableRangeMinimumQuery};
use std::fmt::Debug;

const DEFAULT_SPARSE_THRESHOLD: usize = 10;
const DEFAULT_LINEAR_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// From this many values on, queries go through a sparse table.
    pub sparse_threshold: usize,
    /// From this many values on, queries go through a Cartesian tree.
    pub linear_threshold: usize,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            sparse_threshold: DEFAULT_SPARSE_THRESHOLD,
            linear_threshold: DEFAULT_LINEAR_THRESHOLD,
        }
    }
}

impl AdaptiveConfig {
    pub fn new(sparse_threshold: usize, linear_threshold: usize) -> Result<Self> {
        let config = Self {
            sparse_threshold,
            linear_threshold,
        };
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> Result<()> {
        match self.linear_threshold < self.sparse_threshold {
            true => Err(RmqError::InvalidConfiguration {
                sparse: self.sparse_threshold,
                linear: self.linear_threshold,
            }),
            false => Ok(()),
        }
    }
    fn tier_for(&self, len: usize) -> Tier {
        if len == 0 {
            Tier::Empty
        } else if len < self.sparse_threshold {
            Tier::Small
        } else if len < self.linear_threshold {
            Tier::Medium
        } else {
            Tier::Large
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Empty,
    /// Linear scan.
    Small,
    /// Sparse table.
    Medium,
    /// Cartesian tree and LCA.
    Large,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveRangeMinimumQuery<T: Ord + Eq + Copy + Clone + Debug> {
    config: AdaptiveConfig,
    tier: Tier,
    // Holds the values up to and including the medium tier.
    buffer: SparseTableRangeMinimumQuery<T>,
    linear: CartesianTreeRangeMinimumQuery<T>,
    preprocessed: bool,
}

impl<T: Ord + Eq + Copy + Clone + Debug> Default for AdaptiveRangeMinimumQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> RangeMinimumQuery for AdaptiveRangeMinimumQuery<T> {
    fn min(&self, i: usize, j: usize) -> Result<usize> {
        self.query_index(i, j)
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> AdaptiveRangeMinimumQuery<T> {
    /// With the default thresholds, 10 and 10,000.
    pub fn new() -> Self {
        Self {
            config: AdaptiveConfig::default(),
            tier: Tier::Empty,
            buffer: SparseTableRangeMinimumQuery::new(),
            linear: CartesianTreeRangeMinimumQuery::new(),
            preprocessed: false,
        }
    }
    /// With the default thresholds and room for `capacity` elements in the current tier.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut rmq = Self::new();
        rmq.reserve(capacity);
        rmq
    }
    pub fn with_config(config: AdaptiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }
    /// Append all of `input` and preprocess.
    pub fn from_slice(config: AdaptiveConfig, input: &[T]) -> Result<Self> {
        let mut rmq = Self::with_config(config)?;
        rmq.reserve(input.len());
        for &x in input {
            rmq.push_back(x)?;
        }
        rmq.preprocess()?;
        Ok(rmq)
    }
    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }
    pub fn tier(&self) -> Tier {
        self.tier
    }
    pub fn reserve(&mut self, additional: usize) {
        match self.tier {
            Tier::Large => self.linear.reserve(additional),
            _ => self.buffer.reserve(additional),
        }
    }
    pub fn len(&self) -> usize {
        match self.tier {
            Tier::Large => self.linear.len(),
            _ => self.buffer.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed
    }
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.preprocessed {
            return Err(Precondition::AlreadyPreprocessed.into());
        }
        match self.tier {
            Tier::Large => self.linear.push_back(value)?,
            _ => self.buffer.push_back(value)?,
        }
        let tier = self.config.tier_for(self.len()).max(self.tier);
        if tier != self.tier {
            log::debug!("adaptive rmq: {:?} -> {:?} at {}", self.tier, tier, self.len());
            if tier == Tier::Large {
                self.migrate()?;
            }
            self.tier = tier;
        }
        Ok(())
    }
    // Move the buffered values into the Cartesian tree.
    fn migrate(&mut self) -> Result<()> {
        let values = self.buffer.as_slice();
        self.linear.reserve(values.len());
        for &x in values {
            self.linear.push_back(x)?;
        }
        log::debug!("adaptive rmq: migrated {} values", values.len());
        self.buffer.clear();
        Ok(())
    }
    /// Freeze the current tier and build whatever it needs.
    pub fn preprocess(&mut self) -> Result<()> {
        match self.tier {
            Tier::Empty | Tier::Small => {}
            Tier::Medium => self.buffer.preprocess()?,
            Tier::Large => self.linear.preprocess()?,
        }
        self.preprocessed = true;
        Ok(())
    }
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.linear.clear();
        self.tier = Tier::Empty;
        self.preprocessed = false;
    }
    /// Position of the minimum over the inclusive range between `i` and `j`.
    pub fn query_index(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = validate_range(self.preprocessed, self.len(), i, j)?;
        match self.tier {
            Tier::Empty | Tier::Small => Ok(naive_min(self.buffer.as_slice(), i, j)),
            Tier::Medium => self.buffer.query(i, j),
            Tier::Large => self.linear.query_index(i, j),
        }
    }
    /// The minimum value over the inclusive range between `i` and `j`.
    pub fn query(&self, i: usize, j: usize) -> Result<T> {
        let idx = self.query_index(i, j)?;
        match self.tier {
            Tier::Large => Ok(self.linear.tree().value(idx)),
            _ => Ok(self.buffer.as_slice()[idx]),
        }
    }
}
