//! Range minimum query on a sequence whose neighbours differ by exactly one, e.g.,
//! the depths of an Euler tour.
//! # Overview
//! The sequence is cut into blocks of size ⌊log2 n⌋/2. Since a block is determined,
//! up to an additive constant, by its sequence of +1/-1 steps, there are only
//! O(√n) distinct block shapes, and the all-pairs minimum table of each shape is
//! computed once and shared by every block of that shape. Queries spanning several
//! blocks combine two in-block lookups with a sparse table over the block minima.
//! Everything is computed in `preprocess`; queries never touch shared state mutably.
use crate::error::{Precondition, Result};
use crate::range_minimum_query::{naive_min, validate_range, RangeMinimumQuery};
use crate::range_minimum_query::SparseTableRangeMinimumQuery;

// Below this length, queries are answered by scanning.
const MIN_BLOCKED_LEN: usize = 4;
// Ranges with at most this many elements are answered by scanning.
const SHORT_RANGE: usize = 3;

/// Minimum positions for every sub-range of one block shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTable {
    len: usize,
    // minima[i * len + j] = RMQ(block[i..=j]), defined for i <= j.
    minima: Vec<u8>,
}

impl BlockTable {
    pub fn new(block: &[usize]) -> Self {
        let len = block.len();
        let mut minima = vec![0; len * len];
        for i in 0..len {
            minima[i * len + i] = i as u8;
            for j in i + 1..len {
                let prev = minima[i * len + j - 1];
                minima[i * len + j] = match block[j] < block[prev as usize] {
                    true => j as u8,
                    false => prev,
                };
            }
        }
        Self { len, minima }
    }
    /// Position of the minimum over `[i, j]` within the block. `i <= j` must hold.
    pub fn min(&self, i: usize, j: usize) -> usize {
        self.minima[i * self.len + j] as usize
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// The +1/-1 steps of `block` as bits, with a marker bit at `block.len() - 1`
// so that a short trailing block never shares a signature with a full one.
fn shape_signature(block: &[usize]) -> usize {
    block
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] < w[1])
        .fold(1 << (block.len() - 1), |sig, (k, _)| sig | (1 << k))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestrictedRangeMinimumQuery {
    depths: Vec<usize>,
    block_size: usize,
    // shape_tables[signature] = index into tables.
    shape_tables: Vec<Option<usize>>,
    tables: Vec<BlockTable>,
    // block_tables[block] = index into tables.
    block_tables: Vec<usize>,
    // Position of the minimum of each block.
    block_minima: Vec<usize>,
    large_blocks: SparseTableRangeMinimumQuery<usize>,
    preprocessed: bool,
}

impl RangeMinimumQuery for RestrictedRangeMinimumQuery {
    fn min(&self, i: usize, j: usize) -> Result<usize> {
        self.query(i, j)
    }
}

impl RestrictedRangeMinimumQuery {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_capacity(capacity: usize) -> Self {
        let mut rmq = Self::new();
        rmq.reserve(capacity);
        rmq
    }
    /// Append all of `depths` and preprocess.
    pub fn from_slice(depths: &[usize]) -> Result<Self> {
        let mut rmq = Self {
            depths: depths.to_vec(),
            ..Self::default()
        };
        rmq.preprocess()?;
        Ok(rmq)
    }
    pub fn reserve(&mut self, additional: usize) {
        self.depths.reserve(additional);
    }
    pub fn push_back(&mut self, depth: usize) -> Result<()> {
        if self.preprocessed {
            return Err(Precondition::AlreadyPreprocessed.into());
        }
        self.depths.push(depth);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.depths.len()
    }
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed
    }
    pub fn as_slice(&self) -> &[usize] {
        &self.depths
    }
    /// Block size in use, zero when the sequence is too short to be blocked.
    pub fn block_size(&self) -> usize {
        self.block_size
    }
    /// Number of distinct block shapes, i.e., the number of in-block tables built.
    pub fn distinct_shapes(&self) -> usize {
        self.tables.len()
    }
    pub fn clear(&mut self) {
        *self = Self::default();
    }
    /// Build the block tables and the sparse table over block minima.
    /// Fails if two neighbouring depths do not differ by exactly one.
    pub fn preprocess(&mut self) -> Result<()> {
        if self.preprocessed {
            return Ok(());
        }
        if let Some(position) = self.depths.windows(2).position(|w| w[0].abs_diff(w[1]) != 1) {
            return Err(Precondition::NotUnitStep { position }.into());
        }
        let len = self.depths.len();
        if len < MIN_BLOCKED_LEN {
            self.block_size = 0;
            self.preprocessed = true;
            return Ok(());
        }
        let log = (usize::BITS - 1 - len.leading_zeros()) as usize;
        let block_size = (log / 2).max(1);
        let block_num = num::integer::div_ceil(len, block_size);
        self.block_size = block_size;
        self.shape_tables = vec![None; 1 << block_size];
        self.tables.clear();
        self.block_tables = Vec::with_capacity(block_num);
        self.block_minima = Vec::with_capacity(block_num);
        let mut large_blocks = SparseTableRangeMinimumQuery::with_capacity(block_num);
        for (idx, block) in self.depths.chunks(block_size).enumerate() {
            let signature = shape_signature(block);
            let table = match self.shape_tables[signature] {
                Some(table) => table,
                None => {
                    log::trace!("block {idx}: new shape {signature:b}");
                    self.tables.push(BlockTable::new(block));
                    self.shape_tables[signature] = Some(self.tables.len() - 1);
                    self.tables.len() - 1
                }
            };
            let min = self.tables[table].min(0, block.len() - 1) + idx * block_size;
            self.block_tables.push(table);
            self.block_minima.push(min);
            large_blocks.push_back(self.depths[min])?;
        }
        large_blocks.preprocess()?;
        self.large_blocks = large_blocks;
        log::debug!(
            "restricted rmq: {} elements, block size {}, {} blocks, {} shapes",
            len,
            block_size,
            block_num,
            self.tables.len()
        );
        self.preprocessed = true;
        Ok(())
    }
    // Minimum over [i, j] inside `block`, as a global position.
    fn block_min(&self, block: usize, i: usize, j: usize) -> usize {
        let offset = block * self.block_size;
        self.tables[self.block_tables[block]].min(i - offset, j - offset) + offset
    }
    /// Position of the minimum over the inclusive range between `i` and `j`.
    pub fn query(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = validate_range(self.preprocessed, self.depths.len(), i, j)?;
        if i == j {
            return Ok(i);
        }
        if self.block_size == 0 || j - i < SHORT_RANGE {
            return Ok(naive_min(&self.depths, i, j));
        }
        let (first, last) = (i / self.block_size, j / self.block_size);
        if first == last {
            return Ok(self.block_min(first, i, j));
        }
        // Ties keep the earlier candidate: first block, then inner blocks, then last.
        let mut min = self.block_min(first, i, (first + 1) * self.block_size - 1);
        if first + 1 < last {
            let inner = self.block_minima[self.large_blocks.query(first + 1, last - 1)?];
            if self.depths[inner] < self.depths[min] {
                min = inner;
            }
        }
        let end = self.block_min(last, last * self.block_size, j);
        if self.depths[end] < self.depths[min] {
            min = end;
        }
        Ok(min)
    }
}
