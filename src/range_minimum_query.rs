//! Range minimum query on an ordered array H.
//!
//! Every structure here answers with the position of the minimum over an inclusive
//! range `[i, j]` (the order of `i` and `j` does not matter). Among equal minima the
//! smallest position wins.
use crate::error::{Precondition, Result, RmqError};
use crate::log_table::LogTable;
use std::fmt::Debug;

pub trait RangeMinimumQuery {
    /// Position of the minimum over `[min(i, j), max(i, j)]`.
    fn min(&self, i: usize, j: usize) -> Result<usize>;
}

/// Position of the leftmost minimum of `data[i..=j]` by a linear scan.
/// `i <= j < data.len()` must hold.
pub fn naive_min<T: Ord>(data: &[T], i: usize, j: usize) -> usize {
    (i..=j).min_by_key(|&k| &data[k]).unwrap_or(i)
}

/// Check the query contract shared by all structures and return the ordered range.
pub(crate) fn validate_range(
    preprocessed: bool,
    len: usize,
    i: usize,
    j: usize,
) -> Result<(usize, usize)> {
    if !preprocessed {
        return Err(Precondition::NotPreprocessed.into());
    }
    if len == 0 {
        return Err(Precondition::Empty.into());
    }
    let (i, j) = if i <= j { (i, j) } else { (j, i) };
    if len <= j {
        return Err(RmqError::IndexOutOfRange { index: j, len });
    }
    Ok((i, j))
}

/// O(n log n) preprocessing, O(1) query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseTableRangeMinimumQuery<T: Ord + Eq + Copy + Clone + Debug> {
    data: Vec<T>,
    // table[k][i] = RMQ(data[i..i+2^k])
    table: Vec<Vec<usize>>,
    log_table: LogTable,
    preprocessed: bool,
}

impl<T: Ord + Eq + Copy + Clone + Debug> RangeMinimumQuery for SparseTableRangeMinimumQuery<T> {
    fn min(&self, i: usize, j: usize) -> Result<usize> {
        self.query(i, j)
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> Default for SparseTableRangeMinimumQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Eq + Copy + Clone + Debug> SparseTableRangeMinimumQuery<T> {
    pub fn new() -> Self {
        Self {
            data: vec![],
            table: vec![],
            log_table: LogTable::default(),
            preprocessed: false,
        }
    }
    pub fn with_capacity(capacity: usize) -> Self {
        let mut rmq = Self::new();
        rmq.reserve(capacity);
        rmq
    }
    /// Append all of `input` and preprocess.
    pub fn from_slice(input: &[T]) -> Self {
        Self {
            data: input.to_vec(),
            ..Self::new()
        }
        .preprocessed()
    }
    fn preprocessed(mut self) -> Self {
        self.build();
        self
    }
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.preprocessed {
            return Err(Precondition::AlreadyPreprocessed.into());
        }
        self.data.push(value);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed
    }
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
    /// Drop the values and every derived table.
    pub fn clear(&mut self) {
        self.data.clear();
        self.table.clear();
        self.log_table = LogTable::default();
        self.preprocessed = false;
    }
    /// Build the sparse table. Calling it again on a frozen structure is a no-op.
    pub fn preprocess(&mut self) -> Result<()> {
        if !self.preprocessed {
            self.build();
        }
        Ok(())
    }
    fn build(&mut self) {
        let len = self.data.len();
        self.log_table = LogTable::new(len);
        self.table.clear();
        if 0 < len {
            let levels = self.log_table.log2(len) + 1;
            self.table.push((0..len).collect());
            for k in 1..levels {
                let half = 1 << (k - 1);
                let row: Vec<_> = {
                    let prev = &self.table[k - 1];
                    (0..=len - (1 << k))
                        .map(|i| {
                            let (former, latter) = (prev[i], prev[i + half]);
                            match self.data[latter] < self.data[former] {
                                true => latter,
                                false => former,
                            }
                        })
                        .collect()
                };
                self.table.push(row);
            }
        }
        log::debug!(
            "sparse table: {} elements, {} levels",
            len,
            self.table.len()
        );
        self.preprocessed = true;
    }
    /// Position of the minimum over the inclusive range between `i` and `j`.
    pub fn query(&self, i: usize, j: usize) -> Result<usize> {
        let (i, j) = validate_range(self.preprocessed, self.data.len(), i, j)?;
        if i == j {
            return Ok(i);
        }
        let k = self.log_table.log2(j - i + 1);
        let former = self.table[k][i];
        let latter = self.table[k][j + 1 - (1 << k)];
        match self.data[latter] < self.data[former] {
            true => Ok(latter),
            false => Ok(former),
        }
    }
    /// The minimum value over the inclusive range between `i` and `j`.
    pub fn query_value(&self, i: usize, j: usize) -> Result<T> {
        self.query(i, j).map(|idx| self.data[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoroshiro128PlusPlus;
    #[test]
    fn check_st_table() {
        let input = vec![1, 2, 3, 4];
        let st = SparseTableRangeMinimumQuery::from_slice(&input);
        assert_eq!(st.table.len(), 3);
        assert_eq!(st.table[0], vec![0, 1, 2, 3]);
        assert_eq!(st.table[1], vec![0, 1, 2]);
        assert_eq!(st.table[2], vec![0]);
    }
    #[test]
    fn small_example() {
        let st = SparseTableRangeMinimumQuery::from_slice(&[5, 2, 4, 1, 3]);
        assert_eq!(st.query(0, 4), Ok(3));
        assert_eq!(st.query(4, 0), Ok(3));
        assert_eq!(st.query(0, 1), Ok(1));
        assert_eq!(st.query(2, 2), Ok(2));
        assert_eq!(st.query_value(0, 2), Ok(2));
    }
    #[test]
    fn lifecycle() {
        let mut st = SparseTableRangeMinimumQuery::with_capacity(4);
        assert_eq!(
            st.query(0, 0),
            Err(RmqError::PreconditionViolation(Precondition::NotPreprocessed))
        );
        st.preprocess().unwrap();
        assert_eq!(
            st.query(0, 0),
            Err(RmqError::PreconditionViolation(Precondition::Empty))
        );
        st.clear();
        for x in [3, 1, 2] {
            st.push_back(x).unwrap();
        }
        st.preprocess().unwrap();
        assert_eq!(
            st.push_back(0),
            Err(RmqError::PreconditionViolation(
                Precondition::AlreadyPreprocessed
            ))
        );
        assert_eq!(
            st.query(0, 3),
            Err(RmqError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(st.query(0, 2), Ok(1));
    }
    #[test]
    fn ties_go_left() {
        let input = vec![2, 1, 3, 1, 1, 4, 1];
        let st = SparseTableRangeMinimumQuery::from_slice(&input);
        for i in 0..input.len() {
            for j in i..input.len() {
                assert_eq!(st.query(i, j), Ok(naive_min(&input, i, j)), "{i},{j}");
            }
        }
    }
    #[test]
    fn random_check() {
        let mut rng: Xoroshiro128PlusPlus = SeedableRng::seed_from_u64(348203);
        for len in [1, 2, 3, 7, 64, 1_000] {
            let input: Vec<u32> = (0..len).map(|_| rng.gen_range(0..100)).collect();
            let st = SparseTableRangeMinimumQuery::from_slice(&input);
            for _ in 0..500 {
                let i = rng.gen_range(0..len);
                let j = rng.gen_range(0..len);
                let (s, e) = (i.min(j), i.max(j));
                assert_eq!(st.min(i, j), Ok(naive_min(&input, s, e)), "{i},{j}");
            }
        }
    }
}
