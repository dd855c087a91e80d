//! Floor of log2, tabulated per structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTable {
    // table[n] = floor(log2(n)), table[0] = 0.
    table: Vec<usize>,
}

impl LogTable {
    /// Tabulate floor(log2(n)) for every n in 0..=max.
    pub fn new(max: usize) -> Self {
        let mut table = vec![0; max + 1];
        for n in 2..=max {
            table[n] = table[n / 2] + 1;
        }
        Self { table }
    }
    /// Floor of log2(n). Falls back to bit arithmetic past the tabulated range.
    pub fn log2(&self, n: usize) -> usize {
        match self.table.get(n) {
            Some(&log) => log,
            None => (usize::BITS - 1 - n.leading_zeros()) as usize,
        }
    }
    pub fn max(&self) -> usize {
        self.table.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn agrees_with_bits() {
        let table = LogTable::new(1000);
        assert_eq!(table.log2(0), 0);
        assert_eq!(table.log2(1), 0);
        assert_eq!(table.log2(2), 1);
        assert_eq!(table.log2(3), 1);
        assert_eq!(table.log2(4), 2);
        for n in 1..3000usize {
            let expected = (usize::BITS - 1 - n.leading_zeros()) as usize;
            assert_eq!(table.log2(n), expected, "{n}");
        }
        assert_eq!(table.max(), 1000);
    }
}
