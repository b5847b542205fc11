//! Symbol frequency counting

use std::collections::HashMap;

/// Occurrence counts per distinct byte, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(u8, u64)>,
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut index: HashMap<u8, usize> = HashMap::new();
        let mut entries: Vec<(u8, u64)> = Vec::new();
        for &b in data {
            let slot = *index.entry(b).or_insert_with(|| {
                entries.push((b, 0));
                entries.len() - 1
            });
            entries[slot].1 += 1;
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// `(symbol, count)` pairs in the order each symbol first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Shannon entropy in bits per symbol.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for (_, count) in self.iter() {
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}
