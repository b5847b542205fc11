//! Codeword assignment from a Huffman tree

use crate::error::CodecError;
use crate::tree::{HuffmanTree, Node};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A bit string, first bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codeword(Vec<bool>);

impl Codeword {
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Parse ASCII `'0'`/`'1'` digits.
    pub fn from_ascii(digits: &[u8]) -> Result<Self, CodecError> {
        digits
            .iter()
            .map(|&b| match b {
                b'0' => Ok(false),
                b'1' => Ok(true),
                other => Err(CodecError::CorruptHeader(format!(
                    "byte 0x{other:02x} in codeword field"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Codeword)
    }

    fn with_bit(mut self, bit: bool) -> Self {
        self.0.push(bit);
        self
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Codeword {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s.as_bytes())
    }
}

/// Symbol to codeword mapping, iterated in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Codeword>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let codes = match &tree.root {
            // a lone leaf has no path; give it a one-bit code
            Node::Leaf { symbol, .. } => vec![(*symbol, Codeword::new(vec![false]))],
            root => walk(root, Codeword::default()),
        };
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    /// Build a table from parsed entries, rejecting duplicates and empty codewords.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (u8, Codeword)>,
    ) -> Result<Self, CodecError> {
        let mut codes = BTreeMap::new();
        for (symbol, code) in entries {
            if code.is_empty() {
                return Err(CodecError::CorruptHeader(format!(
                    "empty codeword for symbol 0x{symbol:02x}"
                )));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(CodecError::CorruptHeader(format!(
                    "duplicate symbol 0x{symbol:02x}"
                )));
            }
        }
        Ok(Self { codes })
    }

    pub fn get(&self, symbol: u8) -> Option<&Codeword> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Codeword)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    pub fn max_len(&self) -> usize {
        self.codes.values().map(Codeword::len).max().unwrap_or(0)
    }

    pub fn is_prefix_free(&self) -> bool {
        // In sorted order a prefix sorts directly before some code it prefixes.
        let mut sorted: Vec<&Codeword> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }
}

/// The path is owned by each call; child results are merged on return.
fn walk(node: &Node, path: Codeword) -> Vec<(u8, Codeword)> {
    match node {
        Node::Leaf { symbol, .. } => vec![(*symbol, path)],
        Node::Internal { zero, one, .. } => {
            let mut codes = walk(zero, path.clone().with_bit(false));
            codes.extend(walk(one, path.with_bit(true)));
            codes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn table_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data)).unwrap();
        CodeTable::from_tree(&tree)
    }

    fn code(s: &str) -> Codeword {
        s.parse().unwrap()
    }

    #[test]
    fn test_aaabbc_codewords() {
        let table = table_for(b"aaabbc");
        assert_eq!(table.get(b'a'), Some(&code("1")));
        assert_eq!(table.get(b'b'), Some(&code("01")));
        assert_eq!(table.get(b'c'), Some(&code("00")));
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let table = table_for(b"a");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'a'), Some(&code("0")));
    }

    #[test]
    fn test_prefix_free_all_bytes() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; (b as usize % 7) + 1]).collect();
        let table = table_for(&data);
        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());
        let codes: Vec<_> = table.iter().map(|(_, c)| c.clone()).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_independent_calls_do_not_leak() {
        let first = table_for(b"abcdef");
        let second = table_for(b"xx");
        assert_eq!(second.len(), 1);
        assert!(second.get(b'a').is_none());
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_detects_prefix_violation() {
        let table =
            CodeTable::from_entries(vec![(b'a', code("0")), (b'b', code("01"))]).unwrap();
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let result = CodeTable::from_entries(vec![(b'a', code("0")), (b'a', code("1"))]);
        assert!(matches!(result, Err(CodecError::CorruptHeader(_))));
    }

    #[test]
    fn test_codeword_text_form() {
        assert_eq!(code("0110").to_string(), "0110");
        assert!("01a".parse::<Codeword>().is_err());
    }
}
