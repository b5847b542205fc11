//! Greedy prefix matching of a bit stream against a codeword table

use crate::codeword::CodeTable;
use crate::error::CodecError;
use std::collections::HashMap;

pub struct Decoder {
    lookup: HashMap<Vec<bool>, u8>,
    max_len: usize,
}

impl Decoder {
    pub fn new(table: &CodeTable) -> Self {
        let lookup = table
            .iter()
            .map(|(symbol, code)| (code.bits().to_vec(), symbol))
            .collect();
        Self {
            lookup,
            max_len: table.max_len(),
        }
    }

    /// Append bits to a buffer and emit a symbol whenever the buffer equals a codeword.
    ///
    /// The table is prefix-free, so the first exact match is the only one possible.
    pub fn decode(&self, bits: &[bool]) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::new();
        let mut buffer: Vec<bool> = Vec::with_capacity(self.max_len);
        let mut start = 0;

        for (offset, &bit) in bits.iter().enumerate() {
            buffer.push(bit);
            if let Some(symbol) = self.lookup(&buffer) {
                output.push(symbol);
                buffer.clear();
                start = offset + 1;
            } else if buffer.len() >= self.max_len {
                return Err(CodecError::UnknownCodeword { bit_offset: start });
            }
        }

        if !buffer.is_empty() {
            return Err(CodecError::TruncatedCodeword {
                pending_bits: buffer.len(),
            });
        }
        Ok(output)
    }

    pub fn lookup(&self, bits: &[bool]) -> Option<u8> {
        self.lookup.get(bits).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        CodeTable::from_entries(entries.iter().map(|&(s, c)| (s, c.parse().unwrap()))).unwrap()
    }

    fn bits(s: &str) -> Vec<bool> {
        s.bytes().map(|b| b == b'1').collect()
    }

    #[test]
    fn test_decode_aaabbc() {
        let decoder = Decoder::new(&table(&[(b'a', "1"), (b'b', "01"), (b'c', "00")]));
        assert_eq!(decoder.decode(&bits("111010100")).unwrap(), b"aaabbc");
    }

    #[test]
    fn test_truncated_codeword() {
        let decoder = Decoder::new(&table(&[(b'a', "1"), (b'b', "01"), (b'c', "00")]));
        let result = decoder.decode(&bits("1110"));
        assert!(matches!(result, Err(CodecError::TruncatedCodeword { pending_bits: 1 })));
    }

    #[test]
    fn test_unknown_codeword_fails_early() {
        // "11" is neither a codeword nor a prefix of one
        let decoder = Decoder::new(&table(&[(b'x', "0"), (b'y', "10")]));
        let result = decoder.decode(&bits("0101100"));
        assert!(matches!(result, Err(CodecError::UnknownCodeword { bit_offset: 3 })));
    }

    #[test]
    fn test_empty_stream() {
        let decoder = Decoder::new(&table(&[(b'a', "0")]));
        assert!(decoder.decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_lookup() {
        let decoder = Decoder::new(&table(&[(b'a', "1"), (b'b', "0")]));
        assert_eq!(decoder.lookup(&bits("0")), Some(b'b'));
        assert_eq!(decoder.lookup(&bits("11")), None);
    }
}
