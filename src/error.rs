//! Error types for huffpack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("empty input: no symbols to build a tree from")]
    EmptyInput,

    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    #[error("no codeword matches the bit stream at bit {bit_offset}")]
    UnknownCodeword { bit_offset: usize },

    #[error("bit stream ends inside a codeword ({pending_bits} bits pending)")]
    TruncatedCodeword { pending_bits: usize },

    #[error("separator byte 0x{0:02x} occurs in the input; use the length-prefixed header")]
    SeparatorCollision(u8),

    #[error("header of {0} bytes does not fit the 16-bit length field")]
    HeaderTooLarge(usize),

    #[error("invalid padding count {0}, expected 0-7")]
    InvalidPadding(u8),

    #[error("input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("decoded data is not valid UTF-8")]
    InvalidUtf8,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),
}
