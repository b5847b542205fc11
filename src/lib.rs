//! huffpack: Huffman coding compressor with a self-describing binary container.
//!
//! Encoding runs the input through a pipeline:
//! - frequency counting in first-seen order
//! - deterministic least-weight-first tree construction
//! - codeword derivation from leaf paths
//! - LSB-first bit packing into a container with the codeword table as header
//!
//! Decoding parses the header back into a table, unpacks the body and
//! greedily matches codewords.

pub mod bitpack;
pub mod codeword;
pub mod config;
pub mod container;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod tree;

use crate::codeword::CodeTable;
use crate::config::CodecConfig;
use crate::container::Container;
use crate::decoder::Decoder;
use crate::error::CodecError;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

pub use crate::config::HeaderFormat;

/// Facts about one encode call
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeStats {
    pub original_size: usize,
    pub compressed_size: usize,
    pub ratio: f64,
    pub entropy_bits: f64,
    pub distinct_symbols: usize,
    pub body_bits: usize,
    pub padding: u8,
}

/// Encoded container together with its statistics
#[derive(Debug, Clone)]
pub struct Encoded {
    pub data: Vec<u8>,
    pub stats: EncodeStats,
}

/// The main codec
pub struct Codec {
    config: CodecConfig,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl Codec {
    /// Create a new codec with the given configuration
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data` into a container
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.encode_with_stats(data).map(|encoded| encoded.data)
    }

    pub fn encode_str(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        self.encode(text.as_bytes())
    }

    #[tracing::instrument(skip_all, fields(len = data.len()))]
    pub fn encode_with_stats(&self, data: &[u8]) -> Result<Encoded, CodecError> {
        if data.len() > self.config.max_input_size {
            return Err(CodecError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }

        let freq = FrequencyTable::from_bytes(data);
        let container = if freq.is_empty() {
            Container::default()
        } else {
            let tree = HuffmanTree::build(&freq)?;
            let table = CodeTable::from_tree(&tree);
            tracing::debug!(
                symbols = table.len(),
                max_code_len = table.max_len(),
                "derived codewords"
            );
            let body = bitpack::pack_symbols(data, &table)?;
            Container { table, body }
        };
        let output = container.serialize(&self.config)?;

        let ratio = if data.is_empty() {
            1.0
        } else {
            output.len() as f64 / data.len() as f64
        };
        Ok(Encoded {
            stats: EncodeStats {
                original_size: data.len(),
                compressed_size: output.len(),
                ratio,
                entropy_bits: freq.entropy(),
                distinct_symbols: freq.len(),
                body_bits: container.body.bit_len(),
                padding: container.body.padding,
            },
            data: output,
        })
    }

    /// Decode a container produced by [`Codec::encode`] with the same header format
    #[tracing::instrument(skip_all, fields(len = data.len()))]
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let container = Container::parse(data, &self.config)?;
        let bits = bitpack::unpack(&container.body.bytes, container.body.padding)?;
        let output = Decoder::new(&container.table).decode(&bits)?;
        tracing::debug!(bits = bits.len(), symbols = output.len(), "decoded body");
        Ok(output)
    }

    pub fn decode_to_string(&self, data: &[u8]) -> Result<String, CodecError> {
        String::from_utf8(self.decode(data)?).map_err(|_| CodecError::InvalidUtf8)
    }
}
