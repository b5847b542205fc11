//! Bit-stream packing
//!
//! Logical bits are grouped eight at a time and each group is stored
//! least-significant-bit first: the first bit of a group lands in bit 0 of
//! its byte. A short final group is zero-filled in the high bits and the
//! number of filler bits is reported as the padding count.

use crate::codeword::CodeTable;
use crate::error::CodecError;
use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

impl PackedBits {
    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }
}

pub fn padding_for(bit_len: usize) -> u8 {
    ((8 - bit_len % 8) % 8) as u8
}

/// Pack a logical bit sequence.
pub fn pack(bits: impl IntoIterator<Item = bool>) -> Result<PackedBits, CodecError> {
    let mut writer = BitWriter::endian(Vec::new(), LittleEndian);
    let mut bit_len = 0usize;
    for bit in bits {
        writer.write_bit(bit)?;
        bit_len += 1;
    }
    writer.byte_align()?;
    Ok(PackedBits {
        bytes: writer.into_writer(),
        padding: padding_for(bit_len),
    })
}

/// Concatenate the codeword of every input byte, in input order, and pack the result.
pub fn pack_symbols(data: &[u8], table: &CodeTable) -> Result<PackedBits, CodecError> {
    let mut codes = Vec::with_capacity(data.len());
    for (i, &b) in data.iter().enumerate() {
        let code = table.get(b).ok_or_else(|| {
            CodecError::CorruptHeader(format!("no codeword for byte 0x{b:02x} at offset {i}"))
        })?;
        codes.push(code);
    }
    let packed = pack(codes.iter().flat_map(|c| c.bits().iter().copied()))?;
    tracing::debug!(
        bits = packed.bit_len(),
        bytes = packed.bytes.len(),
        padding = packed.padding,
        "packed body"
    );
    Ok(packed)
}

/// Recover the logical bit sequence, dropping the trailing `padding` filler bits.
pub fn unpack(bytes: &[u8], padding: u8) -> Result<Vec<bool>, CodecError> {
    if padding > 7 {
        return Err(CodecError::InvalidPadding(padding));
    }
    if bytes.is_empty() && padding != 0 {
        return Err(CodecError::CorruptHeader(format!(
            "padding {padding} declared for an empty body"
        )));
    }
    let total = bytes.len() * 8 - padding as usize;
    let mut reader = BitReader::endian(bytes, LittleEndian);
    let mut bits = Vec::with_capacity(total);
    for _ in 0..total {
        bits.push(reader.read_bit()?);
    }
    Ok(bits)
}
