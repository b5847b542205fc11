//! Container serialization
//!
//! Layout: `[header length: u16 BE][header][body][padding: u8]`.
//! The header carries the codeword table in one of two [`HeaderFormat`]s;
//! the surrounding layout is the same for both.

use crate::bitpack::PackedBits;
use crate::codeword::{CodeTable, Codeword};
use crate::config::{CodecConfig, HeaderFormat};
use crate::error::CodecError;
use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub table: CodeTable,
    pub body: PackedBits,
}

impl Container {
    pub fn serialize(&self, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
        let header = match config.header_format {
            HeaderFormat::Delimited => write_delimited(&self.table, config.separator)?,
            HeaderFormat::LengthPrefixed => write_length_prefixed(&self.table)?,
        };
        let header_len =
            u16::try_from(header.len()).map_err(|_| CodecError::HeaderTooLarge(header.len()))?;

        let mut output = Vec::with_capacity(2 + header.len() + self.body.bytes.len() + 1);
        output.extend_from_slice(&header_len.to_be_bytes());
        output.extend_from_slice(&header);
        output.extend_from_slice(&self.body.bytes);
        output.push(self.body.padding);
        Ok(output)
    }

    pub fn parse(data: &[u8], config: &CodecConfig) -> Result<Self, CodecError> {
        if data.len() < 3 {
            return Err(CodecError::CorruptHeader(format!(
                "container of {} bytes is too short",
                data.len()
            )));
        }
        let header_len = u16::from_be_bytes([data[0], data[1]]) as usize;
        let body_start = 2 + header_len;
        if body_start + 1 > data.len() {
            return Err(CodecError::CorruptHeader(format!(
                "declared header length {header_len} exceeds the {} bytes available",
                data.len() - 3
            )));
        }

        let header = &data[2..body_start];
        let body = &data[body_start..data.len() - 1];
        let padding = data[data.len() - 1];
        if padding > 7 {
            return Err(CodecError::InvalidPadding(padding));
        }

        let table = match config.header_format {
            HeaderFormat::Delimited => read_delimited(header, config.separator)?,
            HeaderFormat::LengthPrefixed => read_length_prefixed(header)?,
        };
        if !table.is_prefix_free() {
            return Err(CodecError::CorruptHeader("codeword table is not prefix-free".into()));
        }
        match (table.is_empty(), body.is_empty()) {
            (true, false) => {
                return Err(CodecError::CorruptHeader("body present without a table".into()))
            }
            (false, true) => {
                return Err(CodecError::CorruptHeader("table present without a body".into()))
            }
            _ => {}
        }
        tracing::debug!(
            header_len,
            symbols = table.len(),
            body_len = body.len(),
            padding,
            "parsed container"
        );

        Ok(Self {
            table,
            body: PackedBits {
                bytes: body.to_vec(),
                padding,
            },
        })
    }
}

/// `sym<sep>bits` entries joined by `sep`, e.g. `a,1,b,01,c,00`.
fn write_delimited(table: &CodeTable, separator: u8) -> Result<Vec<u8>, CodecError> {
    let mut header = Vec::new();
    for (symbol, code) in table.iter() {
        if symbol == separator {
            return Err(CodecError::SeparatorCollision(separator));
        }
        header.push(separator);
        header.push(symbol);
        header.push(separator);
        header.extend(code.bits().iter().map(|&bit| if bit { b'1' } else { b'0' }));
    }
    // the leading separator is never written
    if !header.is_empty() {
        header.remove(0);
    }
    Ok(header)
}

fn read_delimited(header: &[u8], separator: u8) -> Result<CodeTable, CodecError> {
    if header.is_empty() {
        return Ok(CodeTable::default());
    }
    let fields: Vec<&[u8]> = header.split(|&b| b == separator).collect();
    if fields.len() % 2 != 0 {
        return Err(CodecError::CorruptHeader(format!(
            "{} fields do not form symbol/codeword pairs",
            fields.len()
        )));
    }
    let mut entries = Vec::with_capacity(fields.len() / 2);
    for pair in fields.chunks(2) {
        let symbol = match pair[0] {
            [symbol] => *symbol,
            other => {
                return Err(CodecError::CorruptHeader(format!(
                    "symbol field of {} bytes",
                    other.len()
                )))
            }
        };
        entries.push((symbol, Codeword::from_ascii(pair[1])?));
    }
    CodeTable::from_entries(entries)
}

/// `count: u16`, then per entry `sym_len: u8`, symbol, `bit_len: u16`, bits.
fn write_length_prefixed(table: &CodeTable) -> Result<Vec<u8>, CodecError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    writer.write(16, table.len() as u16)?;
    for (symbol, code) in table.iter() {
        writer.write(8, 1u8)?;
        writer.write_bytes(&[symbol])?;
        let bit_len =
            u16::try_from(code.len()).map_err(|_| CodecError::HeaderTooLarge(code.len()))?;
        writer.write(16, bit_len)?;
        for &bit in code.bits() {
            writer.write_bit(bit)?;
        }
    }
    writer.byte_align()?;
    Ok(writer.into_writer())
}

fn read_length_prefixed(header: &[u8]) -> Result<CodeTable, CodecError> {
    if header.is_empty() {
        return Ok(CodeTable::default());
    }
    let mut reader = BitReader::endian(header, BigEndian);
    let count: u16 = reader.read(16).map_err(truncated)?;
    let mut entries = Vec::with_capacity(count as usize);
    let mut total_bits = 16usize;
    for _ in 0..count {
        let symbol_len: u8 = reader.read(8).map_err(truncated)?;
        if symbol_len != 1 {
            return Err(CodecError::CorruptHeader(format!(
                "symbol length {symbol_len}, expected 1"
            )));
        }
        let mut symbol = [0u8; 1];
        reader.read_bytes(&mut symbol).map_err(truncated)?;
        let bit_len: u16 = reader.read(16).map_err(truncated)?;
        let mut bits = Vec::with_capacity(bit_len as usize);
        for _ in 0..bit_len {
            bits.push(reader.read_bit().map_err(truncated)?);
        }
        total_bits += 32 + bit_len as usize;
        entries.push((symbol[0], Codeword::new(bits)));
    }
    let expected = total_bits.div_ceil(8);
    if expected != header.len() {
        return Err(CodecError::CorruptHeader(format!(
            "table occupies {expected} bytes but header is {} bytes",
            header.len()
        )));
    }
    CodeTable::from_entries(entries)
}

fn truncated(e: io::Error) -> CodecError {
    CodecError::CorruptHeader(format!("truncated table: {e}"))
}
