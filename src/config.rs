//! Configuration for huffpack

use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout of the codeword table inside the container header region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderFormat {
    /// `symbol<sep>bits<sep>symbol<sep>bits...`, compatible with existing containers.
    Delimited,
    /// Entry count followed by length-prefixed symbol and codeword fields.
    LengthPrefixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub header_format: HeaderFormat,
    pub separator: u8,
    pub max_input_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            header_format: HeaderFormat::Delimited,
            separator: b',',
            max_input_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl CodecConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CodecError> {
        let config: CodecConfig =
            serde_json::from_str(json).map_err(|e| CodecError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        // Codeword fields are ASCII '0'/'1', so those bytes can't delimit them.
        if self.separator == b'0' || self.separator == b'1' {
            return Err(CodecError::ConfigError(format!(
                "separator {:?} is indistinguishable from codeword bits",
                self.separator as char
            )));
        }
        if self.max_input_size == 0 {
            return Err(CodecError::ConfigError("max_input_size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CodecConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.header_format, HeaderFormat::Delimited);
        assert_eq!(config.separator, b',');
    }

    #[test]
    fn test_json_partial_override() {
        let config =
            CodecConfig::from_json_str(r#"{"header_format": "length-prefixed"}"#).unwrap();
        assert_eq!(config.header_format, HeaderFormat::LengthPrefixed);
        assert_eq!(config.separator, b',');
        assert_eq!(config.max_input_size, CodecConfig::default().max_input_size);
    }

    #[test]
    fn test_rejects_bit_separator() {
        let result = CodecConfig::from_json_str(r#"{"separator": 49}"#);
        assert!(matches!(result, Err(CodecError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = CodecConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(CodecError::ConfigError(_))));
    }
}
