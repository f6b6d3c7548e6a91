/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Frame decoder configuration.

use fixframe_core::error::ConfigError;

/// SOH delimiter.
pub const SOH: u8 = 0x01;

/// Encoding used when none is configured.
pub const DEFAULT_ENCODING: &str = "ISO-8859-1";

/// Undecoded bytes tolerated between messages before a stream is corrupt.
pub const MAX_UNDECODED_DATA_LENGTH: usize = 4096;

/// Largest BodyLength accepted.
///
/// Leading zeros do not count against it; only the value does.
pub const MAX_BODY_LENGTH: usize = 999_999_999;

/// Configuration for a [`FrameDecoder`](crate::FrameDecoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Label of the text encoding used for emitted messages.
    pub encoding: String,
    /// Corruption threshold for [`probe`](crate::FrameDecoder::probe).
    pub max_undecoded_len: usize,
    /// Whether framing errors should drop the connection instead of resynchronizing.
    pub disconnect_on_corruption: bool,
}

impl DecoderConfig {
    /// Creates a configuration with SOH and the default encoding.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: SOH,
            encoding: DEFAULT_ENCODING.to_string(),
            max_undecoded_len: MAX_UNDECODED_DATA_LENGTH,
            disconnect_on_corruption: false,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the text encoding label (e.g., "UTF-8").
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Sets the corruption threshold.
    #[must_use]
    pub const fn with_max_undecoded_len(mut self, len: usize) -> Self {
        self.max_undecoded_len = len;
        self
    }

    /// Sets whether framing errors escalate to `DecodeError::Critical`.
    #[must_use]
    pub const fn with_disconnect_on_corruption(mut self, disconnect: bool) -> Self {
        self.disconnect_on_corruption = disconnect;
        self
    }

    /// Checks that the delimiter can separate fields.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDelimiter` for digits, `=`, and non-ASCII bytes.
    pub fn validate_delimiter(&self) -> Result<(), ConfigError> {
        let d = self.delimiter;
        if d.is_ascii_digit() || d == b'=' || !d.is_ascii() {
            return Err(ConfigError::InvalidDelimiter(d));
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.delimiter, SOH);
        assert_eq!(config.encoding, "ISO-8859-1");
        assert_eq!(config.max_undecoded_len, 4096);
        assert!(!config.disconnect_on_corruption);
    }

    #[test]
    fn test_builder() {
        let config = DecoderConfig::new()
            .with_delimiter(b'|')
            .with_encoding("UTF-8")
            .with_max_undecoded_len(128)
            .with_disconnect_on_corruption(true);
        assert_eq!(config.delimiter, b'|');
        assert_eq!(config.encoding, "UTF-8");
        assert_eq!(config.max_undecoded_len, 128);
        assert!(config.disconnect_on_corruption);
        assert!(config.validate_delimiter().is_ok());
    }

    #[test]
    fn test_invalid_delimiters() {
        for d in [b'0', b'7', b'=', 0xC3] {
            assert_eq!(
                DecoderConfig::new().with_delimiter(d).validate_delimiter(),
                Err(ConfigError::InvalidDelimiter(d))
            );
        }
    }
}
