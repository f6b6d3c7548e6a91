/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the FixFrame stream framer.
//!
//! Framing faults are split in two families:
//! - [`FrameError`]: corruption the decoder recovers from by resynchronizing
//!   on the next header.
//! - [`DecodeError`]: faults the caller must treat as fatal for the stream.

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all FixFrame operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Invalid decoder configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal error while decoding a stream or message.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// I/O error from the underlying byte source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while constructing a decoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The encoding label is unknown.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The encoding cannot represent the ASCII framing bytes as themselves.
    #[error("encoding {0} is not ascii compatible")]
    IncompatibleEncoding(String),

    /// The delimiter would be confused with tag or length bytes.
    #[error("invalid field delimiter: 0x{0:02x}")]
    InvalidDelimiter(u8),
}

/// Recoverable corruption found while framing a message.
///
/// The decoder logs these, discards the corrupt prefix and resumes scanning
/// for the next header.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The byte after `9=` is not a digit.
    #[error("invalid body length: unexpected byte 0x{byte:02x}")]
    InvalidBodyLength {
        /// The offending byte.
        byte: u8,
    },

    /// The body length digits are not terminated by the delimiter.
    #[error("length format error: body length terminated by 0x{byte:02x}")]
    LengthFormat {
        /// The byte found instead of the delimiter.
        byte: u8,
    },

    /// The body length is larger than any legitimate message needs.
    #[error("body length exceeds {max}")]
    BodyLengthOverflow {
        /// Largest body length accepted.
        max: usize,
    },
}

/// Fatal errors that occur while decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A framing fault escalated to drop the connection.
    #[error("critical framing error: {0}")]
    Critical(FrameError),

    /// A framed message could not be converted to text.
    #[error("cannot decode {len} byte message as {encoding}")]
    Encoding {
        /// Canonical name of the configured encoding.
        encoding: &'static str,
        /// Length of the framed message in bytes.
        len: usize,
    },

    /// Invalid BeginString field (tag 8).
    #[error("invalid begin string: message must start with 8=")]
    InvalidBeginString,

    /// Missing MsgType field (tag 35).
    #[error("missing msg type field (tag 35)")]
    MissingMsgType,

    /// Invalid tag format (not a valid integer).
    #[error("invalid tag format: {0}")]
    InvalidTag(String),

    /// Invalid field value for the expected type.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },
}

impl DecodeError {
    /// Returns true if the caller is expected to drop the connection.
    ///
    /// Every decode error is fatal for the stream it came from; only
    /// `Critical` is raised on purpose by the framer to request it.
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::Critical(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_display() {
        let err = FrameError::InvalidBodyLength { byte: b'X' };
        assert_eq!(err.to_string(), "invalid body length: unexpected byte 0x58");

        let err = FrameError::LengthFormat { byte: b'|' };
        assert_eq!(
            err.to_string(),
            "length format error: body length terminated by 0x7c"
        );
    }

    #[test]
    fn test_critical_wraps_frame_error() {
        let err = DecodeError::Critical(FrameError::BodyLengthOverflow { max: 999_999_999 });
        assert!(err.is_critical());
        assert_eq!(
            err.to_string(),
            "critical framing error: body length exceeds 999999999"
        );
        assert!(!DecodeError::MissingMsgType.is_critical());
    }

    #[test]
    fn test_fix_error_from_config() {
        let err: FixError = ConfigError::UnsupportedEncoding("EBCDIC-X".into()).into();
        assert!(matches!(
            err,
            FixError::Config(ConfigError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_fix_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FixError = io.into();
        assert_eq!(err.to_string(), "io error: missing");
    }
}
