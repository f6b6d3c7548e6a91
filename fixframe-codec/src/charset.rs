/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Text encoding of emitted messages.

use encoding_rs::{Encoding, WINDOWS_1252};
use fixframe_core::error::{ConfigError, DecodeError};
use std::borrow::Cow;

/// A validated text encoding.
///
/// Labels are resolved with the WHATWG rules, so `ISO-8859-1`, `latin1` and
/// `US-ASCII` all resolve to `windows-1252`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    /// Resolves an encoding label.
    ///
    /// # Errors
    /// Returns `ConfigError::UnsupportedEncoding` for unknown labels and
    /// `ConfigError::IncompatibleEncoding` for encodings whose ASCII range
    /// differs from ASCII (UTF-16, ISO-2022-JP).
    pub fn for_label(label: &str) -> Result<Self, ConfigError> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| ConfigError::UnsupportedEncoding(label.to_string()))?;
        if !encoding.is_ascii_compatible() {
            return Err(ConfigError::IncompatibleEncoding(encoding.name().to_string()));
        }
        Ok(Self { encoding })
    }

    /// Returns the canonical encoding name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decodes a framed message.
    ///
    /// # Errors
    /// Returns `DecodeError::Encoding` on malformed input; nothing is replaced.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, DecodeError> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or(DecodeError::Encoding {
                encoding: self.name(),
                len: bytes.len(),
            })
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            encoding: WINDOWS_1252,
        }
    }
}
