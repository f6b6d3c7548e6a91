/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Common utilities shared across examples.

use fixframe::codec::DecoderConfig;
use std::env;

/// Default acceptor port.
pub const DEFAULT_PORT: u16 = 9876;

/// Default acceptor host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Example configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ExampleConfig {
    /// Acceptor hostname.
    pub host: String,
    /// Acceptor port.
    pub port: u16,
    /// Field delimiter.
    pub delimiter: u8,
    /// Text encoding label.
    pub encoding: String,
}

impl ExampleConfig {
    /// Reads `FIX_HOST`, `FIX_PORT`, `FIX_DELIMITER` and `FIX_ENCODING`.
    ///
    /// `FIX_DELIMITER` is a single character, e.g. `|` for logs that
    /// replace SOH with a printable byte.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            host: env::var("FIX_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("FIX_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            delimiter: env::var("FIX_DELIMITER")
                .ok()
                .and_then(|d| match d.as_bytes() {
                    [b] => Some(*b),
                    _ => None,
                })
                .unwrap_or(fixframe::codec::SOH),
            encoding: env::var("FIX_ENCODING")
                .unwrap_or_else(|_| fixframe::codec::config::DEFAULT_ENCODING.to_string()),
        }
    }

    /// Returns the socket address string.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the decoder configuration.
    #[must_use]
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig::new()
            .with_delimiter(self.delimiter)
            .with_encoding(self.encoding.clone())
    }
}

/// Initializes logging for examples.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Renders a message with printable delimiters for logging.
#[must_use]
pub fn printable(message: &str, delimiter: u8) -> String {
    message.replace(char::from(delimiter), "|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_config() {
        let cfg = ExampleConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            delimiter: b'|',
            encoding: "UTF-8".to_string(),
        };
        assert_eq!(cfg.addr(), "127.0.0.1:9876");
        let decoder = cfg.decoder_config();
        assert_eq!(decoder.delimiter, b'|');
        assert_eq!(decoder.encoding, "UTF-8");
    }

    #[test]
    fn test_printable() {
        assert_eq!(printable("8=FIX.4.4\x0135=0\x01", 0x01), "8=FIX.4.4|35=0|");
    }
}
