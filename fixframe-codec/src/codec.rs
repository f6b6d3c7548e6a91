/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tokio codec for FIX message framing.
//!
//! [`FixFrameCodec`] adapts [`FrameDecoder`] to `tokio_util::codec`, so a
//! socket can be read with `FramedRead` and yields one message string per
//! item.

use crate::decoder::{Decodability, FrameDecoder};
use bytes::{Buf, BytesMut};
use fixframe_core::error::DecodeError;
use std::collections::VecDeque;
use thiserror::Error;
use tokio_util::codec::Decoder;
use tracing::{debug, warn};

/// Errors that can occur during codec operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Too many bytes buffered without a message header.
    #[error("stream corrupted: {undecoded} bytes without a header exceeds {threshold}")]
    Corrupted {
        /// Bytes buffered.
        undecoded: usize,
        /// Corruption threshold.
        threshold: usize,
    },

    /// Fatal decode error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Tokio codec yielding framed FIX messages.
#[derive(Debug)]
pub struct FixFrameCodec {
    decoder: FrameDecoder,
    pending: VecDeque<String>,
}

impl FixFrameCodec {
    /// Creates a codec around a frame decoder.
    #[must_use]
    pub fn new(decoder: FrameDecoder) -> Self {
        Self {
            decoder,
            pending: VecDeque::new(),
        }
    }

    /// Returns the underlying frame decoder.
    #[inline]
    #[must_use]
    pub const fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }
}

impl Default for FixFrameCodec {
    fn default() -> Self {
        Self::new(FrameDecoder::default())
    }
}

impl Decoder for FixFrameCodec {
    type Item = String;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(message) = self.pending.pop_front() {
            return Ok(Some(message));
        }

        if self.decoder.probe(src) == Decodability::Corrupt {
            let threshold = self.decoder.config().max_undecoded_len;
            warn!(undecoded = src.len(), threshold, "no header within corruption threshold");
            return Err(CodecError::Corrupted {
                undecoded: src.len(),
                threshold,
            });
        }

        let status = self.decoder.decode(src, &mut self.pending)?;
        src.advance(status.consumed());
        Ok(self.pending.pop_front())
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(message) = self.decode(src)? {
            return Ok(Some(message));
        }
        self.decoder.finish();
        if !src.is_empty() {
            debug!(remaining = src.len(), "discarding trailing bytes at end of stream");
            src.clear();
        }
        self.decoder.reset();
        Ok(None)
    }
}
