/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Incremental FIX frame decoder.
//!
//! [`FrameDecoder`] finds message boundaries in a byte stream that arrives
//! in arbitrary chunks. A message starts at a recognized `8=...<SOH>9=`
//! preamble and ends once the declared BodyLength has been consumed; the
//! trailing `10=nnn` field is left between frames and skipped while
//! seeking the next header.
//!
//! The caller owns the buffer. Each [`decode`](FrameDecoder::decode) call
//! sees the bytes the caller still holds and reports how many leading
//! bytes it may drop; the decoder keeps its cursor relative to what is
//! retained.

use crate::charset::Charset;
use crate::config::{DecoderConfig, MAX_BODY_LENGTH};
use crate::recognizer::Recognizers;
use crate::sink::MessageSink;
use crate::state::{DecoderState, ScanState};
use fixframe_core::error::{ConfigError, DecodeError, FrameError};
use std::sync::Arc;
use tracing::{debug, error};

/// Bytes of context included when logging a framing error.
const ERROR_PREVIEW_LEN: usize = 128;

/// Whether the buffered bytes can be decoded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decodability {
    /// A message header is buffered.
    Ready,
    /// No header yet; keep buffering.
    NeedMore,
    /// No header within the corruption threshold; drop the connection.
    Corrupt,
}

/// Outcome of a [`FrameDecoder::decode`] call.
///
/// `consumed` is the number of leading bytes the caller must drop before
/// the next call; everything after it has to be retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// At least one message was emitted.
    Decoded {
        /// Number of messages emitted.
        messages: usize,
        /// Bytes that may be dropped.
        consumed: usize,
        /// True if no partial frame is pending.
        compactable: bool,
    },
    /// No complete message yet.
    NeedMore {
        /// Bytes that may be dropped.
        consumed: usize,
    },
}

impl DecodeStatus {
    /// Returns the number of leading bytes the caller may drop.
    #[inline]
    #[must_use]
    pub const fn consumed(&self) -> usize {
        match self {
            Self::Decoded { consumed, .. } | Self::NeedMore { consumed } => *consumed,
        }
    }

    /// Returns the number of messages emitted.
    #[inline]
    #[must_use]
    pub const fn messages(&self) -> usize {
        match self {
            Self::Decoded { messages, .. } => *messages,
            Self::NeedMore { .. } => 0,
        }
    }
}

/// Result of scanning BodyLength digits.
enum LengthScan {
    /// Input ran out before a terminator.
    Pending { digits: usize, body_length: usize },
    /// Terminated by the delimiter.
    Complete { body_length: usize },
    /// Corrupt length field; resume seeking at `recovery`.
    Corrupt { error: FrameError, recovery: usize },
}

/// Incremental FIX message framer.
///
/// One instance serves one stream and must not be shared between
/// concurrent readers; use [`fork`](Self::fork) to get a decoder for
/// another stream with the same configuration.
#[derive(Debug)]
pub struct FrameDecoder {
    config: DecoderConfig,
    charset: Charset,
    recognizers: Arc<Recognizers>,
    scan: ScanState,
}

impl FrameDecoder {
    /// Creates a decoder.
    ///
    /// # Errors
    /// Returns `ConfigError` if the encoding is unknown or not ASCII
    /// compatible, or the delimiter cannot separate fields.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate_delimiter()?;
        let charset = Charset::for_label(&config.encoding)?;
        let recognizers = Recognizers::for_delimiter(config.delimiter);
        Ok(Self {
            config,
            charset,
            recognizers,
            scan: ScanState::default(),
        })
    }

    /// Returns a decoder with the same configuration and a fresh state.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            config: self.config.clone(),
            charset: self.charset,
            recognizers: Arc::clone(&self.recognizers),
            scan: ScanState::default(),
        }
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Returns the resolved text encoding.
    #[inline]
    #[must_use]
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> DecoderState {
        self.scan.state
    }

    /// Returns the scan cursor, relative to the retained bytes.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.scan.cursor
    }

    /// Returns the accumulated body length.
    #[inline]
    #[must_use]
    pub const fn body_length(&self) -> usize {
        self.scan.state.body_length()
    }

    /// Discards any partial frame and starts over.
    pub fn reset(&mut self) {
        self.scan = ScanState::default();
    }

    /// Reports whether `input` holds a message header.
    ///
    /// `input` is the unconsumed bytes, as passed to [`decode`](Self::decode).
    #[must_use]
    pub fn probe(&self, input: &[u8]) -> Decodability {
        if self.recognizers.find_header(input, 0).is_some() {
            Decodability::Ready
        } else if input.len() > self.config.max_undecoded_len {
            Decodability::Corrupt
        } else {
            Decodability::NeedMore
        }
    }

    /// Frames every complete message in `input`, passing each to `sink`.
    ///
    /// `input` must start with the bytes retained from the previous call,
    /// i.e. the previous input minus the `consumed` prefix, followed by any
    /// new bytes.
    ///
    /// # Errors
    /// Returns `DecodeError` if a message cannot be decoded as text, or a
    /// framing error occurs with `disconnect_on_corruption` set. The decoder
    /// is reset and the stream should be dropped.
    pub fn decode<S>(&mut self, input: &[u8], sink: &mut S) -> Result<DecodeStatus, DecodeError>
    where
        S: MessageSink + ?Sized,
    {
        let mut read_pos = 0;
        let mut messages = 0;
        while self.parse_message(input, &mut read_pos, sink)? {
            messages += 1;
        }

        // The caller drops everything before `read_pos`.
        self.scan.cursor -= read_pos;

        if messages > 0 {
            Ok(DecodeStatus::Decoded {
                messages,
                consumed: read_pos,
                compactable: self.scan.state.is_seeking(),
            })
        } else {
            Ok(DecodeStatus::NeedMore { consumed: read_pos })
        }
    }

    /// Called when the stream ends.
    ///
    /// A partial frame cannot complete any more; it is left in place so a
    /// caller inspecting the decoder still sees it.
    pub fn finish(&mut self) {
        if !self.scan.state.is_seeking() {
            debug!(
                state = %self.scan.state,
                cursor = self.scan.cursor,
                "stream finished with a partial frame"
            );
        }
    }

    fn parse_message<S>(
        &mut self,
        input: &[u8],
        read_pos: &mut usize,
        sink: &mut S,
    ) -> Result<bool, DecodeError>
    where
        S: MessageSink + ?Sized,
    {
        let result = self.advance(input, read_pos, sink);
        if result.is_err() {
            self.reset();
        }
        result
    }

    /// Runs the state machine until one message is emitted or input runs out.
    ///
    /// `read_pos` only moves to a header start, a recovery point, or past an
    /// emitted message; bytes after it are never released mid-frame.
    fn advance<S>(
        &mut self,
        input: &[u8],
        read_pos: &mut usize,
        sink: &mut S,
    ) -> Result<bool, DecodeError>
    where
        S: MessageSink + ?Sized,
    {
        while *read_pos < input.len() {
            match self.scan.state {
                DecoderState::SeekingHeader => {
                    let Some(header) = self.recognizers.find_header(input, self.scan.cursor)
                    else {
                        return Ok(false);
                    };
                    *read_pos = header.span.offset;
                    self.scan.cursor = header.span.end();
                    self.scan.state = DecoderState::ParsingLength {
                        digits: 0,
                        body_length: 0,
                    };
                    debug!(
                        kind = ?header.kind,
                        read_pos = *read_pos,
                        limit = input.len(),
                        cursor = self.scan.cursor,
                        "detected header"
                    );
                }
                DecoderState::ParsingLength {
                    digits,
                    body_length,
                } => match self.scan_length(input, *read_pos, digits, body_length) {
                    LengthScan::Pending {
                        digits,
                        body_length,
                    } => {
                        self.scan.state = DecoderState::ParsingLength {
                            digits,
                            body_length,
                        };
                        return Ok(false);
                    }
                    LengthScan::Complete { body_length } => {
                        self.scan.state = DecoderState::ReadingBody { body_length };
                        debug!(
                            body_length,
                            read_pos = *read_pos,
                            cursor = self.scan.cursor,
                            "body length"
                        );
                    }
                    LengthScan::Corrupt { error, recovery } => {
                        self.recover(input, read_pos, recovery, error)?;
                    }
                },
                DecoderState::ReadingBody { body_length } => {
                    if input.len().saturating_sub(self.scan.cursor) < body_length {
                        return Ok(false);
                    }
                    self.scan.cursor += body_length;
                    self.scan.state = DecoderState::ParsingChecksum;
                }
                DecoderState::ParsingChecksum => {
                    // Completion is by BodyLength alone; the trailer is not validated.
                    let end = self.scan.cursor;
                    let message = self.charset.decode(&input[*read_pos..end])?;
                    debug!(
                        len = end - *read_pos,
                        trailer = self.recognizers.trailer_at(input, end),
                        "parsed message"
                    );
                    sink.on_message(message.into_owned());
                    *read_pos = end;
                    self.scan.state = DecoderState::SeekingHeader;
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Consumes BodyLength digits from the cursor.
    fn scan_length(
        &mut self,
        input: &[u8],
        header_start: usize,
        mut digits: usize,
        mut body_length: usize,
    ) -> LengthScan {
        while let Some(&byte) = input.get(self.scan.cursor) {
            self.scan.cursor += 1;

            if !byte.is_ascii_digit() {
                return if digits == 0 {
                    LengthScan::Corrupt {
                        error: FrameError::InvalidBodyLength { byte },
                        recovery: header_start + 1,
                    }
                } else if byte == self.config.delimiter {
                    LengthScan::Complete { body_length }
                } else {
                    LengthScan::Corrupt {
                        error: FrameError::LengthFormat { byte },
                        recovery: self.scan.cursor,
                    }
                };
            }

            let Some(next) = body_length
                .checked_mul(10)
                .and_then(|v| v.checked_add(usize::from(byte - b'0')))
                .filter(|&v| v <= MAX_BODY_LENGTH)
            else {
                return LengthScan::Corrupt {
                    error: FrameError::BodyLengthOverflow {
                        max: MAX_BODY_LENGTH,
                    },
                    recovery: self.scan.cursor,
                };
            };
            digits += 1;
            body_length = next;
        }

        LengthScan::Pending {
            digits,
            body_length,
        }
    }

    /// Drops a corrupt prefix and resumes seeking at `recovery`.
    fn recover(
        &mut self,
        input: &[u8],
        read_pos: &mut usize,
        recovery: usize,
        error: FrameError,
    ) -> Result<(), DecodeError> {
        let preview_end = input.len().min(*read_pos + ERROR_PREVIEW_LEN);
        let preview = String::from_utf8_lossy(&input[*read_pos..preview_end]);

        *read_pos = recovery;
        self.scan = ScanState::seeking(recovery);

        if self.config.disconnect_on_corruption {
            return Err(DecodeError::Critical(error));
        }
        error!(%error, recovery, %preview, "discarding corrupt frame");
        Ok(())
    }
}

impl Default for FrameDecoder {
    /// A decoder for SOH-delimited ISO-8859-1 messages.
    fn default() -> Self {
        Self {
            config: DecoderConfig::default(),
            charset: Charset::default(),
            recognizers: Recognizers::for_delimiter(crate::config::SOH),
            scan: ScanState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGON: &[u8] = b"8=FIX.4.4\x019=12\x0135=A\x01108=30\x0110=088\x01";
    const LOGON_FRAME: &str = "8=FIX.4.4\x019=12\x0135=A\x01108=30\x01";

    #[test]
    fn test_decode_single_message() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();

        let status = decoder.decode(LOGON, &mut out).unwrap();

        assert_eq!(out, [LOGON_FRAME]);
        assert_eq!(
            status,
            DecodeStatus::Decoded {
                messages: 1,
                consumed: LOGON_FRAME.len(),
                compactable: true,
            }
        );
        assert_eq!(decoder.state(), DecoderState::SeekingHeader);
        assert_eq!(decoder.cursor(), 0);
        assert_eq!(decoder.body_length(), 0);
    }

    #[test]
    fn test_partial_length_is_preserved() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();

        let status = decoder.decode(b"xx8=FIX.4.2\x019=1", &mut out).unwrap();
        assert_eq!(status, DecodeStatus::NeedMore { consumed: 2 });
        assert_eq!(
            decoder.state(),
            DecoderState::ParsingLength {
                digits: 1,
                body_length: 1
            }
        );
        assert_eq!(decoder.cursor(), 13);

        let status = decoder
            .decode(b"8=FIX.4.2\x019=12\x0135=0\x01", &mut out)
            .unwrap();
        assert_eq!(status, DecodeStatus::NeedMore { consumed: 0 });
        assert_eq!(decoder.state(), DecoderState::ReadingBody { body_length: 12 });
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_body_length_recovers() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();
        let mut input = b"8=FIX.4.4\x019=X".to_vec();
        input.extend_from_slice(LOGON);

        decoder.decode(&input, &mut out).unwrap();

        assert_eq!(out, [LOGON_FRAME]);
    }

    #[test]
    fn test_empty_length_is_invalid() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();

        let status = decoder
            .decode(b"8=FIX.4.4\x019=\x0135=0\x01", &mut out)
            .unwrap();

        assert_eq!(status, DecodeStatus::NeedMore { consumed: 1 });
        assert!(decoder.state().is_seeking());
        assert!(out.is_empty());
    }

    #[test]
    fn test_length_format_error_recovers() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();
        let mut input = b"8=FIX.4.4\x019=12|35=0\x01".to_vec();
        input.extend_from_slice(LOGON);

        let status = decoder.decode(&input, &mut out).unwrap();

        assert_eq!(out, [LOGON_FRAME]);
        assert_eq!(status.messages(), 1);
    }

    #[test]
    fn test_oversized_body_length_recovers() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();
        let mut input = b"8=FIX.4.4\x019=99999999999999999999999\x01".to_vec();
        input.extend_from_slice(LOGON);

        decoder.decode(&input, &mut out).unwrap();

        assert_eq!(out, [LOGON_FRAME]);
    }

    #[test]
    fn test_zero_padded_body_length() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();

        let status = decoder
            .decode(b"8=FIX.4.4\x019=0000000000005\x0135=0\x0110=000\x01", &mut out)
            .unwrap();

        assert_eq!(status.messages(), 1);
        assert_eq!(out, ["8=FIX.4.4\x019=0000000000005\x0135=0\x01"]);
    }

    #[test]
    fn test_body_length_value_bound() {
        let mut decoder = FrameDecoder::default();
        decoder
            .decode(b"8=FIX.4.4\x019=999999999\x01", &mut Vec::<String>::new())
            .unwrap();
        assert_eq!(
            decoder.state(),
            DecoderState::ReadingBody {
                body_length: MAX_BODY_LENGTH
            }
        );

        let config = DecoderConfig::new().with_disconnect_on_corruption(true);
        let mut strict = FrameDecoder::new(config).unwrap();
        let err = strict
            .decode(b"8=FIX.4.4\x019=1000000000\x01", &mut Vec::<String>::new())
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::Critical(FrameError::BodyLengthOverflow {
                max: MAX_BODY_LENGTH
            })
        );
    }

    #[test]
    fn test_partial_frame_after_message_is_not_compactable() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();
        let mut buffer = LOGON.to_vec();
        buffer.extend_from_slice(b"xx8=FIX.4.4\x019=5\x0135");

        let status = decoder.decode(&buffer, &mut out).unwrap();
        assert_eq!(
            status,
            DecodeStatus::Decoded {
                messages: 1,
                consumed: LOGON.len() + 2,
                compactable: false,
            }
        );
        assert_eq!(decoder.state(), DecoderState::ReadingBody { body_length: 5 });
        assert_eq!(decoder.cursor(), 14);

        buffer.drain(..status.consumed());
        buffer.extend_from_slice(b"=1\x01");
        let status = decoder.decode(&buffer, &mut out).unwrap();

        assert_eq!(
            status,
            DecodeStatus::Decoded {
                messages: 1,
                consumed: buffer.len(),
                compactable: true,
            }
        );
        assert_eq!(out, [LOGON_FRAME, "8=FIX.4.4\x019=5\x0135=1\x01"]);
    }

    #[test]
    fn test_disconnect_on_corruption() {
        let config = DecoderConfig::new().with_disconnect_on_corruption(true);
        let mut decoder = FrameDecoder::new(config).unwrap();
        let mut out: Vec<String> = Vec::new();

        let err = decoder
            .decode(b"8=FIX.4.4\x019=1a\x01", &mut out)
            .unwrap_err();

        assert_eq!(
            err,
            DecodeError::Critical(FrameError::LengthFormat { byte: b'a' })
        );
        assert!(err.is_critical());
        assert_eq!(decoder.state(), DecoderState::SeekingHeader);
        assert_eq!(decoder.cursor(), 0);
    }

    #[test]
    fn test_encoding_failure_resets() {
        let config = DecoderConfig::new().with_encoding("UTF-8");
        let mut decoder = FrameDecoder::new(config).unwrap();
        let mut out: Vec<String> = Vec::new();

        let err = decoder
            .decode(b"8=FIX.4.4\x019=5\x0158=\xff\x01", &mut out)
            .unwrap_err();

        assert!(matches!(err, DecodeError::Encoding { encoding: "UTF-8", .. }));
        assert_eq!(decoder.state(), DecoderState::SeekingHeader);
        assert_eq!(decoder.cursor(), 0);
    }

    #[test]
    fn test_probe() {
        let decoder = FrameDecoder::default();
        assert_eq!(decoder.probe(LOGON), Decodability::Ready);
        assert_eq!(decoder.probe(b"garbage"), Decodability::NeedMore);
        assert_eq!(decoder.probe(&[b'x'; 4096]), Decodability::NeedMore);
        assert_eq!(decoder.probe(&[b'x'; 4097]), Decodability::Corrupt);
    }

    #[test]
    fn test_custom_delimiter() {
        let config = DecoderConfig::new().with_delimiter(b'|');
        let mut decoder = FrameDecoder::new(config).unwrap();
        let mut out: Vec<String> = Vec::new();

        decoder
            .decode(b"8=FIXT.1.1|9=5|35=0|10=000|", &mut out)
            .unwrap();

        assert_eq!(out, ["8=FIXT.1.1|9=5|35=0|"]);
    }

    #[test]
    fn test_hnx_header() {
        let mut decoder = FrameDecoder::default();
        let mut out: Vec<String> = Vec::new();

        decoder
            .decode(b"8=HNX.TDS.1\x019=5\x0135=0\x0110=000\x01", &mut out)
            .unwrap();

        assert_eq!(out, ["8=HNX.TDS.1\x019=5\x0135=0\x01"]);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            FrameDecoder::new(DecoderConfig::new().with_encoding("nope")).unwrap_err(),
            ConfigError::UnsupportedEncoding("nope".to_string())
        );
        assert_eq!(
            FrameDecoder::new(DecoderConfig::new().with_delimiter(b'=')).unwrap_err(),
            ConfigError::InvalidDelimiter(b'=')
        );
    }

    #[test]
    fn test_fork_has_fresh_state() {
        let mut decoder = FrameDecoder::default();
        decoder.decode(b"8=FIX.4.4\x019=40", &mut Vec::<String>::new()).unwrap();
        assert!(!decoder.state().is_seeking());

        let fork = decoder.fork();
        assert!(fork.state().is_seeking());
        assert_eq!(fork.config(), decoder.config());
    }
}
