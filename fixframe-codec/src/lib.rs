/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixFrame Codec
//!
//! Incremental message framing for FIX byte streams.
//!
//! This crate provides:
//! - **Frame decoder**: a resumable state machine that finds message
//!   boundaries in arbitrarily chunked input and resynchronizes after
//!   corruption
//! - **Batch extraction**: framing of captured streams from memory-mapped files
//! - **Codec**: Tokio codec yielding one message per frame
//!
//! ## Example
//!
//! ```
//! use fixframe_codec::{DecodeStatus, FrameDecoder};
//!
//! let mut decoder = FrameDecoder::default();
//! let mut messages: Vec<String> = Vec::new();
//!
//! let status = decoder
//!     .decode(b"8=FIX.4.4\x019=5\x0135=0\x0110=161\x01", &mut messages)
//!     .unwrap();
//!
//! assert_eq!(status.messages(), 1);
//! assert_eq!(messages, ["8=FIX.4.4\x019=5\x0135=0\x01"]);
//! assert!(matches!(status, DecodeStatus::Decoded { compactable: true, .. }));
//! ```

pub mod charset;
pub mod codec;
pub mod config;
pub mod decoder;
mod extract;
pub mod pattern;
pub mod recognizer;
pub mod sink;
pub mod state;

pub use charset::Charset;
pub use codec::{CodecError, FixFrameCodec};
pub use config::{DecoderConfig, MAX_BODY_LENGTH, MAX_UNDECODED_DATA_LENGTH, SOH};
pub use decoder::{Decodability, DecodeStatus, FrameDecoder};
pub use pattern::{FramePattern, PatternMatch};
pub use recognizer::{HeaderKind, HeaderMatch, Recognizers};
pub use sink::MessageSink;
pub use state::{DecoderState, ScanState};
