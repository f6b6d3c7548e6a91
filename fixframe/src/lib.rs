/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixFrame
//!
//! Extracts complete FIX messages from fragmented byte streams.
//!
//! FIX messages are delimited by a decimal BodyLength field rather than by
//! fixed framing. FixFrame locates each message in input that arrives in
//! arbitrary chunks, survives corrupt length fields by resynchronizing on
//! the next header, and hands every well-formed message to a sink.
//!
//! ## Features
//!
//! - **Resumable**: state and cursor persist across partial reads
//! - **Self-healing**: corrupt frames are logged and skipped
//! - **Header forms**: `FIX.x.y`, `FIXT.x.y` and Hanoi `HNX.TDS.x`
//! - **Async support**: Tokio codec for socket reads
//! - **Files**: framing of captured streams through memory maps
//!
//! ## Quick Start
//!
//! ```rust
//! use fixframe::prelude::*;
//!
//! let mut decoder = FrameDecoder::new(DecoderConfig::new()).unwrap();
//! let mut framed: Vec<String> = Vec::new();
//! decoder
//!     .decode(b"8=FIX.4.4\x019=5\x0135=0\x0110=161\x01", &mut framed)
//!     .unwrap();
//!
//! let registry = MessageRegistry::with_all_versions();
//! let message = registry.parse(&framed[0], SOH).unwrap();
//! assert_eq!(message.msg_type(), &MsgType::Heartbeat);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Field, message and version types, and error definitions
//! - [`codec`]: The frame decoder, file extraction and Tokio codec
//! - [`message`]: Version-aware message construction

pub mod core {
    //! Field, message and version types, and error definitions.
    pub use fixframe_core::*;
}

pub mod codec {
    //! The frame decoder, file extraction and Tokio codec.
    pub use fixframe_codec::*;
}

pub mod message {
    //! Version-aware message construction.
    pub use fixframe_message::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixframe_core::{
        ConfigError, DecodeError, Field, FieldTag, FixError, FrameError, Message, MsgType, Result,
        Version,
    };

    // Framing
    pub use fixframe_codec::{
        CodecError, Decodability, DecodeStatus, DecoderConfig, DecoderState, FixFrameCodec,
        FrameDecoder, MessageSink, SOH,
    };

    // Message construction
    pub use fixframe_message::{MessageFactory, MessageRegistry};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let decoder = FrameDecoder::default();
        assert_eq!(decoder.state(), DecoderState::SeekingHeader);
        assert_eq!(decoder.config().delimiter, SOH);
        assert!(MessageRegistry::new().is_empty());
    }

    #[test]
    fn test_version() {
        let version = Version::Fix44;
        assert_eq!(version.begin_string(), "FIX.4.4");
    }
}
