/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Frame decoder state machine.
//!
//! The state and the scan cursor together are the whole recoverable
//! snapshot of a decoder's progress through a stream.

use std::fmt;

/// Where the decoder is within the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Looking for the next `8=...9=` preamble.
    #[default]
    SeekingHeader,
    /// Accumulating BodyLength digits.
    ParsingLength {
        /// Digits consumed so far.
        digits: usize,
        /// Value of the digits consumed so far.
        body_length: usize,
    },
    /// Waiting until the whole body is buffered.
    ReadingBody {
        /// Declared body length.
        body_length: usize,
    },
    /// Body consumed; the frame is complete.
    ParsingChecksum,
}

impl DecoderState {
    /// Returns the accumulated body length, zero outside length and body states.
    #[must_use]
    pub const fn body_length(&self) -> usize {
        match self {
            Self::ParsingLength { body_length, .. } | Self::ReadingBody { body_length } => {
                *body_length
            }
            Self::SeekingHeader | Self::ParsingChecksum => 0,
        }
    }

    /// Returns true if no partial frame is pending.
    #[inline]
    #[must_use]
    pub const fn is_seeking(&self) -> bool {
        matches!(self, Self::SeekingHeader)
    }

    /// Returns the state name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SeekingHeader => "SEEKING_HEADER",
            Self::ParsingLength { .. } => "PARSING_LENGTH",
            Self::ReadingBody { .. } => "READING_BODY",
            Self::ParsingChecksum => "PARSING_CHECKSUM",
        }
    }
}

impl fmt::Display for DecoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The state threaded through each framing pass.
///
/// `cursor` is relative to the start of the bytes the caller still holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanState {
    /// Current state.
    pub state: DecoderState,
    /// Next byte to examine.
    pub cursor: usize,
}

impl ScanState {
    /// Returns the scan state resynchronizing at `cursor`.
    #[inline]
    #[must_use]
    pub const fn seeking(cursor: usize) -> Self {
        Self {
            state: DecoderState::SeekingHeader,
            cursor,
        }
    }
}
