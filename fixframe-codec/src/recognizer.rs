/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message header and trailer recognizers.
//!
//! The recognized header forms are a closed set evaluated in priority
//! order. Supporting another exchange framing means adding a
//! [`HeaderKind`] and its template.

use crate::config::SOH;
use crate::pattern::{FramePattern, PatternMatch};
use std::sync::{Arc, LazyLock};

/// The header forms recognized at the start of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// `8=FIX.x.y` and `8=FIXT.x.y`.
    Standard,
    /// Hanoi Stock Exchange `8=HNX.TDS.x`.
    Hnx,
}

impl HeaderKind {
    /// All header kinds, highest priority first.
    pub const ALL: [Self; 2] = [Self::Standard, Self::Hnx];

    /// Returns the BeginString template, up to the delimiter.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Standard => "8=FIXt.?.?",
            Self::Hnx => "8=HNX.TDS.?",
        }
    }
}

/// A header found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Which header form matched.
    pub kind: HeaderKind,
    /// Offset and length of the `8=...<delimiter>9=` preamble.
    pub span: PatternMatch,
}

/// The header and trailer patterns for one delimiter.
///
/// Immutable once built; decoders share it through an `Arc`.
#[derive(Debug)]
pub struct Recognizers {
    headers: Vec<(HeaderKind, FramePattern)>,
    trailer: FramePattern,
}

static SOH_RECOGNIZERS: LazyLock<Arc<Recognizers>> =
    LazyLock::new(|| Arc::new(Recognizers::build(SOH)));

impl Recognizers {
    /// Returns the recognizers for `delimiter`, shared when it is SOH.
    #[must_use]
    pub fn for_delimiter(delimiter: u8) -> Arc<Self> {
        if delimiter == SOH {
            Arc::clone(&SOH_RECOGNIZERS)
        } else {
            Arc::new(Self::build(delimiter))
        }
    }

    fn build(delimiter: u8) -> Self {
        let separator = || FramePattern::literal(&[delimiter]);
        let headers = HeaderKind::ALL
            .into_iter()
            .map(|kind| {
                let pattern = FramePattern::parse(kind.template())
                    .then(separator())
                    .then(FramePattern::parse("9="));
                (kind, pattern)
            })
            .collect();
        let trailer = FramePattern::literal(b"10=")
            .then(FramePattern::parse("???"))
            .then(separator());
        Self { headers, trailer }
    }

    /// Finds the earliest header at or after `from`.
    ///
    /// When two forms match at the same offset the higher priority one wins.
    #[must_use]
    pub fn find_header(&self, input: &[u8], from: usize) -> Option<HeaderMatch> {
        self.headers
            .iter()
            .filter_map(|(kind, pattern)| {
                pattern
                    .find(input, from)
                    .map(|span| HeaderMatch { kind: *kind, span })
            })
            .min_by_key(|m| m.span.offset)
    }

    /// Returns true if a complete `10=nnn<delimiter>` field starts at `pos`.
    #[must_use]
    pub fn trailer_at(&self, input: &[u8], pos: usize) -> bool {
        self.trailer.match_at(input, pos).is_some()
    }
}
