/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Byte patterns with wildcards.
//!
//! A pattern is written as an ASCII template:
//! - `?` matches any single byte,
//! - a lowercase letter matches itself or its uppercase form, or nothing,
//! - every other byte matches itself.
//!
//! So `8=FIXt.?.?` matches `8=FIX.4.4`, `8=FIXT.1.1` and `8=FIXt.1.1`.
//! Optional tokens are matched greedily without backtracking.

use memchr::memchr_iter;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(u8),
    Optional(u8),
    Any,
}

/// A match of a [`FramePattern`] inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// Offset of the first matched byte.
    pub offset: usize,
    /// Number of bytes matched.
    pub len: usize,
}

impl PatternMatch {
    /// Returns the offset just past the match.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// An immutable literal-with-wildcards byte pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePattern {
    tokens: SmallVec<[Token; 16]>,
    min_len: usize,
}

impl FramePattern {
    /// Compiles a template.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        Self::from_tokens(
            template
                .bytes()
                .map(|b| match b {
                    b'?' => Token::Any,
                    b'a'..=b'z' => Token::Optional(b),
                    _ => Token::Literal(b),
                })
                .collect(),
        )
    }

    /// Creates a pattern matching `bytes` exactly.
    #[must_use]
    pub fn literal(bytes: &[u8]) -> Self {
        Self::from_tokens(bytes.iter().copied().map(Token::Literal).collect())
    }

    fn from_tokens(tokens: SmallVec<[Token; 16]>) -> Self {
        let min_len = tokens
            .iter()
            .filter(|t| !matches!(t, Token::Optional(_)))
            .count();
        Self { tokens, min_len }
    }

    /// Appends another pattern.
    #[must_use]
    pub fn then(mut self, next: Self) -> Self {
        self.tokens.extend(next.tokens);
        self.min_len += next.min_len;
        self
    }

    /// Returns the shortest match length.
    #[inline]
    #[must_use]
    pub const fn min_len(&self) -> usize {
        self.min_len
    }

    /// Matches the pattern at exactly `pos`.
    ///
    /// # Returns
    /// The matched length, or `None` if the bytes differ or run out first.
    #[must_use]
    pub fn match_at(&self, input: &[u8], pos: usize) -> Option<usize> {
        let mut p = pos;
        for token in &self.tokens {
            let &byte = input.get(p)?;
            match *token {
                Token::Literal(b) if b == byte => p += 1,
                Token::Literal(_) => return None,
                Token::Any => p += 1,
                Token::Optional(b) if b == byte || b.to_ascii_uppercase() == byte => p += 1,
                Token::Optional(_) => {}
            }
        }
        Some(p - pos)
    }

    /// Finds the earliest match at or after `from`.
    ///
    /// Only the bytes currently in `input` are considered; a pattern cut
    /// off by the end of the buffer is not a match yet.
    #[must_use]
    pub fn find(&self, input: &[u8], from: usize) -> Option<PatternMatch> {
        // No match can start closer to the end than the shortest match.
        let last = input.len().checked_sub(self.min_len)?;
        let haystack = input.get(from..=last)?;
        let hit = |start: usize| {
            self.match_at(input, start)
                .map(|len| PatternMatch { offset: start, len })
        };
        match self.tokens.first() {
            Some(&Token::Literal(first)) => memchr_iter(first, haystack)
                .map(|i| from + i)
                .find_map(hit),
            _ => (from..=last).find_map(hit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> FramePattern {
        FramePattern::parse("8=FIXt.?.?")
            .then(FramePattern::literal(b"\x01"))
            .then(FramePattern::parse("9="))
    }

    #[test]
    fn test_lengths() {
        let p = header();
        assert_eq!(p.min_len(), 12);
        assert_eq!(FramePattern::parse("t?").min_len(), 1);
    }

    #[test]
    fn test_optional_token() {
        let p = header();
        assert_eq!(p.match_at(b"8=FIX.4.4\x019=", 0), Some(12));
        assert_eq!(p.match_at(b"8=FIXT.1.1\x019=", 0), Some(13));
        assert_eq!(p.match_at(b"8=FIXt.1.1\x019=", 0), Some(13));
        assert_eq!(p.match_at(b"8=FIXX.1.1\x019=", 0), None);
    }

    #[test]
    fn test_find_from_offset() {
        let p = header();
        let input = b"junk8=FIX.4.2\x019=5\x018=FIX.4.4\x019=";
        let first = p.find(input, 0).unwrap();
        assert_eq!(first, PatternMatch { offset: 4, len: 12 });
        let second = p.find(input, first.end()).unwrap();
        assert_eq!(second.offset, 18);
        assert_eq!(p.find(input, second.offset + 1), None);
    }

    #[test]
    fn test_truncated_input_is_not_a_match() {
        let p = header();
        assert_eq!(p.find(b"8=FIX.4.4\x019", 0), None);
        assert_eq!(p.find(b"8=FIX.4.4", 0), None);
        assert_eq!(p.find(b"", 0), None);
        assert_eq!(p.find(b"8=FIX.4.4\x019=", 40), None);
    }

    #[test]
    fn test_leading_wildcard() {
        let p = FramePattern::parse("?=1");
        assert_eq!(
            p.find(b"xx8=1", 0),
            Some(PatternMatch { offset: 2, len: 3 })
        );
    }
}
