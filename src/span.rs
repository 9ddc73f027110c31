// Source spans
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of saxstack.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Mapping to source input byte intervals.
//!
//! A [`Span`] is a mapping to a byte interval within a source document,
//!   representing where a [`Token`](crate::sax::Token) originated.
//! Spans exist purely for diagnostic output;
//!   they never influence parsing.
//!
//! ```
//! use saxstack::span::Span;
//!
//! let span = Span::new(2, 6);
//!
//! assert_eq!(2, span.offset());
//! assert_eq!(6, span.len());
//!
//! // From a closed byte interval
//! let spani = Span::from_byte_interval((10, 25));
//! assert_eq!(10, spani.offset());
//! assert_eq!(15, spani.len());
//! ```
//!
//! Spans are ordered first by offset and then by length,
//!   and are freely copyable.
//! Tokens that do not originate from a document
//!   (e.g. those fed directly to a parser by a test or an adapter that
//!     does not track positions)
//!   use [`UNKNOWN_SPAN`].

use crate::global;
use std::{convert::TryInto, fmt::Display};

/// Size of a [`Span`]'s `offset` field.
pub type SpanOffsetSize = global::SourceFileSize;

/// Size of a [`Span`]'s `len` field.
pub type SpanLenSize = global::FrontendTokenLength;

/// Byte interval within a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    offset: SpanOffsetSize,
    len: SpanLenSize,
}

// Spans are copied into every token;
//   keep them register-sized.
assert_eq_size!(Span, u64);

impl Span {
    /// Create a new span from its constituent parts.
    pub const fn new(offset: SpanOffsetSize, len: SpanLenSize) -> Self {
        Self { offset, len }
    }

    /// Create a span from a closed byte interval `(start, end)`.
    ///
    /// Panics
    /// ======
    /// The end of the interval must be ≥ its start.
    pub fn from_byte_interval(
        (start, end): (SpanOffsetSize, SpanOffsetSize),
    ) -> Self {
        assert!(end >= start, "invalid byte interval ({start}, {end})");

        Self::new(start, end - start)
    }

    /// Attempt to produce a [`Span`] of the given length at the given
    ///   offset,
    ///     otherwise fall back to a `(0,0)` (ZZ) span.
    ///
    /// If the offset cannot be stored,
    ///   then the length will always be `0` even if it could otherwise be
    ///   represented;
    ///     `(0,0)` indicates no span,
    ///       whereas `(0,N)` would indicate a span of length `N` at
    ///       offset `0`,
    ///         which would not be true.
    ///
    /// Spans are intended to be informative;
    ///   it's better to provide _some_ information for very large
    ///   documents than to bail out with an error.
    pub fn span_or_zz(offset: usize, len: usize) -> Self {
        match offset.try_into() {
            Ok(offset) => Self::new(offset, len.try_into().unwrap_or(0)),
            Err(_) => Self::new(0, 0),
        }
    }

    /// Byte offset of the beginning of the span.
    pub fn offset(&self) -> SpanOffsetSize {
        self.offset
    }

    /// Length of the span in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> SpanLenSize {
        self.len
    }

    /// Byte offset immediately following the span.
    pub fn end(&self) -> usize {
        self.offset as usize + self.len as usize
    }

    /// Whether this span is [`UNKNOWN_SPAN`].
    pub fn is_unknown(&self) -> bool {
        *self == UNKNOWN_SPAN
    }

    /// Smallest span enclosing both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        if self.is_unknown() {
            return other;
        } else if other.is_unknown() {
            return self;
        }

        let start = self.offset.min(other.offset);
        let end = self.end().max(other.end());

        Self::span_or_zz(start as usize, end - start as usize)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            return write!(f, "[unknown offset]");
        }

        write!(f, "[offset {}-{}]", self.offset, self.end())
    }
}

/// A placeholder span indicating that a span is expected but is not
///   known.
pub const UNKNOWN_SPAN: Span =
    Span::new(SpanOffsetSize::MAX, SpanLenSize::MAX);


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn span_or_zz_falls_back_on_overflowing_offset() {
        assert_eq!(Span::new(5, 3), Span::span_or_zz(5, 3));

        // Length too large but offset fine.
        assert_eq!(Span::new(5, 0), Span::span_or_zz(5, usize::MAX));

        // Offset too large means nothing can be represented.
        assert_eq!(Span::new(0, 0), Span::span_or_zz(usize::MAX, 3));
    }

    #[test]
    fn merge_encloses_both_spans() {
        let a = Span::new(2, 4);
        let b = Span::new(10, 5);

        assert_eq!(Span::new(2, 13), a.merge(b));
        assert_eq!(Span::new(2, 13), b.merge(a));
    }

    #[test]
    fn merge_ignores_unknown() {
        let a = Span::new(2, 4);

        assert_eq!(a, a.merge(UNKNOWN_SPAN));
        assert_eq!(a, UNKNOWN_SPAN.merge(a));
    }

    #[test]
    fn ordered_by_offset_then_len() {
        let mut spans =
            vec![Span::new(10, 5), Span::new(2, 6), Span::new(10, 4)];
        spans.sort();

        assert_eq!(
            spans,
            vec![Span::new(2, 6), Span::new(10, 4), Span::new(10, 5)]
        );
    }
}
