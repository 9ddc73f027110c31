// Reusable grammar rules
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

//! Library of [`Rule`](crate::parse::Rule)s for common element shapes.
//!
//! Every rule in this module shares the same contract with the rule that
//!   pushes it:
//!     it must be pushed in response to the
//!     [`ElementStart`](Token::ElementStart) of the element it is to
//!     parse,
//!   it sees tokens beginning _after_ that token,
//!   and it consumes the matching [`ElementEnd`](Token::ElementEnd)
//!     before finishing.
//! The initial [`Resume::Reentry`](crate::parse::Resume::Reentry) of each
//!   rule is therefore ignored,
//!     with the exception of [`ReadAttributes`],
//!       which exists to inspect it.
//!
//! Rules are generic over the context `C` and value `V` of the parser,
//!   and over its error type `E` provided that `E` can be produced from a
//!   [`GrammarError`].
//!
//! The available rules are:
//!
//!   - [`Document`] accepts a document with a single root element;
//!   - [`FillDictionary`] maps the names of child elements to their text;
//!   - [`ReadContent`] collects the text of an element;
//!   - [`ReadInts`] and [`ReadFloats`] parse whitespace-delimited numbers
//!       from the text of an element; and
//!   - [`ReadAttributes`] copies the attributes of an element onto
//!       [`Fields`].

mod content;
mod dict;
mod document;
mod fields;

pub use content::{
    ContentHandler, ReadContent, ReadFloats, ReadInts, ReadNumbers,
};
pub use dict::FillDictionary;
pub use document::Document;
pub use fields::{
    store_in_map, FieldError, FieldStatus, FieldStore, Fields,
    ReadAttributes, Store, UnknownField,
};

use crate::{
    diagnose::{Annotate, AnnotatedSpan, Diagnostic},
    fmt::{DisplayWrapper, TtCloseXmlEle, TtQuote},
    sax::Token,
    span::Span,
};
use std::{error::Error, fmt::Display, str::FromStr};

/// Error raised by a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// Text could not be parsed as an integer.
    InvalidInt(String, Span),

    /// Text could not be parsed as a floating-point number.
    InvalidFloat(String, Span),

    /// An attribute or child element does not correspond to any field of
    ///   its target.
    UnknownField(String, Span),

    /// A field rejected its value.
    InvalidField {
        key: String,
        value: String,
        reason: String,
        span: Span,
    },

    /// The document ended before the element being parsed was closed.
    UnexpectedDocumentEnd(Span),

    /// An element was closed when none was open.
    PrematureEnd(String, Span),

    /// A token appeared where the grammar does not permit it.
    ///
    /// The string describes what was expected.
    UnexpectedToken(Token, String),
}

impl GrammarError {
    /// Attach a span to a [`FieldError`].
    pub fn field(e: FieldError, span: Span) -> Self {
        match e {
            FieldError::Unknown(key) => Self::UnknownField(key, span),
            FieldError::Invalid { key, value, reason } => Self::InvalidField {
                key,
                value,
                reason,
                span,
            },
        }
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use GrammarError::*;

        match self {
            InvalidInt(text, _) => {
                write!(f, "invalid integer {}", TtQuote::wrap(text))
            }
            InvalidFloat(text, _) => {
                write!(f, "invalid number {}", TtQuote::wrap(text))
            }
            UnknownField(key, _) => {
                write!(f, "unknown field {}", TtQuote::wrap(key))
            }
            InvalidField { key, value, .. } => write!(
                f,
                "invalid value {} for field {}",
                TtQuote::wrap(value),
                TtQuote::wrap(key),
            ),
            UnexpectedDocumentEnd(_) => {
                write!(f, "unexpected end of document within element")
            }
            PrematureEnd(name, _) => write!(
                f,
                "unbalanced closing tag {}",
                TtCloseXmlEle::wrap(name)
            ),
            UnexpectedToken(tok, desc) => {
                write!(f, "unexpected {} while {desc}", TtQuote::wrap(tok))
            }
        }
    }
}

impl Error for GrammarError {}

impl Diagnostic for GrammarError {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        use GrammarError::*;

        match self {
            InvalidInt(_, span) => span
                .error("expected whitespace-delimited integers")
                .into(),
            InvalidFloat(_, span) => span
                .error("expected whitespace-delimited numbers")
                .into(),
            UnknownField(_, span) => span.mark_error().into(),
            InvalidField { reason, span, .. } => {
                span.error(reason.as_str()).into()
            }
            UnexpectedDocumentEnd(span) => span
                .error("document ended here")
                .with_help("an element was not closed")
                .into(),
            PrematureEnd(_, span) => {
                span.error("no element is open").into()
            }
            UnexpectedToken(tok, desc) => {
                tok.span().error(desc.as_str()).into()
            }
        }
    }
}

/// Normalize text spanning multiple lines into a single line.
///
/// Carriage returns are removed,
///   each line is trimmed of surrounding whitespace,
///   and the lines are joined by a single space.
///
/// ```
/// use saxstack::grammar::strip_whitespace;
///
/// assert_eq!(strip_whitespace(" 1  2\r\n  3 \n"), "1  2 3");
/// ```
pub fn strip_whitespace(text: &str) -> String {
    text.replace('\r', "")
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// A number that can be parsed from element text by [`ReadNumbers`].
pub trait Numeric: FromStr {
    /// Error for text that could not be parsed as this type.
    fn invalid(text: String, span: Span) -> GrammarError;
}

macro_rules! impl_numeric {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl Numeric for $ty {
                fn invalid(text: String, span: Span) -> GrammarError {
                    GrammarError::$variant(text, span)
                }
            }
        )+
    };
}

impl_numeric!(InvalidInt: i32, i64, u32, u64, usize);
impl_numeric!(InvalidFloat: f32, f64);

/// Error for a token that a rule does not accept.
///
/// A [`Token::DocumentEnd`] is always reported as
///   [`GrammarError::UnexpectedDocumentEnd`].
fn unexpected<E: From<GrammarError>>(tok: &Token, desc: &str) -> E {
    match tok {
        Token::DocumentEnd(span) => GrammarError::UnexpectedDocumentEnd(*span),
        _ => GrammarError::UnexpectedToken(tok.clone(), desc.into()),
    }
    .into()
}
