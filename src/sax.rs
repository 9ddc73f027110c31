// SAX token model
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

//! Tokens representing SAX document events.
//!
//! A [`Token`] is a single discrete event from a document:
//!   the start or end of the document itself,
//!   the start or end of an element,
//!   or a run of text.
//! There is exactly one constructor per kind of raw event,
//!   and none of them perform validation;
//!     well-formedness is the concern of the event source
//!       (see [`reader`])
//!     and structure is the concern of the grammar rules that consume
//!       tokens.
//!
//! ```
//! use saxstack::sax::{Attrs, Token, TokenKind};
//! use saxstack::span::UNKNOWN_SPAN;
//!
//! let tok = Token::element_start(
//!     "mesh",
//!     Attrs::from_iter([("id", "cube")]),
//!     UNKNOWN_SPAN,
//! );
//!
//! assert_eq!(tok.kind(), TokenKind::ElementStart);
//! assert_eq!(tok.to_string(), "<mesh>");
//! ```
//!
//! Tokens are ephemeral:
//!   a parser holds onto only the token it is currently processing.

mod attr;
mod error;
pub mod reader;

pub use attr::Attrs;
pub use error::Error;
pub use reader::XmlSaxReader;

use crate::span::Span;
use std::fmt::Display;

/// A single document event.
///
/// Every token carries the [`Span`] of the source text that produced it.
/// Spans are used only for diagnostics and never influence parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Beginning of the document.
    DocumentStart(Span),

    /// End of the document.
    ///
    /// No tokens follow.
    DocumentEnd(Span),

    /// Opening of an element with its name and attributes,
    ///   in document order.
    ElementStart(String, Attrs, Span),

    /// Closing of an element.
    ///
    /// The name is reported as it appeared in the source and is not
    ///   checked against the matching [`Token::ElementStart`].
    ElementEnd(String, Span),

    /// Text consisting entirely of whitespace.
    Whitespace(String, Span),

    /// Text containing at least one non-whitespace character.
    Characters(String, Span),
}

impl Token {
    pub fn document_start(span: Span) -> Self {
        Self::DocumentStart(span)
    }

    pub fn document_end(span: Span) -> Self {
        Self::DocumentEnd(span)
    }

    pub fn element_start<N: Into<String>>(
        name: N,
        attrs: Attrs,
        span: Span,
    ) -> Self {
        Self::ElementStart(name.into(), attrs, span)
    }

    pub fn element_end<N: Into<String>>(name: N, span: Span) -> Self {
        Self::ElementEnd(name.into(), span)
    }

    pub fn whitespace<S: Into<String>>(text: S, span: Span) -> Self {
        Self::Whitespace(text.into(), span)
    }

    pub fn characters<S: Into<String>>(text: S, span: Span) -> Self {
        Self::Characters(text.into(), span)
    }

    /// Kind of event represented by this token,
    ///   without any of its data.
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::DocumentStart(..) => TokenKind::DocumentStart,
            Self::DocumentEnd(..) => TokenKind::DocumentEnd,
            Self::ElementStart(..) => TokenKind::ElementStart,
            Self::ElementEnd(..) => TokenKind::ElementEnd,
            Self::Whitespace(..) => TokenKind::Whitespace,
            Self::Characters(..) => TokenKind::Characters,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::DocumentStart(span)
            | Self::DocumentEnd(span)
            | Self::ElementStart(_, _, span)
            | Self::ElementEnd(_, span)
            | Self::Whitespace(_, span)
            | Self::Characters(_, span) => *span,
        }
    }

    /// Whether this token is [`Token::Whitespace`] or
    ///   [`Token::Characters`].
    pub fn is_text(&self) -> bool {
        self.text().is_some()
    }

    /// Text of a [`Token::Whitespace`] or [`Token::Characters`] token.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Whitespace(text, _) | Self::Characters(text, _) => {
                Some(text)
            }
            _ => None,
        }
    }

    /// Element name of a [`Token::ElementStart`] or
    ///   [`Token::ElementEnd`] token.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::ElementStart(name, _, _) | Self::ElementEnd(name, _) => {
                Some(name)
            }
            _ => None,
        }
    }
}

impl Display for Token {
    /// Render the token in a form resembling its source XML.
    ///
    /// This is intended for use in diagnostic messages,
    ///   and so text is abbreviated.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentStart(_) => write!(f, "start of document"),
            Self::DocumentEnd(_) => write!(f, "end of document"),
            Self::ElementStart(name, _, _) => write!(f, "<{name}>"),
            Self::ElementEnd(name, _) => write!(f, "</{name}>"),
            Self::Whitespace(..) => write!(f, "whitespace"),
            Self::Characters(text, _) => match text.char_indices().nth(16) {
                Some((i, _)) => write!(f, "text \"{}...\"", &text[..i]),
                None => write!(f, "text \"{text}\""),
            },
        }
    }
}

impl From<&Token> for Span {
    fn from(tok: &Token) -> Self {
        tok.span()
    }
}

/// Kind of [`Token`] without its associated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    DocumentStart,
    DocumentEnd,
    ElementStart,
    ElementEnd,
    Whitespace,
    Characters,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentStart => write!(f, "document start"),
            Self::DocumentEnd => write!(f, "document end"),
            Self::ElementStart => write!(f, "element start"),
            Self::ElementEnd => write!(f, "element end"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Characters => write!(f, "characters"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::span::dummy::*;

    #[test]
    fn span_of_each_kind() {
        let toks = [
            Token::document_start(S1),
            Token::document_end(S2),
            Token::element_start("a", Attrs::new(), S3),
            Token::element_end("a", S4),
            Token::whitespace(" ", S5),
            Token::characters("x", S6),
        ];

        let spans: Vec<_> = toks.iter().map(Token::span).collect();
        assert_eq!(spans, vec![S1, S2, S3, S4, S5, S6]);
    }

    #[test]
    fn text_only_for_text_tokens() {
        assert_eq!(Token::whitespace("\n ", S1).text(), Some("\n "));
        assert_eq!(Token::characters("foo", S1).text(), Some("foo"));
        assert!(Token::characters("foo", S1).is_text());

        assert_eq!(Token::element_end("foo", S1).text(), None);
        assert!(!Token::document_start(S1).is_text());
    }

    #[test]
    fn display_resembles_xml() {
        assert_eq!(Token::element_end("p", S1).to_string(), "</p>");
        assert_eq!(Token::characters("abc", S1).to_string(), "text \"abc\"");
        assert_eq!(
            Token::characters("0123456789abcdefghij", S1).to_string(),
            "text \"0123456789abcdef...\"",
        );
        assert_eq!(Token::document_end(S1).to_string(), "end of document");
    }
}
