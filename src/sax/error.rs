// SAX reader errors
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

//! Errors produced while reading a document into [`Token`]s.
//!
//! [`Token`]: super::Token

use crate::{
    diagnose::{Annotate, AnnotatedSpan, Diagnostic},
    span::Span,
};
use std::{error::Error as StdError, fmt::Display, str::Utf8Error};

/// Failure to produce a token from the source document.
///
/// The underlying parser's errors are not retained directly since they
///   are neither comparable nor cheaply cloned;
///     their rendered message is kept instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The document is not well-formed XML.
    Xml(String, Span),

    /// A name, attribute value, or text is not valid UTF-8.
    InvalidUtf8(Utf8Error, Span),

    /// The source could not be read.
    Io(String, Span),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Self::Xml(_, span)
            | Self::InvalidUtf8(_, span)
            | Self::Io(_, span) => *span,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml(msg, _) => write!(f, "malformed XML: {msg}"),
            Self::InvalidUtf8(inner, _) => {
                write!(f, "document is not valid UTF-8: {inner}")
            }
            Self::Io(msg, _) => write!(f, "failed to read document: {msg}"),
        }
    }
}

impl StdError for Error {}

impl Diagnostic for Error {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        match self {
            Self::Xml(..) => self.span().mark_error().into(),
            Self::InvalidUtf8(inner, span) => span
                .error(format!(
                    "invalid byte sequence after {} valid bytes",
                    inner.valid_up_to()
                ))
                .into(),
            Self::Io(..) => self.span().note("reading stopped here").into(),
        }
    }
}
