// SAX event adapter
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

//! Adapt SAX-style notifications into [`Parser`] input.
//!
//! Event sources that report documents through callbacks,
//!   one per kind of event,
//!   can forward each callback to the corresponding method of
//!   [`SaxAdapter`].
//! Each method converts its notification into a [`Token`] and drives the
//!   parser to quiescence before returning.
//!
//! The adapter also keeps counters of the tokens and elements it has
//!   forwarded.
//! These are intended for monitoring and debugging and have no bearing on
//!   parsing.

use super::{
    error::{ParseError, ReadError},
    parser::{Finalized, Parser},
    trace::{DefaultTrace, ParserTrace},
};
use crate::{
    sax::{Attrs, Token, XmlSaxReader},
    span::UNKNOWN_SPAN,
};
use std::{fmt::Display, io::BufRead};

/// Forward SAX notifications to a [`Parser`].
///
/// Notifications received through the named methods carry no source
///   positions,
///     and so their tokens have an unknown span.
/// Use [`SaxAdapter::feed`] or [`SaxAdapter::read_xml`] to retain spans.
pub struct SaxAdapter<C, V, E, T: ParserTrace = DefaultTrace> {
    parser: Parser<C, V, E, T>,
    tokens_read: usize,
    elements_read: usize,
}

impl<C, V, E, T: ParserTrace> SaxAdapter<C, V, E, T> {
    pub fn new(parser: Parser<C, V, E, T>) -> Self {
        Self {
            parser,
            tokens_read: 0,
            elements_read: 0,
        }
    }

    /// Number of tokens forwarded to the parser,
    ///   including any that failed.
    pub fn tokens_read(&self) -> usize {
        self.tokens_read
    }

    /// Number of [`Token::ElementStart`] tokens forwarded to the parser.
    pub fn elements_read(&self) -> usize {
        self.elements_read
    }

    pub fn parser(&self) -> &Parser<C, V, E, T> {
        &self.parser
    }
}

impl<C, V, E: Display, T: ParserTrace> SaxAdapter<C, V, E, T> {
    /// Forward a token to the parser,
    ///   updating counters.
    pub fn feed(&mut self, tok: Token) -> Result<(), ParseError<E>> {
        self.tokens_read += 1;

        if let Token::ElementStart(..) = tok {
            self.elements_read += 1;
        }

        self.parser.feed(tok)
    }

    pub fn start_document(&mut self) -> Result<(), ParseError<E>> {
        self.feed(Token::document_start(UNKNOWN_SPAN))
    }

    pub fn end_document(&mut self) -> Result<(), ParseError<E>> {
        self.feed(Token::document_end(UNKNOWN_SPAN))
    }

    pub fn start_element<N: Into<String>>(
        &mut self,
        name: N,
        attrs: Attrs,
    ) -> Result<(), ParseError<E>> {
        self.feed(Token::element_start(name, attrs, UNKNOWN_SPAN))
    }

    pub fn end_element<N: Into<String>>(
        &mut self,
        name: N,
    ) -> Result<(), ParseError<E>> {
        self.feed(Token::element_end(name, UNKNOWN_SPAN))
    }

    pub fn ignorable_whitespace<S: Into<String>>(
        &mut self,
        text: S,
    ) -> Result<(), ParseError<E>> {
        self.feed(Token::whitespace(text, UNKNOWN_SPAN))
    }

    pub fn characters<S: Into<String>>(
        &mut self,
        text: S,
    ) -> Result<(), ParseError<E>> {
        self.feed(Token::characters(text, UNKNOWN_SPAN))
    }

    /// Forward every token of an XML document.
    ///
    /// Stops at the first error from either the reader or the parser.
    pub fn read_xml<B: BufRead>(
        &mut self,
        reader: XmlSaxReader<B>,
    ) -> Result<(), ReadError<E>> {
        for result in reader {
            self.feed(result?)?;
        }

        Ok(())
    }

    /// Finalize the parser.
    ///
    /// See [`Parser::finalize`].
    pub fn finalize(self) -> Result<Finalized<C, V>, ParseError<E>> {
        self.parser.finalize().map_err(|(_, err)| err)
    }
}
