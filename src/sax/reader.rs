// SAX reader
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

//! Read XML documents into a [`Token`] stream.
//!
//! This uses [`quick_xml`] as the parser.
//! The reader performs no structural checks beyond what is necessary to
//!   tokenize the document;
//!     in particular,
//!       closing tags are not matched against their opening tags,
//!       since that is the responsibility of the rules consuming the
//!       tokens.

use super::{Attrs, Error, Token};
use crate::span::Span;
use quick_xml::{
    events::{BytesStart, Event as QuickXmlEvent},
    Error as QuickXmlError,
};
use std::{collections::VecDeque, io::BufRead, result};

pub type Result<T> = result::Result<T, Error>;

/// Parse XML into a [`Token`] stream.
///
/// This reader is intended to be used as an [`Iterator`].
/// The stream always begins with [`Token::DocumentStart`] and,
///   provided that no error occurs,
///   ends with [`Token::DocumentEnd`].
///
/// Comments,
///   processing instructions,
///   the XML declaration,
///   and doctypes are skipped.
/// Text that consists entirely of whitespace is produced as
///   [`Token::Whitespace`];
///     all other text,
///       including CDATA sections,
///       is produced as [`Token::Characters`].
///
/// [`None`] is returned only after the end of the document or after an
///   error;
///     the first error ends the stream.
pub struct XmlSaxReader<B: BufRead> {
    /// Inner parser.
    reader: quick_xml::Reader<B>,

    /// Buffer for [`quick_xml::Reader`].
    readbuf: Vec<u8>,

    /// Tokens already produced from a single event,
    ///   awaiting [`Iterator::next`].
    tokbuf: VecDeque<Token>,

    state: ReaderState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    Begin,
    Body,
    Done,
}

impl<B: BufRead> XmlSaxReader<B> {
    pub fn new(reader: B) -> Self {
        let mut reader = quick_xml::Reader::from_reader(reader);

        // Mismatched tags must reach the rules so that they can be
        //   reported in terms of the grammar.
        reader.check_end_names(false);

        Self {
            reader,
            readbuf: Vec::new(),
            tokbuf: VecDeque::with_capacity(2),
            state: ReaderState::Begin,
        }
    }

    /// Read events from the underlying [`quick_xml::Reader`] until one
    ///   produces a token.
    ///
    /// Any additional tokens produced by the same event are placed into
    ///   the token buffer.
    fn refill_buf(&mut self) -> Option<Result<Token>> {
        loop {
            self.readbuf.clear();

            let prev_pos = self.reader.buffer_position();
            let ev = self.reader.read_event_into(&mut self.readbuf);
            let new_pos = self.reader.buffer_position();

            // Tags always end at the current position,
            //   whereas the position preceding an event may or may not
            //   include the `<` that introduced it.
            let tag_span = |len: usize| {
                Span::span_or_zz(new_pos.saturating_sub(len), len)
            };

            break match ev {
                Err(e) => {
                    let span = Span::span_or_zz(prev_pos, 0);
                    Some(Err(Error::from_quick_xml(e, span)))
                }

                // This is the only time we'll consider the document to be
                //   complete.
                Ok(QuickXmlEvent::Eof) => {
                    self.state = ReaderState::Done;
                    Some(Ok(Token::document_end(Span::span_or_zz(
                        new_pos, 0,
                    ))))
                }

                // <foo ...>
                Ok(QuickXmlEvent::Start(ele)) => {
                    Some(Self::element_start(&ele, tag_span(ele.len() + 2)))
                }

                // <foo ... />
                Ok(QuickXmlEvent::Empty(ele)) => {
                    let result =
                        Self::element_start(&ele, tag_span(ele.len() + 3));

                    if let Ok(Token::ElementStart(name, _, _)) = &result {
                        // `<foo ... />`
                        //           ||
                        self.tokbuf.push_back(Token::element_end(
                            name.clone(),
                            tag_span(2),
                        ));
                    }

                    Some(result)
                }

                // </foo>
                Ok(QuickXmlEvent::End(ele)) => {
                    let span = tag_span(ele.name().as_ref().len() + 3);

                    Some(
                        utf8(ele.name().as_ref(), span)
                            .map(|name| Token::element_end(name, span)),
                    )
                }

                Ok(QuickXmlEvent::Text(bytes)) if bytes.is_empty() => {
                    continue
                }

                Ok(QuickXmlEvent::Text(bytes)) => {
                    let span = Span::span_or_zz(prev_pos, bytes.len());

                    Some(
                        bytes
                            .unescape()
                            .map_err(|e| Error::from_quick_xml(e, span))
                            .map(|text| text_token(text.into_owned(), span)),
                    )
                }

                Ok(QuickXmlEvent::CData(bytes)) if bytes.is_empty() => {
                    continue
                }

                // CDATA is never whitespace-only in the sense of
                //   formatting,
                //     since the author went out of their way to write it.
                Ok(QuickXmlEvent::CData(bytes)) => {
                    let span = tag_span(bytes.len() + 12);

                    Some(
                        utf8(&bytes, span)
                            .map(|text| Token::characters(text, span)),
                    )
                }

                Ok(
                    QuickXmlEvent::Comment(_)
                    | QuickXmlEvent::Decl(_)
                    | QuickXmlEvent::PI(_)
                    | QuickXmlEvent::DocType(_),
                ) => continue,
            };
        }
    }

    fn element_start(ele: &BytesStart, span: Span) -> Result<Token> {
        let name = utf8(ele.name().as_ref(), span)?;

        let attrs = ele
            .attributes()
            .map(|result| {
                let attr = result
                    .map_err(|e| Error::from_quick_xml(e.into(), span))?;

                let name = utf8(attr.key.as_ref(), span)?;
                let value = attr
                    .unescape_value()
                    .map_err(|e| Error::from_quick_xml(e, span))?;

                Ok((name, value.into_owned()))
            })
            .collect::<Result<Attrs>>()?;

        Ok(Token::element_start(name, attrs, span))
    }
}

impl<B: BufRead> Iterator for XmlSaxReader<B> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tok) = self.tokbuf.pop_front() {
            return Some(Ok(tok));
        }

        match self.state {
            ReaderState::Begin => {
                self.state = ReaderState::Body;
                Some(Ok(Token::document_start(Span::new(0, 0))))
            }

            ReaderState::Body => {
                let result = self.refill_buf();

                if let Some(Err(_)) = result {
                    self.state = ReaderState::Done;
                    self.tokbuf.clear();
                }

                result
            }

            ReaderState::Done => None,
        }
    }
}

impl Error {
    fn from_quick_xml(e: QuickXmlError, span: Span) -> Self {
        match e {
            QuickXmlError::NonDecodable(Some(inner)) => {
                Self::InvalidUtf8(inner, span)
            }
            QuickXmlError::Io(inner) => Self::Io(inner.to_string(), span),
            other => Self::Xml(other.to_string(), span),
        }
    }
}

fn utf8(bytes: &[u8], span: Span) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| Error::InvalidUtf8(e, span))
}

fn text_token(text: String, span: Span) -> Token {
    if text.bytes().all(|b| b.is_ascii_whitespace()) {
        Token::Whitespace(text, span)
    } else {
        Token::Characters(text, span)
    }
}

#[cfg(test)]
mod test;
