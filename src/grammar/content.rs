// Element text rules
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

//! Rules that collect the text of an element.

use super::{strip_whitespace, unexpected, GrammarError, Numeric};
use crate::{
    parse::{Resume, Rule, Step},
    sax::Token,
    span::Span,
};
use std::{any::type_name, fmt::Display, marker::PhantomData, mem};

/// Text of an element,
///   accumulated one token at a time.
///
/// Text of nested elements is included,
///   but their tags are not.
#[derive(Debug, Default)]
struct Text {
    /// Number of nested elements currently open.
    depth: usize,
    buf: String,

    /// Span enclosing all text seen,
    ///   if any.
    span: Option<Span>,
}

impl Text {
    /// Accept a token,
    ///   producing the span of the closing tag once the element that
    ///   owns this text is closed.
    fn collect<E: From<GrammarError>>(
        &mut self,
        tok: &Token,
        desc: &str,
    ) -> Result<Option<Span>, E> {
        match tok {
            Token::ElementStart(..) => self.depth += 1,

            Token::ElementEnd(_, span) if self.depth == 0 => {
                return Ok(Some(*span))
            }
            Token::ElementEnd(..) => self.depth -= 1,

            Token::Whitespace(text, span) | Token::Characters(text, span) => {
                self.buf.push_str(text);
                self.span = Some(match self.span {
                    Some(prev) => prev.merge(*span),
                    None => *span,
                });
            }

            Token::DocumentStart(..) | Token::DocumentEnd(..) => {
                return Err(unexpected(tok, desc))
            }
        }

        Ok(None)
    }

    fn take(&mut self) -> String {
        mem::take(&mut self.buf)
    }
}

/// Recipient of the text collected by [`ReadContent`].
pub enum ContentHandler<C, E> {
    /// Invoke a callback with the text.
    Callback(Box<dyn FnOnce(&mut C, String) -> Result<(), E>>),

    /// Assign the text to a slot in the context,
    ///   replacing any previous text.
    Slot(fn(&mut C) -> &mut Option<String>),
}

impl<C, E> ContentHandler<C, E> {
    pub fn callback<F>(f: F) -> Self
    where
        F: FnOnce(&mut C, String) -> Result<(), E> + 'static,
    {
        Self::Callback(Box::new(f))
    }

    pub fn slot(select: fn(&mut C) -> &mut Option<String>) -> Self {
        Self::Slot(select)
    }

    fn deliver(self, ctx: &mut C, text: String) -> Result<(), E> {
        match self {
            Self::Callback(f) => f(ctx, text),
            Self::Slot(select) => {
                *select(ctx) = Some(text);
                Ok(())
            }
        }
    }
}

/// Collect the text of the current element and hand it to a
///   [`ContentHandler`].
///
/// The text is delivered verbatim,
///   including whitespace,
///   once the element is closed.
/// Text within nested elements is included;
///   only the closing tag of the element that caused this rule to be
///   pushed finishes it.
///
/// By default the rule finishes with [`Step::Done`];
///   use [`ReadContent::returning`] to instead hand a value to the rule
///   beneath.
pub struct ReadContent<C, V, E> {
    handler: Option<ContentHandler<C, E>>,
    result: Option<V>,
    text: Text,
}

impl<C, V, E> ReadContent<C, V, E> {
    pub fn new(handler: ContentHandler<C, E>) -> Self {
        Self {
            handler: Some(handler),
            result: None,
            text: Text::default(),
        }
    }

    /// Finish with [`Step::Return`] of `value` rather than [`Step::Done`].
    pub fn returning(self, value: V) -> Self {
        Self {
            result: Some(value),
            ..self
        }
    }
}

impl<C, V, E> Display for ReadContent<C, V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "read_content")
    }
}

impl<C, V, E: From<GrammarError>> Rule<C, V, E> for ReadContent<C, V, E> {
    fn resume(
        &mut self,
        input: Resume<V>,
        ctx: &mut C,
    ) -> Result<Step<C, V, E>, E> {
        let tok = match input.fresh() {
            Some(tok) => tok,
            None => return Ok(Step::NeedToken),
        };

        if self.text.collect::<E>(tok, "reading element text")?.is_none() {
            return Ok(Step::NeedToken);
        }

        if let Some(handler) = self.handler.take() {
            handler.deliver(ctx, self.text.take())?;
        }

        Ok(match self.result.take() {
            Some(value) => Step::Return(value),
            None => Step::Done,
        })
    }
}

/// Parse the text of the current element as whitespace-delimited numbers
///   and append them to a vector in the context.
///
/// Lines are first normalized using [`strip_whitespace`].
/// If any number fails to parse,
///   the rule fails and the vector is left untouched.
/// An element with no text appends nothing.
pub struct ReadNumbers<C, N, E> {
    select: fn(&mut C) -> &mut Vec<N>,
    text: Text,
    _phantom: PhantomData<E>,
}

/// Read whitespace-delimited integers.
pub type ReadInts<C, E> = ReadNumbers<C, i64, E>;

/// Read whitespace-delimited floating-point numbers.
pub type ReadFloats<C, E> = ReadNumbers<C, f64, E>;

impl<C, N: Numeric, E> ReadNumbers<C, N, E> {
    pub fn new(select: fn(&mut C) -> &mut Vec<N>) -> Self {
        Self {
            select,
            text: Text::default(),
            _phantom: PhantomData,
        }
    }
}

impl<C, N, E> Display for ReadNumbers<C, N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "read_numbers<{}>", type_name::<N>())
    }
}

impl<C, V, N, E> Rule<C, V, E> for ReadNumbers<C, N, E>
where
    N: Numeric,
    E: From<GrammarError>,
{
    fn resume(
        &mut self,
        input: Resume<V>,
        ctx: &mut C,
    ) -> Result<Step<C, V, E>, E> {
        let tok = match input.fresh() {
            Some(tok) => tok,
            None => return Ok(Step::NeedToken),
        };

        let end = match self.text.collect::<E>(tok, "reading numbers")? {
            Some(end) => end,
            None => return Ok(Step::NeedToken),
        };

        let span = self.text.span.unwrap_or(end);
        let text = strip_whitespace(&self.text.take());

        let nums = text
            .split_whitespace()
            .map(|s| s.parse::<N>().map_err(|_| N::invalid(s.into(), span)))
            .collect::<Result<Vec<_>, _>>()?;

        (self.select)(ctx).extend(nums);

        Ok(Step::Done)
    }
}
