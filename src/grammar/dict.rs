// Dictionary of child element text
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

//! Map the names of child elements to their text.

use super::{
    fields::{FieldStore, Fields, Store, UnknownField},
    unexpected, GrammarError,
};
use crate::{
    parse::{Resume, Rule, Step},
    sax::Token,
    span::Span,
};
use std::{fmt::Display, mem};

type Storer<C, E> =
    Box<dyn FnMut(&mut C, String, String, Span) -> Result<(), E>>;

/// Build a flat mapping from the names of the children of the current
///   element to their text.
///
/// For example,
///   given `<r><a>1</a><b> x  y </b></r>` and having been pushed in
///   response to `<r>`,
///     this rule stores `a` ↦ `1` and `b` ↦ ` x  y `.
/// Text is stored exactly as it appears,
///   including whitespace.
///
/// Only immediate children become keys.
/// Elements nested more deeply contribute no structure:
///   their text is appended to the buffer of the child that encloses
///   them,
///     so `<a>x<g>y</g>z</a>` stores `a` ↦ `xyz`.
/// Text directly within the current element is discarded.
pub struct FillDictionary<C, E> {
    storer: Storer<C, E>,

    /// Number of elements open since this rule was pushed.
    depth: usize,

    /// Name of the open immediate child and the span of its opening
    ///   tag.
    key: Option<(String, Span)>,

    buf: String,
}

impl<C, E> FillDictionary<C, E> {
    /// Store each key and text through `storer`.
    pub fn new<F>(mut storer: F) -> Self
    where
        F: FnMut(&mut C, String, String) -> Result<(), E> + 'static,
    {
        Self::with_storer(Box::new(
            move |ctx: &mut C, key: String, value: String, _: Span| {
                storer(ctx, key, value)
            },
        ))
    }

    /// Store each key and text into the [`Store`] selected from the
    ///   context.
    pub fn into_store<S>(select: fn(&mut C) -> &mut S) -> Self
    where
        C: 'static,
        S: Store + 'static,
        E: From<GrammarError>,
    {
        Self::with_storer(Box::new(
            move |ctx: &mut C, key: String, value: String, span: Span| {
                select(ctx)
                    .store(key, value)
                    .map_err(|e| GrammarError::field(e, span).into())
            },
        ))
    }

    /// Assign each key and text to the [`Fields`] selected from the
    ///   context.
    pub fn into_fields<T>(
        select: fn(&mut C) -> &mut T,
        policy: UnknownField,
    ) -> Self
    where
        C: 'static,
        T: Fields + 'static,
        E: From<GrammarError>,
    {
        Self::with_storer(Box::new(
            move |ctx: &mut C, key: String, value: String, span: Span| {
                FieldStore::new(select(ctx), policy)
                    .store(key, value)
                    .map_err(|e| GrammarError::field(e, span).into())
            },
        ))
    }

    fn with_storer(storer: Storer<C, E>) -> Self {
        Self {
            storer,
            depth: 0,
            key: None,
            buf: String::new(),
        }
    }
}

impl<C, E> Display for FillDictionary<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fill_dictionary")
    }
}

impl<C, V, E: From<GrammarError>> Rule<C, V, E> for FillDictionary<C, E> {
    fn resume(
        &mut self,
        input: Resume<V>,
        ctx: &mut C,
    ) -> Result<Step<C, V, E>, E> {
        let tok = match input.fresh() {
            Some(tok) => tok,
            None => return Ok(Step::NeedToken),
        };

        match tok {
            Token::ElementStart(name, _, span) => {
                self.depth += 1;

                if self.depth == 1 {
                    self.key = Some((name.clone(), *span));
                    self.buf.clear();
                }
            }

            Token::Whitespace(text, _) | Token::Characters(text, _) => {
                if self.key.is_some() {
                    self.buf.push_str(text);
                }
            }

            // Our own element has closed.
            Token::ElementEnd(..) if self.depth == 0 => {
                return Ok(Step::Done)
            }

            Token::ElementEnd(..) => {
                self.depth -= 1;

                if self.depth == 0 {
                    if let Some((key, span)) = self.key.take() {
                        let value = mem::take(&mut self.buf);
                        (self.storer)(ctx, key, value, span)?;
                    }
                }
            }

            Token::DocumentStart(..) | Token::DocumentEnd(..) => {
                return Err(unexpected(tok, "reading child elements"))
            }
        }

        Ok(Step::NeedToken)
    }
}
