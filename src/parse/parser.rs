// Suspension stack driver
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

//! Drive a stack of [`Rule`]s with a stream of [`Token`]s.
//!
//! See the [parent module](super) for more information.

use super::{
    error::{ParseError, ReadError},
    rule::{Rule, Step},
    state::{ParseState, StackOverflow},
    trace::{DefaultTrace, ParserTrace},
};
use crate::{
    global,
    sax::{self, Token},
    span::{Span, UNKNOWN_SPAN},
};
use std::fmt::Display;

/// Suspension stack driver.
///
/// A parser is created once per document with its main rule at the bottom
///   of the stack and the context `C` that rules populate.
/// Each token is driven to quiescence by [`Parser::feed`]:
///   the active rule is resumed repeatedly,
///     pushing and popping rules as requested,
///   until either a rule requests another token or the stack is empty.
///
/// A parser is single-use;
///   once the main rule has finished,
///     the only remaining operation is [`Parser::finalize`].
pub struct Parser<
    C,
    V,
    E,
    T: ParserTrace = DefaultTrace,
    const MAX_DEPTH: usize = { global::MAX_RULE_DEPTH },
> {
    state: ParseState<C, V, E, MAX_DEPTH>,
    ctx: C,
    trace: T,

    /// Value returned by the main rule,
    ///   if any.
    value: Option<V>,

    /// Span of the most recently fed token,
    ///   for use in diagnostics at the end of input.
    last_span: Span,

    /// Whether a previous error has discarded the stack.
    aborted: bool,
}

impl<C, V, E> Parser<C, V, E> {
    /// Create a parser with `main` as its main rule,
    ///   using the [`DefaultTrace`].
    pub fn new<R: Rule<C, V, E> + 'static>(main: R, ctx: C) -> Self {
        Self::with_trace(main, ctx, DefaultTrace::default())
    }
}

impl<C, V, E, T: ParserTrace> Parser<C, V, E, T> {
    /// Create a parser with `main` as its main rule,
    ///   reporting to the provided [`ParserTrace`].
    pub fn with_trace<R: Rule<C, V, E> + 'static>(
        main: R,
        ctx: C,
        trace: T,
    ) -> Self {
        Self::with_max_depth(main, ctx, trace)
    }
}

impl<C, V, E, T: ParserTrace, const MAX_DEPTH: usize>
    Parser<C, V, E, T, MAX_DEPTH>
{
    /// Create a parser whose rule stack is bounded by `MAX_DEPTH` rather
    ///   than [`global::MAX_RULE_DEPTH`].
    ///
    /// Panics
    /// ======
    /// `MAX_DEPTH` must be at least `1`.
    pub fn with_max_depth<R: Rule<C, V, E> + 'static>(
        main: R,
        ctx: C,
        trace: T,
    ) -> Self {
        Self {
            state: ParseState::new(Box::new(main)),
            ctx,
            trace,
            value: None,
            last_span: UNKNOWN_SPAN,
            aborted: false,
        }
    }

    /// Whether the main rule has finished.
    pub fn is_complete(&self) -> bool {
        !self.aborted && self.state.is_complete()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Number of rules on the stack.
    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    pub fn state(&self) -> &ParseState<C, V, E, MAX_DEPTH> {
        &self.state
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn trace(&self) -> &T {
        &self.trace
    }
}

impl<C, V, E: Display, T: ParserTrace, const MAX_DEPTH: usize>
    Parser<C, V, E, T, MAX_DEPTH>
{
    /// Drive `tok` through the rule stack until quiescence.
    ///
    /// The token is delivered to the active rule,
    ///   which may push nested rules or finish;
    ///     each change to the stack is followed immediately by resuming
    ///     the new active rule without consuming another token.
    /// This repeats until either a rule requests another token or the
    ///   stack is empty,
    ///     so zero-token chains of pushes and pops resolve entirely within
    ///     a single call.
    ///
    /// If the stack is already empty,
    ///   no rule is resumed and the token is rejected.
    /// Any error aborts the parse.
    pub fn feed(&mut self, tok: Token) -> Result<(), ParseError<E>> {
        if self.aborted {
            return Err(ParseError::Aborted);
        }

        self.last_span = tok.span();
        self.trace.trace_tok_begin(&self.state, &tok);

        if self.state.is_complete() {
            let err = match tok {
                Token::ElementEnd(..) => ParseError::PrematureEnd(tok),
                _ => ParseError::UnexpectedToken(
                    tok,
                    "expecting no further input".into(),
                ),
            };

            return Err(self.abort(err));
        }

        self.state.set_token(tok);

        loop {
            let step = match self.state.resume_active(&mut self.ctx) {
                // Main rule has finished.
                None => break,

                Some(Ok(step)) => step,

                Some(Err(err)) => {
                    let err = ParseError::RuleFailure {
                        err,
                        tok: self.state.token().clone(),
                        stack: self.state.describe_stack(),
                    };

                    return Err(self.abort(err));
                }
            };

            match step {
                Step::NeedToken => break,

                Step::Push(rule) => {
                    self.trace.trace_push(&*rule, self.state.depth() + 1);

                    if let Err(StackOverflow { max, rule }) =
                        self.state.push(rule)
                    {
                        let err = ParseError::StackOverflow {
                            max,
                            rule,
                            tok: self.state.token().clone(),
                        };

                        return Err(self.abort(err));
                    }
                }

                Step::Return(value) => self.finish(Some(value)),
                Step::Done => self.finish(None),
            }
        }

        self.trace.trace_tok_end(&self.state);

        Ok(())
    }

    /// Feed each token of a fallible token stream in turn.
    ///
    /// Stops at the first error from either the stream or the parser.
    pub fn feed_all<I>(&mut self, toks: I) -> Result<(), ReadError<E>>
    where
        I: IntoIterator<Item = Result<Token, sax::Error>>,
    {
        toks.into_iter().try_for_each(|result| -> Result<(), ReadError<E>> {
            let tok = result?;
            self.feed(tok).map_err(ReadError::from)
        })
    }

    /// Indicate that no further tokens will be fed,
    ///   retrieving the context and the value returned by the main rule.
    ///
    /// Invoking the method is equivalent to stating that the stream has
    ///   ended.
    /// Consequently,
    ///   the caller should expect [`ParseError::UnexpectedEof`] if any
    ///   rules remain suspended,
    ///     in which case the parser is returned alongside the error.
    pub fn finalize(self) -> Result<Finalized<C, V>, (Self, ParseError<E>)> {
        if self.aborted {
            Err((self, ParseError::Aborted))
        } else if !self.state.is_complete() {
            let err = ParseError::UnexpectedEof(
                self.last_span,
                self.state.describe_stack(),
            );

            Err((self, err))
        } else {
            Ok(Finalized {
                ctx: self.ctx,
                value: self.value,
            })
        }
    }

    /// Pop the active rule,
    ///   storing its value for the rule beneath it.
    ///
    /// If the main rule was popped,
    ///   its value is retained as the final value of the parse.
    fn finish(&mut self, value: Option<V>) {
        if let Some(rule) = self.state.pop() {
            self.trace
                .trace_pop(&*rule, self.state.depth(), value.is_some());
        }

        match value {
            Some(value) if self.state.is_complete() => self.value = Some(value),
            Some(value) => self.state.set_pending_result(value),
            None => (),
        }
    }

    /// Discard the stack and reject all further input.
    fn abort(&mut self, err: ParseError<E>) -> ParseError<E> {
        self.trace.trace_error(&err);

        self.aborted = true;
        self.state.clear();

        err
    }
}

/// Result of a parser that has completed successfully.
///
/// See [`Parser::finalize`].
#[derive(Debug, PartialEq)]
pub struct Finalized<C, V> {
    ctx: C,
    value: Option<V>,
}

impl<C, V> Finalized<C, V> {
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Value returned by the main rule,
    ///   if it finished with [`Step::Return`].
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    pub fn into_parts(self) -> (C, Option<V>) {
        (self.ctx, self.value)
    }
}
