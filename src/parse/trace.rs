// Tracing for rule-driven parsing
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

//! Tracing for parsing operations.
//!
//! This provides human-readable traces on standard error any time a token
//!   is fed to the parser,
//!     including every push and pop of the rule stack that the token
//!     causes.
//! These traces are provided automatically when `cfg(test)`,
//!   which means that they are automatically included in the output of any
//!   test failure.
//!
//! Outside of tests,
//!   this can be enabled at build time using the `parser-trace-stderr`
//!   feature flag,
//!     or by constructing a [`Parser`](super::Parser) with an explicit
//!     [`ParserTrace`].
//!
//! Tracing is purely observational:
//!   a trace receives only shared references and has no means of
//!   influencing the parse.
//!
//! _These traces are not meant to be machine-readable!_
//! Do not try to use the human-readable traces in that way since the format
//!   is subject to change without notice.

use super::ParseState;
use crate::sax::Token;
use std::fmt::Display;

/// Sink for parser events.
///
/// There is no means to return an error from any of these methods;
///   a failure to output a trace must not interrupt processing.
pub trait ParserTrace {
    /// A token was received,
    ///   before any rule has seen it.
    fn trace_tok_begin<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        st: &ParseState<C, V, E, MAX_DEPTH>,
        tok: &Token,
    );

    /// `rule` is about to be pushed,
    ///   resulting in a stack of `depth` rules.
    fn trace_push<R: Display + ?Sized>(&mut self, rule: &R, depth: usize);

    /// `rule` was popped,
    ///   leaving a stack of `depth` rules.
    ///
    /// `returned` indicates whether the rule produced a value.
    fn trace_pop<R: Display + ?Sized>(
        &mut self,
        rule: &R,
        depth: usize,
        returned: bool,
    );

    /// The stack has reached quiescence for the current token.
    fn trace_tok_end<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        st: &ParseState<C, V, E, MAX_DEPTH>,
    );

    /// The parse failed.
    fn trace_error<D: Display + ?Sized>(&mut self, err: &D);
}

/// Perform no tracing.
///
/// This should be used by default for non-test builds,
///   since tracing can incur a significant performance cost.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl ParserTrace for VoidTrace {
    fn trace_tok_begin<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        _st: &ParseState<C, V, E, MAX_DEPTH>,
        _tok: &Token,
    ) {
        // Do nothing at all.
    }

    fn trace_push<R: Display + ?Sized>(&mut self, _rule: &R, _depth: usize) {
    }

    fn trace_pop<R: Display + ?Sized>(
        &mut self,
        _rule: &R,
        _depth: usize,
        _returned: bool,
    ) {
    }

    fn trace_tok_end<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        _st: &ParseState<C, V, E, MAX_DEPTH>,
    ) {
    }

    fn trace_error<D: Display + ?Sized>(&mut self, _err: &D) {}
}

/// Human-readable [`ParserTrace`] written to standard error.
///
/// Note: if one of these trace blocks does not fully output,
///   then you may have a `Display::fmt` panic in one of your rules.
///
/// See [module-level](self) documentation for more information.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl ParserTrace for HumanReadableTrace {
    fn trace_tok_begin<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        st: &ParseState<C, V, E, MAX_DEPTH>,
        tok: &Token,
    ) {
        eprint!(
            "\
[Parser::feed] depth {depth}/{max}
| ==> Stack before tok is {stack}.
|
| ==> tok: {tok}
|  |  {tok:?}
|\n",
            depth = st.depth(),
            max = MAX_DEPTH,
            stack = st.describe_stack(),
        );
    }

    fn trace_push<R: Display + ?Sized>(&mut self, rule: &R, depth: usize) {
        eprint!("| ==> push {rule} (depth {depth})\n");
    }

    fn trace_pop<R: Display + ?Sized>(
        &mut self,
        rule: &R,
        depth: usize,
        returned: bool,
    ) {
        let with = if returned { "with" } else { "without" };
        eprint!("| <== pop {rule} {with} value (depth {depth})\n");
    }

    fn trace_tok_end<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        st: &ParseState<C, V, E, MAX_DEPTH>,
    ) {
        eprint!(
            "\
|
| ==> Stack after tok is {stack}.\n",
            stack = st.describe_stack(),
        );

        self.trace_note();
    }

    fn trace_error<D: Display + ?Sized>(&mut self, err: &D) {
        eprint!(
            "\
|
| ==> !!! error: {err}.\n",
        );

        self.trace_note();
    }
}

impl HumanReadableTrace {
    fn trace_note(&self) {
        #[allow(unused_variables)]
        let cfg = ""; // so that this compiles without matching cfg
        #[cfg(feature = "parser-trace-stderr")]
        #[allow(unused_variables)]
        let cfg = "feature = \"parser-trace-stderr\"";
        #[cfg(test)] // takes precedence if both are set
        let cfg = "test";

        if cfg.is_empty() {
            eprint!("= note: this trace was requested explicitly.\n\n");
        } else {
            eprint!(
                "= note: this trace was output as a debugging aid \
                    because `cfg({cfg})`.\n\n",
            );
        }
    }
}

/// Record a terse trace in memory.
///
/// Each event is recorded as a single line.
/// This is useful for inspecting the operations that a parser performed,
///   such as in tests.
#[derive(Debug, PartialEq, Default)]
pub struct RecordTrace(Vec<String>);

impl RecordTrace {
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn into_lines(self) -> Vec<String> {
        self.0
    }
}

impl ParserTrace for RecordTrace {
    fn trace_tok_begin<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        _st: &ParseState<C, V, E, MAX_DEPTH>,
        tok: &Token,
    ) {
        self.0.push(format!("tok {tok}"));
    }

    fn trace_push<R: Display + ?Sized>(&mut self, rule: &R, depth: usize) {
        self.0.push(format!("push {rule} @{depth}"));
    }

    fn trace_pop<R: Display + ?Sized>(
        &mut self,
        rule: &R,
        depth: usize,
        returned: bool,
    ) {
        let op = if returned { "return" } else { "pop" };
        self.0.push(format!("{op} {rule} @{depth}"));
    }

    fn trace_tok_end<C, V, E, const MAX_DEPTH: usize>(
        &mut self,
        st: &ParseState<C, V, E, MAX_DEPTH>,
    ) {
        self.0.push(format!("wait @{}", st.depth()));
    }

    fn trace_error<D: Display + ?Sized>(&mut self, err: &D) {
        self.0.push(format!("error {err}"));
    }
}

/// Trace used by [`Parser::new`](super::Parser::new).
///
/// This is [`HumanReadableTrace`] for tests and when the
///   `parser-trace-stderr` feature is enabled,
///     and [`VoidTrace`] otherwise.
#[cfg(any(test, feature = "parser-trace-stderr"))]
pub type DefaultTrace = HumanReadableTrace;

/// Trace used by [`Parser::new`](super::Parser::new).
#[cfg(not(any(test, feature = "parser-trace-stderr")))]
pub type DefaultTrace = VoidTrace;
