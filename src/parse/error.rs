// Parsing errors
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

//! Errors produced by the [`Parser`].
//!
//! Errors raised by rules are carried unmodified within
//!   [`ParseError::RuleFailure`],
//!     together with the token and rule stack at the time of failure.
//! All other errors are the engine's own.

use crate::{
    diagnose::{Annotate, AnnotatedSpan, Diagnostic},
    fmt::{DisplayWrapper, ListDisplayWrapper, StackList, TtQuote},
    sax::{self, Token},
    span::Span,
};
use std::{error::Error, fmt::Display};

#[cfg(doc)]
use super::{Parser, Rule};

/// Error produced while driving rules with a [`Parser`].
///
/// Any error aborts the parse;
///   the rule stack is discarded and all further tokens are rejected
///   with [`ParseError::Aborted`].
#[derive(Debug, PartialEq)]
pub enum ParseError<E> {
    /// A [`Rule`] requested a push that would exceed the maximum depth
    ///   of the rule stack.
    ///
    /// This generally means that a grammar is recursing without
    ///   consuming input.
    StackOverflow {
        max: usize,
        rule: String,
        tok: Token,
    },

    /// An [`ElementEnd`](Token::ElementEnd) was received after the main
    ///   rule had already finished.
    PrematureEnd(Token),

    /// A token other than an [`ElementEnd`](Token::ElementEnd) was
    ///   received after the main rule had already finished.
    ///
    /// The string describes what was expected.
    UnexpectedToken(Token, String),

    /// A [`Rule`] failed.
    RuleFailure {
        err: E,
        tok: Token,
        stack: StackDesc,
    },

    /// Input ended while rules were still suspended.
    ///
    /// The span is that of the last token received.
    UnexpectedEof(Span, StackDesc),

    /// The parser previously failed and can no longer accept input.
    Aborted,
}

impl<E> ParseError<E> {
    /// The error raised by a rule,
    ///   if any.
    pub fn rule_error(&self) -> Option<&E> {
        match self {
            Self::RuleFailure { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl<E: Display> Display for ParseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StackOverflow { max, rule, .. } => write!(
                f,
                "rule stack exceeded its maximum depth of {max} \
                   while pushing {}",
                TtQuote::wrap(rule),
            ),
            Self::PrematureEnd(tok) => write!(
                f,
                "unbalanced {}: no element is open",
                TtQuote::wrap(tok)
            ),
            Self::UnexpectedToken(tok, desc) => {
                write!(f, "unexpected {} while {desc}", TtQuote::wrap(tok))
            }
            Self::RuleFailure { err, .. } => Display::fmt(err, f),
            Self::UnexpectedEof(_, stack) => {
                write!(f, "unexpected end of input while parsing {stack}")
            }
            Self::Aborted => {
                write!(f, "parser was aborted by an earlier error")
            }
        }
    }
}

impl<E: Error + 'static> Error for ParseError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RuleFailure { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl<E: Diagnostic + 'static> Diagnostic for ParseError<E> {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        use ParseError::*;

        match self {
            StackOverflow { rule, tok, .. } => tok
                .span()
                .error(format!("{} pushed here", TtQuote::wrap(rule)))
                .with_help(
                    "a rule may be pushing nested rules without consuming \
                       any tokens",
                )
                .into(),

            PrematureEnd(tok) => {
                tok.span().error("all elements are already closed").into()
            }

            UnexpectedToken(tok, desc) => {
                tok.span().error(desc.as_str()).into()
            }

            RuleFailure { err, tok, stack } => {
                let mut desc = err.describe();

                desc.push(tok.span().note(format!(
                    "while processing {} in {stack}",
                    TtQuote::wrap(tok),
                )));

                desc
            }

            UnexpectedEof(span, stack) => span
                .error(format!("{stack} expected more input"))
                .into(),

            Aborted => vec![],
        }
    }
}

/// Names of the rules on a stack from bottom to top.
///
/// This is a snapshot taken at the time of an error,
///   so that the rules themselves need not be retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackDesc(Vec<String>);

impl StackDesc {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the rule that was active.
    pub fn top(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl FromIterator<String> for StackDesc {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for StackDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "an empty rule stack")
        } else {
            TtQuote::fmt(StackList::wrap(&self.0), f)
        }
    }
}

/// Error while feeding a fallible token stream to a [`Parser`].
#[derive(Debug, PartialEq)]
pub enum ReadError<E> {
    /// The token stream failed.
    Sax(sax::Error),

    /// The parser failed.
    Parse(ParseError<E>),
}

impl<E> From<sax::Error> for ReadError<E> {
    fn from(e: sax::Error) -> Self {
        Self::Sax(e)
    }
}

impl<E> From<ParseError<E>> for ReadError<E> {
    fn from(e: ParseError<E>) -> Self {
        Self::Parse(e)
    }
}

impl<E: Display> Display for ReadError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sax(e) => Display::fmt(e, f),
            Self::Parse(e) => Display::fmt(e, f),
        }
    }
}

impl<E: Error + 'static> Error for ReadError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sax(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl<E: Diagnostic + 'static> Diagnostic for ReadError<E> {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        match self {
            Self::Sax(e) => e.describe(),
            Self::Parse(e) => e.describe(),
        }
    }
}
