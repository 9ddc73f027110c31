// Resumable grammar rules
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

//! The contract between the [`Parser`](super::Parser) and the grammar
//!   rules it drives.
//!
//! A [`Rule`] is a resumable computation.
//! Each time it is resumed it is given a single [`Resume`] input and
//!   answers with a single [`Step`] describing what it needs next:
//!
//!   - [`Step::NeedToken`] suspends the rule until the next token
//!       arrives;
//!   - [`Step::Push`] suspends the rule beneath a nested rule,
//!       much like a function call;
//!   - [`Step::Return`] finishes the rule and hands a value to the rule
//!       beneath it; and
//!   - [`Step::Done`] finishes the rule with nothing to hand back.
//!
//! All state that must survive a suspension lives in the rule value
//!   itself.
//! Shared output,
//!   such as the structure being populated by a grammar,
//!   lives in the parser context `C`,
//!     which is lent to the rule for the duration of each resume.
//!
//! Input
//! =====
//! A rule is resumed with one of three inputs.
//! [`Resume::Token`] delivers a token that no rule has yet seen;
//!   each token is delivered this way exactly once.
//! [`Resume::Reentry`] re-presents the current token after the rule was
//!   pushed,
//!     or after a rule it pushed finished with [`Step::Done`].
//! This allows a freshly pushed rule to inspect the token that caused it
//!   to be pushed
//!     (for example,
//!       to read the attributes of an [`ElementStart`]),
//!   but the token must not be treated as new input a second time.
//! [`Resume::Return`] delivers the value of a rule that finished with
//!   [`Step::Return`].
//!
//! [`ElementStart`]: crate::sax::Token::ElementStart

use crate::sax::Token;
use std::fmt::{self, Debug, Display};

/// Input to a resumed [`Rule`].
///
/// See the [module-level documentation](self) for more information.
#[derive(Debug, PartialEq)]
pub enum Resume<'t, V> {
    /// A token that has not been delivered to any rule.
    Token(&'t Token),

    /// The current token,
    ///   which has already been delivered.
    Reentry(&'t Token),

    /// Value produced by the rule that was most recently popped.
    Return(V),
}

impl<'t, V> Resume<'t, V> {
    /// Token that is new input to the rule,
    ///   if any.
    ///
    /// This is [`None`] for [`Resume::Reentry`] and [`Resume::Return`].
    pub fn fresh(&self) -> Option<&'t Token> {
        match self {
            Self::Token(tok) => Some(tok),
            Self::Reentry(_) | Self::Return(_) => None,
        }
    }

    pub fn is_reentry(&self) -> bool {
        matches!(self, Self::Reentry(_))
    }
}

/// Outcome of resuming a [`Rule`].
pub enum Step<C, V, E> {
    /// Suspend until the next token.
    NeedToken,

    /// Suspend beneath the provided rule,
    ///   which becomes active immediately without consuming a token.
    Push(Box<dyn Rule<C, V, E>>),

    /// Finish,
    ///   handing the value to the rule beneath.
    Return(V),

    /// Finish without a value.
    Done,
}

impl<C, V, E> Step<C, V, E> {
    /// Push `rule`,
    ///   boxing it.
    pub fn push<R: Rule<C, V, E> + 'static>(rule: R) -> Self {
        Self::Push(Box::new(rule))
    }
}

impl<C, V: Debug, E> Debug for Step<C, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeedToken => write!(f, "NeedToken"),
            Self::Push(rule) => write!(f, "Push({rule})"),
            Self::Return(v) => f.debug_tuple("Return").field(v).finish(),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// A resumable grammar rule operating on context `C`,
///   producing values `V`,
///   and failing with errors `E`.
///
/// The [`Display`] representation names the rule in traces and
///   diagnostics.
pub trait Rule<C, V, E>: Display {
    /// Resume the rule with `input`.
    ///
    /// An error aborts the entire parse;
    ///   it is propagated to the caller of the parser unmodified.
    fn resume(
        &mut self,
        input: Resume<V>,
        ctx: &mut C,
    ) -> Result<Step<C, V, E>, E>;
}

/// A [`Rule`] defined by a closure.
///
/// Any state that the rule needs across suspensions is captured by the
///   closure.
///
/// ```
/// use saxstack::parse::{FnRule, Resume, Step};
///
/// let mut seen = 0;
/// let rule = FnRule::new(
///     "count",
///     move |input: Resume<()>, ctx: &mut usize| {
///         if input.fresh().is_some() {
///             seen += 1;
///             *ctx = seen;
///         }
///
///         Ok::<Step<usize, (), ()>, ()>(Step::NeedToken)
///     },
/// );
///
/// assert_eq!(rule.to_string(), "count");
/// ```
pub struct FnRule<F> {
    name: &'static str,
    f: F,
}

impl<F> FnRule<F> {
    pub fn new<C, V, E>(name: &'static str, f: F) -> Self
    where
        F: FnMut(Resume<V>, &mut C) -> Result<Step<C, V, E>, E>,
    {
        Self { name, f }
    }
}

impl<F> Display for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<C, V, E, F> Rule<C, V, E> for FnRule<F>
where
    F: FnMut(Resume<V>, &mut C) -> Result<Step<C, V, E>, E>,
{
    fn resume(
        &mut self,
        input: Resume<V>,
        ctx: &mut C,
    ) -> Result<Step<C, V, E>, E> {
        (self.f)(input, ctx)
    }
}
