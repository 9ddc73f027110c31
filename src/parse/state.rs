// Parse state and rule stack
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

//! State shared between the [`Parser`](super::Parser) and the rules it
//!   drives.
//!
//! The [`ParseState`] holds the stack of suspended rules,
//!   the token register,
//!   and the single-slot pending result through which a finished rule
//!     hands its value to the rule beneath it.
//! The bottom of the stack is the main rule;
//!   the top is the active rule.
//! An empty stack means that parsing is complete.
//!
//! The depth of the stack is bounded by `MAX_DEPTH`,
//!   which defaults to [`global::MAX_RULE_DEPTH`].
//! The stack is stored inline and never reallocates.

use super::{
    error::StackDesc,
    rule::{Resume, Rule, Step},
};
use crate::{global, sax::Token, span::UNKNOWN_SPAN};
use arrayvec::ArrayVec;
use std::fmt::Display;

/// A push would have exceeded the maximum depth of the rule stack.
///
/// The rejected rule has been dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOverflow {
    /// Maximum depth of the stack.
    pub max: usize,

    /// Name of the rule that was rejected.
    pub rule: String,
}

impl Display for StackOverflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pushing {} would exceed the maximum rule depth of {}",
            self.rule, self.max
        )
    }
}

/// Rule stack,
///   token register,
///   and pending result.
pub struct ParseState<
    C,
    V,
    E,
    const MAX_DEPTH: usize = { global::MAX_RULE_DEPTH },
> {
    stack: ArrayVec<Box<dyn Rule<C, V, E>>, MAX_DEPTH>,

    /// Token that rules are currently being resumed with.
    ///
    /// Until the first token is installed,
    ///   this holds a placeholder that is considered to have already
    ///   been delivered.
    token: Token,

    /// Whether [`Self::token`] has been delivered to a rule as
    ///   [`Resume::Token`].
    delivered: bool,

    pending: Option<V>,
}

impl<C, V, E, const MAX_DEPTH: usize> ParseState<C, V, E, MAX_DEPTH> {
    /// Initialize the stack with `main` as its only rule.
    ///
    /// Panics
    /// ======
    /// `MAX_DEPTH` must be at least `1`.
    pub fn new(main: Box<dyn Rule<C, V, E>>) -> Self {
        let mut stack = ArrayVec::new();
        stack.push(main);

        Self {
            stack,
            token: Token::document_start(UNKNOWN_SPAN),
            delivered: true,
            pending: None,
        }
    }

    /// Push `rule` onto the stack,
    ///   making it the active rule.
    pub fn push(
        &mut self,
        rule: Box<dyn Rule<C, V, E>>,
    ) -> Result<(), StackOverflow> {
        self.stack.try_push(rule).map_err(|e| StackOverflow {
            max: MAX_DEPTH,
            rule: e.element().to_string(),
        })
    }

    /// Pop the active rule from the stack,
    ///   making the rule beneath it active.
    pub fn pop(&mut self) -> Option<Box<dyn Rule<C, V, E>>> {
        self.stack.pop()
    }

    /// Install the token with which rules will next be resumed.
    ///
    /// The token will be delivered as [`Resume::Token`] to the first rule
    ///   resumed without a pending result,
    ///     and as [`Resume::Reentry`] thereafter.
    pub fn set_token(&mut self, tok: Token) {
        debug_assert!(
            self.pending.is_none(),
            "token installed while a result is pending"
        );

        self.token = tok;
        self.delivered = false;
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Store the value of a finished rule for the rule beneath it.
    pub fn set_pending_result(&mut self, value: V) {
        debug_assert!(self.pending.is_none(), "result already pending");

        self.pending = Some(value);
    }

    pub fn take_pending_result(&mut self) -> Option<V> {
        self.pending.take()
    }

    pub fn has_pending_result(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of rules on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the stack is empty,
    ///   meaning that the main rule has finished.
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    /// Names of the rules on the stack from bottom to top.
    pub fn describe_stack(&self) -> StackDesc {
        self.stack.iter().map(|rule| rule.to_string()).collect()
    }

    /// Resume the active rule.
    ///
    /// The input is chosen as follows:
    ///
    ///   1. a pending result is delivered as [`Resume::Return`],
    ///        clearing the slot;
    ///   2. otherwise a token that has not yet been delivered is
    ///        delivered as [`Resume::Token`],
    ///        after which it is considered to be delivered; and
    ///   3. otherwise the token is re-presented as [`Resume::Reentry`].
    ///
    /// Returns [`None`] if the stack is empty.
    pub fn resume_active(
        &mut self,
        ctx: &mut C,
    ) -> Option<Result<Step<C, V, E>, E>> {
        let rule = self.stack.last_mut()?;

        let input = match self.pending.take() {
            Some(value) => Resume::Return(value),
            None if !self.delivered => {
                self.delivered = true;
                Resume::Token(&self.token)
            }
            None => Resume::Reentry(&self.token),
        };

        Some(rule.resume(input, ctx))
    }

    /// Drop all rules and any pending result.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.pending = None;
    }
}
