// Document root rule
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

//! Rule accepting an entire document.

use super::{unexpected, GrammarError};
use crate::{
    parse::{Resume, Rule, Step},
    sax::Token,
};
use std::fmt::Display;

/// Accept a document consisting of a single root element,
///   delegating the root element to another rule.
///
/// This is intended to be the main rule of a
///   [`Parser`](crate::parse::Parser).
/// Whitespace surrounding the root element is ignored;
///   any other text or a second root element is an error.
///
/// If the root rule finishes with [`Step::Return`],
///   its value is returned from this rule at the end of the document and
///   so becomes the final value of the parse.
pub struct Document<C, V, E> {
    root: Option<Box<dyn Rule<C, V, E>>>,
    value: Option<V>,
}

impl<C, V, E> Document<C, V, E> {
    pub fn new<R: Rule<C, V, E> + 'static>(root: R) -> Self {
        Self {
            root: Some(Box::new(root)),
            value: None,
        }
    }
}

impl<C, V, E> Display for Document<C, V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "document")
    }
}

impl<C, V, E: From<GrammarError>> Rule<C, V, E> for Document<C, V, E> {
    fn resume(
        &mut self,
        input: Resume<V>,
        _ctx: &mut C,
    ) -> Result<Step<C, V, E>, E> {
        let tok = match input {
            Resume::Token(tok) => tok,
            Resume::Reentry(_) => return Ok(Step::NeedToken),
            Resume::Return(value) => {
                self.value = Some(value);
                return Ok(Step::NeedToken);
            }
        };

        match tok {
            Token::DocumentStart(..) | Token::Whitespace(..) => {
                Ok(Step::NeedToken)
            }

            Token::ElementStart(..) => match self.root.take() {
                Some(root) => Ok(Step::Push(root)),
                None => Err(unexpected(tok, "expecting a single root element")),
            },

            Token::ElementEnd(name, span) => {
                Err(GrammarError::PrematureEnd(name.clone(), *span).into())
            }

            Token::Characters(..) => {
                Err(unexpected(tok, "expecting the root element"))
            }

            // `unexpected` would report an unclosed element.
            Token::DocumentEnd(..) if self.root.is_some() => {
                Err(GrammarError::UnexpectedToken(
                    tok.clone(),
                    "expecting the root element".into(),
                )
                .into())
            }

            Token::DocumentEnd(..) => Ok(match self.value.take() {
                Some(value) => Step::Return(value),
                None => Step::Done,
            }),
        }
    }
}
