// Suspension stack parsing framework
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

//! Suspension stack parsing framework.
//!
//! Grammars are written as a collection of small [`Rule`]s,
//!   each of which is a resumable computation over a stream of SAX
//!   [`Token`](crate::sax::Token)s.
//! A rule suspends whenever it needs another token,
//!   and may delegate part of its work to a nested rule by pushing it
//!   onto the rule stack,
//!     after which the nested rule's result
//!       (if any)
//!       is handed back to it.
//! This allows a grammar to be written in the shape of the document,
//!   rather than as a single state machine reacting to every event.
//!
//! The [`Parser`] drives the stack:
//!   for each token,
//!     it resumes the active rule and applies the pushes and pops that
//!     rule requests until the stack reaches quiescence,
//!       before it accepts the next token.
//! The [`SaxAdapter`] accepts SAX-style notifications and forwards them to
//!   a [`Parser`].
//!
//! ```
//! use saxstack::parse::{FnRule, Parser, Resume, Step};
//! use saxstack::sax::{Attrs, Token};
//! use saxstack::span::UNKNOWN_SPAN;
//!
//! // Count elements until the end of the document.
//! let main = FnRule::new("count", |input: Resume<()>, ctx: &mut usize| {
//!     Ok::<_, String>(match input.fresh() {
//!         Some(Token::ElementStart(..)) => {
//!             *ctx += 1;
//!             Step::NeedToken
//!         }
//!         Some(Token::DocumentEnd(..)) => Step::Done,
//!         _ => Step::NeedToken,
//!     })
//! });
//!
//! let mut parser = Parser::new(main, 0);
//!
//! for tok in [
//!     Token::document_start(UNKNOWN_SPAN),
//!     Token::element_start("a", Attrs::new(), UNKNOWN_SPAN),
//!     Token::element_end("a", UNKNOWN_SPAN),
//!     Token::document_end(UNKNOWN_SPAN),
//! ] {
//!     parser.feed(tok).unwrap();
//! }
//!
//! assert!(parser.is_complete());
//! assert_eq!(parser.finalize().ok().unwrap().into_context(), 1);
//! ```

mod adapter;
mod error;
mod parser;
mod rule;
mod state;
pub mod trace;

pub use adapter::SaxAdapter;
pub use error::{ParseError, ReadError, StackDesc};
pub use parser::{Finalized, Parser};
pub use rule::{FnRule, Resume, Rule, Step};
pub use state::{ParseState, StackOverflow};
pub use trace::{
    DefaultTrace, HumanReadableTrace, ParserTrace, RecordTrace, VoidTrace,
};

#[cfg(test)]
mod test;
