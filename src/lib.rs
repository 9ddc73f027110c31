// Resumable SAX grammar rules
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

//! Push-style (SAX) parsing with grammars written as resumable rules.
//!
//! A document grammar is ordinarily written as one large state machine
//!   that reacts to each event of a SAX stream.
//! This crate instead allows each grammar rule to be written as a small
//!   [`Rule`](parse::Rule) that suspends whenever it needs another token
//!   and may delegate to nested rules by pushing them onto a stack,
//!     much like a function call.
//! The [`Parser`](parse::Parser) drives that stack to quiescence for every
//!   token before accepting the next one.
//!
//! The system is layered as follows:
//!
//!   - [`sax`] defines the [`Token`](sax::Token) model and a reader that
//!       produces tokens from an XML document;
//!   - [`parse`] is the suspension-stack engine
//!       (rule contract, parse state, driver, and event adapter); and
//!   - [`grammar`] contains reusable rules for common element shapes.

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

#[macro_use]
extern crate static_assertions;

pub mod global;

pub mod diagnose;
pub mod fmt;
pub mod grammar;
pub mod parse;
pub mod sax;
pub mod span;
