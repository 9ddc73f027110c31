// Global constants across the entire crate
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

//! System-wide static configuration.
//!
//! This module provides a system-wide configuration.
//! Subsystems should reference these values rather than defining their own
//!   and risk incompatibilities or maintenance issues as requirements
//!   change.
//!
//! By convention,
//!   import this entire module rather than individual members and reference
//!   them as `global::foo` to emphasize their nature and risk.

/// A size capable of representing any byte offset within a source
///   document.
pub type SourceFileSize = u32;

/// A size capable of representing the byte length of any single token.
///
/// Character data may be large
///   (e.g. long numeric arrays),
///   so this is not any smaller than [`SourceFileSize`].
pub type FrontendTokenLength = u32;

/// Maximum number of rules that may be suspended on the parse stack at
///   once,
///     including the main rule at the bottom of the stack.
///
/// Most grammars are shallow;
///   this is a guard against runaway recursion
///     (e.g. a rule that unconditionally pushes a copy of itself),
///   not a working limit.
pub const MAX_RULE_DEPTH: usize = 512;

const_assert!(MAX_RULE_DEPTH > 0);
