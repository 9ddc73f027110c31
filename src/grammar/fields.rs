// Field setters
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

//! Assignment of string key/value pairs to typed targets.
//!
//! Grammars frequently map attribute or child element names onto the
//!   fields of some structure.
//! Rather than assigning fields by name dynamically,
//!   a target type implements [`Fields`] by matching each key against the
//!   names of the fields it knows,
//!     converting the value as appropriate.
//! Keys that match no field are reported as [`FieldStatus::Unknown`] and
//!   are then either ignored or rejected according to an explicit
//!   [`UnknownField`] policy.
//!
//! ```
//! use saxstack::grammar::{FieldError, FieldStatus, Fields};
//!
//! #[derive(Default)]
//! struct Mesh {
//!     id: String,
//!     count: u32,
//! }
//!
//! impl Fields for Mesh {
//!     fn set_field(
//!         &mut self,
//!         key: &str,
//!         value: &str,
//!     ) -> Result<FieldStatus, FieldError> {
//!         match key {
//!             "id" => self.id = value.into(),
//!             "count" => {
//!                 self.count = value
//!                     .parse()
//!                     .map_err(|e| FieldError::invalid(key, value, e))?
//!             }
//!             _ => return Ok(FieldStatus::Unknown),
//!         }
//!
//!         Ok(FieldStatus::Set)
//!     }
//! }
//!
//! let mut mesh = Mesh::default();
//! assert_eq!(mesh.set_field("count", "3"), Ok(FieldStatus::Set));
//! assert_eq!(mesh.set_field("color", "red"), Ok(FieldStatus::Unknown));
//! assert_eq!(mesh.count, 3);
//! ```
//!
//! Maps are populated through [`Store`],
//!   which is implemented for [`HashMap`] and [`BTreeMap`] and,
//!     through [`FieldStore`],
//!     for any [`Fields`].

use super::{unexpected, GrammarError};
use crate::{
    parse::{Resume, Rule, Step},
    sax::Token,
};
use std::{
    collections::{BTreeMap, HashMap},
    error::Error,
    fmt::Display,
    hash::BuildHasher,
};

/// Outcome of a successful [`Fields::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// The key named a field and the field was assigned.
    Set,

    /// The key does not name any field.
    Unknown,
}

/// Failure to assign a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The key does not name any field and unknown fields are rejected.
    Unknown(String),

    /// The value could not be converted for the field.
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

impl FieldError {
    pub fn invalid<R: Display>(key: &str, value: &str, reason: R) -> Self {
        Self::Invalid {
            key: key.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(key) => write!(f, "unknown field `{key}`"),
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid value `{value}` for field `{key}`: {reason}")
            }
        }
    }
}

impl Error for FieldError {}

/// A structure with fields that may be assigned by name.
pub trait Fields {
    /// Assign `value` to the field named `key`.
    fn set_field(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<FieldStatus, FieldError>;
}

/// Policy for keys that do not name a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownField {
    /// Skip the key.
    #[default]
    Ignore,

    /// Fail with [`FieldError::Unknown`].
    Reject,
}

/// A target for key/value pairs.
pub trait Store {
    fn store(&mut self, key: String, value: String) -> Result<(), FieldError>;
}

/// Insert `value` into `map` under `key`,
///   replacing any previous value.
pub fn store_in_map<S: BuildHasher>(
    map: &mut HashMap<String, String, S>,
    key: String,
    value: String,
) {
    map.insert(key, value);
}

impl<S: BuildHasher> Store for HashMap<String, String, S> {
    fn store(&mut self, key: String, value: String) -> Result<(), FieldError> {
        store_in_map(self, key, value);
        Ok(())
    }
}

impl Store for BTreeMap<String, String> {
    fn store(&mut self, key: String, value: String) -> Result<(), FieldError> {
        self.insert(key, value);
        Ok(())
    }
}

/// [`Store`] assigning to the [`Fields`] of a target under an
///   [`UnknownField`] policy.
pub struct FieldStore<'a, T: Fields> {
    target: &'a mut T,
    policy: UnknownField,
}

impl<'a, T: Fields> FieldStore<'a, T> {
    pub fn new(target: &'a mut T, policy: UnknownField) -> Self {
        Self { target, policy }
    }
}

impl<'a, T: Fields> Store for FieldStore<'a, T> {
    fn store(&mut self, key: String, value: String) -> Result<(), FieldError> {
        match (self.target.set_field(&key, &value)?, self.policy) {
            (FieldStatus::Set, _) => Ok(()),
            (FieldStatus::Unknown, UnknownField::Ignore) => Ok(()),
            (FieldStatus::Unknown, UnknownField::Reject) => {
                Err(FieldError::Unknown(key))
            }
        }
    }
}

/// Copy the attributes of the current element onto [`Fields`].
///
/// This rule consumes no tokens:
///   it reads the attributes of the [`ElementStart`](Token::ElementStart)
///   that caused it to be pushed and finishes immediately,
///     leaving the content of the element to the rule that pushed it.
/// It is therefore useful as the first of a sequence of pushes made in
///   response to the same token.
pub struct ReadAttributes<C, T> {
    select: fn(&mut C) -> &mut T,
    policy: UnknownField,
}

impl<C, T: Fields> ReadAttributes<C, T> {
    pub fn new(select: fn(&mut C) -> &mut T, policy: UnknownField) -> Self {
        Self { select, policy }
    }
}

impl<C, T> Display for ReadAttributes<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "read_attributes")
    }
}

impl<C, V, E, T> Rule<C, V, E> for ReadAttributes<C, T>
where
    E: From<GrammarError>,
    T: Fields,
{
    fn resume(
        &mut self,
        input: Resume<V>,
        ctx: &mut C,
    ) -> Result<Step<C, V, E>, E> {
        let tok = match input {
            Resume::Token(tok) | Resume::Reentry(tok) => tok,
            Resume::Return(_) => return Ok(Step::Done),
        };

        match tok {
            Token::ElementStart(_, attrs, span) => {
                let target = (self.select)(ctx);
                let mut store = FieldStore::new(target, self.policy);

                for (name, value) in attrs.iter() {
                    store
                        .store(name.into(), value.into())
                        .map_err(|e| GrammarError::field(e, *span))?;
                }

                Ok(Step::Done)
            }

            _ => Err(unexpected(tok, "reading attributes of an element")),
        }
    }
}
