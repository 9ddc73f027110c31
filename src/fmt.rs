// Display formatting utilities
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

//! Typed formatting helpers.
//!
//! These types create composable formatters for use with [`Display`].
//! Whereas [`Display`] operates on data owned by the type implementing it,
//!   these formatters compose into functions that operate on data provided
//!   _to_ it.
//! Consequently,
//!   formatters are simply types,
//!   and writes can be streamed just as they are with [`Display`].
//!
//! There are two types of wrappers:
//!
//!   - [`DisplayWrapper`] formats objects as atoms; and
//!   - [`ListDisplayWrapper`] maps a [`DisplayWrapper`] to each of its
//!       items and joins them with a separator.
//!
//! For example:
//!
//! ```
//! use saxstack::fmt::*;
//!
//! assert_eq!(TtQuote::wrap("foo").to_string(), "`foo`");
//! assert_eq!(TtOpenXmlEle::wrap("foo").to_string(), "`<foo>`");
//! assert_eq!(
//!     StackList::wrap(&["main", "fill_dictionary"]).to_string(),
//!     "main > fill_dictionary",
//! );
//! ```
//!
//! This is _not_ a substitute for canonical object representations that
//!   own their own [`Display`] implementation,
//!     but is suitable where display is context-dependent.

use std::{
    fmt::{Display, Formatter, Result},
    marker::PhantomData,
};

/// Wrapper for a [`Display`]-able type.
///
/// See the [module-level documentation](self) for more information.
pub trait DisplayWrapper {
    /// Transform inner data and output using the provided [`Formatter`].
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result;

    /// Associate data with a [`DisplayWrapper`] for rendering using
    ///   [`Display`].
    ///
    /// This has the effect of creating an arbitrary [`Display`]
    ///   implementation for the wrapped object,
    ///     which will work well with [`format!`] and anything else that
    ///     does not have access to an explicit [`Formatter`].
    fn wrap<T: Display>(inner: T) -> Wrap<Self, T> {
        Wrap {
            inner,
            _phantom: PhantomData,
        }
    }
}

/// Wrapper with associated data.
pub struct Wrap<W: DisplayWrapper + ?Sized, T: Display> {
    inner: T,
    _phantom: PhantomData<W>,
}

impl<W: DisplayWrapper + ?Sized, T: Display> Display for Wrap<W, T> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        W::fmt(&self.inner, f)
    }
}

/// Echo data as-is without any wrapping.
///
/// This is primarily used at the root of a wrapper composition.
pub struct Raw;

impl DisplayWrapper for Raw {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        inner.fmt(f)
    }
}

/// Denote text that would conventionally be delimited in a teletypewriter
///   font.
///
/// This produces a markdown-style quote using backticks.
///
/// NB: This does not defend against nested quotes,
///   so this is _not_ safe against format escapes.
pub struct Tt<W: DisplayWrapper>(PhantomData<W>);

impl<W: DisplayWrapper> DisplayWrapper for Tt<W> {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        f.write_str("`")?;
        W::fmt(inner, f)?;
        f.write_str("`")
    }
}

/// Quote text that would conventionally be delimited in a teletypewriter
///   font.
pub type TtQuote = Tt<Raw>;

/// Opening tag for XML element.
pub struct OpenXmlEle;

impl DisplayWrapper for OpenXmlEle {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        write!(f, "<{inner}>")
    }
}

/// Closing tag for XML element.
pub struct CloseXmlEle;

impl DisplayWrapper for CloseXmlEle {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        write!(f, "</{inner}>")
    }
}

/// Opening tag for XML element as teletypewriter
///   (for use in sentences).
pub type TtOpenXmlEle = Tt<OpenXmlEle>;

/// Closing tag for XML element as teletypewriter
///   (for use in sentences).
pub type TtCloseXmlEle = Tt<CloseXmlEle>;

/// Wrapper for a list that maps each element to a [`DisplayWrapper`] and
///   separates each with [`ListDisplayWrapper::SEP`].
///
/// This uses the slice API for wrapping since [`Display`] takes objects by
///   non-mutable reference,
///     and so we cannot consume an iterator.
pub trait ListDisplayWrapper {
    /// Wrapper applied to each item of the list.
    type Item: DisplayWrapper;

    /// Separator placed between each pair of items.
    const SEP: &'static str;

    /// Format a slice using the provided wrappers.
    fn fmt<T: Display>(list: &[T], f: &mut Formatter) -> Result {
        for (i, x) in list.iter().enumerate() {
            if i > 0 {
                f.write_str(Self::SEP)?;
            }

            Self::Item::fmt(x, f)?;
        }

        Ok(())
    }

    /// Associate a slice with a [`ListDisplayWrapper`] for rendering using
    ///   [`Display`].
    fn wrap<T: Display>(list: &[T]) -> ListWrap<Self, T> {
        ListWrap {
            list,
            _phantom: PhantomData,
        }
    }
}

/// A slice with an associated [`ListDisplayWrapper`].
pub struct ListWrap<'a, W: ListDisplayWrapper + ?Sized, T: Display> {
    list: &'a [T],
    _phantom: PhantomData<W>,
}

impl<'a, W: ListDisplayWrapper + ?Sized, T: Display> Display
    for ListWrap<'a, W, T>
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        W::fmt(self.list, f)
    }
}

/// Rule names from the bottom of a parse stack to its top.
pub struct StackList;

impl ListDisplayWrapper for StackList {
    type Item = Raw;
    const SEP: &'static str = " > ";
}
