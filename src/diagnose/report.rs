// Diagnostic system rendering
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

//! Rendering of diagnostic information.

// NB: `write!` together with `\n` is preferred to `writeln!` so that there
//   is only a single sequence of characters to search for while tracking
//   down newlines,
//     rather than using both.

use super::{AnnotatedSpan, Diagnostic, Label, Level};
use crate::span::Span;
use memchr::{memchr_iter, memrchr};
use std::fmt::{self, Display};
use unicode_width::UnicodeWidthStr;

pub trait Reporter {
    /// Render diagnostic report.
    ///
    /// The provided [`Report`] implements [`Display`].
    ///
    /// Please be mindful of where this report is being rendered to
    ///   (via [`Display`]).
    /// For example,
    ///   if rendering to standard out,
    ///   it is a good idea to buffer the entire report before flushing,
    ///     otherwise the report may become interleaved with other output.
    ///
    /// This method _does not return [`Result`]_ and should never fail.
    /// Spans that cannot be resolved against the source are rendered
    ///   using their raw byte offsets instead.
    fn render<'d, D: Diagnostic>(&self, diagnostic: &'d D) -> Report<'d, D>;
}

/// Render diagnostic report in a highly visual way.
///
/// This report is modeled after Rust's default error reporting,
///   including the source line associated with each span and underlining
///   the span itself.
///
/// If no source text is available,
///   spans are reported by byte offset only.
pub struct VisualReporter<'s> {
    name: &'s str,
    src: Option<&'s str>,
}

impl<'s> VisualReporter<'s> {
    /// Reporter for a document identified as `name` whose text is `src`.
    pub fn new(name: &'s str, src: Option<&'s str>) -> Self {
        Self { name, src }
    }

    fn resolve(&self, span: Span) -> Option<ResolvedSpan<'s>> {
        let src = self.src?;

        if span.is_unknown() {
            return None;
        }

        let offset = span.offset() as usize;
        let bytes = src.as_bytes();

        if offset > bytes.len() {
            return None;
        }

        let line_start = memrchr(b'\n', &bytes[..offset]).map_or(0, |i| i + 1);
        let line_end = bytes[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |i| offset + i);

        let line_num = memchr_iter(b'\n', &bytes[..line_start]).count() + 1;

        // `get` fails on non-char boundaries,
        //   in which case the span is not one we produced.
        let prefix = src.get(line_start..offset)?;
        let line = src.get(line_start..line_end)?;
        let marked = src.get(offset..span.end().min(line_end)).unwrap_or("");

        Some(ResolvedSpan {
            line_num,
            col: prefix.width() + 1,
            line: line.trim_end_matches('\r'),
            indent: prefix.width(),
            mark_width: marked.width().max(1),
        })
    }
}

impl<'s> Reporter for VisualReporter<'s> {
    fn render<'d, D: Diagnostic>(&self, diagnostic: &'d D) -> Report<'d, D> {
        let secs: Vec<Section> = diagnostic
            .describe()
            .into_iter()
            .map(|aspan| {
                let rspan = self.resolve(aspan.span());
                Section::new(self.name, &aspan, rspan)
            })
            .collect();

        let level = secs
            .iter()
            .map(|sec| sec.level)
            .min()
            .unwrap_or_default()
            .min(Level::Error);

        Report {
            msg: diagnostic,
            secs,
            level,
        }
    }
}

/// Rendered diagnostic report.
#[derive(Debug)]
pub struct Report<'d, D: Diagnostic> {
    msg: &'d D,
    secs: Vec<Section>,
    level: Level,
}

impl<'d, D: Diagnostic> Report<'d, D> {
    /// Most severe level of all sections of this report.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl<'d, D: Diagnostic> Display for Report<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}\n", self.level, self.msg)?;

        self.secs.iter().try_for_each(|sec| sec.fmt(f))
    }
}

/// A span resolved against the source text.
#[derive(Debug, PartialEq, Eq)]
struct ResolvedSpan<'s> {
    line_num: usize,
    col: usize,
    line: &'s str,
    indent: usize,
    mark_width: usize,
}

/// A single annotated span as it will be rendered.
///
/// Sections own their text so that the report does not need to keep the
///   source or the labels alive.
#[derive(Debug, PartialEq, Eq)]
struct Section {
    level: Level,
    heading: String,
    body: Option<(usize, String, usize, usize)>,
    label: Option<String>,
}

impl Section {
    fn new(
        name: &str,
        aspan: &AnnotatedSpan,
        resolved: Option<ResolvedSpan>,
    ) -> Self {
        let label = aspan.label().map(Label::to_string);

        match resolved {
            Some(rspan) => Self {
                level: aspan.level(),
                heading: format!("{name}:{}:{}", rspan.line_num, rspan.col),
                body: Some((
                    rspan.line_num,
                    rspan.line.to_string(),
                    rspan.indent,
                    rspan.mark_width,
                )),
                label,
            },

            None => Self {
                level: aspan.level(),
                heading: format!("{name} {}", aspan.span()),
                body: None,
                label,
            },
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  --> {}\n", self.heading)?;

        match (&self.body, &self.label) {
            (Some((line_num, line, indent, width)), olabel) => {
                let gutter = " ".repeat(line_num.to_string().len());

                write!(f, "{gutter} |\n")?;
                write!(f, "{line_num} | {line}\n")?;
                write!(
                    f,
                    "{gutter} | {}{}",
                    " ".repeat(*indent),
                    "^".repeat(*width)
                )?;

                match olabel {
                    Some(label) => write!(f, " {}: {label}\n", self.level),
                    None => write!(f, "\n"),
                }
            }

            (None, Some(label)) => write!(f, "   = {}: {label}\n", self.level),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod test;
