// Tests for diagnostic system rendering
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

use super::*;
use crate::{diagnose::Annotate, span::UNKNOWN_SPAN};
use std::error::Error;

#[derive(Debug)]
struct StubError(Vec<AnnotatedSpan<'static>>);

impl Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stub error")
    }
}

impl Error for StubError {}

impl Diagnostic for StubError {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        self.0.clone()
    }
}

const SRC: &str = "<r>\n  <a>1</a>\n  <b>x</b>\n</r>\n";

#[test]
fn renders_source_line_with_underline() {
    // `<b>` on the third line.
    let span = Span::new(17, 3);
    let err = StubError(vec![span.error("unexpected element")]);

    let sut = VisualReporter::new("doc.xml", Some(SRC));

    assert_eq!(
        sut.render(&err).to_string(),
        "error: stub error\n  \
           --> doc.xml:3:3\n  \
            |\n\
          3 |   <b>x</b>\n  \
            |   ^^^ error: unexpected element\n",
    );
}

#[test]
fn renders_offset_without_source() {
    let span = Span::new(16, 3);
    let err = StubError(vec![span.note("element opened here")]);

    let sut = VisualReporter::new("doc.xml", None);

    assert_eq!(
        sut.render(&err).to_string(),
        "error: stub error\n  \
           --> doc.xml [offset 16-19]\n   \
            = note: element opened here\n",
    );
}

#[test]
fn unknown_span_is_not_resolved() {
    let err = StubError(vec![UNKNOWN_SPAN.mark_error()]);

    let sut = VisualReporter::new("doc.xml", Some(SRC));

    assert_eq!(
        sut.render(&err).to_string(),
        "error: stub error\n  --> doc.xml [unknown offset]\n",
    );
}

#[test]
fn internal_error_raises_report_level() {
    let err =
        StubError(vec![Span::new(0, 3).internal_error("this is our fault")]);

    let sut = VisualReporter::new("doc.xml", Some(SRC));

    assert_eq!(sut.render(&err).level(), Level::InternalError);
}

#[test]
fn zero_length_span_marks_one_column() {
    // End of the first line.
    let err = StubError(vec![Span::new(3, 0).mark_error()]);

    let sut = VisualReporter::new("doc.xml", Some(SRC));

    assert_eq!(
        sut.render(&err).to_string(),
        "error: stub error\n  \
           --> doc.xml:1:4\n  \
            |\n\
          1 | <r>\n  \
            |    ^\n",
    );
}
