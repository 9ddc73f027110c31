// Tests for SAX reader
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
use crate::sax::TokenKind;

/// Read all tokens from `src`,
///   stopping at the first error.
fn read(src: &str) -> Result<Vec<Token>> {
    XmlSaxReader::new(src.as_bytes()).collect()
}

/// Reduce each token to its kind and name or text,
///   discarding spans and attributes.
fn shape(toks: &[Token]) -> Vec<(TokenKind, &str)> {
    toks.iter()
        .map(|tok| (tok.kind(), tok.name().or(tok.text()).unwrap_or("")))
        .collect()
}

#[test]
fn document_bounded_by_start_and_end() {
    use TokenKind::*;

    let toks = read("<r><a>1</a></r>").unwrap();

    assert_eq!(
        shape(&toks),
        vec![
            (DocumentStart, ""),
            (ElementStart, "r"),
            (ElementStart, "a"),
            (Characters, "1"),
            (ElementEnd, "a"),
            (ElementEnd, "r"),
            (DocumentEnd, ""),
        ],
    );
}

#[test]
fn empty_document_yields_only_bounds() {
    use TokenKind::*;

    let toks = read("").unwrap();

    assert_eq!(shape(&toks), vec![(DocumentStart, ""), (DocumentEnd, "")]);
}

#[test]
fn empty_element_is_start_and_end() {
    use TokenKind::*;

    let toks = read("<r><x/></r>").unwrap();

    assert_eq!(
        shape(&toks),
        vec![
            (DocumentStart, ""),
            (ElementStart, "r"),
            (ElementStart, "x"),
            (ElementEnd, "x"),
            (ElementEnd, "r"),
            (DocumentEnd, ""),
        ],
    );
}

#[test]
fn whitespace_distinguished_from_characters() {
    use TokenKind::*;

    let toks = read("<r>\n  <a> x </a>\n</r>").unwrap();

    assert_eq!(
        shape(&toks),
        vec![
            (DocumentStart, ""),
            (ElementStart, "r"),
            (Whitespace, "\n  "),
            (ElementStart, "a"),
            (Characters, " x "),
            (ElementEnd, "a"),
            (Whitespace, "\n"),
            (ElementEnd, "r"),
            (DocumentEnd, ""),
        ],
    );
}

#[test]
fn attributes_unescaped_in_order() {
    let toks = read(r#"<r b="2" a="1 &amp; 2"/>"#).unwrap();

    match &toks[1] {
        Token::ElementStart(name, attrs, _) => {
            assert_eq!(name, "r");
            assert_eq!(
                attrs.iter().collect::<Vec<_>>(),
                vec![("b", "2"), ("a", "1 & 2")],
            );
        }
        other => panic!("expected element start, got {other:?}"),
    }
}

#[test]
fn text_and_cdata_unescaped() {
    let toks = read("<r>a &lt; b<![CDATA[<raw>]]></r>").unwrap();

    let text: Vec<_> = toks.iter().filter_map(Token::text).collect();
    assert_eq!(text, vec!["a < b", "<raw>"]);
}

#[test]
fn comments_and_declarations_skipped() {
    use TokenKind::*;

    let toks =
        read("<?xml version=\"1.0\"?><!-- c --><r><?pi x?><!-- c --></r>")
            .unwrap();

    assert_eq!(
        shape(&toks),
        vec![
            (DocumentStart, ""),
            (ElementStart, "r"),
            (ElementEnd, "r"),
            (DocumentEnd, ""),
        ],
    );
}

#[test]
fn mismatched_end_tag_is_not_an_error() {
    let toks = read("<a></b>").unwrap();

    assert_eq!(toks[2], Token::element_end("b", toks[2].span()));
}

#[test]
fn start_tag_span_covers_tag() {
    let toks = read(r#"<r a="1&amp;2"><x/></r>"#).unwrap();

    // `<r a="1&amp;2">`
    assert_eq!(toks[1].span(), Span::new(0, 15));

    // `<x/>`
    assert_eq!(toks[2].span(), Span::new(15, 4));
}

#[test]
fn malformed_xml_ends_stream_with_error() {
    let mut sut = XmlSaxReader::new("<r><a b=></r>".as_bytes());

    let mut saw_err = false;
    for result in sut.by_ref() {
        if let Err(e) = result {
            assert!(matches!(e, Error::Xml(..)), "unexpected error {e:?}");
            saw_err = true;
        }
    }

    assert!(saw_err, "expected an error");
    assert_eq!(sut.next(), None);
}
