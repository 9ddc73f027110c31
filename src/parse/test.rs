// Tests for suspension stack parsing
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
use crate::{
    sax::{Attrs, Token, XmlSaxReader},
    span::{dummy::*, UNKNOWN_SPAN},
};
use std::fmt::{self, Display};

#[derive(Debug, PartialEq)]
struct StubError(String);

impl Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stub error: {}", self.0)
    }
}

/// Log of what rules observed.
type Ctx = Vec<String>;

type StubResult = Result<Step<Ctx, u32, StubError>, StubError>;

/// Consume tokens through the end of the element that caused the push,
///   logging nested elements.
fn element_rule() -> impl Rule<Ctx, u32, StubError> {
    let mut depth = 0usize;

    FnRule::new(
        "element",
        move |input: Resume<u32>, ctx: &mut Ctx| -> StubResult {
            Ok(match input.fresh() {
                Some(Token::ElementStart(name, ..)) => {
                    depth += 1;
                    ctx.push(format!("open {name}"));
                    Step::NeedToken
                }
                Some(Token::ElementEnd(name, _)) if depth == 0 => {
                    ctx.push(format!("close {name}"));
                    Step::Done
                }
                Some(Token::ElementEnd(..)) => {
                    depth -= 1;
                    Step::NeedToken
                }
                Some(Token::Characters(text, _)) if text == "bad" => {
                    return Err(StubError(text.clone()))
                }
                _ => Step::NeedToken,
            })
        },
    )
}

/// Push an [`element_rule`] for each top-level element and finish at the
///   end of the document.
fn doc_rule() -> impl Rule<Ctx, u32, StubError> {
    FnRule::new("doc", |input: Resume<u32>, ctx: &mut Ctx| -> StubResult {
        Ok(match input {
            Resume::Token(Token::ElementStart(name, ..)) => {
                ctx.push(format!("root {name}"));
                Step::push(element_rule())
            }
            Resume::Token(Token::DocumentEnd(..)) => Step::Done,
            Resume::Return(value) => {
                ctx.push(format!("got {value}"));
                Step::NeedToken
            }
            _ => Step::NeedToken,
        })
    })
}

/// Push a fresh copy of itself every time it is resumed.
struct Recurse;

impl Display for Recurse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recurse")
    }
}

impl Rule<Ctx, u32, StubError> for Recurse {
    fn resume(&mut self, _input: Resume<u32>, _ctx: &mut Ctx) -> StubResult {
        Ok(Step::push(Recurse))
    }
}

/// `<r><a>x</a><b><c/></b></r>`
fn doc_toks() -> Vec<Token> {
    vec![
        Token::document_start(S1),
        Token::element_start("r", Attrs::new(), S2),
        Token::element_start("a", Attrs::new(), S3),
        Token::characters("x", S4),
        Token::element_end("a", S5),
        Token::element_start("b", Attrs::new(), S6),
        Token::element_start("c", Attrs::new(), S7),
        Token::element_end("c", S8),
        Token::element_end("b", S9),
        Token::element_end("r", S10),
        Token::document_end(DUMMY_SPAN),
    ]
}

fn parse_all<T: ParserTrace>(trace: T) -> Ctx {
    let mut sut = Parser::with_trace(doc_rule(), Ctx::new(), trace);

    for tok in doc_toks() {
        sut.feed(tok).unwrap();
    }

    sut.finalize().ok().unwrap().into_context()
}

#[test]
fn stack_empties_exactly_once_at_document_end() {
    let toks = doc_toks();
    let last = toks.len() - 1;

    let mut sut = Parser::new(doc_rule(), Ctx::new());

    for (i, tok) in toks.into_iter().enumerate() {
        assert!(!sut.is_complete(), "completed before token {i}");
        sut.feed(tok).unwrap();
        assert_eq!(sut.is_complete(), i == last, "after token {i}");
    }

    assert_eq!(
        sut.finalize().ok().unwrap().into_context(),
        vec!["root r", "open a", "open b", "open c", "close r"],
    );
}

#[test]
fn depth_follows_pushes_and_pops() {
    let mut sut = Parser::new(doc_rule(), Ctx::new());

    sut.feed(Token::document_start(S1)).unwrap();
    assert_eq!(sut.depth(), 1);

    sut.feed(Token::element_start("r", Attrs::new(), S2)).unwrap();
    assert_eq!(sut.depth(), 2);
    assert_eq!(
        sut.state().describe_stack().names(),
        &["doc".to_string(), "element".to_string()],
    );

    sut.feed(Token::element_end("r", S3)).unwrap();
    assert_eq!(sut.depth(), 1);
}

#[test]
fn zero_token_chain_resolves_within_one_feed() {
    let inner = || {
        FnRule::new("b", |_: Resume<u32>, _: &mut Ctx| -> StubResult {
            Ok(Step::Return(7))
        })
    };

    let middle = move || {
        FnRule::new(
            "a",
            move |input: Resume<u32>, _: &mut Ctx| -> StubResult {
                Ok(match input {
                    Resume::Return(value) => Step::Return(value + 1),
                    _ => Step::push(inner()),
                })
            },
        )
    };

    let main =
        FnRule::new("main", move |input: Resume<u32>, ctx: &mut Ctx| {
            Ok::<_, StubError>(match input {
                Resume::Token(_) => Step::push(middle()),
                Resume::Return(value) => {
                    ctx.push(format!("got {value}"));
                    Step::NeedToken
                }
                Resume::Reentry(_) => Step::NeedToken,
            })
        });

    let mut sut =
        Parser::with_trace(main, Ctx::new(), RecordTrace::default());

    sut.feed(Token::element_start("x", Attrs::new(), S1))
        .unwrap();

    assert_eq!(sut.context(), &vec!["got 8".to_string()]);
    assert_eq!(sut.depth(), 1);
    assert_eq!(
        sut.trace().lines(),
        &[
            "tok <x>",
            "push a @2",
            "push b @3",
            "return b @2",
            "return a @1",
            "wait @1",
        ],
    );
}

#[test]
fn token_delivered_fresh_once_then_reentry() {
    let main = FnRule::new("main", |input: Resume<u32>, ctx: &mut Ctx| {
        Ok::<_, StubError>(match input {
            Resume::Token(tok @ Token::ElementStart(..)) => {
                ctx.push(format!("token {tok}"));
                Step::push(element_rule())
            }
            Resume::Token(tok) => {
                ctx.push(format!("token {tok}"));
                Step::NeedToken
            }
            Resume::Reentry(tok) => {
                ctx.push(format!("reentry {tok}"));
                Step::NeedToken
            }
            Resume::Return(_) => Step::NeedToken,
        })
    });

    let mut sut = Parser::new(main, Ctx::new());

    sut.feed(Token::element_start("x", Attrs::new(), S1))
        .unwrap();
    sut.feed(Token::element_end("x", S2)).unwrap();
    sut.feed(Token::characters("after", S3)).unwrap();

    assert_eq!(
        sut.context(),
        &vec![
            "token <x>".to_string(),
            "close x".to_string(),
            // `</x>` was delivered to the element rule,
            //   so the main rule sees it only as a reentry.
            "reentry </x>".to_string(),
            "token text \"after\"".to_string(),
        ],
    );
}

#[test]
fn main_rule_return_value_is_final_value() {
    let main = FnRule::new("main", |input: Resume<u32>, _: &mut Ctx| {
        Ok::<_, StubError>(match input.fresh() {
            Some(Token::DocumentEnd(..)) => Step::Return(42),
            _ => Step::NeedToken,
        })
    });

    let mut sut = Parser::new(main, Ctx::new());
    sut.feed(Token::document_start(S1)).unwrap();
    sut.feed(Token::document_end(S2)).unwrap();

    let (ctx, value) = sut.finalize().ok().unwrap().into_parts();
    assert_eq!(ctx, Ctx::new());
    assert_eq!(value, Some(42));
}

#[test]
fn stack_overflow_at_max_rule_depth() {
    let mut sut = Parser::with_trace(Recurse, Ctx::new(), VoidTrace);

    let tok = Token::document_start(S1);

    assert_eq!(
        sut.feed(tok.clone()),
        Err(ParseError::StackOverflow {
            max: 512,
            rule: "recurse".into(),
            tok,
        }),
    );

    assert!(sut.is_aborted());
    assert_eq!(sut.depth(), 0);
}

#[test]
fn stack_overflow_respects_custom_bound() {
    let mut sut = Parser::<Ctx, u32, StubError, RecordTrace, 4>::with_max_depth(
        Recurse,
        Ctx::new(),
        RecordTrace::default(),
    );

    let result = sut.feed(Token::document_start(S1));

    assert!(
        matches!(result, Err(ParseError::StackOverflow { max: 4, .. })),
        "unexpected result {result:?}",
    );

    // Three successful pushes atop the main rule,
    //   and then the failed attempt.
    let pushes = sut
        .trace()
        .lines()
        .iter()
        .filter(|line| line.starts_with("push"))
        .count();
    assert_eq!(pushes, 4);
}

#[test]
fn premature_end_on_empty_stack() {
    let mut sut = Parser::new(doc_rule(), Ctx::new());

    sut.feed(Token::document_start(S1)).unwrap();
    sut.feed(Token::document_end(S2)).unwrap();
    assert!(sut.is_complete());

    let tok = Token::element_end("a", S3);
    assert_eq!(sut.feed(tok.clone()), Err(ParseError::PrematureEnd(tok)));

    // No rule ran,
    //   and no further tokens are accepted.
    assert_eq!(sut.context(), &Ctx::new());
    assert_eq!(
        sut.feed(Token::element_end("b", S4)),
        Err(ParseError::Aborted),
    );
}

#[test]
fn unexpected_token_after_completion() {
    let mut sut = Parser::new(doc_rule(), Ctx::new());

    sut.feed(Token::document_end(S1)).unwrap();

    let tok = Token::element_start("late", Attrs::new(), S2);
    assert!(matches!(
        sut.feed(tok),
        Err(ParseError::UnexpectedToken(Token::ElementStart(..), _)),
    ));
}

#[test]
fn rule_failure_carries_token_and_stack() {
    let mut sut = Parser::new(doc_rule(), Ctx::new());

    sut.feed(Token::element_start("r", Attrs::new(), S1))
        .unwrap();

    let tok = Token::characters("bad", S2);

    assert_eq!(
        sut.feed(tok.clone()),
        Err(ParseError::RuleFailure {
            err: StubError("bad".into()),
            tok,
            stack: ["doc", "element"].into_iter().map(String::from).collect(),
        }),
    );

    assert!(sut.is_aborted());
    assert!(!sut.is_complete());
    assert_eq!(
        sut.feed(Token::element_end("r", S3)),
        Err(ParseError::Aborted)
    );
    assert!(matches!(sut.finalize(), Err((_, ParseError::Aborted))));
}

#[test]
fn finalize_with_suspended_rules_is_unexpected_eof() {
    let mut sut = Parser::new(doc_rule(), Ctx::new());

    sut.feed(Token::document_start(S1)).unwrap();
    sut.feed(Token::element_start("r", Attrs::new(), S2))
        .unwrap();

    match sut.finalize() {
        Err((_, ParseError::UnexpectedEof(span, stack))) => {
            assert_eq!(span, S2);
            assert_eq!(stack.top(), Some("element"));
            assert_eq!(stack.depth(), 2);
        }
        Err((_, other)) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("expected error"),
    }
}

#[test]
fn independent_parsers_yield_identical_results() {
    assert_eq!(parse_all(VoidTrace), parse_all(VoidTrace));
}

#[test]
fn tracing_does_not_affect_results() {
    let expected = parse_all(VoidTrace);

    assert_eq!(parse_all(RecordTrace::default()), expected);
    assert_eq!(parse_all(HumanReadableTrace), expected);
}

#[test]
fn record_trace_reports_errors() {
    let mut sut =
        Parser::with_trace(doc_rule(), Ctx::new(), RecordTrace::default());

    sut.feed(Token::element_start("r", Attrs::new(), S1))
        .unwrap();
    let _ = sut.feed(Token::characters("bad", S2));

    assert_eq!(
        sut.trace().lines().last().map(String::as_str),
        Some("error stub error: bad"),
    );
}

#[test]
fn parse_state_pending_result_is_single_slot() {
    let mut sut: ParseState<Ctx, u32, StubError> =
        ParseState::new(Box::new(doc_rule()));

    assert!(!sut.has_pending_result());
    sut.set_pending_result(5);
    assert!(sut.has_pending_result());
    assert_eq!(sut.take_pending_result(), Some(5));
    assert_eq!(sut.take_pending_result(), None);
}

#[test]
fn parse_state_resumes_pending_result_before_token() {
    let mut sut: ParseState<Ctx, u32, StubError> =
        ParseState::new(Box::new(doc_rule()));
    let mut ctx = Ctx::new();

    sut.set_token(Token::document_start(S1));
    sut.set_pending_result(3);

    assert!(matches!(
        sut.resume_active(&mut ctx),
        Some(Ok(Step::NeedToken))
    ));
    assert_eq!(ctx, vec!["got 3"]);

    assert_eq!(sut.pop().map(|rule| rule.to_string()), Some("doc".into()));
    assert!(sut.is_complete());
    assert!(sut.resume_active(&mut ctx).is_none());
}

#[test]
fn adapter_counts_tokens_and_elements() {
    let mut sut = SaxAdapter::new(Parser::new(doc_rule(), Ctx::new()));

    sut.start_document().unwrap();
    sut.start_element("r", Attrs::new()).unwrap();
    sut.ignorable_whitespace("\n  ").unwrap();
    sut.start_element("a", Attrs::new().with("k", "v")).unwrap();
    sut.characters("1").unwrap();
    sut.end_element("a").unwrap();
    sut.end_element("r").unwrap();
    sut.end_document().unwrap();

    assert_eq!(sut.tokens_read(), 8);
    assert_eq!(sut.elements_read(), 2);

    assert_eq!(
        sut.finalize().ok().unwrap().into_context(),
        vec!["root r", "open a", "close r"],
    );
}

#[test]
fn adapter_counts_failing_token() {
    let mut sut = SaxAdapter::new(Parser::new(doc_rule(), Ctx::new()));

    sut.start_document().unwrap();
    sut.end_document().unwrap();

    assert!(sut.end_element("x").is_err());
    assert_eq!(sut.tokens_read(), 3);
}

#[test]
fn adapter_reads_xml_document() {
    let src = "<r>\n  <a>x</a>\n  <b><c/></b>\n</r>\n";

    let mut sut = SaxAdapter::new(Parser::new(doc_rule(), Ctx::new()));
    sut.read_xml(XmlSaxReader::new(src.as_bytes())).unwrap();

    assert_eq!(sut.elements_read(), 4);
    assert!(sut.parser().is_complete());
    assert_eq!(
        sut.finalize().ok().unwrap().into_context(),
        vec!["root r", "open a", "open b", "open c", "close r"],
    );
}

#[test]
fn feed_all_stops_at_first_error() {
    let mut sut = Parser::new(doc_rule(), Ctx::new());

    let toks = vec![
        Ok(Token::document_start(UNKNOWN_SPAN)),
        Err(crate::sax::Error::Xml("bad".into(), S1)),
        Ok(Token::document_end(UNKNOWN_SPAN)),
    ];

    assert_eq!(
        sut.feed_all(toks),
        Err(ReadError::Sax(crate::sax::Error::Xml("bad".into(), S1))),
    );
    assert!(!sut.is_complete());
}

#[test]
fn error_display() {
    assert_eq!(
        ParseError::<StubError>::PrematureEnd(Token::element_end("a", S1))
            .to_string(),
        "unbalanced `</a>`: no element is open",
    );

    let stack: StackDesc =
        ["doc", "element"].into_iter().map(String::from).collect();
    assert_eq!(
        ParseError::<StubError>::UnexpectedEof(S1, stack).to_string(),
        "unexpected end of input while parsing `doc > element`",
    );
}
