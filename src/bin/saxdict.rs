// Dictionary extraction from XML documents
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

//! Print the text of each child of the root element of an XML document.
//!
//! `saxdict` reads a document such as
//!
//! ```xml
//! <record>
//!   <name>Widget</name>
//!   <size>3</size>
//! </record>
//! ```
//!
//! and prints one `key<TAB>value` line per child element,
//!   sorted by key.
//! Values are printed exactly as they appear in the document,
//!   after unescaping.

extern crate saxstack;

use fxhash::FxHashMap;
use getopts::{Fail, Options};
use saxstack::{
    diagnose::{Reporter, VisualReporter},
    grammar::{Document, FillDictionary, GrammarError},
    parse::{
        Finalized, HumanReadableTrace, Parser, ParserTrace, ReadError,
        SaxAdapter, VoidTrace,
    },
    sax::XmlSaxReader,
};
use std::{
    env, fs,
    io::{self, BufWriter, Write},
};

type Dict = FxHashMap<String, String>;

/// Types of commands
#[derive(Debug, PartialEq)]
enum Command {
    Dict(DictOpts),
    Usage,
}

#[derive(Debug, PartialEq)]
struct DictOpts {
    input: String,
    trace: bool,
    stats: bool,
}

/// Counters reported by `--stats`.
struct Stats {
    tokens: usize,
    elements: usize,
}

fn dict(ctx: &mut Dict) -> &mut Dict {
    ctx
}

/// Fill a dictionary from the children of the root element of `src`.
fn read_dict<T: ParserTrace>(
    src: &str,
    trace: T,
) -> (Result<Dict, ReadError<GrammarError>>, Stats) {
    let parser: Parser<Dict, (), GrammarError, T> = Parser::with_trace(
        Document::new(FillDictionary::into_store(dict)),
        Dict::default(),
        trace,
    );

    let mut adapter = SaxAdapter::new(parser);
    let result = adapter.read_xml(XmlSaxReader::new(src.as_bytes()));

    let stats = Stats {
        tokens: adapter.tokens_read(),
        elements: adapter.elements_read(),
    };

    let result = result
        .and_then(|()| adapter.finalize().map_err(ReadError::from))
        .map(Finalized::into_context);

    (result, stats)
}

/// Write each entry of `dict` on its own line,
///   sorted by key.
fn write_dict<W: Write>(mut out: W, dict: &Dict) -> io::Result<()> {
    let mut entries: Vec<_> = dict.iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    for (key, value) in entries {
        write!(out, "{key}\t{value}\n")?;
    }

    out.flush()
}

/// Entrypoint for `saxdict`
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];
    let opts = get_opts();
    let usage = opts.usage(&format!("Usage: {} [OPTIONS] INPUT", program));

    let DictOpts {
        input,
        trace,
        stats,
    } = match parse_options(opts, args) {
        Ok(Command::Dict(dopts)) => dopts,
        Ok(Command::Usage) => {
            println!("{}", usage);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", usage);
            std::process::exit(exitcode::USAGE);
        }
    };

    let src = match fs::read_to_string(&input) {
        Ok(src) => src,
        Err(e) => {
            eprintln!("error: {input}: {e}");

            std::process::exit(match e.kind() {
                io::ErrorKind::NotFound => exitcode::NOINPUT,
                _ => exitcode::IOERR,
            });
        }
    };

    let (result, counts) = if trace {
        read_dict(&src, HumanReadableTrace)
    } else {
        read_dict(&src, VoidTrace)
    };

    if stats {
        eprintln!("tokens: {}", counts.tokens);
        eprintln!("elements: {}", counts.elements);
    }

    match result {
        Ok(dict) => {
            let stdout = io::stdout();

            if let Err(e) = write_dict(BufWriter::new(stdout.lock()), &dict) {
                eprintln!("error: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }
        Err(e) => {
            // Rendering to a string ensures buffering so that we don't
            //   interleave output between processes.
            let reporter = VisualReporter::new(&input, Some(src.as_str()));
            let report = reporter.render(&e).to_string();
            eprintln!("{report}\nfatal: failed to read `{input}`");

            std::process::exit(1);
        }
    }
}

/// Get 'Options'
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("", "trace", "trace the parser to stderr");
    opts.optflag("", "stats", "print token and element counts to stderr");
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser
fn parse_options(opts: Options, args: Vec<String>) -> Result<Command, Fail> {
    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        return Ok(Command::Usage);
    }

    let input = match matches.free.len() {
        0 => return Err(Fail::OptionMissing(String::from("INPUT"))),
        1 => matches.free[0].clone(),
        _ => return Err(Fail::UnrecognizedOption(matches.free[1].clone())),
    };

    Ok(Command::Dict(DictOpts {
        input,
        trace: matches.opt_present("trace"),
        stats: matches.opt_present("stats"),
    }))
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("program")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parse_options_help() {
        let result = parse_options(get_opts(), args(&["-h"]));
        assert_eq!(result, Ok(Command::Usage));

        let result = parse_options(get_opts(), args(&["--help"]));
        assert_eq!(result, Ok(Command::Usage));
    }

    #[test]
    fn parse_options_invalid() {
        match parse_options(get_opts(), args(&["-q"])) {
            Err(Fail::UnrecognizedOption(_)) => {}
            _ => panic!("Invalid option not caught"),
        }
    }

    #[test]
    fn parse_options_missing_input() {
        match parse_options(get_opts(), args(&[])) {
            Err(Fail::OptionMissing(message)) => {
                assert_eq!("INPUT", message);
            }
            _ => panic!("Missing input not caught"),
        }
    }

    #[test]
    fn parse_options_extra_input() {
        match parse_options(get_opts(), args(&["a.xml", "b.xml"])) {
            Err(Fail::UnrecognizedOption(name)) => {
                assert_eq!("b.xml", name);
            }
            _ => panic!("Extra input not caught"),
        }
    }

    #[test]
    fn parse_options_flags() {
        let result =
            parse_options(get_opts(), args(&["--stats", "doc.xml", "--trace"]));

        assert_eq!(
            result,
            Ok(Command::Dict(DictOpts {
                input: "doc.xml".into(),
                trace: true,
                stats: true,
            }))
        );
    }

    #[test]
    fn reads_and_sorts_dictionary() {
        let src = "<r>\n  <b>2</b>\n  <a>1</a>\n</r>\n";
        let (result, stats) = read_dict(src, VoidTrace);
        let dict = result.unwrap();

        assert_eq!(stats.elements, 3);

        let mut out = Vec::new();
        write_dict(&mut out, &dict).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\t1\nb\t2\n");
    }

    #[test]
    fn unclosed_root_fails() {
        let (result, _) = read_dict("<r><a>1</a>", VoidTrace);

        assert!(result.is_err());
    }
}
