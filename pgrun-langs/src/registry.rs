//! Named lexers and parsers for the command-line tools.
//!
//! Names carry a prefix telling how the entry was made: `g:` for generated
//! tables, `m:` for hand-written code.

use crate::{SyntaxError, descent, json, pemdas};
use pgrun::{Ast, TableSet};

/// A lexer the tools can run by name.
#[derive(Clone, Copy)]
pub struct LexerEntry {
    pub name: &'static str,
    pub help: &'static str,
    pub tables: fn() -> &'static TableSet,
}

/// How a registered parser is driven.
#[derive(Clone, Copy)]
pub enum ParserKind {
    /// Table-driven, supporting every AST mode and trace channel.
    Generated(fn() -> &'static TableSet),
    /// Hand-written; always builds the default tree and cannot be traced.
    Manual(fn(&str) -> Result<Ast, SyntaxError>),
}

/// A parser the tools can run by name.
#[derive(Clone, Copy)]
pub struct ParserEntry {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: ParserKind,
}

static LEXERS: &[LexerEntry] = &[
    LexerEntry {
        name: "g:json",
        help: "Generated JSON lexer.",
        tables: json::tables,
    },
    LexerEntry {
        name: "g:pemdas",
        help: "Generated lexer for integer arithmetic with PEMDAS operators.",
        tables: pemdas::tables,
    },
];

static PARSERS: &[ParserEntry] = &[
    ParserEntry {
        name: "g:json",
        help: "Generated JSON parser with object, pair, and array nodes.",
        kind: ParserKind::Generated(json::tables),
    },
    ParserEntry {
        name: "g:pemdas",
        help: "Generated arithmetic parser with PEMDAS precedence.",
        kind: ParserKind::Generated(pemdas::tables),
    },
    ParserEntry {
        name: "m:pemdas",
        help: "Hand-written recursive-descent arithmetic parser.",
        kind: ParserKind::Manual(descent::parse),
    },
];

/// Every registered lexer, sorted by name.
pub fn lexers() -> &'static [LexerEntry] {
    LEXERS
}

/// Every registered parser, sorted by name.
pub fn parsers() -> &'static [ParserEntry] {
    PARSERS
}

pub fn lexer(name: &str) -> Option<&'static LexerEntry> {
    LEXERS.iter().find(|entry| entry.name == name)
}

pub fn parser(name: &str) -> Option<&'static ParserEntry> {
    PARSERS.iter().find(|entry| entry.name == name)
}

/// Renders `name  help` lines for a usage message.
pub fn describe<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    entries
        .into_iter()
        .map(|(name, help)| format!("  {name:<10} {help}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgrun::{AstMode, tokenize};

    #[test]
    fn names_are_sorted_and_unique() {
        let names: Vec<&str> = lexers().iter().map(|e| e.name).collect();
        assert!(names.windows(2).all(|w| w[0] < w[1]), "{names:?}");
        let names: Vec<&str> = parsers().iter().map(|e| e.name).collect();
        assert!(names.windows(2).all(|w| w[0] < w[1]), "{names:?}");
    }

    #[test]
    fn lookup() {
        assert!(lexer("g:pemdas").is_some());
        assert!(lexer("m:pemdas").is_none());
        assert!(parser("nope").is_none());
        let tokens = tokenize((lexer("g:json").unwrap().tables)().lexer("[1]"));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn parsers_agree_on_pemdas() {
        let input = "1 + 2 ** -3";
        let ParserKind::Generated(tables) = parser("g:pemdas").unwrap().kind else {
            panic!("g:pemdas is generated");
        };
        let ParserKind::Manual(parse) = parser("m:pemdas").unwrap().kind else {
            panic!("m:pemdas is hand-written");
        };
        let generated = tables().parse(input, AstMode::Default).unwrap().unwrap();
        assert_eq!(parse(input).unwrap(), generated);
    }

    #[test]
    fn describes_entries() {
        let text = describe(lexers().iter().map(|e| (e.name, e.help)));
        assert!(text.starts_with("  g:json     Generated JSON lexer.\n"), "{text}");
        assert_eq!(text.lines().count(), lexers().len());
    }
}
