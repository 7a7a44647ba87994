//! Lexer and parser tables bundled as one language.
//!
//! A [`TableSet`] pairs the DFA of a language's lexer with the LR automaton
//! of its parser, and wires them together: [`TableSet::parse`] lexes and
//! parses a string in one call. Table sets are usually built once (from
//! generated statics or a JSON document) and shared for the lifetime of the
//! program.
//!
//! A JSON table document has two top-level members, `lexer` and `parser`,
//! each in the format described in [`crate::tables`].
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{AstMode, TableSet};
//! let doc = r#"{
//!   "lexer": {
//!     "transitions": { "0": [ { "from": 48, "to": 57, "next": 1 } ],
//!                      "1": [ { "from": 48, "to": 57, "next": 1 } ] },
//!     "accepts": { "1": "int_literal" }
//!   },
//!   "parser": {
//!     "actions": { "0": { "int_literal": { "kind": "shift", "target": 1 } },
//!                  "1": { "EOF": { "kind": "accept" } } },
//!     "productions": [ { "lhs": "__start", "rhs_count": 1 } ]
//!   }
//! }"#;
//! let language = TableSet::from_json(doc).unwrap();
//! let ast = language.parse("42", AstMode::Default).unwrap().unwrap();
//! assert_eq!(ast.to_parex(), "42");
//! assert!(language.parse("4 2", AstMode::Default).is_err());
//! ```

use crate::{
    Ast, AstMode, DfaLexer, LexerTables, ParseError, ParseTables, ParseTrace, Parser, TableError,
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSet {
    pub lexer: LexerTables,
    pub parser: ParseTables,
}

impl TableSet {
    pub fn new(lexer: LexerTables, parser: ParseTables) -> Self {
        Self { lexer, parser }
    }

    /// Decodes and validates a JSON table document.
    pub fn from_json(doc: &str) -> Result<Self, TableError> {
        let tables: TableSet = serde_json::from_str(doc)?;
        log::debug!(
            "loaded tables: {} lexer states, {} parser states, {} productions",
            tables.lexer.state_count(),
            tables.parser.state_count(),
            tables.parser.productions().len()
        );
        Ok(tables)
    }

    /// A lexer over `input`.
    pub fn lexer<'a>(&'a self, input: &'a str) -> DfaLexer<'a> {
        DfaLexer::new(input, &self.lexer)
    }

    pub fn parser(&self) -> Parser<'_> {
        Parser::new(&self.parser)
    }

    /// Lexes and parses `input`.
    pub fn parse(&self, input: &str, mode: AstMode) -> Result<Option<Ast>, ParseError> {
        self.parser().parse(&mut self.lexer(input), mode)
    }

    /// Like [`parse`](Self::parse), reporting every step to `trace`.
    pub fn parse_traced<'t>(
        &'t self,
        input: &str,
        mode: AstMode,
        trace: impl ParseTrace + 't,
    ) -> Result<Option<Ast>, ParseError> {
        self.parser()
            .with_trace(trace)
            .parse(&mut self.lexer(input), mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, TraceWriter};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Digits separated by commas, folded into one "list" node:
    //   0: __start -> List
    //   1: List -> int
    //   2: List -> List comma int
    const DOC: &str = r#"{
      "lexer": {
        "transitions": {
          "0": [ { "from": 32, "to": 32, "next": 3 },
                 { "from": 44, "to": 44, "next": 2 },
                 { "from": 48, "to": 57, "next": 1 } ],
          "1": [ { "from": 48, "to": 57, "next": 1 } ],
          "3": [ { "from": 32, "to": 32, "next": 3 } ]
        },
        "accepts": { "1": "int", "2": "comma", "3": "!space" }
      },
      "parser": {
        "actions": {
          "0": { "int": { "kind": "shift", "target": 2 } },
          "1": { "EOF": { "kind": "accept" }, "comma": { "kind": "shift", "target": 3 } },
          "2": { "EOF": { "kind": "reduce", "target": 1 }, "comma": { "kind": "reduce", "target": 1 } },
          "3": { "int": { "kind": "shift", "target": 4 } },
          "4": { "EOF": { "kind": "reduce", "target": 2 }, "comma": { "kind": "reduce", "target": 2 } }
        },
        "gotos": { "0": { "List": 1 } },
        "productions": [
          { "lhs": "__start", "rhs_count": 1 },
          { "lhs": "List", "rhs_count": 1,
            "shaping": { "rule": "hint", "node_type": "list", "parent": { "literal": "list" }, "children": [0] } },
          { "lhs": "List", "rhs_count": 3,
            "shaping": { "rule": "append_children", "parent": { "child": 0 }, "children": [2] } }
        ]
      }
    }"#;

    #[test]
    fn loads_and_parses() {
        init_logger();
        let language = TableSet::from_json(DOC).unwrap();
        let ast = language.parse("1, 22 ,333", AstMode::Default).unwrap().unwrap();
        assert_eq!(ast.to_parex(), "(list 1 22 333)");
        assert_eq!(ast.root.node_type, "list");
        assert_eq!(language.parse("1,2", AstMode::NoAst), Ok(None));
    }

    #[test]
    fn lexer_uses_the_set_tables() {
        let language = TableSet::from_json(DOC).unwrap();
        let tokens = crate::tokenize(language.lexer("7 ,8"));
        let types: Vec<&str> = tokens.iter().map(|t| t.token_type.as_str()).collect();
        assert_eq!(types, ["int", "comma", "int", "EOF"]);
    }

    #[test]
    fn reports_parse_errors() {
        init_logger();
        let language = TableSet::from_json(DOC).unwrap();
        let err = language.parse("1,,2", AstMode::Default).unwrap_err();
        assert_eq!(err.location(), Some(Location::new(2, 1, 3)));
        assert!(matches!(
            language.parse("1;2", AstMode::Default),
            Err(ParseError::Lex { .. })
        ));
    }

    #[test]
    fn traced_parse_writes_lines() {
        init_logger();
        let language = TableSet::from_json(DOC).unwrap();
        let mut out = Vec::new();
        let trace = TraceWriter::new(&mut out).states(true);
        language.parse_traced("5", AstMode::Default, trace).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "STATE 0 shift(2) on int(\"5\")\n\
             STATE 2 reduce(1) on EOF(\"\")\n\
             STATE 1 accept on EOF(\"\")\n"
        );
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(
            TableSet::from_json("{\"lexer\": 1}"),
            Err(TableError::Json(_))
        ));
        let dangling = DOC.replace("\"target\": 4", "\"target\": 9");
        let err = TableSet::from_json(&dangling).unwrap_err();
        assert!(err.to_string().contains("unknown state 9"), "{err}");
        let extra = DOC.replacen('{', "{ \"version\": 2,", 1);
        assert!(TableSet::from_json(&extra).is_err());
    }

    #[test]
    fn rejects_out_of_range_state_numbers() {
        init_logger();
        let doc = r#"{
          "lexer": { "transitions": {}, "accepts": { "18446744073709551615": "x" } },
          "parser": { "actions": {}, "productions": [] }
        }"#;
        let err = TableSet::from_json(doc).unwrap_err();
        assert!(err.to_string().contains("limit"), "{err}");

        let huge_parser = DOC.replacen("\"4\": { \"EOF\"", "\"4000000000\": { \"EOF\"", 1);
        let err = TableSet::from_json(&huge_parser).unwrap_err();
        assert!(err.to_string().contains("state 4000000000"), "{err}");
    }

    #[test]
    fn new_matches_from_json() {
        let loaded = TableSet::from_json(DOC).unwrap();
        let built = TableSet::new(loaded.lexer.clone(), loaded.parser.clone());
        assert_eq!(built, loaded);
    }
}
