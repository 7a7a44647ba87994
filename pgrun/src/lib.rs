//! # pgrun
//!
//! Runtime support for generated lexers and parsers.
//!
//! A parser generator turns a grammar into two sets of tables: a DFA for the
//! lexer and an LR action/goto automaton for the parser. This crate runs
//! them. It supplies the longest-match lexer, the shift/reduce driver, the
//! rules that turn reductions into a compact abstract syntax tree, and the
//! tools to inspect what happened along the way.
//!
//! ## Overview
//!
//! - [`location`]: source positions ([`Location`]).
//! - [`token`]: typed lexemes ([`Token`]) and the reserved `EOF` / `ERROR`
//!   types.
//! - [`tables`]: validated lexer and parser tables ([`LexerTables`],
//!   [`ParseTables`]), built from generated statics or decoded from JSON.
//! - [`lexer`]: the [`Lexer`] trait and its table-driven implementation
//!   [`DfaLexer`].
//! - [`lookahead`]: a one-token buffer ([`Lookahead`]) for hand-written
//!   recursive-descent parsers.
//! - [`shape`]: per-production AST shaping rules ([`Shaping`]).
//! - [`parser`]: the shift/reduce driver ([`Parser`]) and its [`AstMode`]s.
//! - [`trace`]: parse observers ([`ParseTrace`], [`TraceWriter`],
//!   [`LogTrace`]).
//! - [`ast`]: the tree ([`Ast`], [`AstNode`]), its walker and printers.
//! - [`error`]: [`ParseError`], [`InternalError`], [`TableError`].
//! - [`language`]: a lexer and parser bundled as one [`TableSet`].
//!
//! ## Example
//!
//! ```rust
//! use pgrun::{AstMode, TableSet};
//!
//! let language = TableSet::from_json(r#"{
//!   "lexer": {
//!     "transitions": { "0": [ { "from": 97, "to": 122, "next": 1 } ],
//!                      "1": [ { "from": 97, "to": 122, "next": 1 } ] },
//!     "accepts": { "1": "word" }
//!   },
//!   "parser": {
//!     "actions": { "0": { "word": { "kind": "shift", "target": 1 } },
//!                  "1": { "EOF": { "kind": "accept" } } },
//!     "productions": [ { "lhs": "__start", "rhs_count": 1 } ]
//!   }
//! }"#).unwrap();
//!
//! let ast = language.parse("hello", AstMode::Default).unwrap().unwrap();
//! assert_eq!(ast.root.node_type, "word");
//! assert_eq!(ast.to_parex(), "hello");
//! ```
//!
//! ## Logging
//!
//! The lexer and parser report through the [`log`] facade. Matches, skipped
//! tokens, and (when trace level is enabled) the parser stacks after every
//! step are logged at `trace`; table loading is logged at `debug`.
pub mod ast;
pub mod error;
pub mod language;
pub mod lexer;
pub mod location;
pub mod lookahead;
pub mod parser;
pub mod shape;
pub mod tables;
pub mod token;
pub mod trace;

pub use crate::ast::{Ast, AstNode, Visit, Walk};
pub use crate::error::{InternalError, ParseError, TableError};
pub use crate::language::TableSet;
pub use crate::lexer::{DfaLexer, Lexer, LexerStats, tokenize};
pub use crate::location::Location;
pub use crate::lookahead::Lookahead;
pub use crate::parser::{AstMode, Parser, ParserStats, UnknownAstMode};
pub use crate::shape::{ParentSource, Shaping};
pub use crate::tables::{Action, DfaRange, LexerTables, MAX_STATES, ParseTables, Production};
pub use crate::token::{Token, TypeTag};
pub use crate::trace::{LogTrace, ParseTrace, TraceWriter};
