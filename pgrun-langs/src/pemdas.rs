//! Integer arithmetic with the usual precedence.
//!
//! | Level | Operators | Associativity |
//! |---|---|---|
//! | lowest | `+` `-` | left |
//! | | `*` `/` `%` | left |
//! | | `**` | right |
//! | highest | unary `-` `+` | prefix |
//!
//! The operand left of `**` may carry unary signs, so `-2**3` groups as
//! `(-2)**3` while `2**-3` raises to `-3`. Parentheses group. Whitespace and
//! `#` comments (up to the end of the line) are skipped.
//!
//! Trees produced in default mode use three node types: `int_literal`
//! leaves, binary `operator` nodes named by the operator token, and `unary`
//! nodes named by the sign token. Parentheses leave no trace.
//!
//! # Examples
//!
//! ```rust
//! use pgrun::AstMode;
//!
//! let ast = pgrun_langs::pemdas::tables()
//!     .parse("1 + 2 * 3", AstMode::Default)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(ast.to_parex(), "(+ 1 (* 2 3))");
//! ```

mod tables;

use once_cell::sync::Lazy;
use pgrun::{LexerTables, ParseTables, TableSet};

static TABLES: Lazy<TableSet> = Lazy::new(|| {
    TableSet::new(
        LexerTables::from_static(tables::TRANSITIONS, tables::ACCEPTS)
            .expect("PEMDAS lexer tables are valid"),
        ParseTables::from_static(tables::ACTIONS, tables::GOTOS, tables::productions())
            .expect("PEMDAS parse tables are valid"),
    )
});

/// The PEMDAS lexer and parser tables.
pub fn tables() -> &'static TableSet {
    &TABLES
}
