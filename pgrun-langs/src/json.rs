//! JSON documents.
//!
//! The tables are loaded from a JSON table document compiled into the
//! binary. Trees use these shapes:
//!
//! - scalars (`string`, `number`, `true`, `false`, `null`) are leaves, with
//!   strings keeping their quotes and escapes as written;
//! - an object is a node named `{}` of type `object` whose children are
//!   `pair` nodes, each named by its `:` over the key and the value;
//! - an array is a node named `[]` of type `array` over its elements.
//!
//! # Examples
//!
//! ```rust
//! use pgrun::AstMode;
//!
//! let ast = pgrun_langs::json::tables()
//!     .parse(r#"{"a": [1, true]}"#, AstMode::Default)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(ast.to_parex(), r#"({} (: "a" ([] 1 true)))"#);
//! ```

use once_cell::sync::Lazy;
use pgrun::TableSet;

const DOCUMENT: &str = include_str!("../tables/json.json");

static TABLES: Lazy<TableSet> =
    Lazy::new(|| TableSet::from_json(DOCUMENT).expect("JSON table document is valid"));

/// The JSON lexer and parser tables.
pub fn tables() -> &'static TableSet {
    &TABLES
}
