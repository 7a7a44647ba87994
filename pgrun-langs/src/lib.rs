//! # pgrun-langs
//!
//! Ready-made languages for the **pgrun** runtime, and the tools that drive
//! them from the command line.
//!
//! ## Overview
//!
//! - [`pemdas`]: integer arithmetic with the usual precedence, as generated
//!   Rust tables.
//! - [`json`]: JSON, as a JSON table document loaded at first use.
//! - [`descent`]: a hand-written recursive-descent parser for the same
//!   arithmetic language, reading tokens through [`pgrun::Lookahead`].
//! - [`eval`]: evaluation of arithmetic trees with checked `i64` arithmetic.
//! - [`registry`]: the lexers and parsers the binaries know by name.
//! - [`cli`]: argument and input handling shared by the binaries.
//!
//! ## Binaries
//!
//! - `try-lex`: prints every token of its inputs.
//! - `try-parse`: parses its inputs and prints the trees, optionally tracing
//!   tokens, actions, and stacks.
//! - `pemdas-eval`: evaluates arithmetic expressions.
//!
//! ## Example
//!
//! ```rust
//! use pgrun::AstMode;
//! use pgrun_langs::{eval, pemdas};
//!
//! let ast = pemdas::tables()
//!     .parse("(1+2)-(3+4)+5", AstMode::Default)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(ast.to_parex(), "(+ (- (+ 1 2) (+ 3 4)) 5)");
//! assert_eq!(eval::evaluate(&ast).unwrap(), 1);
//! ```
pub mod cli;
pub mod descent;
pub mod error;
pub mod eval;
pub mod json;
pub mod pemdas;
pub mod registry;

pub use crate::error::{EvalError, SyntaxError};
