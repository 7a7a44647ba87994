//! # Evaluation Error Type
//!
//! [`EvalError`] covers everything that can go wrong between source text and
//! an integer result: the parse itself, integer literals that do not fit,
//! arithmetic that overflows or divides by zero, and trees that do not have
//! the shape the evaluator expects.
//!
//! [`SyntaxError`] is what the hand-written recursive-descent parser reports.
//!
//! Parse and literal failures convert with `#[from]`, so `?` works directly
//! on [`pgrun::ParseError`] and [`std::num::ParseIntError`].
use pgrun::{Location, ParseError, TypeTag};
use smartstring::alias::String;
use thiserror::Error;

/// A failed evaluation.
///
/// # Examples
///
/// ```rust
/// # use pgrun_langs::EvalError;
/// # fn demo(s: &str) -> Result<i64, EvalError> {
/// let n: i64 = s.parse()?; // ParseIntError -> EvalError via #[from]
/// # Ok(n) }
/// assert!(matches!(demo("x"), Err(EvalError::ParseInt(_))));
/// ```
#[derive(Debug, Error)]
pub enum EvalError {
    /// The input did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An integer literal does not fit in `i64`.
    #[error("unable to parse integer literal: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("integer overflow in {lhs} {op} {rhs}")]
    Overflow { lhs: i64, op: String, rhs: i64 },

    #[error("division by zero in {lhs} {op} 0")]
    DivisionByZero { lhs: i64, op: String },

    /// A node the evaluator does not know how to compute.
    #[error("cannot evaluate {node_type} node {text:?}")]
    Unsupported { node_type: String, text: String },

    /// A node with the wrong number of children.
    #[error("{node_type} node {text:?} has {found} children, expected {expected}")]
    Arity {
        node_type: String,
        text: String,
        expected: usize,
        found: usize,
    },
}

/// A rejected input in a hand-written parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("lex error at {location}: {message}")]
    Lex { message: String, location: Location },

    #[error("expected {expected} but found {token_type} {lexeme:?} at {location}")]
    Expected {
        expected: &'static str,
        token_type: TypeTag,
        lexeme: String,
        location: Location,
    },
}

impl SyntaxError {
    pub fn location(&self) -> Location {
        match self {
            SyntaxError::Lex { location, .. } | SyntaxError::Expected { location, .. } => *location,
        }
    }
}
