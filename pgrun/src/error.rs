//! Error types for table loading and parsing.
//!
//! Parsing fails fast: the first problem aborts the parse and no partial tree
//! is returned. Failures fall into three groups:
//!
//! - [`ParseError::Lex`]: the lexer produced an `ERROR` token;
//! - [`ParseError::Unexpected`]: the action table has no entry for the current
//!   state and lookahead;
//! - [`ParseError::Internal`]: the tables are inconsistent (a missing goto, a
//!   malformed stack at accept). These are never caused by user input.
//!
//! [`TableError`] reports tables that fail validation or cannot be decoded.
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{Location, ParseError};
//! let err = ParseError::Unexpected {
//!     state: 4,
//!     token_type: "EOF".into(),
//!     lexeme: "".into(),
//!     location: Location::new(3, 1, 4),
//! };
//! assert_eq!(
//!     err.to_string(),
//!     "unexpected token EOF \"\" in state 4 at line 1 column 4"
//! );
//! assert_eq!(err.location(), Some(Location::new(3, 1, 4)));
//! ```

use crate::{Location, TypeTag};
use smartstring::alias::String;
use thiserror::Error;

/// A failed parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer could not match the input.
    #[error("lex error at {location}: {message}")]
    Lex { message: String, location: Location },

    /// No action for the lookahead in the current state.
    #[error("unexpected token {token_type} {lexeme:?} in state {state} at {location}")]
    Unexpected {
        state: usize,
        token_type: TypeTag,
        lexeme: String,
        location: Location,
    },

    /// The tables violated an invariant the runtime relies on.
    #[error("internal parser error: {0}")]
    Internal(#[from] InternalError),
}

impl ParseError {
    /// Location of the offending token, when there is one.
    pub fn location(&self) -> Option<Location> {
        match self {
            ParseError::Lex { location, .. } | ParseError::Unexpected { location, .. } => {
                Some(*location)
            }
            ParseError::Internal(_) => None,
        }
    }

    #[inline]
    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::Internal(_))
    }
}

/// Inconsistencies between the parse tables and the parser's stacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("no goto from state {state} on {nonterminal}")]
    MissingGoto { state: usize, nonterminal: TypeTag },

    #[error("reduce by unknown production {0}")]
    MissingProduction(usize),

    #[error("stack underflow: need {needed} entries, have {available}")]
    StackUnderflow { needed: usize, available: usize },

    /// Accept was reached with other than exactly one node on the stack.
    #[error("accept with {0} nodes on the stack")]
    AcceptStack(usize),

    #[error("production {production} refers to rhs index {index} of {len}")]
    BadRhsIndex {
        production: usize,
        index: usize,
        len: usize,
    },
}

/// Tables that cannot be used.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("lexer state {state}: {message}")]
    Lexer { state: usize, message: String },

    #[error("parser state {state}: {message}")]
    Parser { state: usize, message: String },

    #[error("production {production}: {message}")]
    Production { production: usize, message: String },

    #[error("malformed table document: {0}")]
    Json(#[from] serde_json::Error),
}
