//! Tokens produced by lexers.
//!
//! A [`Token`] is a lexeme tagged with its token type and the [`Location`] where
//! it starts. Two token types are reserved:
//!
//! - [`EOF`]: synthesized once the input is exhausted; the lexeme is empty.
//! - [`ERROR`]: the lexer could not match the input; the lexeme carries a
//!   human-readable message instead of source text.
//!
//! A token type beginning with `!` is *ignored*: lexers match such tokens
//! (whitespace, comments) but never hand them out.
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{Location, Token, token};
//! let t = Token::new("int_literal", "42", Location::default());
//! assert!(!t.is_eof());
//! assert_eq!(t.to_string(), "int_literal(\"42\")");
//!
//! assert!(token::is_ignored_type("!whitespace"));
//! assert!(!token::is_ignored_type("plus"));
//! ```

use crate::Location;
use smartstring::alias::String;
use std::fmt;

/// A token-type or node-type name.
///
/// Tags are short opaque identifiers shared between the table producer and
/// the runtime, so they live inline in a [`smartstring`] whenever possible.
pub type TypeTag = String;

/// Token type of the end-of-input token.
pub const EOF: &str = "EOF";

/// Token type of the token a lexer returns on unrecognized input.
pub const ERROR: &str = "ERROR";

/// Prefix that marks a token type as ignored.
pub const IGNORED_PREFIX: char = '!';

/// Returns `true` if tokens of type `tag` are discarded by the lexer.
#[inline]
pub fn is_ignored_type(tag: &str) -> bool {
    tag.starts_with(IGNORED_PREFIX)
}

/// A lexeme with its token type and start location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token-type tag.
    pub token_type: TypeTag,
    /// Matched source text, or the message of an [`ERROR`] token.
    pub lexeme: String,
    /// Where the lexeme starts.
    pub location: Location,
}

impl Token {
    /// Creates a token.
    pub fn new(token_type: &str, lexeme: &str, location: Location) -> Self {
        Self {
            token_type: token_type.into(),
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Creates the end-of-input token.
    pub fn eof(location: Location) -> Self {
        Self::new(EOF, "", location)
    }

    /// Creates an error token carrying `message` in the lexeme slot.
    pub fn error(message: &str, location: Location) -> Self {
        Self::new(ERROR, message, location)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.token_type.as_str() == EOF
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.token_type.as_str() == ERROR
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.token_type, self.lexeme.as_str())
    }
}
