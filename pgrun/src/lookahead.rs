//! One-token lookahead over any [`Lexer`].
//!
//! Hand-written recursive-descent parsers need to look at the next token
//! before deciding which rule to follow. [`Lookahead`] buffers exactly one
//! token: construction scans it, [`peek`](Lookahead::peek) shows it, and
//! [`advance`](Lookahead::advance) hands it out and scans its successor.
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{DfaLexer, DfaRange, LexerTables, Lookahead};
//! let tables = LexerTables::from_static(
//!     &[(0, &[DfaRange::new('a' as u32, 'z' as u32, 1)])],
//!     &[(1, "letter")],
//! ).unwrap();
//! let mut input = Lookahead::new(DfaLexer::new("ab", &tables));
//! assert_eq!(input.peek().lexeme, "a");
//! assert_eq!(input.advance().lexeme, "a");
//! assert_eq!(input.peek().lexeme, "b");
//! ```

use crate::{Lexer, Token};

pub struct Lookahead<L> {
    lexer: L,
    next: Token,
}

impl<L: Lexer> Lookahead<L> {
    /// Wraps `lexer`, scanning the first token immediately.
    pub fn new(mut lexer: L) -> Self {
        let next = lexer.scan();
        Self { lexer, next }
    }

    /// The buffered token.
    #[inline]
    pub fn peek(&self) -> &Token {
        &self.next
    }

    /// Returns the buffered token and buffers the one after it.
    pub fn advance(&mut self) -> Token {
        let following = self.lexer.scan();
        std::mem::replace(&mut self.next, following)
    }

    /// Returns `true` if the buffered token has type `token_type`.
    #[inline]
    pub fn at(&self, token_type: &str) -> bool {
        self.next.token_type.as_str() == token_type
    }

    /// Consumes the buffered token if it has type `token_type`.
    pub fn accept(&mut self, token_type: &str) -> Option<Token> {
        self.at(token_type).then(|| self.advance())
    }

    /// Gives back the underlying lexer. The buffered token is dropped.
    pub fn into_inner(self) -> L {
        self.lexer
    }
}

/// Scanning through a lookahead drains the buffer first, so a table-driven
/// parser can pick up where a hand-written one left off.
impl<L: Lexer> Lexer for Lookahead<L> {
    fn scan(&mut self) -> Token {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DfaLexer, DfaRange, LexerTables, Location};

    fn tables() -> LexerTables {
        LexerTables::from_static(
            &[
                (
                    0,
                    &[
                        DfaRange::new(' ' as u32, ' ' as u32, 2),
                        DfaRange::new('0' as u32, '9' as u32, 1),
                    ],
                ),
                (1, &[DfaRange::new('0' as u32, '9' as u32, 1)]),
            ],
            &[(1, "int"), (2, "!space")],
        )
        .unwrap()
    }

    #[test]
    fn peek_does_not_consume() {
        let tables = tables();
        let input = Lookahead::new(DfaLexer::new("12 34", &tables));
        assert_eq!(input.peek().lexeme, "12");
        assert_eq!(input.peek().lexeme, "12");
        assert!(input.at("int"));
        assert!(!input.at("EOF"));
    }

    #[test]
    fn advance_walks_the_stream() {
        let tables = tables();
        let mut input = Lookahead::new(DfaLexer::new("12 34", &tables));
        let first = input.advance();
        assert_eq!(first.lexeme, "12");
        assert_eq!(input.peek().location, Location::new(3, 1, 4));
        assert_eq!(input.advance().lexeme, "34");
        assert!(input.peek().is_eof());
        assert!(input.advance().is_eof());
        assert!(input.peek().is_eof());
    }

    #[test]
    fn accept_matches_type() {
        let tables = tables();
        let mut input = Lookahead::new(DfaLexer::new("7", &tables));
        assert!(input.accept("plus").is_none());
        assert_eq!(input.accept("int").map(|t| t.lexeme), Some("7".into()));
        assert!(input.at("EOF"));
    }

    #[test]
    fn scans_like_its_lexer() {
        let tables = tables();
        let direct = crate::lexer::tokenize(DfaLexer::new("1 22 333", &tables));
        let buffered = crate::lexer::tokenize(Lookahead::new(DfaLexer::new("1 22 333", &tables)));
        assert_eq!(direct, buffered);
    }

    #[test]
    fn into_inner_returns_lexer() {
        let tables = tables();
        let input = Lookahead::new(DfaLexer::new("1 22", &tables));
        let lexer = input.into_inner();
        assert_eq!(lexer.location(), Location::new(1, 1, 2));
    }
}
