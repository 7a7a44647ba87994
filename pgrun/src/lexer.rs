//! DFA-driven lexing.
//!
//! The [`Lexer`] trait is the single contract between token sources and
//! parsers: every call to [`Lexer::scan`] returns exactly one [`Token`].
//! [`DfaLexer`] implements it over a [`LexerTables`] automaton using the
//! longest-match rule:
//!
//! 1. Starting at the current location, run the DFA from state 0 one code
//!    point at a time, remembering the last accepting state reached and the
//!    location just past it.
//! 2. Stop at the first code point with no transition, or at end of input.
//! 3. With no accepting state seen, return an `ERROR` token naming the first
//!    code point; the location does not move.
//! 4. Otherwise cut the lexeme up to the last accept and move past it. If the
//!    accepted token type is ignored (`!` prefix) start over from there,
//!    else return the token.
//!
//! Once the input is exhausted every call returns `EOF` at the same location.
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{DfaLexer, DfaRange, Lexer, LexerTables};
//! let tables = LexerTables::from_static(
//!     &[(0, &[DfaRange::new(' ' as u32, ' ' as u32, 2), DfaRange::new('a' as u32, 'z' as u32, 1)]),
//!       (1, &[DfaRange::new('a' as u32, 'z' as u32, 1)])],
//!     &[(1, "word"), (2, "!space")],
//! ).unwrap();
//!
//! let mut lexer = DfaLexer::new("hello  world", &tables);
//! assert_eq!(lexer.scan().lexeme, "hello");
//! assert_eq!(lexer.scan().lexeme, "world");
//! assert!(lexer.scan().is_eof());
//! ```

use crate::token::{self, Token};
use crate::{LexerTables, Location};

/// A source of tokens.
pub trait Lexer {
    /// Returns the next token.
    ///
    /// Never skips a call: past the end of input this keeps returning `EOF`.
    fn scan(&mut self) -> Token;
}

impl<L: Lexer + ?Sized> Lexer for &mut L {
    #[inline]
    fn scan(&mut self) -> Token {
        (**self).scan()
    }
}

impl<L: Lexer + ?Sized> Lexer for Box<L> {
    #[inline]
    fn scan(&mut self) -> Token {
        (**self).scan()
    }
}

/// Counters kept by [`DfaLexer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerStats {
    /// Code points consumed by DFA transitions, including those later
    /// re-scanned after a shorter match won.
    pub chars: usize,
    /// Matches, ignored ones included.
    pub matches: usize,
    /// Matches discarded because their type is ignored.
    pub ignored: usize,
    /// `ERROR` tokens returned.
    pub errors: usize,
}

/// A longest-match lexer over borrowed input and tables.
#[derive(Debug, Clone)]
pub struct DfaLexer<'a> {
    input: &'a str,
    tables: &'a LexerTables,
    location: Location,
    stats: LexerStats,
}

impl<'a> DfaLexer<'a> {
    pub fn new(input: &'a str, tables: &'a LexerTables) -> Self {
        Self {
            input,
            tables,
            location: Location::default(),
            stats: LexerStats::default(),
        }
    }

    /// Where the next scan starts.
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Input not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.location.offset..]
    }

    pub fn stats(&self) -> LexerStats {
        self.stats.clone()
    }

    /// Runs the DFA from the current location.
    ///
    /// Returns the accepted token type and the location just past the
    /// longest accepted prefix.
    fn longest_match(&mut self) -> Option<(&'a str, Location)> {
        let tables = self.tables;
        let mut state = 0;
        let mut here = self.location;
        let mut last = None;
        for c in self.remaining().chars() {
            let Some(next) = tables.next_state(state, c) else {
                break;
            };
            self.stats.chars += 1;
            state = next;
            here.advance(c);
            if let Some(tag) = tables.accept(state) {
                last = Some((tag, here));
            }
        }
        last
    }
}

impl Lexer for DfaLexer<'_> {
    fn scan(&mut self) -> Token {
        loop {
            let start = self.location;
            let Some(c) = self.remaining().chars().next() else {
                return Token::eof(start);
            };

            let Some((token_type, end)) = self.longest_match() else {
                self.stats.errors += 1;
                log::trace!("lex error at {start}: {c:?}");
                return Token::error(&format!("unrecognized input {c:?}"), start);
            };

            let lexeme = &self.input[start.offset..end.offset];
            self.location = end;
            self.stats.matches += 1;

            if token::is_ignored_type(token_type) {
                self.stats.ignored += 1;
                log::trace!("skip {token_type} {lexeme:?} at {start}");
                continue;
            }
            log::trace!("match {token_type} {lexeme:?} at {start}");
            return Token::new(token_type, lexeme, start);
        }
    }
}

/// Scans until `EOF` or `ERROR`, returning every token including that last one.
pub fn tokenize<L: Lexer>(mut lexer: L) -> Vec<Token> {
    let mut tokens = Vec::new();
    loop {
        let token = lexer.scan();
        let done = token.is_eof() || token.is_error();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
