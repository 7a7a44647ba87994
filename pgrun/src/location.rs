//! Source locations.
//!
//! A [`Location`] records where a token starts: the byte offset into the input
//! together with a human-facing 1-based line and column. Lexers keep a running
//! location and advance it one code point at a time; tokens carry a copy.
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::Location;
//! let mut loc = Location::default();
//! for c in "ab\nc".chars() {
//!     loc.advance(c);
//! }
//! assert_eq!(loc, Location::new(4, 2, 2));
//! assert_eq!(loc.to_string(), "line 2 column 2");
//! ```

use std::fmt;

/// A position in source text.
///
/// `offset` counts bytes from the start of the input. `line` and `column` are
/// 1-based; the column counts code points, not bytes.
///
/// Locations compare by offset first, so the minimum of a set of locations
/// taken from the same input is the earliest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Location {
    /// Creates a new `Location`.
    #[inline]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Moves past the code point `c`.
    ///
    /// The offset grows by the UTF-8 width of `c`. A newline starts a new line
    /// at column 1; anything else moves one column right.
    #[inline]
    pub fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Returns a copy of this location moved past `c`.
    #[inline]
    pub fn advanced(mut self, c: char) -> Self {
        self.advance(c);
        self
    }
}

impl Default for Location {
    /// The start of the input: offset 0, line 1, column 1.
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}
