//! Hand-written recursive-descent PEMDAS parser.
//!
//! The parser reads tokens from the generated PEMDAS lexer through a
//! [`Lookahead`] and follows one function per precedence level:
//!
//! ```text
//! sum     := product (("+" | "-") product)*
//! product := power (("*" | "/" | "%") power)*
//! power   := unary ("**" unary)*       (folded to the right)
//! unary   := ("-" | "+")* atom
//! atom    := "(" sum ")" | int_literal
//! ```
//!
//! Sign and `**` chains are collected in loops, so only parentheses nest
//! calls.
//!
//! It builds exactly the tree the table-driven parser builds in default mode,
//! token locations included, and rejects input at the same token.
//!
//! # Examples
//!
//! ```rust
//! let ast = pgrun_langs::descent::parse("-2 ** 3 * 4").unwrap();
//! assert_eq!(ast.to_parex(), "(* (** (- 2) 3) 4)");
//! assert!(pgrun_langs::descent::parse("(1").is_err());
//! ```

use crate::SyntaxError;
use pgrun::{Ast, AstNode, DfaLexer, Lookahead, Token};

/// Parses a PEMDAS expression.
pub fn parse(input: &str) -> Result<Ast, SyntaxError> {
    let mut parser = Descent {
        input: Lookahead::new(crate::pemdas::tables().lexer(input)),
    };
    let root = parser.sum()?;
    parser.expect("EOF", "an operator or end of input")?;
    Ok(Ast::new(root))
}

type Rule<'a> = fn(&mut Descent<'a>) -> Result<AstNode, SyntaxError>;

struct Descent<'a> {
    input: Lookahead<DfaLexer<'a>>,
}

impl<'a> Descent<'a> {
    fn error(&self, expected: &'static str) -> SyntaxError {
        let token = self.input.peek();
        if token.is_error() {
            return SyntaxError::Lex {
                message: token.lexeme.clone(),
                location: token.location,
            };
        }
        SyntaxError::Expected {
            expected,
            token_type: token.token_type.clone(),
            lexeme: token.lexeme.clone(),
            location: token.location,
        }
    }

    fn expect(&mut self, token_type: &str, expected: &'static str) -> Result<Token, SyntaxError> {
        self.input
            .accept(token_type)
            .ok_or_else(|| self.error(expected))
    }

    /// A left-associative chain of `operand`s joined by `operators`.
    fn chain(&mut self, operators: &[&str], operand: Rule<'a>) -> Result<AstNode, SyntaxError> {
        let mut lhs = operand(self)?;
        while operators.iter().any(|op| self.input.at(op)) {
            let op = self.input.advance();
            let rhs = operand(self)?;
            lhs = AstNode::with_token(op, "operator", vec![lhs, rhs]);
        }
        Ok(lhs)
    }

    fn sum(&mut self) -> Result<AstNode, SyntaxError> {
        self.chain(&["plus", "minus"], Self::product)
    }

    fn product(&mut self) -> Result<AstNode, SyntaxError> {
        self.chain(&["times", "divide", "modulo"], Self::power)
    }

    fn power(&mut self) -> Result<AstNode, SyntaxError> {
        let mut bases = Vec::new();
        let mut node = self.unary()?;
        while let Some(op) = self.input.accept("exponentiation") {
            bases.push((node, op));
            node = self.unary()?;
        }
        while let Some((base, op)) = bases.pop() {
            node = AstNode::with_token(op, "operator", vec![base, node]);
        }
        Ok(node)
    }

    fn unary(&mut self) -> Result<AstNode, SyntaxError> {
        let mut signs = Vec::new();
        while self.input.at("minus") || self.input.at("plus") {
            signs.push(self.input.advance());
        }
        let mut node = self.atom()?;
        while let Some(sign) = signs.pop() {
            node = AstNode::with_token(sign, "unary", vec![node]);
        }
        Ok(node)
    }

    fn atom(&mut self) -> Result<AstNode, SyntaxError> {
        if let Some(literal) = self.input.accept("int_literal") {
            return Ok(AstNode::leaf(literal));
        }
        if self.input.accept("lparen").is_some() {
            let inner = self.sum()?;
            self.expect("rparen", "an operator or ')'")?;
            return Ok(inner);
        }
        Err(self.error("an integer, a sign or '('"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgrun::{AstMode, Location, ParseError};
    use proptest::prelude::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn table_parse(input: &str) -> Result<Ast, ParseError> {
        crate::pemdas::tables()
            .parse(input, AstMode::Default)
            .map(|ast| ast.expect("default mode builds a tree"))
    }

    #[test]
    fn shapes() {
        init_logger();
        for (input, expected) in [
            ("2+3", "(+ 2 3)"),
            ("2+3*4", "(+ 2 (* 3 4))"),
            ("2**3**4", "(** 2 (** 3 4))"),
            ("-2**3", "(** (- 2) 3)"),
            ("2*(3+4)", "(* 2 (+ 3 4))"),
            ("1 - 2 % 3 / 4", "(- 1 (/ (% 2 3) 4))"),
        ] {
            assert_eq!(parse(input).unwrap().to_parex(), expected, "{input}");
        }
    }

    #[test]
    fn matches_table_parser() {
        init_logger();
        for input in ["7", " (1 + 2) * -3 ** 2 # c", "((4))\n%\n+5"] {
            assert_eq!(parse(input).unwrap(), table_parse(input).unwrap(), "{input}");
        }
    }

    #[test]
    fn errors() {
        init_logger();
        let err = parse("2++").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Expected {
                expected: "an integer, a sign or '('",
                token_type: "EOF".into(),
                lexeme: "".into(),
                location: Location::new(3, 1, 4),
            }
        );
        assert_eq!(parse("(1 2").unwrap_err().location(), Location::new(3, 1, 4));
        assert!(matches!(parse("1 + @"), Err(SyntaxError::Lex { .. })));
        assert!(matches!(parse(""), Err(SyntaxError::Expected { .. })));
    }

    #[test]
    fn deep_chains() {
        init_logger();
        for input in [
            format!("{}1", "- + ".repeat(50_000)),
            format!("{}2", "2 ** -".repeat(50_000)),
        ] {
            let manual = parse(&input).unwrap();
            assert_eq!(manual, table_parse(&input).unwrap());
            assert!(manual.walk().map(|v| v.depth).max() >= Some(50_000));
        }
    }

    proptest! {
        #[test]
        fn agrees_with_table_parser(input in "([0-9]{1,3}|[-+*/%() ]|\\*\\*|\\$){0,16}") {
            match (parse(&input), table_parse(&input)) {
                (Ok(manual), Ok(generated)) => prop_assert_eq!(manual, generated),
                (Err(SyntaxError::Lex { location, .. }), Err(ParseError::Lex { location: other, .. })) => {
                    prop_assert_eq!(location, other)
                }
                (Err(SyntaxError::Expected { location, .. }), Err(err @ ParseError::Unexpected { .. })) => {
                    prop_assert_eq!(Some(location), err.location())
                }
                (manual, generated) => prop_assert!(false, "{:?} vs {:?}", manual, generated),
            }
        }
    }
}
