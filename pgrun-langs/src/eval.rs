//! Evaluation of PEMDAS trees.
//!
//! [`evaluate`] computes the `i64` value of a tree built by
//! [`pemdas`](crate::pemdas) in default mode (or by
//! [`descent::parse`](crate::descent::parse), which builds the same trees).
//! Division truncates toward zero and `%` takes the sign of the dividend.
//! `a ** b` with a negative `b` is `0`. Every operation is checked:
//! overflow and division by zero are errors, never wrapped or panicking.
//!
//! # Examples
//!
//! ```rust
//! assert_eq!(pgrun_langs::eval::evaluate_str("-2**3 + 7 % 4").unwrap(), -5);
//! assert!(pgrun_langs::eval::evaluate_str("1 / (2 - 2)").is_err());
//! ```

use crate::EvalError;
use pgrun::{Ast, AstMode, AstNode};

/// Evaluates a PEMDAS tree.
pub fn evaluate(ast: &Ast) -> Result<i64, EvalError> {
    evaluate_node(&ast.root)
}

/// Parses `input` with the PEMDAS tables and evaluates it.
pub fn evaluate_str(input: &str) -> Result<i64, EvalError> {
    let ast = crate::pemdas::tables()
        .parse(input, AstMode::Default)?
        .ok_or_else(|| EvalError::Unsupported {
            node_type: "empty".into(),
            text: input.into(),
        })?;
    evaluate(&ast)
}

fn operands<const N: usize>(node: &AstNode, values: &[i64]) -> Result<[i64; N], EvalError> {
    values.try_into().map_err(|_| EvalError::Arity {
        node_type: node.node_type.clone(),
        text: node.text().into(),
        expected: N,
        found: values.len(),
    })
}

fn operator(node: &AstNode) -> &str {
    node.token
        .as_ref()
        .map_or("", |token| token.token_type.as_str())
}

/// Number of operands a node of this type takes, if it is one we evaluate.
fn arity(node: &AstNode) -> Option<usize> {
    match node.node_type.as_str() {
        "int_literal" => Some(0),
        "unary" => Some(1),
        "operator" => Some(2),
        _ => None,
    }
}

enum Frame<'a> {
    Enter(&'a AstNode),
    Exit(&'a AstNode),
}

/// Evaluates a subtree with an explicit stack, operands left to right.
fn evaluate_node(root: &AstNode) -> Result<i64, EvalError> {
    let unsupported = |node: &AstNode| EvalError::Unsupported {
        node_type: node.node_type.clone(),
        text: node.text().into(),
    };
    let mut frames = vec![Frame::Enter(root)];
    let mut values: Vec<i64> = Vec::new();
    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(node) => {
                let expected = arity(node).ok_or_else(|| unsupported(node))?;
                if node.children.len() != expected {
                    return Err(EvalError::Arity {
                        node_type: node.node_type.clone(),
                        text: node.text().into(),
                        expected,
                        found: node.children.len(),
                    });
                }
                frames.push(Frame::Exit(node));
                frames.extend(node.children.iter().rev().map(Frame::Enter));
            }
            Frame::Exit(node) => {
                let at = values.len() - node.children.len();
                let value = apply(node, &values[at..])?;
                values.truncate(at);
                values.push(value);
            }
        }
    }
    values.pop().ok_or_else(|| unsupported(root))
}

/// Computes one node from the values of its children.
fn apply(node: &AstNode, values: &[i64]) -> Result<i64, EvalError> {
    let unsupported = || EvalError::Unsupported {
        node_type: node.node_type.clone(),
        text: node.text().into(),
    };
    match node.node_type.as_str() {
        "int_literal" => {
            operands::<0>(node, values)?;
            Ok(node.text().parse()?)
        }
        "unary" => {
            let [value] = operands::<1>(node, values)?;
            match operator(node) {
                "plus" => Ok(value),
                "minus" => value.checked_neg().ok_or(EvalError::Overflow {
                    lhs: 0,
                    op: "-".into(),
                    rhs: value,
                }),
                _ => Err(unsupported()),
            }
        }
        "operator" => {
            let [lhs, rhs] = operands::<2>(node, values)?;
            let op = node.text();
            let overflow = || EvalError::Overflow {
                lhs,
                op: op.into(),
                rhs,
            };
            let by_zero = || EvalError::DivisionByZero {
                lhs,
                op: op.into(),
            };
            match operator(node) {
                "plus" => lhs.checked_add(rhs).ok_or_else(overflow),
                "minus" => lhs.checked_sub(rhs).ok_or_else(overflow),
                "times" => lhs.checked_mul(rhs).ok_or_else(overflow),
                "divide" if rhs == 0 => Err(by_zero()),
                "divide" => lhs.checked_div(rhs).ok_or_else(overflow),
                "modulo" if rhs == 0 => Err(by_zero()),
                "modulo" => lhs.checked_rem(rhs).ok_or_else(overflow),
                "exponentiation" => power(lhs, rhs).ok_or_else(overflow),
                _ => Err(unsupported()),
            }
        }
        _ => Err(unsupported()),
    }
}

/// `base ** exp`, with negative exponents truncated to `0`.
fn power(base: i64, exp: i64) -> Option<i64> {
    if exp < 0 {
        return Some(0);
    }
    match base {
        0 if exp > 0 => Some(0),
        1 => Some(1),
        -1 => Some(if exp % 2 == 0 { 1 } else { -1 }),
        _ => base.checked_pow(u32::try_from(exp).ok()?),
    }
}
