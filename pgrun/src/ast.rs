//! Abstract syntax trees.
//!
//! The parser builds [`AstNode`]s while reducing. A node optionally carries a
//! [`Token`] (terminal leaves always do; interior nodes do when they are named
//! by an operator or punctuation), a node-type tag, and an ordered list of
//! children. Each node exclusively owns its children, so a finished [`Ast`] is
//! a plain tree with no sharing.
//!
//! Consumers traverse trees with [`AstNode::walk`], a pre-order iterator that
//! reports each node together with its depth. Nothing on a node recurses:
//! walking, printing, comparing, cloning and dropping all keep their own
//! stacks, so a tree as deep as the input is long is safe to handle. Three
//! textual renderings are provided:
//!
//! - the indented form used by [`fmt::Display`]:
//!   ```text
//!   "+" [tt:plus] [nt:operator]
//!       "2" [tt:int_literal] [nt:int_literal]
//!       "3" [tt:int_literal] [nt:int_literal]
//!   ```
//! - a one-line parenthesized form, [`AstNode::to_parex`]: `(+ 2 3)`;
//! - a multi-line parenthesized form, [`AstNode::to_parex_multiline`].
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{AstNode, Location, Token};
//! let leaf = |s: &str| AstNode::leaf(Token::new("int_literal", s, Location::default()));
//! let plus = Token::new("plus", "+", Location::default());
//! let node = AstNode::with_token(plus, "operator", vec![leaf("2"), leaf("3")]);
//!
//! assert_eq!(node.to_parex(), "(+ 2 3)");
//! let depths: Vec<usize> = node.walk().map(|v| v.depth).collect();
//! assert_eq!(depths, [0, 1, 1]);
//! ```

use crate::{Location, Token, TypeTag};
use std::fmt::{self, Write};

/// A node of an abstract syntax tree.
#[derive(Debug)]
pub struct AstNode {
    /// The token naming this node, if any.
    pub token: Option<Token>,
    /// Node-type tag.
    pub node_type: TypeTag,
    /// Children in source order.
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Creates a terminal leaf whose node type is the token's type.
    pub fn leaf(token: Token) -> Self {
        Self {
            node_type: token.token_type.clone(),
            token: Some(token),
            children: Vec::new(),
        }
    }

    /// Creates a node named by `token`.
    pub fn with_token(token: Token, node_type: &str, children: Vec<AstNode>) -> Self {
        Self {
            token: Some(token),
            node_type: node_type.into(),
            children,
        }
    }

    /// Creates a synthetic grouping node with no token.
    pub fn interior(node_type: &str, children: Vec<AstNode>) -> Self {
        Self {
            token: None,
            node_type: node_type.into(),
            children,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the lexeme if the node carries a token, else its node type.
    pub fn text(&self) -> &str {
        match &self.token {
            Some(token) => token.lexeme.as_str(),
            None => self.node_type.as_str(),
        }
    }

    /// Returns the earliest token location in this subtree.
    pub fn start_location(&self) -> Option<Location> {
        self.walk()
            .filter_map(|visit| visit.token.map(|t| t.location))
            .min()
    }

    /// Returns the number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    /// Walks this subtree in pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Renders the subtree on one line, e.g. `(+ 2 (* 3 4))`.
    pub fn to_parex(&self) -> std::string::String {
        let mut out = std::string::String::new();
        self.parex_one_line(&mut out);
        out
    }

    /// Renders the subtree as a parenthesized expression spread over lines.
    ///
    /// Nodes whose children are all leaves stay on one line; other interior
    /// nodes open a parenthesis, list their children indented one level, and
    /// close it on a line of its own.
    pub fn to_parex_multiline(&self) -> std::string::String {
        let mut out = std::string::String::new();
        let mut pending = vec![Parex::Node(0, self)];
        while let Some(step) = pending.pop() {
            match step {
                Parex::Node(depth, node) => {
                    indent(depth, &mut out);
                    if node.children.iter().all(AstNode::is_leaf) {
                        node.parex_one_line(&mut out);
                        out.push('\n');
                    } else {
                        out.push('(');
                        out.push_str(node.text());
                        out.push('\n');
                        pending.push(Parex::Close(depth));
                        pending.extend(
                            node.children
                                .iter()
                                .rev()
                                .map(|child| Parex::Node(depth + 1, child)),
                        );
                    }
                }
                Parex::Close(depth) => {
                    indent(depth, &mut out);
                    out.push_str(")\n");
                }
                Parex::Space => out.push(' '),
            }
        }
        out
    }

    fn parex_one_line(&self, out: &mut std::string::String) {
        let mut pending = vec![Parex::Node(0, self)];
        while let Some(step) = pending.pop() {
            match step {
                Parex::Node(_, node) if node.is_leaf() => out.push_str(node.text()),
                Parex::Node(_, node) => {
                    out.push('(');
                    out.push_str(node.text());
                    pending.push(Parex::Close(0));
                    for child in node.children.iter().rev() {
                        pending.push(Parex::Node(0, child));
                        pending.push(Parex::Space);
                    }
                }
                Parex::Space => out.push(' '),
                Parex::Close(_) => out.push(')'),
            }
        }
    }
}

/// Pending output of a parenthesized rendering. Depths only matter on
/// multi-line output.
enum Parex<'a> {
    Node(usize, &'a AstNode),
    Space,
    Close(usize),
}

fn indent(depth: usize, out: &mut std::string::String) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

impl Clone for AstNode {
    fn clone(&self) -> Self {
        // Rebuild bottom-up from the reversed pre-order: every node finds
        // its children, last one first, on top of `built`.
        let mut built: Vec<AstNode> = Vec::new();
        for visit in self.walk().skip(1).collect::<Vec<_>>().into_iter().rev() {
            let mut children = built.split_off(built.len() - visit.child_count);
            children.reverse();
            built.push(AstNode {
                token: visit.node.token.clone(),
                node_type: visit.node.node_type.clone(),
                children,
            });
        }
        built.reverse();
        AstNode {
            token: self.token.clone(),
            node_type: self.node_type.clone(),
            children: built,
        }
    }
}

impl PartialEq for AstNode {
    /// Pre-order sequences with child counts determine a tree, so comparing
    /// two walks step by step compares the trees.
    fn eq(&self, other: &Self) -> bool {
        let (mut lhs, mut rhs) = (self.walk(), other.walk());
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(a), Some(b))
                    if a.child_count == b.child_count
                        && a.node_type == b.node_type
                        && a.token == b.token => {}
                _ => return false,
            }
        }
    }
}

impl Eq for AstNode {}

impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl fmt::Display for AstNode {
    /// Writes the indented multi-line form, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for visit in self.walk() {
            for _ in 0..visit.depth {
                f.write_str("    ")?;
            }
            match visit.token {
                Some(token) => write!(
                    f,
                    "\"{}\" [tt:{}] [nt:{}]",
                    token.lexeme, token.token_type, visit.node_type
                )?,
                None => write!(f, "[nt:{}]", visit.node_type)?,
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// One step of a pre-order walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Distance from the node the walk started at.
    pub depth: usize,
    pub token: Option<&'a Token>,
    pub node_type: &'a str,
    pub child_count: usize,
    pub node: &'a AstNode,
}

/// Pre-order iterator over a subtree, created by [`AstNode::walk`].
///
/// The walk keeps its own stack, so arbitrarily deep trees do not recurse.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a AstNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some(Visit {
            depth,
            token: node.token.as_ref(),
            node_type: node.node_type.as_str(),
            child_count: node.children.len(),
            node,
        })
    }
}

/// A complete tree returned by a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub root: AstNode,
}

impl Ast {
    pub fn new(root: AstNode) -> Self {
        Self { root }
    }

    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    pub fn to_parex(&self) -> std::string::String {
        self.root.to_parex()
    }

    pub fn to_parex_multiline(&self) -> std::string::String {
        self.root.to_parex_multiline()
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
