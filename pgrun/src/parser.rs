//! Table-driven shift/reduce parsing.
//!
//! [`Parser`] runs an LR automaton described by [`ParseTables`] over the
//! tokens of any [`Lexer`] and builds an [`Ast`] as it reduces. It keeps two
//! parallel stacks: parser states, starting as `[0]`, and AST nodes, starting
//! empty. Before every decision there is exactly one more state than nodes.
//!
//! With lookahead `t` and top state `s` each step does one of:
//!
//! - **shift** `s'`: push a leaf for `t` and the state `s'`, then scan the
//!   next token;
//! - **reduce** `p`: pop the `n` right-hand-side entries of production `p`,
//!   build the node its [`Shaping`](crate::Shaping) rule describes, push it,
//!   and push `goto(top, lhs)`;
//! - **accept**: hand out the single remaining node as the tree root.
//!
//! An `ERROR` lookahead, or no action for `(s, type(t))`, aborts the parse.
//! A missing goto or a malformed stack at accept means the tables are broken
//! and is reported as [`InternalError`].
//!
//! [`AstMode`] selects how reductions build nodes: by the production's
//! shaping rule, as a full parse tree, or not at all.
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{Action, AstMode, DfaLexer, DfaRange, LexerTables, ParseTables, Parser, Production, Shaping};
//! // Sum -> Sum plus int | int
//! let lexer_tables = LexerTables::from_static(
//!     &[(0, &[DfaRange::new('+' as u32, '+' as u32, 1), DfaRange::new('0' as u32, '9' as u32, 2)]),
//!       (2, &[DfaRange::new('0' as u32, '9' as u32, 2)])],
//!     &[(1, "plus"), (2, "int")],
//! ).unwrap();
//! let parse_tables = ParseTables::from_static(
//!     &[(0, &[("int", Action::Shift(2))]),
//!       (1, &[("EOF", Action::Accept), ("plus", Action::Shift(3))]),
//!       (2, &[("EOF", Action::Reduce(2)), ("plus", Action::Reduce(2))]),
//!       (3, &[("int", Action::Shift(4))]),
//!       (4, &[("EOF", Action::Reduce(1)), ("plus", Action::Reduce(1))])],
//!     &[(0, &[("Sum", 1)])],
//!     vec![
//!         Production::new("__start", 1, Shaping::Default),
//!         Production::new("Sum", 3, Shaping::hint("operator", 1, &[0, 2])),
//!         Production::new("Sum", 1, Shaping::Default),
//!     ],
//! ).unwrap();
//!
//! let mut parser = Parser::new(&parse_tables);
//! let mut lexer = DfaLexer::new("1+2+3", &lexer_tables);
//! let ast = parser.parse(&mut lexer, AstMode::Default).unwrap().unwrap();
//! assert_eq!(ast.to_parex(), "(+ (+ 1 2) 3)");
//! ```

use crate::shape::{shape, shape_full};
use crate::{
    Action, Ast, AstNode, InternalError, Lexer, ParseError, ParseTables, ParseTrace, Token,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How reductions build AST nodes. Fixed for a whole parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AstMode {
    /// Apply each production's shaping rule.
    #[default]
    Default,
    /// Ignore shaping rules; every reduction makes a node over all of its
    /// right-hand side, typed by the production's left-hand side.
    Full,
    /// Build nothing. The parse still accepts or rejects exactly as in the
    /// other modes, but returns no tree.
    NoAst,
}

/// An [`AstMode`] name that is not `""`, `"default"`, `"fullast"` or `"noast"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown AST mode {0:?}")]
pub struct UnknownAstMode(pub String);

impl FromStr for AstMode {
    type Err = UnknownAstMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(AstMode::Default),
            "fullast" => Ok(AstMode::Full),
            "noast" => Ok(AstMode::NoAst),
            _ => Err(UnknownAstMode(s.to_string())),
        }
    }
}

impl fmt::Display for AstMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AstMode::Default => "",
            AstMode::Full => "fullast",
            AstMode::NoAst => "noast",
        })
    }
}

/// Counters for the most recent parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Tokens scanned, including the final `EOF`.
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

/// The state and node stacks.
struct Stacks {
    states: Vec<usize>,
    nodes: Vec<Option<AstNode>>,
}

impl Stacks {
    fn new() -> Self {
        Self {
            states: vec![0],
            nodes: Vec::new(),
        }
    }

    fn top(&self) -> Result<usize, InternalError> {
        self.states
            .last()
            .copied()
            .ok_or(InternalError::StackUnderflow {
                needed: 1,
                available: 0,
            })
    }

    fn push(&mut self, state: usize, node: Option<AstNode>) {
        self.states.push(state);
        self.nodes.push(node);
    }

    /// Pops the top `n` entries, returning their nodes bottom first.
    fn pop(&mut self, n: usize) -> Result<Vec<Option<AstNode>>, InternalError> {
        let available = self.nodes.len();
        if available < n {
            return Err(InternalError::StackUnderflow {
                needed: n,
                available,
            });
        }
        self.states.truncate(self.states.len() - n);
        Ok(self.nodes.split_off(available - n))
    }

    fn dump(&self, lookahead: &Token) {
        let mut output = String::new();
        for (i, state) in self.states.iter().enumerate() {
            if let Some(Some(node)) = i.checked_sub(1).and_then(|j| self.nodes.get(j)) {
                output.push_str(node.text());
                output.push_str("  ");
            }
            output.push_str(&format!("<{state}>  "));
        }
        output.push_str(&format!("<-  {lookahead}"));
        log::trace!("{output}");
    }
}

/// A shift/reduce parser over borrowed tables.
///
/// A parser can be reused for any number of parses; each call to
/// [`parse`](Parser::parse) starts from fresh stacks.
pub struct Parser<'t> {
    tables: &'t ParseTables,
    trace: Option<Box<dyn ParseTrace + 't>>,
    stats: ParserStats,
}

impl<'t> Parser<'t> {
    pub fn new(tables: &'t ParseTables) -> Self {
        Self {
            tables,
            trace: None,
            stats: ParserStats::default(),
        }
    }

    /// Attaches a trace that observes every following parse.
    pub fn with_trace(mut self, trace: impl ParseTrace + 't) -> Self {
        self.trace = Some(Box::new(trace));
        self
    }

    /// Replaces (or removes) the attached trace.
    pub fn set_trace(&mut self, trace: Option<Box<dyn ParseTrace + 't>>) {
        self.trace = trace;
    }

    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    fn scan<L: Lexer + ?Sized>(&mut self, lexer: &mut L) -> Token {
        let token = lexer.scan();
        self.stats.tokens += 1;
        if let Some(trace) = self.trace.as_mut() {
            trace.on_token(&token);
        }
        token
    }

    fn after_step(&mut self, stacks: &Stacks, lookahead: &Token) {
        if let Some(trace) = self.trace.as_mut() {
            trace.on_stack(&stacks.states, &stacks.nodes);
        }
        if log::log_enabled!(log::Level::Trace) {
            stacks.dump(lookahead);
        }
    }

    /// Parses everything `lexer` produces.
    ///
    /// Returns the tree, or `None` in [`AstMode::NoAst`]. The lexer is
    /// scanned exactly once per shift plus once for the first lookahead.
    pub fn parse<L: Lexer + ?Sized>(
        &mut self,
        lexer: &mut L,
        mode: AstMode,
    ) -> Result<Option<Ast>, ParseError> {
        self.stats = ParserStats::default();
        let tables = self.tables;
        let mut stacks = Stacks::new();
        let mut lookahead = self.scan(lexer);

        loop {
            debug_assert_eq!(stacks.states.len(), stacks.nodes.len() + 1);
            let state = stacks.top()?;

            if lookahead.is_error() {
                return Err(ParseError::Lex {
                    message: lookahead.lexeme,
                    location: lookahead.location,
                });
            }

            let Some(action) = tables.action(state, &lookahead.token_type) else {
                log::debug!("no action in state {state} for {lookahead}");
                return Err(ParseError::Unexpected {
                    state,
                    token_type: lookahead.token_type,
                    lexeme: lookahead.lexeme,
                    location: lookahead.location,
                });
            };
            if let Some(trace) = self.trace.as_mut() {
                trace.on_action(state, &action, &lookahead);
            }

            match action {
                Action::Shift(target) => {
                    let next = self.scan(lexer);
                    let token = std::mem::replace(&mut lookahead, next);
                    let node = match mode {
                        AstMode::NoAst => None,
                        AstMode::Default | AstMode::Full => Some(AstNode::leaf(token)),
                    };
                    stacks.push(target, node);
                    self.stats.shifts += 1;
                }

                Action::Reduce(index) => {
                    let production = tables
                        .production(index)
                        .ok_or(InternalError::MissingProduction(index))?;
                    // Outside NoAst mode every stack entry holds a node.
                    let rhs = stacks.pop(production.rhs_count)?.into_iter().flatten();
                    let node = match mode {
                        AstMode::NoAst => None,
                        AstMode::Full => Some(shape_full(&production.lhs, rhs.collect())),
                        AstMode::Default => Some(shape(
                            index,
                            &production.lhs,
                            &production.shaping,
                            rhs.collect(),
                        )?),
                    };
                    let top = stacks.top()?;
                    let target = tables.goto(top, &production.lhs).ok_or_else(|| {
                        InternalError::MissingGoto {
                            state: top,
                            nonterminal: production.lhs.clone(),
                        }
                    })?;
                    stacks.push(target, node);
                    self.stats.reductions += 1;
                }

                Action::Accept => {
                    if stacks.nodes.len() != 1 {
                        return Err(InternalError::AcceptStack(stacks.nodes.len()).into());
                    }
                    self.after_step(&stacks, &lookahead);
                    let root = stacks.nodes.pop().flatten();
                    return match (mode, root) {
                        (AstMode::NoAst, _) => Ok(None),
                        (_, Some(root)) => Ok(Some(Ast::new(root))),
                        (_, None) => Err(InternalError::AcceptStack(0).into()),
                    };
                }
            }

            self.after_step(&stacks, &lookahead);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DfaLexer, DfaRange, LexerTables, Location, ParentSource, Production, Shaping};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const fn one(c: char, next: usize) -> DfaRange {
        DfaRange::new(c as u32, c as u32, next)
    }

    fn lexer_tables() -> LexerTables {
        LexerTables::from_static(
            &[
                (
                    0,
                    &[
                        one(' ', 1),
                        one('(', 2),
                        one(')', 3),
                        one('+', 4),
                        DfaRange::new('0' as u32, '9' as u32, 5),
                        one('[', 6),
                        one(']', 7),
                    ],
                ),
                (1, &[one(' ', 1)]),
                (5, &[DfaRange::new('0' as u32, '9' as u32, 5)]),
            ],
            &[
                (1, "!space"),
                (2, "lparen"),
                (3, "rparen"),
                (4, "plus"),
                (5, "int"),
                (6, "lbracket"),
                (7, "rbracket"),
            ],
        )
        .unwrap()
    }

    // 0: __start -> Expr
    // 1: Expr -> Expr plus Term
    // 2: Expr -> Term
    // 3: Term -> lparen Expr rparen
    // 4: Term -> int
    // 5: Term -> lbracket Items rbracket
    // 6: Items ->
    // 7: Items -> Items int
    const ACTIONS: &[(usize, &[(&str, Action)])] = &[
        (
            0,
            &[
                ("int", Action::Shift(4)),
                ("lbracket", Action::Shift(5)),
                ("lparen", Action::Shift(3)),
            ],
        ),
        (1, &[("EOF", Action::Accept), ("plus", Action::Shift(6))]),
        (
            2,
            &[
                ("EOF", Action::Reduce(2)),
                ("plus", Action::Reduce(2)),
                ("rparen", Action::Reduce(2)),
            ],
        ),
        (
            3,
            &[
                ("int", Action::Shift(4)),
                ("lbracket", Action::Shift(5)),
                ("lparen", Action::Shift(3)),
            ],
        ),
        (
            4,
            &[
                ("EOF", Action::Reduce(4)),
                ("plus", Action::Reduce(4)),
                ("rparen", Action::Reduce(4)),
            ],
        ),
        (5, &[("int", Action::Reduce(6)), ("rbracket", Action::Reduce(6))]),
        (
            6,
            &[
                ("int", Action::Shift(4)),
                ("lbracket", Action::Shift(5)),
                ("lparen", Action::Shift(3)),
            ],
        ),
        (7, &[("plus", Action::Shift(6)), ("rparen", Action::Shift(10))]),
        (8, &[("int", Action::Shift(12)), ("rbracket", Action::Shift(11))]),
        (
            9,
            &[
                ("EOF", Action::Reduce(1)),
                ("plus", Action::Reduce(1)),
                ("rparen", Action::Reduce(1)),
            ],
        ),
        (
            10,
            &[
                ("EOF", Action::Reduce(3)),
                ("plus", Action::Reduce(3)),
                ("rparen", Action::Reduce(3)),
            ],
        ),
        (
            11,
            &[
                ("EOF", Action::Reduce(5)),
                ("plus", Action::Reduce(5)),
                ("rparen", Action::Reduce(5)),
            ],
        ),
        (12, &[("int", Action::Reduce(7)), ("rbracket", Action::Reduce(7))]),
    ];

    const GOTOS: &[(usize, &[(&str, usize)])] = &[
        (0, &[("Expr", 1), ("Term", 2)]),
        (3, &[("Expr", 7), ("Term", 2)]),
        (5, &[("Items", 8)]),
        (6, &[("Term", 9)]),
    ];

    fn productions() -> Vec<Production> {
        vec![
            Production::new("__start", 1, Shaping::Default),
            Production::new("Expr", 3, Shaping::hint("operator", 1, &[0, 2])),
            Production::new("Expr", 1, Shaping::Default),
            Production::new("Term", 3, Shaping::Passthrough { index: 1 }),
            Production::new("Term", 1, Shaping::Default),
            Production::new(
                "Term",
                3,
                Shaping::AdoptGrandchildren {
                    parent: ParentSource::Literal("[]".into()),
                    children: vec![1],
                    node_type: Some("list".into()),
                },
            ),
            Production::new("Items", 0, Shaping::Default),
            Production::new(
                "Items",
                2,
                Shaping::AppendChildren {
                    parent: ParentSource::Child(0),
                    children: vec![1],
                    node_type: None,
                },
            ),
        ]
    }

    fn parse_tables() -> ParseTables {
        ParseTables::from_static(ACTIONS, GOTOS, productions()).unwrap()
    }

    fn run(input: &str, mode: AstMode) -> Result<Option<Ast>, ParseError> {
        init_logger();
        let lexer_tables = lexer_tables();
        let parse_tables = parse_tables();
        let mut lexer = DfaLexer::new(input, &lexer_tables);
        Parser::new(&parse_tables).parse(&mut lexer, mode)
    }

    fn parex(input: &str, mode: AstMode) -> String {
        run(input, mode).unwrap().unwrap().to_parex()
    }

    #[test]
    fn ast_mode_names() {
        assert_eq!("".parse::<AstMode>(), Ok(AstMode::Default));
        assert_eq!("default".parse::<AstMode>(), Ok(AstMode::Default));
        assert_eq!("fullast".parse::<AstMode>(), Ok(AstMode::Full));
        assert_eq!("noast".parse::<AstMode>(), Ok(AstMode::NoAst));
        let err = "tree".parse::<AstMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown AST mode \"tree\"");
        for mode in [AstMode::Default, AstMode::Full, AstMode::NoAst] {
            assert_eq!(mode.to_string().parse::<AstMode>(), Ok(mode));
        }
    }

    #[test]
    fn shapes_operator_chain() {
        assert_eq!(parex("1+2", AstMode::Default), "(+ 1 2)");
        assert_eq!(parex("1 + 2 + 3", AstMode::Default), "(+ (+ 1 2) 3)");
        assert_eq!(parex("1+(2+3)", AstMode::Default), "(+ 1 (+ 2 3))");
        assert_eq!(parex("((7))", AstMode::Default), "7");
    }

    #[test]
    fn operator_node_carries_token() {
        let ast = run("1+2", AstMode::Default).unwrap().unwrap();
        let token = ast.root.token.as_ref().unwrap();
        assert_eq!(ast.root.node_type, "operator");
        assert_eq!(token.token_type, "plus");
        assert_eq!(token.location, Location::new(1, 1, 2));
        assert_eq!(ast.root.children[0].node_type, "int");
    }

    #[test]
    fn list_adopts_appended_items() {
        let ast = run(" [1 2 3]", AstMode::Default).unwrap().unwrap();
        assert_eq!(ast.to_parex(), "([] 1 2 3)");
        assert_eq!(ast.root.node_type, "list");
        let token = ast.root.token.as_ref().unwrap();
        assert_eq!(token.token_type, "[]");
        assert_eq!(token.location, Location::new(1, 1, 2));

        let empty = run("[]", AstMode::Default).unwrap().unwrap();
        assert_eq!(empty.root.node_type, "list");
        assert!(empty.root.children.is_empty());
    }

    #[test]
    fn full_mode_keeps_every_reduction() {
        assert_eq!(
            parex("1+2", AstMode::Full),
            "(Expr (Expr (Term 1)) + (Term 2))"
        );
        assert_eq!(
            parex("[4]", AstMode::Full),
            "(Expr (Term [ (Items Items 4) ]))"
        );
        let ast = run("(1)", AstMode::Full).unwrap().unwrap();
        for visit in ast.walk() {
            if visit.token.is_none() {
                assert!(["Expr", "Term", "Items"].contains(&visit.node_type));
            }
        }
    }

    #[test]
    fn noast_accepts_and_rejects_alike() {
        for input in ["1", "1+2", "(1+[2 3])+4", "[]", "1+", ")", "(1", "1 $"] {
            let default = run(input, AstMode::Default);
            let none = run(input, AstMode::NoAst);
            match (default, none) {
                (Ok(Some(_)), Ok(None)) => {}
                (Err(a), Err(b)) => assert_eq!(a, b),
                other => panic!("{input:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn unexpected_eof() {
        let err = run("1+", AstMode::Default).unwrap_err();
        assert_eq!(
            err,
            ParseError::Unexpected {
                state: 6,
                token_type: "EOF".into(),
                lexeme: "".into(),
                location: Location::new(2, 1, 3),
            }
        );
    }

    #[test]
    fn unexpected_token() {
        let err = run("1 2", AstMode::Default).unwrap_err();
        let ParseError::Unexpected {
            token_type, lexeme, ..
        } = &err
        else {
            panic!("expected unexpected-token error, got {err:?}");
        };
        assert_eq!(token_type, "int");
        assert_eq!(lexeme, "2");
        assert_eq!(err.location(), Some(Location::new(2, 1, 3)));
    }

    #[test]
    fn lexer_error_aborts() {
        let err = run("1+$", AstMode::Full).unwrap_err();
        assert_eq!(
            err,
            ParseError::Lex {
                message: "unrecognized input '$'".into(),
                location: Location::new(2, 1, 3),
            }
        );
        assert!(matches!(
            run("$", AstMode::Default),
            Err(ParseError::Lex { .. })
        ));
    }

    #[test]
    fn empty_input_is_rejected_by_this_grammar() {
        for (input, offset) in [("", 0), ("  ", 2)] {
            let err = run(input, AstMode::Default).unwrap_err();
            assert!(matches!(err, ParseError::Unexpected { state: 0, .. }));
            assert_eq!(err.location().map(|l| l.offset), Some(offset));
        }
    }

    #[test]
    fn missing_goto_is_internal() {
        init_logger();
        let gotos: &[(usize, &[(&str, usize)])] = &[(0, &[("Expr", 1), ("Term", 2)])];
        let parse_tables = ParseTables::from_static(ACTIONS, gotos, productions()).unwrap();
        let lexer_tables = lexer_tables();
        let mut lexer = DfaLexer::new("1+2", &lexer_tables);
        let err = Parser::new(&parse_tables)
            .parse(&mut lexer, AstMode::Default)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Internal(InternalError::MissingGoto {
                state: 6,
                nonterminal: "Term".into(),
            })
        );
    }

    #[test]
    fn accept_needs_one_node() {
        init_logger();
        let actions: &[(usize, &[(&str, Action)])] = &[(0, &[("EOF", Action::Accept)])];
        let parse_tables = ParseTables::from_static(actions, &[], productions()).unwrap();
        let lexer_tables = lexer_tables();
        let mut lexer = DfaLexer::new("", &lexer_tables);
        let err = Parser::new(&parse_tables)
            .parse(&mut lexer, AstMode::NoAst)
            .unwrap_err();
        assert_eq!(err, ParseError::Internal(InternalError::AcceptStack(0)));
    }

    #[test]
    fn counts_steps() {
        init_logger();
        let lexer_tables = lexer_tables();
        let parse_tables = parse_tables();
        let mut parser = Parser::new(&parse_tables);
        let mut lexer = DfaLexer::new("1+2", &lexer_tables);
        parser.parse(&mut lexer, AstMode::Default).unwrap();
        assert_eq!(
            parser.stats(),
            ParserStats {
                tokens: 4,
                shifts: 3,
                reductions: 4,
            }
        );
        let mut lexer = DfaLexer::new("7", &lexer_tables);
        parser.parse(&mut lexer, AstMode::Default).unwrap();
        assert_eq!(parser.stats().shifts, 1);
    }

    #[derive(Default)]
    struct Recorder {
        tokens: Vec<String>,
        actions: Vec<String>,
        depths: Vec<(usize, usize)>,
    }

    impl ParseTrace for Recorder {
        fn on_token(&mut self, token: &Token) {
            self.tokens.push(token.token_type.to_string());
        }

        fn on_action(&mut self, state: usize, action: &Action, _lookahead: &Token) {
            self.actions.push(format!("{state}:{action}"));
        }

        fn on_stack(&mut self, states: &[usize], nodes: &[Option<AstNode>]) {
            self.depths.push((states.len(), nodes.len()));
        }
    }

    #[test]
    fn trace_sees_every_step() {
        init_logger();
        let lexer_tables = lexer_tables();
        let parse_tables = parse_tables();
        let mut recorder = Recorder::default();
        {
            let mut parser = Parser::new(&parse_tables).with_trace(&mut recorder);
            let mut lexer = DfaLexer::new("1 + 2", &lexer_tables);
            parser.parse(&mut lexer, AstMode::Default).unwrap();
        }
        assert_eq!(recorder.tokens, ["int", "plus", "int", "EOF"]);
        assert_eq!(
            recorder.actions,
            [
                "0:shift(4)",
                "4:reduce(4)",
                "2:reduce(2)",
                "1:shift(6)",
                "6:shift(4)",
                "4:reduce(4)",
                "9:reduce(1)",
                "1:accept",
            ]
        );
        // One report per shift and reduce, and the final stack at accept.
        assert_eq!(recorder.depths.len(), 8);
        assert_eq!(recorder.depths.last(), Some(&(2, 1)));
        for (states, nodes) in recorder.depths {
            assert_eq!(states, nodes + 1);
        }
    }

    #[test]
    fn parses_through_a_lookahead() {
        init_logger();
        let lexer_tables = lexer_tables();
        let parse_tables = parse_tables();
        let mut input = crate::Lookahead::new(DfaLexer::new("(1+2)", &lexer_tables));
        assert!(input.at("lparen"));
        let ast = Parser::new(&parse_tables)
            .parse(&mut input, AstMode::Default)
            .unwrap()
            .unwrap();
        assert_eq!(ast.to_parex(), "(+ 1 2)");
    }
}
