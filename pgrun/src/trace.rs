//! Parser trace hooks.
//!
//! A [`ParseTrace`] observes a parse without influencing it. The parser
//! reports three kinds of events:
//!
//! - [`on_token`](ParseTrace::on_token): a token was scanned into the
//!   lookahead;
//! - [`on_action`](ParseTrace::on_action): an action was chosen for the
//!   current state and lookahead;
//! - [`on_stack`](ParseTrace::on_stack): the stacks after a shift or reduce,
//!   and the one-node stack on accept.
//!
//! All methods default to doing nothing, so an implementation only overrides
//! what it cares about. Two implementations are provided: [`TraceWriter`],
//! which prints selected events as text lines, and [`LogTrace`], which sends
//! the same lines to the `log` facade at trace level.
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{Action, Location, ParseTrace, Token, TraceWriter};
//! let mut out = Vec::new();
//! {
//!     let mut trace = TraceWriter::new(&mut out).tokens(true).states(true);
//!     let token = Token::new("int_literal", "2", Location::default());
//!     trace.on_token(&token);
//!     trace.on_action(0, &Action::Shift(10), &token);
//! }
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "TOK type=int_literal lexeme=\"2\" line=1 col=1\n\
//!      STATE 0 shift(10) on int_literal(\"2\")\n"
//! );
//! ```

use crate::{Action, AstNode, Token};
use std::fmt::Write as _;
use std::io;

/// Receives parser events.
pub trait ParseTrace {
    fn on_token(&mut self, _token: &Token) {}

    fn on_action(&mut self, _state: usize, _action: &Action, _lookahead: &Token) {}

    /// `nodes` holds `None` entries when no AST is being built.
    fn on_stack(&mut self, _states: &[usize], _nodes: &[Option<AstNode>]) {}
}

impl<T: ParseTrace + ?Sized> ParseTrace for &mut T {
    fn on_token(&mut self, token: &Token) {
        (**self).on_token(token)
    }

    fn on_action(&mut self, state: usize, action: &Action, lookahead: &Token) {
        (**self).on_action(state, action, lookahead)
    }

    fn on_stack(&mut self, states: &[usize], nodes: &[Option<AstNode>]) {
        (**self).on_stack(states, nodes)
    }
}

fn token_line(token: &Token) -> String {
    format!(
        "TOK type={} lexeme={:?} line={} col={}",
        token.token_type,
        token.lexeme.as_str(),
        token.location.line,
        token.location.column
    )
}

fn action_line(state: usize, action: &Action, lookahead: &Token) -> String {
    format!("STATE {state} {action} on {lookahead}")
}

fn stack_line(states: &[usize], nodes: &[Option<AstNode>]) -> String {
    let mut line = String::from("STACK states=[");
    for (i, state) in states.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{state}");
    }
    line.push_str("] nodes=[");
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        match node {
            Some(node) => line.push_str(node.text()),
            None => line.push('_'),
        }
    }
    line.push(']');
    line
}

/// Writes selected events as lines to `W`.
///
/// Each channel is off until enabled. Write failures are logged and
/// otherwise ignored; tracing never fails a parse.
pub struct TraceWriter<W> {
    out: W,
    tokens: bool,
    states: bool,
    stack: bool,
}

impl<W: io::Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tokens: false,
            states: false,
            stack: false,
        }
    }

    /// Reports scanned tokens.
    pub fn tokens(mut self, on: bool) -> Self {
        self.tokens = on;
        self
    }

    /// Reports chosen actions.
    pub fn states(mut self, on: bool) -> Self {
        self.states = on;
        self
    }

    /// Reports stacks after each shift and reduce, and on accept.
    pub fn stack(mut self, on: bool) -> Self {
        self.stack = on;
        self
    }

    /// Returns `true` if any channel is enabled.
    pub fn is_active(&self) -> bool {
        self.tokens || self.states || self.stack
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            log::warn!("trace output failed: {err}");
        }
    }
}

impl<W: io::Write> ParseTrace for TraceWriter<W> {
    fn on_token(&mut self, token: &Token) {
        if self.tokens {
            self.emit(&token_line(token));
        }
    }

    fn on_action(&mut self, state: usize, action: &Action, lookahead: &Token) {
        if self.states {
            self.emit(&action_line(state, action, lookahead));
        }
    }

    fn on_stack(&mut self, states: &[usize], nodes: &[Option<AstNode>]) {
        if self.stack {
            self.emit(&stack_line(states, nodes));
        }
    }
}

/// Sends every event to `log::trace!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl ParseTrace for LogTrace {
    fn on_token(&mut self, token: &Token) {
        log::trace!("{}", token_line(token));
    }

    fn on_action(&mut self, state: usize, action: &Action, lookahead: &Token) {
        log::trace!("{}", action_line(state, action, lookahead));
    }

    fn on_stack(&mut self, states: &[usize], nodes: &[Option<AstNode>]) {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}", stack_line(states, nodes));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    fn lookahead() -> Token {
        Token::new("plus", "+", Location::new(1, 1, 2))
    }

    #[test]
    fn formats_lines() {
        let token = lookahead();
        assert_eq!(token_line(&token), "TOK type=plus lexeme=\"+\" line=1 col=2");
        assert_eq!(
            action_line(3, &Action::Reduce(15), &token),
            "STATE 3 reduce(15) on plus(\"+\")"
        );
        assert_eq!(
            action_line(1, &Action::Accept, &Token::eof(Location::default())),
            "STATE 1 accept on EOF(\"\")"
        );
        let nodes = [
            Some(AstNode::leaf(Token::new("int_literal", "2", Location::default()))),
            None,
        ];
        assert_eq!(
            stack_line(&[0, 2, 11], &nodes),
            "STACK states=[0 2 11] nodes=[2 _]"
        );
        assert_eq!(stack_line(&[0], &[]), "STACK states=[0] nodes=[]");
    }

    #[test]
    fn writer_respects_channels() {
        let mut trace = TraceWriter::new(Vec::new()).stack(true);
        assert!(trace.is_active());
        trace.on_token(&lookahead());
        trace.on_action(0, &Action::Shift(1), &lookahead());
        trace.on_stack(&[0, 1], &[None]);
        let out = String::from_utf8(trace.into_inner()).unwrap();
        assert_eq!(out, "STACK states=[0 1] nodes=[_]\n");

        assert!(!TraceWriter::new(io::sink()).is_active());
    }

    #[test]
    fn defaults_do_nothing() {
        struct Silent;
        impl ParseTrace for Silent {}
        fn drive(mut trace: impl ParseTrace) {
            trace.on_token(&lookahead());
            trace.on_action(0, &Action::Accept, &lookahead());
            trace.on_stack(&[0], &[]);
        }
        let mut silent = Silent;
        drive(&mut silent);
        drive(silent);
    }
}
