//! Lexer and parser tables.
//!
//! Tables are read-only once built and may be shared by any number of
//! concurrent parses. Two construction paths are supported:
//!
//! - **Rust statics**, as a code generator emits them: slices of
//!   `(state, entries)` pairs passed to [`LexerTables::from_static`] and
//!   [`ParseTables::from_static`];
//! - **JSON documents**, decoded with `serde`:
//!
//! ```json
//! {
//!   "transitions": { "0": [ { "from": 48, "to": 57, "next": 1 } ],
//!                    "1": [ { "from": 48, "to": 57, "next": 1 } ] },
//!   "accepts": { "1": "int_literal" }
//! }
//! ```
//!
//! ```json
//! {
//!   "actions": { "0": { "int_literal": { "kind": "shift", "target": 1 } },
//!                "1": { "EOF": { "kind": "reduce", "target": 1 } },
//!                "2": { "EOF": { "kind": "accept" } } },
//!   "gotos": { "0": { "Root": 2 } },
//!   "productions": [
//!     { "lhs": "__start", "rhs_count": 1 },
//!     { "lhs": "Root", "rhs_count": 1, "shaping": { "rule": "default" } }
//!   ]
//! }
//! ```
//!
//! Both paths validate the tables before handing them out, so the runtime
//! only has to guard against table bugs it cannot see statically (a goto that
//! the automaton never defined).
//!
//! # Examples
//!
//! ```rust
//! # use pgrun::{DfaRange, LexerTables};
//! let tables = LexerTables::from_static(
//!     &[(0, &[DfaRange::new('0' as u32, '9' as u32, 1)]),
//!       (1, &[DfaRange::new('0' as u32, '9' as u32, 1)])],
//!     &[(1, "int_literal")],
//! ).unwrap();
//! assert_eq!(tables.next_state(0, '7'), Some(1));
//! assert_eq!(tables.next_state(0, 'x'), None);
//! assert_eq!(tables.accept(1), Some("int_literal"));
//! ```

use crate::token::{self, TypeTag};
use crate::{Shaping, TableError};
use indexmap::IndexMap;
use serde::Deserialize;
use smartstring::alias::String;
use std::collections::BTreeMap;
use std::fmt;

/// Upper bound on the number of states in one table. Tables are dense
/// vectors indexed by state, so a state number at or above this is rejected
/// instead of allocated for.
pub const MAX_STATES: usize = 1 << 20;

/// State count implied by the largest state number, or that number when it
/// is out of bounds.
fn count_states(states: impl Iterator<Item = usize>) -> Result<usize, usize> {
    match states.max() {
        None => Ok(1),
        Some(max) if max < MAX_STATES => Ok(max + 1),
        Some(max) => Err(max),
    }
}

fn too_many_states() -> String {
    format!("state number is not below the limit of {MAX_STATES}").into()
}

/// An inclusive code-point range and the state it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DfaRange {
    pub from: u32,
    pub to: u32,
    pub next: usize,
}

impl DfaRange {
    pub const fn new(from: u32, to: u32, next: usize) -> Self {
        Self { from, to, next }
    }

    #[inline]
    pub fn contains(&self, c: u32) -> bool {
        self.from <= c && c <= self.to
    }
}

/// DFA transitions and accepting states. The start state is 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LexerTablesDoc")]
pub struct LexerTables {
    transitions: Vec<Vec<DfaRange>>,
    accepts: Vec<Option<TypeTag>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LexerTablesDoc {
    transitions: BTreeMap<usize, Vec<DfaRange>>,
    #[serde(default)]
    accepts: BTreeMap<usize, TypeTag>,
}

impl TryFrom<LexerTablesDoc> for LexerTables {
    type Error = TableError;

    fn try_from(doc: LexerTablesDoc) -> Result<Self, Self::Error> {
        LexerTables::new(doc.transitions, doc.accepts)
    }
}

impl LexerTables {
    /// Builds and validates lexer tables from sparse state-keyed maps.
    ///
    /// States that appear in neither map have no transitions and do not
    /// accept.
    pub fn new(
        transitions: BTreeMap<usize, Vec<DfaRange>>,
        accepts: BTreeMap<usize, TypeTag>,
    ) -> Result<Self, TableError> {
        let count = count_states(transitions.keys().chain(accepts.keys()).copied()).map_err(
            |state| TableError::Lexer {
                state,
                message: too_many_states(),
            },
        )?;
        let mut tables = LexerTables {
            transitions: vec![Vec::new(); count],
            accepts: vec![None; count],
        };
        for (state, ranges) in transitions {
            tables.transitions[state] = ranges;
        }
        for (state, tag) in accepts {
            tables.accepts[state] = Some(tag);
        }
        tables.validate()?;
        Ok(tables)
    }

    /// Builds lexer tables from generated statics.
    pub fn from_static(
        transitions: &[(usize, &[DfaRange])],
        accepts: &[(usize, &str)],
    ) -> Result<Self, TableError> {
        Self::new(
            transitions
                .iter()
                .map(|(state, ranges)| (*state, ranges.to_vec()))
                .collect(),
            accepts
                .iter()
                .map(|(state, tag)| (*state, TypeTag::from(*tag)))
                .collect(),
        )
    }

    fn validate(&self) -> Result<(), TableError> {
        let count = self.state_count();
        let fail = |state: usize, message: std::string::String| TableError::Lexer {
            state,
            message: message.into(),
        };
        for (state, ranges) in self.transitions.iter().enumerate() {
            for range in ranges {
                let problem = if range.from > range.to {
                    format!("range {}..={} is reversed", range.from, range.to)
                } else if range.to > char::MAX as u32 {
                    format!("range end {:#x} is not a code point", range.to)
                } else if range.next >= count {
                    format!("transition to unknown state {}", range.next)
                } else {
                    continue;
                };
                return Err(fail(state, problem));
            }
            for pair in ranges.windows(2) {
                if pair[0].to >= pair[1].from {
                    return Err(fail(
                        state,
                        format!(
                            "ranges {}..={} and {}..={} overlap or are out of order",
                            pair[0].from, pair[0].to, pair[1].from, pair[1].to
                        ),
                    ));
                }
            }
        }
        for (state, tag) in self.accepts.iter().enumerate() {
            if let Some(tag) = tag {
                let tag = tag.as_str();
                let name = tag.strip_prefix(token::IGNORED_PREFIX).unwrap_or(tag);
                if name.is_empty() || tag == token::EOF || tag == token::ERROR {
                    return Err(fail(state, format!("invalid accept tag {tag:?}")));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Follows the transition out of `state` on `c`, if there is one.
    #[inline]
    pub fn next_state(&self, state: usize, c: char) -> Option<usize> {
        let ranges = self.transitions.get(state)?;
        let c = c as u32;
        let i = ranges.partition_point(|range| range.to < c);
        ranges
            .get(i)
            .filter(|range| range.contains(c))
            .map(|range| range.next)
    }

    /// Token type accepted in `state`, if `state` is accepting.
    #[inline]
    pub fn accept(&self, state: usize) -> Option<&str> {
        self.accepts.get(state)?.as_deref()
    }
}

/// A parser action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "lowercase")]
pub enum Action {
    /// Push the lookahead and move to this state.
    Shift(usize),
    /// Reduce by this production.
    Reduce(usize),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "shift({state})"),
            Action::Reduce(production) => write!(f, "reduce({production})"),
            Action::Accept => f.write_str("accept"),
        }
    }
}

/// A grammar production as the runtime sees it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Production {
    /// Left-hand-side non-terminal.
    pub lhs: TypeTag,
    /// Number of right-hand-side symbols.
    pub rhs_count: usize,
    #[serde(default)]
    pub shaping: Shaping,
}

impl Production {
    pub fn new(lhs: &str, rhs_count: usize, shaping: Shaping) -> Self {
        Self {
            lhs: lhs.into(),
            rhs_count,
            shaping,
        }
    }
}

/// LR action and goto tables with their productions. The start state is 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ParseTablesDoc")]
pub struct ParseTables {
    actions: Vec<IndexMap<TypeTag, Action>>,
    gotos: Vec<IndexMap<TypeTag, usize>>,
    productions: Vec<Production>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ParseTablesDoc {
    actions: BTreeMap<usize, IndexMap<TypeTag, Action>>,
    #[serde(default)]
    gotos: BTreeMap<usize, IndexMap<TypeTag, usize>>,
    productions: Vec<Production>,
}

impl TryFrom<ParseTablesDoc> for ParseTables {
    type Error = TableError;

    fn try_from(doc: ParseTablesDoc) -> Result<Self, Self::Error> {
        ParseTables::new(doc.actions, doc.gotos, doc.productions)
    }
}

impl ParseTables {
    /// Builds and validates parse tables from sparse state-keyed maps.
    pub fn new(
        actions: BTreeMap<usize, IndexMap<TypeTag, Action>>,
        gotos: BTreeMap<usize, IndexMap<TypeTag, usize>>,
        productions: Vec<Production>,
    ) -> Result<Self, TableError> {
        let count = count_states(actions.keys().chain(gotos.keys()).copied()).map_err(|state| {
            TableError::Parser {
                state,
                message: too_many_states(),
            }
        })?;
        let mut tables = ParseTables {
            actions: vec![IndexMap::new(); count],
            gotos: vec![IndexMap::new(); count],
            productions,
        };
        for (state, row) in actions {
            tables.actions[state] = row;
        }
        for (state, row) in gotos {
            tables.gotos[state] = row;
        }
        tables.validate()?;
        Ok(tables)
    }

    /// Builds parse tables from generated statics.
    pub fn from_static(
        actions: &[(usize, &[(&str, Action)])],
        gotos: &[(usize, &[(&str, usize)])],
        productions: Vec<Production>,
    ) -> Result<Self, TableError> {
        Self::new(
            actions
                .iter()
                .map(|(state, row)| {
                    let row = row.iter().map(|(tag, action)| ((*tag).into(), *action));
                    (*state, row.collect())
                })
                .collect(),
            gotos
                .iter()
                .map(|(state, row)| {
                    let row = row.iter().map(|(tag, target)| ((*tag).into(), *target));
                    (*state, row.collect())
                })
                .collect(),
            productions,
        )
    }

    fn validate(&self) -> Result<(), TableError> {
        let count = self.state_count();
        let fail = |state: usize, message: std::string::String| TableError::Parser {
            state,
            message: message.into(),
        };
        for (state, row) in self.actions.iter().enumerate() {
            for (tag, action) in row {
                let problem = match *action {
                    Action::Shift(target) if target >= count => {
                        format!("shift on {tag} to unknown state {target}")
                    }
                    Action::Reduce(production) if production >= self.productions.len() => {
                        format!("reduce on {tag} by unknown production {production}")
                    }
                    _ => continue,
                };
                return Err(fail(state, problem));
            }
        }
        for (state, row) in self.gotos.iter().enumerate() {
            for (nonterminal, &target) in row {
                if target >= count {
                    return Err(fail(
                        state,
                        format!("goto on {nonterminal} to unknown state {target}"),
                    ));
                }
            }
        }
        for (index, production) in self.productions.iter().enumerate() {
            let fail = |message: std::string::String| TableError::Production {
                production: index,
                message: message.into(),
            };
            if production.lhs.is_empty() {
                return Err(fail("empty left-hand side".into()));
            }
            production
                .shaping
                .check(production.rhs_count)
                .map_err(|message| fail(message.into()))?;
        }
        Ok(())
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn action(&self, state: usize, token_type: &str) -> Option<Action> {
        self.actions.get(state)?.get(token_type).copied()
    }

    #[inline]
    pub fn goto(&self, state: usize, nonterminal: &str) -> Option<usize> {
        self.gotos.get(state)?.get(nonterminal).copied()
    }

    #[inline]
    pub fn production(&self, index: usize) -> Option<&Production> {
        self.productions.get(index)
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Token types that have an action in `state`, in table order.
    pub fn expected(&self, state: usize) -> impl Iterator<Item = &str> {
        self.actions
            .get(state)
            .into_iter()
            .flat_map(|row| row.keys().map(|tag| tag.as_str()))
    }
}
