//! AST shaping rules.
//!
//! Every production carries a [`Shaping`] descriptor telling the parser what
//! node to build when it reduces by that production. The right-hand-side
//! nodes popped off the stack (`rhs[0..n]`, in source order) are the raw
//! material; the rule decides which of them survive and how they are wired
//! together:
//!
//! | Rule | Result |
//! |---|---|
//! | [`Shaping::Default`] | `n = 1`: `rhs[0]` itself; `n = 0`: an empty node typed by the LHS; otherwise a token-less LHS node over all of `rhs` |
//! | [`Shaping::Passthrough`] | `rhs[index]` itself |
//! | [`Shaping::Hint`] | a node of the given type (else the LHS) named by the parent's token, over the selected children |
//! | [`Shaping::AppendChildren`] | the parent, with the selected nodes appended to its children |
//! | [`Shaping::PrependChildren`] | the parent, with the selected nodes inserted before its children |
//! | [`Shaping::AdoptGrandchildren`] | the parent, whose children are the children of the selected nodes |
//!
//! A parent is either one of the right-hand-side nodes or a literal. A literal
//! parent synthesizes a token whose type and lexeme are both the literal text;
//! it is located at the start of the first right-hand-side node that has a
//! token.
//!
//! In full-tree mode the descriptor is ignored and every reduction builds a
//! token-less LHS node over all of `rhs`.

use crate::{AstNode, InternalError, Location, Token, TypeTag};
use serde::Deserialize;
use smartstring::alias::String;

/// Where a shaped node gets its token (and, for the child-list rules, its
/// type and existing children).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentSource {
    /// The right-hand-side node at this index.
    Child(usize),
    /// A synthesized token whose type and lexeme are this text.
    Literal(TypeTag),
}

/// How a reduction builds its AST node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Shaping {
    #[default]
    Default,

    Passthrough {
        index: usize,
    },

    Hint {
        #[serde(default)]
        node_type: Option<TypeTag>,
        #[serde(default)]
        parent: Option<ParentSource>,
        #[serde(default)]
        children: Vec<usize>,
    },

    AppendChildren {
        parent: ParentSource,
        #[serde(default)]
        children: Vec<usize>,
        #[serde(default)]
        node_type: Option<TypeTag>,
    },

    PrependChildren {
        parent: ParentSource,
        #[serde(default)]
        children: Vec<usize>,
        #[serde(default)]
        node_type: Option<TypeTag>,
    },

    AdoptGrandchildren {
        parent: ParentSource,
        #[serde(default)]
        children: Vec<usize>,
        #[serde(default)]
        node_type: Option<TypeTag>,
    },
}

impl Shaping {
    /// Shorthand for the common operator rule: a node of type `node_type`
    /// named by `rhs[parent]` over the selected children.
    pub fn hint(node_type: &str, parent: usize, children: &[usize]) -> Self {
        Shaping::Hint {
            node_type: Some(node_type.into()),
            parent: Some(ParentSource::Child(parent)),
            children: children.to_vec(),
        }
    }

    /// The parent index and child indices this rule reads.
    fn indices(&self) -> (Option<usize>, &[usize]) {
        let child = |parent: &ParentSource| match parent {
            ParentSource::Child(index) => Some(*index),
            ParentSource::Literal(_) => None,
        };
        match self {
            Shaping::Default => (None, &[]),
            Shaping::Passthrough { index } => (None, std::slice::from_ref(index)),
            Shaping::Hint {
                parent, children, ..
            } => (parent.as_ref().and_then(child), children),
            Shaping::AppendChildren {
                parent, children, ..
            }
            | Shaping::PrependChildren {
                parent, children, ..
            }
            | Shaping::AdoptGrandchildren {
                parent, children, ..
            } => (child(parent), children),
        }
    }

    /// Checks that every index is in range and used at most once.
    pub(crate) fn check(&self, rhs_count: usize) -> Result<(), String> {
        let (parent, children) = self.indices();
        let mut seen = vec![false; rhs_count];
        for index in parent.into_iter().chain(children.iter().copied()) {
            if index >= rhs_count {
                return Err(format!("rhs index {index} out of range for {rhs_count} symbols").into());
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(format!("rhs index {index} used more than once").into());
            }
        }
        if let Shaping::Hint {
            parent: Some(ParentSource::Literal(tag)),
            ..
        }
        | Shaping::AppendChildren {
            parent: ParentSource::Literal(tag),
            ..
        }
        | Shaping::PrependChildren {
            parent: ParentSource::Literal(tag),
            ..
        }
        | Shaping::AdoptGrandchildren {
            parent: ParentSource::Literal(tag),
            ..
        } = self
            && tag.is_empty()
        {
            return Err("empty parent literal".into());
        }
        Ok(())
    }
}

/// Right-hand-side nodes of one reduction, each taken at most once.
struct Rhs {
    production: usize,
    slots: Vec<Option<AstNode>>,
}

impl Rhs {
    fn take(&mut self, index: usize) -> Result<AstNode, InternalError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(InternalError::BadRhsIndex {
                production: self.production,
                index,
                len,
            })
    }

    fn take_all(&mut self, indices: &[usize]) -> Result<Vec<AstNode>, InternalError> {
        indices.iter().map(|&i| self.take(i)).collect()
    }

    /// Start of the first node that has a token anywhere beneath it.
    fn first_location(&self) -> Location {
        self.slots
            .iter()
            .flatten()
            .find_map(AstNode::start_location)
            .unwrap_or_default()
    }

    /// Resolves a parent into (token, type, existing children).
    fn parent(
        &mut self,
        parent: &ParentSource,
    ) -> Result<(Option<Token>, TypeTag, Vec<AstNode>), InternalError> {
        match parent {
            ParentSource::Child(index) => {
                let mut node = self.take(*index)?;
                Ok((
                    node.token.take(),
                    std::mem::take(&mut node.node_type),
                    std::mem::take(&mut node.children),
                ))
            }
            ParentSource::Literal(tag) => {
                let token = Token::new(tag, tag, self.first_location());
                Ok((Some(token), tag.clone(), Vec::new()))
            }
        }
    }
}

/// Builds the node for a reduction by production `production` in default mode.
pub(crate) fn shape(
    production: usize,
    lhs: &str,
    shaping: &Shaping,
    rhs: Vec<AstNode>,
) -> Result<AstNode, InternalError> {
    let mut rhs = Rhs {
        production,
        slots: rhs.into_iter().map(Some).collect(),
    };
    let node = match shaping {
        Shaping::Default => match rhs.slots.len() {
            1 => rhs.take(0)?,
            _ => AstNode::interior(lhs, rhs.slots.into_iter().flatten().collect()),
        },

        Shaping::Passthrough { index } => rhs.take(*index)?,

        Shaping::Hint {
            node_type,
            parent,
            children,
        } => {
            let token = match parent {
                Some(parent) => rhs.parent(parent)?.0,
                None => None,
            };
            AstNode {
                token,
                node_type: node_type.as_deref().unwrap_or(lhs).into(),
                children: rhs.take_all(children)?,
            }
        }

        Shaping::AppendChildren {
            parent,
            children,
            node_type,
        } => {
            let (token, parent_type, mut kids) = rhs.parent(parent)?;
            kids.extend(rhs.take_all(children)?);
            AstNode {
                token,
                node_type: node_type.clone().unwrap_or(parent_type),
                children: kids,
            }
        }

        Shaping::PrependChildren {
            parent,
            children,
            node_type,
        } => {
            let (token, parent_type, kids) = rhs.parent(parent)?;
            let mut front = rhs.take_all(children)?;
            front.extend(kids);
            AstNode {
                token,
                node_type: node_type.clone().unwrap_or(parent_type),
                children: front,
            }
        }

        Shaping::AdoptGrandchildren {
            parent,
            children,
            node_type,
        } => {
            let (token, parent_type, mut kids) = rhs.parent(parent)?;
            for mut adopted in rhs.take_all(children)? {
                kids.append(&mut adopted.children);
            }
            AstNode {
                token,
                node_type: node_type.clone().unwrap_or(parent_type),
                children: kids,
            }
        }
    };
    Ok(node)
}

/// Builds the node for a reduction in full-tree mode.
pub(crate) fn shape_full(lhs: &str, rhs: Vec<AstNode>) -> AstNode {
    AstNode::interior(lhs, rhs)
}
