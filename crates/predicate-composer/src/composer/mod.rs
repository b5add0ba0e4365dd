#[cfg(test)]
mod tests;

use crate::{engine::CompiledFilter, leaf::Leaf, value::Argument};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

///
/// Combinator
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Combinator {
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

///
/// Group
///
/// An ordered run of leaves sharing one combinator. A group may be empty;
/// it then survives in the composer but contributes nothing when compiled.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Group {
    leaves: Vec<Leaf>,
    combinator: Combinator,
}

impl Group {
    pub(crate) const fn new(leaves: Vec<Leaf>, combinator: Combinator) -> Self {
        Self { leaves, combinator }
    }

    /// Compile the surviving leaf contributions into one clause run.
    ///
    /// Each leaf's own fragments join with AND first; leaves that lower to
    /// nothing drop out. Returns `None` when nothing survives, so the
    /// parent never emits empty parentheses.
    fn contribution(&self) -> Option<(String, Vec<Argument>)> {
        let mut clauses = Vec::new();
        let mut arguments = Vec::new();

        for leaf in &self.leaves {
            let fragments = leaf.lower();
            if fragments.is_empty() {
                continue;
            }
            let mut texts = Vec::with_capacity(fragments.len());
            for fragment in fragments {
                texts.push(fragment.text);
                if let Some(argument) = fragment.argument {
                    arguments.push(argument);
                }
            }
            clauses.push(texts.join(" AND "));
        }

        if clauses.is_empty() {
            None
        } else {
            Some((
                clauses.join(&format!(" {} ", self.combinator)),
                arguments,
            ))
        }
    }
}

///
/// Composer
///
/// An ordered sequence of groups, read last-to-first as a right-nested
/// expression: the last group binds tightest. Persistent value: `and` and
/// `or` return a new composer and share every untouched group with the
/// receiver, so one ancestor can be extended along independent branches.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Composer {
    groups: Vec<Arc<Group>>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Empty composer; compiles to the unconstrained, match-everything
    /// filter.
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Single-group composer from a literal leaf list.
    #[must_use]
    pub fn group(leaves: Vec<Leaf>, combinator: Combinator) -> Self {
        Self {
            groups: vec![Arc::new(Group::new(leaves, combinator))],
        }
    }

    /// Build from a declarative combinator tree; the root is the outermost
    /// group and each child binds tighter than its parent. Equivalent
    /// trees and fluent chains compile identically.
    #[must_use]
    pub fn from_tree(root: Node) -> Self {
        let mut groups = Vec::new();
        let mut node = Some(Box::new(root));
        while let Some(current) = node {
            let (leaves, combinator, child) = match *current {
                Node::And(leaves, child) => (leaves, Combinator::And, child),
                Node::Or(leaves, child) => (leaves, Combinator::Or, child),
            };
            groups.push(Arc::new(Group::new(leaves, combinator)));
            node = child;
        }
        Self { groups }
    }

    /// Extend with `leaf` under AND, returning a new composer.
    #[must_use]
    pub fn and(&self, leaf: Leaf) -> Self {
        self.push(Combinator::And, leaf)
    }

    /// Extend with `leaf` under OR, returning a new composer.
    #[must_use]
    pub fn or(&self, leaf: Leaf) -> Self {
        self.push(Combinator::Or, leaf)
    }

    fn push(&self, combinator: Combinator, leaf: Leaf) -> Self {
        let mut groups = self.groups.clone();

        let Some(last) = groups.pop() else {
            // The first group is seeded with AND no matter which call
            // created it; the seed combinator only becomes observable on
            // the next call.
            groups.push(Arc::new(Group::new(vec![leaf], Combinator::And)));
            return Self { groups };
        };

        if last.combinator == combinator {
            let mut leaves = last.leaves.clone();
            leaves.push(leaf);
            groups.push(Arc::new(Group::new(leaves, combinator)));
            return Self { groups };
        }

        // Combinator switch: the most recent leaf migrates into a new,
        // tighter-bound group together with the incoming one. Whatever
        // remains stays behind under the old combinator.
        let mut previous = last.leaves.clone();
        let migrated = previous.pop();
        if previous.len() == 1 {
            // A lone leftover leaf does not survive as a group of one:
            // `a.and(b).or(c)` compiles to `(b OR c)`.
            // TODO: confirm with the query owners whether discarding the
            // leftover leaf is intended before changing this.
            previous.clear();
        }
        let fresh = match migrated {
            Some(migrated) => vec![migrated, leaf],
            None => vec![leaf],
        };
        groups.push(Arc::new(Group::new(previous, last.combinator)));
        groups.push(Arc::new(Group::new(fresh, combinator)));
        Self { groups }
    }

    /// Compile to the final expression and ordered argument list in one
    /// pass. Groups are folded last-to-first into a right-nested string;
    /// arguments are emitted in group order then leaf order, which is
    /// exactly placeholder order in the final text. Never fails: a
    /// composer with nothing to say compiles to the unconstrained filter.
    #[must_use]
    pub fn compile(&self) -> CompiledFilter {
        let parts: Vec<(Combinator, Option<(String, Vec<Argument>)>)> = self
            .groups
            .iter()
            .map(|group| (group.combinator, group.contribution()))
            .collect();

        let mut expression = String::new();
        for (combinator, part) in parts.iter().rev() {
            let Some((inner, _)) = part else { continue };
            expression = if expression.is_empty() {
                format!("({inner})")
            } else {
                format!("({inner} {combinator} {expression})")
            };
        }

        let arguments = parts
            .into_iter()
            .filter_map(|(_, part)| part)
            .flat_map(|(_, arguments)| arguments)
            .collect();

        CompiledFilter::new(expression, arguments)
    }
}

///
/// Node
///
/// Declarative combinator tree for when the desired nesting is known
/// upfront. Each node owns at most one boxed child, which becomes the
/// next, tighter-bound level.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    And(Vec<Leaf>, Option<Box<Node>>),
    Or(Vec<Leaf>, Option<Box<Node>>),
}

impl Node {
    #[must_use]
    pub const fn and(leaves: Vec<Leaf>) -> Self {
        Self::And(leaves, None)
    }

    #[must_use]
    pub const fn or(leaves: Vec<Leaf>) -> Self {
        Self::Or(leaves, None)
    }

    /// Attach (or replace) the tighter-bound child level.
    #[must_use]
    pub fn with_child(self, child: Self) -> Self {
        match self {
            Self::And(leaves, _) => Self::And(leaves, Some(Box::new(child))),
            Self::Or(leaves, _) => Self::Or(leaves, Some(Box::new(child))),
        }
    }
}

impl From<Node> for Composer {
    fn from(root: Node) -> Self {
        Self::from_tree(root)
    }
}
