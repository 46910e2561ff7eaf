//! Declarative traversal plans over node trees.
//!
//! A [`Selector`] describes which parts of a tree a traversal should visit and
//! which visited nodes belong in the result. Every node a traversal visits is
//! "covered" (together they form the proof of the walk); the nodes a
//! [`Selector::Matcher`] decides on are the "result", a subset of the covered set.
//!
//! Selectors are parsed once from a spec node (see [`Selector::parse`]) and are
//! immutable afterwards, so one selector can drive any number of concurrent
//! traversals. Per-traversal state lives in [`SelectorState`], which the
//! traversal engine creates fresh for every walk.
//!
//! # Recursion
//!
//! [`Selector::ExploreRecursive`] repeats its `sequence` wherever the sequence
//! reaches an [`Selector::ExploreRecursiveEdge`]. The edge does not point back
//! at its recursive parent; the tree stays acyclic. Instead, [`SelectorState`]
//! carries a stack of recursion scopes, and an edge resolves against the
//! innermost one. A depth limit of `n` applies the sequence at most `n` times
//! along any path.

pub mod builder;
pub mod errors;
pub mod parse;

use std::{collections::HashSet, ptr, rc::Rc};

use serde::{Deserialize, Serialize};

pub use builder::SelectorSpec;
pub use errors::SelectorError;

use crate::{kind::Kind, node::Node, path::PathSegment};

/// A traversal rule from a closed set of variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Marks the current node as part of the result.
    Matcher,
    /// Applies `next` to every child.
    ExploreAll { next: Box<Selector> },
    /// Applies a per-field selector to the named map entries.
    ExploreFields { fields: Vec<(String, Selector)> },
    /// Applies `next` to one list element.
    ExploreIndex { index: usize, next: Box<Selector> },
    /// Applies `next` to list elements in `start..end`.
    ExploreRange {
        start: usize,
        end: usize,
        next: Box<Selector>,
    },
    /// Applies every member at once.
    ExploreUnion { members: Vec<Selector> },
    /// Repeats `sequence` at each of its recursive edges, up to `limit`.
    ExploreRecursive {
        limit: RecursionLimit,
        sequence: Box<Selector>,
    },
    /// Marks where the enclosing recursive sequence starts over.
    ExploreRecursiveEdge,
}

/// Bound on how often an [`Selector::ExploreRecursive`] sequence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecursionLimit {
    /// No bound. Only safe over finite, acyclic data.
    Unbounded,
    /// The sequence is applied at most this many times along any path.
    ///
    /// The sequence always applies once where the recursive selector starts,
    /// so `Depth(0)` behaves like `Depth(1)`.
    Depth(u64),
}

impl Selector {
    /// Starts a fresh traversal state at the top of this selector.
    pub fn start(&self) -> SelectorState<'_> {
        let mut arms = Vec::new();
        activate(self, None, &mut arms);
        SelectorState { arms }
    }

    /// The path segments this selector wants to visit.
    ///
    /// `None` means every child is of interest; `Some` with an empty list means
    /// none is (a matcher explores nothing further). Callers must not read an
    /// empty answer as "stop" unless it is `Some`.
    ///
    /// An edge on its own cannot know its recursive sequence and reports `None`.
    /// Ranges are listed in full; [`SelectorState::interests_for`] bounds them
    /// by the length of the node being explored.
    pub fn interests(&self) -> Option<Vec<PathSegment>> {
        self.interests_within(None)
    }

    /// Interests with index segments limited to `0..len` when `len` is known.
    fn interests_within(&self, len: Option<usize>) -> Option<Vec<PathSegment>> {
        match self {
            Selector::Matcher => Some(Vec::new()),
            Selector::ExploreAll { .. } | Selector::ExploreRecursiveEdge => None,
            Selector::ExploreFields { fields } => Some(
                fields
                    .iter()
                    .map(|(name, _)| PathSegment::key(name.as_str()))
                    .collect(),
            ),
            Selector::ExploreIndex { index, .. } => Some(
                len.is_none_or(|len| *index < len)
                    .then_some(PathSegment::Index(*index))
                    .into_iter()
                    .collect(),
            ),
            Selector::ExploreRange { start, end, .. } => {
                let end = len.map_or(*end, |len| (*end).min(len));
                Some((*start..end).map(PathSegment::Index).collect())
            }
            Selector::ExploreUnion { members } => merge_interests(members.iter(), len),
            Selector::ExploreRecursive { sequence, .. } => sequence.interests_within(len),
        }
    }

    /// Whether `node` belongs in the result set when reached by this selector.
    pub fn decide(&self, node: &Node) -> bool {
        match self {
            Selector::Matcher => true,
            Selector::ExploreUnion { members } => members.iter().any(|m| m.decide(node)),
            Selector::ExploreRecursive { sequence, .. } => sequence.decide(node),
            _ => false,
        }
    }

    /// Returns true if recursing into this selector reaches an edge without an
    /// explore step in between.
    pub(crate) fn has_head_edge(&self) -> bool {
        match self {
            Selector::ExploreRecursiveEdge => true,
            Selector::ExploreUnion { members } => members.iter().any(Selector::has_head_edge),
            _ => false,
        }
    }

    /// The selector a single-step variant hands to the child at `segment`.
    ///
    /// Union, recursive and edge selectors never reach this point: they are
    /// dissolved into arms when a [`SelectorState`] is built.
    fn step(&self, parent: &Node, segment: &PathSegment) -> Option<&Selector> {
        match self {
            Selector::ExploreAll { next } => Some(next.as_ref()),
            Selector::ExploreFields { fields } => {
                let key = segment.as_key();
                fields
                    .iter()
                    .find(|(name, _)| *name == *key)
                    .map(|(_, selector)| selector)
            }
            Selector::ExploreIndex { index, next } => {
                (parent.kind() == Kind::List && segment.as_index() == Some(*index))
                    .then_some(next.as_ref())
            }
            Selector::ExploreRange { start, end, next } => {
                if parent.kind() != Kind::List {
                    return None;
                }
                let i = segment.as_index()?;
                (*start <= i && i < *end).then_some(next.as_ref())
            }
            Selector::Matcher
            | Selector::ExploreUnion { .. }
            | Selector::ExploreRecursive { .. }
            | Selector::ExploreRecursiveEdge => None,
        }
    }
}

fn merge_interests<'a>(
    selectors: impl Iterator<Item = &'a Selector>,
    len: Option<usize>,
) -> Option<Vec<PathSegment>> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for selector in selectors {
        for segment in selector.interests_within(len)? {
            if seen.insert(segment.clone()) {
                merged.push(segment);
            }
        }
    }
    Some(merged)
}

/// One active recursive selector within a traversal.
#[derive(Debug)]
struct RecursionScope<'s> {
    sequence: &'s Selector,
    limit: RecursionLimit,
    parent: Option<Rc<RecursionScope<'s>>>,
}

/// A single-step selector together with the recursion scopes it runs under.
#[derive(Debug, Clone)]
struct Arm<'s> {
    selector: &'s Selector,
    scope: Option<Rc<RecursionScope<'s>>>,
}

/// Where a traversal currently stands within a selector tree.
///
/// A state is a set of arms, each a borrowed single-step selector
/// (`Matcher`, `ExploreAll`, `ExploreFields`, `ExploreIndex` or `ExploreRange`)
/// plus the recursion scopes it was reached under. Unions contribute one arm
/// per member; recursive selectors and edges are resolved into their
/// sequence's arms as the state is built.
#[derive(Debug, Clone)]
pub struct SelectorState<'s> {
    arms: Vec<Arm<'s>>,
}

impl<'s> SelectorState<'s> {
    /// The path segments this state wants to visit; see [`Selector::interests`].
    pub fn interests(&self) -> Option<Vec<PathSegment>> {
        merge_interests(self.arms.iter().map(|arm| arm.selector), None)
    }

    /// The segments worth looking up in `node`: like [`SelectorState::interests`],
    /// with indices past the end of `node` left out.
    pub fn interests_for(&self, node: &Node) -> Option<Vec<PathSegment>> {
        let len = match node {
            Node::Map(map) => map.len(),
            Node::List(items) => items.len(),
            _ => 0,
        };
        merge_interests(self.arms.iter().map(|arm| arm.selector), Some(len))
    }

    /// The state to apply to the child of `parent` at `segment`, or `None` to
    /// leave that child unvisited.
    pub fn explore(&self, parent: &Node, segment: &PathSegment) -> Option<SelectorState<'s>> {
        let mut arms = Vec::new();
        for arm in &self.arms {
            if let Some(next) = arm.selector.step(parent, segment) {
                activate(next, arm.scope.as_ref(), &mut arms);
            }
        }
        (!arms.is_empty()).then_some(SelectorState { arms })
    }

    /// Whether `node` belongs in the result set.
    pub fn decide(&self, node: &Node) -> bool {
        self.arms.iter().any(|arm| arm.selector.decide(node))
    }

    /// Number of recursion scopes enclosing the innermost arm; zero outside recursion.
    pub fn recursion_depth(&self) -> usize {
        self.arms
            .iter()
            .map(|arm| {
                let mut depth = 0;
                let mut scope = arm.scope.as_deref();
                while let Some(s) = scope {
                    depth += 1;
                    scope = s.parent.as_deref();
                }
                depth
            })
            .max()
            .unwrap_or(0)
    }
}

/// Dissolves `selector` into single-step arms under `scope`.
fn activate<'s>(
    selector: &'s Selector,
    scope: Option<&Rc<RecursionScope<'s>>>,
    arms: &mut Vec<Arm<'s>>,
) {
    match selector {
        Selector::ExploreUnion { members } => {
            for member in members {
                activate(member, scope, arms);
            }
        }
        Selector::ExploreRecursive { limit, sequence } => {
            let inner = Rc::new(RecursionScope {
                sequence: sequence.as_ref(),
                limit: *limit,
                parent: scope.cloned(),
            });
            activate(sequence.as_ref(), Some(&inner), arms);
        }
        Selector::ExploreRecursiveEdge => {
            // Parsing rejects edges outside a recursive sequence.
            let Some(scope) = scope else {
                return;
            };
            if scope.sequence.has_head_edge() {
                tracing::warn!("recursive sequence starts with an edge; not recursing");
                return;
            }
            let limit = match scope.limit {
                RecursionLimit::Depth(depth) if depth < 2 => return,
                RecursionLimit::Depth(depth) => RecursionLimit::Depth(depth - 1),
                RecursionLimit::Unbounded => RecursionLimit::Unbounded,
            };
            let again = Rc::new(RecursionScope {
                sequence: scope.sequence,
                limit,
                parent: scope.parent.clone(),
            });
            activate(scope.sequence, Some(&again), arms);
        }
        _ => {
            let duplicate = arms.iter().any(|arm| {
                ptr::eq(arm.selector, selector) && same_scope(arm.scope.as_ref(), scope)
            });
            if !duplicate {
                arms.push(Arm {
                    selector,
                    scope: scope.cloned(),
                });
            }
        }
    }
}

/// Scopes are equal when they repeat the same sequence with the same limit
/// under equal parents.
fn same_scope(a: Option<&Rc<RecursionScope<'_>>>, b: Option<&Rc<RecursionScope<'_>>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            Rc::ptr_eq(a, b)
                || (ptr::eq(a.sequence, b.sequence)
                    && a.limit == b.limit
                    && same_scope(a.parent.as_ref(), b.parent.as_ref()))
        }
        _ => false,
    }
}
