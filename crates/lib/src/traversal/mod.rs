//! Selector-driven traversal of node trees.
//!
//! A [`Traversal`] walks a node depth-first, guided by a [`Selector`]. Each node
//! the selector leads to is visited; the visitor learns whether the node was
//! matched ([`VisitReason::SelectionMatch`]) or only passed through on the way
//! ([`VisitReason::SelectionCandidate`]). All visited nodes form the covered
//! set, the matched ones the result set.
//!
//! Links are opaque to the data model. When the traversal has a
//! [`LinkLoader`] and `follow_links` is set, a link reached as a child is
//! loaded and the walk continues into the loaded node. The root node is never
//! loaded even if it is a link.
//!
//! # Example
//!
//! ```
//! use arbor::node::fluent;
//! use arbor::selector::SelectorSpec;
//! use arbor::traversal::{Traversal, TraversalConfig};
//!
//! let data = fluent::build_map(2, |m| {
//!     m.insert("a", 1)?;
//!     m.insert("b", 2)
//! })?;
//! let selector = SelectorSpec::explore_fields([("b", SelectorSpec::matcher())])?.selector()?;
//!
//! let selection = Traversal::new(TraversalConfig::default()).select(&data, &selector)?;
//! assert_eq!(selection.results.len(), 1);
//! assert_eq!(selection.results[0].0.to_string(), "b");
//! # Ok::<(), arbor::Error>(())
//! ```

pub mod config;
pub mod errors;
pub mod loader;

use std::collections::HashSet;

pub use config::{Budget, LinkFailurePolicy, LinkRevisit, TraversalConfig};
pub use errors::{BudgetResource, TraversalError};
pub use loader::{LinkLoader, LoadError};

use crate::{
    node::{Link, Node},
    path::{Path, PathSegment},
    selector::{Selector, SelectorState},
};

/// Why a node was handed to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitReason {
    /// The selector matched this node; it is part of the result set.
    SelectionMatch,
    /// The node was visited on the way to possible matches.
    SelectionCandidate,
}

/// The most recently loaded link on the way to the current node.
#[derive(Debug, Clone, PartialEq)]
pub struct LastBlock {
    /// Path at which the link was found
    pub path: Path,
    pub link: Link,
}

/// Position of the traversal, passed to visitors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Progress {
    /// Path from the traversal root to the current node
    pub path: Path,
    pub last_block: Option<LastBlock>,
}

impl Progress {
    /// Builds the error a visitor returns to end the traversal here.
    pub fn stop(&self, reason: impl Into<String>) -> TraversalError {
        TraversalError::Stopped {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn child(&self, segment: PathSegment) -> Progress {
        Progress {
            path: self.path.join(segment),
            last_block: self.last_block.clone(),
        }
    }
}

/// A link whose subtree was skipped under [`LinkFailurePolicy::SkipBranch`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBranch {
    pub path: Path,
    pub link: Link,
    pub error: LoadError,
}

/// Counters and skipped branches of a finished traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraversalReport {
    /// Nodes handed to the visitor
    pub nodes_visited: u64,
    /// Link loads attempted, including failed ones
    pub links_loaded: u64,
    pub skipped: Vec<SkippedBranch>,
}

/// Covered and result sets of a traversal, in visit order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub covered: Vec<(Path, Node)>,
    pub results: Vec<(Path, Node)>,
    pub report: TraversalReport,
}

impl Selection {
    /// Paths of the result set, in visit order.
    pub fn result_paths(&self) -> Vec<&Path> {
        self.results.iter().map(|(path, _)| path).collect()
    }

    /// Paths of the covered set, in visit order.
    pub fn covered_paths(&self) -> Vec<&Path> {
        self.covered.iter().map(|(path, _)| path).collect()
    }
}

/// A configured traversal, reusable across walks.
///
/// Each walk allocates its own recursion scopes, budgets and seen-link set, so
/// one `Traversal` can serve any number of walks.
#[derive(Clone, Default)]
pub struct Traversal<'l> {
    config: TraversalConfig,
    loader: Option<&'l dyn LinkLoader>,
}

impl std::fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traversal")
            .field("config", &self.config)
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

impl<'l> Traversal<'l> {
    pub fn new(config: TraversalConfig) -> Self {
        Self {
            config,
            loader: None,
        }
    }

    /// Sets the loader used to cross links.
    pub fn with_loader(mut self, loader: &'l dyn LinkLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Walks `node` and hands every covered node to `visit`.
    ///
    /// The visitor may end the walk early by returning an error, usually one
    /// built with [`Progress::stop`].
    pub fn walk_adv<F>(
        &self,
        node: &Node,
        selector: &Selector,
        visit: F,
    ) -> Result<TraversalReport, TraversalError>
    where
        F: FnMut(&Progress, &Node, VisitReason) -> Result<(), TraversalError>,
    {
        tracing::debug!(
            follow_links = self.config.follow_links,
            has_loader = self.loader.is_some(),
            "starting traversal"
        );
        let mut walker = Walker {
            traversal: self,
            visit,
            report: TraversalReport::default(),
            seen: HashSet::new(),
        };
        walker.walk(node, &selector.start(), &Progress::default())?;
        tracing::debug!(
            nodes_visited = walker.report.nodes_visited,
            links_loaded = walker.report.links_loaded,
            skipped = walker.report.skipped.len(),
            "traversal complete"
        );
        Ok(walker.report)
    }

    /// Walks `node` and hands only matched nodes to `visit`.
    pub fn walk_matching<F>(
        &self,
        node: &Node,
        selector: &Selector,
        mut visit: F,
    ) -> Result<TraversalReport, TraversalError>
    where
        F: FnMut(&Progress, &Node) -> Result<(), TraversalError>,
    {
        self.walk_adv(node, selector, |progress, node, reason| match reason {
            VisitReason::SelectionMatch => visit(progress, node),
            VisitReason::SelectionCandidate => Ok(()),
        })
    }

    /// Walks `node` and collects the covered and result sets.
    pub fn select(&self, node: &Node, selector: &Selector) -> Result<Selection, TraversalError> {
        let mut covered = Vec::new();
        let mut results = Vec::new();
        let report = self.walk_adv(node, selector, |progress, node, reason| {
            if reason == VisitReason::SelectionMatch {
                results.push((progress.path.clone(), node.clone()));
            }
            covered.push((progress.path.clone(), node.clone()));
            Ok(())
        })?;
        Ok(Selection {
            covered,
            results,
            report,
        })
    }

    /// Follows `path` from `node` and returns the node it addresses.
    ///
    /// Links met before the end of the path are loaded when a loader is set; a
    /// link at the end of the path is returned as is.
    pub fn focus(&self, node: &Node, path: &Path) -> Result<Node, TraversalError> {
        let mut current = node.clone();
        let mut at = Path::root();
        let mut loads = 0u64;
        for segment in path.segments() {
            if let Node::Link(link) = current
                && let Some(loader) = self.following()
            {
                if let Some(budget) = self.config.budget
                    && loads >= budget.link_budget
                {
                    return Err(TraversalError::BudgetExceeded {
                        resource: BudgetResource::Links,
                        path: at,
                    });
                }
                loads += 1;
                tracing::trace!(%link, path = %at, "loading link during focus");
                current = loader
                    .load(&link)
                    .map_err(|source| TraversalError::LinkLoad {
                        path: at.clone(),
                        link,
                        source,
                    })?;
            }
            at.push(segment.clone());
            current = current
                .lookup_by_segment(segment)
                .map_err(|source| TraversalError::Node {
                    path: at.clone(),
                    source,
                })?
                .clone();
        }
        Ok(current)
    }

    fn following(&self) -> Option<&'l dyn LinkLoader> {
        self.loader.filter(|_| self.config.follow_links)
    }
}

/// Per-walk state.
struct Walker<'t, 'l, F> {
    traversal: &'t Traversal<'l>,
    visit: F,
    report: TraversalReport,
    seen: HashSet<Link>,
}

impl<F> Walker<'_, '_, F>
where
    F: FnMut(&Progress, &Node, VisitReason) -> Result<(), TraversalError>,
{
    fn walk(
        &mut self,
        node: &Node,
        state: &SelectorState<'_>,
        progress: &Progress,
    ) -> Result<(), TraversalError> {
        if let Some(budget) = self.traversal.config.budget
            && self.report.nodes_visited >= budget.node_budget
        {
            return Err(TraversalError::BudgetExceeded {
                resource: BudgetResource::Nodes,
                path: progress.path.clone(),
            });
        }
        self.report.nodes_visited += 1;

        let reason = if state.decide(node) {
            VisitReason::SelectionMatch
        } else {
            VisitReason::SelectionCandidate
        };
        (self.visit)(progress, node, reason)?;

        match (node, state.interests_for(node)) {
            (Node::Map(map), None) => {
                for (key, child) in map.iter() {
                    self.walk_child(node, PathSegment::key(key), child, state, progress)?;
                }
            }
            (Node::List(items), None) => {
                for (index, child) in items.iter().enumerate() {
                    self.walk_child(node, PathSegment::Index(index), child, state, progress)?;
                }
            }
            (Node::Map(_) | Node::List(_), Some(segments)) => {
                for segment in segments {
                    let Ok(child) = node.lookup_by_segment(&segment) else {
                        continue;
                    };
                    let segment = normalize(node, segment);
                    self.walk_child(node, segment, child, state, progress)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn walk_child(
        &mut self,
        parent: &Node,
        segment: PathSegment,
        child: &Node,
        state: &SelectorState<'_>,
        progress: &Progress,
    ) -> Result<(), TraversalError> {
        let Some(next) = state.explore(parent, &segment) else {
            return Ok(());
        };
        let mut progress = progress.child(segment);

        let (Node::Link(link), Some(loader)) = (child, self.traversal.following()) else {
            return self.walk(child, &next, &progress);
        };

        if self.traversal.config.link_revisit == LinkRevisit::Once && !self.seen.insert(*link) {
            tracing::trace!(%link, path = %progress.path, "link already walked");
            return Ok(());
        }
        if let Some(budget) = self.traversal.config.budget
            && self.report.links_loaded >= budget.link_budget
        {
            return Err(TraversalError::BudgetExceeded {
                resource: BudgetResource::Links,
                path: progress.path,
            });
        }
        self.report.links_loaded += 1;

        tracing::trace!(%link, path = %progress.path, "loading link");
        match loader.load(link) {
            Ok(loaded) => {
                progress.last_block = Some(LastBlock {
                    path: progress.path.clone(),
                    link: *link,
                });
                self.walk(&loaded, &next, &progress)
            }
            Err(error) => match self.traversal.config.link_failure {
                LinkFailurePolicy::Abort => Err(TraversalError::LinkLoad {
                    path: progress.path,
                    link: *link,
                    source: error,
                }),
                LinkFailurePolicy::SkipBranch => {
                    tracing::warn!(%link, path = %progress.path, %error, "skipping branch behind unloadable link");
                    self.report.skipped.push(SkippedBranch {
                        path: progress.path,
                        link: *link,
                        error,
                    });
                    Ok(())
                }
            },
        }
    }
}

/// Gives a looked-up segment the form that matches its parent.
fn normalize(parent: &Node, segment: PathSegment) -> PathSegment {
    match (parent, &segment) {
        (Node::List(_), PathSegment::Key(_)) => {
            segment.as_index().map(PathSegment::Index).unwrap_or(segment)
        }
        (Node::Map(_), PathSegment::Index(index)) => PathSegment::key(index.to_string()),
        _ => segment,
    }
}
