//! Traversal configuration.
//!
//! [`TraversalConfig`] is plain data with serde support so that callers can
//! keep it alongside the rest of their settings. Every field has a default,
//! and missing fields deserialize to it.

use serde::{Deserialize, Serialize};

/// What to do when a link cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkFailurePolicy {
    /// Stop the traversal and return the load error.
    #[default]
    Abort,
    /// Record the branch as skipped and continue with its siblings.
    SkipBranch,
}

/// Whether a link reached along several paths is loaded each time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRevisit {
    /// Load and walk the link every time it is reached.
    #[default]
    Always,
    /// Walk each distinct link at most once per traversal.
    Once,
}

/// Upper bounds on the work a single traversal may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Maximum number of nodes visited.
    pub node_budget: u64,
    /// Maximum number of links loaded.
    pub link_budget: u64,
}

impl Budget {
    pub fn new(node_budget: u64, link_budget: u64) -> Self {
        Self {
            node_budget,
            link_budget,
        }
    }
}

/// Settings for a [`Traversal`](super::Traversal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Work limits; `None` is unlimited.
    pub budget: Option<Budget>,
    pub link_failure: LinkFailurePolicy,
    pub link_revisit: LinkRevisit,
    /// Follow links through the loader. When false, links are visited as scalars.
    pub follow_links: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            budget: None,
            link_failure: LinkFailurePolicy::default(),
            link_revisit: LinkRevisit::default(),
            follow_links: true,
        }
    }
}

impl TraversalConfig {
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_link_failure(mut self, policy: LinkFailurePolicy) -> Self {
        self.link_failure = policy;
        self
    }

    pub fn with_link_revisit(mut self, revisit: LinkRevisit) -> Self {
        self.link_revisit = revisit;
        self
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}
