//! Closure-style helpers over the assembler protocol.
//!
//! These are thin conveniences for code that builds nodes by hand (tests,
//! selector specs, fixtures). Codecs should drive the assemblers directly.
//!
//! ```
//! use arbor::node::fluent;
//!
//! let node = fluent::build_map(2, |m| {
//!     m.insert("name", "Alice")?;
//!     m.insert_list("tags", 2, |l| {
//!         l.push("admin");
//!         l.push("ops");
//!         Ok(())
//!     })
//! })?;
//!
//! assert_eq!(node.lookup_by_string("tags")?.length()?, 2);
//! # Ok::<(), arbor::node::NodeError>(())
//! ```

use super::{ListAssembler, MapAssembler, Node, NodeBuilder, NodeError};

/// Builds a map node from a closure that fills its entries.
pub fn build_map<F>(size_hint: usize, fill: F) -> Result<Node, NodeError>
where
    F: FnOnce(&mut MapAssembler<'_>) -> Result<(), NodeError>,
{
    let mut builder = NodeBuilder::new();
    let mut map = builder.assembler().begin_map(size_hint);
    fill(&mut map)?;
    map.done()?;
    builder.build()
}

/// Builds a list node from a closure that fills its elements.
pub fn build_list<F>(size_hint: usize, fill: F) -> Result<Node, NodeError>
where
    F: FnOnce(&mut ListAssembler<'_>) -> Result<(), NodeError>,
{
    let mut builder = NodeBuilder::new();
    let mut list = builder.assembler().begin_list(size_hint);
    fill(&mut list)?;
    list.done()?;
    builder.build()
}

impl MapAssembler<'_> {
    /// Adds an entry holding `value`.
    pub fn insert(&mut self, key: &str, value: impl Into<Node>) -> Result<(), NodeError> {
        self.assemble_entry(key)?.assign_node(&value.into());
        Ok(())
    }

    /// Adds an entry holding a nested map filled by `fill`.
    pub fn insert_map<F>(&mut self, key: &str, size_hint: usize, fill: F) -> Result<(), NodeError>
    where
        F: FnOnce(&mut MapAssembler<'_>) -> Result<(), NodeError>,
    {
        let mut child = self.assemble_entry(key)?.begin_map(size_hint);
        fill(&mut child)?;
        child.done()
    }

    /// Adds an entry holding a nested list filled by `fill`.
    pub fn insert_list<F>(&mut self, key: &str, size_hint: usize, fill: F) -> Result<(), NodeError>
    where
        F: FnOnce(&mut ListAssembler<'_>) -> Result<(), NodeError>,
    {
        let mut child = self.assemble_entry(key)?.begin_list(size_hint);
        fill(&mut child)?;
        child.done()
    }
}

impl ListAssembler<'_> {
    /// Appends `value`.
    pub fn push(&mut self, value: impl Into<Node>) {
        self.assemble_value().assign_node(&value.into());
    }

    /// Appends a nested map filled by `fill`.
    pub fn push_map<F>(&mut self, size_hint: usize, fill: F) -> Result<(), NodeError>
    where
        F: FnOnce(&mut MapAssembler<'_>) -> Result<(), NodeError>,
    {
        let mut child = self.assemble_value().begin_map(size_hint);
        fill(&mut child)?;
        child.done()
    }

    /// Appends a nested list filled by `fill`.
    pub fn push_list<F>(&mut self, size_hint: usize, fill: F) -> Result<(), NodeError>
    where
        F: FnOnce(&mut ListAssembler<'_>) -> Result<(), NodeError>,
    {
        let mut child = self.assemble_value().begin_list(size_hint);
        fill(&mut child)?;
        child.done()
    }
}
