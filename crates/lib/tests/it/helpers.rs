use arbor::{
    Node, Path, Selector, SelectorSpec, Traversal, TraversalConfig,
    node::fluent,
    selector::RecursionLimit,
    traversal::Selection,
};

// ==========================
// NODE FIXTURES
// ==========================

/// Empty map node
pub fn empty_map() -> Node {
    fluent::build_map(0, |_| Ok(())).expect("Failed to build empty map")
}

/// Map nested `depth` levels deep: `{"child": {"child": ... {"leaf": depth}}}`.
///
/// Every level also carries a `"level"` int so that each map has a scalar child.
pub fn nested_map(depth: usize) -> Node {
    let mut node = fluent::build_map(1, |m| m.insert("leaf", depth as i64))
        .expect("Failed to build leaf map");
    for level in (0..depth).rev() {
        let child = node;
        node = fluent::build_map(2, |m| {
            m.insert("level", level as i64)?;
            m.insert("child", child)
        })
        .expect("Failed to build nested map");
    }
    node
}

/// Three-level map: root -> {x, y} -> {a, b} scalar leaves.
pub fn three_level_map() -> Node {
    fluent::build_map(2, |root| {
        root.insert_map("x", 2, |x| {
            x.insert("a", 1)?;
            x.insert("b", 2)
        })?;
        root.insert_map("y", 2, |y| {
            y.insert("a", 3)?;
            y.insert("b", 4)
        })
    })
    .expect("Failed to build three-level map")
}

/// List of ints `0..len`
pub fn int_list(len: i64) -> Node {
    Node::from((0..len).map(Node::Int).collect::<Vec<_>>())
}

// ==========================
// SELECTOR FIXTURES
// ==========================

/// `ExploreRecursive(limit, Union(Matcher, ExploreAll(Edge)))`: match everything down to `limit`.
pub fn match_all_recursive(limit: RecursionLimit) -> Selector {
    SelectorSpec::explore_recursive(
        limit,
        SelectorSpec::explore_union([
            SelectorSpec::matcher(),
            SelectorSpec::explore_all(SelectorSpec::explore_recursive_edge()),
        ]),
    )
    .selector()
    .expect("Failed to parse recursive selector")
}

/// `ExploreAll(ExploreAll(Matcher))`
pub fn grandchildren() -> Selector {
    SelectorSpec::explore_all(SelectorSpec::explore_all(SelectorSpec::matcher()))
        .selector()
        .expect("Failed to parse grandchildren selector")
}

// ==========================
// TRAVERSAL HELPERS
// ==========================

/// Runs a default traversal and returns the selection.
pub fn select(node: &Node, selector: &Selector) -> Selection {
    Traversal::new(TraversalConfig::default())
        .select(node, selector)
        .expect("Traversal failed")
}

/// Renders paths as strings for compact assertions.
pub fn path_strings<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Vec<String> {
    paths.into_iter().map(ToString::to_string).collect()
}
