//! Tests for specs produced by `SelectorSpec`.

use arbor::{
    Node, PathSegment, Selector, SelectorSpec,
    selector::{RecursionLimit, SelectorError},
};

use super::helpers::*;

#[test]
fn test_builder_matches_hand_written_specs() {
    assert_eq!(SelectorSpec::matcher().into_node(), matcher_spec());
    assert_eq!(
        Node::from(SelectorSpec::explore_all(SelectorSpec::matcher())),
        all_spec(matcher_spec())
    );
    assert_eq!(
        SelectorSpec::explore_recursive(
            RecursionLimit::Depth(2),
            SelectorSpec::explore_all(SelectorSpec::explore_recursive_edge()),
        )
        .into_node(),
        recursive_spec(depth_limit(2), all_spec(edge_spec()))
    );
}

#[test]
fn test_every_variant_parses() {
    let spec = SelectorSpec::explore_union([
        SelectorSpec::matcher(),
        SelectorSpec::explore_fields([
            ("name", SelectorSpec::matcher()),
            (
                "tags",
                SelectorSpec::explore_range(0, 2, SelectorSpec::matcher()),
            ),
        ])
        .unwrap(),
        SelectorSpec::explore_index(1, SelectorSpec::matcher()),
        SelectorSpec::explore_recursive(
            RecursionLimit::Unbounded,
            SelectorSpec::explore_all(SelectorSpec::explore_recursive_edge()),
        ),
    ]);

    let selector = spec.selector().unwrap();
    let Selector::ExploreUnion { members } = &selector else {
        panic!("Expected ExploreUnion, got {selector:?}");
    };
    assert_eq!(members.len(), 4);
    assert_eq!(members[0], Selector::Matcher);
    assert_eq!(
        members[2],
        Selector::ExploreIndex {
            index: 1,
            next: Box::new(Selector::Matcher)
        }
    );
    // ExploreAll inside the recursion widens the union to everything.
    assert_eq!(selector.interests(), None);
}

#[test]
fn test_fields_spec_interests() {
    let selector = SelectorSpec::explore_fields([
        ("a".to_string(), SelectorSpec::matcher()),
        ("b".to_string(), SelectorSpec::matcher()),
    ])
    .unwrap()
    .selector()
    .unwrap();
    assert_eq!(
        selector.interests(),
        Some(vec![PathSegment::key("a"), PathSegment::key("b")])
    );
}

#[test]
fn test_builder_does_not_bypass_validation() {
    assert_eq!(
        SelectorSpec::explore_recursive_edge().selector(),
        Err(SelectorError::EdgeOutsideRecursion)
    );
    assert_eq!(
        SelectorSpec::explore_range(3, 3, SelectorSpec::matcher()).selector(),
        Err(SelectorError::InvalidRange { start: 3, end: 3 })
    );
    assert_eq!(
        SelectorSpec::explore_recursive(RecursionLimit::Depth(1), SelectorSpec::matcher())
            .selector(),
        Err(SelectorError::RecursionWithoutEdge)
    );
}
