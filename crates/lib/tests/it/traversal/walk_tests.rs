//! Walk tests over in-memory trees without links.

use arbor::{
    Node, SelectorSpec, Traversal, TraversalConfig,
    node::fluent,
    selector::RecursionLimit,
    traversal::{Budget, BudgetResource, TraversalError, VisitReason},
};

use crate::helpers::*;

// ===== COVERAGE VS. RESULT =====

#[test]
fn test_grandchildren_results_are_depth_two_leaves() {
    let selection = select(&three_level_map(), &grandchildren());

    assert_eq!(
        path_strings(selection.result_paths()),
        vec!["x/a", "x/b", "y/a", "y/b"]
    );
    assert_eq!(
        path_strings(selection.covered_paths()),
        vec!["", "x", "x/a", "x/b", "y", "y/a", "y/b"]
    );
    let values: Vec<i64> = selection
        .results
        .iter()
        .map(|(_, node)| node.as_int().unwrap())
        .collect();
    assert_eq!(values, vec![1, 2, 3, 4]);
}

#[test]
fn test_results_are_subset_of_covered() {
    let selection = select(&nested_map(4), &match_all_recursive(RecursionLimit::Depth(3)));
    for result in selection.result_paths() {
        assert!(selection.covered_paths().contains(&result));
    }
    assert_eq!(
        selection.report.nodes_visited,
        selection.covered.len() as u64
    );
}

#[test]
fn test_walk_adv_reports_reasons() {
    let mut seen = Vec::new();
    Traversal::default()
        .walk_adv(&three_level_map(), &grandchildren(), |progress, _, reason| {
            seen.push((progress.path.to_string(), reason));
            Ok(())
        })
        .unwrap();

    assert_eq!(seen[0], (String::new(), VisitReason::SelectionCandidate));
    assert_eq!(seen[1], ("x".to_string(), VisitReason::SelectionCandidate));
    assert_eq!(seen[2], ("x/a".to_string(), VisitReason::SelectionMatch));
}

#[test]
fn test_walk_matching_only_sees_matches() {
    let mut matched = Vec::new();
    let report = Traversal::default()
        .walk_matching(&three_level_map(), &grandchildren(), |progress, node| {
            matched.push((progress.path.to_string(), node.as_int().unwrap()));
            Ok(())
        })
        .unwrap();
    assert_eq!(matched.len(), 4);
    assert_eq!(matched[3], ("y/b".to_string(), 4));
    assert_eq!(report.nodes_visited, 7);
}

// ===== RECURSION =====

#[test]
fn test_depth_two_recursion_stops_at_depth_one_paths() {
    let selection = select(&nested_map(5), &match_all_recursive(RecursionLimit::Depth(2)));

    assert_eq!(
        path_strings(selection.covered_paths()),
        vec!["", "level", "child"]
    );
    let deepest = selection
        .covered
        .iter()
        .map(|(path, _)| path.len())
        .max()
        .unwrap();
    assert_eq!(deepest, 1);
    assert_eq!(selection.results.len(), 3);
}

#[test]
fn test_recursion_depth_bounds_path_length() {
    for depth in 1..=4u64 {
        let selection = select(
            &nested_map(5),
            &match_all_recursive(RecursionLimit::Depth(depth)),
        );
        let deepest = selection
            .covered
            .iter()
            .map(|(path, _)| path.len() as u64)
            .max()
            .unwrap();
        assert_eq!(deepest, depth - 1, "depth limit {depth}");
    }
}

#[test]
fn test_unbounded_recursion_visits_whole_tree() {
    let selection = select(&nested_map(5), &match_all_recursive(RecursionLimit::Unbounded));
    // Five maps with a "level" int each, the leaf map and its int.
    assert_eq!(selection.covered.len(), 12);
    assert_eq!(selection.results.len(), 12);
    let leaf = selection.results.last().unwrap();
    assert_eq!(leaf.0.to_string(), "child/child/child/child/child/leaf");
    assert_eq!(leaf.1.as_int().unwrap(), 5);
}

#[test]
fn test_recursive_fields_follow_named_chain() {
    // Recurse only through "child", matching each "level".
    let selector = SelectorSpec::explore_recursive(
        RecursionLimit::Unbounded,
        SelectorSpec::explore_fields([
            ("level", SelectorSpec::matcher()),
            ("child", SelectorSpec::explore_recursive_edge()),
        ])
        .unwrap(),
    )
    .selector()
    .unwrap();

    let selection = select(&nested_map(3), &selector);
    assert_eq!(
        path_strings(selection.result_paths()),
        vec!["level", "child/level", "child/child/level"]
    );
}

// ===== SELECTIVE LOOKUP =====

#[test]
fn test_fields_skip_absent_entries() {
    let selector = SelectorSpec::explore_fields([
        ("missing", SelectorSpec::matcher()),
        ("y", SelectorSpec::matcher()),
    ])
    .unwrap()
    .selector()
    .unwrap();

    let selection = select(&three_level_map(), &selector);
    assert_eq!(path_strings(selection.result_paths()), vec!["y"]);
    assert_eq!(path_strings(selection.covered_paths()), vec!["", "y"]);
}

#[test]
fn test_index_and_range_on_lists() {
    let list = int_list(5);

    let index = SelectorSpec::explore_index(3, SelectorSpec::matcher())
        .selector()
        .unwrap();
    let selection = select(&list, &index);
    assert_eq!(path_strings(selection.result_paths()), vec!["3"]);
    assert_eq!(selection.results[0].1.as_int().unwrap(), 3);

    let range = SelectorSpec::explore_range(1, 9, SelectorSpec::matcher())
        .selector()
        .unwrap();
    let selection = select(&list, &range);
    assert_eq!(
        path_strings(selection.result_paths()),
        vec!["1", "2", "3", "4"]
    );
}

#[test]
fn test_index_does_not_match_map_keys() {
    let map = fluent::build_map(1, |m| m.insert("0", "zero")).unwrap();
    let index = SelectorSpec::explore_index(0, SelectorSpec::matcher())
        .selector()
        .unwrap();
    let selection = select(&map, &index);
    assert!(selection.results.is_empty());
    assert_eq!(selection.covered.len(), 1);
}

#[test]
fn test_union_of_fields_visits_each_child_once() {
    let selector = SelectorSpec::explore_union([
        SelectorSpec::explore_fields([("x", SelectorSpec::matcher())]).unwrap(),
        SelectorSpec::explore_fields([("x", SelectorSpec::explore_all(SelectorSpec::matcher()))])
            .unwrap(),
    ])
    .selector()
    .unwrap();

    let selection = select(&three_level_map(), &selector);
    assert_eq!(
        path_strings(selection.covered_paths()),
        vec!["", "x", "x/a", "x/b"]
    );
    assert_eq!(
        path_strings(selection.result_paths()),
        vec!["x", "x/a", "x/b"]
    );
}

#[test]
fn test_scalar_root_is_visited_once() {
    let selection = select(&Node::Int(9), &grandchildren());
    assert_eq!(selection.covered.len(), 1);
    assert!(selection.results.is_empty());
}

// ===== BUDGETS AND STOPS =====

#[test]
fn test_node_budget_exhaustion() {
    let config = TraversalConfig::default().with_budget(Budget::new(3, 0));
    let err = Traversal::new(config)
        .select(&three_level_map(), &grandchildren())
        .unwrap_err();

    assert!(err.is_budget_exceeded());
    assert_eq!(
        err,
        TraversalError::BudgetExceeded {
            resource: BudgetResource::Nodes,
            path: "x/b".parse().unwrap(),
        }
    );
    let err: arbor::Error = err.into();
    assert!(err.is_budget_exceeded());
    assert_eq!(err.module(), "traversal");
}

#[test]
fn test_exact_node_budget_is_enough() {
    let config = TraversalConfig::default().with_budget(Budget::new(7, 0));
    let selection = Traversal::new(config)
        .select(&three_level_map(), &grandchildren())
        .unwrap();
    assert_eq!(selection.report.nodes_visited, 7);
}

#[test]
fn test_visitor_can_stop_traversal() {
    let mut visited = 0;
    let err = Traversal::default()
        .walk_adv(&three_level_map(), &grandchildren(), |progress, _, _| {
            visited += 1;
            if progress.path.to_string() == "y" {
                return Err(progress.stop("enough"));
            }
            Ok(())
        })
        .unwrap_err();

    assert!(err.is_stopped());
    assert_eq!(err.path().to_string(), "y");
    assert_eq!(visited, 5);
}

// ===== WIDE RANGES =====

#[test]
fn test_range_far_past_list_end_visits_existing_items() {
    let selector = SelectorSpec::explore_range(0, 1usize << 40, SelectorSpec::matcher())
        .selector()
        .unwrap();
    let selection = select(&int_list(2), &selector);

    assert_eq!(path_strings(selection.result_paths()), vec!["0", "1"]);
    assert_eq!(selection.report.nodes_visited, 3);
}

#[test]
fn test_wide_range_in_union_with_index() {
    let selector = SelectorSpec::explore_union([
        SelectorSpec::explore_range(0, 40_000, SelectorSpec::matcher()),
        SelectorSpec::explore_index(0, SelectorSpec::matcher()),
    ])
    .selector()
    .unwrap();
    let selection = select(&int_list(1), &selector);

    assert_eq!(path_strings(selection.result_paths()), vec!["0"]);
}
