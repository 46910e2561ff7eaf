//! Sharing parsed selectors and nodes across threads.

use std::{sync::Arc, thread};

use arbor::{Node, Selector, selector::RecursionLimit};

use crate::helpers::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_types_are_send_and_sync() {
    assert_send_sync::<Node>();
    assert_send_sync::<Selector>();
    #[cfg(feature = "store")]
    assert_send_sync::<arbor::store::MemoryStore>();
}

#[test]
fn test_concurrent_traversals_share_selector_and_node() {
    let selector = Arc::new(match_all_recursive(RecursionLimit::Unbounded));
    let node = nested_map(4);
    let expected = path_strings(select(&node, &selector).covered_paths());

    let outcomes: Vec<Vec<String>> = thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let selector = Arc::clone(&selector);
                let node = &node;
                scope.spawn(move || path_strings(select(node, &selector).covered_paths()))
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().expect("Traversal thread panicked"))
            .collect()
    });

    assert_eq!(outcomes.len(), 4);
    for covered in outcomes {
        assert_eq!(covered, expected);
    }
}
