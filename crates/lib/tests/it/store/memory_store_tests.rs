//! MemoryStore block operations.

use arbor::{
    Node,
    node::fluent,
    store::{self, MemoryStore, StoreError},
    traversal::{LinkLoader, LoadError},
};

use super::helpers::*;

#[test]
fn test_put_and_get() {
    let store = MemoryStore::new();
    assert!(store.is_empty().unwrap());

    let node = fluent::build_map(2, |m| {
        m.insert("b", "two")?;
        m.insert_list("a", 2, |l| {
            l.push(1);
            l.push(Node::Null);
            Ok(())
        })
    })
    .unwrap();
    let link = store.put(&node).unwrap();

    assert!(store.contains(&link).unwrap());
    assert_eq!(store.len().unwrap(), 1);

    let loaded = store.get(&link).unwrap();
    assert_eq!(loaded.lookup_by_string("b"), node.lookup_by_string("b"));
    assert_eq!(loaded.lookup_by_string("a"), node.lookup_by_string("a"));
}

#[test]
fn test_identical_content_shares_link() {
    let store = MemoryStore::new();
    let first = put_leaf(&store, 1);
    let again = put_leaf(&store, 1);
    let other = put_leaf(&store, 2);

    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn test_put_block_round_trip() {
    let store = MemoryStore::new();
    let bytes = store::encode(&Node::from("block")).unwrap();
    let link = store.put_block(&bytes).unwrap();

    assert_eq!(link, store::link_for(&bytes));
    assert_eq!(store.get_block(&link).unwrap(), bytes);
    assert_eq!(store.get(&link).unwrap().as_string().unwrap(), "block");
}

#[test]
fn test_missing_block() {
    let store = MemoryStore::new();
    let link = put_leaf(&MemoryStore::new(), 7);

    let err = store.get(&link).unwrap_err();
    assert_eq!(err, StoreError::NotFound { link });
    assert!(err.is_not_found());
    assert!(store.get_block(&link).unwrap_err().is_not_found());

    let err: arbor::Error = err.into();
    assert!(err.is_not_found());
    assert_eq!(err.module(), "store");
}

#[test]
fn test_remove() {
    let store = MemoryStore::new();
    let link = put_leaf(&store, 3);
    assert!(store.remove(&link).unwrap());
    assert!(!store.remove(&link).unwrap());
    assert!(!store.contains(&link).unwrap());
}

#[test]
fn test_clones_share_blocks() {
    let store = MemoryStore::new();
    let view = store.clone();
    let link = put_leaf(&store, 4);
    assert!(view.contains(&link).unwrap());
}

#[test]
fn test_loader_maps_errors() {
    let store = MemoryStore::new();
    let link = put_leaf(&store, 5);
    let node = store.load(&link).unwrap();
    assert_eq!(node.lookup_by_string("id").unwrap().as_int().unwrap(), 5);

    let missing = put_leaf(&MemoryStore::new(), 6);
    assert_eq!(store.load(&missing), Err(LoadError::NotFound));
}

#[test]
fn test_nested_links_survive_encoding() {
    let store = MemoryStore::new();
    let leaf = put_leaf(&store, 8);
    let root = root_with_links(&[("leaf", leaf)]);
    let root_link = store.put(&root).unwrap();

    let loaded = store.get(&root_link).unwrap();
    assert_eq!(loaded.lookup_by_string("leaf").unwrap().as_link().unwrap(), leaf);
}
