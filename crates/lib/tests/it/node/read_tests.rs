//! Read contract tests: kind checks, lookups and one-shot iterators.

use arbor::{
    Kind, Node, PathSegment,
    kind::KindSet,
    node::{NodeError, fluent},
};

use crate::helpers::*;

#[test]
fn test_as_int_on_map_is_wrong_kind() {
    let map = three_level_map();
    match map.as_int() {
        Err(NodeError::WrongKind {
            method,
            appropriate,
            actual,
        }) => {
            assert_eq!(method, "as_int");
            assert_eq!(appropriate, KindSet::JUST_INT);
            assert_eq!(actual, Kind::Map);
        }
        other => panic!("Expected WrongKind, got {other:?}"),
    }
}

#[test]
fn test_as_string_on_list_is_wrong_kind() {
    let err = int_list(2).as_string().unwrap_err();
    assert!(err.is_wrong_kind());
    assert!(err.to_string().contains("list"));
}

#[test]
fn test_scalar_lookups_are_wrong_kind() {
    let scalar = Node::Int(1);
    assert!(scalar.lookup_by_string("a").unwrap_err().is_wrong_kind());
    assert!(scalar.lookup_by_index(0).unwrap_err().is_wrong_kind());
    assert!(scalar.map_iterator().unwrap_err().is_wrong_kind());
    assert!(scalar.list_iterator().unwrap_err().is_wrong_kind());
    assert!(scalar.length().unwrap_err().is_wrong_kind());
}

#[test]
fn test_map_iterator_overread() {
    let map = fluent::build_map(1, |m| m.insert("only", 1)).unwrap();
    let mut iter = map.map_iterator().unwrap();
    assert!(!iter.done());
    iter.next_entry().unwrap();
    assert!(iter.done());
    assert_eq!(iter.next_entry(), Err(NodeError::IteratorOverread));
    assert_eq!(iter.next_entry(), Err(NodeError::IteratorOverread));
}

#[test]
fn test_list_iterator_overread() {
    let list = int_list(2);
    let mut iter = list.list_iterator().unwrap();
    assert_eq!(iter.next_item().unwrap().0, 0);
    assert_eq!(iter.next_item().unwrap().0, 1);
    assert!(iter.done());
    let err = iter.next_item().unwrap_err();
    assert!(err.is_overread());
}

#[test]
fn test_empty_iterators_start_done() {
    let map = empty_map();
    let list = Node::from(Vec::<Node>::new());
    assert!(map.map_iterator().unwrap().done());
    assert!(list.list_iterator().unwrap().done());
}

#[test]
fn test_missing_entries_are_not_exists() {
    let map = three_level_map();
    let err = map.lookup_by_string("z").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.segment(), Some(&PathSegment::key("z")));

    let err = int_list(2).lookup_by_index(5).unwrap_err();
    assert_eq!(
        err,
        NodeError::NotExists {
            segment: PathSegment::Index(5)
        }
    );
}

#[test]
fn test_lookup_by_segment() {
    let list = int_list(3);
    assert_eq!(
        list.lookup_by_segment(&PathSegment::key("2"))
            .unwrap()
            .as_int()
            .unwrap(),
        2
    );
    assert_eq!(
        list.lookup_by_segment(&PathSegment::Index(1))
            .unwrap()
            .as_int()
            .unwrap(),
        1
    );
    let err = list
        .lookup_by_segment(&PathSegment::key("two"))
        .unwrap_err();
    assert!(matches!(err, NodeError::InvalidSegmentForList { .. }));

    let map = fluent::build_map(1, |m| m.insert("3", "three")).unwrap();
    assert_eq!(
        map.lookup_by_segment(&PathSegment::Index(3))
            .unwrap()
            .as_string()
            .unwrap(),
        "three"
    );
}

#[test]
fn test_lookup_by_node() {
    let map = three_level_map();
    assert_eq!(
        map.lookup_by_node(&Node::from("x")).unwrap().kind(),
        Kind::Map
    );
    assert!(map.lookup_by_node(&Node::Int(0)).unwrap_err().is_wrong_kind());

    let list = int_list(2);
    assert_eq!(
        list.lookup_by_node(&Node::Int(1)).unwrap().as_int().unwrap(),
        1
    );
    assert!(list.lookup_by_node(&Node::Int(-1)).unwrap_err().is_not_found());
}

#[test]
fn test_length_and_flags() {
    assert_eq!(three_level_map().length().unwrap(), 2);
    assert_eq!(int_list(4).length().unwrap(), 4);
    assert!(Node::Null.is_null());
    assert!(!Node::Bool(false).is_null());
    assert!(!Node::Null.is_undefined());
}

#[test]
fn test_scalar_accessors() {
    assert!(Node::from(true).as_bool().unwrap());
    assert_eq!(Node::from(7).as_int().unwrap(), 7);
    assert_eq!(Node::from(0.25).as_float().unwrap(), 0.25);
    assert_eq!(Node::from("s").as_string().unwrap(), "s");
    assert_eq!(Node::from(vec![9u8]).as_bytes().unwrap(), &[9]);
    assert_eq!(Node::Float(1.0).kind(), Kind::Float);
    assert!(Node::Float(1.0).as_int().unwrap_err().is_wrong_kind());
}

#[test]
fn test_kind_sets() {
    assert!(KindSet::RECURSIVE.contains(Kind::Map));
    assert!(KindSet::RECURSIVE.contains(Kind::List));
    assert!(!KindSet::RECURSIVE.contains(Kind::Link));
    assert!(Kind::Link.is_scalar());
    assert_eq!(KindSet::RECURSIVE.to_string(), "map or list");
}
