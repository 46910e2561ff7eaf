//! Value kinds of the data model.
//!
//! Every [`Node`](crate::node::Node) has exactly one [`Kind`], fixed at construction.
//! [`KindSet`] names groups of kinds and is used by
//! [`NodeError::WrongKind`](crate::node::NodeError::WrongKind) to report which kinds
//! an operation would have accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of value shapes a node can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Bytes,
    List,
    Map,
    Link,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 9] = [
        Kind::Null,
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::String,
        Kind::Bytes,
        Kind::List,
        Kind::Map,
        Kind::Link,
    ];

    /// Returns the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Link => "link",
        }
    }

    /// Returns true for the recursive kinds (map and list).
    pub fn is_recursive(&self) -> bool {
        matches!(self, Kind::Map | Kind::List)
    }

    /// Returns true for every kind that is not a map or list.
    pub fn is_scalar(&self) -> bool {
        !self.is_recursive()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A static group of kinds.
///
/// ```
/// # use arbor::kind::{Kind, KindSet};
/// assert!(KindSet::RECURSIVE.contains(Kind::Map));
/// assert!(!KindSet::JUST_STRING.contains(Kind::Int));
/// assert_eq!(KindSet::RECURSIVE.to_string(), "map or list");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindSet(&'static [Kind]);

impl KindSet {
    pub const JUST_NULL: KindSet = KindSet(&[Kind::Null]);
    pub const JUST_BOOL: KindSet = KindSet(&[Kind::Bool]);
    pub const JUST_INT: KindSet = KindSet(&[Kind::Int]);
    pub const JUST_FLOAT: KindSet = KindSet(&[Kind::Float]);
    pub const JUST_STRING: KindSet = KindSet(&[Kind::String]);
    pub const JUST_BYTES: KindSet = KindSet(&[Kind::Bytes]);
    pub const JUST_LIST: KindSet = KindSet(&[Kind::List]);
    pub const JUST_MAP: KindSet = KindSet(&[Kind::Map]);
    pub const JUST_LINK: KindSet = KindSet(&[Kind::Link]);
    pub const RECURSIVE: KindSet = KindSet(&[Kind::Map, Kind::List]);
    pub const SCALAR: KindSet = KindSet(&[
        Kind::Null,
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::String,
        Kind::Bytes,
        Kind::Link,
    ]);
    pub const ALL: KindSet = KindSet(&Kind::ALL);

    /// Returns true if `kind` is a member of this set.
    pub fn contains(&self, kind: Kind) -> bool {
        self.0.contains(&kind)
    }

    /// The member kinds in order.
    pub fn kinds(&self) -> &'static [Kind] {
        self.0
    }
}

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}
