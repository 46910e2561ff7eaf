//! Parsing selector specs into [`Selector`] trees.
//!
//! A spec is an ordinary node tree. Each selector is a map with exactly one
//! entry whose key names the variant and whose value is the variant's body:
//!
//! | Key | Variant                | Body fields                                        |
//! |-----|------------------------|----------------------------------------------------|
//! | `.` | Matcher                | map, contents ignored                              |
//! | `a` | ExploreAll             | `>` next selector                                  |
//! | `f` | ExploreFields          | `f>` map of field name to selector                 |
//! | `i` | ExploreIndex           | `i` index, `>` next selector                       |
//! | `r` | ExploreRange           | `^` start, `$` end (exclusive), `>` next selector  |
//! | `\|` | ExploreUnion          | list of selectors (the body itself)                |
//! | `R` | ExploreRecursive       | `l` limit (`{"none": {}}` or `{"depth": n}`), `:>` sequence |
//! | `@` | ExploreRecursiveEdge   | empty map                                          |
//!
//! The conditional variant `&` and the recursive `!` stop condition are
//! recognized and rejected.

use super::{RecursionLimit, Selector, SelectorError};
use crate::{
    kind::Kind,
    node::{MapNode, Node},
};

/// Reserved keys of the selector spec vocabulary.
pub mod keys {
    pub const MATCHER: &str = ".";
    pub const EXPLORE_ALL: &str = "a";
    pub const EXPLORE_FIELDS: &str = "f";
    pub const EXPLORE_INDEX: &str = "i";
    pub const EXPLORE_RANGE: &str = "r";
    pub const EXPLORE_UNION: &str = "|";
    pub const EXPLORE_RECURSIVE: &str = "R";
    pub const EXPLORE_RECURSIVE_EDGE: &str = "@";
    pub const EXPLORE_CONDITIONAL: &str = "&";

    pub const NEXT: &str = ">";
    pub const FIELDS: &str = "f>";
    pub const INDEX: &str = "i";
    pub const START: &str = "^";
    pub const END: &str = "$";
    pub const SEQUENCE: &str = ":>";
    pub const LIMIT: &str = "l";
    pub const LIMIT_NONE: &str = "none";
    pub const LIMIT_DEPTH: &str = "depth";
    pub const STOP_AT: &str = "!";
}

impl Selector {
    /// Parses a selector spec node.
    ///
    /// # Errors
    /// Returns a [`SelectorError`] describing the first structural problem found.
    pub fn parse(spec: &Node) -> Result<Selector, SelectorError> {
        let mut parser = Parser::default();
        let selector = parser.parse(spec)?;
        tracing::trace!(?selector, "parsed selector spec");
        Ok(selector)
    }
}

impl TryFrom<&Node> for Selector {
    type Error = SelectorError;

    fn try_from(spec: &Node) -> Result<Self, Self::Error> {
        Selector::parse(spec)
    }
}

/// Parser state: one edge counter per enclosing ExploreRecursive.
#[derive(Debug, Default)]
struct Parser {
    edges: Vec<usize>,
}

impl Parser {
    fn parse(&mut self, spec: &Node) -> Result<Selector, SelectorError> {
        let Node::Map(map) = spec else {
            return Err(SelectorError::NotAMap { kind: spec.kind() });
        };
        let mut entries = map.iter();
        let (Some((key, body)), None) = (entries.next(), entries.next()) else {
            return Err(SelectorError::NotSingleEntry { len: map.len() });
        };

        match key {
            keys::MATCHER => {
                body_map("Matcher", body)?;
                Ok(Selector::Matcher)
            }
            keys::EXPLORE_ALL => {
                let body = body_map("ExploreAll", body)?;
                let next = self.parse(field(body, "ExploreAll", keys::NEXT)?)?;
                Ok(Selector::ExploreAll {
                    next: Box::new(next),
                })
            }
            keys::EXPLORE_FIELDS => self.parse_fields(body),
            keys::EXPLORE_INDEX => {
                let body = body_map("ExploreIndex", body)?;
                let index = index_field(body, "ExploreIndex", keys::INDEX)?;
                let next = self.parse(field(body, "ExploreIndex", keys::NEXT)?)?;
                Ok(Selector::ExploreIndex {
                    index,
                    next: Box::new(next),
                })
            }
            keys::EXPLORE_RANGE => {
                let body = body_map("ExploreRange", body)?;
                let start = index_field(body, "ExploreRange", keys::START)?;
                let end = index_field(body, "ExploreRange", keys::END)?;
                if end <= start {
                    return Err(SelectorError::InvalidRange { start, end });
                }
                let next = self.parse(field(body, "ExploreRange", keys::NEXT)?)?;
                Ok(Selector::ExploreRange {
                    start,
                    end,
                    next: Box::new(next),
                })
            }
            keys::EXPLORE_UNION => self.parse_union(body),
            keys::EXPLORE_RECURSIVE => self.parse_recursive(body),
            keys::EXPLORE_RECURSIVE_EDGE => {
                body_map("ExploreRecursiveEdge", body)?;
                let Some(count) = self.edges.last_mut() else {
                    return Err(SelectorError::EdgeOutsideRecursion);
                };
                *count += 1;
                Ok(Selector::ExploreRecursiveEdge)
            }
            keys::EXPLORE_CONDITIONAL => Err(SelectorError::Unsupported {
                key: key.to_string(),
                reason: "conditional selectors are not interpreted".to_string(),
            }),
            other => Err(SelectorError::UnknownVariant {
                key: other.to_string(),
            }),
        }
    }

    fn parse_fields(&mut self, body: &Node) -> Result<Selector, SelectorError> {
        let body = body_map("ExploreFields", body)?;
        let fields = field(body, "ExploreFields", keys::FIELDS)?;
        let Node::Map(fields) = fields else {
            return Err(SelectorError::InvalidField {
                variant: "ExploreFields",
                field: keys::FIELDS,
                reason: format!("must be a map, found {}", fields.kind()),
            });
        };
        let mut parsed = Vec::with_capacity(fields.len());
        for (name, spec) in fields.iter() {
            parsed.push((name.to_string(), self.parse(spec)?));
        }
        Ok(Selector::ExploreFields { fields: parsed })
    }

    fn parse_union(&mut self, body: &Node) -> Result<Selector, SelectorError> {
        let Node::List(items) = body else {
            return Err(SelectorError::InvalidBody {
                variant: "ExploreUnion",
                expected: Kind::List,
                actual: body.kind(),
            });
        };
        if items.is_empty() {
            return Err(SelectorError::InvalidField {
                variant: "ExploreUnion",
                field: keys::EXPLORE_UNION,
                reason: "must have at least one member".to_string(),
            });
        }
        let members = items
            .iter()
            .map(|item| self.parse(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Selector::ExploreUnion { members })
    }

    fn parse_recursive(&mut self, body: &Node) -> Result<Selector, SelectorError> {
        let body = body_map("ExploreRecursive", body)?;
        if body.get(keys::STOP_AT).is_some() {
            return Err(SelectorError::Unsupported {
                key: keys::STOP_AT.to_string(),
                reason: "recursion stop conditions are not interpreted".to_string(),
            });
        }
        let limit = parse_limit(field(body, "ExploreRecursive", keys::LIMIT)?)?;
        let sequence = field(body, "ExploreRecursive", keys::SEQUENCE)?;

        self.edges.push(0);
        let sequence = self.parse(sequence);
        let edges = self.edges.pop().unwrap_or(0);
        let sequence = sequence?;

        if edges == 0 {
            return Err(SelectorError::RecursionWithoutEdge);
        }
        if sequence.has_head_edge() {
            return Err(SelectorError::EdgeInHeadPosition);
        }
        Ok(Selector::ExploreRecursive {
            limit,
            sequence: Box::new(sequence),
        })
    }
}

fn parse_limit(limit: &Node) -> Result<RecursionLimit, SelectorError> {
    let invalid = |reason: String| SelectorError::InvalidField {
        variant: "ExploreRecursive",
        field: keys::LIMIT,
        reason,
    };
    let Node::Map(map) = limit else {
        return Err(invalid(format!("must be a map, found {}", limit.kind())));
    };
    let mut entries = map.iter();
    let (Some((key, value)), None) = (entries.next(), entries.next()) else {
        return Err(invalid(format!(
            "must be a single-entry map, found {} entries",
            map.len()
        )));
    };
    match key {
        keys::LIMIT_NONE => Ok(RecursionLimit::Unbounded),
        keys::LIMIT_DEPTH => {
            let depth = value
                .as_int()
                .map_err(|_| invalid(format!("depth must be an int, found {}", value.kind())))?;
            let depth = u64::try_from(depth)
                .map_err(|_| invalid(format!("depth must be non-negative, found {depth}")))?;
            Ok(RecursionLimit::Depth(depth))
        }
        other => Err(invalid(format!("unknown limit \"{other}\""))),
    }
}

fn body_map<'n>(variant: &'static str, body: &'n Node) -> Result<&'n MapNode, SelectorError> {
    match body {
        Node::Map(map) => Ok(map),
        other => Err(SelectorError::InvalidBody {
            variant,
            expected: Kind::Map,
            actual: other.kind(),
        }),
    }
}

fn field<'n>(
    body: &'n MapNode,
    variant: &'static str,
    name: &'static str,
) -> Result<&'n Node, SelectorError> {
    body.get(name).ok_or(SelectorError::MissingField {
        variant,
        field: name,
    })
}

fn index_field(
    body: &MapNode,
    variant: &'static str,
    name: &'static str,
) -> Result<usize, SelectorError> {
    let value = field(body, variant, name)?;
    let n = value.as_int().map_err(|_| SelectorError::InvalidField {
        variant,
        field: name,
        reason: format!("must be an int, found {}", value.kind()),
    })?;
    usize::try_from(n).map_err(|_| SelectorError::InvalidField {
        variant,
        field: name,
        reason: format!("must be non-negative, found {n}"),
    })
}
