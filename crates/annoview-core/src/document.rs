//! The annotation document tree.
//!
//! A parsed `Icon(...)` or `Diagram(...)` annotation is represented as a
//! [`Document`]: a root [`Mapping`] whose values are [`Node`]s. Nodes are
//! mappings (constructor calls such as `Rectangle(...)`), sequences (brace
//! literals such as `{{-50, -10}, {50, 10}}`) or scalars.
//!
//! # Repeated keys
//!
//! Annotations routinely repeat a key within one container, e.g. a shape list
//! holding several `Line(...)` constructors. A mapping keeps every value: an
//! [`Entry`] is either a single node or the ordered list of nodes collected
//! under that key, positioned where the key was first seen.
//! [`Mapping::keyed_entries`] exposes the flattened view where repeated values
//! are keyed `Line_0`, `Line_1`, … and single values keep the bare key.
//!
//! # Example
//!
//! ```
//! use annoview_core::document::{Mapping, Node};
//!
//! let mut graphics = Mapping::new();
//! graphics.insert("Line", Node::Mapping(Mapping::new()));
//! graphics.insert("Text", Node::Mapping(Mapping::new()));
//! graphics.insert("Line", Node::Mapping(Mapping::new()));
//!
//! let keys: Vec<String> = graphics.keyed_entries().map(|(key, _)| key).collect();
//! assert_eq!(keys, ["Line_0", "Line_1", "Text"]);
//! ```

use std::{collections::HashSet, fmt};

use indexmap::IndexMap;
use log::trace;

use crate::geometry::{Extent, Point};

/// A scalar leaf of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A numeric literal or an evaluated expression.
    Number(f64),
    /// A quoted string literal, or an expression that did not evaluate.
    String(String),
    /// Unevaluated source text such as `-0.1 * 100` or `FillPattern.Solid`.
    Expression(String),
}

/// A node of the annotation document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    pub fn number(value: f64) -> Self {
        Self::Scalar(Scalar::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    pub fn expression(source: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Expression(source.into()))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Scalar(Scalar::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Reads a sequence of numbers such as a color `{0, 0, 255}`.
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        self.as_sequence()?.iter().map(Node::as_number).collect()
    }

    /// Reads a coordinate pair `{x, y}`.
    pub fn as_point(&self) -> Option<Point> {
        match self.as_sequence()? {
            [x, y] => Some(Point::new(x.as_number()?, y.as_number()?)),
            _ => None,
        }
    }

    /// Reads a list of coordinate pairs `{{x1, y1}, {x2, y2}, ...}`.
    pub fn as_points(&self) -> Option<Vec<Point>> {
        self.as_sequence()?.iter().map(Node::as_point).collect()
    }

    /// Reads an extent `{{x1, y1}, {x2, y2}}`.
    pub fn as_extent(&self) -> Option<Extent> {
        match self.as_points()?.as_slice() {
            [first, second] => Some(Extent::new(*first, *second)),
            _ => None,
        }
    }
}

/// The value(s) stored under one mapping key.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Single(Node),
    Repeated(Vec<Node>),
}

impl Entry {
    /// All nodes of this entry in encounter order.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Self::Single(node) => std::slice::from_ref(node),
            Self::Repeated(nodes) => nodes,
        }
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        match self {
            Self::Single(node) => std::slice::from_mut(node),
            Self::Repeated(nodes) => nodes,
        }
    }

    /// The first node stored under the key.
    pub fn first(&self) -> &Node {
        &self.nodes()[0]
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self, Self::Repeated(_))
    }

    fn push(&mut self, node: Node) {
        match self {
            Self::Single(_) => {
                let Self::Single(first) =
                    std::mem::replace(self, Self::Repeated(Vec::new()))
                else {
                    unreachable!("entry was just matched as single");
                };
                *self = Self::Repeated(vec![first, node]);
            }
            Self::Repeated(nodes) => nodes.push(node),
        }
    }
}

/// An ordered mapping with unique keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: IndexMap<String, Entry>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, folding it into the existing entry if the key was
    /// already seen.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        let key = key.into();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                trace!(key = key.as_str(); "Folding repeated key into entry");
                entry.push(node);
            }
            None => {
                self.entries.insert(key, Entry::Single(node));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.values_mut()
    }

    /// Iterates over every node with a unique key: repeated entries are
    /// suffixed `<key>_0`, `<key>_1`, …; single entries keep the bare key.
    ///
    /// A suffix already used as a literal key is skipped, so `Line_0` next to
    /// two `Line` entries yields `Line_0`, `Line_1`, `Line_2`.
    pub fn keyed_entries(&self) -> impl Iterator<Item = (String, &Node)> {
        let mut taken: HashSet<String> = self.entries.keys().cloned().collect();
        let mut keyed = Vec::new();

        for (key, entry) in &self.entries {
            if !entry.is_repeated() {
                keyed.push((key.clone(), entry.first()));
                continue;
            }
            let mut suffix = 0usize;
            for node in entry.nodes() {
                let name = loop {
                    let candidate = format!("{key}_{suffix}");
                    suffix += 1;
                    if taken.insert(candidate.clone()) {
                        break candidate;
                    }
                };
                keyed.push((name, node));
            }
        }

        keyed.into_iter()
    }
}

/// A parsed annotation block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Mapping,
}

impl Document {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Mapping {
        &mut self.root
    }

    /// The `graphics` entry holding the shape list, if present.
    pub fn graphics(&self) -> Option<&Entry> {
        self.root.get("graphics")
    }
}

/// Writes the node in a strict nested-object notation (JSON-like, with
/// repeated keys suffixed), suitable for logs and debugging output.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(mapping) => fmt::Display::fmt(mapping, f),
            Self::Sequence(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Scalar(Scalar::Number(value)) => write!(f, "{value}"),
            Self::Scalar(Scalar::String(value) | Scalar::Expression(value)) => {
                write!(f, "{value:?}")
            }
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, node)) in self.keyed_entries().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key:?}: {node}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
