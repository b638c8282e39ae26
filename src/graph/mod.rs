//! Generic node/edge/category graph handed to the exporters.
//!
//! A [`Graph`] is built once by a projection and then only read. Nodes are keyed by id
//! and keep insertion order; adding a node whose id is already present merges into the
//! existing node instead of duplicating it. Edges are an ordered list with no
//! de-duplication and no referential checks: an edge may name a node that is not in
//! the graph.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A node/edge/category graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
    categories: Vec<Category>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, merging into an existing node with the same id.
    ///
    /// The existing node keeps its position and any field it already has; label,
    /// category and properties it lacks are taken from `node`.
    pub fn add_node(&mut self, node: Node) {
        if let Some(&index) = self.node_index.get(&node.id) {
            let existing = &mut self.nodes[index];
            if existing.label.is_none() {
                existing.label = node.label;
            }
            if existing.category.is_none() {
                existing.category = node.category;
            }
            for (key, value) in node.properties {
                existing.properties.entry(key).or_insert(value);
            }
        } else {
            self.node_index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
        }
    }

    /// Append an edge.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Add a category unless one with the same id exists.
    pub fn add_category(&mut self, category: Category) {
        if !self.categories.iter().any(|c| c.id == category.id) {
            self.categories.push(category);
        }
    }

    /// Nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Categories in insertion order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&index| &self.nodes[index])
    }

    /// Whether a node with this id exists.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Edges whose source or target has no node.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|edge| !self.contains_node(&edge.source) || !self.contains_node(&edge.target))
    }

    /// Whether any node carries properties.
    #[must_use]
    pub fn has_properties(&self) -> bool {
        self.nodes.iter().any(|node| !node.properties.is_empty())
    }
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique id
    pub id: String,
    /// Display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Category id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form properties, sorted by key
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Node {
    /// A node with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            category: None,
            properties: BTreeMap::new(),
        }
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    /// An unlabeled edge.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A node category with its rendering hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Unique id, referenced by [`Node::category`]
    pub id: String,
    /// Display label
    pub label: String,
    /// Background color for nodes in this category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

/// An opaque RGB color, rendered as `#FFRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#FF{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
