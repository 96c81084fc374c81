// Ordered property edges.
//
// The property graph's edges are logically unordered, but several
// source-level constructs are not: parameter lists, throw-type lists,
// try-resources, catch clauses, interface lists. Those relationships are
// stored as edges carrying an explicit `index` property, so the source
// order can be recovered no matter how the edges are physically stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Edge properties ───────────────────────────────────────────────────

/// Property keys an edge may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeProperty {
    /// Position of the child among its siblings (0-based, contiguous).
    Index,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(u64),
    Bool(bool),
    Text(String),
}

// ── Property edge ─────────────────────────────────────────────────────

/// A directed edge to an owned child node, carrying a property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEdge<T> {
    end: T,
    properties: BTreeMap<EdgeProperty, PropertyValue>,
}

impl<T> PropertyEdge<T> {
    pub fn new(end: T) -> Self {
        Self {
            end,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_index(end: T, index: usize) -> Self {
        let mut edge = Self::new(end);
        edge.properties
            .insert(EdgeProperty::Index, PropertyValue::Int(index as u64));
        edge
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    pub fn into_end(self) -> T {
        self.end
    }

    /// The `index` property, if this edge carries one.
    pub fn index(&self) -> Option<usize> {
        match self.properties.get(&EdgeProperty::Index) {
            Some(PropertyValue::Int(v)) => usize::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn properties(&self) -> &BTreeMap<EdgeProperty, PropertyValue> {
        &self.properties
    }
}

// ── Ordered edge list ─────────────────────────────────────────────────

/// An edge list whose children carry an explicit order.
///
/// `set` is the single mutation path: it replaces the whole edge set and
/// assigns a contiguous 0-based `index` to every child. `ordered` reads the
/// children back sorted by `index`, independent of how the edges are
/// physically stored — the view is read-only; changing membership requires
/// another `set`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedEdges<T> {
    edges: Vec<PropertyEdge<T>>,
}

impl<T> OrderedEdges<T> {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Replace the edge set; one edge per child, `index` = input position.
    pub fn set<I>(&mut self, children: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.edges = children
            .into_iter()
            .enumerate()
            .map(|(index, child)| PropertyEdge::with_index(child, index))
            .collect();
    }

    pub fn from_children<I>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut edges = Self::new();
        edges.set(children);
        edges
    }

    /// Adopt edges in whatever physical order they arrived (e.g. from a
    /// deserialized graph). `ordered` still yields index order.
    pub fn from_edges(edges: Vec<PropertyEdge<T>>) -> Self {
        Self { edges }
    }

    /// Children sorted by ascending `index`, as a read-only view.
    ///
    /// Edges without an `index` sort after all indexed ones, keeping their
    /// relative storage order.
    pub fn ordered(&self) -> Vec<&T> {
        let mut edges: Vec<&PropertyEdge<T>> = self.edges.iter().collect();
        edges.sort_by_key(|e| e.index().unwrap_or(usize::MAX));
        edges.into_iter().map(PropertyEdge::end).collect()
    }

    /// Consume the list, yielding owned children in index order.
    pub fn into_ordered(self) -> Vec<T> {
        let mut edges = self.edges;
        edges.sort_by_key(|e| e.index().unwrap_or(usize::MAX));
        edges.into_iter().map(PropertyEdge::into_end).collect()
    }

    /// The raw edges in physical storage order.
    pub fn edges(&self) -> &[PropertyEdge<T>] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<T> Default for OrderedEdges<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
