//! Street network graph supplied by a [`GraphProvider`](crate::GraphProvider).
//!
//! Nodes carry WGS84 coordinates with `x = longitude`, `y = latitude`. Edges
//! keep their insertion order, which is the order aggregation walks them.

use std::collections::HashMap;

use geo::Coord;

/// Name attribute of a street segment.
///
/// Some segments carry alternate designations; these are kept as an ordered
/// list of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreetName {
    /// A single name.
    Single(String),
    /// Several candidate names, most authoritative first.
    Aliases(Vec<String>),
}

impl StreetName {
    /// Candidate names in priority order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> + '_ {
        let names: &[String] = match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Aliases(names) => names,
        };
        names.iter().map(String::as_str)
    }

    /// Build a name from a list, collapsing one-element lists and
    /// returning `None` when no non-blank name remains.
    #[must_use]
    pub fn from_candidates<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.trim().is_empty())
            .collect();
        match names.len() {
            0 => None,
            1 => names.pop().map(Self::Single),
            _ => Some(Self::Aliases(names)),
        }
    }
}

impl From<&str> for StreetName {
    fn from(name: &str) -> Self {
        Self::Single(name.to_owned())
    }
}

impl From<String> for StreetName {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

/// A directed street segment between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetEdge {
    /// Start node identifier.
    pub from: u64,
    /// End node identifier.
    pub to: u64,
    /// Optional name attribute.
    pub name: Option<StreetName>,
}

/// A read-only street network.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parkzone_core::StreetGraph;
///
/// let mut graph = StreetGraph::new();
/// graph.add_node(1, Coord { x: 20.39, y: 45.38 });
/// graph.add_node(2, Coord { x: 20.40, y: 45.38 });
/// graph.add_edge(1, 2, Some("Пупинова".into()));
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edges().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreetGraph {
    nodes: HashMap<u64, Coord<f64>>,
    edges: Vec<StreetEdge>,
}

impl StreetGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node.
    pub fn add_node(&mut self, id: u64, location: Coord<f64>) {
        self.nodes.insert(id, location);
    }

    /// Append an edge. Endpoints are not checked against the node set.
    pub fn add_edge(&mut self, from: u64, to: u64, name: Option<StreetName>) {
        self.edges.push(StreetEdge { from, to, name });
    }

    /// Coordinate of node `id`, if present.
    #[must_use]
    pub fn node(&self, id: u64) -> Option<Coord<f64>> {
        self.nodes.get(&id).copied()
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[StreetEdge] {
        &self.edges
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
