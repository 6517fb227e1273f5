use crate::error::{Result, RouteError};
use anyhow::Context;
use indexmap::IndexMap;
use itertools::Itertools;
use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Planar position of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Location { x, y }
    }

    /// Straight-line distance to another location
    pub fn distance(&self, other: &Location) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: String,
    pub location: Option<Location>,
}

/// Storage of the road graph. Edges of undirected graphs are stored once and
/// traversed from both endpoints.
pub type Arcs = DiGraph<Vertex, f64, u32>;

/// Weighted graph searched by the engine.
///
/// Vertices are addressed by their string id on the outside and by a dense
/// [`NodeIndex`] inside a search. The graph is only borrowed immutably while
/// searching, so any number of searches can share one instance.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    arcs: Arcs,
    ids: IndexMap<String, NodeIndex>,
    directed: bool,
}

impl RoadGraph {
    pub fn new(directed: bool) -> Self {
        RoadGraph {
            directed,
            ..Default::default()
        }
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.arcs.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.arcs.edge_count()
    }

    pub fn add_vertex(&mut self, id: impl Into<String>, location: Option<Location>) -> Result<NodeIndex> {
        let id = id.into();
        if self.ids.contains_key(&id) {
            return Err(RouteError::DuplicateVertex(id));
        }
        let idx = self.arcs.add_node(Vertex {
            id: id.clone(),
            location,
        });
        self.ids.insert(id, idx);
        Ok(idx)
    }

    /// Add an edge between two existing vertices. The graph is left untouched
    /// when the edge is rejected.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<EdgeIndex> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        // NaN fails both comparisons, so it is rejected here as well
        if !(weight >= 0.0 && weight.is_finite()) {
            return Err(RouteError::InvalidWeight {
                from: from.to_owned(),
                to: to.to_owned(),
                weight,
            });
        }
        Ok(self.arcs.add_edge(source, target, weight))
    }

    pub fn resolve(&self, id: &str) -> Result<NodeIndex> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| RouteError::UnknownVertex(id.to_owned()))
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        idx.index() < self.arcs.node_count()
    }

    pub fn vertex(&self, idx: NodeIndex) -> Option<&Vertex> {
        self.arcs.node_weight(idx)
    }

    /// Id of a vertex of this graph. Panics if `idx` does not belong to it.
    pub fn id(&self, idx: NodeIndex) -> &str {
        &self.arcs[idx].id
    }

    /// Location of a vertex, `None` when it has none or is not in the graph
    pub fn location(&self, idx: NodeIndex) -> Option<Location> {
        self.arcs.node_weight(idx).and_then(|v| v.location)
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = (NodeIndex, &Vertex)> + '_ {
        self.ids.values().map(|&idx| (idx, &self.arcs[idx]))
    }

    /// Stored edges as `(from, to, weight)`, each undirected edge listed once
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.arcs
            .edge_references()
            .map(|e| (e.source(), e.target(), *e.weight()))
    }

    /// Vertices reachable over one edge from `idx`, with the edge weight.
    ///
    /// The order is fixed for a given graph: outgoing edges first, then for
    /// undirected graphs the edges stored in the other direction.
    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        let outgoing = self
            .arcs
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), *e.weight()));
        let incoming = (!self.directed)
            .then(|| {
                self.arcs
                    .edges_directed(idx, Direction::Incoming)
                    .map(|e| (e.source(), *e.weight()))
            })
            .into_iter()
            .flatten();
        outgoing.chain(incoming)
    }

    /// Weight of the cheapest edge leading from `from` to `to`
    pub fn edge_weight(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.neighbors(from)
            .filter(|&(n, _)| n == to)
            .map(|(_, w)| w)
            .min_by(f64::total_cmp)
    }

    /// Sum of the edge weights along `path`, or `None` if two consecutive
    /// vertices are not adjacent.
    pub fn path_cost(&self, path: &[NodeIndex]) -> Option<f64> {
        path.iter()
            .tuple_windows()
            .map(|(&n1, &n2)| self.edge_weight(n1, n2))
            .sum()
    }

    /// Number of weakly connected components
    pub fn component_count(&self) -> usize {
        connected_components(&self.arcs)
    }

    pub fn from_description(description: GraphDescription) -> Result<Self> {
        let mut graph = RoadGraph::new(description.directed);
        for vertex in description.vertices {
            let location = vertex.x.zip(vertex.y).map(|(x, y)| Location::new(x, y));
            graph.add_vertex(vertex.id, location)?;
        }
        for edge in description.edges {
            graph.add_edge(&edge.from, &edge.to, edge.weight)?;
        }
        Ok(graph)
    }

    /// Load a graph from a JSON description file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read graph file {}", path.display()))?;
        let description: GraphDescription = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse graph file {}", path.display()))?;
        let graph = Self::from_description(description)
            .with_context(|| format!("invalid graph in {}", path.display()))?;
        Ok(graph)
    }
}

/// Serialized form of a [`RoadGraph`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub directed: bool,
    pub vertices: Vec<VertexRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub weight: f64,
}
