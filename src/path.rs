use crate::error::{Result, RouteError};
use crate::graph::RoadGraph;
use crate::state::SearchState;
use petgraph::graph::NodeIndex;
use serde::Serialize;

/// Counters collected while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Vertices closed
    pub expanded: usize,
    /// Successful relaxations
    pub relaxed: usize,
    /// Closed vertices opened again by a cheaper path
    pub reopened: usize,
    /// Outdated frontier entries skipped
    pub stale: usize,
}

/// Minimum-cost route from start to goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub path: Vec<String>,
    pub cost: f64,
    pub stats: SearchStats,
    #[serde(skip)]
    pub vertices: Vec<NodeIndex>,
}

impl Route {
    pub fn start(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    pub fn goal(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Number of edges travelled
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Walk the predecessor table back from `goal` until the start vertex, which
/// is its own predecessor. The path is returned in start-to-goal order.
pub fn reconstruct(predecessors: &[Option<NodeIndex>], goal: NodeIndex) -> Result<Vec<NodeIndex>> {
    let unknown = |v: NodeIndex| RouteError::UnknownVertex(format!("#{}", v.index()));
    let mut path = Vec::new();
    let mut vertex = goal;
    loop {
        path.push(vertex);
        let predecessor = predecessors
            .get(vertex.index())
            .copied()
            .flatten()
            .ok_or_else(|| unknown(vertex))?;
        if predecessor == vertex {
            break;
        }
        vertex = predecessor;
    }
    path.reverse();
    Ok(path)
}

impl SearchState {
    /// Consume the tables of a finished search into the route ending at `goal`.
    pub fn into_route(self, graph: &RoadGraph, goal: NodeIndex, stats: SearchStats) -> Result<Route> {
        let vertices = reconstruct(self.predecessors(), goal)
            .map_err(|err| match graph.vertex(goal) {
                Some(vertex) => RouteError::UnknownVertex(vertex.id.clone()),
                None => err,
            })?;
        let path = vertices.iter().map(|&v| graph.id(v).to_owned()).collect();
        Ok(Route {
            path,
            cost: self.g(goal),
            stats,
            vertices,
        })
    }
}
