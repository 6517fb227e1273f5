use crate::graph::{Location, RoadGraph};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Estimate of the remaining cost from a vertex to the goal of one search.
///
/// The estimate must never be negative. The returned route is optimal only
/// if the estimate never exceeds the true remaining cost (admissible). A
/// consistent estimate, `estimate(u) <= weight(u, v) + estimate(v)` along
/// every edge, additionally means no vertex is expanded twice. Neither
/// property is checked by the engine; see [`consistency_violations`] for an
/// offline check.
pub trait Heuristic {
    fn estimate(&self, vertex: NodeIndex) -> f64;
}

/// Always estimates zero, which turns the search into Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _vertex: NodeIndex) -> f64 {
        0.0
    }
}

/// Straight-line distance between a vertex and the goal.
///
/// Admissible only when no edge is cheaper than the distance between its
/// endpoints. Vertices without a location, or a goal without one, are
/// estimated at zero.
#[derive(Debug, Clone, Copy)]
pub struct EuclideanHeuristic<'g> {
    graph: &'g RoadGraph,
    goal: Option<Location>,
}

impl<'g> EuclideanHeuristic<'g> {
    pub fn new(graph: &'g RoadGraph, goal: NodeIndex) -> Self {
        EuclideanHeuristic {
            graph,
            goal: graph.location(goal),
        }
    }
}

impl Heuristic for EuclideanHeuristic<'_> {
    fn estimate(&self, vertex: NodeIndex) -> f64 {
        match (self.graph.location(vertex), self.goal) {
            (Some(here), Some(goal)) => here.distance(&goal),
            _ => 0.0,
        }
    }
}

/// Adapts a closure into a [`Heuristic`]
#[derive(Debug, Clone, Copy)]
pub struct FnHeuristic<F>(pub F);

impl<F> Heuristic for FnHeuristic<F>
where
    F: Fn(NodeIndex) -> f64,
{
    fn estimate(&self, vertex: NodeIndex) -> f64 {
        (self.0)(vertex)
    }
}

/// Heuristics selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    Euclidean,
    Zero,
}

impl HeuristicKind {
    pub fn build<'g>(self, graph: &'g RoadGraph, goal: NodeIndex) -> Box<dyn Heuristic + 'g> {
        match self {
            HeuristicKind::Euclidean => Box::new(EuclideanHeuristic::new(graph, goal)),
            HeuristicKind::Zero => Box::new(ZeroHeuristic),
        }
    }
}

/// Edges along which `heuristic` is not consistent, as `(u, v)` with
/// `estimate(u) > weight(u, v) + estimate(v)`.
pub fn consistency_violations<H>(graph: &RoadGraph, heuristic: &H) -> Vec<(NodeIndex, NodeIndex)>
where
    H: Heuristic + ?Sized,
{
    let mut violations = Vec::new();
    for (from, to, weight) in graph.edges() {
        let mut check = |u: NodeIndex, v: NodeIndex| {
            let hu = heuristic.estimate(u);
            let hv = heuristic.estimate(v);
            if hu > weight + hv {
                warn!(
                    from = graph.id(u),
                    to = graph.id(v),
                    weight,
                    "heuristic drops by {} along an edge",
                    hu - hv
                );
                violations.push((u, v));
            }
        };
        check(from, to);
        if !graph.is_directed() {
            check(to, from);
        }
    }
    violations
}
