use crate::config::SearchConfig;
use crate::error::{Result, RouteError};
use crate::frontier::Frontier;
use crate::graph::RoadGraph;
use crate::heuristic::Heuristic;
use crate::path::{Route, SearchStats};
use crate::state::SearchState;
use petgraph::graph::NodeIndex;
use std::time::Instant;
use tracing::{debug, trace};

/// Hooks invoked while a search runs. Every method defaults to doing nothing.
pub trait SearchObserver {
    /// A vertex was taken from the frontier, before the goal test
    fn examine_vertex(&mut self, _vertex: NodeIndex, _g: f64) {}

    /// A cheaper path to `to` going through `from` was recorded
    fn edge_relaxed(&mut self, _from: NodeIndex, _to: NodeIndex, _g: f64) {}

    /// A closed vertex went back to the frontier
    fn vertex_reopened(&mut self, _vertex: NodeIndex) {}
}

impl SearchObserver for () {}

/// Emits a trace event for every step of the search.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver<'g> {
    graph: &'g RoadGraph,
}

impl<'g> TracingObserver<'g> {
    pub fn new(graph: &'g RoadGraph) -> Self {
        TracingObserver { graph }
    }
}

impl SearchObserver for TracingObserver<'_> {
    fn examine_vertex(&mut self, vertex: NodeIndex, g: f64) {
        trace!(vertex = self.graph.id(vertex), g, "examine");
    }

    fn edge_relaxed(&mut self, from: NodeIndex, to: NodeIndex, g: f64) {
        trace!(from = self.graph.id(from), to = self.graph.id(to), g, "relax");
    }

    fn vertex_reopened(&mut self, vertex: NodeIndex) {
        trace!(vertex = self.graph.id(vertex), "reopen");
    }
}

/// Find a minimum-cost route between two vertices given by id.
///
/// See [`astar_observed`] for the details of the search.
pub fn astar<H>(
    graph: &RoadGraph,
    start: &str,
    goal: &str,
    heuristic: &H,
    config: &SearchConfig,
) -> Result<Route>
where
    H: Heuristic + ?Sized,
{
    let start = graph.resolve(start)?;
    let goal = graph.resolve(goal)?;
    astar_observed(graph, start, goal, heuristic, config, &mut ())
}

/// A* search from `start` to `goal`.
///
/// The search stops as soon as the goal is taken from the frontier. With an
/// admissible `heuristic` the returned route has minimum cost; a heuristic
/// that is admissible but not consistent may cause closed vertices to be
/// expanded again. An unreachable goal is reported as
/// [`RouteError::NoPathFound`], an exhausted budget of `config` as
/// [`RouteError::Timeout`].
pub fn astar_observed<H, O>(
    graph: &RoadGraph,
    start: NodeIndex,
    goal: NodeIndex,
    heuristic: &H,
    config: &SearchConfig,
    observer: &mut O,
) -> Result<Route>
where
    H: Heuristic + ?Sized,
    O: SearchObserver + ?Sized,
{
    for vertex in [start, goal] {
        if !graph.contains(vertex) {
            return Err(RouteError::UnknownVertex(format!("#{}", vertex.index())));
        }
    }

    let started = Instant::now();
    let budget = config.time_budget();
    let mut stats = SearchStats::default();
    let mut state = SearchState::new(graph.node_count());
    let mut frontier = Frontier::new();

    let estimate = heuristic.estimate(start);
    state.open_start(start, estimate);
    frontier.insert(start, estimate);

    while let Some((u, f)) = frontier.extract_min() {
        // lazily dropped duplicate of an improved or finished vertex
        if state.is_closed(u) || f > state.f(u) {
            stats.stale += 1;
            continue;
        }

        observer.examine_vertex(u, state.g(u));
        if u == goal {
            debug!(
                start = graph.id(start),
                goal = graph.id(goal),
                cost = state.g(goal),
                expanded = stats.expanded,
                "route found"
            );
            return state.into_route(graph, goal, stats);
        }

        let out_of_iterations = config.max_iterations.is_some_and(|max| stats.expanded >= max);
        let out_of_time = budget.is_some_and(|budget| started.elapsed() >= budget);
        if out_of_iterations || out_of_time {
            debug!(expanded = stats.expanded, "search budget exhausted");
            return Err(RouteError::Timeout {
                expanded: stats.expanded,
                elapsed: started.elapsed(),
            });
        }

        state.close(u);
        stats.expanded += 1;

        let g_u = state.g(u);
        for (v, weight) in graph.neighbors(u) {
            let tentative = g_u + weight;
            if tentative < state.g(v) {
                let f = tentative + heuristic.estimate(v);
                let reopened = state.relax(v, u, tentative, f);
                frontier.insert(v, f);
                stats.relaxed += 1;
                observer.edge_relaxed(u, v, tentative);
                if reopened {
                    stats.reopened += 1;
                    observer.vertex_reopened(v);
                }
            }
        }
    }

    debug!(
        start = graph.id(start),
        goal = graph.id(goal),
        expanded = stats.expanded,
        closed = state.closed_count(),
        "frontier exhausted"
    );
    Err(RouteError::NoPathFound {
        start: graph.id(start).to_owned(),
        goal: graph.id(goal).to_owned(),
    })
}
