use crate::config::SearchConfig;
use crate::error::Result;
use crate::graph::RoadGraph;
use crate::path::Route;
use crate::search::astar_observed;
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A single start/goal request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub start: String,
    pub goal: String,
}

impl Query {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Query {
            start: start.into(),
            goal: goal.into(),
        }
    }
}

/// Answer one query with the heuristic named in `config`.
pub fn run_query(graph: &RoadGraph, query: &Query, config: &SearchConfig) -> Result<Route> {
    let start = graph.resolve(&query.start)?;
    let goal = graph.resolve(&query.goal)?;
    let heuristic = config.heuristic.build(graph, goal);
    astar_observed(graph, start, goal, heuristic.as_ref(), config, &mut ())
}

/// Answer independent queries in parallel over one shared graph. Results are
/// in the order of `queries`.
pub fn search_many(graph: &RoadGraph, queries: &[Query], config: &SearchConfig) -> Vec<Result<Route>> {
    search_many_with_progress(graph, queries, config, ProgressBar::hidden())
}

/// Same as [`search_many`], advancing `progress` once per answered query.
pub fn search_many_with_progress(
    graph: &RoadGraph,
    queries: &[Query],
    config: &SearchConfig,
    progress: ProgressBar,
) -> Vec<Result<Route>> {
    queries
        .par_iter()
        .progress_with(progress)
        .map(|query| run_query(graph, query, config))
        .collect()
}
