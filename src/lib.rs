pub mod batch;
pub mod config;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod path;
pub mod search;
pub mod state;

pub use batch::{run_query, search_many, search_many_with_progress, Query};
pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{Result, RouteError};
pub use graph::{GraphDescription, Location, RoadGraph};
pub use heuristic::{EuclideanHeuristic, FnHeuristic, Heuristic, HeuristicKind, ZeroHeuristic};
pub use path::{Route, SearchStats};
pub use search::{astar, astar_observed, SearchObserver, TracingObserver};
