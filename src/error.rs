use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouteError>;

/// Failures of graph construction and route search.
///
/// All of these are ordinary outcomes the caller is expected to handle,
/// an unreachable goal included.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("vertex `{0}` already exists")]
    DuplicateVertex(String),

    /// Carries the vertex id, or `#<index>` for a bare index outside the graph
    #[error("unknown vertex `{0}`")]
    UnknownVertex(String),

    #[error("invalid weight {weight} on edge `{from}` - `{to}`")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("no path from `{start}` to `{goal}`")]
    NoPathFound { start: String, goal: String },

    #[error("search budget exhausted after expanding {expanded} vertices in {elapsed:?}")]
    Timeout { expanded: usize, elapsed: Duration },
}

impl RouteError {
    /// Short tag naming the failure kind, stable for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::DuplicateVertex(_) => "DuplicateVertex",
            RouteError::UnknownVertex(_) => "UnknownVertex",
            RouteError::InvalidWeight { .. } => "InvalidWeight",
            RouteError::NoPathFound { .. } => "NoPathFound",
            RouteError::Timeout { .. } => "Timeout",
        }
    }
}
