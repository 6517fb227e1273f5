use crate::heuristic::HeuristicKind;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options of a single search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default)]
#[serde(default)]
pub struct SearchConfig {
    /// Estimator used to guide the search towards the goal
    pub heuristic: HeuristicKind,
    /// Maximum number of vertices expanded before giving up with a timeout
    #[builder(setter(strip_option))]
    pub max_iterations: Option<usize>,
    /// Wall clock budget in milliseconds
    #[builder(setter(strip_option))]
    pub time_budget_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            heuristic: HeuristicKind::Euclidean,
            max_iterations: None,
            time_budget_ms: None,
        }
    }
}

impl SearchConfig {
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    pub fn is_bounded(&self) -> bool {
        self.max_iterations.is_some() || self.time_budget_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SearchConfigBuilder::default().build().unwrap();
        assert_eq!(config, SearchConfig::default());
        assert!(!config.is_bounded());
        assert_eq!(config.time_budget(), None);
    }

    #[test]
    fn test_builder_budget() {
        let config = SearchConfigBuilder::default()
            .heuristic(HeuristicKind::Zero)
            .max_iterations(10)
            .time_budget_ms(250)
            .build()
            .unwrap();
        assert_eq!(config.heuristic, HeuristicKind::Zero);
        assert_eq!(config.max_iterations, Some(10));
        assert_eq!(config.time_budget(), Some(Duration::from_millis(250)));
        assert!(config.is_bounded());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SearchConfig = serde_json::from_str(r#"{"heuristic":"zero"}"#).unwrap();
        assert_eq!(config.heuristic, HeuristicKind::Zero);
        assert_eq!(config.max_iterations, None);
    }
}
