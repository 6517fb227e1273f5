use route_astar::{run_query, search_many, HeuristicKind, Query, RoadGraph, SearchConfig};
use std::io::Write;
use tempfile::NamedTempFile;

const ROADS: &str = r#"{
    "directed": false,
    "vertices": [
        {"id": "harbour", "x": 0.0, "y": 0.0},
        {"id": "market", "x": 30.0, "y": 40.0},
        {"id": "castle", "x": 60.0, "y": 0.0},
        {"id": "mill", "x": 60.0, "y": 80.0},
        {"id": "lighthouse", "x": 200.0, "y": 200.0}
    ],
    "edges": [
        {"from": "harbour", "to": "market", "weight": 60},
        {"from": "market", "to": "mill", "weight": 55},
        {"from": "harbour", "to": "castle", "weight": 75},
        {"from": "castle", "to": "mill", "weight": 90}
    ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_search() {
    let file = write_temp(ROADS);
    let graph = RoadGraph::from_file(file.path()).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.component_count(), 2);

    let queries = vec![
        Query::new("harbour", "mill"),
        Query::new("castle", "market"),
        Query::new("harbour", "lighthouse"),
    ];
    let config = SearchConfig::default();
    let results = search_many(&graph, &queries, &config);

    let route = results[0].as_ref().unwrap();
    assert_eq!(route.path, vec!["harbour", "market", "mill"]);
    assert_eq!(route.cost, 115.0);

    let route = results[1].as_ref().unwrap();
    assert_eq!(route.path, vec!["castle", "harbour", "market"]);
    assert_eq!(route.cost, 135.0);

    assert_eq!(results[2].as_ref().unwrap_err().kind(), "NoPathFound");

    let zero = SearchConfig {
        heuristic: HeuristicKind::Zero,
        ..Default::default()
    };
    let route = run_query(&graph, &queries[0], &zero).unwrap();
    assert_eq!(route.cost, 115.0);
}

#[test]
fn test_route_serializes_without_indices() {
    let file = write_temp(ROADS);
    let graph = RoadGraph::from_file(file.path()).unwrap();
    let route = run_query(&graph, &Query::new("harbour", "market"), &SearchConfig::default()).unwrap();
    let json = serde_json::to_value(&route).unwrap();
    assert_eq!(json["path"], serde_json::json!(["harbour", "market"]));
    assert_eq!(json["cost"], serde_json::json!(60.0));
    assert!(json.get("vertices").is_none());
    assert!(json["stats"]["expanded"].is_u64());
}

#[test]
fn test_load_errors() {
    let missing = RoadGraph::from_file("/nonexistent/roads.json").unwrap_err();
    assert!(missing.to_string().contains("failed to read graph file"));

    let garbage = write_temp("{ not json");
    let err = RoadGraph::from_file(garbage.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse graph file"));

    let negative = write_temp(
        r#"{"vertices": [{"id": "a"}, {"id": "b"}], "edges": [{"from": "a", "to": "b", "weight": -2}]}"#,
    );
    let err = RoadGraph::from_file(negative.path()).unwrap_err();
    let cause = err.root_cause().to_string();
    assert!(cause.contains("invalid weight"), "{cause}");

    let duplicate = write_temp(r#"{"vertices": [{"id": "a"}, {"id": "a"}]}"#);
    let err = RoadGraph::from_file(duplicate.path()).unwrap_err();
    assert!(err.root_cause().to_string().contains("already exists"));
}
