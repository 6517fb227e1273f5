use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use route_astar::heuristic::consistency_violations;
use route_astar::{
    astar_observed, search_many_with_progress, HeuristicKind, Query, RoadGraph, Route,
    RouteError, SearchConfig, SearchConfigBuilder, TracingObserver,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the cheapest route between two vertices
    Search {
        #[command(flatten)]
        options: SearchArgs,
        #[arg(long)]
        start: String,
        #[arg(long)]
        goal: String,
        /// Report edges along which the heuristic is not consistent
        #[arg(long)]
        check_heuristic: bool,
    },
    /// Answer a JSON list of start/goal queries in parallel
    Batch {
        #[command(flatten)]
        options: SearchArgs,
        #[arg(long)]
        queries: PathBuf,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Graph description file (JSON)
    #[arg(long)]
    graph: PathBuf,
    #[arg(long, value_enum, default_value_t = HeuristicKind::Euclidean)]
    heuristic: HeuristicKind,
    /// Give up after expanding this many vertices
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Give up after this many milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn config(&self) -> Result<SearchConfig> {
        let mut builder = SearchConfigBuilder::default();
        builder.heuristic(self.heuristic);
        if let Some(max) = self.max_iterations {
            builder.max_iterations(max);
        }
        if let Some(ms) = self.time_budget_ms {
            builder.time_budget_ms(ms);
        }
        let config = builder.build()?;
        if config.is_bounded() {
            debug!(?config, "search budget set");
        }
        Ok(config)
    }

    fn load_graph(&self) -> Result<RoadGraph> {
        let graph = RoadGraph::from_file(&self.graph)?;
        info!(
            vertices = graph.node_count(),
            edges = graph.edge_count(),
            directed = graph.is_directed(),
            "loaded {}",
            self.graph.display()
        );
        let components = graph.component_count();
        if components > 1 {
            warn!(components, "graph is not connected, some goals are unreachable");
        }
        Ok(graph)
    }
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    kind: &'static str,
    message: String,
}

impl From<&RouteError> for ErrorReport {
    fn from(err: &RouteError) -> Self {
        ErrorReport {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct QueryReport<'a> {
    #[serde(flatten)]
    query: &'a Query,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Search {
            options,
            start,
            goal,
            check_heuristic,
        } => search(&options, &start, &goal, check_heuristic),
        Command::Batch { options, queries } => batch(&options, &queries),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn search(options: &SearchArgs, start: &str, goal: &str, check_heuristic: bool) -> Result<()> {
    let graph = options.load_graph()?;
    let config = options.config()?;
    let start = graph.resolve(start)?;
    let goal = graph.resolve(goal)?;
    let heuristic = config.heuristic.build(&graph, goal);

    if check_heuristic {
        let violations = consistency_violations(&graph, heuristic.as_ref());
        if violations.is_empty() {
            info!(heuristic = ?config.heuristic, "heuristic is consistent on every edge");
        } else {
            warn!(
                heuristic = ?config.heuristic,
                edges = violations.len(),
                "heuristic is not consistent, vertices may be expanded more than once"
            );
        }
    }

    let mut observer = TracingObserver::new(&graph);
    let route = astar_observed(&graph, start, goal, heuristic.as_ref(), &config, &mut observer)?;
    info!(
        expanded = route.stats.expanded,
        relaxed = route.stats.relaxed,
        reopened = route.stats.reopened,
        "search finished"
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        let start = graph.id(start);
        let goal = graph.id(goal);
        println!("Start vertex: {start}");
        println!("Goal vertex: {goal}");
        println!(
            "Shortest path from {start} to {goal}: {}",
            route.path.iter().join(" -> ")
        );
        println!("Total cost: {}", route.cost);
    }
    Ok(())
}

fn batch(options: &SearchArgs, queries: &Path) -> Result<()> {
    let graph = options.load_graph()?;
    let config = options.config()?;
    let content = std::fs::read_to_string(queries)
        .with_context(|| format!("failed to read query file {}", queries.display()))?;
    let queries: Vec<Query> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse query file {}", queries.display()))?;

    let bar = ProgressBar::new(queries.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} queries [{elapsed}]")?);
    let results = search_many_with_progress(&graph, &queries, &config, bar);
    let found = results.iter().filter(|r| r.is_ok()).count();
    info!(found, total = queries.len(), "batch finished");

    if options.json {
        let reports = queries
            .iter()
            .zip(&results)
            .map(|(query, result)| QueryReport {
                query,
                route: result.as_ref().ok(),
                error: result.as_ref().err().map(ErrorReport::from),
            })
            .collect_vec();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (query, result) in queries.iter().zip(&results) {
            match result {
                Ok(route) => println!(
                    "{} -> {}: {} (cost {})",
                    query.start,
                    query.goal,
                    route.path.iter().join(" -> "),
                    route.cost
                ),
                Err(err) => println!("{} -> {}: {}: {}", query.start, query.goal, err.kind(), err),
            }
        }
    }
    Ok(())
}
