//! Trellis CLI — shortest-path queries over an in-memory graph.
//!
//! Usage:
//!   trellis path <start> <end> [--algorithm dijkstra|bfs] [--graph file.json]
//!   trellis stats [--graph file.json]
//!   trellis export
//!
//! Without `--graph` the commands run against the built-in five-node demo
//! graph; `export` prints that graph as JSON in the format `--graph` accepts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trellis::{GraphApi, GraphStore, NodeId};

#[derive(Parser)]
#[command(
    name = "trellis",
    version,
    about = "In-memory weighted graph engine with shortest-path queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a path between two nodes
    Path {
        /// Start node name
        start: String,
        /// End node name
        end: String,
        /// Algorithm to run (dijkstra or bfs)
        #[arg(long, default_value = "dijkstra")]
        algorithm: String,
        /// Path to a JSON graph file (defaults to the demo graph)
        #[arg(long)]
        graph: Option<PathBuf>,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show node and edge counts
    Stats {
        /// Path to a JSON graph file (defaults to the demo graph)
        #[arg(long)]
        graph: Option<PathBuf>,
    },
    /// Print the demo graph as JSON
    Export,
}

fn load_store(path: Option<PathBuf>) -> Result<GraphStore, String> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
        }
        None => Ok(GraphStore::sample()),
    }
}

fn cmd_path(store: GraphStore, start: &str, end: &str, algorithm: &str, json: bool) -> i32 {
    let api = GraphApi::new(store);
    let result = match api.find_path(start, end, Some(algorithm)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    } else if result.is_found() {
        let route = result
            .path
            .iter()
            .map(NodeId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ");
        match result.distance {
            Some(distance) => println!("{route}  (distance {distance})"),
            None => println!("{route}  ({} hops)", result.hops()),
        }
    } else {
        println!("no path between {start} and {end}");
    }
    0
}

fn cmd_stats(store: GraphStore) -> i32 {
    println!("nodes: {}", store.node_count());
    println!("edges: {}", store.edge_count());
    0
}

fn cmd_export() -> i32 {
    match serde_json::to_string_pretty(&GraphStore::sample()) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Path {
            start,
            end,
            algorithm,
            graph,
            json,
        } => match load_store(graph) {
            Ok(store) => cmd_path(store, &start, &end, &algorithm, json),
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        },
        Commands::Stats { graph } => match load_store(graph) {
            Ok(store) => cmd_stats(store),
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        },
        Commands::Export => cmd_export(),
    };
    std::process::exit(code);
}
