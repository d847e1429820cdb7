//! Trellis: in-memory undirected weighted graph engine
//!
//! Maintains a shared graph of named nodes with 2-D canvas positions and
//! weighted undirected edges, and answers shortest-path queries over it.
//! Built for interactive graph-editing clients: mutations are atomic and
//! validation failures leave the store untouched.
//!
//! # Core Concepts
//!
//! - **GraphStore**: owns the node set and the symmetric adjacency structure
//! - **PathQuery**: shortest weighted path (Dijkstra) or shortest unweighted
//!   path (BFS) over a read-only view of the store
//! - **GraphApi**: lock-guarded entry point shared by all callers
//!
//! # Example
//!
//! ```
//! use trellis::GraphApi;
//!
//! let api = GraphApi::with_sample_data();
//! let route = api.find_path("A", "E", Some("dijkstra")).unwrap();
//! assert_eq!(route.distance, Some(15.0));
//! ```

mod api;
mod graph;
pub mod query;

pub use api::GraphApi;
pub use graph::{GraphError, GraphResult, GraphStore, Node, NodeId, Position, StoreMetadata};
pub use query::{bfs, dijkstra, Algorithm, PathQuery, PathResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
