//! Query system for trellis graphs
//!
//! Provides shortest-path computation over a read-only view of the store's
//! adjacency structure.

mod path;
mod types;

pub use path::{bfs, dijkstra, PathQuery};
pub use types::{Algorithm, PathResult};
