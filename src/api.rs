//! Transport-independent API layer.
//!
//! `GraphApi` is the single entry point for all consumer-facing operations.
//! Transports (HTTP handlers, CLI, direct embedding) call `GraphApi` methods
//! with already-parsed arguments; they never lock the store themselves.
//!
//! One store instance serves every caller. Mutations take the write lock for
//! the whole operation and queries take the read lock for the whole search,
//! so a half-applied edge (one direction present, the other absent) is never
//! observable.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::graph::{GraphError, GraphResult, GraphStore, Node, NodeId};
use crate::query::{Algorithm, PathQuery, PathResult};

/// Single entry point for all consumer-facing operations.
#[derive(Clone)]
pub struct GraphApi {
    store: Arc<RwLock<GraphStore>>,
}

impl GraphApi {
    /// Create an API over the given store
    pub fn new(store: GraphStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Create an API seeded with the five-node demo graph
    pub fn with_sample_data() -> Self {
        Self::new(GraphStore::sample())
    }

    fn read(&self) -> RwLockReadGuard<'_, GraphStore> {
        // Store mutations validate before touching anything, so the data is
        // consistent even if a lock holder panicked.
        self.store.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, GraphStore> {
        self.store.write().unwrap_or_else(|e| e.into_inner())
    }

    // --- Mutations ---

    /// Add a node with a unique name at (x, y)
    pub fn add_node(&self, name: &str, x: f64, y: f64) -> GraphResult<()> {
        self.write().add_node(name, x, y)
    }

    /// Remove a node and all edges incident to it
    pub fn remove_node(&self, name: &str) -> GraphResult<()> {
        self.write().remove_node(&NodeId::from(name))
    }

    /// Add or overwrite an undirected edge between two existing nodes
    pub fn add_edge(&self, from: &str, to: &str, weight: f64) -> GraphResult<()> {
        self.write()
            .add_edge(&NodeId::from(from), &NodeId::from(to), weight)
    }

    /// Remove an existing undirected edge
    pub fn remove_edge(&self, from: &str, to: &str) -> GraphResult<()> {
        self.write()
            .remove_edge(&NodeId::from(from), &NodeId::from(to))
    }

    /// Overwrite the weight of an existing edge
    pub fn update_edge(&self, from: &str, to: &str, weight: f64) -> GraphResult<()> {
        self.write()
            .update_edge(&NodeId::from(from), &NodeId::from(to), weight)
    }

    /// Replace a node's coordinate pair
    pub fn update_node_position(&self, name: &str, x: f64, y: f64) -> GraphResult<()> {
        self.write()
            .update_node_position(&NodeId::from(name), x, y)
    }

    // --- Queries ---

    /// Find a path between two nodes.
    ///
    /// `algorithm` is the wire-level selector ("dijkstra" or "bfs");
    /// `None` defaults to Dijkstra. Unknown endpoints are an error at this
    /// level, matching the editing contract; a disconnected pair is a
    /// successful empty result.
    pub fn find_path(
        &self,
        start: &str,
        end: &str,
        algorithm: Option<&str>,
    ) -> GraphResult<PathResult> {
        let algorithm = match algorithm {
            Some(name) => name.parse::<Algorithm>()?,
            None => Algorithm::default(),
        };

        let (start, end) = (NodeId::from(start), NodeId::from(end));
        if start.is_blank() || end.is_blank() {
            return Err(GraphError::InvalidArgument(
                "path endpoints must not be empty".to_string(),
            ));
        }

        let store = self.read();
        for endpoint in [&start, &end] {
            if !store.contains_node(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.clone()));
            }
        }

        debug!(%start, %end, %algorithm, "running path query");
        Ok(PathQuery::between(start, end)
            .algorithm(algorithm)
            .execute(&store))
    }

    /// Get a copy of a node by name
    pub fn get_node(&self, name: &str) -> Option<Node> {
        self.read().get_node(&NodeId::from(name)).cloned()
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.read().node_count()
    }

    /// Number of undirected edges in the graph
    pub fn edge_count(&self) -> usize {
        self.read().edge_count()
    }

    /// Clone the current graph state (for export or inspection)
    pub fn snapshot(&self) -> GraphStore {
        self.read().clone()
    }
}
