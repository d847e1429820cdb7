//! GraphStore: the single owner of nodes and the adjacency structure

use super::node::{Node, NodeId, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur in graph operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("no edge between {from} and {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Bookkeeping timestamps for the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// When the store was created
    pub created_at: Option<DateTime<Utc>>,
    /// When the store was last mutated
    pub updated_at: Option<DateTime<Utc>>,
}

/// An undirected weighted graph with 2-D node positions.
///
/// Each undirected edge is stored as two directed entries that always carry
/// the same weight; adjacency keys and node records are kept in lockstep.
/// Every mutation validates fully before touching either map, so a failed
/// call leaves the store exactly as it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStore {
    nodes: HashMap<NodeId, Node>,
    adjacency: HashMap<NodeId, HashMap<NodeId, f64>>,
    metadata: StoreMetadata,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            adjacency: HashMap::new(),
            metadata: StoreMetadata {
                created_at: Some(Utc::now()),
                ..Default::default()
            },
        }
    }

    /// The five-node demo graph used by the editor's seed state.
    ///
    /// A–B(5), A–D(8), B–C(6), B–E(12), C–D(3), C–E(4)
    pub fn sample() -> Self {
        let mut store = Self::new();
        let nodes = [
            ("A", 100.0, 100.0),
            ("B", 300.0, 50.0),
            ("C", 400.0, 200.0),
            ("D", 200.0, 250.0),
            ("E", 500.0, 100.0),
        ];
        let edges = [
            ("A", "B", 5.0),
            ("A", "D", 8.0),
            ("B", "C", 6.0),
            ("B", "E", 12.0),
            ("C", "D", 3.0),
            ("C", "E", 4.0),
        ];
        // Seed data is statically valid, so failures cannot occur here.
        for (id, x, y) in nodes {
            let _ = store.add_node(id, x, y);
        }
        for (from, to, weight) in edges {
            let _ = store.add_edge(&NodeId::from(from), &NodeId::from(to), weight);
        }
        store
    }

    // --- Mutations ---

    /// Add a node with a unique identifier at (x, y).
    ///
    /// Fails with `DuplicateNode` if the identifier is already taken.
    pub fn add_node(&mut self, id: impl Into<NodeId>, x: f64, y: f64) -> GraphResult<()> {
        let id = id.into();
        require_id(&id, "node")?;
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }

        debug!(node = %id, x, y, "adding node");
        self.adjacency.insert(id.clone(), HashMap::new());
        self.nodes.insert(id.clone(), Node::new(id, x, y));
        self.touch();
        Ok(())
    }

    /// Remove a node and every edge incident to it.
    pub fn remove_node(&mut self, id: &NodeId) -> GraphResult<()> {
        require_id(id, "node")?;
        if self.nodes.remove(id).is_none() {
            return Err(GraphError::NodeNotFound(id.clone()));
        }

        debug!(node = %id, "removing node");
        self.adjacency.remove(id);
        // Drop the reverse entries held by every other node.
        for neighbors in self.adjacency.values_mut() {
            neighbors.remove(id);
        }
        self.touch();
        Ok(())
    }

    /// Add an undirected edge between two existing nodes.
    ///
    /// Re-adding an existing edge silently overwrites its weight (upsert).
    /// This is intentionally looser than `add_node`, which rejects
    /// duplicates; `update_edge` is the strict variant.
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId, weight: f64) -> GraphResult<()> {
        self.check_endpoints(from, to)?;

        debug!(%from, %to, weight, "adding edge");
        self.set_weight(from, to, weight);
        self.touch();
        Ok(())
    }

    /// Remove an undirected edge.
    ///
    /// Fails with `EdgeNotFound` if the endpoints exist but are not connected.
    pub fn remove_edge(&mut self, from: &NodeId, to: &NodeId) -> GraphResult<()> {
        self.check_endpoints(from, to)?;
        self.require_edge(from, to)?;

        debug!(%from, %to, "removing edge");
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.remove(to);
        }
        if let Some(neighbors) = self.adjacency.get_mut(to) {
            neighbors.remove(from);
        }
        self.touch();
        Ok(())
    }

    /// Overwrite the weight of an existing edge.
    ///
    /// Unlike `add_edge` this requires the edge to already exist.
    pub fn update_edge(&mut self, from: &NodeId, to: &NodeId, weight: f64) -> GraphResult<()> {
        self.check_endpoints(from, to)?;
        self.require_edge(from, to)?;

        debug!(%from, %to, weight, "updating edge weight");
        self.set_weight(from, to, weight);
        self.touch();
        Ok(())
    }

    /// Replace a node's coordinate pair.
    pub fn update_node_position(&mut self, id: &NodeId, x: f64, y: f64) -> GraphResult<()> {
        require_id(id, "node")?;
        match self.nodes.get_mut(id) {
            Some(node) => node.position = Position::new(x, y),
            None => return Err(GraphError::NodeNotFound(id.clone())),
        }
        self.touch();
        Ok(())
    }

    // --- Queries ---

    /// Get a node by ID
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check if a node exists
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of undirected edges
    pub fn edge_count(&self) -> usize {
        // Each undirected edge contributes two directed entries.
        self.adjacency.values().map(HashMap::len).sum::<usize>() / 2
    }

    /// Iterate over the neighbors of a node with their edge weights.
    ///
    /// Unknown identifiers yield an empty iterator.
    pub fn neighbors<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = (&'a NodeId, f64)> + 'a {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .map(|(neighbor, weight)| (neighbor, *weight))
    }

    /// Get the weight of the edge between two nodes, if connected
    pub fn edge_weight(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        self.adjacency.get(a).and_then(|n| n.get(b)).copied()
    }

    /// Store bookkeeping timestamps
    pub fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    // --- Internals ---

    /// Validate both endpoints of an edge operation without mutating.
    fn check_endpoints(&self, from: &NodeId, to: &NodeId) -> GraphResult<()> {
        require_id(from, "edge endpoint")?;
        require_id(to, "edge endpoint")?;
        if from == to {
            return Err(GraphError::InvalidArgument(
                "edge endpoints must be distinct".to_string(),
            ));
        }
        self.require_node(from)?;
        self.require_node(to)
    }

    fn require_node(&self, id: &NodeId) -> GraphResult<()> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(id.clone()))
        }
    }

    fn require_edge(&self, from: &NodeId, to: &NodeId) -> GraphResult<()> {
        if self.edge_weight(from, to).is_some() {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound {
                from: from.clone(),
                to: to.clone(),
            })
        }
    }

    /// Write both directed entries for an undirected edge.
    fn set_weight(&mut self, from: &NodeId, to: &NodeId, weight: f64) {
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.insert(to.clone(), weight);
        }
        if let Some(neighbors) = self.adjacency.get_mut(to) {
            neighbors.insert(from.clone(), weight);
        }
    }

    /// Update the last modified timestamp
    fn touch(&mut self) {
        self.metadata.updated_at = Some(Utc::now());
    }
}

/// Blank identifiers are treated as absent parameters.
fn require_id(id: &NodeId, what: &str) -> GraphResult<()> {
    if id.is_blank() {
        Err(GraphError::InvalidArgument(format!(
            "{what} identifier must not be empty"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_add_node() {
        let mut store = GraphStore::new();
        store.add_node("A", 1.0, 2.0).unwrap();

        assert_eq!(store.node_count(), 1);
        let node = store.get_node(&id("A")).unwrap();
        assert_eq!(node.position.x, 1.0);
        assert_eq!(node.position.y, 2.0);
    }

    #[test]
    fn test_add_node_duplicate_rejected() {
        let mut store = GraphStore::new();
        store.add_node("A", 0.0, 0.0).unwrap();

        let err = store.add_node("A", 9.0, 9.0).unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode(id("A")));

        // The original position is untouched.
        assert_eq!(store.get_node(&id("A")).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_add_node_blank_id_rejected() {
        let mut store = GraphStore::new();
        assert!(matches!(
            store.add_node("", 0.0, 0.0),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.add_node("   ", 0.0, 0.0),
            Err(GraphError::InvalidArgument(_))
        ));
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn test_add_edge_requires_both_endpoints() {
        let mut store = GraphStore::new();
        store.add_node("A", 0.0, 0.0).unwrap();

        let err = store.add_edge(&id("A"), &id("B"), 1.0).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound(id("B")));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut store = GraphStore::new();
        store.add_node("A", 0.0, 0.0).unwrap();
        store.add_node("B", 1.0, 0.0).unwrap();
        store.add_edge(&id("A"), &id("B"), 7.5).unwrap();

        assert_eq!(store.edge_weight(&id("A"), &id("B")), Some(7.5));
        assert_eq!(store.edge_weight(&id("B"), &id("A")), Some(7.5));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_upserts_weight() {
        let mut store = GraphStore::new();
        store.add_node("A", 0.0, 0.0).unwrap();
        store.add_node("B", 1.0, 0.0).unwrap();

        store.add_edge(&id("A"), &id("B"), 1.0).unwrap();
        store.add_edge(&id("A"), &id("B"), 3.0).unwrap();

        assert_eq!(store.edge_weight(&id("B"), &id("A")), Some(3.0));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut store = GraphStore::new();
        store.add_node("A", 0.0, 0.0).unwrap();

        assert!(matches!(
            store.add_edge(&id("A"), &id("A"), 1.0),
            Err(GraphError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_update_edge_requires_existing_edge() {
        let mut store = GraphStore::new();
        store.add_node("A", 0.0, 0.0).unwrap();
        store.add_node("B", 1.0, 0.0).unwrap();

        let err = store.update_edge(&id("A"), &id("B"), 2.0).unwrap_err();
        assert_eq!(
            err,
            GraphError::EdgeNotFound {
                from: id("A"),
                to: id("B"),
            }
        );

        // add_edge on the same pair succeeds where update_edge failed.
        store.add_edge(&id("A"), &id("B"), 2.0).unwrap();
        store.update_edge(&id("A"), &id("B"), 4.0).unwrap();
        assert_eq!(store.edge_weight(&id("A"), &id("B")), Some(4.0));
        assert_eq!(store.edge_weight(&id("B"), &id("A")), Some(4.0));
    }

    #[test]
    fn test_remove_edge() {
        let mut store = GraphStore::sample();
        store.remove_edge(&id("A"), &id("B")).unwrap();

        assert_eq!(store.edge_weight(&id("A"), &id("B")), None);
        assert_eq!(store.edge_weight(&id("B"), &id("A")), None);
        // Other edges of both endpoints survive.
        assert_eq!(store.edge_weight(&id("A"), &id("D")), Some(8.0));
        assert_eq!(store.edge_weight(&id("B"), &id("C")), Some(6.0));
    }

    #[test]
    fn test_remove_edge_missing_edge() {
        let mut store = GraphStore::new();
        store.add_node("A", 0.0, 0.0).unwrap();
        store.add_node("B", 1.0, 0.0).unwrap();

        let err = store.remove_edge(&id("A"), &id("B")).unwrap_err();
        assert!(matches!(err, GraphError::EdgeNotFound { .. }));
    }

    #[test]
    fn test_remove_node_cascades_to_edges() {
        let mut store = GraphStore::sample();
        store.remove_node(&id("B")).unwrap();

        assert!(!store.contains_node(&id("B")));
        assert_eq!(store.node_count(), 4);
        // No surviving node still references B.
        for node in store.nodes() {
            assert!(store.neighbors(&node.id).all(|(n, _)| n != &id("B")));
        }
        // Edges not touching B are intact.
        assert_eq!(store.edge_weight(&id("C"), &id("D")), Some(3.0));
    }

    #[test]
    fn test_remove_node_unknown() {
        let mut store = GraphStore::new();
        let err = store.remove_node(&id("ghost")).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound(id("ghost")));
    }

    #[test]
    fn test_update_node_position_replaces_pair() {
        let mut store = GraphStore::new();
        store.add_node("A", 1.0, 2.0).unwrap();
        store.update_node_position(&id("A"), 30.0, 40.0).unwrap();

        let node = store.get_node(&id("A")).unwrap();
        assert_eq!(node.position, Position::new(30.0, 40.0));
    }

    #[test]
    fn test_update_node_position_unknown() {
        let mut store = GraphStore::new();
        let err = store.update_node_position(&id("A"), 0.0, 0.0).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound(id("A")));
    }

    #[test]
    fn test_sample_graph_shape() {
        let store = GraphStore::sample();
        assert_eq!(store.node_count(), 5);
        assert_eq!(store.edge_count(), 6);
        assert_eq!(store.edge_weight(&id("C"), &id("E")), Some(4.0));
    }
}
