//! Query types and result structures

use crate::graph::{GraphError, NodeId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Path-finding algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Shortest weighted path
    #[default]
    Dijkstra,
    /// Shortest unweighted path (fewest hops)
    Bfs,
}

impl FromStr for Algorithm {
    type Err = GraphError;

    /// Unrecognized names are rejected rather than silently defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dijkstra" => Ok(Self::Dijkstra),
            "bfs" => Ok(Self::Bfs),
            other => Err(GraphError::InvalidArgument(format!(
                "unknown algorithm '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dijkstra => write!(f, "dijkstra"),
            Self::Bfs => write!(f, "bfs"),
        }
    }
}

/// Result of a path query
///
/// An empty path is the normal "no route between these nodes" outcome,
/// never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node identifiers from start to end, inclusive. Empty when no path
    /// exists.
    pub path: Vec<NodeId>,
    /// Total traversed weight. Present for weighted queries only; for BFS
    /// the hop count is implicit in the path length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl PathResult {
    /// Result of a weighted (Dijkstra) query
    pub fn weighted(path: Vec<NodeId>, distance: f64) -> Self {
        Self {
            path,
            distance: Some(distance),
        }
    }

    /// Result of an unweighted (BFS) query
    pub fn unweighted(path: Vec<NodeId>) -> Self {
        Self {
            path,
            distance: None,
        }
    }

    /// Whether a path was found
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}
