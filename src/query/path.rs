//! Path finding algorithms
//!
//! Both algorithms operate on a read-only view of the store's adjacency
//! structure. A start or end identifier that is not in the graph, or a pair
//! of nodes with no connecting route, yields an empty path rather than an
//! error.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use super::types::{Algorithm, PathResult};
use crate::graph::{GraphStore, NodeId};

/// Query for finding a route between two nodes
#[derive(Debug, Clone)]
pub struct PathQuery {
    /// Start node ID
    pub start: NodeId,
    /// End node ID
    pub end: NodeId,
    /// Algorithm to run
    pub algorithm: Algorithm,
}

impl PathQuery {
    /// Create a new path query between two nodes (Dijkstra by default)
    pub fn between(start: impl Into<NodeId>, end: impl Into<NodeId>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            algorithm: Algorithm::default(),
        }
    }

    /// Select the algorithm
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Execute the query against a store
    pub fn execute(&self, store: &GraphStore) -> PathResult {
        match self.algorithm {
            Algorithm::Dijkstra => dijkstra(store, &self.start, &self.end),
            Algorithm::Bfs => bfs(store, &self.start, &self.end),
        }
    }
}

/// Wrapper so f64 heap keys implement Ord.
///
/// NaN compares equal to everything; weights are expected to be real numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedFloat(f64);

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Shortest weighted path between `start` and `end`.
///
/// Lazy-deletion Dijkstra: instead of a decrease-key operation, improved
/// distances push a fresh heap entry and stale pops are skipped. Correctness
/// assumes non-negative weights. Returns the path with its total weight, or
/// an empty path with distance 0 when no route exists.
pub fn dijkstra(store: &GraphStore, start: &NodeId, end: &NodeId) -> PathResult {
    if !store.contains_node(start) || !store.contains_node(end) {
        return PathResult::weighted(Vec::new(), 0.0);
    }

    let mut distances: HashMap<NodeId, f64> = store
        .nodes()
        .map(|n| (n.id.clone(), f64::INFINITY))
        .collect();
    distances.insert(start.clone(), 0.0);

    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(OrderedFloat, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), start.clone())));

    while let Some(Reverse((OrderedFloat(dist), current))) = heap.pop() {
        // Once end is extracted its distance is final; stop early.
        if current == *end {
            break;
        }

        // Stale entry: a shorter route to this node was already settled.
        let best = distances.get(&current).copied().unwrap_or(f64::INFINITY);
        if dist > best {
            continue;
        }

        for (neighbor, weight) in store.neighbors(&current) {
            let candidate = dist + weight;
            let known = distances.get(neighbor).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                distances.insert(neighbor.clone(), candidate);
                predecessors.insert(neighbor.clone(), current.clone());
                heap.push(Reverse((OrderedFloat(candidate), neighbor.clone())));
            }
        }
    }

    let path = reconstruct(&predecessors, start, end);
    if path.is_empty() {
        return PathResult::weighted(Vec::new(), 0.0);
    }
    let total = distances.get(end).copied().unwrap_or(0.0);
    PathResult::weighted(path, total)
}

/// Shortest unweighted path (fewest hops) between `start` and `end`.
pub fn bfs(store: &GraphStore, start: &NodeId, end: &NodeId) -> PathResult {
    if !store.contains_node(start) || !store.contains_node(end) {
        return PathResult::unweighted(Vec::new());
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        if current == *end {
            break;
        }

        for (neighbor, _) in store.neighbors(&current) {
            if visited.insert(neighbor.clone()) {
                predecessors.insert(neighbor.clone(), current.clone());
                queue.push_back(neighbor.clone());
            }
        }
    }

    PathResult::unweighted(reconstruct(&predecessors, start, end))
}

/// Walk predecessor links backwards from `end` and reverse.
///
/// A reconstructed sequence that does not begin at `start` means `end` was
/// never reached; that is the disconnected-graph signal, reported as an
/// empty path.
fn reconstruct(
    predecessors: &HashMap<NodeId, NodeId>,
    start: &NodeId,
    end: &NodeId,
) -> Vec<NodeId> {
    let mut path = vec![end.clone()];
    let mut current = end;

    while let Some(prev) = predecessors.get(current) {
        path.push(prev.clone());
        current = prev;
    }

    path.reverse();
    if path.first() == Some(start) {
        path
    } else {
        Vec::new()
    }
}
