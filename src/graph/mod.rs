//! Core graph data structures

mod node;
mod store;


pub use node::{Node, NodeId, Position};
pub use store::{GraphError, GraphResult, GraphStore, StoreMetadata};
