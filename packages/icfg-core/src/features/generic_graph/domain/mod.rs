//! Domain models for the graph substrate

pub mod graph;

pub use graph::{EdgeId, GenericGraph, GraphEdge, GraphNode, NodeId};
