//! Generic directed-graph substrate
//!
//! Reusable node/edge container keyed by small dense integer handles.
//! The ICFG is one instantiation; a sparse value-flow graph would be
//! another.

pub mod domain;

pub use domain::graph::{EdgeId, GenericGraph, GraphEdge, GraphNode, NodeId};
