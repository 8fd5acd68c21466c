//! Interface definitions for external collaborators

pub mod call_graph;

pub use call_graph::{CallGraphProvider, SimpleCallGraph};
