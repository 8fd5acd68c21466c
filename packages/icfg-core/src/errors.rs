//! Error types for icfg-core
//!
//! Provides unified error handling across the crate.
//!
//! Precondition violations and duplicate registrations are hard errors:
//! they signal a misbehaving builder or simplification pass, and a graph
//! that produced one must not be used for analysis. There is no repair
//! path; callers propagate these out of the construction phase.

use thiserror::Error;

use crate::features::generic_graph::{EdgeId, NodeId};
use crate::shared::models::{FunctionId, InstructionId};

/// Main error type for ICFG operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IcfgError {
    /// A node for this key has already been registered; `add` is not idempotent
    #[error("duplicate node registration: {0}")]
    DuplicateNode(String),

    /// A `RetNode` was added before its `CallNode`, or a similar ordering contract broke
    #[error("construction ordering violated: {0}")]
    MissingPredecessorNode(String),

    /// An intra edge tried to cross a function boundary
    #[error("intra edge endpoints belong to different functions: src in {src:?}, dst in {dst:?}")]
    FunctionBoundary {
        src: Option<FunctionId>,
        dst: Option<FunctionId>,
    },

    /// An edge endpoint has the wrong node kind for the requested edge
    #[error("invalid edge endpoint: {0}")]
    InvalidEndpoint(String),

    /// The node id is not present in the graph
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// The edge id is not present in the graph
    #[error("unknown edge: {0:?}")]
    UnknownEdge(EdgeId),

    /// The instruction has no ICFG node
    #[error("no ICFG node for instruction {0:?}")]
    UnknownInstruction(InstructionId),

    /// `get_loops` was called for a node with no loop membership
    #[error("node {0:?} is not in any loop")]
    NotInLoop(NodeId),

    /// `update_call_graph` hit a call site with no call/ret node pair
    #[error("call site {0:?} has no call node in the ICFG")]
    UnknownCallSite(InstructionId),
}

/// Result type alias for ICFG operations
pub type Result<T> = std::result::Result<T, IcfgError>;
