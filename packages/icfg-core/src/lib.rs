/*
 * icfg-core - Interprocedural Control-Flow Graph
 *
 * Persistent program-point graph backing whole-program static analyses
 * (pointer analysis, value-flow analysis) over a lowered program
 * representation.
 *
 * Feature-First Hexagonal Architecture:
 * - shared/   : Program abstraction handles (function/instruction/value/loop ids)
 * - features/ : generic_graph (arena substrate), icfg (taxonomy + graph)
 *
 * The graph is single-writer: construction, simplification, and
 * call-graph refresh mutate through `&mut Icfg` in non-overlapping
 * phases; analyses read through `&Icfg`.
 */

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Error types
pub mod errors;

pub use errors::{IcfgError, Result};
pub use features::generic_graph::{EdgeId, GenericGraph, GraphEdge, GraphNode, NodeId};
pub use features::icfg::{
    BranchCondition, CallGraphProvider, Icfg, IcfgEdge, IcfgEdgeKind, IcfgNode, IcfgNodeKind,
    SimpleCallGraph,
};
pub use shared::models::{FunctionId, InstructionId, LoopId, ValueId};
