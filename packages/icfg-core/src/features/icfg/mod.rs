//! # Interprocedural Control-Flow Graph (ICFG)
//!
//! Program-point graph spanning function boundaries, the backbone that
//! pointer analysis and value-flow analysis traverse. Built once by an
//! external builder, extended during call-graph refresh as indirect
//! calls resolve, and folded by an external simplification pass that
//! records its merges in the rep/sub ledger.
//!
//! ## References
//! - Sui & Xue, "SVF: Interprocedural Static Value-Flow Analysis in LLVM" (CC 2016)
//! - Reps, Horwitz, Sagiv, "Precise Interprocedural Dataflow Analysis via
//!   Graph Reachability" (POPL 1995)

pub mod domain;
pub mod ports;

pub use domain::edge::{BranchCondition, IcfgEdge, IcfgEdgeKind};
pub use domain::icfg::Icfg;
pub use domain::node::{IcfgNode, IcfgNodeKind};
pub use ports::call_graph::{CallGraphProvider, SimpleCallGraph};
