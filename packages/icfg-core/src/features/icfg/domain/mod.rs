//! Domain models for the ICFG
//!
//! - node: program-point taxonomy (global / intra / call / ret / entry / exit)
//! - edge: control-transfer taxonomy (intra / call / ret / thread fork)
//! - icfg: the graph itself with identity tables, ledger, and loop index

pub mod edge;
pub mod icfg;
pub mod node;

pub use edge::{BranchCondition, IcfgEdge, IcfgEdgeKind};
pub use icfg::Icfg;
pub use node::{IcfgNode, IcfgNodeKind};
