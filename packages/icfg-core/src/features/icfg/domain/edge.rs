//! ICFG control-transfer edges

use serde::{Deserialize, Serialize};

use crate::features::generic_graph::{EdgeId, GraphEdge, NodeId};
use crate::shared::models::ValueId;

/// Kind of control transfer an edge models
///
/// Duplicate suppression works on this discriminator: at most one edge
/// of a given kind exists between a given ordered node pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IcfgEdgeKind {
    /// Intraprocedural flow, unconditional or conditional
    Intra,
    /// Call site → callee entry
    Call,
    /// Callee exit → matching ret node
    Ret,
    /// Fork-like call site → forked function entry (concurrent start,
    /// not ordinary call semantics)
    ThreadFork,
}

/// Branch payload of a conditional intra edge
///
/// `branch` is the outcome this edge represents: 0/1 for false/true
/// successors of a two-way branch, the case value for a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCondition {
    pub value: ValueId,
    pub branch: i64,
}

/// A directed edge of the ICFG, owned by the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcfgEdge {
    id: EdgeId,
    src: NodeId,
    dst: NodeId,
    kind: IcfgEdgeKind,
    /// Present only on conditional intra edges
    condition: Option<BranchCondition>,
}

impl IcfgEdge {
    pub(crate) fn new(
        id: EdgeId,
        src: NodeId,
        dst: NodeId,
        kind: IcfgEdgeKind,
        condition: Option<BranchCondition>,
    ) -> Self {
        debug_assert!(condition.is_none() || kind == IcfgEdgeKind::Intra);
        Self {
            id,
            src,
            dst,
            kind,
            condition,
        }
    }

    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> IcfgEdgeKind {
        self.kind
    }

    #[inline]
    pub fn is_intra(&self) -> bool {
        self.kind == IcfgEdgeKind::Intra
    }

    /// True for call, ret, and thread-fork edges
    #[inline]
    pub fn is_inter(&self) -> bool {
        self.kind != IcfgEdgeKind::Intra
    }

    /// Branch payload for path-sensitive reasoning; `None` on
    /// unconditional and interprocedural edges
    #[inline]
    pub fn condition(&self) -> Option<BranchCondition> {
        self.condition
    }
}

impl GraphEdge for IcfgEdge {
    fn edge_id(&self) -> EdgeId {
        self.id
    }

    fn src(&self) -> NodeId {
        self.src
    }

    fn dst(&self) -> NodeId {
        self.dst
    }
}
