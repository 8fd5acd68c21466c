//! ICFG program-point nodes

use serde::{Deserialize, Serialize};

use crate::features::generic_graph::{EdgeId, GraphNode, NodeId};
use crate::shared::models::{FunctionId, InstructionId};

/// Kind of program point a node represents
///
/// `Call` and `Ret` both wrap the call-site instruction: `Call` is the
/// point immediately before control transfers to the callee, `Ret` the
/// point immediately after it comes back. The pairing links are set
/// once when the ret node is created and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IcfgNodeKind {
    /// Singleton node for all global-scope initialization
    Global,
    /// Exactly one non-call instruction
    Intra { inst: InstructionId },
    /// Pre-call point of a call site
    Call {
        call_site: InstructionId,
        /// Paired ret node; `None` only between call-node and ret-node creation
        ret: Option<NodeId>,
    },
    /// Post-call point of a call site
    Ret {
        call_site: InstructionId,
        /// Paired call node, fixed at creation
        call: NodeId,
    },
    /// Sole entry point of a function
    FunEntry { fun: FunctionId },
    /// Sole exit point of a function
    FunExit { fun: FunctionId },
}

/// A node of the ICFG
///
/// Identity (`id`) is dense and never reused. The adjacency lists hold
/// edge handles in insertion order; the graph owns the edges themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcfgNode {
    id: NodeId,
    /// Owning function; `None` for the global node
    fun: Option<FunctionId>,
    kind: IcfgNodeKind,
    in_edges: Vec<EdgeId>,
    out_edges: Vec<EdgeId>,
}

impl IcfgNode {
    pub(crate) fn new(id: NodeId, fun: Option<FunctionId>, kind: IcfgNodeKind) -> Self {
        Self {
            id,
            fun,
            kind,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Owning function, if the node is function-bound
    #[inline]
    pub fn fun(&self) -> Option<FunctionId> {
        self.fun
    }

    #[inline]
    pub fn kind(&self) -> &IcfgNodeKind {
        &self.kind
    }

    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self.kind, IcfgNodeKind::Call { .. })
    }

    #[inline]
    pub fn is_ret(&self) -> bool {
        matches!(self.kind, IcfgNodeKind::Ret { .. })
    }

    #[inline]
    pub fn is_fun_entry(&self) -> bool {
        matches!(self.kind, IcfgNodeKind::FunEntry { .. })
    }

    #[inline]
    pub fn is_fun_exit(&self) -> bool {
        matches!(self.kind, IcfgNodeKind::FunExit { .. })
    }

    /// The instruction this program point maps back to, for reporting
    ///
    /// Call and ret nodes both report their call-site instruction.
    pub fn instruction(&self) -> Option<InstructionId> {
        match self.kind {
            IcfgNodeKind::Intra { inst } => Some(inst),
            IcfgNodeKind::Call { call_site, .. } | IcfgNodeKind::Ret { call_site, .. } => {
                Some(call_site)
            }
            _ => None,
        }
    }

    /// Call site wrapped by a call or ret node
    pub fn call_site(&self) -> Option<InstructionId> {
        match self.kind {
            IcfgNodeKind::Call { call_site, .. } | IcfgNodeKind::Ret { call_site, .. } => {
                Some(call_site)
            }
            _ => None,
        }
    }

    /// Paired ret node of a call node
    pub fn ret_node(&self) -> Option<NodeId> {
        match self.kind {
            IcfgNodeKind::Call { ret, .. } => ret,
            _ => None,
        }
    }

    /// Paired call node of a ret node
    pub fn call_node(&self) -> Option<NodeId> {
        match self.kind {
            IcfgNodeKind::Ret { call, .. } => Some(call),
            _ => None,
        }
    }

    /// Fix the call→ret pairing link; returns false if this is not a
    /// call node or the link is already set
    pub(crate) fn set_ret_node(&mut self, ret_id: NodeId) -> bool {
        match &mut self.kind {
            IcfgNodeKind::Call { ret, .. } if ret.is_none() => {
                *ret = Some(ret_id);
                true
            }
            _ => false,
        }
    }
}

impl GraphNode for IcfgNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    fn attach_incoming(&mut self, edge: EdgeId) -> bool {
        if self.in_edges.contains(&edge) {
            return false;
        }
        self.in_edges.push(edge);
        true
    }

    fn attach_outgoing(&mut self, edge: EdgeId) -> bool {
        if self.out_edges.contains(&edge) {
            return false;
        }
        self.out_edges.push(edge);
        true
    }

    fn detach_incoming(&mut self, edge: EdgeId) {
        self.in_edges.retain(|e| *e != edge);
    }

    fn detach_outgoing(&mut self, edge: EdgeId) {
        self.out_edges.retain(|e| *e != edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_link_is_set_once() {
        let mut call = IcfgNode::new(
            NodeId(0),
            Some(FunctionId(0)),
            IcfgNodeKind::Call {
                call_site: InstructionId(7),
                ret: None,
            },
        );
        assert!(call.set_ret_node(NodeId(1)));
        assert!(!call.set_ret_node(NodeId(2)));
        assert_eq!(call.ret_node(), Some(NodeId(1)));
    }

    #[test]
    fn test_instruction_mapping_per_kind() {
        let intra = IcfgNode::new(
            NodeId(0),
            Some(FunctionId(0)),
            IcfgNodeKind::Intra {
                inst: InstructionId(3),
            },
        );
        assert_eq!(intra.instruction(), Some(InstructionId(3)));
        assert_eq!(intra.call_site(), None);

        let entry = IcfgNode::new(
            NodeId(1),
            Some(FunctionId(0)),
            IcfgNodeKind::FunEntry { fun: FunctionId(0) },
        );
        assert_eq!(entry.instruction(), None);
    }
}
