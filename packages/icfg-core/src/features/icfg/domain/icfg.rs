//! The interprocedural control-flow graph
//!
//! Wraps the generic arena with the program-point taxonomy, the
//! identity tables mapping program entities to nodes, the rep/sub merge
//! ledger filled in by simplification, and the loop-membership index
//! filled in by loop detection.
//!
//! Mutation is exposed through `&mut self` only: the builder, the
//! simplification pass, and the call-graph refresher hold the exclusive
//! reference during their phases; analysis clients hold `&Icfg` and get
//! the query surface alone. There is no interior mutability and no
//! internal synchronization.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{IcfgError, Result};
use crate::features::generic_graph::{EdgeId, GenericGraph, GraphEdge, GraphNode, NodeId};
use crate::features::icfg::domain::edge::{BranchCondition, IcfgEdge, IcfgEdgeKind};
use crate::features::icfg::domain::node::{IcfgNode, IcfgNodeKind};
use crate::features::icfg::ports::call_graph::CallGraphProvider;
use crate::shared::models::{FunctionId, InstructionId, LoopId, ValueId};

/// Interprocedural control-flow graph
///
/// Lives for the whole analysis session. Nodes and edges are created by
/// the builder and by call-graph refresh; removal happens only during
/// simplification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icfg {
    graph: GenericGraph<IcfgNode, IcfgEdge>,

    /// The one global-initialization node
    global_node: Option<NodeId>,

    // Identity tables: a node exists iff it is reachable via exactly one
    // of these (or is the global node).
    inst_to_intra: FxHashMap<InstructionId, NodeId>,
    call_site_to_call: FxHashMap<InstructionId, NodeId>,
    call_site_to_ret: FxHashMap<InstructionId, NodeId>,
    fun_to_entry: FxHashMap<FunctionId, NodeId>,
    fun_to_exit: FxHashMap<FunctionId, NodeId>,

    /// Loops a node resides in, innermost-first as reported by loop
    /// detection; absence means "not in any loop"
    node_to_loops: FxHashMap<NodeId, Vec<LoopId>>,

    /// Merge ledger: nodes folded into a surviving representative.
    /// Every node starts as its own sole sub-node...
    sub_nodes: FxHashMap<NodeId, Vec<NodeId>>,
    /// ...and its own representative. The ledger records the latest
    /// fold only; chains are not compressed, callers resolve them.
    rep_node: FxHashMap<NodeId, NodeId>,
}

impl Icfg {
    pub fn new() -> Self {
        Self {
            graph: GenericGraph::new(),
            global_node: None,
            inst_to_intra: FxHashMap::default(),
            call_site_to_call: FxHashMap::default(),
            call_site_to_ret: FxHashMap::default(),
            fun_to_entry: FxHashMap::default(),
            fun_to_exit: FxHashMap::default(),
            node_to_loops: FxHashMap::default(),
            sub_nodes: FxHashMap::default(),
            rep_node: FxHashMap::default(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Node factories (get-or-create protocol; `add` is not idempotent)
    // ═══════════════════════════════════════════════════════════════════════

    /// Insert a node into the arena and seed its ledger entries
    fn register_node(&mut self, fun: Option<FunctionId>, kind: IcfgNodeKind) -> NodeId {
        let id = self.graph.add_node_with(|id| IcfgNode::new(id, fun, kind));
        self.rep_node.insert(id, id);
        self.sub_nodes.insert(id, vec![id]);
        trace!(?id, ?kind, "added ICFG node");
        id
    }

    /// Create the singleton global-initialization node
    pub fn add_global_node(&mut self) -> Result<NodeId> {
        if self.global_node.is_some() {
            return Err(IcfgError::DuplicateNode("global node".into()));
        }
        let id = self.register_node(None, IcfgNodeKind::Global);
        self.global_node = Some(id);
        Ok(id)
    }

    pub fn get_global_node(&self) -> Option<NodeId> {
        self.global_node
    }

    /// Create the node for a non-call instruction
    pub fn add_intra_node(&mut self, fun: FunctionId, inst: InstructionId) -> Result<NodeId> {
        if self.inst_to_intra.contains_key(&inst) {
            return Err(IcfgError::DuplicateNode(format!(
                "intra node for instruction {inst:?}"
            )));
        }
        let id = self.register_node(Some(fun), IcfgNodeKind::Intra { inst });
        self.inst_to_intra.insert(inst, id);
        Ok(id)
    }

    pub fn get_intra_node(&self, inst: InstructionId) -> Option<NodeId> {
        self.inst_to_intra.get(&inst).copied()
    }

    /// Create the pre-call node of a call site
    pub fn add_call_node(&mut self, fun: FunctionId, call_site: InstructionId) -> Result<NodeId> {
        if self.call_site_to_call.contains_key(&call_site) {
            return Err(IcfgError::DuplicateNode(format!(
                "call node for call site {call_site:?}"
            )));
        }
        let id = self.register_node(Some(fun), IcfgNodeKind::Call { call_site, ret: None });
        self.call_site_to_call.insert(call_site, id);
        Ok(id)
    }

    pub fn get_call_node(&self, call_site: InstructionId) -> Option<NodeId> {
        self.call_site_to_call.get(&call_site).copied()
    }

    /// Create the post-call node of a call site and wire the pairing
    ///
    /// The call node must already exist; adding the ret node first is a
    /// construction-ordering error in the builder.
    pub fn add_ret_node(&mut self, call_site: InstructionId) -> Result<NodeId> {
        if self.call_site_to_ret.contains_key(&call_site) {
            return Err(IcfgError::DuplicateNode(format!(
                "ret node for call site {call_site:?}"
            )));
        }
        let call_id = self.get_call_node(call_site).ok_or_else(|| {
            IcfgError::MissingPredecessorNode(format!(
                "ret node for {call_site:?} added before its call node"
            ))
        })?;
        let fun = self.graph.node(call_id).and_then(|n| n.fun());
        let id = self.register_node(
            fun,
            IcfgNodeKind::Ret {
                call_site,
                call: call_id,
            },
        );
        // The call node exists and its link is unset: both were just checked.
        let paired = self
            .graph
            .node_mut(call_id)
            .map(|n| n.set_ret_node(id));
        debug_assert_eq!(paired, Some(true));
        self.call_site_to_ret.insert(call_site, id);
        Ok(id)
    }

    pub fn get_ret_node(&self, call_site: InstructionId) -> Option<NodeId> {
        self.call_site_to_ret.get(&call_site).copied()
    }

    /// Create the unique entry node of a function
    pub fn add_fun_entry_node(&mut self, fun: FunctionId) -> Result<NodeId> {
        if self.fun_to_entry.contains_key(&fun) {
            return Err(IcfgError::DuplicateNode(format!("entry node for {fun:?}")));
        }
        let id = self.register_node(Some(fun), IcfgNodeKind::FunEntry { fun });
        self.fun_to_entry.insert(fun, id);
        Ok(id)
    }

    pub fn get_fun_entry_node(&self, fun: FunctionId) -> Option<NodeId> {
        self.fun_to_entry.get(&fun).copied()
    }

    /// Create the unique exit node of a function
    pub fn add_fun_exit_node(&mut self, fun: FunctionId) -> Result<NodeId> {
        if self.fun_to_exit.contains_key(&fun) {
            return Err(IcfgError::DuplicateNode(format!("exit node for {fun:?}")));
        }
        let id = self.register_node(Some(fun), IcfgNodeKind::FunExit { fun });
        self.fun_to_exit.insert(fun, id);
        Ok(id)
    }

    pub fn get_fun_exit_node(&self, fun: FunctionId) -> Option<NodeId> {
        self.fun_to_exit.get(&fun).copied()
    }

    /// Resolve an instruction to its program point: the call node for a
    /// call instruction, the intra node otherwise
    pub fn get_node_for_instruction(&self, inst: InstructionId) -> Option<NodeId> {
        self.get_call_node(inst).or_else(|| self.get_intra_node(inst))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edge insertion (idempotent per (src, dst, kind))
    // ═══════════════════════════════════════════════════════════════════════

    /// Find the edge of a given kind between an ordered node pair
    pub fn get_edge(&self, src: NodeId, dst: NodeId, kind: IcfgEdgeKind) -> Option<EdgeId> {
        let src_node = self.graph.node(src)?;
        src_node
            .out_edges()
            .iter()
            .copied()
            .find(|eid| {
                self.graph
                    .edge(*eid)
                    .is_some_and(|e| e.dst() == dst && e.kind() == kind)
            })
    }

    pub fn has_edge(&self, src: NodeId, dst: NodeId, kind: IcfgEdgeKind) -> bool {
        self.get_edge(src, dst, kind).is_some()
    }

    /// Intra edges must not cross function boundaries; function-free
    /// endpoints (the global node) are exempt
    fn check_intra_edge_parents(&self, src: NodeId, dst: NodeId) -> Result<()> {
        let src_fun = self.graph.node(src).ok_or(IcfgError::UnknownNode(src))?.fun();
        let dst_fun = self.graph.node(dst).ok_or(IcfgError::UnknownNode(dst))?.fun();
        if let (Some(sf), Some(df)) = (src_fun, dst_fun) {
            if sf != df {
                return Err(IcfgError::FunctionBoundary {
                    src: src_fun,
                    dst: dst_fun,
                });
            }
        }
        Ok(())
    }

    fn insert_edge(
        &mut self,
        src: NodeId,
        dst: NodeId,
        kind: IcfgEdgeKind,
        condition: Option<BranchCondition>,
    ) -> Result<EdgeId> {
        if let Some(existing) = self.get_edge(src, dst, kind) {
            return Ok(existing);
        }
        let id = self
            .graph
            .add_edge_with(|id| IcfgEdge::new(id, src, dst, kind, condition))?;
        trace!(?id, ?src, ?dst, ?kind, "added ICFG edge");
        Ok(id)
    }

    /// Add an unconditional intraprocedural edge
    pub fn add_intra_edge(&mut self, src: NodeId, dst: NodeId) -> Result<EdgeId> {
        self.check_intra_edge_parents(src, dst)?;
        self.insert_edge(src, dst, IcfgEdgeKind::Intra, None)
    }

    /// Add a conditional intraprocedural edge carrying the branch value
    /// this successor corresponds to
    pub fn add_conditional_intra_edge(
        &mut self,
        src: NodeId,
        dst: NodeId,
        condition: ValueId,
        branch: i64,
    ) -> Result<EdgeId> {
        self.check_intra_edge_parents(src, dst)?;
        self.insert_edge(
            src,
            dst,
            IcfgEdgeKind::Intra,
            Some(BranchCondition {
                value: condition,
                branch,
            }),
        )
    }

    /// Add a call edge: call node → callee entry
    pub fn add_call_edge(&mut self, src: NodeId, dst: NodeId) -> Result<EdgeId> {
        self.check_call_shape(src, dst, "call edge")?;
        self.insert_edge(src, dst, IcfgEdgeKind::Call, None)
    }

    /// Add a return edge: callee exit → ret node
    pub fn add_ret_edge(&mut self, src: NodeId, dst: NodeId) -> Result<EdgeId> {
        let src_ok = self.graph.node(src).ok_or(IcfgError::UnknownNode(src))?.is_fun_exit();
        let dst_ok = self.graph.node(dst).ok_or(IcfgError::UnknownNode(dst))?.is_ret();
        if !src_ok || !dst_ok {
            return Err(IcfgError::InvalidEndpoint(format!(
                "ret edge needs FunExit → Ret, got {src:?} → {dst:?}"
            )));
        }
        self.insert_edge(src, dst, IcfgEdgeKind::Ret, None)
    }

    /// Add a thread-fork edge: fork call site → forked function entry
    pub fn add_thread_fork_edge(&mut self, src: NodeId, dst: NodeId) -> Result<EdgeId> {
        self.check_call_shape(src, dst, "thread fork edge")?;
        self.insert_edge(src, dst, IcfgEdgeKind::ThreadFork, None)
    }

    fn check_call_shape(&self, src: NodeId, dst: NodeId, what: &str) -> Result<()> {
        let src_ok = self.graph.node(src).ok_or(IcfgError::UnknownNode(src))?.is_call();
        let dst_ok = self
            .graph
            .node(dst)
            .ok_or(IcfgError::UnknownNode(dst))?
            .is_fun_entry();
        if !src_ok || !dst_ok {
            return Err(IcfgError::InvalidEndpoint(format!(
                "{what} needs Call → FunEntry, got {src:?} → {dst:?}"
            )));
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Removal (simplification only)
    // ═══════════════════════════════════════════════════════════════════════

    /// Remove an edge; afterwards it appears in neither endpoint's
    /// adjacency views
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<()> {
        let removed = self.graph.remove_edge(edge)?;
        debug!(?edge, src = ?removed.src(), dst = ?removed.dst(), "removed ICFG edge");
        Ok(())
    }

    /// Remove a node from the arena
    ///
    /// Caller contract (the simplification pass): remove incident edges
    /// first and record the fold via `update_sub_and_rep`. Identity
    /// tables, ledger, and loop index are not repaired here.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        let removed = self.graph.remove_node(node)?;
        debug!(?node, kind = ?removed.kind(), "removed ICFG node");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call-graph refresh
    // ═══════════════════════════════════════════════════════════════════════

    /// Re-synchronize call/ret edges with a freshly resolved call graph
    ///
    /// Re-entrant: called after every resolution round of the external
    /// points-to analysis. Targets only ever grow, and edge insertion is
    /// idempotent, so each call adds exactly the missing edges. Callees
    /// with no entry node in the graph (declaration-only externals) are
    /// skipped.
    pub fn update_call_graph<G: CallGraphProvider>(&mut self, callgraph: &G) -> Result<()> {
        let mut added = 0usize;
        for call_site in callgraph.call_sites() {
            let call = self
                .get_call_node(call_site)
                .ok_or(IcfgError::UnknownCallSite(call_site))?;
            let ret = self
                .get_ret_node(call_site)
                .ok_or(IcfgError::UnknownCallSite(call_site))?;
            for callee in callgraph.callees(call_site) {
                let Some(entry) = self.get_fun_entry_node(callee) else {
                    debug!(?call_site, ?callee, "skipping body-less callee");
                    continue;
                };
                if !self.has_edge(call, entry, IcfgEdgeKind::Call) {
                    self.add_call_edge(call, entry)?;
                    added += 1;
                }
                if let Some(exit) = self.get_fun_exit_node(callee) {
                    if !self.has_edge(exit, ret, IcfgEdgeKind::Ret) {
                        self.add_ret_edge(exit, ret)?;
                        added += 1;
                    }
                }
            }
        }
        debug!(added, "call-graph refresh complete");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Loop-membership index
    // ═══════════════════════════════════════════════════════════════════════

    /// Record that a node resides in a loop
    ///
    /// Loops arrive innermost-first from loop detection. Repeated
    /// insertion of the same loop is not deduplicated; the detector is
    /// expected to report each membership once.
    pub fn add_node_to_loop(&mut self, node: NodeId, lp: LoopId) {
        self.node_to_loops.entry(node).or_default().push(lp);
    }

    /// Whether the node resides in any loop
    pub fn is_in_loop(&self, node: NodeId) -> bool {
        self.node_to_loops.contains_key(&node)
    }

    /// Whether the instruction's program point resides in any loop
    pub fn is_in_loop_inst(&self, inst: InstructionId) -> Result<bool> {
        let node = self
            .get_node_for_instruction(inst)
            .ok_or(IcfgError::UnknownInstruction(inst))?;
        Ok(self.is_in_loop(node))
    }

    /// Loops the node resides in, innermost-first
    ///
    /// The node must be a member of at least one loop; check
    /// `is_in_loop` first.
    pub fn get_loops(&self, node: NodeId) -> Result<&[LoopId]> {
        self.node_to_loops
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(IcfgError::NotInLoop(node))
    }

    /// The whole loop-membership index
    pub fn node_to_loops(&self) -> &FxHashMap<NodeId, Vec<LoopId>> {
        &self.node_to_loops
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rep/Sub merge ledger
    // ═══════════════════════════════════════════════════════════════════════

    /// Record a simplification fold of `rep` into the survivor `sub`
    ///
    /// Updates both ledger directions together: `rep` now maps to `sub`,
    /// and `rep` joins `sub`'s sub-node list. Only the latest fold is
    /// recorded; multi-hop chains are resolved by the caller.
    pub fn update_sub_and_rep(&mut self, rep: NodeId, sub: NodeId) {
        self.add_sub_node(rep, sub);
        self.update_rep_node(rep, sub);
    }

    fn add_sub_node(&mut self, rep: NodeId, sub: NodeId) {
        let subs = self.sub_nodes.entry(sub).or_default();
        if !subs.contains(&rep) {
            subs.push(rep);
        }
    }

    fn update_rep_node(&mut self, rep: NodeId, sub: NodeId) {
        self.rep_node.insert(rep, sub);
    }

    /// Original nodes folded into this node (the node itself first)
    pub fn get_sub_nodes(&self, node: NodeId) -> Result<&[NodeId]> {
        self.sub_nodes
            .get(&node)
            .map(Vec::as_slice)
            .ok_or(IcfgError::UnknownNode(node))
    }

    /// Latest representative recorded for this node (itself if never
    /// folded); not transitively resolved
    pub fn get_rep_node(&self, node: NodeId) -> Result<NodeId> {
        self.rep_node
            .get(&node)
            .copied()
            .ok_or(IcfgError::UnknownNode(node))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Query surface
    // ═══════════════════════════════════════════════════════════════════════

    pub fn get_node(&self, id: NodeId) -> Option<&IcfgNode> {
        self.graph.node(id)
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.graph.has_node(id)
    }

    pub fn get_edge_by_id(&self, id: EdgeId) -> Option<&IcfgEdge> {
        self.graph.edge(id)
    }

    /// Nodes in ascending id order
    pub fn node_iter(&self) -> impl Iterator<Item = &IcfgNode> {
        self.graph.node_iter()
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = &IcfgEdge> {
        self.graph.edge_iter()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Successor node ids in edge-insertion order
    pub fn successors(&self, node: NodeId) -> Vec<NodeId> {
        self.graph
            .node(node)
            .map(|n| {
                n.out_edges()
                    .iter()
                    .filter_map(|e| self.graph.edge(*e).map(|e| e.dst()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Predecessor node ids in edge-insertion order
    pub fn predecessors(&self, node: NodeId) -> Vec<NodeId> {
        self.graph
            .node(node)
            .map(|n| {
                n.in_edges()
                    .iter()
                    .filter_map(|e| self.graph.edge(*e).map(|e| e.src()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for Icfg {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F0: FunctionId = FunctionId(0);
    const F1: FunctionId = FunctionId(1);

    #[test]
    fn test_global_node_is_singleton() {
        let mut icfg = Icfg::new();
        let g = icfg.add_global_node().unwrap();
        assert_eq!(icfg.get_global_node(), Some(g));
        assert!(matches!(
            icfg.add_global_node(),
            Err(IcfgError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_duplicate_intra_node_is_rejected() {
        let mut icfg = Icfg::new();
        icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        assert!(matches!(
            icfg.add_intra_node(F0, InstructionId(1)),
            Err(IcfgError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_ret_node_requires_call_node() {
        let mut icfg = Icfg::new();
        assert!(matches!(
            icfg.add_ret_node(InstructionId(5)),
            Err(IcfgError::MissingPredecessorNode(_))
        ));
    }

    #[test]
    fn test_call_ret_pairing() {
        let mut icfg = Icfg::new();
        let cs = InstructionId(5);
        let call = icfg.add_call_node(F0, cs).unwrap();
        let ret = icfg.add_ret_node(cs).unwrap();

        let call_node = icfg.get_node(call).unwrap();
        let ret_node = icfg.get_node(ret).unwrap();
        assert_eq!(call_node.ret_node(), Some(ret));
        assert_eq!(ret_node.call_node(), Some(call));
        assert_eq!(call_node.call_site(), ret_node.call_site());
        // Ret node inherits the call node's owning function.
        assert_eq!(ret_node.fun(), Some(F0));
    }

    #[test]
    fn test_intra_edge_rejects_function_boundary() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        let b = icfg.add_intra_node(F1, InstructionId(2)).unwrap();
        assert!(matches!(
            icfg.add_intra_edge(a, b),
            Err(IcfgError::FunctionBoundary { .. })
        ));
        assert_eq!(icfg.edge_count(), 0);
    }

    #[test]
    fn test_intra_edge_allows_global_endpoint() {
        let mut icfg = Icfg::new();
        let g = icfg.add_global_node().unwrap();
        let entry = icfg.add_fun_entry_node(F0).unwrap();
        // Global node is function-free, the same-function check is waived.
        icfg.add_intra_edge(g, entry).unwrap();
        assert_eq!(icfg.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edge_is_idempotent() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        let b = icfg.add_intra_node(F0, InstructionId(2)).unwrap();
        let e1 = icfg.add_intra_edge(a, b).unwrap();
        let e2 = icfg.add_intra_edge(a, b).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(icfg.edge_count(), 1);
    }

    #[test]
    fn test_conditional_edge_carries_branch_payload() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        let b = icfg.add_intra_node(F0, InstructionId(2)).unwrap();
        let e = icfg
            .add_conditional_intra_edge(a, b, ValueId(9), 1)
            .unwrap();
        let edge = icfg.get_edge_by_id(e).unwrap();
        assert_eq!(
            edge.condition(),
            Some(BranchCondition {
                value: ValueId(9),
                branch: 1
            })
        );
        assert!(edge.is_intra());
    }

    #[test]
    fn test_call_edge_endpoint_shape() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        let entry = icfg.add_fun_entry_node(F1).unwrap();
        assert!(matches!(
            icfg.add_call_edge(a, entry),
            Err(IcfgError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_instruction_resolution_prefers_call_node() {
        let mut icfg = Icfg::new();
        let cs = InstructionId(4);
        let call = icfg.add_call_node(F0, cs).unwrap();
        icfg.add_ret_node(cs).unwrap();
        let plain = icfg.add_intra_node(F0, InstructionId(3)).unwrap();

        assert_eq!(icfg.get_node_for_instruction(cs), Some(call));
        assert_eq!(icfg.get_node_for_instruction(InstructionId(3)), Some(plain));
        assert_eq!(icfg.get_node_for_instruction(InstructionId(99)), None);
    }

    #[test]
    fn test_ledger_starts_with_identity() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        assert_eq!(icfg.get_rep_node(a).unwrap(), a);
        assert_eq!(icfg.get_sub_nodes(a).unwrap(), &[a]);
    }

    #[test]
    fn test_ledger_records_latest_fold_only() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        let b = icfg.add_intra_node(F0, InstructionId(2)).unwrap();
        let c = icfg.add_intra_node(F0, InstructionId(3)).unwrap();

        icfg.update_sub_and_rep(a, b);
        icfg.update_sub_and_rep(b, c);

        // Non-transitive: a still maps to b, not to c.
        assert_eq!(icfg.get_rep_node(a).unwrap(), b);
        assert_eq!(icfg.get_rep_node(b).unwrap(), c);
        assert_eq!(icfg.get_sub_nodes(b).unwrap(), &[b, a]);
        assert_eq!(icfg.get_sub_nodes(c).unwrap(), &[c, b]);
    }

    #[test]
    fn test_fold_is_recorded_once() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        let b = icfg.add_intra_node(F0, InstructionId(2)).unwrap();
        icfg.update_sub_and_rep(a, b);
        icfg.update_sub_and_rep(a, b);
        assert_eq!(icfg.get_sub_nodes(b).unwrap(), &[b, a]);
    }

    #[test]
    fn test_loop_membership() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        assert!(!icfg.is_in_loop(a));
        assert!(matches!(icfg.get_loops(a), Err(IcfgError::NotInLoop(_))));

        icfg.add_node_to_loop(a, LoopId(0));
        icfg.add_node_to_loop(a, LoopId(1));
        assert!(icfg.is_in_loop(a));
        assert_eq!(icfg.get_loops(a).unwrap(), &[LoopId(0), LoopId(1)]);
    }

    #[test]
    fn test_loop_double_insertion_is_not_deduplicated() {
        let mut icfg = Icfg::new();
        let a = icfg.add_intra_node(F0, InstructionId(1)).unwrap();
        icfg.add_node_to_loop(a, LoopId(0));
        icfg.add_node_to_loop(a, LoopId(0));
        assert_eq!(icfg.get_loops(a).unwrap(), &[LoopId(0), LoopId(0)]);
    }

    #[test]
    fn test_is_in_loop_inst_requires_known_instruction() {
        let mut icfg = Icfg::new();
        let inst = InstructionId(1);
        let a = icfg.add_intra_node(F0, inst).unwrap();
        icfg.add_node_to_loop(a, LoopId(0));

        assert!(icfg.is_in_loop_inst(inst).unwrap());
        assert_eq!(
            icfg.is_in_loop_inst(InstructionId(42)),
            Err(IcfgError::UnknownInstruction(InstructionId(42)))
        );
    }

    #[test]
    fn test_thread_fork_edge() {
        let mut icfg = Icfg::new();
        let cs = InstructionId(8);
        let fork = icfg.add_call_node(F0, cs).unwrap();
        icfg.add_ret_node(cs).unwrap();
        let entry = icfg.add_fun_entry_node(F1).unwrap();

        let e = icfg.add_thread_fork_edge(fork, entry).unwrap();
        assert_eq!(
            icfg.get_edge_by_id(e).unwrap().kind(),
            IcfgEdgeKind::ThreadFork
        );
        // A call edge between the same endpoints is a distinct edge.
        let c = icfg.add_call_edge(fork, entry).unwrap();
        assert_ne!(e, c);
        assert_eq!(icfg.edge_count(), 2);
    }
}
