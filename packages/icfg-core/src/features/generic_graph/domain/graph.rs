//! Arena-based directed graph
//!
//! Nodes and edges live in arenas owned by the graph and are addressed
//! by dense integer handles. Adjacency lists store handles, never
//! references, so there is no cyclic ownership between nodes and edges.
//!
//! Handle allocation is per-instance state: ids are dense from 0,
//! strictly monotonic, and never reused after a removal. Downstream
//! analyses key worklists and result tables by these ids and rely on
//! both properties.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::{IcfgError, Result};

/// Dense handle of a graph node
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

/// Dense handle of a graph edge
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeId(pub u32);

/// Node payload contract: identity plus insertion-ordered adjacency views
pub trait GraphNode {
    fn node_id(&self) -> NodeId;

    /// Incoming edges in insertion order
    fn in_edges(&self) -> &[EdgeId];

    /// Outgoing edges in insertion order
    fn out_edges(&self) -> &[EdgeId];

    /// Returns false if the edge was already attached
    fn attach_incoming(&mut self, edge: EdgeId) -> bool;

    /// Returns false if the edge was already attached
    fn attach_outgoing(&mut self, edge: EdgeId) -> bool;

    fn detach_incoming(&mut self, edge: EdgeId);

    fn detach_outgoing(&mut self, edge: EdgeId);
}

/// Edge payload contract: identity plus endpoint handles
pub trait GraphEdge {
    fn edge_id(&self) -> EdgeId;
    fn src(&self) -> NodeId;
    fn dst(&self) -> NodeId;
}

/// Directed graph arena generic over node and edge payloads
///
/// Nodes sit in a `BTreeMap` so whole-graph iteration is ordered by id;
/// edges sit in a hash arena and are reached through the endpoints'
/// adjacency lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericGraph<N, E> {
    nodes: BTreeMap<NodeId, N>,
    edges: FxHashMap<EdgeId, E>,
    next_node_id: u32,
    next_edge_id: u32,
}

impl<N: GraphNode, E: GraphEdge> GenericGraph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: FxHashMap::default(),
            next_node_id: 0,
            next_edge_id: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Nodes
    // ═══════════════════════════════════════════════════════════════════════

    /// Allocate the next node id and insert the payload built from it
    ///
    /// The id counter only ever moves forward, including across removals.
    pub fn add_node_with(&mut self, build: impl FnOnce(NodeId) -> N) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        let node = build(id);
        debug_assert_eq!(node.node_id(), id);
        self.nodes.insert(id, node);
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(&id)
    }

    #[inline]
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Drop a node from the arena
    ///
    /// Incident edges are untouched; the caller removes them first.
    pub fn remove_node(&mut self, id: NodeId) -> Result<N> {
        self.nodes.remove(&id).ok_or(IcfgError::UnknownNode(id))
    }

    /// Nodes in ascending id order
    pub fn node_iter(&self) -> impl Iterator<Item = &N> {
        self.nodes.values()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edges
    // ═══════════════════════════════════════════════════════════════════════

    /// Allocate the next edge id, insert the payload, and attach it to
    /// both endpoints' adjacency lists
    ///
    /// Both endpoints must already be in the arena.
    pub fn add_edge_with(&mut self, build: impl FnOnce(EdgeId) -> E) -> Result<EdgeId> {
        let id = EdgeId(self.next_edge_id);
        let edge = build(id);
        debug_assert_eq!(edge.edge_id(), id);
        let (src, dst) = (edge.src(), edge.dst());
        if !self.has_node(src) {
            return Err(IcfgError::UnknownNode(src));
        }
        if !self.has_node(dst) {
            return Err(IcfgError::UnknownNode(dst));
        }
        self.next_edge_id += 1;
        self.edges.insert(id, edge);
        // Unwraps cannot fire: both endpoints were just checked.
        let attached_out = self.nodes.get_mut(&src).map(|n| n.attach_outgoing(id));
        let attached_in = self.nodes.get_mut(&dst).map(|n| n.attach_incoming(id));
        debug_assert_eq!(attached_out, Some(true));
        debug_assert_eq!(attached_in, Some(true));
        Ok(id)
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&E> {
        self.edges.get(&id)
    }

    #[inline]
    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Detach the edge from both endpoints, then drop it from the arena
    ///
    /// Postcondition: the edge handle appears in neither endpoint's
    /// incoming nor outgoing adjacency list.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<E> {
        let edge = self.edges.remove(&id).ok_or(IcfgError::UnknownEdge(id))?;
        if let Some(src) = self.nodes.get_mut(&edge.src()) {
            src.detach_outgoing(id);
        }
        if let Some(dst) = self.nodes.get_mut(&edge.dst()) {
            dst.detach_incoming(id);
        }
        Ok(edge)
    }

    /// Edges in arena order (unspecified); use adjacency lists for
    /// deterministic traversal
    pub fn edge_iter(&self) -> impl Iterator<Item = &E> {
        self.edges.values()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<N: GraphNode, E: GraphEdge> Default for GenericGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestNode {
        id: NodeId,
        in_edges: Vec<EdgeId>,
        out_edges: Vec<EdgeId>,
    }

    impl GraphNode for TestNode {
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

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestEdge {
        id: EdgeId,
        src: NodeId,
        dst: NodeId,
    }

    impl GraphEdge for TestEdge {
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

    fn test_node(id: NodeId) -> TestNode {
        TestNode {
            id,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }

    #[test]
    fn test_node_ids_are_dense_and_monotonic() {
        let mut g: GenericGraph<TestNode, TestEdge> = GenericGraph::new();
        let a = g.add_node_with(test_node);
        let b = g.add_node_with(test_node);
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));

        g.remove_node(a).unwrap();
        let c = g.add_node_with(test_node);
        // Freed slots are never recycled.
        assert_eq!(c, NodeId(2));
    }

    #[test]
    fn test_edge_attaches_to_both_endpoints() {
        let mut g: GenericGraph<TestNode, TestEdge> = GenericGraph::new();
        let a = g.add_node_with(test_node);
        let b = g.add_node_with(test_node);
        let e = g
            .add_edge_with(|id| TestEdge { id, src: a, dst: b })
            .unwrap();

        assert_eq!(g.node(a).unwrap().out_edges(), &[e]);
        assert_eq!(g.node(b).unwrap().in_edges(), &[e]);
    }

    #[test]
    fn test_remove_edge_leaves_no_dangling_adjacency() {
        let mut g: GenericGraph<TestNode, TestEdge> = GenericGraph::new();
        let a = g.add_node_with(test_node);
        let b = g.add_node_with(test_node);
        let e = g
            .add_edge_with(|id| TestEdge { id, src: a, dst: b })
            .unwrap();

        g.remove_edge(e).unwrap();
        assert!(g.node(a).unwrap().out_edges().is_empty());
        assert!(g.node(b).unwrap().in_edges().is_empty());
        assert!(!g.has_edge(e));
    }

    #[test]
    fn test_edge_to_unknown_endpoint_is_rejected() {
        let mut g: GenericGraph<TestNode, TestEdge> = GenericGraph::new();
        let a = g.add_node_with(test_node);
        let ghost = NodeId(99);
        let err = g
            .add_edge_with(|id| TestEdge {
                id,
                src: a,
                dst: ghost,
            })
            .unwrap_err();
        assert_eq!(err, IcfgError::UnknownNode(ghost));
        assert_eq!(g.edge_count(), 0);
    }
}
