//! Call Graph Protocol
//!
//! Trait definition for call graph providers.
//!
//! The call graph is produced by an external points-to analysis that
//! resolves indirect call targets iteratively, so the target set per
//! call site only ever grows. `Icfg::update_call_graph` re-reads it
//! after each resolution round.

use rustc_hash::FxHashMap;

use crate::shared::models::{FunctionId, InstructionId};

/// Call graph protocol
///
/// Any call graph implementation must provide:
/// - call_sites() -> all call sites it has resolutions for
/// - callees(call_site) -> currently resolved callee set
///
/// Implementations can use any data structure (petgraph, HashMap, etc.)
pub trait CallGraphProvider {
    /// All call sites with at least one resolved target
    fn call_sites(&self) -> Vec<InstructionId>;

    /// Currently resolved callees of a call site
    ///
    /// Empty if the call site is unknown or still unresolved. The set
    /// grows monotonically across resolution rounds.
    fn callees(&self, call_site: InstructionId) -> Vec<FunctionId>;

    /// Number of call sites with resolutions
    fn num_call_sites(&self) -> usize {
        self.call_sites().len()
    }
}

/// Simple map-backed call graph implementation
///
/// For testing and simple use cases.
#[derive(Debug, Clone, Default)]
pub struct SimpleCallGraph {
    /// Call site -> resolved callees
    targets: FxHashMap<InstructionId, Vec<FunctionId>>,
}

impl SimpleCallGraph {
    /// Create new empty call graph
    pub fn new() -> Self {
        Self {
            targets: FxHashMap::default(),
        }
    }

    /// Record a resolved target for a call site
    pub fn add_target(&mut self, call_site: InstructionId, callee: FunctionId) {
        let callees = self.targets.entry(call_site).or_default();
        if !callees.contains(&callee) {
            callees.push(callee);
        }
    }
}

impl CallGraphProvider for SimpleCallGraph {
    fn call_sites(&self) -> Vec<InstructionId> {
        self.targets.keys().copied().collect()
    }

    fn callees(&self, call_site: InstructionId) -> Vec<FunctionId> {
        self.targets.get(&call_site).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_call_graph() {
        let mut cg = SimpleCallGraph::new();
        cg.add_target(InstructionId(1), FunctionId(10));
        cg.add_target(InstructionId(1), FunctionId(11));
        cg.add_target(InstructionId(1), FunctionId(10)); // no duplicate

        assert_eq!(cg.callees(InstructionId(1)), vec![FunctionId(10), FunctionId(11)]);
        assert!(cg.callees(InstructionId(2)).is_empty());
        assert_eq!(cg.num_call_sites(), 1);
    }
}
