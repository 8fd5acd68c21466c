//! Loop descriptor handle
//!
//! Loop detection runs outside this crate and hands back opaque loop
//! descriptors. The ICFG records which loops each node lies in,
//! innermost-first in the order the detector reports them.

use serde::{Deserialize, Serialize};

/// Opaque handle to a loop detected by the loop-analysis collaborator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LoopId(pub u32);
