//! Program abstraction handles
//!
//! The front end assigns each function, instruction, and value a dense id
//! when lowering the target program. The ICFG uses these ids as lookup
//! keys in its identity tables; it never dereferences them.

use serde::{Deserialize, Serialize};

/// Identifier of a function in the lowered program
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FunctionId(pub u32);

/// Identifier of an instruction in the lowered program
///
/// A call site is the `InstructionId` of its call instruction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct InstructionId(pub u32);

/// Identifier of an SSA value in the lowered program
///
/// Used as the branch-condition payload of conditional intra edges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ValueId(pub u32);
