//! Shared models
//!
//! Opaque handles for the external program abstraction (functions,
//! instructions, values) and for loop descriptors. The front end that
//! lowers the target program owns the entities behind these ids; the
//! ICFG only needs stable, hashable, orderable keys.

mod loops;
mod program;

pub use loops::LoopId;
pub use program::{FunctionId, InstructionId, ValueId};
