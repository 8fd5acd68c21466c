//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! - domain/ - Pure graph logic
//! - ports/  - Interface definitions (traits) for external collaborators

pub mod generic_graph;
pub mod icfg;
