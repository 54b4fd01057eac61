//! Service layer
//!
//! Business logic of a trigger run: the two resolvers that poll the build
//! server, and the orchestrator that sequences them.

pub mod orchestrator;
pub mod resolver;

pub use orchestrator::{BuildState, Execution, Orchestrator, Policies};
pub use resolver::{resolve_build_completion, resolve_build_start};
