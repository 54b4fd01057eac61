//! Jolt Runner
//!
//! Triggers a parameterized build on a Jenkins server and optionally waits
//! for its result.
//!
//! Architecture:
//! - Configuration: trigger inputs and polling budgets
//! - Repository: HTTP communication with the build server
//! - Scheduler: the generic poll-until-done loop
//! - Services: build-start and build-completion resolvers, and the
//!   orchestrator that sequences trigger, start and completion
//! - Report: mapping the final outcome onto an exit code

pub mod config;
pub mod error;
pub mod report;
pub mod repository;
pub mod scheduler;
pub mod service;

pub use config::Config;
pub use error::{Stage, TriggerError};
pub use service::{BuildState, Execution, Orchestrator, Policies};
