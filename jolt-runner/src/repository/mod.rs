//! Repository layer
//!
//! Repositories are stateless adapters over the build server's HTTP API.
//! They are trait-based so the resolvers and the orchestrator can be driven
//! by scripted fakes in tests.

mod jenkins;

#[cfg(test)]
pub(crate) mod fake;

pub use jenkins::{HttpJenkinsRepository, JenkinsRepository};
