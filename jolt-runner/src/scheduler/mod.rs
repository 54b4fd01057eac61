//! Scheduling layer for the runner
//!
//! Holds the generic retry-until-condition loop both resolvers are built on.

pub mod poller;

pub use poller::{PollError, PollPolicy, PollResult, poll};
