//! Core domain types
//!
//! These values are built once and passed down the call chain by reference.
//! Nothing here is mutated after construction.

pub mod build;
pub mod trigger;
