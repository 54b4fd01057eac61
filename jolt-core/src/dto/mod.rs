//! Data Transfer Objects for the build server's JSON API
//!
//! Only the fields the runner inspects are modelled; everything else in the
//! server's documents is ignored during deserialization.

pub mod build;
pub mod queue;
