//! Jolt Core
//!
//! Core types shared by the Jolt client and runner.
//!
//! This crate contains:
//! - Domain types: the trigger request, queue/build references and the final outcome
//! - DTOs: the JSON documents the build server returns while a build is polled

pub mod domain;
pub mod dto;
