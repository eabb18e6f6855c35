//! Shared helpers for the integration tests.
//!
//! - `fakes`: recording remote channel and event sink
//! - `fixtures`: configuration text and project trees
//! - `env`: isolated environment for running the `batchship` binary

#![allow(dead_code)]

pub mod env;
pub mod fakes;
pub mod fixtures;

pub use env::*;
pub use fakes::*;
pub use fixtures::*;
