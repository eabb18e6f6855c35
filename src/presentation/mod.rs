//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the orchestrator with infrastructure dependencies
//! - Output formatting helpers
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Wires the orchestrator to OpenSSH and the local disk
//! - `output` - Format-independent helpers
//!
//! ## Usage
//!
//! ```ignore
//! use batchship::presentation::factory;
//!
//! let mut orchestrator = factory::create_orchestrator(config, registry, events);
//! let report = orchestrator.run(&request)?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, ColorWhen};
pub use factory::create_orchestrator;
pub use output::{format_bytes, format_elapsed, OutputFormat};
