//! Domain Layer
//!
//! Deployment concepts without I/O: targets, batches, outcomes, reports,
//! and the ports through which the application layer reaches the outside.
//!
//! ## Structure
//!
//! - `entities/` - Targets, batch plans, transfer outcomes, reports
//! - `value_objects/` - Remote paths, secrets, verification mode
//! - `ports/` - Remote channel, local file system, deploy events

pub mod entities;
pub mod ports;
pub mod value_objects;
