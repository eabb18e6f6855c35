//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `ssh/` - OpenSSH remote channel (control master + scp)
//! - `events/` - NDJSON event sink

pub mod events;
pub mod fs;
pub mod ssh;

// Re-export for convenience
pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use ssh::{MasterRegistry, OpenSshChannel, OpenSshSession};
