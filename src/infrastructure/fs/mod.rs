//! File System Implementations
//!
//! Concrete implementations of the `LocalFileSystem` port.

mod local;

pub use local::LocalFs;
