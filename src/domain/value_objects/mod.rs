//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod remote_path;
mod secret;
mod verification_mode;

pub use remote_path::{shell_quote, RemotePath};
pub use secret::Secret;
pub use verification_mode::VerificationMode;
