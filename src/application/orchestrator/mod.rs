//! Orchestrator Module
//!
//! Drives one deployment run against one target.
//!
//! ## Structure
//!
//! - `options` - What to run (`RunRequest`) and where the run is (`RunState`)
//! - `use_case` - The `Orchestrator` itself
//!
//! ## Usage
//!
//! ```ignore
//! use batchship::application::orchestrator::{Orchestrator, RunRequest};
//!
//! let mut orchestrator = Orchestrator::new(config, OpenSshChannel::new(settings), LocalFs::new());
//! let report = orchestrator.run(&RunRequest::all().with_target("primary"))?;
//! ```

mod options;
mod use_case;

pub use options::{RunRequest, RunState};
pub use use_case::Orchestrator;
