//! Use Case Factory
//!
//! Creates the orchestrator with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::Orchestrator;
use crate::config::DeployConfig;
use crate::domain::ports::DeployEventSink;
use crate::infrastructure::{LocalFs, MasterRegistry, OpenSshChannel};

/// Type alias for the concrete Orchestrator with all dependencies
pub type ConcreteOrchestrator = Orchestrator<OpenSshChannel, LocalFs>;

/// Create an orchestrator talking OpenSSH to the configured targets.
///
/// Control masters are tracked in `registry` so an interrupt handler can
/// stop them.
pub fn create_orchestrator(
    config: DeployConfig,
    registry: MasterRegistry,
    events: Arc<dyn DeployEventSink>,
) -> ConcreteOrchestrator {
    let channel = OpenSshChannel::new(config.connection.clone()).with_registry(registry);
    Orchestrator::new(config, channel, LocalFs::new()).with_events(events)
}
