pub mod deploy;
pub mod plan;
pub mod targets;
pub mod transfer;
