//! batchship - ordered batch deployment over SSH
//!
//! Usage: batchship [--target NAME] [--dry-run] [--batch NAME] [--config PATH]
//!
//! Uploads the configured batches to one target in order, verifies each on
//! the remote host, then runs health checks. Exit status is 0 only when
//! every selected batch was uploaded and verified.

mod commands;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use batchship::infrastructure::ssh::run_askpass_if_requested;
use batchship::infrastructure::MasterRegistry;
use batchship::presentation::Cli;

/// Exit status after Ctrl-C
const INTERRUPTED: i32 = 130;

fn main() {
    // ssh re-invokes this binary as its askpass helper.
    if let Some(code) = run_askpass_if_requested() {
        std::process::exit(code);
    }

    let cli = Cli::parse();
    init_tracing(&cli);

    let registry = MasterRegistry::new();
    install_interrupt_handler(registry.clone());

    let code = match commands::run(&cli, registry) {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err, cli.json);
            1
        }
    };
    std::process::exit(code);
}

/// Logs go to stderr; stdout carries progress, reports and NDJSON.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_env("BATCHSHIP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("batchship={}", cli.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn install_interrupt_handler(registry: MasterRegistry) {
    let result = ctrlc::set_handler(move || {
        if !registry.is_empty() {
            eprintln!("\nInterrupted, closing {} ssh session(s)", registry.len());
        }
        registry.shutdown_all();
        std::process::exit(INTERRUPTED);
    });
    if let Err(err) = result {
        tracing::warn!(error = %err, "could not install Ctrl-C handler");
    }
}
