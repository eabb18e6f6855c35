//! Password authentication through `SSH_ASKPASS`
//!
//! ssh never reads a password from an argument or a pipe. Instead the binary
//! is re-invoked by ssh as its askpass program, and prints the secret it
//! finds in its own environment. The secret never appears on a command line.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::Command;

use crate::domain::value_objects::Secret;

/// Set on the askpass child so `main` knows to answer instead of parsing args
pub const ASKPASS_MODE_ENV: &str = "BATCHSHIP_ASKPASS";
/// Holds the secret for the askpass child
pub const ASKPASS_SECRET_ENV: &str = "BATCHSHIP_ASKPASS_SECRET";

/// Point `cmd`'s askpass at this executable, carrying `secret`.
pub fn configure(cmd: &mut Command, secret: &Secret) -> io::Result<()> {
    let exe = std::env::current_exe()?;
    cmd.env("SSH_ASKPASS", exe)
        .env("SSH_ASKPASS_REQUIRE", "force")
        .env(ASKPASS_MODE_ENV, "1")
        .env(ASKPASS_SECRET_ENV, secret.expose());
    if std::env::var_os("DISPLAY").is_none() {
        cmd.env("DISPLAY", "batchship:0");
    }
    Ok(())
}

/// When running as an askpass helper, answer the prompt and return the exit
/// code for the process. Returns `None` in normal runs.
pub fn run_if_requested() -> Option<i32> {
    std::env::var_os(ASKPASS_MODE_ENV)?;
    let prompt = std::env::args_os().nth(1).unwrap_or_default();
    let secret = std::env::var(ASKPASS_SECRET_ENV).ok();
    Some(answer(&prompt, secret.as_deref(), &mut io::stdout()))
}

fn answer<W: Write>(prompt: &OsString, secret: Option<&str>, out: &mut W) -> i32 {
    let prompt = prompt.to_string_lossy();
    // Host key confirmations are left to StrictHostKeyChecking.
    if prompt.contains("(yes/no") {
        let _ = writeln!(out, "no");
        return 0;
    }
    match secret {
        Some(secret) => {
            let _ = writeln!(out, "{}", secret);
            let _ = out.flush();
            0
        }
        None => 1,
    }
}
