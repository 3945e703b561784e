//! Validates the generated configuration and, only if that passes, reloads the daemon.

use std::io;
use std::process::Command;

use labmon_common::command::CommandRunner;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded,
    ValidationFailed,
    ReloadFailed,
}

/// Runs command lines through `sh -c`.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> io::Result<bool> {
        Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .status()
            .map(|status| status.success())
    }
}

pub fn reload(runner: &dyn CommandRunner, validate_command: &str, reload_command: &str) -> ReloadOutcome {
    match runner.run(validate_command) {
        Ok(true) => {}
        Ok(false) => {
            error!("Monitoring config validation failed");
            return ReloadOutcome::ValidationFailed;
        }
        Err(e) => {
            error!("Could not run {validate_command:?}: {e}");
            return ReloadOutcome::ValidationFailed;
        }
    }

    info!("Reloading monitoring daemon");
    match runner.run(reload_command) {
        Ok(true) => ReloadOutcome::Reloaded,
        Ok(false) => {
            error!("Reload command {reload_command:?} failed");
            ReloadOutcome::ReloadFailed
        }
        Err(e) => {
            error!("Could not run {reload_command:?}: {e}");
            ReloadOutcome::ReloadFailed
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
