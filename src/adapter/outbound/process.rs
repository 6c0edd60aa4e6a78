//! System process adapter: provisioning commands and the server handoff.

use std::convert::Infallible;
use std::process::Command;

use tracing::{debug, info};

use crate::domain::launch::ServerCommand;
use crate::error::{Error, Result};
use crate::port::outbound::runner::{CommandRunner, Invocation};

/// Lines of captured stderr kept in a provisioning error.
const STDERR_TAIL_LINES: usize = 8;

/// Runs invocations with `std::process::Command`, capturing their output.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        debug!(step = %invocation.step, command = %invocation, "Running command");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .map_err(|e| Error::EnvironmentProvisioning {
                step: invocation.step.clone(),
                reason: format!("failed to start {}: {e}", invocation.program.display()),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = stderr_tail(&stderr);
        Err(Error::EnvironmentProvisioning {
            step: invocation.step.clone(),
            reason: if tail.is_empty() {
                format!("{} exited with {}", invocation, output.status)
            } else {
                format!("{} exited with {}\n{tail}", invocation, output.status)
            },
        })
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

fn to_command(server: &ServerCommand) -> Command {
    let mut command = Command::new(&server.program);
    command
        .args(&server.args)
        .current_dir(&server.working_dir)
        .envs(server.env.iter().map(|(k, v)| (k, v)));
    command
}

/// Replace the launcher with the server process.
///
/// On Unix the process image is replaced, so this only returns on failure.
/// Elsewhere the server runs as a child and the launcher exits with its code.
pub fn hand_off(server: &ServerCommand) -> Result<Infallible> {
    info!(command = %server, cwd = %server.working_dir.display(), "Handing off to server");
    let mut command = to_command(server);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let source = command.exec();
        Err(Error::ServerStart {
            program: server.program.clone(),
            source,
        })
    }

    #[cfg(not(unix))]
    {
        let status = command.status().map_err(|source| Error::ServerStart {
            program: server.program.clone(),
            source,
        })?;
        std::process::exit(status.code().unwrap_or(1));
    }
}
