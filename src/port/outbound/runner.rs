//! Command runner port.
//!
//! Provisioning needs to run a handful of external commands (`python -m venv`,
//! `pip install`). The application layer describes them as [`Invocation`]s and
//! hands them to a [`CommandRunner`], so decision logic can be tested without
//! performing real installs.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::error::Result;

/// An external command to run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Short operator-facing description, used in errors and logs.
    pub step: String,
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(step: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            step: step.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs invocations synchronously.
///
/// # Errors
///
/// Implementations return
/// [`Error::EnvironmentProvisioning`](crate::error::Error::EnvironmentProvisioning)
/// when the command cannot be spawned or exits unsuccessfully.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let invocation = Invocation::new("create venv", "python3")
            .arg("-m")
            .arg("venv")
            .arg("/proj/.venv");
        assert_eq!(invocation.to_string(), "python3 -m venv /proj/.venv");
    }
}
