//! Command execution port and the `hdhomerun_config` process executor.

use std::path::{Path, PathBuf};
use std::process::Command;

use hdhomerun_protocol::CommandLine;

use crate::error::ExecError;

/// Default name of the command line tool.
pub const DEFAULT_CONFIG_COMMAND: &str = "hdhomerun_config";

/// Runs a command line against the appliance and returns its raw text output.
pub trait CommandExecutor {
    fn execute(&self, command: &CommandLine) -> Result<String, ExecError>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &E {
    fn execute(&self, command: &CommandLine) -> Result<String, ExecError> {
        (**self).execute(command)
    }
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for Box<E> {
    fn execute(&self, command: &CommandLine) -> Result<String, ExecError> {
        (**self).execute(command)
    }
}

/// Executes commands by spawning `hdhomerun_config` and capturing stdout.
///
/// Arguments are passed directly to the process; no shell is involved.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn describe(&self, command: &CommandLine) -> String {
        format!("{} {}", self.program.display(), command)
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_COMMAND)
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, command: &CommandLine) -> Result<String, ExecError> {
        let output = Command::new(&self.program)
            .args(command.args())
            .output()
            .map_err(|source| ExecError::Spawn {
                command: self.describe(command),
                source,
            })?;

        if !output.status.success() {
            return Err(ExecError::ExitStatus {
                command: self.describe(command),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| ExecError::InvalidOutput {
            command: self.describe(command),
        })
    }
}
