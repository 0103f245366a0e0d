//! Process execution backends

use crate::error::{Error, Result};
use tracing::debug;

/// Captured result of one process execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code (-1 when terminated by a signal)
    pub rc: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl RunOutput {
    /// Build an output value
    pub fn new(rc: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            rc,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with code zero
    pub fn success(&self) -> bool {
        self.rc == 0
    }
}

/// Executes an external program and captures its output
///
/// Implementations must block until the process has exited and must never
/// fail because of the exit code; exit code policy belongs to the caller.
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args`, overriding the given environment variables
    fn execute(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<RunOutput>;
}

/// Executor backed by `duct`
#[derive(Debug, Clone, Copy, Default)]
pub struct DuctExecutor;

impl CommandExecutor for DuctExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<RunOutput> {
        let path = which::which(program).map_err(|_| Error::command_not_found(program))?;
        debug!("Resolved {} to {}", program, path.display());

        let mut expr = duct::cmd(path, args);
        for (key, value) in env {
            expr = expr.env(key, value);
        }

        let output = expr
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| Error::spawn(program, e))?;

        Ok(RunOutput {
            rc: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
