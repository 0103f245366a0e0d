//! Error types for galaxy-runner

use thiserror::Error;

/// Result type alias using galaxy-runner's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Command runner error types
#[derive(Error, Debug)]
pub enum Error {
    /// An invocation template names a parameter without a format rule
    #[error("Missing argument format for '{arg}' in template: {template}")]
    MissingArgumentFormat { arg: String, template: String },

    /// A parameter required by the template has no value
    #[error("Missing value for argument '{arg}' in template: {template}")]
    MissingArgumentValue { arg: String, template: String },

    /// The executable could not be located
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// The process could not be started or waited on
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero code while exit codes were checked
    #[error("Command '{command}' failed with exit code {rc}: {stderr}")]
    NonZeroExit {
        command: String,
        rc: i32,
        stderr: String,
    },
}

impl Error {
    /// Create a missing argument format error
    pub fn missing_argument_format(arg: impl Into<String>, template: impl Into<String>) -> Self {
        Self::MissingArgumentFormat {
            arg: arg.into(),
            template: template.into(),
        }
    }

    /// Create a missing argument value error
    pub fn missing_argument_value(arg: impl Into<String>, template: impl Into<String>) -> Self {
        Self::MissingArgumentValue {
            arg: arg.into(),
            template: template.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create a spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Create a non-zero exit error
    pub fn non_zero_exit(command: impl Into<String>, rc: i32, stderr: impl Into<String>) -> Self {
        Self::NonZeroExit {
            command: command.into(),
            rc,
            stderr: stderr.into(),
        }
    }

    /// Whether this error was raised before any process was started
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingArgumentFormat { .. } | Self::MissingArgumentValue { .. }
        )
    }
}
