//! Error types for galaxy-install

use thiserror::Error;

/// Result type alias using galaxy-install's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy install error types
#[derive(Error, Debug)]
pub enum Error {
    /// Command formatting or execution failed
    #[error(transparent)]
    Runner(#[from] galaxy_runner::Error),

    /// ansible-galaxy rejected the forced locale
    #[error("Unsupported locale: {message}")]
    UnsupportedLocale { message: String },

    /// The version output did not match the expected format
    #[error("Unable to determine ansible-galaxy version from: {line}")]
    VersionParse { line: String },

    /// ansible-galaxy is older than the supported baseline
    #[error("Unsupported ansible-galaxy version {version}: support for Ansible 2.9 and ansible-base 2.10 has been removed")]
    UnsupportedVersion { version: String },

    /// ansible-galaxy failed for a reason other than the locale
    #[error("ansible-galaxy failed with exit code {rc}: {stderr}")]
    GalaxyFailed { rc: i32, stderr: String },

    /// Invalid combination of install parameters
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    /// Parameter file not found
    #[error("Parameter file not found: {path}")]
    ConfigNotFound { path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported locale error
    pub fn unsupported_locale(message: impl Into<String>) -> Self {
        Self::UnsupportedLocale {
            message: message.into(),
        }
    }

    /// Create a version parse error
    pub fn version_parse(line: impl Into<String>) -> Self {
        Self::VersionParse { line: line.into() }
    }

    /// Create an unsupported version error
    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version: version.into(),
        }
    }

    /// Create a galaxy failure error
    pub fn galaxy_failed(rc: i32, stderr: impl Into<String>) -> Self {
        Self::GalaxyFailed {
            rc,
            stderr: stderr.into(),
        }
    }

    /// Create an invalid parameters error
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Whether the error is a locale failure that may be retried
    pub fn is_unsupported_locale(&self) -> bool {
        matches!(self, Self::UnsupportedLocale { .. })
    }
}
