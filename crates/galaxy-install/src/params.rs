//! Install request parameters

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use galaxy_runner::ArgSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ArtifactKind, InstallState, InstallType};

/// Parameters of one install request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallParams {
    /// Desired state
    #[serde(default)]
    pub state: InstallState,

    /// Artifact kinds targeted
    #[serde(rename = "type")]
    pub install_type: InstallType,

    /// Collection or role to install, optionally with a version
    /// (`community.docker:1.6.1`, `ansistrano.deploy,3.8.0`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Requirements file listing what to install
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements_file: Option<Utf8PathBuf>,

    /// Install path for the selected kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<Utf8PathBuf>,

    /// Overwrite existing artifacts
    #[serde(default)]
    pub force: bool,

    /// Do not install dependencies
    #[serde(default)]
    pub no_deps: bool,
}

impl InstallParams {
    /// Request to install a single named artifact
    pub fn named(install_type: InstallType, name: impl Into<String>) -> Self {
        Self {
            state: InstallState::Present,
            install_type,
            name: Some(name.into()),
            requirements_file: None,
            dest: None,
            force: false,
            no_deps: false,
        }
    }

    /// Request to install from a requirements file
    pub fn from_requirements(install_type: InstallType, file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            state: InstallState::Present,
            install_type,
            name: None,
            requirements_file: Some(file.into()),
            dest: None,
            force: false,
            no_deps: false,
        }
    }

    pub fn with_dest(mut self, dest: impl Into<Utf8PathBuf>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn with_state(mut self, state: InstallState) -> Self {
        self.state = state;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_no_deps(mut self, no_deps: bool) -> Self {
        self.no_deps = no_deps;
        self
    }

    /// Load parameters from a YAML file
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        debug!("Loaded parameters from {}", path);
        Self::from_yaml(&content)
    }

    /// Parse parameters from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Check parameter combinations
    pub fn validate(&self) -> Result<()> {
        match (&self.name, &self.requirements_file) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_params(
                    "parameters are mutually exclusive: name|requirements_file",
                ))
            }
            (None, None) => {
                return Err(Error::invalid_params(
                    "one of the following is required: name, requirements_file",
                ))
            }
            _ => {}
        }

        if self.install_type == InstallType::Both && self.requirements_file.is_none() {
            return Err(Error::invalid_params(
                "type is both but all of the following are missing: requirements_file",
            ));
        }

        if self.name.as_deref().is_some_and(str::is_empty) {
            return Err(Error::invalid_params("name must not be empty"));
        }

        Ok(())
    }

    /// Whether `--upgrade` is passed to install
    ///
    /// `state=latest` only applies to collections; for roles it is a no-op.
    pub fn upgrade(&self) -> bool {
        self.state == InstallState::Latest && self.install_type == InstallType::Collection
    }

    /// Identifier part of `name`, without any version suffix
    pub fn name_identifier(&self) -> Option<&str> {
        let name = self.name.as_deref()?;
        let end = match self.install_type {
            InstallType::Collection => name.find(':'),
            InstallType::Role => name.find(','),
            InstallType::Both => name.find([':', ',']),
        };
        Some(end.map_or(name, |i| &name[..i]).trim())
    }

    /// Whether artifacts of `kind` are listed before installing
    pub fn lists(&self, kind: ArtifactKind) -> bool {
        self.install_type.includes(kind)
    }

    /// Default runner values for every galaxy parameter
    pub fn to_arg_set(&self) -> ArgSet {
        ArgSet::new()
            .with("type", self.install_type.as_str())
            .with("name", self.name.clone())
            .with(
                "requirements_file",
                self.requirements_file.as_ref().map(|p| p.to_string()),
            )
            .with("dest", self.dest.as_ref().map(|p| p.to_string()))
            .with("force", self.force)
            .with("no_deps", self.no_deps)
    }
}
