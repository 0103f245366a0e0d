//! Shared data types

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of installable artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Namespace-qualified bundle of content
    Collection,
    /// Namespace-qualified reusable role
    Role,
}

impl ArtifactKind {
    /// Sub-command token used by ansible-galaxy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Role => "role",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One artifact at one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    pub kind: ArtifactKind,
    /// `namespace.name`
    pub identifier: String,
    /// Dotted version, opaque to this crate
    pub version: String,
}

impl ArtifactRecord {
    pub fn new(kind: ArtifactKind, identifier: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            version: version.into(),
        }
    }
}

/// Identifier to version
pub type ArtifactVersions = BTreeMap<String, String>;

/// Install path to the artifacts found under it
pub type Listing = BTreeMap<String, ArtifactVersions>;

/// Which artifact kinds an install request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    Collection,
    Role,
    /// Both kinds, driven by a requirements file
    Both,
}

impl InstallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Role => "role",
            Self::Both => "both",
        }
    }

    /// Sub-command tokens for this selector; `both` selects no sub-command
    pub fn arg_tokens(&self) -> Vec<String> {
        match self {
            Self::Collection | Self::Role => vec![self.as_str().to_string()],
            Self::Both => Vec::new(),
        }
    }

    /// Whether artifacts of `kind` are in scope
    pub fn includes(&self, kind: ArtifactKind) -> bool {
        match (self, kind) {
            (Self::Both, _) => true,
            (Self::Collection, ArtifactKind::Collection) => true,
            (Self::Role, ArtifactKind::Role) => true,
            _ => false,
        }
    }
}

impl FromStr for InstallType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collection" => Ok(Self::Collection),
            "role" => Ok(Self::Role),
            "both" => Ok(Self::Both),
            other => Err(Error::invalid_params(format!(
                "type must be one of collection, role, both; got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for InstallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired state of the requested artifacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallState {
    /// Install if missing, never update
    #[default]
    Present,
    /// Install and upgrade to the newest version (collections only)
    Latest,
}
