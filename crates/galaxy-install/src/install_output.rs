//! Parsing of `ansible-galaxy install` output

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::{ArtifactKind, ArtifactRecord, ArtifactVersions};

/// `ns.name:1.2.3 was installed successfully` for collections,
/// `- ns.name (1.2.3) was installed successfully` for roles
static INSTALL_OUTPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<collection>\w+\.\w+):(?P<cversion>[\d.]+)|- (?P<role>\w+\.\w+) \((?P<rversion>[\d.]+)\)) was installed successfully$",
    )
    .expect("install output regex is valid")
});

/// Artifacts installed by one `ansible-galaxy install` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewArtifacts {
    pub collections: ArtifactVersions,
    pub roles: ArtifactVersions,
}

impl NewArtifacts {
    /// Whether nothing was installed
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.roles.is_empty()
    }

    /// Total number of installed artifacts
    pub fn len(&self) -> usize {
        self.collections.len() + self.roles.len()
    }

    /// Record an artifact, replacing an earlier version of the same identifier
    pub fn insert(&mut self, record: ArtifactRecord) {
        let versions = match record.kind {
            ArtifactKind::Collection => &mut self.collections,
            ArtifactKind::Role => &mut self.roles,
        };
        versions.insert(record.identifier, record.version);
    }

    /// Installed versions for one kind
    pub fn of_kind(&self, kind: ArtifactKind) -> &ArtifactVersions {
        match kind {
            ArtifactKind::Collection => &self.collections,
            ArtifactKind::Role => &self.roles,
        }
    }
}

/// Match one line of install output
pub fn match_install_line(line: &str) -> Option<ArtifactRecord> {
    let caps = INSTALL_OUTPUT_RE.captures(line)?;

    if let (Some(name), Some(version)) = (caps.name("collection"), caps.name("cversion")) {
        return Some(ArtifactRecord::new(
            ArtifactKind::Collection,
            name.as_str(),
            version.as_str(),
        ));
    }
    if let (Some(name), Some(version)) = (caps.name("role"), caps.name("rversion")) {
        return Some(ArtifactRecord::new(
            ArtifactKind::Role,
            name.as_str(),
            version.as_str(),
        ));
    }
    None
}

/// Collect every artifact reported as newly installed
pub fn parse_install_output(output: &str) -> NewArtifacts {
    let mut new = NewArtifacts::default();
    for record in output.lines().filter_map(match_install_line) {
        new.insert(record);
    }
    new
}
