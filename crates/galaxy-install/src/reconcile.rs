//! Before/after reconciliation of an install

use serde::Serialize;
use tracing::{debug, info};

use crate::install_output::NewArtifacts;
use crate::types::{ArtifactKind, Listing};

/// Installed artifacts per kind; `None` for kinds that were not listed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstalledState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Listing>,
}

impl InstalledState {
    pub fn get(&self, kind: ArtifactKind) -> Option<&Listing> {
        match kind {
            ArtifactKind::Collection => self.collections.as_ref(),
            ArtifactKind::Role => self.roles.as_ref(),
        }
    }

    pub fn set(&mut self, kind: ArtifactKind, listing: Listing) {
        match kind {
            ArtifactKind::Collection => self.collections = Some(listing),
            ArtifactKind::Role => self.roles = Some(listing),
        }
    }

    /// Whether `identifier` appears under any listed path for `kind`
    pub fn contains(&self, kind: ArtifactKind, identifier: &str) -> bool {
        self.get(kind)
            .is_some_and(|listing| listing.values().any(|v| v.contains_key(identifier)))
    }
}

/// How the changed flag is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePolicy {
    /// Changed iff something was installed
    OnNewArtifacts,
    /// Always changed; ansible-galaxy reinstalls under `--force`/`--upgrade`
    AlwaysReport,
}

impl ChangePolicy {
    pub fn for_flags(force: bool, upgrade: bool) -> Self {
        if force || upgrade {
            Self::AlwaysReport
        } else {
            Self::OnNewArtifacts
        }
    }
}

/// Outcome of one install call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub before: InstalledState,
    pub new_artifacts: NewArtifacts,
    pub after: Option<InstalledState>,
    pub changed: bool,
}

/// Combine pre-state, install output and optional post-state
pub fn reconcile(
    before: InstalledState,
    new_artifacts: NewArtifacts,
    after: Option<InstalledState>,
    policy: ChangePolicy,
) -> Reconciliation {
    for kind in [ArtifactKind::Collection, ArtifactKind::Role] {
        for (identifier, version) in new_artifacts.of_kind(kind) {
            if before.contains(kind, identifier) {
                debug!("Replaced {} {} with version {}", kind, identifier, version);
            } else {
                debug!("Installed new {} {} {}", kind, identifier, version);
            }
        }
    }

    let changed = match policy {
        ChangePolicy::OnNewArtifacts => !new_artifacts.is_empty(),
        ChangePolicy::AlwaysReport => true,
    };
    info!(
        "{} artifact(s) installed, changed={}",
        new_artifacts.len(),
        changed
    );

    Reconciliation {
        before,
        new_artifacts,
        after,
        changed,
    }
}
