//! # galaxy-install
//!
//! Installs Ansible collections and roles with `ansible-galaxy` and reports
//! what changed.
//!
//! An install request ([`InstallParams`]) is executed by [`GalaxyInstall`]:
//!
//! - the ansible-galaxy version is detected, retrying with a fallback locale
//!   when the preferred one is rejected
//! - installed artifacts of the requested kinds are listed per path
//! - `ansible-galaxy install` runs and its output is parsed for the
//!   artifacts that were actually installed
//!
//! The result is an [`InstallReport`] whose `changed` flag reflects whether
//! anything new was installed.
//!
//! ```no_run
//! use galaxy_install::{GalaxyInstall, InstallParams, InstallType};
//!
//! # fn example() -> galaxy_install::Result<()> {
//! let params = InstallParams::named(InstallType::Collection, "community.docker:1.6.1");
//! let report = GalaxyInstall::new(params).run()?;
//! println!("changed: {}", report.changed);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod error;
pub mod install;
pub mod install_output;
pub mod listing;
pub mod params;
pub mod reconcile;
pub mod types;
pub mod version;

#[cfg(test)]
mod test_support;

pub use command::{galaxy_arg_formats, galaxy_runner, GALAXY_COMMAND};
pub use error::{Error, Result};
pub use install::{GalaxyInstall, InstallReport, RunOptions};
pub use install_output::{parse_install_output, NewArtifacts};
pub use listing::{list_installed, parse_listing, ListingFilter};
pub use params::InstallParams;
pub use reconcile::{reconcile, ChangePolicy, InstalledState, Reconciliation};
pub use types::{ArtifactKind, ArtifactRecord, ArtifactVersions, InstallState, InstallType, Listing};
pub use version::{resolve_version, GalaxyVersion, LocaleAttempt};
