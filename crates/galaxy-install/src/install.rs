//! Install orchestration
//!
//! One [`GalaxyInstall::run`] call performs, strictly in sequence:
//!
//! 1. parameter validation and argument pre-formatting (no process started
//!    if either fails)
//! 2. version detection with locale fallback
//! 3. listing of the already installed artifacts of the requested kinds
//! 4. `ansible-galaxy install`
//! 5. optional re-listing, then reconciliation into an [`InstallReport`]

use std::sync::Arc;

use camino::Utf8PathBuf;
use galaxy_runner::{ArgSet, CmdRunner, CommandExecutor, DuctExecutor, RunInfo};
use serde::Serialize;
use tracing::{debug, info};

use crate::command::{
    galaxy_runner, GALAXY_COMMAND, INSTALL_TEMPLATE, LIST_TEMPLATE, VERSION_TEMPLATE,
};
use crate::error::{Error, Result};
use crate::install_output::parse_install_output;
use crate::listing::{list_installed, ListingFilter};
use crate::params::InstallParams;
use crate::reconcile::{reconcile, ChangePolicy, InstalledState};
use crate::types::{ArtifactKind, ArtifactVersions, InstallState, InstallType, Listing};
use crate::version::resolve_version;

/// Verbosity above which the install invocation details are reported
const RUN_INFO_VERBOSITY: u8 = 2;

/// Behaviour switches that are not install parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Caller verbosity (`-v` count)
    pub verbosity: u8,
    /// Re-list installed artifacts after the install
    pub report_post_state: bool,
}

/// Result of an install request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// ansible-core version used by ansible-galaxy
    pub version: String,
    #[serde(rename = "type")]
    pub install_type: InstallType,
    pub name: Option<String>,
    pub dest: Option<Utf8PathBuf>,
    pub requirements_file: Option<Utf8PathBuf>,
    pub force: bool,
    pub no_deps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_roles: Option<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_collections: Option<Listing>,
    pub new_collections: ArtifactVersions,
    pub new_roles: ArtifactVersions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_installed_roles: Option<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_installed_collections: Option<Listing>,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_info: Option<RunInfo>,
}

/// Installs collections and roles through ansible-galaxy
pub struct GalaxyInstall {
    params: InstallParams,
    options: RunOptions,
    command: String,
    executor: Arc<dyn CommandExecutor>,
}

impl GalaxyInstall {
    pub fn new(params: InstallParams) -> Self {
        Self {
            params,
            options: RunOptions::default(),
            command: GALAXY_COMMAND.to_string(),
            executor: Arc::new(DuctExecutor),
        }
    }

    /// Use a different ansible-galaxy executable
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the process executor
    pub fn with_executor(mut self, executor: Arc<dyn CommandExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Run the install and report what changed
    pub fn run(&self) -> Result<InstallReport> {
        self.params.validate()?;

        let base = galaxy_runner(&self.command)
            .with_defaults(self.params.to_arg_set())
            .with_executor(self.executor.clone());
        let install_args = self.install_args();
        preflight(&base, &install_args)?;

        let (runner, version) = resolve_version(&base)?;

        let before = self.list_state(&runner)?;

        if self.params.state == InstallState::Latest && !self.params.upgrade() {
            debug!("state=latest has no effect for type={}", self.params.install_type);
        }

        let mut ctx = runner.context(INSTALL_TEMPLATE)?;
        let new_artifacts = ctx.run_with(&install_args, |output| {
            Ok::<_, Error>(parse_install_output(&output.stdout))
        })?;
        let run_info = if self.options.verbosity > RUN_INFO_VERBOSITY {
            ctx.run_info().cloned()
        } else {
            None
        };

        let after = if self.options.report_post_state {
            Some(self.list_state(&runner)?)
        } else {
            None
        };

        let policy = ChangePolicy::for_flags(self.params.force, self.params.upgrade());
        let result = reconcile(before, new_artifacts, after, policy);

        info!(
            "ansible-galaxy {} install finished (changed={})",
            version, result.changed
        );

        let (post_installed_roles, post_installed_collections) = match result.after {
            Some(after) => (after.roles, after.collections),
            None => (None, None),
        };

        Ok(InstallReport {
            version: version.as_str().to_string(),
            install_type: self.params.install_type,
            name: self.params.name.clone(),
            dest: self.params.dest.clone(),
            requirements_file: self.params.requirements_file.clone(),
            force: self.params.force,
            no_deps: self.params.no_deps,
            installed_roles: result.before.roles,
            installed_collections: result.before.collections,
            new_collections: result.new_artifacts.collections,
            new_roles: result.new_artifacts.roles,
            post_installed_roles,
            post_installed_collections,
            changed: result.changed,
            run_info,
        })
    }

    fn install_args(&self) -> ArgSet {
        ArgSet::new()
            .with("galaxy_cmd", "install")
            .with("upgrade", self.params.upgrade())
    }

    fn listing_filter(&self) -> ListingFilter {
        ListingFilter::new(
            self.params.dest.as_ref().map(|p| p.to_string()),
            self.params.name_identifier().map(str::to_string),
        )
    }

    fn list_state(&self, runner: &CmdRunner) -> Result<InstalledState> {
        let filter = self.listing_filter();
        let mut state = InstalledState::default();
        for kind in [ArtifactKind::Role, ArtifactKind::Collection] {
            if self.params.lists(kind) {
                state.set(kind, list_installed(runner, kind, &filter)?);
            }
        }
        Ok(state)
    }
}

/// Check every template and the install arguments before running anything
fn preflight(runner: &CmdRunner, install_args: &ArgSet) -> Result<()> {
    runner.context(VERSION_TEMPLATE)?;
    runner.context(LIST_TEMPLATE)?;
    let argv = runner.context(INSTALL_TEMPLATE)?.build_args(install_args)?;
    debug!("Install arguments: {:?}", argv);
    Ok(())
}
