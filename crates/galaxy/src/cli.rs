//! CLI argument parsing with clap

use anyhow::{bail, Result};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use galaxy_install::{InstallParams, InstallState, InstallType, GALAXY_COMMAND};

/// Install Ansible collections and roles with ansible-galaxy
#[derive(Parser, Debug)]
#[command(name = "galaxy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// YAML file with install parameters; flags override its values
    #[arg(long, value_name = "FILE")]
    pub params: Option<Utf8PathBuf>,

    /// Kind of artifacts to install
    #[arg(short = 't', long = "type", value_enum)]
    pub install_type: Option<TypeArg>,

    /// Collection or role to install, optionally with a version
    #[arg(short, long)]
    pub name: Option<String>,

    /// Requirements file listing what to install
    #[arg(short, long, value_name = "FILE")]
    pub requirements_file: Option<Utf8PathBuf>,

    /// Install path
    #[arg(short = 'p', long, value_name = "PATH")]
    pub dest: Option<Utf8PathBuf>,

    /// Desired state
    #[arg(long, value_enum)]
    pub state: Option<StateArg>,

    /// Overwrite existing artifacts
    #[arg(long)]
    pub force: bool,

    /// Do not install dependencies
    #[arg(long)]
    pub no_deps: bool,

    /// ansible-galaxy executable
    #[arg(long, env = "ANSIBLE_GALAXY_BIN", default_value = GALAXY_COMMAND)]
    pub executable: String,

    /// List installed artifacts again after installing
    #[arg(long)]
    pub report_post_state: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeArg {
    Collection,
    Role,
    Both,
}

impl From<TypeArg> for InstallType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Collection => InstallType::Collection,
            TypeArg::Role => InstallType::Role,
            TypeArg::Both => InstallType::Both,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateArg {
    Present,
    Latest,
}

impl From<StateArg> for InstallState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Present => InstallState::Present,
            StateArg::Latest => InstallState::Latest,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    /// Install parameters from the params file, overridden by flags
    pub fn install_params(&self) -> Result<InstallParams> {
        let mut params = match (&self.params, self.install_type) {
            (Some(path), _) => InstallParams::load(path)?,
            (None, Some(install_type)) => InstallParams {
                state: InstallState::Present,
                install_type: install_type.into(),
                name: None,
                requirements_file: None,
                dest: None,
                force: false,
                no_deps: false,
            },
            (None, None) => bail!("--type is required when no --params file is given"),
        };

        if let Some(install_type) = self.install_type {
            params.install_type = install_type.into();
        }
        if let Some(state) = self.state {
            params.state = state.into();
        }
        if let Some(name) = &self.name {
            params.name = Some(name.clone());
        }
        if let Some(file) = &self.requirements_file {
            params.requirements_file = Some(file.clone());
        }
        if let Some(dest) = &self.dest {
            params.dest = Some(dest.clone());
        }
        params.force |= self.force;
        params.no_deps |= self.no_deps;

        Ok(params)
    }
}
