//! galaxy CLI
//!
//! Runs one ansible-galaxy install request and prints the resulting report.

mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use galaxy_install::{GalaxyInstall, RunOptions};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let params = cli.install_params()?;
    debug!("Install parameters: {:?}", params);
    let options = RunOptions {
        verbosity: cli.verbose,
        report_post_state: cli.report_post_state,
    };

    let report = GalaxyInstall::new(params)
        .with_command(&cli.executable)
        .with_options(options)
        .run()
        .context("ansible-galaxy install failed")?;

    output::print_report(&report, cli.output)
}

/// Initialize tracing on stderr so stdout carries only the report
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
