//! Report rendering

use anyhow::Result;
use console::style;
use galaxy_install::{ArtifactVersions, InstallReport, Listing};

use crate::cli::OutputFormat;

/// Print the report on stdout
pub fn print_report(report: &InstallReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print_text(report),
    }
    Ok(())
}

fn print_text(report: &InstallReport) {
    let status = if report.changed {
        style("changed").yellow().bold()
    } else {
        style("ok").green().bold()
    };
    println!(
        "{} ansible-galaxy {} (type={})",
        status, report.version, report.install_type
    );

    print_listing("Installed roles", report.installed_roles.as_ref());
    print_listing("Installed collections", report.installed_collections.as_ref());
    print_versions("New collections", &report.new_collections);
    print_versions("New roles", &report.new_roles);
    print_listing("Roles after install", report.post_installed_roles.as_ref());
    print_listing(
        "Collections after install",
        report.post_installed_collections.as_ref(),
    );
}

fn print_listing(title: &str, listing: Option<&Listing>) {
    let Some(listing) = listing else {
        return;
    };
    println!("\n{}", style(title).bold().underlined());
    if listing.is_empty() {
        println!("  {}", style("none").dim());
    }
    for (path, versions) in listing {
        println!("  {}", style(path).dim());
        for (name, version) in versions {
            println!("    {} {}", name, version);
        }
    }
}

fn print_versions(title: &str, versions: &ArtifactVersions) {
    if versions.is_empty() {
        return;
    }
    println!("\n{}", style(title).bold().underlined());
    for (name, version) in versions {
        println!("  {} {}", name, version);
    }
}
