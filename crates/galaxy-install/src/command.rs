//! ansible-galaxy command line layout

use galaxy_runner::{ArgFormat, ArgFormats, ArgValue, CmdRunner};

use crate::types::InstallType;

/// Default executable name
pub const GALAXY_COMMAND: &str = "ansible-galaxy";

/// Template for `ansible-galaxy --version`
pub const VERSION_TEMPLATE: &str = "version";

/// Template for `ansible-galaxy <kind> list`
pub const LIST_TEMPLATE: &str = "type galaxy_cmd dest";

/// Template for `ansible-galaxy [<kind>] install ...`
pub const INSTALL_TEMPLATE: &str =
    "type galaxy_cmd upgrade force no_deps dest requirements_file name";

/// Format table for every ansible-galaxy parameter
pub fn galaxy_arg_formats() -> ArgFormats {
    ArgFormats::new()
        .with("type", ArgFormat::func(format_install_type))
        .with("galaxy_cmd", ArgFormat::list())
        .with("upgrade", ArgFormat::flag("--upgrade"))
        .with("requirements_file", ArgFormat::opt_val("-r"))
        .with("dest", ArgFormat::opt_val("-p"))
        .with("force", ArgFormat::flag("--force"))
        .with("no_deps", ArgFormat::flag("--no-deps"))
        .with("version", ArgFormat::fixed("--version"))
        .with("name", ArgFormat::list())
}

/// Runner for `command` with the galaxy format table, failing on non-zero exit
pub fn galaxy_runner(command: impl Into<String>) -> CmdRunner {
    CmdRunner::new(command, galaxy_arg_formats()).with_check_rc(true)
}

/// `both` selects no sub-command, any other selector is passed through
fn format_install_type(value: &ArgValue) -> Vec<String> {
    match value.as_str().map(str::parse::<InstallType>) {
        Some(Ok(install_type)) => install_type.arg_tokens(),
        Some(Err(_)) => value.as_str().map(|s| vec![s.to_string()]).unwrap_or_default(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_runner::ArgSet;

    fn defaults() -> ArgSet {
        ArgSet::new()
            .with("type", "collection")
            .with("name", "community.network")
            .with("dest", ArgValue::None)
            .with("requirements_file", ArgValue::None)
            .with("force", false)
            .with("no_deps", false)
    }

    #[test]
    fn test_version_args() {
        let runner = galaxy_runner(GALAXY_COMMAND);
        let ctx = runner.context(VERSION_TEMPLATE).unwrap();
        assert_eq!(ctx.build_args(&ArgSet::new()).unwrap(), vec!["--version"]);
    }

    #[test]
    fn test_list_args() {
        let runner = galaxy_runner(GALAXY_COMMAND).with_defaults(defaults());
        let ctx = runner.context(LIST_TEMPLATE).unwrap();
        let argv = ctx
            .build_args(&ArgSet::new().with("type", "role").with("galaxy_cmd", "list"))
            .unwrap();
        assert_eq!(argv, vec!["role", "list"]);
    }

    #[test]
    fn test_install_args() {
        let runner = galaxy_runner(GALAXY_COMMAND)
            .with_defaults(defaults().with("force", true).with("dest", "/ansible"));
        let ctx = runner.context(INSTALL_TEMPLATE).unwrap();
        let argv = ctx
            .build_args(
                &ArgSet::new()
                    .with("galaxy_cmd", "install")
                    .with("upgrade", true),
            )
            .unwrap();
        assert_eq!(
            argv,
            vec![
                "collection",
                "install",
                "--upgrade",
                "--force",
                "-p",
                "/ansible",
                "community.network"
            ]
        );
    }

    #[test]
    fn test_both_emits_no_type_token() {
        let runner = galaxy_runner(GALAXY_COMMAND).with_defaults(
            defaults()
                .with("type", "both")
                .with("name", ArgValue::None)
                .with("requirements_file", "requirements.yml"),
        );
        let ctx = runner.context(INSTALL_TEMPLATE).unwrap();
        let argv = ctx
            .build_args(
                &ArgSet::new()
                    .with("galaxy_cmd", "install")
                    .with("upgrade", false),
            )
            .unwrap();
        assert_eq!(argv, vec!["install", "-r", "requirements.yml"]);
    }

    #[test]
    fn test_install_without_upgrade_value_is_contract_violation() {
        let runner = galaxy_runner(GALAXY_COMMAND).with_defaults(defaults());
        let ctx = runner.context(INSTALL_TEMPLATE).unwrap();
        let err = ctx
            .build_args(&ArgSet::new().with("galaxy_cmd", "install"))
            .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_argument_vector_is_deterministic() {
        let a = defaults().with("galaxy_cmd", "install").with("upgrade", false);
        let b = ArgSet::new()
            .with("upgrade", false)
            .with("no_deps", false)
            .with("galaxy_cmd", "install")
            .with("force", false)
            .with("requirements_file", ArgValue::None)
            .with("dest", ArgValue::None)
            .with("name", "community.network")
            .with("type", "collection");

        let runner = galaxy_runner(GALAXY_COMMAND);
        let ctx = runner.context(INSTALL_TEMPLATE).unwrap();
        assert_eq!(ctx.build_args(&a).unwrap(), ctx.build_args(&b).unwrap());
    }
}
