//! Command runner
//!
//! A [`CmdRunner`] binds an executable to a format table and a set of default
//! parameter values. Each invocation goes through a [`RunContext`] created
//! from a whitespace-separated template that selects which parameters are
//! emitted, and in which order.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::executor::{CommandExecutor, DuctExecutor, RunOutput};
use crate::format::{ArgFormats, ArgSet, ArgValue};

/// Environment variables pinned when a locale is forced
const LOCALE_VARS: &[&str] = &["LANGUAGE", "LC_ALL", "LC_MESSAGES"];

/// Details of the last invocation made through a [`RunContext`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunInfo {
    /// Full command line, executable first
    pub cmd: Vec<String>,
    /// Environment overrides applied to the child
    pub environ_update: BTreeMap<String, String>,
    /// Whether a non-zero exit was treated as an error
    pub check_rc: bool,
    /// Exit code
    pub rc: i32,
    /// Captured standard output
    pub out: String,
    /// Captured standard error
    pub err: String,
}

/// Runner for one external command
#[derive(Clone)]
pub struct CmdRunner {
    command: String,
    formats: ArgFormats,
    defaults: ArgSet,
    force_lang: Option<String>,
    check_rc: bool,
    executor: Arc<dyn CommandExecutor>,
}

impl CmdRunner {
    /// Create a runner executing `command` through [`DuctExecutor`]
    pub fn new(command: impl Into<String>, formats: ArgFormats) -> Self {
        Self {
            command: command.into(),
            formats,
            defaults: ArgSet::new(),
            force_lang: None,
            check_rc: false,
            executor: Arc::new(DuctExecutor),
        }
    }

    /// Set default parameter values used when a call does not override them
    pub fn with_defaults(mut self, defaults: ArgSet) -> Self {
        self.defaults = defaults;
        self
    }

    /// Force a locale on every invocation
    pub fn with_locale(mut self, lang: impl Into<String>) -> Self {
        self.force_lang = Some(lang.into());
        self
    }

    /// Default exit code policy for new contexts
    pub fn with_check_rc(mut self, check_rc: bool) -> Self {
        self.check_rc = check_rc;
        self
    }

    /// Replace the process executor
    pub fn with_executor(mut self, executor: Arc<dyn CommandExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// The forced locale, if any
    pub fn locale(&self) -> Option<&str> {
        self.force_lang.as_deref()
    }

    /// Create an invocation context for a template such as `"type galaxy_cmd dest"`
    ///
    /// Fails when the template names a parameter without a format rule.
    pub fn context(&self, template: &str) -> Result<RunContext<'_>> {
        let args_order: Vec<String> = template.split_whitespace().map(str::to_string).collect();
        if let Some(missing) = args_order.iter().find(|a| !self.formats.contains(a)) {
            return Err(Error::missing_argument_format(missing, template));
        }

        Ok(RunContext {
            runner: self,
            template: template.to_string(),
            args_order,
            check_rc: self.check_rc,
            run_info: None,
        })
    }

    fn environ_update(&self) -> BTreeMap<String, String> {
        match &self.force_lang {
            Some(lang) => LOCALE_VARS
                .iter()
                .map(|var| (var.to_string(), lang.clone()))
                .collect(),
            None => BTreeMap::new(),
        }
    }
}

impl std::fmt::Debug for CmdRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmdRunner")
            .field("command", &self.command)
            .field("formats", &self.formats)
            .field("defaults", &self.defaults)
            .field("force_lang", &self.force_lang)
            .field("check_rc", &self.check_rc)
            .finish_non_exhaustive()
    }
}

/// One invocation shape of a [`CmdRunner`]
#[derive(Debug)]
pub struct RunContext<'a> {
    runner: &'a CmdRunner,
    template: String,
    args_order: Vec<String>,
    check_rc: bool,
    run_info: Option<RunInfo>,
}

impl RunContext<'_> {
    /// Override the exit code policy for this context
    pub fn check_rc(mut self, check_rc: bool) -> Self {
        self.check_rc = check_rc;
        self
    }

    /// Build the argument vector without running anything
    ///
    /// Values in `args` take precedence over the runner defaults.
    pub fn build_args(&self, args: &ArgSet) -> Result<Vec<String>> {
        let mut argv = Vec::new();
        for name in &self.args_order {
            // Formats were checked when the context was created
            let Some(format) = self.runner.formats.get(name) else {
                return Err(Error::missing_argument_format(name, &self.template));
            };

            let value = match args.get(name).or_else(|| self.runner.defaults.get(name)) {
                Some(value) => value.clone(),
                None if format.ignores_missing_value() => ArgValue::None,
                None => return Err(Error::missing_argument_value(name, &self.template)),
            };

            argv.extend(format.format(&value));
        }
        Ok(argv)
    }

    /// Run the command and return its raw output
    pub fn run(&mut self, args: &ArgSet) -> Result<RunOutput> {
        self.run_with(args, |output| Ok::<_, Error>(output.clone()))
    }

    /// Run the command and hand the output to `process`
    ///
    /// With `check_rc` enabled a non-zero exit is returned as
    /// [`Error::NonZeroExit`] and `process` is not called.
    pub fn run_with<T, E, F>(&mut self, args: &ArgSet, process: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&RunOutput) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let argv = self.build_args(args)?;
        let environ_update = self.runner.environ_update();
        let env: Vec<(String, String)> = environ_update
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let command_line = std::iter::once(self.runner.command.as_str())
            .chain(argv.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(
            "Running: {} (locale: {})",
            command_line,
            self.runner.locale().unwrap_or("inherited")
        );

        let output = self
            .runner
            .executor
            .execute(&self.runner.command, &argv, &env)?;
        debug!("{} exited with code {}", self.runner.command, output.rc);

        let mut cmd = Vec::with_capacity(argv.len() + 1);
        cmd.push(self.runner.command.clone());
        cmd.extend(argv);
        self.run_info = Some(RunInfo {
            cmd,
            environ_update,
            check_rc: self.check_rc,
            rc: output.rc,
            out: output.stdout.clone(),
            err: output.stderr.clone(),
        });

        if self.check_rc && !output.success() {
            return Err(Error::non_zero_exit(command_line, output.rc, output.stderr.trim()).into());
        }

        process(&output)
    }

    /// Details of the last run, if any
    pub fn run_info(&self) -> Option<&RunInfo> {
        self.run_info.as_ref()
    }
}
