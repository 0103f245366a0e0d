//! # galaxy-runner
//!
//! Runs an external command from a declarative description of its arguments.
//!
//! - [`ArgFormats`] maps parameter names to [`ArgFormat`] rules
//! - [`CmdRunner`] binds an executable, its formats, default values and an
//!   optional forced locale
//! - [`RunContext`] performs one invocation for a parameter template and
//!   hands `(rc, stdout, stderr)` to an output-processing function
//!
//! # Example
//!
//! ```no_run
//! use galaxy_runner::{ArgFormat, ArgFormats, ArgSet, CmdRunner};
//!
//! # fn example() -> galaxy_runner::Result<()> {
//! let formats = ArgFormats::new()
//!     .with("cmd", ArgFormat::list())
//!     .with("force", ArgFormat::flag("--force"));
//!
//! let runner = CmdRunner::new("ansible-galaxy", formats).with_locale("C.UTF-8");
//! let mut ctx = runner.context("cmd force")?.check_rc(true);
//! let output = ctx.run(&ArgSet::new().with("cmd", "install").with("force", true))?;
//! println!("{}", output.stdout);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod executor;
pub mod format;
pub mod runner;

pub use error::{Error, Result};
pub use executor::{CommandExecutor, DuctExecutor, RunOutput};
pub use format::{ArgFormat, ArgFormats, ArgSet, ArgValue, FormatFn};
pub use runner::{CmdRunner, RunContext, RunInfo};
