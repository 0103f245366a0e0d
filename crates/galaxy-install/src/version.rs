//! ansible-galaxy version detection
//!
//! The version is read from the first line of `ansible-galaxy --version`.
//! Automation hosts frequently lack the preferred `C.UTF-8` locale, in which
//! case ansible-galaxy either refuses to start (`unsupported locale setting`,
//! non-zero exit) or starts but warns `cannot change locale`. Either outcome
//! triggers exactly one retry with `en_US.UTF-8`; any failure on the retry
//! is fatal.

use std::fmt;
use std::sync::LazyLock;

use galaxy_runner::{ArgSet, CmdRunner, RunOutput};
use regex::Regex;
use semver::Version;
use tracing::{info, warn};

use crate::command::VERSION_TEMPLATE;
use crate::error::{Error, Result};

/// Matches `ansible-galaxy 2.9.10`, `ansible-galaxy [core 2.11.1]`,
/// `ansible-galaxy [core 2.14.0.dev0]`
static GALAXY_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ansible-galaxy(?: \[core)? (?P<version>(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+))(?:\.\w+)?(?:\])?")
        .expect("galaxy version regex is valid")
});

/// Oldest supported release line
pub const MIN_SUPPORTED_VERSION: (u64, u64) = (2, 11);

/// Locale-related stderr when ansible-galaxy refuses to start
const UNSUPPORTED_LOCALE_MSG: &str = "unsupported locale setting";

/// Locale-related stderr when ansible-galaxy starts anyway
const CANNOT_CHANGE_LOCALE_MSG: &str = "cannot change locale";

/// Position in the locale fallback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleAttempt {
    /// `C.UTF-8`, exit code inspected by the output processor
    Preferred,
    /// `en_US.UTF-8`, non-zero exit is fatal
    Fallback,
}

impl LocaleAttempt {
    pub fn locale(self) -> &'static str {
        match self {
            Self::Preferred => "C.UTF-8",
            Self::Fallback => "en_US.UTF-8",
        }
    }

    pub fn check_rc(self) -> bool {
        match self {
            Self::Preferred => false,
            Self::Fallback => true,
        }
    }

    /// The attempt to make after a locale failure, if any remains
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Preferred => Some(Self::Fallback),
            Self::Fallback => None,
        }
    }
}

/// Version reported by ansible-galaxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalaxyVersion {
    raw: String,
    version: Version,
}

impl GalaxyVersion {
    /// Extract the version from a single output line
    pub fn from_line(line: &str) -> Result<Self> {
        let caps = GALAXY_VERSION_RE
            .captures(line)
            .ok_or_else(|| Error::version_parse(line))?;

        let component = |name: &str| -> Result<u64> {
            caps[name].parse().map_err(|_| Error::version_parse(line))
        };

        Ok(Self {
            raw: caps["version"].to_string(),
            version: Version::new(component("major")?, component("minor")?, component("patch")?),
        })
    }

    /// The `X.Y.Z` text as printed by ansible-galaxy
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Whether this release is at or above [`MIN_SUPPORTED_VERSION`]
    pub fn is_supported(&self) -> bool {
        (self.version.major, self.version.minor) >= MIN_SUPPORTED_VERSION
    }
}

impl fmt::Display for GalaxyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Whether the output shows a locale failure rather than a real result
pub fn is_locale_failure(output: &RunOutput) -> bool {
    (output.rc != 0 && output.stderr.contains(UNSUPPORTED_LOCALE_MSG))
        || (output.rc == 0 && output.stderr.contains(CANNOT_CHANGE_LOCALE_MSG))
}

/// Output processor for `ansible-galaxy --version`
pub fn process_version_output(output: &RunOutput) -> Result<GalaxyVersion> {
    if is_locale_failure(output) {
        return Err(Error::unsupported_locale(output.stderr.trim()));
    }
    if !output.success() {
        return Err(Error::galaxy_failed(output.rc, output.stderr.trim()));
    }

    let line = output.stdout.lines().next().unwrap_or("");
    GalaxyVersion::from_line(line)
}

/// Determine the ansible-galaxy version
///
/// Returns the runner bound to the locale that worked, so later invocations
/// reuse it, together with the detected version.
pub fn resolve_version(base: &CmdRunner) -> Result<(CmdRunner, GalaxyVersion)> {
    let mut attempt = LocaleAttempt::Preferred;

    let (runner, version) = loop {
        let runner = base.clone().with_locale(attempt.locale());
        let result = runner
            .context(VERSION_TEMPLATE)?
            .check_rc(attempt.check_rc())
            .run_with(&ArgSet::new(), process_version_output);

        match result {
            Ok(version) => break (runner, version),
            Err(err) if err.is_unsupported_locale() => match attempt.next() {
                Some(next) => {
                    warn!(
                        "Locale {} is not usable ({}), retrying with {}",
                        attempt.locale(),
                        err,
                        next.locale()
                    );
                    attempt = next;
                }
                None => return Err(err),
            },
            Err(err) => return Err(err),
        }
    };

    if !version.is_supported() {
        return Err(Error::unsupported_version(version.as_str()));
    }

    info!(
        "Detected ansible-galaxy {} (locale {})",
        version,
        attempt.locale()
    );
    Ok((runner, version))
}
