//! Parsing of `ansible-galaxy <kind> list` output
//!
//! The output is a sequence of path headers, each followed by the artifacts
//! installed under that path:
//!
//! ```text
//! # /home/user/.ansible/roles
//! - ansistrano.deploy, 3.9.0
//! - baztian.xfce, 0.0.3
//! # /custom/ansible/roles
//! - ansistrano.deploy, 3.8.0
//! ```
//!
//! Collections use `namespace.name  version` item lines instead. Lines that
//! match neither shape are skipped.

use std::sync::LazyLock;

use galaxy_runner::{ArgSet, CmdRunner};
use regex::Regex;
use tracing::debug;

use crate::command::LIST_TEMPLATE;
use crate::error::{Error, Result};
use crate::types::{ArtifactKind, ArtifactVersions, Listing};

static LIST_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# (?P<path>.*)$").expect("list path regex is valid"));

static LIST_COLLECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<elem>\w+\.\w+)\s+(?P<version>[\d.]+)\s*$")
        .expect("list collection regex is valid")
});

static LIST_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- (?P<elem>\w+\.\w+),\s+(?P<version>[\d.]+)\s*$")
        .expect("list role regex is valid")
});

/// Printed when none of the configured search paths exist
pub const NO_USABLE_PATHS_MSG: &str = "None of the provided paths were usable";

/// Optional restrictions applied while parsing a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Keep only this install path
    pub path: Option<String>,
    /// Keep only this identifier
    pub name: Option<String>,
}

impl ListingFilter {
    pub fn new(path: Option<String>, name: Option<String>) -> Self {
        Self { path, name }
    }

    fn accepts_path(&self, path: &str) -> bool {
        self.path.as_deref().is_none_or(|p| p == path)
    }

    fn accepts_name(&self, name: &str) -> bool {
        self.name.as_deref().is_none_or(|n| n == name)
    }
}

/// Match a path header line
fn match_path_header(line: &str) -> Option<&str> {
    LIST_PATH_RE
        .captures(line)
        .and_then(|c| c.name("path"))
        .map(|m| m.as_str())
}

/// Match an item line for `kind`, yielding `(identifier, version)`
fn match_item(kind: ArtifactKind, line: &str) -> Option<(&str, &str)> {
    let re = match kind {
        ArtifactKind::Collection => &*LIST_COLLECTION_RE,
        ArtifactKind::Role => &*LIST_ROLE_RE,
    };
    let caps = re.captures(line)?;
    Some((caps.name("elem")?.as_str(), caps.name("version")?.as_str()))
}

/// Parse list output into install path -> identifier -> version
pub fn parse_listing(kind: ArtifactKind, output: &str, filter: &ListingFilter) -> Listing {
    let mut listing = Listing::new();

    if output.contains(NO_USABLE_PATHS_MSG) {
        debug!("No usable {} paths reported", kind);
        return listing;
    }

    let mut current: Option<&str> = None;
    for line in output.lines() {
        if line.starts_with('#') {
            let Some(path) = match_path_header(line) else {
                continue;
            };
            if filter.accepts_path(path) {
                listing.entry(path.to_string()).or_default();
                current = Some(path);
            } else {
                current = None;
            }
            continue;
        }

        let Some(path) = current else {
            continue;
        };
        let Some((elem, version)) = match_item(kind, line) else {
            continue;
        };
        if !filter.accepts_name(elem) {
            continue;
        }
        listing
            .entry(path.to_string())
            .or_insert_with(ArtifactVersions::new)
            .insert(elem.to_string(), version.to_string());
    }

    listing
}

/// Run `ansible-galaxy <kind> list` and parse the result
///
/// The exit code is not checked: ansible-galaxy exits non-zero when no paths
/// are usable, which is reported as an empty listing.
pub fn list_installed(
    runner: &CmdRunner,
    kind: ArtifactKind,
    filter: &ListingFilter,
) -> Result<Listing> {
    let args = ArgSet::new()
        .with("type", kind.as_str())
        .with("galaxy_cmd", "list");

    let listing = runner
        .context(LIST_TEMPLATE)?
        .check_rc(false)
        .run_with(&args, |output| {
            Ok::<_, Error>(parse_listing(kind, &output.stdout, filter))
        })?;

    debug!(
        "Found {} {} path(s): {:?}",
        listing.len(),
        kind,
        listing.keys().collect::<Vec<_>>()
    );
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::galaxy_runner;
    use crate::test_support::ScriptedExecutor;
    use galaxy_runner::{ArgValue, RunOutput};

    const ROLE_LIST: &str = "\
# /home/user/.ansible/roles
- ansistrano.deploy, 3.9.0
- baztian.xfce, 0.0.3
# /custom/ansible/roles
- ansistrano.deploy, 3.8.0
";

    const COLLECTION_LIST: &str = "\
# /home/az/.ansible/collections/ansible_collections
Collection        Version
----------------- -------
community.docker  1.6.0
community.general 3.0.2

# /custom/ansible/ansible_collections
Collection        Version
----------------- -------
community.general 3.1.0
";

    fn versions(pairs: &[(&str, &str)]) -> ArtifactVersions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_roles_without_filters() {
        let listing = parse_listing(ArtifactKind::Role, ROLE_LIST, &ListingFilter::default());

        let mut expected = Listing::new();
        expected.insert(
            "/home/user/.ansible/roles".into(),
            versions(&[("ansistrano.deploy", "3.9.0"), ("baztian.xfce", "0.0.3")]),
        );
        expected.insert(
            "/custom/ansible/roles".into(),
            versions(&[("ansistrano.deploy", "3.8.0")]),
        );
        assert_eq!(listing, expected);
    }

    #[test]
    fn test_path_filter_keeps_single_path() {
        let filter = ListingFilter::new(Some("/custom/ansible/roles".into()), None);
        let listing = parse_listing(ArtifactKind::Role, ROLE_LIST, &filter);

        assert_eq!(listing.len(), 1);
        assert_eq!(
            listing["/custom/ansible/roles"],
            versions(&[("ansistrano.deploy", "3.8.0")])
        );
    }

    #[test]
    fn test_name_filter_narrows_values_only() {
        let filter = ListingFilter::new(None, Some("baztian.xfce".into()));
        let listing = parse_listing(ArtifactKind::Role, ROLE_LIST, &filter);

        // Both headers were seen, so both paths are present
        assert_eq!(listing.len(), 2);
        assert_eq!(
            listing["/home/user/.ansible/roles"],
            versions(&[("baztian.xfce", "0.0.3")])
        );
        assert!(listing["/custom/ansible/roles"].is_empty());
    }

    #[test]
    fn test_path_and_name_filter() {
        let filter = ListingFilter::new(
            Some("/custom/ansible/roles".into()),
            Some("ansistrano.deploy".into()),
        );
        let listing = parse_listing(ArtifactKind::Role, ROLE_LIST, &filter);
        assert_eq!(listing.len(), 1);
        assert_eq!(
            listing["/custom/ansible/roles"],
            versions(&[("ansistrano.deploy", "3.8.0")])
        );
    }

    #[test]
    fn test_path_filter_never_invents_entries() {
        let filter = ListingFilter::new(Some("/not/listed".into()), None);
        assert!(parse_listing(ArtifactKind::Role, ROLE_LIST, &filter).is_empty());
    }

    #[test]
    fn test_no_usable_paths_short_circuits() {
        let output = format!(
            "{}\n[WARNING]: - None of the provided paths were usable. Please specify a valid path with",
            ROLE_LIST
        );
        assert!(parse_listing(ArtifactKind::Role, &output, &ListingFilter::default()).is_empty());
    }

    #[test]
    fn test_collections_skip_table_headers() {
        let listing = parse_listing(
            ArtifactKind::Collection,
            COLLECTION_LIST,
            &ListingFilter::default(),
        );
        assert_eq!(
            listing["/home/az/.ansible/collections/ansible_collections"],
            versions(&[("community.docker", "1.6.0"), ("community.general", "3.0.2")])
        );
        assert_eq!(
            listing["/custom/ansible/ansible_collections"],
            versions(&[("community.general", "3.1.0")])
        );
    }

    #[test]
    fn test_lines_before_first_header_are_skipped() {
        let output = "- stray.role, 1.0.0\n# /roles\n- real.role, 2.0.0\n";
        let listing = parse_listing(ArtifactKind::Role, output, &ListingFilter::default());
        assert_eq!(listing.len(), 1);
        assert_eq!(listing["/roles"], versions(&[("real.role", "2.0.0")]));
    }

    #[test]
    fn test_header_without_items_yields_empty_entry() {
        let output = "# /empty/roles\n# /roles\n- a.b, 1.0\n";
        let listing = parse_listing(ArtifactKind::Role, output, &ListingFilter::default());
        assert!(listing["/empty/roles"].is_empty());
        assert_eq!(listing["/roles"], versions(&[("a.b", "1.0")]));
    }

    #[test]
    fn test_kind_dialects_do_not_mix() {
        let output = "# /p\ncommunity.general 3.0.2\n- ansistrano.deploy, 3.8.0\n";
        let roles = parse_listing(ArtifactKind::Role, output, &ListingFilter::default());
        let colls = parse_listing(ArtifactKind::Collection, output, &ListingFilter::default());
        assert_eq!(roles["/p"], versions(&[("ansistrano.deploy", "3.8.0")]));
        assert_eq!(colls["/p"], versions(&[("community.general", "3.0.2")]));
    }

    #[test]
    fn test_unqualified_identifiers_are_ignored() {
        let output = "# /roles\n- geerlingguy, 1.0.0\n- plainrole, (unknown version)\n";
        let listing = parse_listing(ArtifactKind::Role, output, &ListingFilter::default());
        assert!(listing["/roles"].is_empty());
    }

    #[test]
    fn test_duplicate_identifier_last_wins() {
        let output = "# /roles\n- a.b, 1.0.0\n- a.b, 1.1.0\n";
        let listing = parse_listing(ArtifactKind::Role, output, &ListingFilter::default());
        assert_eq!(listing["/roles"], versions(&[("a.b", "1.1.0")]));
    }

    #[test]
    fn test_malformed_header_keeps_cursor() {
        let output = "# /roles\n#comment\n- a.b, 1.0.0\n";
        let listing = parse_listing(ArtifactKind::Role, output, &ListingFilter::default());
        assert_eq!(listing["/roles"], versions(&[("a.b", "1.0.0")]));
    }

    #[test]
    fn test_list_installed_runs_unchecked() {
        let executor = ScriptedExecutor::new([RunOutput::new(
            1,
            "[WARNING]: - None of the provided paths were usable.",
            "",
        )]);
        let runner = galaxy_runner("ansible-galaxy")
            .with_executor(executor.clone())
            .with_defaults(ArgSet::new().with("dest", ArgValue::None));

        let listing =
            list_installed(&runner, ArtifactKind::Collection, &ListingFilter::default()).unwrap();
        assert!(listing.is_empty());
        assert_eq!(executor.calls()[0].args, vec!["collection", "list"]);
    }

    #[test]
    fn test_list_installed_passes_dest() {
        let executor = ScriptedExecutor::new([RunOutput::new(
            0,
            "# /custom/ansible/roles\n- ansistrano.deploy, 3.8.0\n",
            "",
        )]);
        let runner = galaxy_runner("ansible-galaxy")
            .with_executor(executor.clone())
            .with_defaults(ArgSet::new().with("dest", "/custom/ansible/roles"));

        let filter = ListingFilter::new(Some("/custom/ansible/roles".into()), None);
        let listing = list_installed(&runner, ArtifactKind::Role, &filter).unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(
            executor.calls()[0].args,
            vec!["role", "list", "-p", "/custom/ansible/roles"]
        );
    }
}
