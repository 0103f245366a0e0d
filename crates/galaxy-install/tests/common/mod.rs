//! Shared test utilities for galaxy-install integration tests
//!
//! Provides a fake `ansible-galaxy` shell script that answers the
//! version, list and install subcommands with canned output and logs every
//! invocation.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A fake ansible-galaxy executable in a temporary directory
pub struct FakeGalaxy {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl FakeGalaxy {
    /// Fake that accepts every locale
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Fake that fails `--version` under the C.UTF-8 locale
    pub fn rejecting_c_locale() -> Self {
        Self::build(true)
    }

    fn build(reject_c_locale: bool) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp dir is valid UTF-8");

        let script = script(&root, reject_c_locale);
        let path = root.join("ansible-galaxy");
        fs::write(&path, script).expect("Failed to write fake ansible-galaxy");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake ansible-galaxy executable");

        Self { dir, root }
    }

    /// Path of the fake executable
    pub fn executable(&self) -> String {
        self.root.join("ansible-galaxy").into_string()
    }

    /// Directory reported by `role list`
    pub fn roles_path(&self) -> Utf8PathBuf {
        self.root.join("roles")
    }

    /// Directory reported by `collection list`
    pub fn collections_path(&self) -> Utf8PathBuf {
        self.root.join("collections")
    }

    /// Logged invocations as `(LC_ALL, arguments)`
    pub fn invocations(&self) -> Vec<(String, String)> {
        let log = fs::read_to_string(self.log_path()).unwrap_or_default();
        log.lines()
            .filter_map(|line| line.split_once('|'))
            .map(|(locale, args)| (locale.to_string(), args.to_string()))
            .collect()
    }

    fn log_path(&self) -> Utf8PathBuf {
        self.root.join("invocations.log")
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

fn script(root: &Utf8Path, reject_c_locale: bool) -> String {
    let reject = if reject_c_locale { "yes" } else { "" };
    format!(
        r##"#!/bin/sh
printf '%s|%s\n' "$LC_ALL" "$*" >> "{root}/invocations.log"

case "$1" in
  --version)
    if [ -n "{reject}" ] && [ "$LC_ALL" = "C.UTF-8" ]; then
      echo "ERROR: Ansible could not initialize the preferred locale: unsupported locale setting" >&2
      exit 1
    fi
    echo "ansible-galaxy [core 2.17.4]"
    echo "  config file = None"
    ;;
  collection)
    case "$2" in
      list)
        echo "# {root}/collections"
        echo "Collection        Version"
        echo "----------------- -------"
        echo "community.docker  1.6.0"
        ;;
      install)
        echo "Starting galaxy collection install process"
        echo "Process install dependency map"
        echo "community.docker:1.6.1 was installed successfully"
        ;;
    esac
    ;;
  role)
    case "$2" in
      list)
        echo "# {root}/roles"
        echo "- ansistrano.deploy, 3.8.0"
        ;;
      install)
        case " $* " in
          *" --force "*)
            echo "- ansistrano.deploy (3.8.0) was installed successfully"
            ;;
          *)
            echo "[WARNING]: - ansistrano.deploy (3.8.0) is already installed - use --force to change version to unspecified"
            ;;
        esac
        ;;
    esac
    ;;
  install)
    echo "community.docker:1.6.1 was installed successfully"
    echo "- baztian.xfce (0.0.3) was installed successfully"
    ;;
  *)
    echo "ERROR! unknown command $1" >&2
    exit 2
    ;;
esac
"##
    )
}
