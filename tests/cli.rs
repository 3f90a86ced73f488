//! End-to-end tests driving the built binary

use assert_cmd::Command;
use predicates::prelude::*;

const BIN: &str = "multi-level-argparse";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env_remove("MULTI_LEVEL_ARGPARSE_DEBUG")
        .env_remove("MULTI_LEVEL_ARGPARSE_BREW");
    cmd
}

#[test]
fn test_no_command_prints_usage() {
    cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "usage: multi-level-argparse <command> [<args>]",
        ))
        .stdout(predicate::str::contains("command_c"));
}

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multi-level argparse in Rust"))
        .stdout(predicate::str::contains("Options:\n  -h, --help  Print help"));
}

#[test]
fn test_unknown_command() {
    cmd()
        .arg("nope")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            "multi-level-argparse: 'nope' is not a multi-level-argparse command. \
             See 'multi-level-argparse --help'\n",
        );
}

#[test]
fn test_command_a_flags() {
    cmd()
        .args(["command_a", "-b"])
        .assert()
        .success()
        .stdout("Running multi-level-argparse command_a, foo=false, bar=true\n");
}

#[test]
fn test_command_a_bad_flag_uses_clap_error() {
    cmd()
        .args(["command_a", "--baz"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unexpected argument '--baz'"));
}

#[test]
fn test_nested_command() {
    cmd()
        .args(["command_c", "one"])
        .assert()
        .success()
        .stdout("Running multi-level-argparse command_c one\n");
}

#[test]
fn test_nested_missing_subcommand() {
    cmd()
        .arg("command_c")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "usage: multi-level-argparse command_c <subcommand> [<args>]",
        ));
}

#[test]
fn test_nested_unknown_subcommand() {
    cmd()
        .args(["command_c", "nope"])
        .assert()
        .code(1)
        .stderr(
            "multi-level-argparse command_c: 'nope' is not a multi-level-argparse command_c \
             subcommand. See 'multi-level-argparse command_c --help'\n",
        );
}

#[test]
fn test_brewups_without_brew() {
    cmd()
        .env("MULTI_LEVEL_ARGPARSE_BREW", "nonexistent_brew_12345")
        .args(["brewups", "--dry-run"])
        .assert()
        .success()
        .stdout(
            "multi-level-argparse: Error when trying to use homebrew-Cask (brew). \
             Check if homebrew is installed and working correctly.\n",
        )
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_invalid_debug_setting() {
    cmd()
        .env("MULTI_LEVEL_ARGPARSE_DEBUG", "maybe")
        .arg("command_a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_debug_logging_goes_to_stderr() {
    cmd()
        .env("MULTI_LEVEL_ARGPARSE_DEBUG", "1")
        .args(["command_a", "--foo"])
        .assert()
        .success()
        .stdout("Running multi-level-argparse command_a, foo=true, bar=false\n")
        .stderr(predicate::str::contains("Dispatching"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[cfg(unix)]
mod fake_brew {
    use super::*;
    use std::{fs, os::unix::fs::PermissionsExt, path::PathBuf};
    use tempfile::TempDir;

    /// A `brew` stand-in that echoes its arguments
    fn install(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("brew");
        fs::write(&path, "#!/bin/sh\necho \"brew $*\"\necho ignored >&2\nexit 1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_brewups_runs_three_steps() {
        let dir = TempDir::new().unwrap();
        let brew = install(&dir);

        cmd()
            .env("MULTI_LEVEL_ARGPARSE_BREW", &brew)
            .arg("brewups")
            .assert()
            .success()
            .stdout("brew update\nbrew upgrade\nbrew cask upgrade\n")
            .stderr(predicate::str::contains("ignored").not());
    }

    #[test]
    fn test_brewups_dry_run() {
        let dir = TempDir::new().unwrap();
        let brew = install(&dir);

        cmd()
            .env("MULTI_LEVEL_ARGPARSE_BREW", &brew)
            .args(["brewups", "-n"])
            .assert()
            .success()
            .stdout("brew update\nbrew upgrade --dry-run\nbrew cask upgrade --dry-run\n");
    }
}
