//! Behavioral specs for buildprobe.toml loading and discovery.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

// =============================================================================
// DISCOVERY
// =============================================================================

/// > Config is discovered in a parent directory up to the git root
#[test]
fn discovers_config_in_parent_directory() {
    let temp = Project::with_steps("echo install", "echo build");
    temp.file("packages/web/package.json", "{}\n");

    detect()
        .pwd(temp.path().join("packages/web"))
        .passes()
        .stdout_has("install: echo install");
}

/// > Discovery stops at the git root
#[test]
fn discovery_stops_at_git_root() {
    let temp = Project::with_steps("echo outer", "echo outer");
    temp.file("nested/.git/HEAD", "ref: refs/heads/main\n");

    detect()
        .pwd(temp.path().join("nested"))
        .passes()
        .stdout_has("config: (defaults)")
        .stdout_has("install: yarn install");
}

/// > -C selects an explicit config file
#[test]
fn explicit_config_flag() {
    let temp = Project::empty();
    temp.file(
        "ci/probe.toml",
        "version = 1\n[probe]\ninstall = 'true'\nbuild = 'touch built'\n",
    );

    run()
        .pwd(temp.path())
        .args(&["-C", "ci/probe.toml"])
        .passes();

    assert!(temp.has("built"));
}

/// > BUILDPROBE_CONFIG selects an explicit config file
#[test]
fn config_from_environment() {
    let temp = Project::empty();
    temp.file(
        "ci/probe.toml",
        "version = 1\n[probe]\ninstall = 'make deps'\nbuild = 'make dist'\n",
    );

    detect()
        .pwd(temp.path())
        .env(
            "BUILDPROBE_CONFIG",
            temp.path().join("ci/probe.toml").display().to_string(),
        )
        .passes()
        .stdout_has("install: make deps");
}

/// > A missing explicit config file is a config error (exit 2)
#[test]
fn missing_explicit_config_exits_2() {
    let temp = Project::empty();

    run()
        .pwd(temp.path())
        .args(&["-C", "nope.toml"])
        .exits(2)
        .stderr_has("config file not found");
}

// =============================================================================
// VALIDATION
// =============================================================================

/// > An unsupported config version is rejected before anything runs
#[test]
fn unsupported_version_exits_2() {
    let temp = Project::empty();
    temp.config("version = 2\n[probe]\ninstall = 'touch installed'\n");

    run()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 2");

    assert!(!temp.has("installed"));
}

/// > A config without a version is rejected
#[test]
fn missing_version_exits_2() {
    let temp = Project::empty();
    std::fs::write(temp.path().join("buildprobe.toml"), "[probe]\n").unwrap();

    run()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("missing required field: version");
}

/// > Unknown package manager names are config errors
#[test]
fn unknown_package_manager_exits_2() {
    let temp = Project::empty();
    temp.config("[probe]\npackage_manager = \"maven\"\n");

    run()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unknown package manager `maven`");
}

/// > Blank command overrides are config errors
#[test]
fn empty_command_exits_2() {
    let temp = Project::empty();
    temp.config("[probe]\nbuild = '  '\n");

    run()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("probe.build must not be empty");
}

/// > Invalid TOML is a config error
#[test]
fn invalid_toml_exits_2() {
    let temp = Project::empty();
    temp.config("[probe\n");

    run().pwd(temp.path()).exits(2).stderr_has("config error");
}

/// > Unknown keys warn on stderr and are otherwise ignored
#[test]
fn unknown_keys_warn() {
    let temp = Project::empty();
    temp.config("retries = 3\n[probe]\ninstall = 'true'\nbuild = 'true'\ntimeout = 60\n");

    run()
        .pwd(temp.path())
        .passes()
        .stderr_has("unrecognized field `retries` (ignored)")
        .stderr_has("unrecognized field `probe.timeout` (ignored)");
}

/// > An explicit config path naming a directory is a config error (exit 2)
#[test]
fn explicit_config_directory_exits_2() {
    let temp = Project::empty();
    temp.file("ci/.keep", "");

    run()
        .pwd(temp.path())
        .args(&["-C", "ci"])
        .exits(2)
        .stderr_has("config path is a directory");
}
