// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles buildprobe.toml parsing with version validation and unknown key
//! warnings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::package_manager::PackageManagerChoice;

/// Supported config file version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Config file name looked up by discovery.
pub const CONFIG_FILE_NAME: &str = "buildprobe.toml";

const KNOWN_PROBE_KEYS: &[&str] = &["package_manager", "install", "build"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    probe: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Probe settings.
    pub probe: ProbeConfig,
}

/// `[probe]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Package manager selection (default: yarn).
    pub package_manager: Option<PackageManagerChoice>,

    /// Shell command replacing the package manager's install command.
    pub install: Option<String>,

    /// Shell command replacing the package manager's build command.
    pub build: Option<String>,
}

/// Load and parse a config file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config content, warning about unrecognized keys on stderr.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| config_error(e, path))?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade buildprobe to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| config_error(e, path))?;

    for key in flexible.unknown.keys() {
        warn_unknown_key(path, key);
    }

    let probe = parse_probe_config(flexible.probe.as_ref(), path)?;

    Ok(Config {
        version: flexible.version,
        probe,
    })
}

fn config_error(e: impl std::fmt::Display, path: &Path) -> Error {
    Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    }
}

/// Parse the `[probe]` table.
fn parse_probe_config(value: Option<&toml::Value>, path: &Path) -> Result<ProbeConfig> {
    let t = match value {
        None => return Ok(ProbeConfig::default()),
        Some(toml::Value::Table(t)) => t,
        Some(_) => return Err(config_error("probe must be a table", path)),
    };

    for key in t.keys() {
        if !KNOWN_PROBE_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("probe.{}", key));
        }
    }

    let package_manager = match parse_string_option(t.get("package_manager"), "package_manager", path)? {
        Some(name) => Some(PackageManagerChoice::from_name(&name).ok_or_else(|| {
            config_error(
                format!(
                    "probe.package_manager: unknown package manager `{name}` (expected auto, yarn, npm, pnpm or bun)"
                ),
                path,
            )
        })?),
        None => None,
    };

    Ok(ProbeConfig {
        package_manager,
        install: parse_command(t.get("install"), "install", path)?,
        build: parse_command(t.get("build"), "build", path)?,
    })
}

/// Parse an optional string field, rejecting other TOML types.
fn parse_string_option(
    value: Option<&toml::Value>,
    key: &str,
    path: &Path,
) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(config_error(format!("probe.{key} must be a string"), path)),
    }
}

/// Parse a command override; blank commands are rejected.
fn parse_command(value: Option<&toml::Value>, key: &str, path: &Path) -> Result<Option<String>> {
    match parse_string_option(value, key, path)? {
        Some(cmd) if cmd.trim().is_empty() => Err(config_error(
            format!("probe.{key} must not be empty"),
            path,
        )),
        other => Ok(other),
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "buildprobe: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
