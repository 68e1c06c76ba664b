// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! An explicit `-C`/`--config` (or `BUILDPROBE_CONFIG`) wins. Otherwise the
//! project directory and its ancestors are searched for buildprobe.toml, up to
//! and including the first directory containing `.git`.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Search `project_dir` and its ancestors for buildprobe.toml.
pub fn find_config(project_dir: &Path) -> Option<PathBuf> {
    for dir in project_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::trace!(path = %candidate.display(), "config discovered");
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Pick the config file for a run, if any.
///
/// An explicit path must name a regular file; a missing path or a directory
/// is a config error.
pub fn resolve_config(explicit: Option<&Path>, project_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(project_dir));
    };

    if !path.is_file() {
        let message = if path.is_dir() {
            format!("config path is a directory: {}", path.display())
        } else {
            format!("config file not found: {}", path.display())
        };
        return Err(Error::Config {
            message,
            path: Some(path.to_path_buf()),
        });
    }

    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
