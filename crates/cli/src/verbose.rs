// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes `[verbose]` prefixed lines to stderr when `--verbose` is given.

use std::path::Path;

use crate::plan::ProbePlan;

/// Verbose output logger. Writes to stderr with a `[verbose]` prefix.
/// All output is conditional on verbose mode being enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr.
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            eprintln!("[verbose] === {} ===", title);
        }
    }

    /// Describe the resolved plan before any step runs.
    pub fn plan(&self, root: &Path, config: Option<&Path>, plan: &ProbePlan) {
        if !self.enabled {
            return;
        }
        self.section("Probe");
        for line in describe_plan(root, config, plan) {
            self.log(&line);
        }
    }
}

/// Lines describing where and what the probe will run.
pub fn describe_plan(root: &Path, config: Option<&Path>, plan: &ProbePlan) -> Vec<String> {
    vec![
        format!("root: {}", root.display()),
        match config {
            Some(path) => format!("config: {}", path.display()),
            None => "config: (defaults)".to_string(),
        },
        format!("package manager: {}", plan.package_manager),
        format!("install: {}", plan.install),
        format!("build: {}", plan.build),
    ]
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
