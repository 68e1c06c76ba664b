// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JavaScript package manager selection.
//!
//! Detects the package manager from lock files and provides the install and
//! build commands. Detection order (first match wins):
//! 1. `bun.lock` / `bun.lockb` (Bun)
//! 2. `pnpm-lock.yaml` (pnpm)
//! 3. `yarn.lock` (Yarn)
//! 4. `package-lock.json` (npm)

use std::path::Path;

use crate::step::StepCommand;

/// JavaScript package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Yarn,
    Npm,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Detect package manager from lock files in project root.
    ///
    /// Returns `None` when no lock file is present.
    pub fn detect(root: &Path) -> Option<Self> {
        if root.join("bun.lock").exists() || root.join("bun.lockb").exists() {
            return Some(Self::Bun);
        }
        if root.join("pnpm-lock.yaml").exists() {
            return Some(Self::Pnpm);
        }
        if root.join("yarn.lock").exists() {
            return Some(Self::Yarn);
        }
        if root.join("package-lock.json").exists() {
            return Some(Self::Npm);
        }
        None
    }

    /// Package manager executable name.
    pub fn executable(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Command that installs the project's dependencies.
    pub fn install_command(&self) -> StepCommand {
        StepCommand::argv([self.executable(), "install"])
    }

    /// Command that runs the project's `build` script.
    ///
    /// Yarn runs scripts without "run".
    pub fn build_command(&self) -> StepCommand {
        match self {
            PackageManager::Yarn => StepCommand::argv(["yarn", "build"]),
            _ => StepCommand::argv([self.executable(), "run", "build"]),
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.executable())
    }
}

/// Package manager requested on the command line or in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PackageManagerChoice {
    /// Detect from lock files, falling back to Yarn.
    Auto,
    #[default]
    Yarn,
    Npm,
    Pnpm,
    Bun,
}

impl PackageManagerChoice {
    /// Parse a config value (e.g., "auto", "pnpm").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(Self::Auto),
            "yarn" => Some(Self::Yarn),
            "npm" => Some(Self::Npm),
            "pnpm" => Some(Self::Pnpm),
            "bun" => Some(Self::Bun),
            _ => None,
        }
    }

    /// Resolve to a concrete package manager for `root`.
    pub fn resolve(self, root: &Path) -> PackageManager {
        match self {
            Self::Auto => PackageManager::detect(root).unwrap_or_default(),
            Self::Yarn => PackageManager::Yarn,
            Self::Npm => PackageManager::Npm,
            Self::Pnpm => PackageManager::Pnpm,
            Self::Bun => PackageManager::Bun,
        }
    }
}

#[cfg(test)]
#[path = "package_manager_tests.rs"]
mod tests;
