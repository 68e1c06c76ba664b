// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of the commands a probe run executes.
//!
//! Package manager precedence: CLI flag > config > Yarn. Command overrides
//! from `[probe]` replace the package manager's install or build command.

use std::path::Path;

use crate::config::ProbeConfig;
use crate::package_manager::{PackageManager, PackageManagerChoice};
use crate::probe::{BUILD, INSTALL, Probe};
use crate::step::{CommandStep, StepCommand, Streams};

/// Fully resolved install and build commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePlan {
    pub package_manager: PackageManager,
    pub install: StepCommand,
    pub build: StepCommand,
}

impl ProbePlan {
    /// Resolve the plan for `root`.
    pub fn resolve(
        root: &Path,
        requested: Option<PackageManagerChoice>,
        config: &ProbeConfig,
    ) -> Self {
        let choice = requested
            .or(config.package_manager)
            .unwrap_or_default();
        let package_manager = choice.resolve(root);
        tracing::debug!(?choice, %package_manager, "resolved package manager");

        let install = match &config.install {
            Some(cmd) => StepCommand::shell(cmd),
            None => package_manager.install_command(),
        };
        let build = match &config.build {
            Some(cmd) => StepCommand::shell(cmd),
            None => package_manager.build_command(),
        };

        Self {
            package_manager,
            install,
            build,
        }
    }

    /// Build the probe that executes this plan.
    pub fn into_probe(self, streams: Streams) -> Probe<CommandStep, CommandStep> {
        Probe::new(
            CommandStep::new(INSTALL, self.install, streams),
            CommandStep::new(BUILD, self.build, streams),
        )
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
