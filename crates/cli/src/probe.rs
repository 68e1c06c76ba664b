// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The build probe: install dependencies, then build.
//!
//! ```text
//! NotStarted -> Installing -> InstallFailed
//!                          -> Building -> BuildFailed
//!                                      -> Passed
//! ```
//!
//! The build step is never started unless the install step exited zero.
//! Either failure is terminal; there are no retries and no timeouts.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::package_manager::PackageManager;
use crate::step::{CommandStep, Step, StepFailure, StepOutcome, Streams};

/// Name of the dependency installation step.
pub const INSTALL: &str = "install";

/// Name of the build step.
pub const BUILD: &str = "build";

/// Probe lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeState {
    #[default]
    NotStarted,
    Installing,
    Building,
    InstallFailed,
    BuildFailed,
    Passed,
}

impl ProbeState {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProbeState::InstallFailed | ProbeState::BuildFailed | ProbeState::Passed
        )
    }

    /// State after the current step finished.
    pub fn advance(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (ProbeState::NotStarted, _) => ProbeState::Installing,
            (ProbeState::Installing, true) => ProbeState::Building,
            (ProbeState::Installing, false) => ProbeState::InstallFailed,
            (ProbeState::Building, true) => ProbeState::Passed,
            (ProbeState::Building, false) => ProbeState::BuildFailed,
            (terminal, _) => terminal,
        }
    }
}

/// Per-step status in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
}

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: &'static str,
    pub command: String,
    pub status: StepStatus,
    /// Exit code, if the process ran to completion.
    pub exit_code: Option<i32>,
    /// Failure description for failed steps.
    pub error: Option<String>,
    /// Wall-clock time; `None` for skipped steps.
    pub duration: Option<Duration>,
}

/// Result of a probe run, one entry per step in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub state: ProbeState,
    pub steps: Vec<StepReport>,
}

impl ProbeReport {
    pub fn passed(&self) -> bool {
        self.state == ProbeState::Passed
    }

    /// Look up a step by name.
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Record a finished step, returning its failure if any.
    fn record(&mut self, step: &dyn Step, outcome: StepOutcome) -> Option<StepFailure> {
        let StepOutcome {
            exit_code,
            duration,
            failure,
        } = outcome;

        self.steps.push(StepReport {
            name: step.name(),
            command: step.command_line(),
            status: if failure.is_none() {
                StepStatus::Passed
            } else {
                StepStatus::Failed
            },
            exit_code,
            error: failure.as_ref().map(ToString::to_string),
            duration: Some(duration),
        });
        self.state = self.state.advance(failure.is_none());
        failure
    }

    fn skip(&mut self, step: &dyn Step) {
        self.steps.push(StepReport {
            name: step.name(),
            command: step.command_line(),
            status: StepStatus::Skipped,
            exit_code: None,
            error: None,
            duration: None,
        });
    }
}

/// Probe failure. Both variants are terminal.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Dependency installation exited non-zero or could not be launched.
    #[error("install failed: {command}: {cause}")]
    InstallFailed {
        command: String,
        #[source]
        cause: StepFailure,
        report: ProbeReport,
    },

    /// Build exited non-zero or could not be launched.
    #[error("build failed: {command}: {cause}")]
    BuildFailed {
        command: String,
        #[source]
        cause: StepFailure,
        report: ProbeReport,
    },
}

impl ProbeError {
    /// Report up to and including the failing step.
    pub fn report(&self) -> &ProbeReport {
        match self {
            ProbeError::InstallFailed { report, .. } | ProbeError::BuildFailed { report, .. } => {
                report
            }
        }
    }

    /// Name of the step that failed.
    pub fn step(&self) -> &'static str {
        match self {
            ProbeError::InstallFailed { .. } => INSTALL,
            ProbeError::BuildFailed { .. } => BUILD,
        }
    }
}

/// Two-step build probe.
pub struct Probe<I, B> {
    install: I,
    build: B,
}

impl<I: Step, B: Step> Probe<I, B> {
    pub fn new(install: I, build: B) -> Self {
        Self { install, build }
    }

    pub fn install_step(&self) -> &I {
        &self.install
    }

    pub fn build_step(&self) -> &B {
        &self.build
    }

    /// Run install, then build, in `root`.
    pub fn run(&self, root: &Path) -> Result<ProbeReport, ProbeError> {
        let mut report = ProbeReport {
            state: ProbeState::NotStarted.advance(true),
            steps: Vec::with_capacity(2),
        };

        tracing::debug!(command = %self.install.command_line(), "install step starting");
        let outcome = self.install.run(root);
        if let Some(cause) = report.record(&self.install, outcome) {
            report.skip(&self.build);
            tracing::debug!(state = ?report.state, "build skipped after install failure");
            return Err(ProbeError::InstallFailed {
                command: self.install.command_line(),
                cause,
                report,
            });
        }

        tracing::debug!(command = %self.build.command_line(), "build step starting");
        let outcome = self.build.run(root);
        if let Some(cause) = report.record(&self.build, outcome) {
            return Err(ProbeError::BuildFailed {
                command: self.build.command_line(),
                cause,
                report,
            });
        }

        tracing::debug!(state = ?report.state, "probe finished");
        Ok(report)
    }
}

impl Probe<CommandStep, CommandStep> {
    /// Probe using a package manager's install and build commands.
    pub fn for_package_manager(pm: PackageManager, streams: Streams) -> Self {
        Self::with_program(pm, pm.executable(), streams)
    }

    /// Probe using a package manager's commands, launching `program` in place
    /// of its executable.
    pub(crate) fn with_program(pm: PackageManager, program: &str, streams: Streams) -> Self {
        Self::new(
            CommandStep::new(INSTALL, pm.install_command().with_program(program), streams),
            CommandStep::new(BUILD, pm.build_command().with_program(program), streams),
        )
    }
}

/// Install dependencies and build the project in `working_directory`.
///
/// Runs `yarn install` then `yarn build`, forwarding their output live.
pub fn run_build_probe(working_directory: &Path) -> Result<(), ProbeError> {
    let pm = PackageManager::default();
    run_build_probe_with(working_directory, pm, pm.executable())
}

/// [`run_build_probe`] with an explicit package manager and program path.
pub(crate) fn run_build_probe_with(
    working_directory: &Path,
    pm: PackageManager,
    program: &str,
) -> Result<(), ProbeError> {
    Probe::with_program(pm, program, Streams::Inherit)
        .run(working_directory)
        .map(|_| ())
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
