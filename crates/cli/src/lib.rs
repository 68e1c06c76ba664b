// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build probe: install a JavaScript project's dependencies, then build it,
//! and report whether both steps succeeded.

pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod package_manager;
pub mod plan;
pub mod probe;
pub mod step;
pub mod verbose;

pub use cli::{Cli, Command, DetectArgs, OutputFormat, RunArgs};
pub use config::{Config, ProbeConfig};
pub use error::{Error, ExitCode, Result};
pub use package_manager::{PackageManager, PackageManagerChoice};
pub use plan::ProbePlan;
pub use probe::{Probe, ProbeError, ProbeReport, ProbeState, StepReport, StepStatus, run_build_probe};
pub use step::{CommandStep, Step, StepCommand, StepFailure, StepOutcome, Streams};
