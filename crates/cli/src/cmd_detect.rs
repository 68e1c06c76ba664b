// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Detect command implementation.

use buildprobe::cli::{Cli, DetectArgs};
use buildprobe::error::ExitCode;
use buildprobe::verbose::describe_plan;

use crate::cmd_run::{Prepared, prepare};

/// Run the detect command.
pub fn run(cli: &Cli, args: &DetectArgs) -> anyhow::Result<ExitCode> {
    let Prepared {
        root,
        config_path,
        plan,
    } = prepare(cli, args.path.as_deref(), args.package_manager)?;

    for line in describe_plan(&root, config_path.as_deref(), &plan) {
        println!("{line}");
    }

    Ok(ExitCode::Success)
}
