// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::path::{Path, PathBuf};

use buildprobe::cli::{Cli, OutputFormat, RunArgs};
use buildprobe::color::resolve_color;
use buildprobe::config::{self, Config};
use buildprobe::discovery;
use buildprobe::error::{Error, ExitCode};
use buildprobe::output::json::JsonFormatter;
use buildprobe::output::text::TextFormatter;
use buildprobe::package_manager::PackageManagerChoice;
use buildprobe::plan::ProbePlan;
use buildprobe::step::Streams;
use buildprobe::verbose::VerboseLogger;

/// Project root, config location and resolved plan.
pub struct Prepared {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub plan: ProbePlan,
}

/// Resolve the project root, load config and build the plan.
pub fn prepare(
    cli: &Cli,
    path: Option<&Path>,
    requested: Option<PackageManagerChoice>,
) -> anyhow::Result<Prepared> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::Internal(format!("cannot read working directory: {e}")))?;

    let root = match path {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd,
    };

    if !root.is_dir() {
        return Err(Error::Argument(format!("not a directory: {}", root.display())).into());
    }

    let config_path = discovery::resolve_config(cli.config.as_deref(), &root)?;

    let config = match &config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let plan = ProbePlan::resolve(&root, requested, &config.probe);

    Ok(Prepared {
        root,
        config_path,
        plan,
    })
}

/// Run the run command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let Prepared {
        root,
        config_path,
        plan,
    } = prepare(cli, args.path.as_deref(), args.package_manager)?;

    VerboseLogger::new(args.verbose).plan(&root, config_path.as_deref(), &plan);

    // Keep stdout clean for JSON consumers.
    let streams = match args.output {
        OutputFormat::Text => Streams::Inherit,
        OutputFormat::Json => Streams::Stderr,
    };

    tracing::trace!("run command starting");
    let result = plan.into_probe(streams).run(&root);

    let report = match &result {
        Ok(report) => report,
        Err(err) => err.report(),
    };

    match args.output {
        OutputFormat::Text => {
            TextFormatter::new(resolve_color(args.color, args.no_color)).write_report(report)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write(report)?;
        }
    }

    match result {
        Ok(_) => Ok(ExitCode::Success),
        Err(err) => Err(Error::from(err).into()),
    }
}
