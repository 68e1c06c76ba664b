// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess steps.
//!
//! A step runs one external command in the working directory and reports how
//! it ended. The child's stderr is always inherited; its stdout is either
//! inherited or redirected to our stderr (see [`Streams`]). Output is
//! forwarded live and never captured.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// An external command, either run directly or through the platform shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCommand {
    /// Program followed by its arguments.
    Argv(Vec<String>),
    /// Command line passed to `sh -c` (`cmd /C` on Windows).
    Shell(String),
}

impl StepCommand {
    /// Build an argv command from a program and its arguments.
    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Argv(args.into_iter().map(Into::into).collect())
    }

    /// Build a shell command.
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell(command.into())
    }

    /// Replace the program of an argv command. Shell commands are unchanged.
    pub fn with_program(self, program: impl Into<String>) -> Self {
        match self {
            StepCommand::Argv(mut args) => {
                match args.first_mut() {
                    Some(first) => *first = program.into(),
                    None => args.push(program.into()),
                }
                StepCommand::Argv(args)
            }
            shell @ StepCommand::Shell(_) => shell,
        }
    }

    /// Prepare a `Command`, or `None` for an empty argv.
    fn to_command(&self) -> Option<Command> {
        match self {
            StepCommand::Argv(args) => {
                let (program, rest) = args.split_first()?;
                let mut cmd = Command::new(program);
                cmd.args(rest);
                Some(cmd)
            }
            StepCommand::Shell(line) => {
                let mut cmd = if cfg!(target_os = "windows") {
                    let mut cmd = Command::new("cmd");
                    cmd.arg("/C");
                    cmd
                } else {
                    let mut cmd = Command::new("sh");
                    cmd.arg("-c");
                    cmd
                };
                cmd.arg(line);
                Some(cmd)
            }
        }
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepCommand::Argv(args) => write!(f, "{}", args.join(" ")),
            StepCommand::Shell(line) => write!(f, "{line}"),
        }
    }
}

/// Where the child's stdout is forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Streams {
    /// Child stdout goes to our stdout.
    #[default]
    Inherit,
    /// Child stdout goes to our stderr, leaving stdout for machine output.
    Stderr,
}

impl Streams {
    fn stdout(self) -> Stdio {
        match self {
            Streams::Inherit => Stdio::inherit(),
            Streams::Stderr => Stdio::from(io::stderr()),
        }
    }
}

/// Why a step did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum StepFailure {
    /// The process ran and exited unsuccessfully.
    #[error("{}", describe_exit(.code))]
    Exited { code: Option<i32> },

    /// The process could not be started.
    #[error("failed to launch: {source}")]
    Launch {
        #[source]
        source: io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// How a step ended.
#[derive(Debug)]
pub struct StepOutcome {
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Wall-clock time from spawn to exit.
    pub duration: Duration,
    /// Failure cause; `None` means the step succeeded.
    pub failure: Option<StepFailure>,
}

impl StepOutcome {
    /// Successful exit.
    pub fn passed(duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            duration,
            failure: None,
        }
    }

    /// Unsuccessful exit with the given code (`None` when killed by a signal).
    pub fn exited(code: Option<i32>, duration: Duration) -> Self {
        Self {
            exit_code: code,
            duration,
            failure: Some(StepFailure::Exited { code }),
        }
    }

    /// The process never started.
    pub fn launch_failed(source: io::Error, duration: Duration) -> Self {
        Self {
            exit_code: None,
            duration,
            failure: Some(StepFailure::Launch { source }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// One stage of the probe.
///
/// Implementors block until the work is finished and must report an outcome
/// on every path, including when the process cannot be started.
pub trait Step {
    /// Step name (e.g., "install", "build").
    fn name(&self) -> &'static str;

    /// Human-readable command line for reports.
    fn command_line(&self) -> String;

    /// Run the step against `root`.
    fn run(&self, root: &Path) -> StepOutcome;
}

/// A step backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandStep {
    name: &'static str,
    command: StepCommand,
    streams: Streams,
}

impl CommandStep {
    pub fn new(name: &'static str, command: StepCommand, streams: Streams) -> Self {
        Self {
            name,
            command,
            streams,
        }
    }

    pub fn command(&self) -> &StepCommand {
        &self.command
    }
}

impl Step for CommandStep {
    fn name(&self) -> &'static str {
        self.name
    }

    fn command_line(&self) -> String {
        self.command.to_string()
    }

    fn run(&self, root: &Path) -> StepOutcome {
        let start = Instant::now();

        let Some(mut cmd) = self.command.to_command() else {
            return StepOutcome::launch_failed(
                io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
                start.elapsed(),
            );
        };

        tracing::debug!(
            step = self.name,
            command = %self.command,
            root = %root.display(),
            "spawning step"
        );

        let status = cmd
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(self.streams.stdout())
            .stderr(Stdio::inherit())
            .status();

        let duration = start.elapsed();

        match status {
            Ok(status) if status.success() => {
                tracing::debug!(step = self.name, ?duration, "step succeeded");
                StepOutcome::passed(duration)
            }
            Ok(status) => {
                tracing::debug!(step = self.name, code = ?status.code(), "step failed");
                StepOutcome::exited(status.code(), duration)
            }
            Err(e) => {
                tracing::debug!(step = self.name, error = %e, "step could not be launched");
                StepOutcome::launch_failed(e, duration)
            }
        }
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
