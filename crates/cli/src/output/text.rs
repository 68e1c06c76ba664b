// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! install: PASS (12.3s)
//! build: FAIL (4.1s)
//!   yarn build: exited with status 2
//! probe failed at build
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::format_duration;
use crate::color::scheme;
use crate::probe::{ProbeReport, StepReport, StepStatus};

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor = StandardStream> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Create a formatter writing to stdout.
    pub fn new(color_choice: ColorChoice) -> Self {
        Self {
            out: StandardStream::stdout(color_choice),
        }
    }
}

impl<W: WriteColor> TextFormatter<W> {
    /// Create a formatter writing to `out`.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write every step followed by the summary line.
    pub fn write_report(&mut self, report: &ProbeReport) -> std::io::Result<()> {
        for step in &report.steps {
            self.write_step(step)?;
        }
        self.write_summary(report)
    }

    fn write_step(&mut self, step: &StepReport) -> std::io::Result<()> {
        self.out.set_color(&scheme::step_name())?;
        write!(self.out, "{}", step.name)?;
        self.out.reset()?;
        write!(self.out, ": ")?;

        let (label, spec) = match step.status {
            StepStatus::Passed => ("PASS", scheme::pass()),
            StepStatus::Failed => ("FAIL", scheme::fail()),
            StepStatus::Skipped => ("SKIP", scheme::skip()),
        };
        self.out.set_color(&spec)?;
        write!(self.out, "{label}")?;
        self.out.reset()?;

        if let Some(duration) = step.duration {
            write!(self.out, " ({})", format_duration(duration))?;
        }
        writeln!(self.out)?;

        if step.status == StepStatus::Failed {
            write!(self.out, "  ")?;
            self.out.set_color(&scheme::command())?;
            write!(self.out, "{}", step.command)?;
            self.out.reset()?;
            match &step.error {
                Some(error) => writeln!(self.out, ": {error}")?,
                None => writeln!(self.out)?,
            }
        }

        Ok(())
    }

    fn write_summary(&mut self, report: &ProbeReport) -> std::io::Result<()> {
        if report.passed() {
            return writeln!(self.out, "probe passed");
        }

        match report.steps.iter().find(|s| s.status == StepStatus::Failed) {
            Some(step) => writeln!(self.out, "probe failed at {}", step.name),
            None => writeln!(self.out, "probe did not finish"),
        }
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
