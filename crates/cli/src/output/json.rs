// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is written once, after both steps have finished.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::probe::{ProbeReport, ProbeState, StepReport, StepStatus};

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct ProbeOutput<'a> {
    pub timestamp: String,
    pub passed: bool,
    pub state: ProbeState,
    pub steps: Vec<StepOutput<'a>>,
}

/// One step in JSON output.
#[derive(Debug, Serialize)]
pub struct StepOutput<'a> {
    pub name: &'a str,
    pub command: &'a str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl<'a> From<&'a StepReport> for StepOutput<'a> {
    fn from(step: &'a StepReport) -> Self {
        Self {
            name: step.name,
            command: &step.command,
            status: step.status,
            exit_code: step.exit_code,
            error: step.error.as_deref(),
            duration_ms: step.duration.map(|d| d.as_millis() as u64),
        }
    }
}

/// Build the JSON document for a report, stamped with the current time.
pub fn create_output(report: &ProbeReport) -> ProbeOutput<'_> {
    ProbeOutput {
        timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        passed: report.passed(),
        state: report.state,
        steps: report.steps.iter().map(Into::into).collect(),
    }
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, report: &ProbeReport) -> std::io::Result<()> {
        let output = create_output(report);
        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
