// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for probe reports.

pub mod json;
pub mod text;

use std::time::Duration;

/// Format a step duration for humans (e.g., "1.2s").
pub fn format_duration(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
