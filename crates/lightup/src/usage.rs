// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lightup usage` command implementation.
//!
//! Shows how many basic-model actions were used today. `--json` prints the
//! report for scripting.

use colored::Colorize;
use lightup_core::LightupError;
use lightup_ratelimit::UsageReport;

use crate::runtime::Runtime;

pub async fn run_usage(runtime: &Runtime, json: bool) -> Result<(), LightupError> {
    let report = runtime.limiter.report().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", describe(&report));
    }
    Ok(())
}

fn describe(report: &UsageReport) -> String {
    if !report.enabled {
        return format!("{} basic model used {} times today (no limit)", report.day, report.used);
    }
    let remaining = if report.remaining == 0 {
        "0 remaining".red().to_string()
    } else if report.remaining * 5 <= report.limit {
        format!("{} remaining", report.remaining).yellow().to_string()
    } else {
        format!("{} remaining", report.remaining).green().to_string()
    };
    format!(
        "{} basic model: {}/{} actions used, {remaining}",
        report.day, report.used, report.limit
    )
}
