// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Golden file regeneration.
//!
//! Instead of comparing, each case's normalized actual output is written over
//! its golden file. Only cases backed by a golden file that ran to a clean
//! exit are written.

use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::TestCase;
use crate::normalize::{normalize, normalize_lines, render};
use crate::report::ReportFormatter;
use crate::runner::ProcessRunner;

/// What happened to one case's golden file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum GoldenStatus {
    Updated,
    Unchanged,
    Skipped(String),
}

impl GoldenStatus {
    fn tag(&self) -> &'static str {
        match self {
            GoldenStatus::Updated => "[updated]",
            GoldenStatus::Unchanged => "[unchanged]",
            GoldenStatus::Skipped(_) => "[skipped]",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GoldenEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub status: GoldenStatus,
}

/// Result of a golden update pass.
#[derive(Clone, Debug, Serialize)]
pub struct GoldenSummary {
    pub updated: usize,
    pub total: usize,
    pub entries: Vec<GoldenEntry>,
    #[serde(skip)]
    pub report: String,
}

impl GoldenSummary {
    fn from_entries(entries: Vec<GoldenEntry>, formatter: &ReportFormatter) -> Self {
        let updated = entries
            .iter()
            .filter(|e| e.status == GoldenStatus::Updated)
            .count();
        let total = entries.len();

        let mut report = String::new();
        for entry in &entries {
            report.push_str(&formatter.format_tagged(&entry.name, entry.status.tag()));
            if let GoldenStatus::Skipped(reason) = &entry.status {
                report.push_str(&format!("    {}\n", reason));
            }
        }
        report.push_str(&format!("Updated golden files: {}/{}\n", updated, total));

        Self {
            updated,
            total,
            entries,
            report,
        }
    }

    /// Non-zero when any case could not be refreshed.
    pub fn exit_code(&self) -> i32 {
        let skipped = self
            .entries
            .iter()
            .any(|e| matches!(e.status, GoldenStatus::Skipped(_)));
        i32::from(skipped)
    }
}

/// Run each case once and overwrite its golden file with the output.
pub async fn update_golden(
    runner: &ProcessRunner,
    cases: &[TestCase],
    formatter: &ReportFormatter,
) -> GoldenSummary {
    let mut entries = Vec::with_capacity(cases.len());
    for case in cases {
        let status = update_case(runner, case).await;
        match &status {
            GoldenStatus::Skipped(reason) => {
                tracing::warn!(case = %case.name, reason = %reason, "golden file not updated")
            }
            other => tracing::info!(case = %case.name, status = ?other, "golden file checked"),
        }
        entries.push(GoldenEntry {
            name: case.name.clone(),
            path: case.golden.clone(),
            status,
        });
    }
    GoldenSummary::from_entries(entries, formatter)
}

async fn update_case(runner: &ProcessRunner, case: &TestCase) -> GoldenStatus {
    let Some(path) = &case.golden else {
        return GoldenStatus::Skipped("expected transcript is inline in the catalog".to_string());
    };

    let outcome = match runner.run(&case.target).await {
        Ok(outcome) => outcome,
        Err(e) => return GoldenStatus::Skipped(format!("could not run: {}", e)),
    };
    if !outcome.success() {
        return GoldenStatus::Skipped(format!("exit status: {}", outcome.exit_code));
    }

    let actual = normalize(&outcome.raw_output);
    if normalize_lines(&case.expected) == actual {
        return GoldenStatus::Unchanged;
    }

    match std::fs::write(path, render(&actual)) {
        Ok(()) => GoldenStatus::Updated,
        Err(e) => GoldenStatus::Skipped(format!("failed to write {}: {}", path.display(), e)),
    }
}

#[cfg(test)]
#[path = "golden_tests.rs"]
mod tests;
