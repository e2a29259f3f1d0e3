// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-case verdicts.
//!
//! A verdict depends only on the run outcome and the comparison against the
//! expected transcript, never on when or in what order the case ran.

use serde::Serialize;

use crate::diff::{diff, EditHunk};
use crate::normalize::{normalize, normalize_lines};
use crate::runner::{RunError, RunOutcome};

/// Classification of one executed test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    FailedExit,
    FailedMismatch,
    FailedToSpawn,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Tag shown at the end of the report header line.
    pub fn tag(self) -> &'static str {
        if self.is_pass() {
            "[OK]"
        } else {
            "[failed]"
        }
    }
}

/// Everything the report needs about one executed case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub verdict: Verdict,
    /// `None` when the process never produced an exit status
    pub exit_code: Option<i32>,
    pub diff: Vec<EditHunk>,
    pub raw_output: String,
    /// Why the case could not be run, for `FailedToSpawn`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// Number of runs made, including retries
    pub attempts: u32,
}

impl TestResult {
    /// Classify a finished run against the expected transcript.
    ///
    /// A non-zero exit fails the case without computing a diff.
    pub fn evaluate<S: AsRef<str>>(name: &str, expected: &[S], outcome: RunOutcome) -> Self {
        let (verdict, hunks) = if outcome.success() {
            let hunks = diff(&normalize_lines(expected), &normalize(&outcome.raw_output));
            if hunks.is_empty() {
                (Verdict::Passed, hunks)
            } else {
                (Verdict::FailedMismatch, hunks)
            }
        } else {
            (Verdict::FailedExit, Vec::new())
        };

        Self {
            name: name.to_string(),
            verdict,
            exit_code: Some(outcome.exit_code),
            diff: hunks,
            raw_output: outcome.raw_output,
            failure: None,
            attempts: 1,
        }
    }

    /// Record a run that never produced an exit status.
    pub fn from_run_error(name: &str, error: &RunError) -> Self {
        Self::not_run(name, error.to_string(), error.partial_output().to_string())
    }

    /// A case that could not run for a reason outside the runner itself.
    pub fn not_run(name: &str, reason: impl Into<String>, raw_output: String) -> Self {
        Self {
            name: name.to_string(),
            verdict: Verdict::FailedToSpawn,
            exit_code: None,
            diff: Vec::new(),
            raw_output,
            failure: Some(reason.into()),
            attempts: 1,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
