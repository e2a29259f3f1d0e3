// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog driver.
//!
//! Runs each case through the runner, normalizer and diff, tallies verdicts,
//! and renders the consolidated report. All state lives in the returned
//! [`RunSummary`]. With more than one job, cases run on separate tasks and
//! their results pass through a [`ResultLog`] that restores catalog order,
//! so the report does not depend on completion order.

use std::collections::HashSet;
use std::sync::Arc;

use goldrun_capture::ResultLog;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::catalog::TestCase;
use crate::config::HarnessConfig;
use crate::report::ReportFormatter;
use crate::runner::ProcessRunner;
use crate::verdict::TestResult;

/// Outcome of a whole catalog run.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    /// Per-case results in catalog order
    pub results: Vec<TestResult>,
    /// Rendered text report, ending with the summary line
    #[serde(skip)]
    pub report: String,
}

impl RunSummary {
    /// Tally `results` (already in catalog order) and render the report.
    pub fn from_results(results: Vec<TestResult>, formatter: &ReportFormatter) -> Self {
        let passed = results.iter().filter(|r| r.verdict.is_pass()).count();
        let total = results.len();

        let mut report: String = results.iter().map(|r| formatter.format_result(r)).collect();
        report.push_str(&formatter.format_summary(passed, total));

        Self {
            passed,
            failed: total - passed,
            total,
            results,
            report,
        }
    }

    /// Process exit code for this run: 1 when any case failed, unless
    /// `legacy` asks for the historical always-success behavior.
    pub fn exit_code(&self, legacy: bool) -> i32 {
        if self.failed == 0 || legacy {
            0
        } else {
            1
        }
    }
}

/// Drives a catalog through a [`ProcessRunner`].
#[derive(Clone)]
pub struct Aggregator {
    runner: ProcessRunner,
    formatter: ReportFormatter,
    jobs: usize,
    retries: u32,
    log: Option<ResultLog<TestResult>>,
}

impl Aggregator {
    pub fn new(runner: ProcessRunner) -> Self {
        Self {
            runner,
            formatter: ReportFormatter::default(),
            jobs: 1,
            retries: 0,
            log: None,
        }
    }

    /// Aggregator for a resolved harness configuration.
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.runner())
            .with_formatter(ReportFormatter::new(config.width))
            .with_jobs(config.jobs)
            .with_retries(config.retries)
    }

    pub fn with_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Maximum number of cases running at once (at least 1)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Extra attempts for a failing case
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Record results into `log`, e.g. one that streams to a file. A log
    /// should back a single run; without one each run gets a fresh log.
    pub fn with_log(mut self, log: ResultLog<TestResult>) -> Self {
        self.log = Some(log);
        self
    }

    /// Run every case and return the tally and report.
    ///
    /// A failure in one case never stops the others, and
    /// `passed + failed == cases.len()` always holds.
    pub async fn run_all(&self, cases: &[TestCase]) -> RunSummary {
        let log = self.log.clone().unwrap_or_default();

        if self.jobs <= 1 {
            for (index, case) in cases.iter().enumerate() {
                let result = run_case(&self.runner, case, self.retries).await;
                log.record(index, result);
            }
        } else {
            self.run_parallel(cases, &log).await;
        }

        fill_missing(cases, &log);
        let summary = RunSummary::from_results(log.ordered(), &self.formatter);
        tracing::info!(
            passed = summary.passed,
            failed = summary.failed,
            total = summary.total,
            "run complete"
        );
        summary
    }

    async fn run_parallel(&self, cases: &[TestCase], log: &ResultLog<TestResult>) {
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let mut tasks = JoinSet::new();

        for (index, case) in cases.iter().cloned().enumerate() {
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };
            let runner = self.runner.clone();
            let log = log.clone();
            let retries = self.retries;
            tasks.spawn(async move {
                let _permit = permit;
                let result = run_case(&runner, &case, retries).await;
                log.record(index, result);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "case worker did not finish");
            }
        }
    }
}

/// Run one case, retrying a failure up to `retries` more times.
pub async fn run_case(runner: &ProcessRunner, case: &TestCase, retries: u32) -> TestResult {
    let limit = max_attempts(retries);
    let mut attempt = 1;
    loop {
        let result = run_once(runner, case).await;
        if result.verdict.is_pass() || attempt >= limit {
            tracing::info!(
                case = %case.name,
                verdict = ?result.verdict,
                attempts = attempt,
                "case finished"
            );
            return result.with_attempts(attempt);
        }
        tracing::warn!(
            case = %case.name,
            verdict = ?result.verdict,
            attempt,
            "case failed, retrying"
        );
        attempt += 1;
    }
}

/// Total attempts allowed for `retries`, saturating at `u32::MAX`.
fn max_attempts(retries: u32) -> u32 {
    retries.saturating_add(1)
}

async fn run_once(runner: &ProcessRunner, case: &TestCase) -> TestResult {
    match runner.run(&case.target).await {
        Ok(outcome) => TestResult::evaluate(&case.name, &case.expected, outcome),
        Err(error) => {
            tracing::warn!(case = %case.name, error = %error, "case did not run");
            TestResult::from_run_error(&case.name, &error)
        }
    }
}

/// Give every case without a recorded result a failing one, so the tally
/// always covers the whole catalog.
fn fill_missing(cases: &[TestCase], log: &ResultLog<TestResult>) {
    let recorded: HashSet<usize> = log.arrivals().iter().map(|r| r.index).collect();
    for (index, case) in cases.iter().enumerate() {
        if !recorded.contains(&index) {
            let reason = "worker stopped before recording a result";
            log.record(index, TestResult::not_run(&case.name, reason, String::new()));
        }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
