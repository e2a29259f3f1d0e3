// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level command flow: load, resolve, run, report.

use std::io::{self, Write};
use std::path::PathBuf;

use goldrun_capture::ResultLog;
use serde::Serialize;
use thiserror::Error;

use crate::aggregate::Aggregator;
use crate::catalog::{CatalogError, TestCatalog};
use crate::cli::{Cli, OutputFormat};
use crate::config::{ConfigError, HarnessConfig};
use crate::golden;
use crate::report::ReportFormatter;

/// Exit status when the harness could not get as far as running cases.
pub const SETUP_ERROR_EXIT: i32 = 2;

/// Errors that stop the harness before or after the run itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open results log {}: {source}", .path.display())]
    ResultsLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the command described by `cli`, writing the report to `out`.
///
/// Returns the process exit status. Case failures are part of the report,
/// not errors.
pub async fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<i32, AppError> {
    let catalog = TestCatalog::load(&cli.catalog)?;
    let config = HarnessConfig::resolve(catalog.harness(), catalog.base_dir(), &cli.overrides())?;

    let cases = catalog.filtered(cli.filter.as_deref());
    if let Some(filter) = &cli.filter {
        if cases.is_empty() {
            tracing::warn!(filter = %filter, "no cases match the filter");
        }
    }
    tracing::info!(
        selected = cases.len(),
        total = catalog.len(),
        executable = %config.executable.display(),
        jobs = config.jobs,
        "catalog loaded"
    );

    let formatter = ReportFormatter::new(config.width);

    if cli.update_golden {
        let summary = golden::update_golden(&config.runner(), &cases, &formatter).await;
        write_report(out, cli.format, &summary.report, &summary)?;
        return Ok(summary.exit_code());
    }

    let mut aggregator = Aggregator::from_config(&config);
    let results_log = match &cli.results_log {
        Some(path) => {
            let log = ResultLog::with_file(path).map_err(|source| AppError::ResultsLog {
                path: path.clone(),
                source,
            })?;
            aggregator = aggregator.with_log(log.clone());
            Some((path, log))
        }
        None => None,
    };

    let summary = aggregator.run_all(&cases).await;
    write_report(out, cli.format, &summary.report, &summary)?;

    if let Some((path, log)) = results_log {
        let missing = log.write_failures();
        if missing > 0 {
            tracing::warn!(
                path = %path.display(),
                missing,
                "results log is incomplete"
            );
        }
    }

    if cli.legacy_exit && summary.failed > 0 {
        tracing::warn!(
            failed = summary.failed,
            "legacy exit status in effect, reporting success"
        );
    }
    Ok(summary.exit_code(cli.legacy_exit))
}

fn write_report<W: Write, T: Serialize>(
    out: &mut W,
    format: OutputFormat,
    text: &str,
    value: &T,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => out.write_all(text.as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
