// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Overrides;

/// Golden-output regression harness
#[derive(Parser, Debug, Clone)]
#[command(name = "goldrun", version, about = "Golden-output regression harness")]
pub struct Cli {
    /// Catalog manifest (TOML) listing the cases to run
    #[arg(long, env = "GOLDRUN_CATALOG", value_name = "PATH")]
    pub catalog: PathBuf,

    /// Only run cases whose name contains this text
    #[arg(value_name = "FILTER")]
    pub filter: Option<String>,

    /// Number of cases to run concurrently
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Kill a case's process group after this many milliseconds (0 disables)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Re-run a failing case up to N more times
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Executable under test, overriding the catalog's [harness] table
    #[arg(long, env = "GOLDRUN_EXECUTABLE", value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Overwrite golden files with the current output instead of comparing
    #[arg(long)]
    pub update_golden: bool,

    /// Exit with status 0 even when cases fail
    #[arg(long)]
    pub legacy_exit: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Append each result to this JSONL file as soon as its case finishes
    #[arg(long, value_name = "PATH")]
    pub results_log: Option<PathBuf>,

    /// Column at which verdict tags are aligned
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,

    /// Log case progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Values that take precedence over the catalog's `[harness]` table.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            executable: self.executable.clone(),
            timeout_ms: self.timeout_ms,
            retries: self.retries,
            jobs: self.jobs,
            width: self.width,
        }
    }
}

/// Report output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
