// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Effective harness configuration.
//!
//! Manifest `[harness]` values are the defaults; command-line values win.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::catalog::HarnessSettings;
use crate::report::DEFAULT_WIDTH;
use crate::runner::ProcessRunner;

/// Errors in the merged configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "no executable configured (set [harness].executable, --executable or GOLDRUN_EXECUTABLE)"
    )]
    MissingExecutable,

    #[error("jobs must be at least 1")]
    ZeroJobs,
}

/// Values given on the command line, each overriding the manifest.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub executable: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    pub jobs: Option<usize>,
    pub width: Option<usize>,
}

/// Everything needed to run a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub executable: PathBuf,
    pub fixed_args: Vec<String>,
    /// `None` waits for every child indefinitely
    pub timeout: Option<Duration>,
    pub retries: u32,
    pub jobs: usize,
    pub width: usize,
}

impl HarnessConfig {
    /// Merge manifest settings with command-line overrides.
    ///
    /// A manifest executable containing `/` is resolved against `base_dir`;
    /// a bare name is left for `PATH` lookup. A timeout of 0 disables it.
    pub fn resolve(
        settings: &HarnessSettings,
        base_dir: &Path,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let executable = match (&overrides.executable, &settings.executable) {
            (Some(path), _) => path.clone(),
            (None, Some(raw)) => resolve_executable(raw, base_dir),
            (None, None) => return Err(ConfigError::MissingExecutable),
        };

        let jobs = overrides.jobs.or(settings.jobs).unwrap_or(1);
        if jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }

        let timeout = overrides
            .timeout_ms
            .or(settings.timeout_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Ok(Self {
            executable,
            fixed_args: settings.args.clone(),
            timeout,
            retries: overrides.retries.or(settings.retries).unwrap_or(0),
            jobs,
            width: overrides.width.unwrap_or(DEFAULT_WIDTH),
        })
    }

    /// Runner invoking the configured executable.
    pub fn runner(&self) -> ProcessRunner {
        ProcessRunner::new(&self.executable, self.fixed_args.clone()).with_timeout(self.timeout)
    }
}

fn resolve_executable(raw: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(raw);
    if raw.contains('/') && path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
