// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test catalog loaded from a TOML manifest.
//!
//! The catalog is read once at startup and never mutated: declaration order
//! in the manifest is the order cases are run and reported in.
//!
//! ```toml
//! [harness]
//! executable = "gprocessor"
//! args = ["-r0", "-v"]
//!
//! [[cases]]
//! name = "movie_01"
//! target = "movies/movie_01.swf"
//! golden = "golden/movie_01.txt"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid catalog: {0}")]
    Validation(String),

    #[error("case '{name}': failed to read golden file {}: {source}", .path.display())]
    Golden {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Harness defaults declared in the manifest's `[harness]` table
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HarnessSettings {
    /// Executable under test, as written in the manifest
    #[serde(default)]
    pub executable: Option<String>,

    /// Arguments placed before the target on every invocation
    #[serde(default)]
    pub args: Vec<String>,

    /// Per-case deadline in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Extra attempts for a failing case
    #[serde(default)]
    pub retries: Option<u32>,

    /// Number of cases run concurrently
    #[serde(default)]
    pub jobs: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    harness: HarnessSettings,

    #[serde(default)]
    cases: Vec<CaseEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseEntry {
    name: String,
    target: PathBuf,
    #[serde(default)]
    golden: Option<PathBuf>,
    #[serde(default)]
    expected: Option<Vec<String>>,
}

/// One golden-output test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    /// Positional argument handed to the executable
    pub target: PathBuf,
    /// Expected transcript, verbatim as stored
    pub expected: Vec<String>,
    /// Golden file the transcript was read from, if not inline
    pub golden: Option<PathBuf>,
}

impl TestCase {
    /// A case with an inline expected transcript.
    pub fn inline(name: impl Into<String>, target: impl Into<PathBuf>, expected: Vec<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            expected,
            golden: None,
        }
    }
}

/// Ordered, read-only set of test cases plus the manifest's harness table.
#[derive(Clone, Debug)]
pub struct TestCatalog {
    cases: Vec<TestCase>,
    harness: HarnessSettings,
    base_dir: PathBuf,
}

impl TestCatalog {
    /// Build a catalog from cases declared in code.
    pub fn new(cases: Vec<TestCase>) -> Result<Self, CatalogError> {
        validate_names(cases.iter().map(|c| c.name.as_str()))?;
        Ok(Self {
            cases,
            harness: HarnessSettings::default(),
            base_dir: PathBuf::from("."),
        })
    }

    /// Load a manifest. Relative targets, golden files and executables
    /// containing a path separator resolve against the manifest's directory.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_toml_str(&content, base_dir)
    }

    /// Parse manifest text, resolving relative paths against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;

        if file.cases.is_empty() {
            return Err(CatalogError::Validation(
                "catalog declares no cases".to_string(),
            ));
        }
        validate_names(file.cases.iter().map(|c| c.name.as_str()))?;

        let cases = file
            .cases
            .into_iter()
            .map(|entry| load_case(entry, base_dir))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(cases = cases.len(), base_dir = %base_dir.display(), "catalog loaded");

        Ok(Self {
            cases,
            harness: file.harness,
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// All cases in declaration order.
    pub fn enumerate(&self) -> &[TestCase] {
        &self.cases
    }

    /// Cases whose name contains `filter`, in declaration order.
    pub fn filtered(&self, filter: Option<&str>) -> Vec<TestCase> {
        self.cases
            .iter()
            .filter(|c| filter.map_or(true, |f| c.name.contains(f)))
            .cloned()
            .collect()
    }

    pub fn harness(&self) -> &HarnessSettings {
        &self.harness
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

fn validate_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "case name must not be empty".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(CatalogError::Validation(format!(
                "duplicate case name '{}'",
                name
            )));
        }
    }
    Ok(())
}

fn load_case(entry: CaseEntry, base_dir: &Path) -> Result<TestCase, CatalogError> {
    let target = base_dir.join(&entry.target);
    match (entry.golden, entry.expected) {
        (Some(golden), None) => {
            let path = base_dir.join(golden);
            let content =
                std::fs::read_to_string(&path).map_err(|source| CatalogError::Golden {
                    name: entry.name.clone(),
                    path: path.clone(),
                    source,
                })?;
            Ok(TestCase {
                name: entry.name,
                target,
                expected: content.split_inclusive('\n').map(String::from).collect(),
                golden: Some(path),
            })
        }
        (None, Some(expected)) => Ok(TestCase {
            name: entry.name,
            target,
            expected,
            golden: None,
        }),
        (Some(_), Some(_)) => Err(CatalogError::Validation(format!(
            "case '{}' sets both 'golden' and 'expected'",
            entry.name
        ))),
        (None, None) => Err(CatalogError::Validation(format!(
            "case '{}' needs either 'golden' or 'expected'",
            entry.name
        ))),
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
