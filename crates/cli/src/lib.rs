// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Golden-output regression harness
//!
//! Runs an executable once per catalog case, compares its merged output with
//! a stored transcript, and reports a verdict and line diff for every case.
//!
#![doc = include_str!("../docs/USAGE.md")]

pub mod aggregate;
pub mod catalog;
pub mod diff;
pub mod golden;
pub mod normalize;
pub mod report;
pub mod runner;
pub mod verdict;

// Binary plumbing - pub for main.rs, hidden from docs
#[doc(hidden)]
pub mod app;
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod output_diagnostic;

pub use aggregate::{Aggregator, RunSummary};
pub use catalog::{TestCase, TestCatalog};
pub use runner::{ProcessRunner, RunError, RunOutcome};
pub use verdict::{TestResult, Verdict};
