// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured result record.

use super::millis_serde;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One result as it arrived at the log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapturedResult<T> {
    /// Arrival order (0 for the first result recorded)
    pub seq: u64,

    /// Position of the producing case in the catalog
    pub index: usize,

    /// Time since the log was created, serialized as `elapsed_ms`
    #[serde(rename = "elapsed_ms", with = "millis_serde")]
    pub elapsed: Duration,

    /// The result itself
    pub result: T,
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
