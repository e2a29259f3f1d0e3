// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result log implementation.

use crate::record::CapturedResult;
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared sink for results produced by concurrent workers.
///
/// Cloning a `ResultLog` yields another handle to the same records, so each
/// worker can own a handle while the driver keeps one for the final read.
pub struct ResultLog<T> {
    start: Instant,
    records: Arc<Mutex<Vec<CapturedResult<T>>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
    write_failures: Arc<AtomicUsize>,
}

impl<T: Clone + Serialize> ResultLog<T> {
    /// Create a new in-memory result log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
            write_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a result log that also appends every record to a file (JSONL format)
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
            write_failures: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Record the result of the case at catalog position `index`
    pub fn record(&self, index: usize, result: T) {
        let mut records = self.records.lock();
        let seq = records.len() as u64;
        let record = CapturedResult {
            seq,
            index,
            elapsed: self.start.elapsed(),
            result,
        };

        // Written under the records lock so the file keeps arrival order
        if let Some(ref writer) = self.file_writer {
            if let Err(e) = append_line(&mut writer.lock(), &record) {
                if self.write_failures.fetch_add(1, Ordering::Relaxed) == 0 {
                    tracing::warn!(error = %e, "results log write failed");
                }
            }
        }

        records.push(record);
    }

    /// Records that could not be written to the file sink. They are still
    /// kept in memory.
    pub fn write_failures(&self) -> usize {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// All records in arrival order
    pub fn arrivals(&self) -> Vec<CapturedResult<T>> {
        self.records.lock().clone()
    }

    /// Results sorted back into catalog order.
    ///
    /// The sort is stable, so two records for the same index keep their
    /// arrival order.
    pub fn ordered(&self) -> Vec<T> {
        let mut records = self.records.lock().clone();
        records.sort_by_key(|r| r.index);
        records.into_iter().map(|r| r.result).collect()
    }

    /// Number of results recorded so far
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True before the first result arrives
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl<T: Clone + Serialize> Default for ResultLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ResultLog<T> {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            records: Arc::clone(&self.records),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
            write_failures: Arc::clone(&self.write_failures),
        }
    }
}

fn append_line<T: Serialize>(
    writer: &mut BufWriter<File>,
    record: &CapturedResult<T>,
) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
