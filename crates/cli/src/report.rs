// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text report rendering.
//!
//! Every function here is pure: it returns text and leaves the destination
//! to the caller.

use crate::diff::{EditHunk, LineKind};
use crate::normalize::normalize;
use crate::verdict::{TestResult, Verdict};

/// Column at which the verdict tag starts for names shorter than it.
pub const DEFAULT_WIDTH: usize = 70;

const FILL: char = '.';
const INDENT: &str = "    ";

/// Renders header, detail and summary lines at a fixed column width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportFormatter {
    width: usize,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl ReportFormatter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `name`, a run of fill characters up to the column width, then the
    /// verdict tag. At least one fill character is always written.
    pub fn format_header(&self, name: &str, verdict: Verdict) -> String {
        self.format_tagged(name, verdict.tag())
    }

    /// Header line with an arbitrary tag.
    pub fn format_tagged(&self, name: &str, tag: &str) -> String {
        let fill = self.width.saturating_sub(name.chars().count()).max(1);
        let mut line = String::with_capacity(name.len() + fill + tag.len() + 1);
        line.push_str(name);
        line.extend(std::iter::repeat(FILL).take(fill));
        line.push_str(tag);
        line.push('\n');
        line
    }

    /// Indented failure detail for `result`; empty for a passing case.
    pub fn format_detail(&self, result: &TestResult) -> String {
        let mut out = String::new();
        match result.verdict {
            Verdict::Passed => {}
            Verdict::FailedExit => {
                let status = result
                    .exit_code
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string());
                push_line(&mut out, &format!("exit status: {}", status));
                push_output(&mut out, &result.raw_output, true);
            }
            Verdict::FailedToSpawn => {
                let reason = result.failure.as_deref().unwrap_or("unknown error");
                push_line(&mut out, &format!("could not run: {}", reason));
                push_output(&mut out, &result.raw_output, false);
            }
            Verdict::FailedMismatch => {
                push_line(&mut out, "--- expected");
                push_line(&mut out, "+++ actual");
                for hunk in &result.diff {
                    push_hunk(&mut out, hunk);
                }
            }
        }
        out
    }

    /// Header followed by detail.
    pub fn format_result(&self, result: &TestResult) -> String {
        let mut out = self.format_header(&result.name, result.verdict);
        out.push_str(&self.format_detail(result));
        out
    }

    pub fn format_summary(&self, passed: usize, total: usize) -> String {
        format!("Test results: {}/{}\n", passed, total)
    }
}

fn push_line(out: &mut String, text: &str) {
    let line = format!("{}{}", INDENT, text);
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_output(out: &mut String, raw: &str, show_empty: bool) {
    let lines = normalize(raw);
    if lines.is_empty() {
        if show_empty {
            push_line(out, "(no output)");
        }
        return;
    }
    for line in lines {
        push_line(out, &format!("| {}", line));
    }
}

fn push_hunk(out: &mut String, hunk: &EditHunk) {
    push_line(
        out,
        &format!(
            "@@ expected {} actual {} @@",
            range(hunk.expected_start, hunk.expected_len),
            range(hunk.actual_start, hunk.actual_len)
        ),
    );
    for line in &hunk.lines {
        let marker = match line.kind {
            LineKind::Context => ' ',
            LineKind::Deleted => '-',
            LineKind::Inserted => '+',
        };
        push_line(out, &format!("{} {}", marker, line.text));
    }
}

/// 1-based `start,len`; an empty range names the line before it.
fn range(start: usize, len: usize) -> String {
    if len == 0 {
        format!("{},0", start)
    } else {
        format!("{},{}", start + 1, len)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
