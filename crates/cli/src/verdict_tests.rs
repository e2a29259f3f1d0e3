// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::diff::LineKind;
use proptest::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

fn outcome(exit_code: i32, raw_output: &str) -> RunOutcome {
    RunOutcome {
        exit_code,
        raw_output: raw_output.to_string(),
    }
}

#[test]
fn matching_output_passes() {
    let result = TestResult::evaluate("movie", &["ok\n"], outcome(0, "ok\n"));

    assert_eq!(result.verdict, Verdict::Passed);
    assert!(result.diff.is_empty());
    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.attempts, 1);
}

#[test]
fn newline_and_trailing_space_differences_still_pass() {
    let result = TestResult::evaluate("movie", &["a", "b"], outcome(0, "a  \r\nb\r\n"));
    assert_eq!(result.verdict, Verdict::Passed);
}

#[test]
fn differing_output_is_a_mismatch() {
    let result = TestResult::evaluate("movie", &["ok\n"], outcome(0, "different\n"));

    assert_eq!(result.verdict, Verdict::FailedMismatch);
    let lines = &result.diff[0].lines;
    assert!(lines
        .iter()
        .any(|l| l.kind == LineKind::Deleted && l.text == "ok"));
    assert!(lines
        .iter()
        .any(|l| l.kind == LineKind::Inserted && l.text == "different"));
}

#[test]
fn nonzero_exit_skips_the_diff() {
    let result = TestResult::evaluate("movie", &["ok\n"], outcome(1, "boom\n"));

    assert_eq!(result.verdict, Verdict::FailedExit);
    assert_eq!(result.exit_code, Some(1));
    assert!(result.diff.is_empty());
    assert_eq!(result.raw_output, "boom\n");
}

#[test]
fn spawn_error_becomes_failed_to_spawn() {
    let error = RunError::Spawn {
        executable: PathBuf::from("/missing/gprocessor"),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };

    let result = TestResult::from_run_error("movie", &error);

    assert_eq!(result.verdict, Verdict::FailedToSpawn);
    assert_eq!(result.exit_code, None);
    assert!(result
        .failure
        .as_deref()
        .unwrap()
        .contains("/missing/gprocessor"));
}

#[test]
fn timeout_keeps_partial_output() {
    let error = RunError::TimedOut {
        after: Duration::from_millis(50),
        partial_output: "frame 1\n".to_string(),
    };

    let result = TestResult::from_run_error("movie", &error);

    assert_eq!(result.verdict, Verdict::FailedToSpawn);
    assert_eq!(result.raw_output, "frame 1\n");
    assert_eq!(result.failure.as_deref(), Some("timed out after 50ms"));
}

#[test]
fn verdict_tags() {
    assert_eq!(Verdict::Passed.tag(), "[OK]");
    assert_eq!(Verdict::FailedExit.tag(), "[failed]");
    assert_eq!(Verdict::FailedMismatch.tag(), "[failed]");
    assert_eq!(Verdict::FailedToSpawn.tag(), "[failed]");
}

#[test]
fn verdict_serializes_snake_case() {
    let json = serde_json::to_string(&Verdict::FailedMismatch).unwrap();
    assert_eq!(json, r#""failed_mismatch""#);
}

proptest! {
    #[test]
    fn nonzero_exit_always_fails_exit(code in 1i32..256, output in "[a-z\n]{0,20}") {
        let result = TestResult::evaluate("case", &[output.clone()], outcome(code, &output));
        prop_assert_eq!(result.verdict, Verdict::FailedExit);
        prop_assert!(result.diff.is_empty());
    }

    #[test]
    fn equal_after_normalization_passes(output in "[a-z \r\n]{0,30}") {
        let expected = crate::normalize::normalize(&output);
        let result = TestResult::evaluate("case", &expected, outcome(0, &output));
        prop_assert_eq!(result.verdict, Verdict::Passed);
    }
}
