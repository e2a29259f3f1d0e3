// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn record_round_trips_through_json() {
    let record = CapturedResult {
        seq: 3,
        index: 7,
        elapsed: Duration::from_millis(1500),
        result: "movie_01".to_string(),
    };

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains(r#""index":7"#));
    assert!(json.contains(r#""elapsed_ms":1500"#));

    let back: CapturedResult<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.seq, 3);
    assert_eq!(back.index, 7);
    assert_eq!(back.elapsed, Duration::from_millis(1500));
    assert_eq!(back.result, "movie_01");
}

#[test]
fn elapsed_drops_sub_millisecond_precision() {
    let record = CapturedResult {
        seq: 0,
        index: 0,
        elapsed: Duration::from_micros(2_999),
        result: (),
    };

    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(json, r#"{"seq":0,"index":0,"elapsed_ms":2,"result":null}"#);
}
