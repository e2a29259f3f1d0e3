// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::fs;
use tempfile::TempDir;
use yare::parameterized;

const INLINE: &str = r#"
[harness]
executable = "gprocessor"
args = ["-r0", "-v"]
timeout_ms = 5000

[[cases]]
name = "movie_01"
target = "movies/movie_01.swf"
expected = ["frame 1", "frame 2"]

[[cases]]
name = "movie_02"
target = "/abs/movie_02.swf"
expected = []
"#;

#[test]
fn test_parse_inline_catalog() {
    let catalog = TestCatalog::from_toml_str(INLINE, Path::new("/suite")).unwrap();

    assert_eq!(catalog.len(), 2);
    let cases = catalog.enumerate();
    assert_eq!(cases[0].name, "movie_01");
    assert_eq!(cases[0].target, PathBuf::from("/suite/movies/movie_01.swf"));
    assert_eq!(cases[0].expected, vec!["frame 1", "frame 2"]);
    assert_eq!(cases[0].golden, None);
    assert_eq!(cases[1].target, PathBuf::from("/abs/movie_02.swf"));
    assert!(cases[1].expected.is_empty());
}

#[test]
fn test_parse_harness_settings() {
    let catalog = TestCatalog::from_toml_str(INLINE, Path::new("/suite")).unwrap();

    let harness = catalog.harness();
    assert_eq!(harness.executable.as_deref(), Some("gprocessor"));
    assert_eq!(harness.args, vec!["-r0", "-v"]);
    assert_eq!(harness.timeout_ms, Some(5000));
    assert_eq!(harness.retries, None);
    assert_eq!(harness.jobs, None);
    assert_eq!(catalog.base_dir(), Path::new("/suite"));
}

#[test]
fn test_harness_table_is_optional() {
    let catalog = TestCatalog::from_toml_str(
        r#"
        [[cases]]
        name = "only"
        target = "only.swf"
        expected = ["ok"]
        "#,
        Path::new("."),
    )
    .unwrap();

    assert_eq!(catalog.harness(), &HarnessSettings::default());
}

#[test]
fn test_declaration_order_is_kept() {
    let names = ["zeta", "alpha", "mid"];
    let toml: String = names
        .iter()
        .map(|n| format!("[[cases]]\nname = \"{n}\"\ntarget = \"{n}.swf\"\nexpected = []\n"))
        .collect();

    let catalog = TestCatalog::from_toml_str(&toml, Path::new(".")).unwrap();
    let loaded: Vec<&str> = catalog.enumerate().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(loaded, names);
}

#[test]
fn test_load_reads_golden_files_verbatim() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("golden")).unwrap();
    fs::write(dir.path().join("golden/movie.txt"), "frame 1\r\nframe 2\n").unwrap();
    let manifest = dir.path().join("suite.toml");
    fs::write(
        &manifest,
        r#"
        [[cases]]
        name = "movie"
        target = "movie.swf"
        golden = "golden/movie.txt"
        "#,
    )
    .unwrap();

    let catalog = TestCatalog::load(&manifest).unwrap();

    let case = &catalog.enumerate()[0];
    assert_eq!(case.expected, vec!["frame 1\r\n", "frame 2\n"]);
    assert_eq!(case.golden, Some(dir.path().join("golden/movie.txt")));
    assert_eq!(case.target, dir.path().join("movie.swf"));
}

#[test]
fn test_missing_golden_file() {
    let err = TestCatalog::from_toml_str(
        r#"
        [[cases]]
        name = "movie"
        target = "movie.swf"
        golden = "does/not/exist.txt"
        "#,
        Path::new("/nonexistent-suite"),
    )
    .unwrap_err();

    assert!(matches!(err, CatalogError::Golden { ref name, .. } if name == "movie"));
}

#[test]
fn test_missing_manifest() {
    let err = TestCatalog::load(Path::new("/nonexistent/suite.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/suite.toml"));
}

#[parameterized(
    no_cases = { "[harness]\nargs = []\n", "no cases" },
    duplicate = {
        "[[cases]]\nname = \"a\"\ntarget = \"a\"\nexpected = []\n[[cases]]\nname = \"a\"\ntarget = \"b\"\nexpected = []\n",
        "duplicate case name 'a'"
    },
    blank_name = { "[[cases]]\nname = \" \"\ntarget = \"a\"\nexpected = []\n", "must not be empty" },
    both_sources = {
        "[[cases]]\nname = \"a\"\ntarget = \"a\"\nexpected = []\ngolden = \"a.txt\"\n",
        "both 'golden' and 'expected'"
    },
    no_source = { "[[cases]]\nname = \"a\"\ntarget = \"a\"\n", "either 'golden' or 'expected'" },
)]
fn invalid_catalogs(toml: &str, message: &str) {
    let err = TestCatalog::from_toml_str(toml, Path::new(".")).unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "got {:?}", err);
    assert!(err.to_string().contains(message), "got {}", err);
}

#[test]
fn test_unknown_fields_rejected() {
    let err = TestCatalog::from_toml_str(
        "[[cases]]\nname = \"a\"\ntarget = \"a\"\nexpected = []\nflaky = true\n",
        Path::new("."),
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::Toml(_)));
}

#[test]
fn test_filtered_keeps_order() {
    let catalog = TestCatalog::new(vec![
        TestCase::inline("button_events", "a.swf", vec![]),
        TestCase::inline("matrix", "b.swf", vec![]),
        TestCase::inline("button_depths", "c.swf", vec![]),
    ])
    .unwrap();

    let names = |cases: Vec<TestCase>| cases.into_iter().map(|c| c.name).collect::<Vec<_>>();
    assert_eq!(
        names(catalog.filtered(Some("button"))),
        vec!["button_events", "button_depths"]
    );
    assert_eq!(names(catalog.filtered(None)).len(), 3);
    assert!(catalog.filtered(Some("nothing")).is_empty());
}

#[test]
fn test_new_rejects_duplicates() {
    let err = TestCatalog::new(vec![
        TestCase::inline("same", "a.swf", vec![]),
        TestCase::inline("same", "b.swf", vec![]),
    ])
    .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test]
fn test_empty_code_catalog_is_allowed() {
    let catalog = TestCatalog::new(vec![]).unwrap();
    assert!(catalog.is_empty());
}
