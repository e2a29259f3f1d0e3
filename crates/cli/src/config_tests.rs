// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

fn settings(executable: Option<&str>) -> HarnessSettings {
    HarnessSettings {
        executable: executable.map(String::from),
        args: vec!["-r0".to_string(), "-v".to_string()],
        ..Default::default()
    }
}

#[test]
fn test_defaults() {
    let config =
        HarnessConfig::resolve(&settings(Some("gprocessor")), Path::new("/suite"), &Overrides::default())
            .unwrap();

    assert_eq!(config.executable, PathBuf::from("gprocessor"));
    assert_eq!(config.fixed_args, vec!["-r0", "-v"]);
    assert_eq!(config.timeout, None);
    assert_eq!(config.retries, 0);
    assert_eq!(config.jobs, 1);
    assert_eq!(config.width, DEFAULT_WIDTH);
}

#[parameterized(
    bare_name = { "gprocessor", "gprocessor" },
    relative_path = { "bin/gprocessor", "/suite/bin/gprocessor" },
    dot_relative = { "./gprocessor", "/suite/./gprocessor" },
    absolute = { "/usr/bin/gprocessor", "/usr/bin/gprocessor" },
)]
fn executable_resolution(raw: &str, expected: &str) {
    let config =
        HarnessConfig::resolve(&settings(Some(raw)), Path::new("/suite"), &Overrides::default())
            .unwrap();
    assert_eq!(config.executable, PathBuf::from(expected));
}

#[test]
fn test_overrides_win() {
    let mut manifest = settings(Some("gprocessor"));
    manifest.timeout_ms = Some(1000);
    manifest.retries = Some(1);
    manifest.jobs = Some(2);

    let overrides = Overrides {
        executable: Some(PathBuf::from("./build/gprocessor")),
        timeout_ms: Some(250),
        retries: Some(3),
        jobs: Some(8),
        width: Some(40),
    };

    let config = HarnessConfig::resolve(&manifest, Path::new("/suite"), &overrides).unwrap();

    assert_eq!(config.executable, PathBuf::from("./build/gprocessor"));
    assert_eq!(config.timeout, Some(Duration::from_millis(250)));
    assert_eq!(config.retries, 3);
    assert_eq!(config.jobs, 8);
    assert_eq!(config.width, 40);
}

#[test]
fn test_manifest_values_used_without_overrides() {
    let mut manifest = settings(Some("gprocessor"));
    manifest.timeout_ms = Some(1000);
    manifest.retries = Some(2);
    manifest.jobs = Some(4);

    let config = HarnessConfig::resolve(&manifest, Path::new("."), &Overrides::default()).unwrap();

    assert_eq!(config.timeout, Some(Duration::from_secs(1)));
    assert_eq!(config.retries, 2);
    assert_eq!(config.jobs, 4);
}

#[test]
fn test_zero_timeout_disables_deadline() {
    let overrides = Overrides {
        timeout_ms: Some(0),
        ..Default::default()
    };
    let config =
        HarnessConfig::resolve(&settings(Some("gprocessor")), Path::new("."), &overrides).unwrap();
    assert_eq!(config.timeout, None);
}

#[test]
fn test_missing_executable() {
    let err = HarnessConfig::resolve(&settings(None), Path::new("."), &Overrides::default())
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingExecutable);
}

#[test]
fn test_zero_jobs_rejected() {
    let overrides = Overrides {
        jobs: Some(0),
        ..Default::default()
    };
    let err = HarnessConfig::resolve(&settings(Some("gprocessor")), Path::new("."), &overrides)
        .unwrap_err();
    assert_eq!(err, ConfigError::ZeroJobs);
}

#[test]
fn test_runner_carries_config() {
    let overrides = Overrides {
        timeout_ms: Some(500),
        ..Default::default()
    };
    let config =
        HarnessConfig::resolve(&settings(Some("/bin/gprocessor")), Path::new("."), &overrides)
            .unwrap();

    let runner = config.runner();
    assert_eq!(runner.executable(), Path::new("/bin/gprocessor"));
    assert_eq!(runner.fixed_args(), ["-r0", "-v"]);
    assert_eq!(runner.timeout(), Some(Duration::from_millis(500)));
}
