// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Golden-output regression harness binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use goldrun::app::{self, SETUP_ERROR_EXIT};
use goldrun::cli::Cli;
use goldrun::output_diagnostic::{print_error, print_warning};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.legacy_exit {
        print_warning("--legacy-exit is set, failing cases will not affect the exit status");
    }

    let code = match app::execute(&cli, &mut std::io::stdout()).await {
        Ok(code) => code,
        Err(e) => {
            print_error(e);
            SETUP_ERROR_EXIT
        }
    };
    std::process::exit(code);
}

/// Log to stderr so the report on stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("GOLDRUN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
