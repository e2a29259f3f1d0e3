// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error and warning lines on stderr.
//!
//! Colored when stderr is a terminal, plain otherwise so captured harness
//! logs stay free of escape codes.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

/// Severity of a diagnostic line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warning => "\x1b[33m",
        }
    }
}

/// Print an error to stderr.
pub fn print_error(msg: impl Display) {
    print_diagnostic(Level::Error, msg);
}

/// Print a warning to stderr.
pub fn print_warning(msg: impl Display) {
    print_diagnostic(Level::Warning, msg);
}

fn print_diagnostic(level: Level, msg: impl Display) {
    let stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    write_diagnostic(&mut stderr.lock(), level, msg, is_tty);
}

/// Write one diagnostic line with an explicit terminal flag.
pub fn write_diagnostic<W: Write>(
    writer: &mut W,
    level: Level,
    msg: impl Display,
    is_terminal: bool,
) {
    // stderr going away is not worth failing the run over
    let _ = if is_terminal {
        writeln!(writer, "{}{}: {}\x1b[0m", level.color(), level.label(), msg)
    } else {
        writeln!(writer, "{}: {}", level.label(), msg)
    };
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
