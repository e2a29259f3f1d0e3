// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transcript normalization.
//!
//! Both sides of a comparison pass through here before they are diffed, so
//! platform newline conventions and incidental trailing whitespace never
//! show up as mismatches.

/// Split raw text into comparable lines.
///
/// CRLF, CR and LF each count as one line boundary. Trailing whitespace is
/// stripped from every line, and the empty segment left by a final line
/// terminator is dropped.
pub fn normalize(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(|c| c == '\r' || c == '\n') {
        lines.push(rest[..pos].trim_end().to_string());
        let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + terminator..];
    }
    if !rest.is_empty() {
        lines.push(rest.trim_end().to_string());
    }

    lines
}

/// Normalize a transcript that is already stored as a sequence of lines.
///
/// Elements may or may not carry their own terminator (`"ok\n"` and `"ok"`
/// are the same line), and an element containing embedded terminators is
/// split like any other text.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    normalize(&join_terminated(lines))
}

/// Render normalized lines back into text, one `\n` after every line.
pub fn render(lines: &[String]) -> String {
    join_terminated(lines)
}

fn join_terminated<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        let line = line.as_ref();
        text.push_str(line);
        if !(line.ends_with('\n') || line.ends_with('\r')) {
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
