// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line diff between an expected and an actual transcript.
//!
//! The edit script comes from the linear-space variant of Myers' O(ND)
//! search: common leading and trailing lines are matched first, and the rest
//! is split at the middle snake and diffed recursively. The result has a
//! minimal number of inserted plus deleted lines, and within every run of
//! changes the deletions come first, so identical inputs always produce
//! identical output.
//!
//! Edits are then grouped into [`EditHunk`]s with a few lines of surrounding
//! context. An empty hunk list means the transcripts are equal.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

/// Lines of unchanged context kept around each change.
pub const DEFAULT_CONTEXT: usize = 3;

/// A single step of the edit script, with 0-based line positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// Line present on both sides
    Keep { expected: usize, actual: usize },
    /// Expected line missing from the actual output
    Delete { expected: usize },
    /// Actual line not present in the expected transcript
    Insert { actual: usize },
}

/// How a diff line relates the two transcripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Context,
    Deleted,
    Inserted,
}

/// One line of a hunk, tagged with where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub text: String,
    /// 0-based line in the expected transcript, if the line appears there
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_line: Option<usize>,
    /// 0-based line in the actual output, if the line appears there
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_line: Option<usize>,
}

/// A contiguous block of changes plus its context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditHunk {
    /// 0-based start of the hunk in the expected transcript
    pub expected_start: usize,
    pub expected_len: usize,
    /// 0-based start of the hunk in the actual output
    pub actual_start: usize,
    pub actual_len: usize,
    pub lines: Vec<DiffLine>,
}

impl EditHunk {
    /// Number of inserted and deleted lines in this hunk.
    pub fn edit_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind != LineKind::Context)
            .count()
    }
}

/// Diff two normalized transcripts with the default context size.
pub fn diff(expected: &[String], actual: &[String]) -> Vec<EditHunk> {
    diff_with_context(expected, actual, DEFAULT_CONTEXT)
}

/// Diff two normalized transcripts, keeping `context` unchanged lines
/// around each change.
pub fn diff_with_context(expected: &[String], actual: &[String], context: usize) -> Vec<EditHunk> {
    let edits = edit_script(expected, actual);
    group_hunks(&edits, expected, actual, context)
}

/// Total inserted and deleted lines across all hunks.
pub fn edit_count(hunks: &[EditHunk]) -> usize {
    hunks.iter().map(EditHunk::edit_count).sum()
}

/// Compute a minimal edit script turning `a` into `b`.
///
/// Within each run of changes, deletions come before insertions.
pub fn edit_script<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(a.len().max(b.len()));
    if disjoint(a, b) {
        push_deletes(&mut edits, 0, a.len());
        push_inserts(&mut edits, 0, b.len());
    } else {
        compare(a, b, 0, 0, &mut edits);
    }
    deletions_first(&mut edits);
    edits
}

/// True when no line of `a` appears in `b`.
fn disjoint<T: Eq + Hash>(a: &[T], b: &[T]) -> bool {
    let seen: HashSet<&T> = a.iter().collect();
    !b.iter().any(|line| seen.contains(line))
}

/// Diff `a` against `b`, whose first lines sit at `a_off` and `b_off` in
/// the full transcripts. Splits at the middle snake and recurses, so memory
/// stays linear in the input size.
fn compare<T: PartialEq>(a: &[T], b: &[T], a_off: usize, b_off: usize, edits: &mut Vec<Edit>) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    for i in 0..prefix {
        edits.push(Edit::Keep {
            expected: a_off + i,
            actual: b_off + i,
        });
    }
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let (a_off, b_off) = (a_off + prefix, b_off + prefix);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    if a.is_empty() {
        push_inserts(edits, b_off, b.len());
    } else if b.is_empty() {
        push_deletes(edits, a_off, a.len());
    } else {
        match middle_snake(a, b) {
            Some((x, y)) => {
                compare(&a[..x], &b[..y], a_off, b_off, edits);
                compare(&a[x..], &b[y..], a_off + x, b_off + y, edits);
            }
            // Nothing in common
            None => {
                push_deletes(edits, a_off, a.len());
                push_inserts(edits, b_off, b.len());
            }
        }
    }

    for i in 0..suffix {
        edits.push(Edit::Keep {
            expected: a_off + a.len() + i,
            actual: b_off + b.len() + i,
        });
    }
}

/// Find the point where a forward and a reverse D-path of Myers' search
/// overlap. `None` means the inputs share no lines.
fn middle_snake<T: PartialEq>(a: &[T], b: &[T]) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let len = 2 * max_d + 2;
    let mut fwd = vec![-1isize; len as usize];
    let mut rev = vec![-1isize; len as usize];
    fwd[(offset + 1) as usize] = 0;
    rev[(offset + 1) as usize] = 0;

    let delta = n - m;
    // With odd delta the paths meet during a forward step, else a reverse one
    let front = delta % 2 != 0;
    let (mut k1_start, mut k1_end, mut k2_start, mut k2_end) = (0, 0, 0, 0);

    for d in 0..max_d {
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let i = (offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && fwd[i - 1] < fwd[i + 1]) {
                fwd[i + 1]
            } else {
                fwd[i - 1] + 1
            };
            let mut y1 = x1 - k1;
            while (0..n).contains(&x1)
                && (0..m).contains(&y1)
                && a[x1 as usize] == b[y1 as usize]
            {
                x1 += 1;
                y1 += 1;
            }
            fwd[i] = x1;

            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if front {
                let j = offset + delta - k1;
                if (0..len).contains(&j)
                    && rev[j as usize] != -1
                    && x1 >= n - rev[j as usize]
                    && x1 >= 0
                    && y1 >= 0
                {
                    return Some((x1 as usize, y1 as usize));
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let i = (offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && rev[i - 1] < rev[i + 1]) {
                rev[i + 1]
            } else {
                rev[i - 1] + 1
            };
            let mut y2 = x2 - k2;
            while (0..n).contains(&x2)
                && (0..m).contains(&y2)
                && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize]
            {
                x2 += 1;
                y2 += 1;
            }
            rev[i] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !front {
                let j = offset + delta - k2;
                if (0..len).contains(&j) && fwd[j as usize] != -1 {
                    let x1 = fwd[j as usize];
                    let y1 = offset + x1 - j;
                    if x1 >= n - x2 && (0..=n).contains(&x1) && (0..=m).contains(&y1) {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k2 += 2;
        }
    }

    None
}

fn push_deletes(edits: &mut Vec<Edit>, start: usize, count: usize) {
    edits.extend((start..start + count).map(|expected| Edit::Delete { expected }));
}

fn push_inserts(edits: &mut Vec<Edit>, start: usize, count: usize) {
    edits.extend((start..start + count).map(|actual| Edit::Insert { actual }));
}

/// Reorder each run of changes so its deletions precede its insertions.
fn deletions_first(edits: &mut [Edit]) {
    for run in edits.split_mut(|e| matches!(e, Edit::Keep { .. })) {
        run.sort_by_key(|e| matches!(e, Edit::Insert { .. }));
    }
}

fn is_change(edit: &Edit) -> bool {
    !matches!(edit, Edit::Keep { .. })
}

/// Group an edit script into hunks. Changes separated by at most
/// `2 * context` kept lines share a hunk.
fn group_hunks(
    edits: &[Edit],
    expected: &[String],
    actual: &[String],
    context: usize,
) -> Vec<EditHunk> {
    let changes: Vec<usize> = edits
        .iter()
        .enumerate()
        .filter(|(_, e)| is_change(e))
        .map(|(i, _)| i)
        .collect();

    let Some((&first, rest)) = changes.split_first() else {
        return Vec::new();
    };

    let mut spans = vec![(first, first)];
    for &idx in rest {
        if let Some(last) = spans.last_mut() {
            if idx - last.1 - 1 <= 2 * context {
                last.1 = idx;
                continue;
            }
        }
        spans.push((idx, idx));
    }

    // Line positions reached before each edit index
    let mut before = Vec::with_capacity(edits.len() + 1);
    let (mut e, mut a) = (0usize, 0usize);
    before.push((e, a));
    for edit in edits {
        match edit {
            Edit::Keep { .. } => {
                e += 1;
                a += 1;
            }
            Edit::Delete { .. } => e += 1,
            Edit::Insert { .. } => a += 1,
        }
        before.push((e, a));
    }

    spans
        .into_iter()
        .map(|(first, last)| {
            let start = first.saturating_sub(context);
            let end = (last + context + 1).min(edits.len());
            let (expected_start, actual_start) = before[start];
            let (expected_end, actual_end) = before[end];

            let lines = edits[start..end]
                .iter()
                .map(|edit| match *edit {
                    Edit::Keep {
                        expected: ei,
                        actual: ai,
                    } => DiffLine {
                        kind: LineKind::Context,
                        text: expected[ei].clone(),
                        expected_line: Some(ei),
                        actual_line: Some(ai),
                    },
                    Edit::Delete { expected: ei } => DiffLine {
                        kind: LineKind::Deleted,
                        text: expected[ei].clone(),
                        expected_line: Some(ei),
                        actual_line: None,
                    },
                    Edit::Insert { actual: ai } => DiffLine {
                        kind: LineKind::Inserted,
                        text: actual[ai].clone(),
                        expected_line: None,
                        actual_line: Some(ai),
                    },
                })
                .collect();

            EditHunk {
                expected_start,
                expected_len: expected_end - expected_start,
                actual_start,
                actual_len: actual_end - actual_start,
                lines,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
