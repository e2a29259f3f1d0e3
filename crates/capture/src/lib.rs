// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result collection for golden-output test runs.
//!
//! Workers finish test cases in whatever order the scheduler allows. This
//! crate funnels their results through a single shared log, tags each with
//! the case's catalog position, and hands them back in catalog order so
//! reports never depend on completion order.

mod log;
mod millis_serde;
mod record;

pub use log::ResultLog;
pub use record::CapturedResult;
