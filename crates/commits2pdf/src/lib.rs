// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! commits2pdf library
//!
//! Command-line configuration and report orchestration, exported for the
//! binary and for integration tests.

pub mod config;
pub mod report;

pub use config::{Config, ConfigError, ListFormat, ReportPlan, RepoSource};
pub use report::{ReportError, ReportOutcome, generate};
