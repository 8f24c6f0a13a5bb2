// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! commits2pdf-render: paginated layout and PDF output for commits2pdf
//!
//! This library crate turns a filtered list of
//! [`CommitRecord`](commits2pdf_git::CommitRecord)s into a
//! [`LaidOutDocument`]: a title page followed by one wrapped block per
//! commit, split into pages with either the exact trial-drawing strategy or
//! the cheaper height estimate. The document is plain data until
//! [`write_pdf`] hands it to `printpdf`.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use commits2pdf_git::FilterCriteria;
//! use commits2pdf_render::{
//!     write_pdf, Appearance, LayoutEngine, LayoutStrategy, RenderOptions, ReportSummary,
//! };
//!
//! let summary = ReportSummary::new("demo", "octocat", "main", &FilterCriteria::default(), 0);
//! let options = RenderOptions::new(LayoutStrategy::Estimate).with_appearance(Appearance::DARK);
//! let document = LayoutEngine::new(options).lay_out(&summary, &[]).expect("lay out");
//! write_pdf(&document, "Commit Report - demo", Path::new("demo-commit_report.pdf"))
//!     .expect("write pdf");
//! ```

pub mod block;
pub mod canvas;
pub mod engine;
pub mod error;
pub mod pdf;
pub mod summary;
pub mod text;
pub mod theme;

pub use block::{CommitBlock, Overflow, Part};
pub use canvas::{Canvas, DrawOp, LaidOutDocument, Page, PageGeometry, TextRole, Trial};
pub use engine::{LayoutEngine, LayoutStrategy, ProgressCallback, ProgressEvent, RenderOptions};
pub use error::RenderError;
pub use pdf::{build_pdf, write_pdf};
pub use summary::ReportSummary;
pub use theme::{Appearance, Rgb};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::engine::{LayoutEngine, LayoutStrategy, RenderOptions};
    pub use crate::error::RenderError;
    pub use crate::pdf::write_pdf;
    pub use crate::summary::ReportSummary;
    pub use crate::theme::Appearance;
}
