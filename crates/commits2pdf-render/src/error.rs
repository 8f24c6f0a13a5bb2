// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for commits2pdf-render

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while laying out or writing a report
#[derive(Debug, Error)]
pub enum RenderError {
    /// The exact layout could not measure a commit block against the page
    #[error(
        "Could not pre-measure commit {commit} on page {page}: {reason}. \
         Switch to the height-estimation layout to generate this report"
    )]
    Measurement {
        /// Short hash of the commit being measured
        commit: String,
        /// Page the block was being measured against
        page: usize,
        /// Why measurement failed
        reason: String,
    },

    /// The PDF backend rejected the document
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The output path cannot be written
    #[error("Cannot write {}: {source}", path.display())]
    Output {
        /// The file or directory being written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}
