// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Paginated layout of a commit report
//!
//! The engine draws the title page, then places one [`CommitBlock`] per
//! commit starting on page 2. Each block is placed with one of two
//! page-break strategies:
//!
//! - [`LayoutStrategy::Exact`] draws the block into a [`Trial`](crate::Trial)
//!   first and only commits it if no part crossed the overflow thresholds.
//!   Otherwise the block is redrawn from scratch on a fresh page.
//! - [`LayoutStrategy::Estimate`] compares a character-count height estimate
//!   against the space left on the page. Cheaper, but many short lines can
//!   make it underestimate; such a block then breaks line by line at the
//!   bottom margin instead of moving to the next page whole.
//!
//! # Example
//!
//! ```
//! use commits2pdf_git::FilterCriteria;
//! use commits2pdf_render::{LayoutEngine, LayoutStrategy, RenderOptions, ReportSummary};
//!
//! let summary = ReportSummary::new("demo", "octocat", "main", &FilterCriteria::default(), 0);
//! let engine = LayoutEngine::new(RenderOptions::new(LayoutStrategy::Exact));
//! let document = engine.lay_out(&summary, &[]).expect("lay out");
//! assert_eq!(document.page_count(), 1);
//! ```

use std::fmt;
use std::ops::ControlFlow;

use chrono::{Local, NaiveDateTime};
use commits2pdf_git::CommitRecord;
use tracing::{debug, info, warn};

use crate::block::{CommitBlock, DrawMode, ESTIMATE_SAFETY, Overflow};
use crate::canvas::{Canvas, LaidOutDocument, PageGeometry};
use crate::error::RenderError;
use crate::summary::ReportSummary;
use crate::theme::Appearance;

// ============================================================================
// Options
// ============================================================================

/// How page breaks are decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LayoutStrategy {
    /// Trial-draw each block and move it to a new page if it overflows
    #[default]
    Exact,
    /// Break when the estimated block height exceeds the space left
    Estimate,
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Estimate => write!(f, "estimate"),
        }
    }
}

/// Everything that controls one render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Page-break strategy
    pub strategy: LayoutStrategy,
    /// Colours
    pub appearance: Appearance,
    /// Font and divisor multiplier, honored by the estimate strategy only
    pub scaling: f32,
    /// Time shown in every footer
    pub generated_at: NaiveDateTime,
    /// Page size and margins
    pub geometry: PageGeometry,
}

impl RenderOptions {
    /// Default options for a strategy, stamped with the current local time
    #[must_use]
    pub fn new(strategy: LayoutStrategy) -> Self {
        Self {
            strategy,
            appearance: Appearance::LIGHT,
            scaling: 1.0,
            generated_at: Local::now().naive_local(),
            geometry: PageGeometry::LETTER,
        }
    }

    /// Set the appearance
    #[must_use]
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Set the scaling factor
    #[must_use]
    pub fn with_scaling(mut self, scaling: f32) -> Self {
        self.scaling = scaling;
        self
    }

    /// Set the footer timestamp
    #[must_use]
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = at;
        self
    }

    /// Set the page geometry
    #[must_use]
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Scale actually applied to fonts and divisors
    #[must_use]
    pub fn effective_scale(&self) -> f32 {
        match self.strategy {
            LayoutStrategy::Exact => 1.0,
            LayoutStrategy::Estimate => self.scaling,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(LayoutStrategy::default())
    }
}

// ============================================================================
// Progress Reporting
// ============================================================================

/// Progress callback signature
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Progress events emitted while laying out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Title page drawn, commits about to be placed
    Started {
        /// Commits to place
        total: usize,
    },
    /// One commit placed
    Commit {
        /// 1-based position of the commit
        index: usize,
        /// Commits to place
        total: usize,
        /// Short hash of the commit
        short_hash: String,
        /// Page the block ended on
        page: usize,
    },
    /// Layout finished
    Completed {
        /// Commits placed
        commits: usize,
        /// Physical pages produced
        pages: usize,
    },
}

// ============================================================================
// Engine
// ============================================================================

/// Lays out a title page and commit blocks into pages
pub struct LayoutEngine {
    options: RenderOptions,
    progress: Option<ProgressCallback>,
}

impl LayoutEngine {
    /// Create an engine
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            progress: None,
        }
    }

    /// Set a progress callback
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Options in use
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn report(&self, event: ProgressEvent) {
        if let Some(ref callback) = self.progress {
            callback(&event);
        }
    }

    /// Lay out the whole report
    ///
    /// With no commits the document is the title page alone.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Measurement`] when the exact strategy meets a
    /// block it cannot place on any page.
    pub fn lay_out(
        &self,
        summary: &ReportSummary,
        commits: &[CommitRecord],
    ) -> Result<LaidOutDocument, RenderError> {
        let options = &self.options;
        let geometry = options.geometry;
        let appearance = options.appearance;
        let scale = options.effective_scale();

        let scaled = (options.scaling - 1.0).abs() > f32::EPSILON;
        if options.strategy == LayoutStrategy::Exact && scaled {
            warn!(
                scaling = options.scaling,
                "Scaling only applies to the estimate layout; ignoring it"
            );
        }

        info!(
            strategy = %options.strategy,
            commits = commits.len(),
            "Laying out report for {}",
            summary.repository()
        );

        let stamp = options.generated_at.format("%d/%m/%Y %H:%M:%S").to_string();
        let mut canvas = Canvas::new(geometry, appearance, stamp);
        canvas.with_auto_break(|c| summary.draw(c, &geometry, &appearance, scale));

        let total = commits.len();
        self.report(ProgressEvent::Started { total });

        if total > 0 {
            canvas.break_page();
        }

        for (position, commit) in commits.iter().enumerate() {
            let block = CommitBlock::new(commit, &geometry, scale);
            match options.strategy {
                LayoutStrategy::Exact => place_exact(&mut canvas, &block)?,
                LayoutStrategy::Estimate => place_estimated(&mut canvas, &block),
            }
            self.report(ProgressEvent::Commit {
                index: position + 1,
                total,
                short_hash: block.short_hash().to_string(),
                page: canvas.page_number(),
            });
        }

        let document = canvas.finish();
        info!(pages = document.page_count(), "Layout complete");
        self.report(ProgressEvent::Completed {
            commits: total,
            pages: document.page_count(),
        });
        Ok(document)
    }
}

fn place_exact(canvas: &mut Canvas, block: &CommitBlock) -> Result<(), RenderError> {
    let geometry = *canvas.geometry();
    let appearance = *canvas.appearance();

    let tallest = block.tallest_line();
    if tallest > geometry.body_height() {
        return Err(RenderError::Measurement {
            commit: block.short_hash().to_string(),
            page: canvas.page_number(),
            reason: format!(
                "a {tallest:.1} pt line is taller than the {:.1} pt page body",
                geometry.body_height()
            ),
        });
    }

    let mut trial = canvas.trial();
    match block.draw(&mut trial, &geometry, &appearance, DrawMode::TRIAL) {
        ControlFlow::Continue(()) => canvas.commit(trial),
        ControlFlow::Break(overflow) => {
            debug!(
                commit = block.short_hash(),
                page = canvas.page_number(),
                ?overflow,
                "Block overflows, moving to a new page"
            );
            if canvas.has_content() {
                canvas.break_page();
            }
            let mode = DrawMode {
                checkpoints: false,
                divider: overflow != Overflow::DividerOnly,
            };
            let _ = canvas.with_auto_break(|c| block.draw(c, &geometry, &appearance, mode));
        }
    }
    Ok(())
}

fn place_estimated(canvas: &mut Canvas, block: &CommitBlock) {
    let geometry = *canvas.geometry();
    let appearance = *canvas.appearance();

    let needed = block.estimated_height(&geometry) * ESTIMATE_SAFETY;
    if needed > canvas.remaining() && canvas.has_content() {
        debug!(
            commit = block.short_hash(),
            needed,
            remaining = canvas.remaining(),
            "Estimated block does not fit, breaking page"
        );
        canvas.break_page();
    }
    // The estimate can undershoot, so lines still break at the bottom margin
    let _ = canvas.with_auto_break(|c| block.draw(c, &geometry, &appearance, DrawMode::PLAIN));
}
