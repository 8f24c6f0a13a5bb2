// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report generation
//!
//! Ties the two library crates together: resolve the repository, walk and
//! filter its history, then either print the commits or lay them out and
//! write the PDF.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use commits2pdf::config::Config;
//! use commits2pdf::report::{generate, ReportOutcome};
//!
//! let config = Config::parse_from(["commits2pdf", "octocat", "--no-open"]);
//! let plan = config.validate().expect("valid flags");
//! if let ReportOutcome::Written { path, pages, .. } = generate(&plan).expect("report") {
//!     println!("{} pages written to {}", pages, path.display());
//! }
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use commits2pdf_git::{
    CommitRecord, GitError, GitRepo, RepoIdentity, WalkOptions, filter_commits,
};
use commits2pdf_render::{LayoutEngine, ProgressEvent, RenderError, ReportSummary, write_pdf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ListFormat, ReportPlan, RepoSource};

// ============================================================================
// Error Types
// ============================================================================

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Repository access failed
    #[error(transparent)]
    Git(#[from] GitError),

    /// Layout or PDF output failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the listing failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Outcome
// ============================================================================

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The filtered commits were printed
    Listed {
        /// Commits printed
        commits: usize,
    },
    /// A PDF was written
    Written {
        /// Commits in the report
        commits: usize,
        /// Physical pages
        pages: usize,
        /// Location of the PDF
        path: PathBuf,
    },
}

// ============================================================================
// Pipeline
// ============================================================================

/// Generate the report described by `plan`, listing to stdout
///
/// # Errors
///
/// See [`generate_to`].
pub fn generate(plan: &ReportPlan) -> Result<ReportOutcome, ReportError> {
    let stdout = io::stdout();
    generate_to(plan, &mut stdout.lock())
}

/// Generate the report described by `plan`, listing to `out`
///
/// `out` is only written when the plan asks for a listing.
///
/// # Errors
///
/// Returns [`ReportError::Git`] when the repository cannot be resolved or
/// walked, [`ReportError::Render`] when layout or the PDF write fails, and
/// [`ReportError::Io`] / [`ReportError::Json`] when the listing cannot be
/// written.
pub fn generate_to<W: Write>(plan: &ReportPlan, out: &mut W) -> Result<ReportOutcome, ReportError> {
    let repo = open_repository(plan)?;
    let branch = repo.resolve_branch(&plan.branch)?;
    let repository = repo.name();
    info!(repository = %repository, branch = %branch, "Reading commit history");

    let walk = WalkOptions::on_branch(&branch)
        .since(plan.criteria.since)
        .until(plan.criteria.until);
    let identity = RepoIdentity::new(&plan.owner, &repository);
    let records: Vec<CommitRecord> = repo
        .walk_commits(&walk)?
        .iter()
        .map(|raw| CommitRecord::new(raw, &identity))
        .collect();
    debug!(count = records.len(), "Collected commits");

    let filtered = filter_commits(records, &plan.criteria);
    let commits = filtered.commits;

    if let Some(format) = plan.list {
        list(&commits, format, out)?;
        return Ok(ReportOutcome::Listed {
            commits: commits.len(),
        });
    }

    let summary = ReportSummary::new(
        repository.as_str(),
        &plan.owner,
        &branch,
        &plan.criteria,
        commits.len(),
    );
    let engine = LayoutEngine::new(plan.render.clone()).with_progress(Box::new(log_progress));
    let document = engine.lay_out(&summary, &commits)?;

    let path = plan.output_path(&repository);
    write_pdf(&document, &format!("Commit Report - {repository}"), &path)?;

    if plan.open {
        open_output(&plan.output_dir);
    }

    Ok(ReportOutcome::Written {
        commits: commits.len(),
        pages: document.page_count(),
        path,
    })
}

fn open_repository(plan: &ReportPlan) -> Result<GitRepo, GitError> {
    match &plan.source {
        RepoSource::Local(path) => GitRepo::open(path),
        RepoSource::Clone { url, dest } => {
            info!(url = %url, dest = %dest.display(), "Cloning repository");
            GitRepo::clone_into(url, dest, &plan.branch)
        }
    }
}

fn list<W: Write>(commits: &[CommitRecord], format: ListFormat, out: &mut W) -> Result<(), ReportError> {
    match format {
        ListFormat::Text => {
            for commit in commits {
                write!(out, "{commit}")?;
            }
        }
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, commits)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn log_progress(event: &ProgressEvent) {
    match event {
        ProgressEvent::Started { total } => debug!(total, "Placing commits"),
        ProgressEvent::Commit {
            index,
            total,
            short_hash,
            page,
        } => debug!(index, total, commit = %short_hash, page, "Placed commit"),
        ProgressEvent::Completed { commits, pages } => {
            info!(commits, pages, "Placed {commits} commits on {pages} pages");
        }
    }
}

/// Platform command that opens a directory in the file manager
fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Open `dir` with the platform opener; failures are only logged
pub fn open_output(dir: &Path) {
    let program = opener();
    match Command::new(program).arg(dir).spawn() {
        Ok(_) => debug!(program, dir = %dir.display(), "Opened output directory"),
        Err(e) => warn!(
            program,
            error = %e,
            "Could not open {}; the report is still there",
            dir.display()
        ),
    }
}
