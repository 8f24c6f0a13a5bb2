// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! commits2pdf-git: repository access and commit filtering for commits2pdf
//!
//! This library crate resolves a repository (local path or clone), walks the
//! history of a branch, turns each commit into a display-ready
//! [`CommitRecord`], and runs the filter pipeline that decides which records
//! end up in a report and in what order.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use commits2pdf_git::{
//!     filter_commits, CommitRecord, CountCap, FilterCriteria, GitRepo, RepoIdentity, WalkOptions,
//! };
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! let branch = repo.resolve_branch("main").expect("resolve branch");
//! let identity = RepoIdentity::new("octocat", repo.name());
//! let records: Vec<CommitRecord> = repo
//!     .walk_commits(&WalkOptions::on_branch(branch))
//!     .expect("walk commits")
//!     .iter()
//!     .map(|raw| CommitRecord::new(raw, &identity))
//!     .collect();
//!
//! let criteria = FilterCriteria::default().with_cap(CountCap::Newest(10));
//! for commit in filter_commits(records, &criteria).commits {
//!     print!("{commit}");
//! }
//! ```

pub mod commit;
pub mod error;
pub mod filter;
pub mod repo;

pub use commit::{CommitRecord, RawCommit, RepoIdentity};
pub use error::GitError;
pub use filter::{
    filter_commits, CountCap, DisplayOrder, FilterCriteria, FilterReport, FilterWarning,
    FilteredCommits, Stage, StageCount,
};
pub use repo::{GitRepo, WalkOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{CommitRecord, RawCommit, RepoIdentity};
    pub use crate::error::GitError;
    pub use crate::filter::{filter_commits, CountCap, DisplayOrder, FilterCriteria};
    pub use crate::repo::{GitRepo, WalkOptions};
}
