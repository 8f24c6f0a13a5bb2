// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for commits2pdf-git

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving a repository or reading its history
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// The repository path does not exist
    #[error("Repository path does not exist: {}", path.display())]
    PathNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// The path exists but does not contain a git repository
    #[error("Not a git repository: {} (check the path or clone the repository first)", path.display())]
    NotARepository {
        /// The path that was searched for a repository
        path: PathBuf,
    },

    /// HEAD is detached, so there is no active branch to fall back to
    #[error(
        "Branch '{requested}' does not exist and HEAD is detached; check out a branch and try again"
    )]
    DetachedHead {
        /// The branch the caller asked for
        requested: String,
    },

    /// Cloning failed; any partially-cloned directory has been removed
    #[error("Could not clone {url}: {reason} (check the owner and repository name)")]
    CloneFailed {
        /// The URL that was cloned
        url: String,
        /// Underlying failure message
        reason: String,
    },

    /// The clone destination exists and is not a repository
    #[error("Clone destination {} exists and is not a git repository", path.display())]
    CloneDestinationOccupied {
        /// The destination directory
        path: PathBuf,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },
}
