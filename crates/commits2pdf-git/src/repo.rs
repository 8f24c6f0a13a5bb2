// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository access
//!
//! Resolves a repository from a local path or a clone URL, picks the branch
//! to report on, and walks its history newest-first using the `git2` crate.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{BranchType, Repository, Sort};
use tracing::{debug, info, warn};

use crate::commit::RawCommit;
use crate::error::GitError;

/// Configuration for walking commits
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Branch or reference to walk (defaults to HEAD)
    pub branch: Option<String>,
    /// Only include commits at or after this time
    pub since: Option<DateTime<Utc>>,
    /// Only include commits at or before this time
    pub until: Option<DateTime<Utc>>,
}

impl WalkOptions {
    /// Walk the given branch
    #[must_use]
    pub fn on_branch(branch: impl Into<String>) -> Self {
        Self {
            branch: Some(branch.into()),
            ..Default::default()
        }
    }

    /// Filter commits since a date
    #[must_use]
    pub fn since(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.since = date;
        self
    }

    /// Filter commits until a date
    #[must_use]
    pub fn until(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.until = date;
        self
    }

    fn admits(&self, timestamp: DateTime<Utc>) -> bool {
        self.since.is_none_or(|since| timestamp >= since)
            && self.until.is_none_or(|until| timestamp <= until)
    }
}

/// A git repository wrapper for reading commit history
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::PathNotFound` if the path does not exist and
    /// `GitError::NotARepository` if it exists but holds no repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GitError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        let repo = Repository::open(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Clone `url` into `dest`, checking out nothing
    ///
    /// If the remote has no branch called `branch`, the clone is retried
    /// with the remote's default branch and a warning is logged. An existing
    /// repository at `dest` is reused as-is.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CloneFailed` (after removing anything written to
    /// `dest`) when the clone fails, and `GitError::CloneDestinationOccupied`
    /// when `dest` exists but is not a repository.
    pub fn clone_into(url: &str, dest: impl AsRef<Path>, branch: &str) -> Result<Self, GitError> {
        let dest = dest.as_ref();
        if dest.exists() {
            return match Repository::open(dest) {
                Ok(repo) => {
                    warn!(path = %dest.display(), "Repository already exists, skipping clone");
                    Ok(Self { repo })
                }
                Err(_) => Err(GitError::CloneDestinationOccupied {
                    path: dest.to_path_buf(),
                }),
            };
        }

        info!(url, branch, path = %dest.display(), "Cloning repository");
        match clone_builder(Some(branch)).clone(url, dest) {
            Ok(repo) => Ok(Self { repo }),
            Err(err) if is_missing_remote_branch(&err) => {
                discard_partial_clone(dest);
                warn!(
                    branch,
                    "Branch does not exist on the remote, cloning the default branch instead"
                );
                clone_builder(None)
                    .clone(url, dest)
                    .map(|repo| Self { repo })
                    .map_err(|err| clone_failed(url, dest, &err))
            }
            Err(err) => Err(clone_failed(url, dest, &err)),
        }
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Name of the repository
    ///
    /// Taken from the `origin` remote URL when there is one, otherwise from
    /// the working directory name.
    #[must_use]
    pub fn name(&self) -> String {
        if let Ok(remote) = self.repo.find_remote("origin")
            && let Some(name) = remote.url().and_then(name_from_url)
        {
            return name;
        }

        let dir = self.workdir().unwrap_or_else(|| self.repo.path());
        dir.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.trim_end_matches(".git").to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "repository".to_string())
    }

    /// Pick the branch to report on
    ///
    /// Prefers a local branch named `requested`, then `origin/<requested>`,
    /// and otherwise falls back to the active branch with a warning.
    ///
    /// # Errors
    ///
    /// Returns `GitError::DetachedHead` when the fallback is needed but HEAD
    /// is detached.
    pub fn resolve_branch(&self, requested: &str) -> Result<String, GitError> {
        if self.repo.find_branch(requested, BranchType::Local).is_ok() {
            return Ok(requested.to_string());
        }

        let remote = format!("origin/{requested}");
        if self.repo.find_branch(&remote, BranchType::Remote).is_ok() {
            debug!(branch = %remote, "Using remote-tracking branch");
            return Ok(remote);
        }

        if self.repo.head_detached()? {
            return Err(GitError::DetachedHead {
                requested: requested.to_string(),
            });
        }

        let head = self.repo.head()?;
        let active = head
            .shorthand()
            .ok_or_else(|| GitError::InvalidReference {
                reference: "HEAD".to_string(),
            })?
            .to_string();
        warn!(
            requested,
            active = %active,
            "Branch '{requested}' does not exist, using the active branch '{active}' instead"
        );
        Ok(active)
    }

    /// Walk commits newest-first according to the given options
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if the branch cannot be resolved,
    /// or `GitError::Git2` if the history cannot be read.
    pub fn walk_commits(&self, options: &WalkOptions) -> Result<Vec<RawCommit>, GitError> {
        let reference = options.branch.as_deref().unwrap_or("HEAD");
        let start = self
            .repo
            .revparse_single(reference)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::InvalidReference {
                reference: reference.to_string(),
            })?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;
        revwalk.push(start.id())?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let git_commit = self.repo.find_commit(oid)?;

            let timestamp = Utc
                .timestamp_opt(git_commit.time().seconds(), 0)
                .single()
                .unwrap_or_else(Utc::now);

            if !options.admits(timestamp) {
                continue;
            }

            commits.push(extract_commit(&git_commit, timestamp));
        }

        info!(count = commits.len(), reference, "Gathered commits");
        Ok(commits)
    }
}

/// Extract commit metadata from a git2 commit
fn extract_commit(git_commit: &git2::Commit<'_>, timestamp: DateTime<Utc>) -> RawCommit {
    let author = git_commit.author();
    RawCommit {
        sha: git_commit.id().to_string(),
        message: String::from_utf8_lossy(git_commit.message_bytes()).into_owned(),
        author: author.name().unwrap_or("Unknown").to_string(),
        author_email: author.email().unwrap_or("").to_string(),
        timestamp,
    }
}

fn clone_builder(branch: Option<&str>) -> RepoBuilder<'static> {
    let mut checkout = CheckoutBuilder::new();
    checkout.dry_run();

    let mut builder = RepoBuilder::new();
    builder.with_checkout(checkout);
    if let Some(branch) = branch {
        builder.branch(branch);
    }
    builder
}

/// libgit2 reports a missing `refs/remotes/origin/<branch>` as a reference lookup failure
fn is_missing_remote_branch(err: &git2::Error) -> bool {
    err.code() == git2::ErrorCode::NotFound && err.class() == git2::ErrorClass::Reference
}

fn discard_partial_clone(dest: &Path) {
    if dest.exists()
        && let Err(err) = fs::remove_dir_all(dest)
    {
        warn!(path = %dest.display(), error = %err, "Could not remove partially cloned directory");
    }
}

fn clone_failed(url: &str, dest: &Path, err: &git2::Error) -> GitError {
    discard_partial_clone(dest);
    GitError::CloneFailed {
        url: url.to_string(),
        reason: err.message().to_string(),
    }
}

/// Repository name from a remote URL: last path segment without `.git`
fn name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed
        .rsplit(['/', ':'])
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
