// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit filter pipeline
//!
//! Turns the newest-first list produced by a commit walk into the final
//! display list. Stages always run in the same order:
//!
//! 1. keyword inclusion (any term, case-insensitive)
//! 2. keyword exclusion (any term, case-insensitive)
//! 3. author email allow-list
//! 4. newest-N / oldest-N cap
//! 5. display order
//!
//! None of the stages fail. Conditions worth telling the user about are
//! logged and returned as [`FilterWarning`]s alongside per-stage counts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::commit::CommitRecord;

/// Upper bound on how many commits survive filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountCap {
    /// Keep everything
    #[default]
    None,
    /// Keep the N most recent commits
    Newest(usize),
    /// Keep the N oldest commits
    Oldest(usize),
}

impl fmt::Display for CountCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "all commits"),
            Self::Newest(n) => write!(f, "newest {n} commits"),
            Self::Oldest(n) => write!(f, "oldest {n} commits"),
        }
    }
}

/// Order in which commits are displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayOrder {
    /// Chronological, oldest commit first
    #[default]
    OldestFirst,
    /// Reverse chronological, newest commit first
    NewestFirst,
}

impl fmt::Display for DisplayOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OldestFirst => write!(f, "Oldest to newest"),
            Self::NewestFirst => write!(f, "Newest to oldest"),
        }
    }
}

/// User-selected constraints on which commits end up in the report
///
/// Every field is optional; an empty list or `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Author emails to keep (exact match)
    pub authors: Vec<String>,
    /// Earliest commit time, applied by the commit walk
    pub since: Option<DateTime<Utc>>,
    /// Latest commit time, applied by the commit walk
    pub until: Option<DateTime<Utc>>,
    /// Keep commits mentioning any of these terms
    pub include: Vec<String>,
    /// Drop commits mentioning any of these terms
    pub exclude: Vec<String>,
    /// Count cap applied after the keyword and author stages
    pub cap: CountCap,
    /// Final display order
    pub order: DisplayOrder,
}

impl FilterCriteria {
    /// Keep only commits by these author emails
    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Keep commits mentioning any of these terms
    #[must_use]
    pub fn with_include<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Drop commits mentioning any of these terms
    #[must_use]
    pub fn with_exclude<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Cap the number of commits
    #[must_use]
    pub fn with_cap(mut self, cap: CountCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the display order
    #[must_use]
    pub fn with_order(mut self, order: DisplayOrder) -> Self {
        self.order = order;
        self
    }
}

/// A pipeline stage that can shrink the commit list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Keyword inclusion
    Include,
    /// Keyword exclusion
    Exclude,
    /// Author allow-list
    Authors,
    /// Newest/oldest cap
    Cap,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Include => "include queries",
            Self::Exclude => "exclude queries",
            Self::Authors => "author email",
            Self::Cap => "count cap",
        };
        f.write_str(name)
    }
}

/// How many commits a stage kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCount {
    /// The stage that ran
    pub stage: Stage,
    /// Commits entering the stage
    pub before: usize,
    /// Commits leaving the stage
    pub after: usize,
}

/// Soft conditions raised while filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterWarning {
    /// The cap was not smaller than the list, so it was skipped
    CapNotApplied {
        /// The requested cap
        cap: CountCap,
        /// Commits available when the cap was considered
        available: usize,
    },
    /// Nothing survived filtering
    NoCommits,
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapNotApplied { cap, available } => write!(
                f,
                "Requested {cap} but only {available} remain after filtering; keeping all of them"
            ),
            Self::NoCommits => write!(
                f,
                "No commits match the given filters; the report will only contain the title page"
            ),
        }
    }
}

/// Per-stage counts and warnings from one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    /// Commits handed to the pipeline
    pub input: usize,
    /// Stages that actually ran, in order
    pub stages: Vec<StageCount>,
    /// Soft conditions
    pub warnings: Vec<FilterWarning>,
}

impl FilterReport {
    fn record(&mut self, stage: Stage, before: usize, after: usize) {
        info!(%stage, before, after, "Filtered {after} of {before} commits by {stage}");
        self.stages.push(StageCount {
            stage,
            before,
            after,
        });
    }

    fn warn(&mut self, warning: FilterWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Count after a given stage, if it ran
    #[must_use]
    pub fn after(&self, stage: Stage) -> Option<usize> {
        self.stages
            .iter()
            .find(|count| count.stage == stage)
            .map(|count| count.after)
    }
}

/// Pipeline output: the display list and what happened on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCommits {
    /// Commits in display order
    pub commits: Vec<CommitRecord>,
    /// Stage counts and warnings
    pub report: FilterReport,
}

/// Run the filter pipeline
///
/// `commits` must be newest-first, as returned by
/// [`GitRepo::walk_commits`](crate::GitRepo::walk_commits).
#[must_use]
pub fn filter_commits(commits: Vec<CommitRecord>, criteria: &FilterCriteria) -> FilteredCommits {
    let mut report = FilterReport {
        input: commits.len(),
        ..Default::default()
    };
    let mut commits = commits;

    if !criteria.include.is_empty() {
        let terms = fold_terms(&criteria.include);
        let before = commits.len();
        commits.retain(|commit| mentions_any(commit, &terms));
        report.record(Stage::Include, before, commits.len());
    }

    if !criteria.exclude.is_empty() {
        let terms = fold_terms(&criteria.exclude);
        let before = commits.len();
        commits.retain(|commit| !mentions_any(commit, &terms));
        report.record(Stage::Exclude, before, commits.len());
    }

    if !criteria.authors.is_empty() {
        let before = commits.len();
        commits.retain(|commit| {
            criteria
                .authors
                .iter()
                .any(|author| author == commit.author_email())
        });
        report.record(Stage::Authors, before, commits.len());
    }

    match criteria.cap {
        CountCap::None => {}
        CountCap::Newest(n) | CountCap::Oldest(n) if n >= commits.len() => {
            report.warn(FilterWarning::CapNotApplied {
                cap: criteria.cap,
                available: commits.len(),
            });
        }
        CountCap::Newest(n) => {
            let before = commits.len();
            commits.truncate(n);
            report.record(Stage::Cap, before, commits.len());
        }
        CountCap::Oldest(n) => {
            let before = commits.len();
            commits = commits.split_off(before - n);
            report.record(Stage::Cap, before, commits.len());
        }
    }

    if criteria.order == DisplayOrder::OldestFirst {
        commits.reverse();
    }

    if commits.is_empty() {
        report.warn(FilterWarning::NoCommits);
    }

    FilteredCommits { commits, report }
}

fn fold_terms(terms: &[String]) -> Vec<String> {
    terms.iter().map(|term| term.to_lowercase()).collect()
}

fn mentions_any(commit: &CommitRecord, folded_terms: &[String]) -> bool {
    let title = commit.title().to_lowercase();
    let description = commit.description().to_lowercase();
    folded_terms
        .iter()
        .any(|term| title.contains(term.as_str()) || description.contains(term.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::{RawCommit, RepoIdentity};
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    /// Newest-first list of five commits by three authors
    fn history() -> Vec<CommitRecord> {
        let specs = [
            ("e", "carol@example.com", "Fix crash on empty input", ""),
            ("d", "alice@example.com", "Add PDF footer", "Page numbers and timestamp"),
            ("c", "bob@example.com", "WIP: refactor layout", "do not merge"),
            ("b", "alice@example.com", "Initial layout engine", "Estimate heights"),
            ("a", "bob@example.com", "Initial commit", ""),
        ];
        let identity = RepoIdentity::new("octocat", "report");
        specs
            .iter()
            .enumerate()
            .map(|(age, (sha, email, title, description))| {
                let raw = RawCommit {
                    sha: sha.repeat(40),
                    message: format!("{title}\n{description}"),
                    author: email.split('@').next().unwrap_or_default().to_string(),
                    author_email: email.to_string(),
                    timestamp: Utc
                        .with_ymd_and_hms(2026, 1, 10 - age as u32, 12, 0, 0)
                        .unwrap(),
                };
                CommitRecord::new(&raw, &identity)
            })
            .collect()
    }

    fn hashes(filtered: &FilteredCommits) -> Vec<String> {
        filtered
            .commits
            .iter()
            .map(|c| c.short_hash().to_string())
            .collect()
    }

    #[test]
    fn test_no_criteria_reverses_to_oldest_first() {
        let filtered = filter_commits(history(), &FilterCriteria::default());
        assert_eq!(
            hashes(&filtered),
            vec!["aaaaaaa", "bbbbbbb", "ccccccc", "ddddddd", "eeeeeee"]
        );
        assert!(filtered.report.stages.is_empty());
        assert!(filtered.report.warnings.is_empty());
    }

    #[test]
    fn test_newest_first_keeps_walk_order() {
        let criteria = FilterCriteria::default().with_order(DisplayOrder::NewestFirst);
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(
            hashes(&filtered),
            vec!["eeeeeee", "ddddddd", "ccccccc", "bbbbbbb", "aaaaaaa"]
        );
    }

    #[test]
    fn test_single_author_keeps_chronological_order() {
        let criteria = FilterCriteria::default().with_authors(["alice@example.com"]);
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(hashes(&filtered), vec!["bbbbbbb", "ddddddd"]);
        assert_eq!(filtered.report.after(Stage::Authors), Some(2));
    }

    #[test]
    fn test_author_match_is_exact() {
        let criteria = FilterCriteria::default().with_authors(["ALICE@example.com"]);
        let filtered = filter_commits(history(), &criteria);
        assert!(filtered.commits.is_empty());
        assert_eq!(filtered.report.warnings, vec![FilterWarning::NoCommits]);
    }

    #[test]
    fn test_include_matches_title_or_description() {
        let criteria = FilterCriteria::default().with_include(["layout", "timestamp"]);
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(hashes(&filtered), vec!["bbbbbbb", "ccccccc", "ddddddd"]);
    }

    #[test]
    fn test_include_is_case_insensitive() {
        let lower = filter_commits(history(), &FilterCriteria::default().with_include(["initial"]));
        let upper = filter_commits(history(), &FilterCriteria::default().with_include(["INITIAL"]));
        assert_eq!(lower, upper);
        assert_eq!(hashes(&lower), vec!["aaaaaaa", "bbbbbbb"]);
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let criteria = FilterCriteria::default()
            .with_include(["layout"])
            .with_exclude(["wip"]);
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(hashes(&filtered), vec!["bbbbbbb"]);
        assert_eq!(
            filtered.report.stages,
            vec![
                StageCount {
                    stage: Stage::Include,
                    before: 5,
                    after: 2
                },
                StageCount {
                    stage: Stage::Exclude,
                    before: 2,
                    after: 1
                },
            ]
        );
    }

    #[test]
    fn test_exclude_any_term_removes_commit() {
        let criteria = FilterCriteria::default().with_exclude(["crash", "merge"]);
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(hashes(&filtered), vec!["aaaaaaa", "bbbbbbb", "ddddddd"]);
    }

    #[test]
    fn test_newest_cap_keeps_most_recent() {
        let criteria = FilterCriteria::default().with_cap(CountCap::Newest(2));
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(hashes(&filtered), vec!["ddddddd", "eeeeeee"]);
        assert_eq!(filtered.report.after(Stage::Cap), Some(2));
    }

    #[test]
    fn test_oldest_cap_keeps_earliest() {
        let criteria = FilterCriteria::default().with_cap(CountCap::Oldest(2));
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(hashes(&filtered), vec!["aaaaaaa", "bbbbbbb"]);
    }

    #[test]
    fn test_cap_at_or_above_count_warns_and_keeps_all() {
        for cap in [CountCap::Newest(5), CountCap::Newest(50), CountCap::Oldest(5)] {
            let filtered = filter_commits(history(), &FilterCriteria::default().with_cap(cap));
            assert_eq!(filtered.commits.len(), 5);
            assert_eq!(
                filtered.report.warnings,
                vec![FilterWarning::CapNotApplied { cap, available: 5 }]
            );
            assert_eq!(filtered.report.after(Stage::Cap), None);
        }
    }

    #[test]
    fn test_cap_applies_after_author_filter() {
        let criteria = FilterCriteria::default()
            .with_authors(["alice@example.com", "bob@example.com"])
            .with_cap(CountCap::Newest(1));
        let filtered = filter_commits(history(), &criteria);
        assert_eq!(hashes(&filtered), vec!["ddddddd"]);
    }

    #[test]
    fn test_empty_input_warns_no_commits() {
        let filtered = filter_commits(Vec::new(), &FilterCriteria::default());
        assert!(filtered.commits.is_empty());
        assert_eq!(filtered.report.warnings, vec![FilterWarning::NoCommits]);
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(CountCap::Newest(3).to_string(), "newest 3 commits");
        assert_eq!(DisplayOrder::NewestFirst.to_string(), "Newest to oldest");
        assert_eq!(Stage::Authors.to_string(), "author email");
    }
}
