// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for commits2pdf-git
//!
//! These tests build real repositories with `git2` and run them through the
//! walk and filter pipeline end to end.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{TimeZone, Utc};
use commits2pdf_git::{
    filter_commits, CommitRecord, CountCap, DisplayOrder, FilterCriteria, FilterWarning, GitRepo,
    RepoIdentity, WalkOptions,
};
use git2::{Repository, Signature, Time};
use similar_asserts::assert_eq;

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary repository that is removed when dropped
struct TestRepo {
    path: PathBuf,
}

impl TestRepo {
    /// Create a repository on `main` with the given (author email, message, day) commits, oldest first
    fn new(name: &str, commits: &[(&str, &str, u32)]) -> Self {
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "commits2pdf-it-{name}-{}-{counter}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("create temp dir");

        let repo = Repository::init(&path).expect("init");
        repo.set_head("refs/heads/main").expect("set head");
        let tree_id = repo.index().expect("index").write_tree().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("tree");

        let mut parent = None;
        for (email, message, day) in commits {
            let when = Utc
                .with_ymd_and_hms(2026, 2, *day, 9, 30, 0)
                .unwrap()
                .timestamp();
            let name = email.split('@').next().unwrap_or("someone");
            let sig = Signature::new(name, email, &Time::new(when, 0)).expect("signature");
            let parents: Vec<git2::Commit<'_>> = parent
                .map(|id| repo.find_commit(id).expect("parent"))
                .into_iter()
                .collect();
            let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
            let id = repo
                .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
                .expect("commit");
            parent = Some(id);
        }

        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestRepo {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn five_commit_repo(name: &str) -> TestRepo {
    TestRepo::new(
        name,
        &[
            ("alice@example.com", "Initial commit\n", 1),
            ("bob@example.com", "Add layout engine\n\nHeight estimation first.\n", 2),
            ("carol@example.com", "Fix footer overlap\n", 3),
            ("alice@example.com", "Add dark appearance\n\nBackground fill per page.\n", 4),
            ("bob@example.com", "WIP: tidy layout constants\n", 5),
        ],
    )
}

fn records(repo: &GitRepo) -> Vec<CommitRecord> {
    let identity = RepoIdentity::new("octocat", repo.name());
    repo.walk_commits(&WalkOptions::on_branch("main"))
        .expect("walk")
        .iter()
        .map(|raw| CommitRecord::new(raw, &identity))
        .collect()
}

fn titles(commits: &[CommitRecord]) -> Vec<&str> {
    commits.iter().map(CommitRecord::title).collect()
}

#[test]
fn test_author_filter_keeps_chronological_order() {
    let fixture = five_commit_repo("author");
    let repo = GitRepo::open(fixture.path()).expect("open");

    let criteria = FilterCriteria::default().with_authors(["alice@example.com"]);
    let filtered = filter_commits(records(&repo), &criteria);

    assert_eq!(
        titles(&filtered.commits),
        vec!["Initial commit", "Add dark appearance"]
    );
    assert!(filtered.report.warnings.is_empty());
}

#[test]
fn test_include_exclude_and_reverse() {
    let fixture = five_commit_repo("keywords");
    let repo = GitRepo::open(fixture.path()).expect("open");

    let criteria = FilterCriteria::default()
        .with_include(["LAYOUT", "page"])
        .with_exclude(["wip"])
        .with_order(DisplayOrder::NewestFirst);
    let filtered = filter_commits(records(&repo), &criteria);

    assert_eq!(
        titles(&filtered.commits),
        vec!["Add dark appearance", "Add layout engine"]
    );
}

#[test]
fn test_cap_larger_than_history_is_a_warning() {
    let fixture = five_commit_repo("cap");
    let repo = GitRepo::open(fixture.path()).expect("open");

    let criteria = FilterCriteria::default().with_cap(CountCap::Oldest(10));
    let filtered = filter_commits(records(&repo), &criteria);

    assert_eq!(filtered.commits.len(), 5);
    assert_eq!(
        filtered.report.warnings,
        vec![FilterWarning::CapNotApplied {
            cap: CountCap::Oldest(10),
            available: 5
        }]
    );
}

#[test]
fn test_date_bounds_then_filters() {
    let fixture = five_commit_repo("dates");
    let repo = GitRepo::open(fixture.path()).expect("open");
    let identity = RepoIdentity::new("octocat", repo.name());

    let options = WalkOptions::on_branch("main")
        .since(Some(Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap()))
        .until(Some(Utc.with_ymd_and_hms(2026, 2, 4, 23, 59, 59).unwrap()));
    let walked: Vec<CommitRecord> = repo
        .walk_commits(&options)
        .expect("walk")
        .iter()
        .map(|raw| CommitRecord::new(raw, &identity))
        .collect();

    let filtered = filter_commits(walked, &FilterCriteria::default());
    assert_eq!(
        titles(&filtered.commits),
        vec!["Add layout engine", "Fix footer overlap", "Add dark appearance"]
    );
}

#[test]
fn test_records_carry_description_and_diff_url() {
    let fixture = five_commit_repo("records");
    let repo = GitRepo::open(fixture.path()).expect("open");
    let all = records(&repo);

    let layout = all
        .iter()
        .find(|c| c.title() == "Add layout engine")
        .expect("layout commit");
    assert_eq!(layout.description(), "\nHeight estimation first.");
    assert_eq!(layout.author_email(), "bob@example.com");
    assert!(layout.diff_url().ends_with(layout.full_hash()));
    assert!(layout.info_line().contains("02/02/2026"));
}

#[test]
fn test_records_serialize_for_listing() {
    let fixture = five_commit_repo("json");
    let repo = GitRepo::open(fixture.path()).expect("open");
    let filtered = filter_commits(records(&repo), &FilterCriteria::default());

    let json = serde_json::to_value(&filtered.commits).expect("serialize");
    let array = json.as_array().expect("array");
    assert_eq!(array.len(), 5);
    assert_eq!(array[0]["title"], "Initial commit");
}
