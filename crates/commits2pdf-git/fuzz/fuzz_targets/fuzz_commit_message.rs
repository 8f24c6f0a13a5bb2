#![no_main]

use chrono::DateTime;
use commits2pdf_git::{CommitRecord, FilterCriteria, RawCommit, RepoIdentity, filter_commits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str, i64)| {
    let (message, term, seconds) = input;
    let Some(timestamp) = DateTime::from_timestamp(seconds, 0) else {
        return;
    };
    let raw = RawCommit {
        sha: "0".repeat(40),
        message: message.to_string(),
        author: "fuzz".to_string(),
        author_email: "fuzz@example.com".to_string(),
        timestamp,
    };
    let record = CommitRecord::new(&raw, &RepoIdentity::new("octocat", "demo"));
    assert!(!record.title().contains('\n'));
    let _ = record.to_string();

    let criteria = FilterCriteria::default()
        .with_include([term])
        .with_exclude([term]);
    let filtered = filter_commits(vec![record], &criteria);
    // Exclude always wins over include
    assert!(filtered.commits.is_empty());
});
