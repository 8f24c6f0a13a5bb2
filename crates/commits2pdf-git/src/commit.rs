//! Commit types: the raw walk output and the display-ready record

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Length of the abbreviated hash shown in reports
pub const SHORT_HASH_LEN: usize = 7;

/// A commit as read from the repository, before any presentation concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

/// Who owns a repository and what it is called, used to build diff links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIdentity {
    /// Account or organisation that owns the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoIdentity {
    /// Create a repository identity
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// URL of the web diff for `sha`
    ///
    /// Only meaningful when owner and name match the hosted repository.
    #[must_use]
    pub fn diff_url(&self, sha: &str) -> String {
        format!("https://github.com/{}/{}/commit/{}", self.owner, self.name, sha)
    }
}

/// One display-ready commit
///
/// Built once per raw commit during ingestion and never mutated afterwards;
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    repository: String,
    short_hash: String,
    full_hash: String,
    author_name: String,
    author_email: String,
    timestamp: DateTime<Utc>,
    title: String,
    description: String,
    diff_url: String,
}

impl CommitRecord {
    /// Build a record from a raw commit
    #[must_use]
    pub fn new(raw: &RawCommit, identity: &RepoIdentity) -> Self {
        let message = raw.message.trim_end();
        let (title, description) = match message.split_once('\n') {
            Some((title, rest)) => (title.trim_end_matches('\r'), rest),
            None => (message, ""),
        };

        Self {
            repository: identity.name.clone(),
            short_hash: raw.sha.chars().take(SHORT_HASH_LEN).collect(),
            full_hash: raw.sha.clone(),
            author_name: raw.author.clone(),
            author_email: raw.author_email.clone(),
            timestamp: raw.timestamp,
            title: title.to_string(),
            description: description.to_string(),
            diff_url: identity.diff_url(&raw.sha),
        }
    }

    /// Name of the repository the commit belongs to
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Abbreviated hash
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.short_hash
    }

    /// Full 40-character hash
    #[must_use]
    pub fn full_hash(&self) -> &str {
        &self.full_hash
    }

    /// Author name
    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    /// Author email
    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    /// Commit timestamp
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// First line of the message
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Remaining message lines, possibly empty
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Link to the commit diff
    #[must_use]
    pub fn diff_url(&self) -> &str {
        &self.diff_url
    }

    /// Single-line header: hash, author and date
    ///
    /// The date is shown in the local time zone.
    #[must_use]
    pub fn info_line(&self) -> String {
        format!(
            "{} | By {} ({}) | At {}",
            self.short_hash,
            self.author_name,
            self.author_email,
            self.timestamp.with_timezone(&Local).format("%d/%m/%Y")
        )
    }
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=============================")?;
        writeln!(f, "Repository: {}", self.repository)?;
        writeln!(f, "{}", self.info_line())?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f, "View diff: {}", self.diff_url)?;
        writeln!(f, "=============================")
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn raw_strategy() -> impl Strategy<Value = RawCommit> {
        (
            "[0-9a-f]{40}",
            ".{0,200}",
            "[A-Za-z ]{1,30}",
            "[a-z]+@[a-z]+\\.[a-z]+",
            0i64..2_000_000_000i64,
        )
            .prop_map(|(sha, message, author, author_email, ts)| RawCommit {
                sha,
                message,
                author,
                author_email,
                timestamp: DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now),
            })
    }

    proptest! {
        /// Property: the title never contains a line break
        #[test]
        fn prop_title_is_single_line(raw in raw_strategy()) {
            let record = CommitRecord::new(&raw, &RepoIdentity::new("o", "r"));
            prop_assert!(!record.title().contains('\n'));
        }

        /// Property: the short hash is a prefix of the full hash
        #[test]
        fn prop_short_hash_is_prefix(raw in raw_strategy()) {
            let record = CommitRecord::new(&raw, &RepoIdentity::new("o", "r"));
            prop_assert!(record.full_hash().starts_with(record.short_hash()));
            prop_assert_eq!(record.short_hash().len(), SHORT_HASH_LEN);
        }

        /// Property: the info line always starts with the short hash
        #[test]
        fn prop_info_line_leads_with_hash(raw in raw_strategy()) {
            let record = CommitRecord::new(&raw, &RepoIdentity::new("o", "r"));
            prop_assert!(record.info_line().starts_with(record.short_hash()));
        }
    }
}
