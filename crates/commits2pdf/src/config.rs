// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for commits2pdf
//!
//! [`Config`] is what the user typed. [`Config::validate`] checks every
//! user-supplied value before anything touches a repository and turns the
//! flags into a typed [`ReportPlan`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use commits2pdf_git::{CountCap, DisplayOrder, FilterCriteria};
use commits2pdf_render::{Appearance, LayoutStrategy, RenderOptions};
use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w+.%-]+@[\w.-]+\.[A-Za-z]{2,}$").expect("Failed to create EMAIL regex")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(0?[1-9]|1[012])-(0?[1-9]|[12][0-9]|3[01])$")
        .expect("Failed to create DATE regex")
});

static QUERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^,\s]+(,[^,\s]+)*$").expect("Failed to create QUERY regex")
});

/// Characters no file name may contain on any supported platform
const FORBIDDEN_FILENAME_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*', '\0'];

/// Commits to PDF - render a repository's commit history as a PDF report
#[derive(Parser, Debug, Clone)]
#[command(name = "commits2pdf")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Owner of the repository on GitHub
    ///
    /// Used to build the diff links and, with --clone, the clone URL.
    pub owner: String,

    /// Path to the local repository
    #[arg(
        short = 'p',
        long,
        default_value = ".",
        env = "COMMITS2PDF_REPO_PATH",
        conflicts_with = "clone"
    )]
    pub repo_path: PathBuf,

    /// Clone https://github.com/<OWNER>/<NAME> into ./<NAME> and report on it
    #[arg(short = 'c', long = "clone", value_name = "NAME")]
    pub clone: Option<String>,

    /// Directory the PDF is written to; created if it does not exist
    #[arg(short, long, default_value = ".", env = "COMMITS2PDF_OUTPUT")]
    pub output: PathBuf,

    /// File name of the PDF [default: <repo>-commit_report.pdf]
    ///
    /// ".pdf" is appended when missing.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Branch to report on; falls back to the active branch if missing
    #[arg(short, long, default_value = "main")]
    pub branch: String,

    /// Only include commits by these authors (comma-separated emails)
    #[arg(short, long, value_name = "EMAILS")]
    pub authors: Option<String>,

    /// Only include commits on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Only include commits on or before this date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// Keep commits whose title or description contains any of these terms
    ///
    /// Comma-separated without spaces, case-insensitive. Applied before --exclude.
    #[arg(short, long, value_name = "TERMS")]
    pub include: Option<String>,

    /// Drop commits whose title or description contains any of these terms
    #[arg(short = 'x', long, value_name = "TERMS")]
    pub exclude: Option<String>,

    /// Keep only the newest N commits after filtering
    #[arg(long, value_name = "N", conflicts_with = "oldest")]
    pub newest: Option<usize>,

    /// Keep only the oldest N commits after filtering
    #[arg(long, value_name = "N")]
    pub oldest: Option<usize>,

    /// List commits from newest to oldest
    #[arg(short, long, default_value = "false")]
    pub reverse: bool,

    /// Dark appearance
    #[arg(short, long, default_value = "false")]
    pub dark: bool,

    /// Font scaling factor; only used by the estimate layout
    #[arg(long, default_value_t = 1.0)]
    pub scaling: f32,

    /// How page breaks are decided
    #[arg(short, long, value_enum, default_value_t = LayoutChoice::Exact)]
    pub layout: LayoutChoice,

    /// Do not open the output directory after writing the PDF
    #[arg(long, default_value = "false")]
    pub no_open: bool,

    /// Print the filtered commits instead of writing a PDF
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub list: Option<ListFormat>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo_path: PathBuf::from("."),
            clone: None,
            output: PathBuf::from("."),
            name: None,
            branch: "main".to_string(),
            authors: None,
            start_date: None,
            end_date: None,
            include: None,
            exclude: None,
            newest: None,
            oldest: None,
            reverse: false,
            dark: false,
            scaling: 1.0,
            layout: LayoutChoice::Exact,
            no_open: false,
            list: None,
            verbose: false,
            quiet: false,
        }
    }
}

/// Page-break strategy as chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LayoutChoice {
    /// Trial-draw each commit and move it to a new page when it overflows
    #[default]
    Exact,
    /// Estimate each commit's height from its length (honors --scaling)
    Estimate,
}

impl From<LayoutChoice> for LayoutStrategy {
    fn from(choice: LayoutChoice) -> Self {
        match choice {
            LayoutChoice::Exact => Self::Exact,
            LayoutChoice::Estimate => Self::Estimate,
        }
    }
}

/// Output format of --list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable blocks
    Text,
    /// JSON array of commit records
    Json,
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Where the repository comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// An existing checkout
    Local(PathBuf),
    /// A GitHub repository to clone first
    Clone {
        /// Clone URL
        url: String,
        /// Local directory to clone into
        dest: PathBuf,
    },
}

/// A validated request for one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPlan {
    /// Repository owner
    pub owner: String,
    /// Repository to read
    pub source: RepoSource,
    /// Requested branch
    pub branch: String,
    /// Filters to apply
    pub criteria: FilterCriteria,
    /// Directory the PDF goes to
    pub output_dir: PathBuf,
    /// PDF file name; `None` derives it from the repository name
    pub file_name: Option<String>,
    /// Layout and appearance
    pub render: RenderOptions,
    /// Print instead of rendering
    pub list: Option<ListFormat>,
    /// Open the output directory afterwards
    pub open: bool,
}

impl ReportPlan {
    /// Full path of the PDF for a repository called `repository`
    #[must_use]
    pub fn output_path(&self, repository: &str) -> PathBuf {
        let name = self
            .file_name
            .clone()
            .unwrap_or_else(|| default_file_name(repository));
        self.output_dir.join(name)
    }
}

/// `<repository>-commit_report.pdf`
#[must_use]
pub fn default_file_name(repository: &str) -> String {
    format!("{repository}-commit_report.pdf")
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Count cap from --newest / --oldest
    #[must_use]
    pub fn count_cap(&self) -> CountCap {
        match (self.newest, self.oldest) {
            (Some(n), _) => CountCap::Newest(n),
            (None, Some(n)) => CountCap::Oldest(n),
            (None, None) => CountCap::None,
        }
    }

    /// Validate every user-supplied value and build the report plan
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found, as a [`ConfigError`].
    pub fn validate(&self) -> Result<ReportPlan, ConfigError> {
        let owner = self.owner.trim();
        if owner.is_empty() || owner.contains(['/', '\\']) || owner.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidOwner(self.owner.clone()));
        }

        let source = match &self.clone {
            Some(name) => {
                let name = name.trim();
                if name.is_empty() || name.contains(FORBIDDEN_FILENAME_CHARS) || name == ".." {
                    return Err(ConfigError::InvalidCloneName(name.to_string()));
                }
                RepoSource::Clone {
                    url: format!("https://github.com/{owner}/{name}"),
                    dest: PathBuf::from(name),
                }
            }
            None => RepoSource::Local(self.repo_path.clone()),
        };

        let authors = match &self.authors {
            Some(list) => parse_emails(list)?,
            None => Vec::new(),
        };

        let start = self
            .start_date
            .as_deref()
            .map(|date| parse_date("--start-date", date))
            .transpose()?;
        let end = self
            .end_date
            .as_deref()
            .map(|date| parse_date("--end-date", date))
            .transpose()?;
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(ConfigError::DateRangeInverted { start, end });
        }

        let include = match &self.include {
            Some(query) => parse_query("--include", query)?,
            None => Vec::new(),
        };
        let exclude = match &self.exclude {
            Some(query) => parse_query("--exclude", query)?,
            None => Vec::new(),
        };

        for (flag, value) in [("--newest", self.newest), ("--oldest", self.oldest)] {
            if value == Some(0) {
                return Err(ConfigError::InvalidCount { flag });
            }
        }

        if !self.scaling.is_finite() || self.scaling <= 0.0 {
            return Err(ConfigError::InvalidScaling(self.scaling));
        }

        if self.output.exists() && !self.output.is_dir() {
            return Err(ConfigError::OutputNotDirectory(self.output.clone()));
        }

        let file_name = self.name.as_deref().map(normalize_file_name).transpose()?;

        let criteria = FilterCriteria {
            since: start.map(start_of_day),
            until: end.map(end_of_day),
            ..FilterCriteria::default()
        }
        .with_authors(authors)
        .with_include(include)
        .with_exclude(exclude)
        .with_cap(self.count_cap())
        .with_order(if self.reverse {
            DisplayOrder::NewestFirst
        } else {
            DisplayOrder::OldestFirst
        });

        let render = RenderOptions::new(self.layout.into())
            .with_appearance(Appearance::from_dark_flag(self.dark))
            .with_scaling(self.scaling);

        Ok(ReportPlan {
            owner: owner.to_string(),
            source,
            branch: self.branch.clone(),
            criteria,
            output_dir: self.output.clone(),
            file_name,
            render,
            list: self.list,
            open: !self.no_open,
        })
    }
}

fn parse_emails(list: &str) -> Result<Vec<String>, ConfigError> {
    list.split(',')
        .map(|email| {
            let email = email.trim();
            if EMAIL.is_match(email) {
                Ok(email.to_string())
            } else {
                Err(ConfigError::InvalidEmail(email.to_string()))
            }
        })
        .collect()
}

fn parse_date(flag: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    let invalid = || ConfigError::InvalidDate {
        flag,
        value: value.to_string(),
    };
    let caps = DATE.captures(value.trim()).ok_or_else(invalid)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let (Some(year), Some(month), Some(day)) = (field(1), field(2), field(3)) else {
        return Err(invalid());
    };
    let year = i32::try_from(year).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_query(flag: &'static str, query: &str) -> Result<Vec<String>, ConfigError> {
    if !QUERY.is_match(query) {
        return Err(ConfigError::InvalidQuery {
            flag,
            value: query.to_string(),
        });
    }
    Ok(query.split(',').map(str::to_string).collect())
}

fn normalize_file_name(name: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidFileName(name.to_string());
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed.contains(FORBIDDEN_FILENAME_CHARS)
        || trimmed.chars().any(char::is_control)
        || trimmed.trim_end_matches(".pdf").trim_matches('.').is_empty()
    {
        return Err(invalid());
    }
    if Path::new(trimmed).extension().is_some_and(|ext| ext == "pdf") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}.pdf"))
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = chrono::NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(chrono::NaiveTime::MIN);
    date.and_time(last).and_utc()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Owner is empty or not a single path segment
    #[error("Invalid owner: '{0}'")]
    InvalidOwner(String),

    /// Clone name is empty or not a plain directory name
    #[error("Invalid repository name to clone: '{0}'")]
    InvalidCloneName(String),

    /// An author email is malformed
    #[error("Invalid email: '{0}' (expected <author@email.com> or <a@email.com,b@email.com>)")]
    InvalidEmail(String),

    /// A date is malformed or does not exist
    #[error("Invalid date for {flag}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The flag the date was given to
        flag: &'static str,
        /// The rejected value
        value: String,
    },

    /// The start date is after the end date
    #[error("Start date {start} is after end date {end}")]
    DateRangeInverted {
        /// Parsed start date
        start: NaiveDate,
        /// Parsed end date
        end: NaiveDate,
    },

    /// A keyword query has an empty term or a term containing whitespace
    #[error("Invalid query for {flag}: '{value}' (expected <term> or <term1,term2>)")]
    InvalidQuery {
        /// The flag the query was given to
        flag: &'static str,
        /// The rejected value
        value: String,
    },

    /// A count cap of zero
    #[error("{flag} must be at least 1")]
    InvalidCount {
        /// The flag with the bad count
        flag: &'static str,
    },

    /// Non-positive or non-finite scaling
    #[error("Scaling must be a positive number, got {0}")]
    InvalidScaling(f32),

    /// The output path exists and is a file
    #[error("Output path is not a directory: {}", .0.display())]
    OutputNotDirectory(PathBuf),

    /// The PDF file name is not usable
    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),
}
