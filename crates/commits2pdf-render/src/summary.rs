// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Title page contents

use chrono::{DateTime, Utc};
use commits2pdf_git::{CountCap, FilterCriteria};

use crate::canvas::{DrawOp, PageGeometry, Surface, TextRole, centered_x};
use crate::text::{FontFace, TextStyle, chars_for_divisor, wrap};
use crate::theme::Appearance;

const REPORT_TITLE: &str = "Commit Report";
const TITLE_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 24.0);
const REPOSITORY_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 18.0);
const LINE_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 12.0);

/// What the report covers, shown on page 1
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    repository: String,
    lines: Vec<String>,
}

impl ReportSummary {
    /// Describe a report over `commit_count` commits selected with `criteria`
    #[must_use]
    pub fn new(
        repository: impl Into<String>,
        owner: &str,
        branch: &str,
        criteria: &FilterCriteria,
        commit_count: usize,
    ) -> Self {
        let mut lines = vec![format!("Owner: {owner}")];

        lines.push(match criteria.authors.as_slice() {
            [] => "Authors: All".to_string(),
            [single] => format!("Author: {single}"),
            many => format!("Authors: {}", many.join(", ")),
        });

        if criteria.since.is_some() || criteria.until.is_some() {
            lines.push(format!(
                "Start date: {} | End date: {}",
                format_day(criteria.since),
                format_day(criteria.until)
            ));
        }

        lines.push(format!("Branch: {branch}"));

        match criteria.cap {
            CountCap::None => {}
            CountCap::Newest(n) => lines.push(format!("Newest n commits: {n}")),
            CountCap::Oldest(n) => lines.push(format!("Oldest n commits: {n}")),
        }

        if !criteria.include.is_empty() {
            lines.push(format!("Including: {}", criteria.include.join(", ")));
        }
        if !criteria.exclude.is_empty() {
            lines.push(format!("Excluding: {}", criteria.exclude.join(", ")));
        }

        lines.push(format!("Sorting: {}", criteria.order));
        lines.push(format!("Commit count: {commit_count}"));

        Self {
            repository: repository.into(),
            lines,
        }
    }

    /// Repository name
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Summary lines below the headings
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Draw the headings and summary lines, centered, from the cursor down
    pub(crate) fn draw<S: Surface>(
        &self,
        surface: &mut S,
        geometry: &PageGeometry,
        appearance: &Appearance,
        scale: f32,
    ) {
        let title = TITLE_STYLE.scaled(scale);
        draw_centered(surface, geometry, appearance, REPORT_TITLE, title, TextRole::Heading);
        surface.advance(title.size * 0.5);

        let repository = REPOSITORY_STYLE.scaled(scale);
        draw_centered(
            surface,
            geometry,
            appearance,
            &format!("Repository: {}", self.repository),
            repository,
            TextRole::Heading,
        );
        surface.advance(repository.size);

        let style = LINE_STYLE.scaled(scale);
        for line in &self.lines {
            draw_centered(surface, geometry, appearance, line, style, TextRole::Summary);
            surface.advance(style.size * 0.5);
        }
    }
}

fn format_day(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| "N/A".to_string(), |d| d.format("%d/%m/%Y").to_string())
}

fn draw_centered<S: Surface>(
    surface: &mut S,
    geometry: &PageGeometry,
    appearance: &Appearance,
    text: &str,
    style: TextStyle,
    role: TextRole,
) {
    let columns = chars_for_divisor(geometry.content_width(), style.size * 0.5);
    for line in wrap(text, columns) {
        let height = style.line_height();
        surface.reserve(height);
        let x = centered_x(geometry, &style, &line);
        let baseline = surface.y() + style.size;
        surface.push(DrawOp::Text {
            x,
            baseline,
            text: line,
            style,
            color: appearance.text,
            role,
        });
        surface.advance(height);
    }
}
