// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Rendering context: page geometry, draw operations and the page cursor
//!
//! Layout never talks to the PDF backend directly. It records [`DrawOp`]s
//! into a [`Canvas`], which owns the finished pages, the open page and the
//! vertical cursor. A [`Trial`] is a detached copy of the cursor plus its
//! own operation log: drawing into it leaves the canvas untouched until the
//! trial is committed, and dropping it discards the attempt.

use tracing::trace;

use crate::text::{FontFace, TextStyle};
use crate::theme::{Appearance, Rgb};

/// Style of the page footer
pub const FOOTER_STYLE: TextStyle = TextStyle::new(FontFace::Oblique, 8.0);

/// Page size and margins in points, measured from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Margin on every side
    pub margin: f32,
}

impl PageGeometry {
    /// US Letter with 50 pt margins
    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
        margin: 50.0,
    };

    /// Width available to text
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Cursor position at the top of a fresh page
    #[must_use]
    pub fn top(&self) -> f32 {
        self.margin
    }

    /// Lowest cursor position a line may extend to when breaking automatically
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Usable height between top and bottom
    #[must_use]
    pub fn body_height(&self) -> f32 {
        self.bottom() - self.top()
    }

    /// Baseline of the footer line
    #[must_use]
    pub fn footer_baseline(&self) -> f32 {
        self.height - self.margin / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

/// What a piece of text is, used for styling checks and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// "Commit Report" and the repository line
    Heading,
    /// Title page summary lines
    Summary,
    /// Commit info line
    Info,
    /// Commit title
    Title,
    /// Commit description
    Description,
    /// Diff link
    DiffLink,
    /// Page footer
    Footer,
}

/// One primitive drawing instruction, in top-left-origin points
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle
    Fill {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill colour
        color: Rgb,
    },
    /// A single line of text
    Text {
        /// Left edge
        x: f32,
        /// Baseline
        baseline: f32,
        /// The text
        text: String,
        /// Font face and size
        style: TextStyle,
        /// Text colour
        color: Rgb,
        /// What the text is
        role: TextRole,
    },
    /// Horizontal rule
    Rule {
        /// Left end
        x1: f32,
        /// Right end
        x2: f32,
        /// Vertical position
        y: f32,
        /// Stroke width
        thickness: f32,
        /// Stroke colour
        color: Rgb,
    },
}

/// A finished page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Draw operations in painting order
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
        }
    }

    /// Text lines with the given role, in drawing order
    pub fn texts(&self, role: TextRole) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(move |op| match op {
            DrawOp::Text { text, role: r, .. } if *r == role => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of footer page-number lines on this page
    #[must_use]
    pub fn footer_count(&self) -> usize {
        self.texts(TextRole::Footer)
            .filter(|text| text.starts_with("Page "))
            .count()
    }

    /// Lowest baseline of any non-footer text
    #[must_use]
    pub fn lowest_body_baseline(&self) -> Option<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { baseline, role, .. } if *role != TextRole::Footer => {
                    Some(*baseline)
                }
                _ => None,
            })
            .reduce(f32::max)
    }
}

/// The complete laid-out report, ready for a backend
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    /// Geometry shared by every page
    pub geometry: PageGeometry,
    /// Pages in order
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    /// Number of physical pages
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Anything layout can draw into
pub(crate) trait Surface {
    /// Current cursor position
    fn y(&self) -> f32;
    /// Make room for a line `height` tall starting at the cursor
    fn reserve(&mut self, height: f32);
    /// Record a draw operation on the current page
    fn push(&mut self, op: DrawOp);
    /// Move the cursor down
    fn advance(&mut self, dy: f32);
}

/// The real drawing surface for one document
#[derive(Debug)]
pub struct Canvas {
    geometry: PageGeometry,
    appearance: Appearance,
    footer_stamp: String,
    finished: Vec<Page>,
    page: Page,
    cursor: f32,
    has_content: bool,
    auto_break: bool,
}

impl Canvas {
    /// Open page 1 with its background drawn and the cursor at the top margin
    #[must_use]
    pub fn new(geometry: PageGeometry, appearance: Appearance, footer_stamp: String) -> Self {
        let mut canvas = Self {
            geometry,
            appearance,
            footer_stamp,
            finished: Vec::new(),
            page: Page::new(1),
            cursor: geometry.top(),
            has_content: false,
            auto_break: false,
        };
        canvas.paint_background();
        canvas
    }

    /// Page geometry
    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Colours in use
    #[must_use]
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Number of the open page
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page.number
    }

    /// Current cursor position
    #[must_use]
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Space left above the bottom margin
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.geometry.bottom() - self.cursor
    }

    /// Whether anything besides background has been drawn on the open page
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// Finalize the open page with its footer and open the next one
    pub fn break_page(&mut self) {
        self.finish_page();
        let next = Page::new(self.page.number + 1);
        let full = std::mem::replace(&mut self.page, next);
        trace!(page = full.number, ops = full.ops.len(), "Page full");
        self.finished.push(full);
        self.cursor = self.geometry.top();
        self.has_content = false;
        self.paint_background();
    }

    /// Start a trial at the current cursor
    #[must_use]
    pub fn trial(&self) -> Trial {
        Trial {
            page_number: self.page.number,
            cursor: self.cursor,
            ops: Vec::new(),
        }
    }

    /// Apply a successful trial to the open page
    ///
    /// The trial must have been taken from this canvas with no drawing in
    /// between; its operations are appended and its cursor adopted.
    pub fn commit(&mut self, trial: Trial) {
        debug_assert_eq!(trial.page_number, self.page.number);
        if !trial.ops.is_empty() {
            self.has_content = true;
        }
        self.page.ops.extend(trial.ops);
        self.cursor = trial.cursor;
    }

    /// Run `draw` with automatic page breaks enabled
    pub(crate) fn with_auto_break<R>(&mut self, draw: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.auto_break, true);
        let result = draw(self);
        self.auto_break = previous;
        result
    }

    /// Finalize the last page and hand over every page
    #[must_use]
    pub fn finish(mut self) -> LaidOutDocument {
        self.finish_page();
        let mut pages = self.finished;
        pages.push(self.page);
        LaidOutDocument {
            geometry: self.geometry,
            pages,
        }
    }

    fn paint_background(&mut self) {
        self.page.ops.push(DrawOp::Fill {
            x: 0.0,
            y: 0.0,
            width: self.geometry.width,
            height: self.geometry.height,
            color: self.appearance.background,
        });
    }

    fn finish_page(&mut self) {
        let baseline = self.geometry.footer_baseline();
        let color = self.appearance.text;
        self.page.ops.push(DrawOp::Text {
            x: self.geometry.margin,
            baseline,
            text: format!("Page {}", self.page.number),
            style: FOOTER_STYLE,
            color,
            role: TextRole::Footer,
        });

        let stamp = format!("Generated by commits2pdf at {}", self.footer_stamp);
        let x = centered_x(&self.geometry, &FOOTER_STYLE, &stamp);
        self.page.ops.push(DrawOp::Text {
            x,
            baseline,
            text: stamp,
            style: FOOTER_STYLE,
            color,
            role: TextRole::Footer,
        });
    }
}

impl Surface for Canvas {
    fn y(&self) -> f32 {
        self.cursor
    }

    fn reserve(&mut self, height: f32) {
        if self.auto_break && self.has_content && self.cursor + height > self.geometry.bottom() {
            self.break_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        self.has_content = true;
        self.page.ops.push(op);
    }

    fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }
}

/// A throwaway drawing attempt: a cursor copy and a private op log
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    page_number: usize,
    cursor: f32,
    ops: Vec<DrawOp>,
}

impl Trial {
    /// Cursor position the attempt reached
    #[must_use]
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Operations recorded so far
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl Surface for Trial {
    fn y(&self) -> f32 {
        self.cursor
    }

    fn reserve(&mut self, _height: f32) {}

    fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }
}

/// Left edge that roughly centres `text` within the margins
pub(crate) fn centered_x(geometry: &PageGeometry, style: &TextStyle, text: &str) -> f32 {
    let slack = geometry.content_width() - style.estimate_width(text);
    geometry.margin + (slack / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn canvas() -> Canvas {
        Canvas::new(
            PageGeometry::LETTER,
            Appearance::LIGHT,
            "01/01/2026 00:00:00".to_string(),
        )
    }

    fn text(y: f32) -> DrawOp {
        DrawOp::Text {
            x: 50.0,
            baseline: y,
            text: "line".to_string(),
            style: TextStyle::new(FontFace::Regular, 11.0),
            color: Rgb::new(0.0, 0.0, 0.0),
            role: TextRole::Description,
        }
    }

    #[test]
    fn test_new_canvas_starts_at_top_with_background() {
        let canvas = canvas();
        assert_eq!(canvas.page_number(), 1);
        assert_eq!(canvas.cursor(), 50.0);
        assert!(!canvas.has_content());
        assert!(matches!(canvas.page.ops[0], DrawOp::Fill { .. }));
    }

    #[test]
    fn test_trial_does_not_touch_canvas_until_committed() {
        let mut canvas = canvas();
        let mut trial = canvas.trial();
        trial.push(text(60.0));
        trial.advance(20.0);

        assert_eq!(canvas.cursor(), 50.0);
        assert_eq!(canvas.page.ops.len(), 1);

        canvas.commit(trial);
        assert_eq!(canvas.cursor(), 70.0);
        assert_eq!(canvas.page.ops.len(), 2);
        assert!(canvas.has_content());
    }

    #[test]
    fn test_dropped_trial_leaves_no_trace() {
        let mut canvas = canvas();
        {
            let mut trial = canvas.trial();
            trial.push(text(60.0));
            trial.advance(500.0);
        }
        canvas.push(text(60.0));
        assert_eq!(canvas.cursor(), 50.0);
        assert_eq!(canvas.page.ops.len(), 2);
    }

    #[test]
    fn test_break_page_adds_footer_and_resets_cursor() {
        let mut canvas = canvas();
        canvas.push(text(60.0));
        canvas.advance(300.0);
        canvas.break_page();

        assert_eq!(canvas.page_number(), 2);
        assert_eq!(canvas.cursor(), 50.0);
        assert!(!canvas.has_content());

        let document = canvas.finish();
        assert_eq!(document.page_count(), 2);
        for page in &document.pages {
            assert_eq!(page.footer_count(), 1);
        }
        let footers: Vec<&str> = document.pages[1].texts(TextRole::Footer).collect();
        assert_eq!(
            footers,
            vec!["Page 2", "Generated by commits2pdf at 01/01/2026 00:00:00"]
        );
    }

    #[test]
    fn test_reserve_breaks_only_with_auto_break() {
        let mut canvas = canvas();
        canvas.push(text(60.0));
        canvas.advance(700.0);

        canvas.reserve(20.0);
        assert_eq!(canvas.page_number(), 1);

        canvas.with_auto_break(|c| c.reserve(20.0));
        assert_eq!(canvas.page_number(), 2);
        assert!(!canvas.auto_break);
    }

    #[test]
    fn test_reserve_never_breaks_an_empty_page() {
        let mut canvas = canvas();
        canvas.with_auto_break(|c| c.reserve(10_000.0));
        assert_eq!(canvas.page_number(), 1);
    }

    #[test]
    fn test_geometry_letter() {
        let geometry = PageGeometry::LETTER;
        assert_eq!(geometry.content_width(), 512.0);
        assert_eq!(geometry.bottom(), 742.0);
        assert_eq!(geometry.body_height(), 692.0);
        assert_eq!(geometry.footer_baseline(), 767.0);
    }

    #[test]
    fn test_centered_x_clamps_to_margin() {
        let geometry = PageGeometry::LETTER;
        let style = TextStyle::new(FontFace::Regular, 10.0);
        assert_eq!(centered_x(&geometry, &style, &"x".repeat(500)), 50.0);
        let short = centered_x(&geometry, &style, "abcd");
        assert!((short - (50.0 + (512.0 - 20.0) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_lowest_body_baseline_ignores_footer() {
        let mut canvas = canvas();
        canvas.push(text(120.0));
        canvas.push(text(80.0));
        let document = canvas.finish();
        assert_eq!(document.pages[0].lowest_body_baseline(), Some(120.0));
    }
}
