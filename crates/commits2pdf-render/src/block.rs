// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! One commit, wrapped and ready to draw
//!
//! A [`CommitBlock`] holds the wrapped lines of the four parts of a commit
//! (info line, title, description, diff link) together with their styles.
//! It can report its height two ways: [`CommitBlock::measured_height`] from
//! the wrapped lines, and [`CommitBlock::estimated_height`] from raw
//! character counts.

use std::ops::ControlFlow;

use commits2pdf_git::CommitRecord;

use crate::canvas::{DrawOp, PageGeometry, Surface, TextRole, centered_x};
use crate::text::{FontFace, TextStyle, chars_for_divisor, wrap, wrap_description};
use crate::theme::Appearance;

/// Gap between the diff link and the divider
pub const DIVIDER_OFFSET: f32 = 6.0;

/// Space below the divider before the next block
pub const BLOCK_GAP: f32 = 18.0;

/// Divider stroke width
pub const DIVIDER_THICKNESS: f32 = 0.5;

/// Trial overflow limit after each part, as a fraction of page height
pub const PART_THRESHOLD: f32 = 0.95;

/// Trial overflow limit after the divider, as a fraction of page height
pub const DIVIDER_THRESHOLD: f32 = 0.97;

/// Estimated heights are padded by this factor before comparing to free space
pub const ESTIMATE_SAFETY: f32 = 1.2;

// ============================================================================
// Parts
// ============================================================================

/// The four parts of a commit block, in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// `<short> | By <name> (<email>) | At <date>`
    Info,
    /// First message line
    Title,
    /// Remaining message lines
    Description,
    /// `View diff: <url>`
    DiffLink,
}

impl Part {
    /// Every part in drawing order
    pub const ALL: [Part; 4] = [Part::Info, Part::Title, Part::Description, Part::DiffLink];

    /// Unscaled font
    #[must_use]
    pub fn style(self) -> TextStyle {
        match self {
            Self::Info => TextStyle::new(FontFace::Mono, 10.0),
            Self::Title => TextStyle::new(FontFace::Bold, 14.0),
            Self::Description | Self::DiffLink => TextStyle::new(FontFace::Regular, 11.0),
        }
    }

    /// Unscaled wrap divisor: content width / divisor = characters per line
    #[must_use]
    pub fn divisor(self) -> f32 {
        match self {
            Self::Info => 6.5,
            Self::Title => 8.0,
            Self::Description | Self::DiffLink => 5.5,
        }
    }

    /// Unscaled space after the part
    #[must_use]
    pub fn gap_after(self) -> f32 {
        match self {
            Self::Info | Self::Title => 4.0,
            Self::Description => 6.0,
            Self::DiffLink => 0.0,
        }
    }

    fn role(self) -> TextRole {
        match self {
            Self::Info => TextRole::Info,
            Self::Title => TextRole::Title,
            Self::Description => TextRole::Description,
            Self::DiffLink => TextRole::DiffLink,
        }
    }
}

/// Why a trial drawing stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// A part pushed the cursor past the part threshold
    Part(Part),
    /// Every part fit but the divider and gap did not
    DividerOnly,
}

/// How a block should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DrawMode {
    /// Abort at the trial thresholds
    pub checkpoints: bool,
    /// Draw the trailing divider
    pub divider: bool,
}

impl DrawMode {
    pub(crate) const TRIAL: Self = Self {
        checkpoints: true,
        divider: true,
    };

    pub(crate) const PLAIN: Self = Self {
        checkpoints: false,
        divider: true,
    };
}

// ============================================================================
// Commit Block
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct PartLines {
    part: Part,
    style: TextStyle,
    chars: usize,
    lines: Vec<String>,
}

/// A commit's wrapped lines and styles for one render
#[derive(Debug, Clone, PartialEq)]
pub struct CommitBlock {
    short_hash: String,
    scale: f32,
    parts: Vec<PartLines>,
}

impl CommitBlock {
    /// Wrap `commit` for `geometry`, with every font and divisor multiplied by `scale`
    #[must_use]
    pub fn new(commit: &CommitRecord, geometry: &PageGeometry, scale: f32) -> Self {
        let width = geometry.content_width();
        let diff_link = format!("View diff: {}", commit.diff_url());

        let parts = Part::ALL
            .iter()
            .map(|&part| {
                let columns = chars_for_divisor(width, part.divisor() * scale);
                let (chars, lines) = match part {
                    Part::Info => {
                        let info = commit.info_line();
                        (info.chars().count(), wrap(&info, columns))
                    }
                    Part::Title => (commit.title().chars().count(), wrap(commit.title(), columns)),
                    Part::Description => (
                        commit.description().chars().count(),
                        wrap_description(commit.description(), columns),
                    ),
                    Part::DiffLink => (diff_link.chars().count(), wrap(&diff_link, columns)),
                };
                PartLines {
                    part,
                    style: part.style().scaled(scale),
                    chars,
                    lines,
                }
            })
            .collect();

        Self {
            short_hash: commit.short_hash().to_string(),
            scale,
            parts,
        }
    }

    /// Short hash of the commit
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.short_hash
    }

    /// Wrapped lines of one part
    #[must_use]
    pub fn lines(&self, part: Part) -> &[String] {
        self.parts
            .iter()
            .find(|p| p.part == part)
            .map(|p| p.lines.as_slice())
            .unwrap_or_default()
    }

    /// Tallest single line in the block
    #[must_use]
    pub fn tallest_line(&self) -> f32 {
        self.parts
            .iter()
            .filter(|p| !p.lines.is_empty())
            .map(|p| p.style.line_height())
            .fold(0.0, f32::max)
    }

    /// Height of the block as drawn, divider and trailing gap included
    #[must_use]
    pub fn measured_height(&self) -> f32 {
        let body: f32 = self
            .parts
            .iter()
            .map(|p| p.lines.len() as f32 * p.style.line_height() + p.part.gap_after() * self.scale)
            .sum();
        body + DIVIDER_OFFSET + BLOCK_GAP
    }

    /// Character-count estimate of the block height
    ///
    /// Each part contributes `ceil(chars * size / 2 / page_width)` lines of
    /// `size` points. This ignores word boundaries and glyph widths.
    #[must_use]
    pub fn estimated_height(&self, geometry: &PageGeometry) -> f32 {
        self.parts
            .iter()
            .map(|p| {
                let size = p.style.size;
                let lines = (p.chars as f32 * (size / 2.0) / geometry.width).ceil();
                lines * size
            })
            .sum()
    }

    /// Draw the block at the surface's cursor
    ///
    /// With checkpoints enabled, drawing stops as soon as the cursor passes
    /// the part or divider threshold and the reason is returned.
    pub(crate) fn draw<S: Surface>(
        &self,
        surface: &mut S,
        geometry: &PageGeometry,
        appearance: &Appearance,
        mode: DrawMode,
    ) -> ControlFlow<Overflow> {
        for part in &self.parts {
            let color = if part.part == Part::DiffLink {
                appearance.diff_link
            } else {
                appearance.text
            };
            for line in &part.lines {
                let height = part.style.line_height();
                surface.reserve(height);
                let x = if part.part == Part::Info {
                    centered_x(geometry, &part.style, line)
                } else {
                    geometry.margin
                };
                let baseline = surface.y() + part.style.size;
                surface.push(DrawOp::Text {
                    x,
                    baseline,
                    text: line.clone(),
                    style: part.style,
                    color,
                    role: part.part.role(),
                });
                surface.advance(height);
            }
            surface.advance(part.part.gap_after() * self.scale);

            if mode.checkpoints && surface.y() > geometry.height * PART_THRESHOLD {
                return ControlFlow::Break(Overflow::Part(part.part));
            }
        }

        if mode.divider {
            let y = surface.y() + DIVIDER_OFFSET;
            surface.push(DrawOp::Rule {
                x1: geometry.margin,
                x2: geometry.width - geometry.margin,
                y,
                thickness: DIVIDER_THICKNESS,
                color: appearance.text,
            });
        }
        surface.advance(DIVIDER_OFFSET + BLOCK_GAP);

        if mode.checkpoints && surface.y() > geometry.height * DIVIDER_THRESHOLD {
            return ControlFlow::Break(Overflow::DividerOnly);
        }
        ControlFlow::Continue(())
    }
}
