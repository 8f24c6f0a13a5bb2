// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fonts, text styles and fixed-width word wrapping
//!
//! Wrapping counts characters, not glyph widths: every field is wrapped to
//! `content_width / divisor` characters, where the divisor roughly matches
//! the average advance of the field's font at its size.

/// Vertical distance between baselines, as a multiple of the font size
pub const LINE_SPACING: f32 = 1.35;

/// One of the PDF builtin font faces used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Helvetica
    Regular,
    /// Helvetica Bold
    Bold,
    /// Helvetica Oblique
    Oblique,
    /// Courier
    Mono,
}

impl FontFace {
    /// Rough average glyph advance as a fraction of the font size
    #[must_use]
    pub fn average_advance(self) -> f32 {
        match self {
            Self::Regular | Self::Oblique => 0.5,
            Self::Bold => 0.55,
            Self::Mono => 0.6,
        }
    }
}

/// Face and size of a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font face
    pub face: FontFace,
    /// Font size in points
    pub size: f32,
}

impl TextStyle {
    /// Create a style
    #[must_use]
    pub const fn new(face: FontFace, size: f32) -> Self {
        Self { face, size }
    }

    /// The same face at `factor` times the size
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            size: self.size * factor,
            ..self
        }
    }

    /// Baseline-to-baseline distance
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.size * LINE_SPACING
    }

    /// Approximate rendered width of `text`
    #[must_use]
    pub fn estimate_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * self.face.average_advance()
    }

    /// How many characters of this style fit in `width` points
    #[must_use]
    pub fn chars_per_line(&self, width: f32) -> usize {
        chars_for_divisor(width, self.size * self.face.average_advance())
    }
}

/// Characters per line for a content width and a per-field divisor
#[must_use]
pub fn chars_for_divisor(width: f32, divisor: f32) -> usize {
    if divisor <= 0.0 || !width.is_finite() {
        return 1;
    }
    ((width / divisor).floor() as usize).max(1)
}

/// Greedy word wrap to at most `width` characters per line
///
/// Runs of whitespace collapse to one space, and words longer than a line
/// are split. Blank input yields no lines.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();

        if current_len > 0 {
            if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        while word_len > width {
            let split = word
                .char_indices()
                .nth(width)
                .map_or(word.len(), |(index, _)| index);
            lines.push(word[..split].to_string());
            word = &word[split..];
            word_len -= width;
        }

        current.push_str(word);
        current_len = word_len;
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Wrap a commit description line by line
///
/// Each original line is wrapped on its own; a blank padding line follows
/// any original line that needed more than one output line.
#[must_use]
pub fn wrap_description(description: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for original in description.lines() {
        let wrapped = wrap(original, width);
        let spilled = wrapped.len() > 1;
        lines.extend(wrapped);
        if spilled {
            lines.push(String::new());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_wrap_short_text_is_one_line() {
        assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_on_word_boundaries() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(
            wrap("https://example.com/abcdef", 10),
            vec!["https://ex", "ample.com/", "abcdef"]
        );
    }

    #[test]
    fn test_wrap_long_word_after_text() {
        assert_eq!(wrap("see 0123456789abc", 8), vec!["see", "01234567", "89abc"]);
    }

    #[test]
    fn test_wrap_blank_input() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   \t ", 10).is_empty());
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        assert_eq!(wrap("a   b\tc", 10), vec!["a b c"]);
    }

    #[test]
    fn test_wrap_multibyte_characters() {
        assert_eq!(wrap("ééééé", 2), vec!["éé", "éé", "é"]);
    }

    #[test]
    fn test_wrap_zero_width_is_treated_as_one() {
        assert_eq!(wrap("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_description_pads_after_spilled_lines() {
        let description = "short line\nthis line is long enough to wrap\nend";
        assert_eq!(
            wrap_description(description, 16),
            vec![
                "short line",
                "this line is",
                "long enough to",
                "wrap",
                "",
                "end",
            ]
        );
    }

    #[test]
    fn test_description_drops_blank_lines() {
        assert_eq!(
            wrap_description("\nBody text.\n\nMore.", 40),
            vec!["Body text.", "More."]
        );
    }

    #[test]
    fn test_chars_for_divisor() {
        assert_eq!(chars_for_divisor(512.0, 5.5), 93);
        assert_eq!(chars_for_divisor(512.0, 8.0), 64);
        assert_eq!(chars_for_divisor(1.0, 8.0), 1);
        assert_eq!(chars_for_divisor(512.0, 0.0), 1);
    }

    #[test]
    fn test_style_metrics() {
        let style = TextStyle::new(FontFace::Mono, 10.0);
        assert!((style.line_height() - 13.5).abs() < 1e-4);
        assert!((style.estimate_width("abcde") - 30.0).abs() < 1e-4);
        assert!((style.scaled(2.0).size - 20.0).abs() < 1e-4);
        assert_eq!(style.chars_per_line(61.0), 10);
    }
}
