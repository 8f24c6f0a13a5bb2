// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Colour presets for the light and dark report appearance

/// An RGB colour with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Rgb {
    /// Create a colour
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Page background, body text and link colours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Full-page background fill
    pub background: Rgb,
    /// Body text, footer and divider colour
    pub text: Rgb,
    /// Colour of the diff link
    pub diff_link: Rgb,
}

impl Appearance {
    /// Black on white
    pub const LIGHT: Self = Self {
        background: Rgb::new(1.0, 1.0, 1.0),
        text: Rgb::new(0.0, 0.0, 0.0),
        diff_link: Rgb::new(0.0, 0.0, 1.0),
    };

    /// Light grey on dark grey
    pub const DARK: Self = Self {
        background: Rgb::new(0.2, 0.2, 0.2),
        text: Rgb::new(0.9, 0.9, 0.9),
        diff_link: Rgb::new(0.6, 0.6, 1.0),
    };

    /// Pick the dark or light preset
    #[must_use]
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { Self::DARK } else { Self::LIGHT }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::LIGHT
    }
}
