// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! PDF output through `printpdf`
//!
//! Layout coordinates are points from the top-left corner; PDF user space
//! starts bottom-left and `printpdf` takes millimetres, so every operation
//! is flipped and converted here. Only the builtin Helvetica and Courier
//! faces are used, which limits text to printable ASCII.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect,
};
use tracing::{debug, info};

use crate::canvas::{DrawOp, LaidOutDocument, Page};
use crate::error::RenderError;
use crate::text::FontFace;
use crate::theme::Rgb;

const LAYER: &str = "Layer 1";

/// Convert points to millimetres
#[must_use]
pub fn pt_to_mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

/// Replace anything outside printable ASCII with `?`
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { '?' })
        .collect()
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        let builtin = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| RenderError::Pdf(e.to_string()))
        };
        Ok(Self {
            regular: builtin(BuiltinFont::Helvetica)?,
            bold: builtin(BuiltinFont::HelveticaBold)?,
            oblique: builtin(BuiltinFont::HelveticaOblique)?,
            mono: builtin(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Oblique => &self.oblique,
            FontFace::Mono => &self.mono,
        }
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(rgb.r, rgb.g, rgb.b, None))
}

/// Build the in-memory PDF for a laid-out document
///
/// # Errors
///
/// Returns [`RenderError::Pdf`] if a font cannot be registered.
pub fn build_pdf(
    document: &LaidOutDocument,
    title: &str,
) -> Result<PdfDocumentReference, RenderError> {
    let geometry = document.geometry;
    let width = pt_to_mm(geometry.width);
    let height = pt_to_mm(geometry.height);

    let (doc, first_page, first_layer) =
        PdfDocument::new(sanitize(title), width, height, LAYER.to_string());
    let fonts = Fonts::load(&doc)?;

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, LAYER);
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, geometry.height, &fonts);
    }

    debug!(pages = document.page_count(), "Built PDF document");
    Ok(doc)
}

fn draw_page(layer: &PdfLayerReference, page: &Page, page_height: f32, fonts: &Fonts) {
    let flip = |y: f32| pt_to_mm(page_height - y);

    for op in &page.ops {
        match op {
            DrawOp::Fill {
                x,
                y,
                width,
                height,
                color: fill,
            } => {
                layer.set_fill_color(color(*fill));
                layer.add_rect(Rect::new(
                    pt_to_mm(*x),
                    flip(y + height),
                    pt_to_mm(x + width),
                    flip(*y),
                ));
            }
            DrawOp::Text {
                x,
                baseline,
                text,
                style,
                color: ink,
                ..
            } => {
                layer.set_fill_color(color(*ink));
                layer.use_text(
                    sanitize(text),
                    style.size,
                    pt_to_mm(*x),
                    flip(*baseline),
                    fonts.get(style.face),
                );
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
                color: stroke,
            } => {
                layer.set_outline_color(color(*stroke));
                layer.set_outline_thickness(*thickness);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(pt_to_mm(*x1), flip(*y)), false),
                        (Point::new(pt_to_mm(*x2), flip(*y)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

/// Sibling path the document is written to before being renamed into place
#[must_use]
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

/// Write a laid-out document to `path`
///
/// The parent directory is created if needed. Bytes go to a `.part` file
/// that is renamed onto `path` only after a successful save; on failure it
/// is removed and `path` is left untouched.
///
/// # Errors
///
/// Returns [`RenderError::Output`] for filesystem failures and
/// [`RenderError::Pdf`] if the PDF cannot be serialized.
pub fn write_pdf(document: &LaidOutDocument, title: &str, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::Output {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let partial = partial_path(path);
    let result = save(document, title, &partial).and_then(|()| {
        fs::rename(&partial, path).map_err(|source| RenderError::Output {
            path: path.to_path_buf(),
            source,
        })
    });

    match result {
        Ok(()) => {
            info!(path = %path.display(), pages = document.page_count(), "Wrote PDF");
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&partial);
            Err(e)
        }
    }
}

fn save(document: &LaidOutDocument, title: &str, partial: &Path) -> Result<(), RenderError> {
    let pdf = build_pdf(document, title)?;
    let file = File::create(partial).map_err(|source| RenderError::Output {
        path: partial.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    pdf.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer.flush().map_err(|source| RenderError::Output {
        path: partial.to_path_buf(),
        source,
    })
}
