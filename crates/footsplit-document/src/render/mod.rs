// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterizer seam — renders document pages to bitmaps for the recognition
// path. The PDFium backend sits behind the "render" feature.

use std::path::Path;

use footsplit_core::error::Result;
use image::DynamicImage;

#[cfg(feature = "render")]
pub mod pdfium;

#[cfg(feature = "render")]
pub use pdfium::PdfiumRasterizer;

/// Renders every page of a document, in page order.
pub trait PageRasterizer {
    /// Render each page of `path` at `dpi` and hand it to `visit` together
    /// with its 1-based page number. Pages are rendered one at a time so only
    /// one bitmap is alive at once. Returns the number of pages rendered.
    fn render_pages(
        &self,
        path: &Path,
        dpi: u32,
        visit: &mut dyn FnMut(u32, DynamicImage) -> Result<()>,
    ) -> Result<u32>;
}

/// Pixel size of a page side measured in PDF points at `dpi`.
pub fn pixels_at_dpi(points: f32, dpi: u32) -> u32 {
    (points * dpi as f32 / 72.0).round().max(1.0) as u32
}
