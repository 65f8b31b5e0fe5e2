// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDFium-backed page rasterizer.

use std::path::Path;

use footsplit_core::error::{Result, SplitError};
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::{debug, info, instrument};

use super::{PageRasterizer, pixels_at_dpi};

/// Renders pages with a PDFium library bound at construction time.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind libpdfium from the working directory, else from the system
    /// library path.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|err| SplitError::Render(format!("failed to bind PDFium library: {}", err)))?;
        debug!("PDFium library bound");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn render_page(page: &PdfPage, dpi: u32) -> Result<DynamicImage> {
        let width = pixels_at_dpi(page.width().value, dpi);
        let height = pixels_at_dpi(page.height().value, dpi);
        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width as i32)
                    .set_target_height(height as i32)
                    .render_form_data(true)
                    .render_annotations(true),
            )
            .map_err(|err| SplitError::Render(format!("failed to render page: {}", err)))?;
        Ok(bitmap.as_image())
    }
}

impl PageRasterizer for PdfiumRasterizer {
    #[instrument(skip_all, fields(path = %path.display(), dpi = dpi))]
    fn render_pages(
        &self,
        path: &Path,
        dpi: u32,
        visit: &mut dyn FnMut(u32, DynamicImage) -> Result<()>,
    ) -> Result<u32> {
        let document = self.pdfium.load_pdf_from_file(path, None).map_err(|err| {
            SplitError::Render(format!("failed to load {}: {}", path.display(), err))
        })?;

        let mut rendered = 0u32;
        for (idx, page) in document.pages().iter().enumerate() {
            let page_number = idx as u32 + 1;
            let image = Self::render_page(&page, dpi)?;
            debug!(page_number, width = image.width(), height = image.height(), "Page rendered");
            visit(page_number, image)?;
            rendered = page_number;
        }

        info!(pages = rendered, "Rasterisation complete");
        Ok(rendered)
    }
}
