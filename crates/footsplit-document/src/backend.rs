// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recognition backends — construct the rasterizer and OCR engine on demand,
// so documents with a text layer never load native libraries or models.

use std::path::PathBuf;

use footsplit_core::error::Result;
#[cfg(not(all(feature = "render", feature = "ocr")))]
use footsplit_core::error::SplitError;
use footsplit_core::{CharWhitelist, SplitConfig};

use crate::ocr::TextRecognizer;
use crate::render::PageRasterizer;

/// Builds the collaborators of the recognition path.
pub trait RecognitionBackend {
    fn rasterizer(&self) -> Result<Box<dyn PageRasterizer>>;
    fn recognizer(&self) -> Result<Box<dyn TextRecognizer>>;
}

/// PDFium for rendering and `ocrs` for recognition, as compiled in.
#[derive(Debug, Clone)]
pub struct NativeBackend {
    pub ocr_model_dir: Option<PathBuf>,
    pub whitelist: CharWhitelist,
}

impl NativeBackend {
    pub fn from_config(config: &SplitConfig) -> Self {
        Self {
            ocr_model_dir: config.ocr_model_dir.clone(),
            whitelist: config.char_whitelist.clone(),
        }
    }
}

impl RecognitionBackend for NativeBackend {
    #[cfg(feature = "render")]
    fn rasterizer(&self) -> Result<Box<dyn PageRasterizer>> {
        Ok(Box::new(crate::render::PdfiumRasterizer::new()?))
    }

    #[cfg(not(feature = "render"))]
    fn rasterizer(&self) -> Result<Box<dyn PageRasterizer>> {
        Err(SplitError::BackendUnavailable("page rendering"))
    }

    #[cfg(feature = "ocr")]
    fn recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        let config = crate::ocr::OcrConfig::from_optional_dir(self.ocr_model_dir.as_deref());
        Ok(Box::new(crate::ocr::OcrsRecognizer::new(
            &config,
            self.whitelist.clone(),
        )?))
    }

    #[cfg(not(feature = "ocr"))]
    fn recognizer(&self) -> Result<Box<dyn TextRecognizer>> {
        Err(SplitError::BackendUnavailable("OCR"))
    }
}
