// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR seam — the recognition interface the footer recognizer calls, and the
// `ocrs` backend behind the "ocr" feature.

use footsplit_core::error::Result;
use footsplit_core::{CharWhitelist, SegmentationMode};
use image::GrayImage;

#[cfg(feature = "ocr")]
pub mod engine;

#[cfg(feature = "ocr")]
pub use engine::{OcrConfig, OcrsRecognizer};

/// How a single OCR call should read its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRequest {
    pub segmentation: SegmentationMode,
    /// `None` lets the engine emit any character.
    pub whitelist: Option<CharWhitelist>,
}

impl RecognitionRequest {
    pub fn single_line(whitelist: Option<CharWhitelist>) -> Self {
        Self {
            segmentation: SegmentationMode::SingleLine,
            whitelist,
        }
    }
}

/// Converts an image to text.
pub trait TextRecognizer {
    fn recognize(&self, image: &GrayImage, request: &RecognitionRequest) -> Result<String>;
}
