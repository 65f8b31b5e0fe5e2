// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Footer recognizer — reads a footer from a rendered page image.

use footsplit_core::{CharWhitelist, FooterRecord, SplitConfig, collapse_whitespace};
use image::{DynamicImage, GrayImage};
use tracing::{debug, instrument, warn};

use super::region::FooterRegion;
use crate::image::normalizer::ImageNormalizer;
use crate::image::processor::ImageProcessor;
use crate::ocr::{RecognitionRequest, TextRecognizer};

/// Crops the footer strip, normalizes it, and runs OCR with a retry on a
/// second preprocessing chain when the first read is too short.
///
/// Never fails: an OCR error on a page reads as an empty string.
pub struct FooterRecognizer<'a> {
    ocr: &'a dyn TextRecognizer,
    normalizer: ImageNormalizer,
    region: FooterRegion,
    whitelist: CharWhitelist,
    min_meaningful_chars: usize,
}

impl<'a> FooterRecognizer<'a> {
    pub fn new(ocr: &'a dyn TextRecognizer, config: &SplitConfig) -> Self {
        Self {
            ocr,
            normalizer: ImageNormalizer::from_config(config),
            region: FooterRegion::new(config.ocr_region_top),
            whitelist: config.char_whitelist.clone(),
            min_meaningful_chars: config.min_meaningful_chars,
        }
    }

    #[instrument(skip(self, page), fields(width = page.width(), height = page.height()))]
    pub fn recognize_page(&self, page_number: u32, page: &DynamicImage) -> FooterRecord {
        let (top, rows) = self.region.pixel_rows(page.height());
        let strip = ImageProcessor::from_dynamic(page).crop_rows(top, rows).into_luma();

        let primary = self.normalizer.normalize(&strip);
        let text = self.read(&primary, Some(self.whitelist.clone()));
        if text.chars().count() > self.min_meaningful_chars {
            return FooterRecord::new(page_number, text);
        }

        debug!(page_number, primary = %text, "Primary read too short, retrying with adaptive threshold");
        let secondary = self.normalizer.normalize_adaptive(&strip);
        FooterRecord::new(page_number, self.read(&secondary, None))
    }

    fn read(&self, image: &GrayImage, whitelist: Option<CharWhitelist>) -> String {
        let request = RecognitionRequest::single_line(whitelist);
        match self.ocr.recognize(image, &request) {
            Ok(text) => collapse_whitespace(&text),
            Err(err) => {
                warn!(%err, "OCR call failed, reading as empty");
                String::new()
            }
        }
    }
}
