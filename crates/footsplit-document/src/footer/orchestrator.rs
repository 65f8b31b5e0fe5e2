// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Footer detection orchestrator — chooses structured extraction or
// recognition once per document and produces one record per page.

use std::path::Path;

use footsplit_core::error::{Result, SplitError};
use footsplit_core::{FailurePolicy, FooterDetection, FooterRecord, SplitConfig};
use tracing::{error, info, instrument};

use super::extractor::StructuredFooterExtractor;
use super::recognizer::FooterRecognizer;
use crate::backend::RecognitionBackend;
use crate::pdf::reader::PdfReader;

/// What [`FooterDetector::detect_footers`] determined for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionOutcome {
    pub detection: FooterDetection,
    /// Why recognition failed, when the failure was degraded to an empty
    /// recognized list.
    pub pipeline_failure: Option<String>,
}

/// Detects the footer of every page of a document.
///
/// Structured extraction is tried first for all pages. A single page without
/// footer text discards that work and every page is rendered and recognized
/// instead; the two modes never mix within one document.
pub struct FooterDetector<'a> {
    config: &'a SplitConfig,
    backend: &'a dyn RecognitionBackend,
}

impl<'a> FooterDetector<'a> {
    pub fn new(config: &'a SplitConfig, backend: &'a dyn RecognitionBackend) -> Self {
        Self { config, backend }
    }

    /// Detect footers, applying the configured [`FailurePolicy`] to a
    /// recognition pipeline failure: `Degrade` yields an empty recognized
    /// list and records the reason, `Strict` returns
    /// [`SplitError::PipelineFailure`].
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn detect_footers(&self, path: &Path) -> Result<DetectionOutcome> {
        match self.detect(path) {
            Ok(detection) => Ok(DetectionOutcome {
                detection,
                pipeline_failure: None,
            }),
            Err(SplitError::PipelineFailure(reason))
                if self.config.failure_policy == FailurePolicy::Degrade =>
            {
                error!(%reason, "Footer recognition failed, no footers determined");
                Ok(DetectionOutcome {
                    detection: FooterDetection::Recognized(Vec::new()),
                    pipeline_failure: Some(reason),
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Any failure of the recognition path comes back as
    /// [`SplitError::PipelineFailure`].
    fn detect(&self, path: &Path) -> Result<FooterDetection> {
        let structured = {
            let reader = PdfReader::open(path)?;
            StructuredFooterExtractor::from_config(self.config).extract_all(&reader)
        };

        match structured {
            Ok(records) => {
                info!(pages = records.len(), "Footers read from the text layer");
                Ok(FooterDetection::Structured(records))
            }
            Err(SplitError::NoStructuredText { page }) => {
                info!(page, "No footer text on page, recognizing every page instead");
                self.recognize_all(path)
                    .map(FooterDetection::Recognized)
                    .map_err(|err| match err {
                        SplitError::PipelineFailure(_) => err,
                        other => SplitError::PipelineFailure(other.to_string()),
                    })
            }
            Err(other) => Err(other),
        }
    }

    fn recognize_all(&self, path: &Path) -> Result<Vec<FooterRecord>> {
        let rasterizer = self.backend.rasterizer()?;
        let ocr = self.backend.recognizer()?;
        let recognizer = FooterRecognizer::new(ocr.as_ref(), self.config);

        let mut records = Vec::new();
        rasterizer.render_pages(path, self.config.render_dpi, &mut |page_number, image| {
            let record = recognizer.recognize_page(page_number, &image);
            info!(page_number, footer = %record.footer_text, "Footer recognized");
            records.push(record);
            Ok(())
        })?;
        Ok(records)
    }
}
