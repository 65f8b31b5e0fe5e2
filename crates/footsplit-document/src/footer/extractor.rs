// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Structured footer extractor — reads footers straight from the text layer.

use footsplit_core::error::{Result, SplitError};
use footsplit_core::{FooterRecord, SplitConfig};
use tracing::{debug, instrument, warn};

use super::region::FooterRegion;
use crate::pdf::reader::PdfReader;
use crate::pdf::text_layer::TextBlock;

/// Picks the bottommost text block inside each page's footer region.
#[derive(Debug, Clone, Copy)]
pub struct StructuredFooterExtractor {
    region: FooterRegion,
}

impl StructuredFooterExtractor {
    pub fn new(region: FooterRegion) -> Self {
        Self { region }
    }

    pub fn from_config(config: &SplitConfig) -> Self {
        Self::new(FooterRegion::new(config.structured_region_top))
    }

    /// Footer text of one page (1-indexed), trimmed.
    ///
    /// Returns [`SplitError::NoStructuredText`] when no block intersects the
    /// region, or when the page's text layer cannot be interpreted.
    #[instrument(skip(self, reader))]
    pub fn extract_page(&self, reader: &PdfReader, page_number: u32) -> Result<String> {
        let geometry = reader.page_geometry(page_number)?;
        let rect = self.region.page_rect(&geometry);
        let blocks = match reader.text_blocks_in(page_number, &rect) {
            Ok(blocks) => blocks,
            Err(SplitError::TextLayer(reason)) => {
                warn!(page_number, %reason, "Unreadable text layer");
                return Err(SplitError::NoStructuredText { page: page_number });
            }
            Err(other) => return Err(other),
        };

        let footer = bottommost(&blocks)
            .map(|block| block.text.trim().to_string())
            .ok_or(SplitError::NoStructuredText { page: page_number })?;
        debug!(page_number, blocks = blocks.len(), footer = %footer, "Footer block selected");
        Ok(footer)
    }

    /// Footer records for every page in order. Stops at the first page
    /// without structured text and reports it as
    /// [`SplitError::NoStructuredText`].
    #[instrument(skip_all, fields(pages = reader.page_count()))]
    pub fn extract_all(&self, reader: &PdfReader) -> Result<Vec<FooterRecord>> {
        let page_count = reader.page_count() as u32;
        (1..=page_count)
            .map(|page| Ok(FooterRecord::new(page, self.extract_page(reader, page)?)))
            .collect()
    }
}

/// The block with the greatest top coordinate. Ties keep the earliest block.
fn bottommost(blocks: &[TextBlock]) -> Option<&TextBlock> {
    blocks
        .iter()
        .fold(None, |best: Option<&TextBlock>, block| match best {
            Some(current) if block.bbox.y0 <= current.bbox.y0 => Some(current),
            _ => Some(block),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::geometry::Rect;
    use crate::testing::{PageSpec, build_pdf};

    fn block(y0: f32, text: &str) -> TextBlock {
        TextBlock {
            bbox: Rect::new(0.0, y0, 100.0, y0 + 10.0),
            text: text.into(),
        }
    }

    fn extractor() -> StructuredFooterExtractor {
        StructuredFooterExtractor::from_config(&SplitConfig::default())
    }

    #[test]
    fn bottommost_prefers_greatest_top_and_first_on_ties() {
        let blocks = [block(720.0, "upper"), block(760.0, "lower"), block(760.0, "twin")];
        assert_eq!(bottommost(&blocks).map(|b| b.text.as_str()), Some("lower"));
        assert!(bottommost(&[]).is_none());
    }

    #[test]
    fn reads_trimmed_footer_per_page() {
        let bytes = build_pdf(&[
            PageSpec::letter().footer("  INV-001  "),
            PageSpec::letter().footer("INV-002"),
        ]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        let records = extractor().extract_all(&reader).unwrap();
        assert_eq!(
            records,
            vec![FooterRecord::new(1, "INV-001"), FooterRecord::new(2, "INV-002")]
        );
    }

    #[test]
    fn body_text_outside_region_is_ignored() {
        let bytes = build_pdf(&[PageSpec::letter().text_at(72.0, 400.0, 12.0, "Body only")]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert!(matches!(
            extractor().extract_page(&reader, 1),
            Err(SplitError::NoStructuredText { page: 1 })
        ));
    }

    #[test]
    fn picks_lowest_of_several_footer_lines() {
        let bytes = build_pdf(&[PageSpec::letter()
            .text_at(72.0, 60.0, 10.0, "Confidential")
            .text_at(72.0, 20.0, 10.0, "DOC-7")]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(extractor().extract_page(&reader, 1).unwrap(), "DOC-7");
    }

    #[test]
    fn block_straddling_region_edge_counts() {
        // Baseline 80pt above the bottom: the glyph box spans 704..714 in
        // top-left space and touches the 712.8 edge.
        let bytes = build_pdf(&[PageSpec::letter().text_at(72.0, 80.0, 10.0, "EDGE-1")]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(extractor().extract_page(&reader, 1).unwrap(), "EDGE-1");
    }

    #[test]
    fn first_page_without_text_stops_extraction() {
        let bytes = build_pdf(&[
            PageSpec::letter().footer("A-1"),
            PageSpec::letter(),
            PageSpec::letter().footer("A-1"),
        ]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert!(matches!(
            extractor().extract_all(&reader),
            Err(SplitError::NoStructuredText { page: 2 })
        ));
    }

    #[test]
    fn undecodable_content_stream_counts_as_missing_text() {
        let bytes = build_pdf(&[
            PageSpec::letter().footer("A-1"),
            PageSpec::letter().footer("A-1").corrupt_contents(),
        ]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert!(matches!(
            extractor().extract_all(&reader),
            Err(SplitError::NoStructuredText { .. })
        ));
    }

    #[test]
    fn side_by_side_footer_runs_keep_a_space() {
        let bytes = build_pdf(&[PageSpec::letter()
            .text_at(72.0, 30.0, 10.0, "Page 1")
            .text_at(105.0, 30.0, 16.0, "INV-001")]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(extractor().extract_page(&reader, 1).unwrap(), "Page 1 INV-001");
    }
}
