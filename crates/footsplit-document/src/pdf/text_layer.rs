// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text layer — collect positioned glyphs with `pdf-extract`, assemble them
// into words, then group words into lines and lines into blocks.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use footsplit_core::error::{Result, SplitError};
use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use serde::Serialize;
use tracing::{debug, warn};

use super::geometry::{PageGeometry, Rect};

/// Fraction of the font size above the baseline covered by a glyph box.
const ASCENT: f32 = 0.8;
/// Fraction of the font size below the baseline covered by a glyph box.
const DESCENT: f32 = 0.2;

/// A horizontal gap wider than this many font sizes ends a word.
const WORD_GAP_EMS: f32 = 0.1;
/// A horizontal gap wider than this many font sizes starts a new line
/// segment even on a shared baseline.
const COLUMN_GAP_EMS: f32 = 3.0;
/// Neighbouring runs whose sizes differ by more than this fraction are set
/// apart with a space.
const SIZE_CHANGE: f32 = 0.1;
/// Lines join a block when the vertical gap is at most this many line
/// heights.
const BLOCK_GAP_LINES: f32 = 1.0;

/// A word: consecutive glyphs on one baseline with no visible gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpan {
    pub text: String,
    /// Bounding box in top-left page coordinates.
    pub bbox: Rect,
    /// Baseline `y` in top-left page coordinates.
    pub baseline: f32,
    /// Effective font size in page units.
    pub font_size: f32,
}

/// A group of vertically adjacent lines, joined with `\n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub bbox: Rect,
    pub text: String,
}

// -- Glyph collection ---------------------------------------------------------

/// One shown glyph in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Glyph {
    text: String,
    x0: f32,
    x1: f32,
    baseline: f32,
    size: f32,
}

/// Glyphs of every page, keyed by 1-indexed page number.
pub(crate) type PageGlyphs = BTreeMap<u32, Vec<Glyph>>;

#[derive(Default)]
struct GlyphCollector {
    pages: PageGlyphs,
    current_page: Option<u32>,
}

impl OutputDev for GlyphCollector {
    fn begin_page(
        &mut self,
        page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        self.current_page = Some(page_num);
        self.pages.entry(page_num).or_default();
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        // `trm` maps text space to user space without the font size.
        let size = font_size * trm.m21.hypot(trm.m22);
        if !size.is_finite() || size <= 0.0 {
            return Ok(());
        }
        let advance = width * font_size * trm.m11.hypot(trm.m12);
        let Some(page) = self.current_page else {
            return Ok(());
        };
        self.pages.entry(page).or_default().push(Glyph {
            text: char.to_string(),
            x0: trm.m31 as f32,
            x1: (trm.m31 + advance) as f32,
            baseline: trm.m32 as f32,
            size: size as f32,
        });
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

/// Run every page's content stream through `pdf-extract` and collect the
/// glyphs it shows.
///
/// `pdf-extract` panics on some malformed content; a panic is reported as a
/// [`SplitError::TextLayer`] naming the page being read.
pub(crate) fn collect_glyphs(doc: &Document) -> Result<PageGlyphs> {
    let mut collector = GlyphCollector::default();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::output_doc(doc, &mut collector)
    }));
    let page = collector.current_page.unwrap_or(1);

    match outcome {
        Ok(Ok(())) => {
            debug!(pages = collector.pages.len(), "Text layer collected");
            Ok(collector.pages)
        }
        Ok(Err(err)) => {
            warn!(page, error = %err, "Text layer could not be read");
            Err(SplitError::TextLayer(format!("page {}: {}", page, err)))
        }
        Err(_) => {
            warn!(page, "Text layer interpretation panicked");
            Err(SplitError::TextLayer(format!(
                "page {}: content stream could not be interpreted",
                page
            )))
        }
    }
}

// -- Words --------------------------------------------------------------------

/// Assemble glyphs, in content order, into words in top-left page space.
///
/// A word ends at a whitespace glyph, a baseline change, a font size change,
/// a backwards step, or a horizontal gap wider than a tenth of an em.
pub(crate) fn page_spans(glyphs: &[Glyph], geometry: &PageGeometry) -> Vec<TextSpan> {
    let mut words: Vec<Glyph> = Vec::new();
    let mut open: Option<Glyph> = None;

    for glyph in glyphs {
        if glyph.text.trim().is_empty() {
            words.extend(open.take());
            continue;
        }
        match open.as_mut() {
            Some(word) if continues_word(word, glyph) => {
                word.text.push_str(&glyph.text);
                word.x1 = word.x1.max(glyph.x1);
            }
            _ => {
                words.extend(open.take());
                open = Some(glyph.clone());
            }
        }
    }
    words.extend(open);

    words
        .into_iter()
        .map(|word| {
            let (x0, top) = geometry.to_page_space(word.x0, word.baseline + ASCENT * word.size);
            let (x1, bottom) = geometry.to_page_space(word.x1, word.baseline - DESCENT * word.size);
            let (_, baseline) = geometry.to_page_space(word.x0, word.baseline);
            TextSpan {
                text: word.text,
                bbox: Rect::new(x0, top, x1, bottom),
                baseline,
                font_size: word.size,
            }
        })
        .collect()
}

fn continues_word(word: &Glyph, glyph: &Glyph) -> bool {
    let size = word.size.min(glyph.size);
    let gap = glyph.x0 - word.x1;
    (word.baseline - glyph.baseline).abs() <= 0.5 * size
        && !size_changes(word.size, glyph.size)
        && gap >= -0.5 * size
        && gap <= WORD_GAP_EMS * size
}

fn size_changes(a: f32, b: f32) -> bool {
    (a - b).abs() > SIZE_CHANGE * a.max(b)
}

// -- Layout -------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Line {
    bbox: Rect,
    baseline: f32,
    /// Size of the last word added, for spacing decisions.
    last_size: f32,
    /// Largest size on the line: its line height.
    font_size: f32,
    text: String,
}

/// Group words into lines (shared baseline, small horizontal gaps) and lines
/// into blocks (vertical gap of at most one line height, overlapping
/// horizontally).
///
/// Neighbouring words on a line are separated by a space when there is a
/// visible gap between them or their font sizes differ. Blocks are returned
/// top to bottom, then left to right.
pub fn group_blocks(mut spans: Vec<TextSpan>) -> Vec<TextBlock> {
    spans.sort_by(|a, b| {
        a.baseline
            .total_cmp(&b.baseline)
            .then(a.bbox.x0.total_cmp(&b.bbox.x0))
    });

    let mut lines: Vec<Line> = Vec::new();
    for span in spans {
        let joins = lines.last().is_some_and(|line| {
            let tolerance = 0.5 * line.last_size.min(span.font_size).max(1.0);
            (line.baseline - span.baseline).abs() <= tolerance
                && span.bbox.x0 - line.bbox.x1 <= COLUMN_GAP_EMS * span.font_size.max(1.0)
        });
        match lines.last_mut() {
            Some(line) if joins => {
                let gap = span.bbox.x0 - line.bbox.x1;
                let size = line.last_size.min(span.font_size);
                if gap > WORD_GAP_EMS * size || size_changes(line.last_size, span.font_size) {
                    line.text.push(' ');
                }
                line.text.push_str(&span.text);
                line.bbox = line.bbox.union(&span.bbox);
                line.last_size = span.font_size;
                line.font_size = line.font_size.max(span.font_size);
            }
            _ => lines.push(Line {
                bbox: span.bbox,
                baseline: span.baseline,
                last_size: span.font_size,
                font_size: span.font_size,
                text: span.text,
            }),
        }
    }

    lines.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0).then(a.bbox.x0.total_cmp(&b.bbox.x0)));

    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut block_sizes: Vec<f32> = Vec::new();
    for line in lines {
        let target = blocks.iter().zip(&block_sizes).rposition(|(block, size)| {
            let gap = line.bbox.y0 - block.bbox.y1;
            gap <= BLOCK_GAP_LINES * size.max(line.font_size)
                && block.bbox.overlaps_horizontally(&line.bbox)
        });
        match target {
            Some(idx) => {
                let block = &mut blocks[idx];
                block.text.push('\n');
                block.text.push_str(&line.text);
                block.bbox = block.bbox.union(&line.bbox);
                block_sizes[idx] = block_sizes[idx].max(line.font_size);
            }
            None => {
                blocks.push(TextBlock {
                    bbox: line.bbox,
                    text: line.text,
                });
                block_sizes.push(line.font_size);
            }
        }
    }

    blocks.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0).then(a.bbox.x0.total_cmp(&b.bbox.x0)));
    blocks
}
