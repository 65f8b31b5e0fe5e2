// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// footsplit-document — Footer detection and page-range splitting.
//
// Reads footers from the PDF text layer (lopdf), falls back to rendering
// (PDFium) and recognising (ocrs) every page when any page lacks footer text,
// then writes one PDF per run of pages sharing a footer.

pub mod backend;
pub mod footer;
pub mod image;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod render;
pub mod split;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the primary entry points so callers can use `footsplit_document::PdfReader` etc.
pub use backend::{NativeBackend, RecognitionBackend};
pub use footer::FooterDetector;
pub use image::normalizer::ImageNormalizer;
pub use pdf::reader::PdfReader;
pub use pipeline::{SplitReport, split_by_footer};
pub use split::{plan_parts, write_parts};
