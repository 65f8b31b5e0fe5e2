// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Footer detection — structured extraction from the text layer, recognition
// from rendered pages, and the per-document choice between them.

pub mod extractor;
pub mod orchestrator;
pub mod recognizer;
pub mod region;

pub use extractor::StructuredFooterExtractor;
pub use orchestrator::{DetectionOutcome, FooterDetector};
pub use recognizer::FooterRecognizer;
pub use region::FooterRegion;
