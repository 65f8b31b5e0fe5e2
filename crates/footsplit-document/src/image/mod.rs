// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — footer strip preprocessing ahead of OCR.

pub mod normalizer;
pub mod processor;
pub mod threshold;

pub use normalizer::ImageNormalizer;
pub use processor::ImageProcessor;
pub use threshold::AdaptiveParams;
