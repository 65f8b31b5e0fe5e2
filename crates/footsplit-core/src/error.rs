// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for footsplit.

use thiserror::Error;

/// Top-level error type for all footsplit operations.
#[derive(Debug, Error)]
pub enum SplitError {
    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("text layer could not be read: {0}")]
    TextLayer(String),

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Recognition pipeline --
    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("{0} support was not compiled into this build")]
    BackendUnavailable(&'static str),

    /// A page has no structured text inside its footer region. Raised per
    /// page, acted on per document: the detector switches to recognition.
    #[error("no structured text in the footer region of page {page}")]
    NoStructuredText { page: u32 },

    /// Rasterisation or OCR infrastructure failed for the whole document.
    #[error("footer recognition pipeline failed: {0}")]
    PipelineFailure(String),

    /// The footer record list is not a dense 1..N page sequence.
    #[error("footer records are not a dense page sequence: {0}")]
    InvariantViolation(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SplitError>;
