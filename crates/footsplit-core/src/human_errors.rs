// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operator-facing error messages.
//
// Every technical error is mapped to a short summary and a concrete next step.

use crate::error::SplitError;

/// A readable error with a plain summary and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
}

/// Convert a `SplitError` into a `HumanError`.
pub fn humanize_error(err: &SplitError) -> HumanError {
    match err {
        SplitError::Pdf(detail) => HumanError {
            message: "The PDF could not be read or written.".into(),
            suggestion: format!(
                "Check that the file is a valid, unencrypted PDF and that the output directory is writable. ({detail})"
            ),
        },

        SplitError::TextLayer(_) => HumanError {
            message: "The page text could not be interpreted.".into(),
            suggestion: "The footer will be recognised from rendered pages instead; no action needed unless that also fails.".into(),
        },

        SplitError::Image(_) => HumanError {
            message: "A rendered page could not be processed.".into(),
            suggestion: "Try a lower --dpi value; very large pages can exceed image limits.".into(),
        },

        SplitError::Ocr(detail) => {
            if detail.contains("model") {
                HumanError {
                    message: "The OCR models are missing.".into(),
                    suggestion: "Download text-detection.rten and text-recognition.rten (running `ocrs-cli` once caches them) or pass --ocr-models <DIR>.".into(),
                }
            } else {
                HumanError {
                    message: "Text recognition failed.".into(),
                    suggestion: "Try a higher --dpi value or check the scan quality of the footer area.".into(),
                }
            }
        }

        SplitError::Render(detail) => {
            if detail.to_lowercase().contains("library") {
                HumanError {
                    message: "The PDFium library could not be loaded.".into(),
                    suggestion: "Install libpdfium system-wide or place it in the working directory.".into(),
                }
            } else {
                HumanError {
                    message: "Pages could not be rendered for recognition.".into(),
                    suggestion: "The PDF may be damaged. Try re-saving it with another PDF tool.".into(),
                }
            }
        }

        SplitError::BackendUnavailable(name) => HumanError {
            message: format!("This build has no {name} support."),
            suggestion: "Rebuild with the default features enabled (`render` and `ocr`).".into(),
        },

        SplitError::NoStructuredText { page } => HumanError {
            message: format!("Page {page} has no selectable footer text."),
            suggestion: "Footers will be recognised from rendered pages instead.".into(),
        },

        SplitError::PipelineFailure(_) => HumanError {
            message: "Footers could not be recognised on this document.".into(),
            suggestion: "Check that PDFium and the OCR models are installed; run with RUST_LOG=debug for details.".into(),
        },

        SplitError::InvariantViolation(detail) => HumanError {
            message: "Internal error: footer records are out of order.".into(),
            suggestion: format!("Please report this with the input document. ({detail})"),
        },

        SplitError::Config(detail) => HumanError {
            message: "The configuration is invalid.".into(),
            suggestion: detail.clone(),
        },

        SplitError::Io(io_err) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check the path and permissions. ({io_err})"),
        },

        SplitError::Serialization(_) => HumanError {
            message: "The configuration file is not valid JSON.".into(),
            suggestion: "Fix the syntax of the --config file, or remove it to use defaults.".into(),
        },
    }
}
