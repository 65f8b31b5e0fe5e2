// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for footer detection and splitting.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Footer text detected on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterRecord {
    /// 1-indexed page number.
    pub page_number: u32,
    /// Normalised footer text; may be empty.
    pub footer_text: String,
}

impl FooterRecord {
    pub fn new(page_number: u32, footer_text: impl Into<String>) -> Self {
        Self {
            page_number,
            footer_text: footer_text.into(),
        }
    }
}

impl fmt::Display for FooterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.page_number, self.footer_text)
    }
}

/// Which extraction path produced a set of footer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// Every page had text in its footer region.
    Structured,
    /// At least one page lacked a text layer; every page was rasterised and
    /// recognised.
    Recognized,
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => f.write_str("structured"),
            Self::Recognized => f.write_str("recognized"),
        }
    }
}

/// Result of detecting footers across a whole document.
///
/// The mode is chosen once per document; there is no mixed variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterDetection {
    Structured(Vec<FooterRecord>),
    Recognized(Vec<FooterRecord>),
}

impl FooterDetection {
    pub fn mode(&self) -> DetectionMode {
        match self {
            Self::Structured(_) => DetectionMode::Structured,
            Self::Recognized(_) => DetectionMode::Recognized,
        }
    }

    pub fn records(&self) -> &[FooterRecord] {
        match self {
            Self::Structured(records) | Self::Recognized(records) => records,
        }
    }

    pub fn into_records(self) -> Vec<FooterRecord> {
        match self {
            Self::Structured(records) | Self::Recognized(records) => records,
        }
    }
}

/// A contiguous run of pages sharing one footer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPart {
    /// 1-based creation index, used in the output file name.
    pub index: usize,
    /// First page of the run (inclusive, 1-indexed).
    pub first_page: u32,
    /// Last page of the run (inclusive, 1-indexed).
    pub last_page: u32,
    /// The footer value shared by every page in the run.
    pub footer_text: String,
}

impl OutputPart {
    pub fn page_count(&self) -> u32 {
        self.last_page - self.first_page + 1
    }

    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.first_page..=self.last_page
    }
}

/// An output part that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenPart {
    pub part: OutputPart,
    pub path: PathBuf,
}

/// What to do when rasterisation or OCR infrastructure fails outright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Report the failure and continue with no footers (zero output parts).
    #[default]
    Degrade,
    /// Surface the failure as an error.
    Strict,
}

/// Expected layout of the region handed to the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Treat the whole image as a single line of text.
    SingleLine,
}

/// The characters an OCR engine is allowed to emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharWhitelist(String);

impl CharWhitelist {
    /// Letters, digits, `-`, `_`, `.` and space: the alphabet of document
    /// reference footers such as `INV-001` or `Batch_12.A`.
    pub const FOOTER_CHARS: &'static str =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_. ";

    pub fn new(chars: impl Into<String>) -> Self {
        Self(chars.into())
    }

    pub fn footer() -> Self {
        Self::new(Self::FOOTER_CHARS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CharWhitelist {
    fn default() -> Self {
        Self::footer()
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
