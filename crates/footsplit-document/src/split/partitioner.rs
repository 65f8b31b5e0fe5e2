// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Partitioner — turns the ordered footer list into contiguous output parts.

use footsplit_core::error::{Result, SplitError};
use footsplit_core::{FooterRecord, OutputPart, SplitConfig, WrittenPart};
use tracing::{info, instrument};

use crate::pdf::reader::PdfReader;

/// Plan one part per maximal run of pages with identical footer text.
///
/// `records` must hold page `k` at index `k - 1`. Anything else is an
/// [`SplitError::InvariantViolation`]. An empty list plans zero parts.
/// Footers compare by exact string equality.
pub fn plan_parts(records: &[FooterRecord]) -> Result<Vec<OutputPart>> {
    for (idx, record) in records.iter().enumerate() {
        let expected = idx as u32 + 1;
        if record.page_number != expected {
            return Err(SplitError::InvariantViolation(format!(
                "expected page {} at position {}, found page {}",
                expected, idx, record.page_number
            )));
        }
    }

    let mut parts: Vec<OutputPart> = Vec::new();
    for record in records {
        match parts.last_mut() {
            Some(open) if open.footer_text == record.footer_text => {
                open.last_page = record.page_number;
            }
            _ => parts.push(OutputPart {
                index: parts.len() + 1,
                first_page: record.page_number,
                last_page: record.page_number,
                footer_text: record.footer_text.clone(),
            }),
        }
    }
    Ok(parts)
}

/// Write each planned part to the path the configuration names for it,
/// creating the output directory if needed. Returns the parts in creation
/// order.
#[instrument(skip_all, fields(parts = parts.len()))]
pub fn write_parts(
    reader: &PdfReader,
    parts: &[OutputPart],
    config: &SplitConfig,
) -> Result<Vec<WrittenPart>> {
    if !parts.is_empty() {
        std::fs::create_dir_all(&config.output_dir)?;
    }

    parts
        .iter()
        .map(|part| {
            let path = config.part_path(part.index);
            reader.write_page_range(part.first_page, part.last_page, &path)?;
            info!(
                index = part.index,
                first_page = part.first_page,
                last_page = part.last_page,
                path = %path.display(),
                "Part written"
            );
            Ok(WrittenPart {
                part: part.clone(),
                path,
            })
        })
        .collect()
}
