// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end split — detect footers, plan parts, write them.

use std::path::{Path, PathBuf};

use footsplit_core::error::Result;
use footsplit_core::{DetectionMode, FooterRecord, SplitConfig, WrittenPart};
use serde::Serialize;
use tracing::{info, instrument};

use crate::backend::RecognitionBackend;
use crate::footer::FooterDetector;
use crate::pdf::reader::PdfReader;
use crate::split::{plan_parts, write_parts};

/// Everything one split run found and produced.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub mode: DetectionMode,
    /// One record per page, or empty when no footers could be determined.
    pub records: Vec<FooterRecord>,
    /// Parts in creation order with their target paths.
    pub parts: Vec<WrittenPart>,
    /// False for a dry run: `parts` names the files that would be written.
    pub written: bool,
    /// Set when recognition failed and the failure was degraded to an empty
    /// result.
    pub pipeline_failure: Option<String>,
}

impl SplitReport {
    pub fn part_paths(&self) -> Vec<&Path> {
        self.parts.iter().map(|p| p.path.as_path()).collect()
    }
}

/// Split the document at `path` into one file per run of equal footers.
///
/// A recognition pipeline failure follows `config.failure_policy`: under
/// `Degrade` the report carries the reason and no parts, under `Strict` the
/// error is returned. With `dry_run` nothing is written.
#[instrument(skip_all, fields(path = %path.display(), dry_run = dry_run))]
pub fn split_by_footer(
    path: &Path,
    config: &SplitConfig,
    backend: &dyn RecognitionBackend,
    dry_run: bool,
) -> Result<SplitReport> {
    let outcome = FooterDetector::new(config, backend).detect_footers(path)?;
    let mode = outcome.detection.mode();
    let records = outcome.detection.into_records();
    let pipeline_failure = outcome.pipeline_failure;

    for record in &records {
        info!(page = record.page_number, footer = %record.footer_text, "Footer");
    }

    let planned = plan_parts(&records)?;
    let parts = if dry_run || planned.is_empty() {
        planned
            .into_iter()
            .map(|part| WrittenPart {
                path: config.part_path(part.index),
                part,
            })
            .collect()
    } else {
        let reader = PdfReader::open(path)?;
        write_parts(&reader, &planned, config)?
    };

    info!(mode = %mode, parts = parts.len(), dry_run, "Split complete");
    Ok(SplitReport {
        source: path.to_path_buf(),
        mode,
        records,
        parts,
        written: !dry_run,
        pipeline_failure,
    })
}
