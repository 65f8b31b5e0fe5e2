// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use footsplit_core::error::Result;
use footsplit_core::{FailurePolicy, SplitConfig};

#[derive(Parser, Debug)]
#[command(
    name = "footsplit",
    version,
    about = "Split a PDF into parts wherever the page footer changes"
)]
pub struct Cli {
    /// PDF to split.
    pub input: PathBuf,

    /// Directory the parts are written to.
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// JSON config file; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render resolution for scanned pages.
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Directory holding the OCR detection and recognition models.
    #[arg(long)]
    pub ocr_models: Option<PathBuf>,

    /// Part file name template, e.g. `invoice_{index}.pdf`.
    #[arg(long)]
    pub template: Option<String>,

    /// Fail instead of writing nothing when recognition breaks down.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Detect and plan parts without writing any file.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    /// The effective configuration: file (or defaults), then flags.
    pub fn split_config(&self) -> Result<SplitConfig> {
        let mut config = match &self.config {
            Some(path) => SplitConfig::load(path)?,
            None => SplitConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dpi) = self.dpi {
            config.render_dpi = dpi;
        }
        if let Some(dir) = &self.ocr_models {
            config.ocr_model_dir = Some(dir.clone());
        }
        if let Some(template) = &self.template {
            config.output_template = template.clone();
        }
        if self.strict {
            config.failure_policy = FailurePolicy::Strict;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footsplit_core::SplitError;

    #[test]
    fn bare_input_uses_defaults() {
        let cli = Cli::try_parse_from(["footsplit", "scan.pdf"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("scan.pdf"));
        assert!(!cli.dry_run && !cli.json && !cli.strict);
        assert_eq!(cli.split_config().unwrap(), SplitConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "footsplit",
            "scan.pdf",
            "--output-dir",
            "out",
            "--dpi",
            "200",
            "--ocr-models",
            "/models",
            "--template",
            "inv_{index}.pdf",
            "--strict",
        ])
        .unwrap();
        let config = cli.split_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.render_dpi, 200);
        assert_eq!(config.ocr_model_dir, Some(PathBuf::from("/models")));
        assert_eq!(config.part_file_name(2), "inv_2.pdf");
        assert_eq!(config.failure_policy, FailurePolicy::Strict);
    }

    #[test]
    fn flags_win_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("footsplit.json");
        std::fs::write(&path, r#"{ "render_dpi": 150, "min_meaningful_chars": 3 }"#).unwrap();

        let cli = Cli::try_parse_from([
            "footsplit",
            "scan.pdf",
            "--config",
            path.to_str().unwrap(),
            "--dpi",
            "400",
        ])
        .unwrap();
        let config = cli.split_config().unwrap();
        assert_eq!(config.render_dpi, 400);
        assert_eq!(config.min_meaningful_chars, 3);
    }

    #[test]
    fn template_without_index_is_rejected() {
        let cli =
            Cli::try_parse_from(["footsplit", "scan.pdf", "--template", "same.pdf"]).unwrap();
        assert!(matches!(cli.split_config(), Err(SplitError::Config(_))));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["footsplit"]).is_err());
    }
}
