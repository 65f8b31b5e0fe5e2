// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Split configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};
use crate::types::{CharWhitelist, FailurePolicy};

/// Placeholder replaced by the 1-based part index in `output_template`.
pub const INDEX_PLACEHOLDER: &str = "{index}";

/// Tunables for footer detection and splitting.
///
/// Every field has a usable default, so a config file only needs to name
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Top edge of the footer region for text-layer extraction, as a
    /// fraction of page height.
    pub structured_region_top: f32,
    /// Top edge of the footer strip cropped from rendered pages. Taller
    /// than the structured region: rendering adds positional slack.
    pub ocr_region_top: f32,
    /// Resolution used when rasterising pages for recognition.
    pub render_dpi: u32,
    /// Multiplicative contrast boost applied after denoising.
    pub contrast_factor: f32,
    /// Integer upscale applied before recognition.
    pub upscale_factor: u32,
    /// Radius of the median filter used for denoising (1 = 3x3).
    pub denoise_radius: u32,
    /// Recognised footers this short or shorter are retried with the
    /// secondary preprocessing chain.
    pub min_meaningful_chars: usize,
    /// Characters the primary OCR pass may emit.
    pub char_whitelist: CharWhitelist,
    /// Neighbourhood size of the adaptive threshold (odd, >= 3).
    pub adaptive_block_size: u32,
    /// Constant subtracted from the adaptive neighbourhood mean.
    pub adaptive_offset: f32,
    /// File name template for output parts; must contain `{index}`.
    pub output_template: String,
    /// Directory output parts are written to.
    pub output_dir: PathBuf,
    /// Behaviour when the recognition pipeline fails for a whole document.
    pub failure_policy: FailurePolicy,
    /// Directory holding the OCR models; `None` uses the default cache.
    pub ocr_model_dir: Option<PathBuf>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            structured_region_top: 0.90,
            ocr_region_top: 0.85,
            render_dpi: 300,
            contrast_factor: 2.0,
            upscale_factor: 2,
            denoise_radius: 1,
            min_meaningful_chars: 5,
            char_whitelist: CharWhitelist::footer(),
            adaptive_block_size: 11,
            adaptive_offset: 2.0,
            output_template: format!("split_part_{INDEX_PLACEHOLDER}.pdf"),
            output_dir: PathBuf::from("."),
            failure_policy: FailurePolicy::Degrade,
            ocr_model_dir: None,
        }
    }
}

impl SplitConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("structured_region_top", self.structured_region_top),
            ("ocr_region_top", self.ocr_region_top),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(SplitError::Config(format!(
                    "{name} must be strictly between 0 and 1, got {value}"
                )));
            }
        }
        if self.render_dpi == 0 {
            return Err(SplitError::Config("render_dpi must be positive".into()));
        }
        if self.upscale_factor == 0 {
            return Err(SplitError::Config("upscale_factor must be positive".into()));
        }
        if !self.contrast_factor.is_finite() || self.contrast_factor < 0.0 {
            return Err(SplitError::Config(format!(
                "contrast_factor must be a non-negative number, got {}",
                self.contrast_factor
            )));
        }
        if self.adaptive_block_size < 3 || self.adaptive_block_size % 2 == 0 {
            return Err(SplitError::Config(format!(
                "adaptive_block_size must be odd and at least 3, got {}",
                self.adaptive_block_size
            )));
        }
        if !self.output_template.contains(INDEX_PLACEHOLDER) {
            return Err(SplitError::Config(format!(
                "output_template {:?} must contain {INDEX_PLACEHOLDER}",
                self.output_template
            )));
        }
        Ok(())
    }

    /// File name for the `index`-th output part (1-based).
    pub fn part_file_name(&self, index: usize) -> String {
        self.output_template
            .replace(INDEX_PLACEHOLDER, &index.to_string())
    }

    /// Full path for the `index`-th output part.
    pub fn part_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(self.part_file_name(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_documented_constants() {
        let config = SplitConfig::default();
        assert_eq!(config.structured_region_top, 0.90);
        assert_eq!(config.ocr_region_top, 0.85);
        assert_eq!(config.render_dpi, 300);
        assert_eq!(config.min_meaningful_chars, 5);
        assert_eq!(config.adaptive_block_size, 11);
        assert_eq!(config.part_file_name(3), "split_part_3.pdf");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("footsplit.json");
        std::fs::write(&path, r#"{ "render_dpi": 200, "failure_policy": "strict" }"#).unwrap();

        let config = SplitConfig::load(&path).unwrap();
        assert_eq!(config.render_dpi, 200);
        assert_eq!(config.failure_policy, FailurePolicy::Strict);
        assert_eq!(config.ocr_region_top, 0.85);
    }

    #[test]
    fn rejects_even_block_size() {
        let config = SplitConfig {
            adaptive_block_size: 10,
            ..SplitConfig::default()
        };
        assert!(matches!(config.validate(), Err(SplitError::Config(_))));
    }

    #[test]
    fn rejects_region_outside_page() {
        let config = SplitConfig {
            ocr_region_top: 1.0,
            ..SplitConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_template_without_index() {
        let config = SplitConfig {
            output_template: "part.pdf".into(),
            ..SplitConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn part_path_joins_output_dir() {
        let config = SplitConfig {
            output_dir: PathBuf::from("/tmp/out"),
            ..SplitConfig::default()
        };
        assert_eq!(config.part_path(1), PathBuf::from("/tmp/out/split_part_1.pdf"));
    }
}
