// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image normalizer — the fixed preprocessing chains applied to a footer strip
// before recognition.

use footsplit_core::SplitConfig;
use image::GrayImage;
use tracing::{debug, instrument};

use super::processor::ImageProcessor;
use super::threshold::AdaptiveParams;

/// Preprocessing parameters for footer strips.
///
/// Holds no state between calls: every chain is a pure function of the input
/// pixels and these parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNormalizer {
    pub contrast_factor: f32,
    pub upscale_factor: u32,
    pub denoise_radius: u32,
    pub adaptive: AdaptiveParams,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::from_config(&SplitConfig::default())
    }
}

impl ImageNormalizer {
    pub fn from_config(config: &SplitConfig) -> Self {
        Self {
            contrast_factor: config.contrast_factor,
            upscale_factor: config.upscale_factor,
            denoise_radius: config.denoise_radius,
            adaptive: AdaptiveParams {
                block_size: config.adaptive_block_size,
                offset: config.adaptive_offset,
            },
        }
    }

    /// Primary chain over a grayscale strip: Otsu threshold, median denoise,
    /// contrast boost, cubic upscale.
    #[instrument(skip_all, fields(width = strip.width(), height = strip.height()))]
    pub fn normalize(&self, strip: &GrayImage) -> GrayImage {
        let out = ImageProcessor::from_luma(strip.clone())
            .threshold_otsu()
            .denoise(self.denoise_radius)
            .adjust_contrast(self.contrast_factor)
            .upscale(self.upscale_factor)
            .into_luma();
        debug!(out_w = out.width(), out_h = out.height(), "Primary normalization done");
        out
    }

    /// Secondary chain: adaptive Gaussian threshold only.
    #[instrument(skip_all, fields(width = strip.width(), height = strip.height()))]
    pub fn normalize_adaptive(&self, strip: &GrayImage) -> GrayImage {
        ImageProcessor::from_luma(strip.clone())
            .threshold_adaptive(self.adaptive)
            .into_luma()
    }
}
