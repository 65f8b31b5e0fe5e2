// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — crop, grayscale, threshold, denoise, contrast and
// upscale steps for footer strips. Operates on in-memory images using the
// `image` and `imageproc` crates.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::median_filter;
use tracing::{debug, instrument};

use super::threshold::{self, AdaptiveParams};

/// Grayscale image pipeline operating on a single footer strip.
///
/// Each method consumes `self` and returns the transformed processor, so
/// steps chain:
///
/// ```ignore
/// let strip = ImageProcessor::from_dynamic(&page)
///     .crop_rows(top, height)
///     .threshold_otsu()
///     .denoise(1)
///     .adjust_contrast(2.0)
///     .upscale(2)
///     .into_luma();
/// ```
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    /// The current working image, always 8-bit luma.
    image: GrayImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Convert any decoded image to luma and wrap it.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self {
            image: image.to_luma8(),
        }
    }

    /// Wrap an existing grayscale buffer.
    pub fn from_luma(image: GrayImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn into_luma(self) -> GrayImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Keep `height` rows starting at `top`, full width. Values are clamped to
    /// the image bounds; an empty request keeps at least one row.
    #[instrument(skip(self), fields(top, height))]
    pub fn crop_rows(self, top: u32, height: u32) -> Self {
        let img_h = self.image.height();
        let safe_top = top.min(img_h.saturating_sub(1));
        let safe_h = height.min(img_h - safe_top).max(1).min(img_h);
        debug!(safe_top, safe_h, "Cropping rows");
        let cropped = imageops::crop_imm(&self.image, 0, safe_top, self.image.width(), safe_h);
        Self {
            image: cropped.to_image(),
        }
    }

    /// Global binary threshold with an automatically selected level.
    /// Pixels brighter than the level become white, the rest black.
    #[instrument(skip(self))]
    pub fn threshold_otsu(self) -> Self {
        let (level, image) = threshold::otsu(&self.image);
        debug!(level, "Otsu threshold computed");
        Self { image }
    }

    /// Local threshold against a Gaussian-weighted neighbourhood mean.
    #[instrument(skip(self))]
    pub fn threshold_adaptive(self, params: AdaptiveParams) -> Self {
        Self {
            image: threshold::adaptive_gaussian(&self.image, params),
        }
    }

    /// Median filter over a `(2r+1)²` window. A radius of zero is a no-op.
    #[instrument(skip(self), fields(radius))]
    pub fn denoise(self, radius: u32) -> Self {
        if radius == 0 {
            return self;
        }
        Self {
            image: median_filter(&self.image, radius, radius),
        }
    }

    /// Scale each pixel's distance from the image's mean gray level by
    /// `factor`. 1.0 is a no-op; values above 1.0 increase contrast.
    #[instrument(skip(self), fields(factor))]
    pub fn adjust_contrast(self, factor: f32) -> Self {
        let pixels = self.image.as_raw();
        if pixels.is_empty() {
            return self;
        }
        let sum: u64 = pixels.iter().map(|&p| u64::from(p)).sum();
        let mean = (sum as f64 / pixels.len() as f64).round() as f32;
        debug!(mean, factor, "Adjusting contrast");

        let mut image = self.image;
        for pixel in image.pixels_mut() {
            let value = mean + factor * (f32::from(pixel.0[0]) - mean);
            *pixel = Luma([value.clamp(0.0, 255.0) as u8]);
        }
        Self { image }
    }

    /// Enlarge both axes by `factor` with cubic (Catmull-Rom) interpolation.
    /// A factor of 0 or 1 is a no-op.
    #[instrument(skip(self), fields(factor))]
    pub fn upscale(self, factor: u32) -> Self {
        if factor <= 1 {
            return self;
        }
        let (w, h) = self.image.dimensions();
        let resized = imageops::resize(
            &self.image,
            w.saturating_mul(factor),
            h.saturating_mul(factor),
            FilterType::CatmullRom,
        );
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Upscale complete"
        );
        Self { image: resized }
    }
}
