// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Thresholding — global Otsu and adaptive Gaussian binarisation.

use image::{GrayImage, Luma};
use imageproc::contrast::{self, ThresholdType};
use imageproc::filter::separable_filter_equal;

/// Parameters for [`adaptive_gaussian`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveParams {
    /// Side of the square neighbourhood, odd and at least 3.
    pub block_size: u32,
    /// Subtracted from the weighted mean before comparison.
    pub offset: f32,
}

/// Binarise at the Otsu level: pixels strictly above it become 255, the
/// rest 0. Returns the level used alongside the image.
pub fn otsu(gray: &GrayImage) -> (u8, GrayImage) {
    let level = contrast::otsu_level(gray);
    (level, contrast::threshold(gray, level, ThresholdType::Binary))
}

/// Adaptive threshold against a Gaussian-weighted local mean.
///
/// A pixel becomes white when it is brighter than its neighbourhood mean
/// minus `offset`. The kernel is `block_size` wide with
/// `σ = 0.3·((block_size − 1)/2 − 1) + 0.8`; borders replicate the edge
/// pixels.
pub fn adaptive_gaussian(gray: &GrayImage, params: AdaptiveParams) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    let kernel = gaussian_kernel(params.block_size.max(3) | 1);
    let mean = separable_filter_equal(gray, &kernel);
    let delta = params.offset.ceil() as i32;

    GrayImage::from_fn(width, height, |x, y| {
        let src = i32::from(gray.get_pixel(x, y).0[0]);
        let local = i32::from(mean.get_pixel(x, y).0[0]);
        Luma([if src - local > -delta { 255 } else { 0 }])
    })
}

/// Normalised Gaussian weights for a `size`-tap kernel.
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let centre = (size / 2) as f32;
    let raw: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - centre;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}
