// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Footer region — the bottom strip of a page, from a fraction of the page
// height down to the bottom edge.

use crate::pdf::geometry::{PageGeometry, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterRegion {
    /// Where the strip starts, as a fraction of page height from the top.
    top_fraction: f32,
}

impl FooterRegion {
    pub fn new(top_fraction: f32) -> Self {
        Self {
            top_fraction: top_fraction.clamp(0.0, 1.0),
        }
    }

    /// The strip in top-left page coordinates (points).
    pub fn page_rect(&self, geometry: &PageGeometry) -> Rect {
        Rect::new(
            0.0,
            geometry.height * self.top_fraction,
            geometry.width,
            geometry.height,
        )
    }

    /// First row and row count of the strip in a bitmap `image_height`
    /// pixels tall. The first row is truncated toward the top.
    pub fn pixel_rows(&self, image_height: u32) -> (u32, u32) {
        let top = ((image_height as f32 * self.top_fraction) as u32).min(image_height);
        (top, image_height - top)
    }
}
