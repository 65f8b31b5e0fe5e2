// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry in PDF points, with a top-left origin for layout work.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page space, origin at the top-left corner
/// and `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// True when the two rectangles share any area or touch along an edge.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// True when the horizontal extents overlap.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1
    }
}

/// The visible page box (CropBox, else MediaBox) in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Lower-left corner of the box in PDF user space.
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageGeometry {
    /// US Letter, used when a page carries no usable box.
    pub const LETTER: PageGeometry = PageGeometry {
        origin_x: 0.0,
        origin_y: 0.0,
        width: 612.0,
        height: 792.0,
    };

    /// Build from a PDF box array `[llx lly urx ury]` (corners in any order).
    pub fn from_box(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self {
            origin_x: llx.min(urx),
            origin_y: lly.min(ury),
            width: (urx - llx).abs(),
            height: (ury - lly).abs(),
        }
    }

    /// Convert a PDF user-space point to top-left page coordinates.
    pub fn to_page_space(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.origin_x, self.origin_y + self.height - y)
    }

    /// The whole page as a top-left-origin rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
