// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — reading pages, querying the text layer, and extracting page ranges.

pub mod geometry;
pub mod reader;
pub mod text_layer;

pub use geometry::{PageGeometry, Rect};
pub use reader::PdfReader;
pub use text_layer::{TextBlock, TextSpan};
