// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Splitting — group pages into runs of equal footers and write each run out.

pub mod partitioner;

pub use partitioner::{plan_parts, write_parts};
