// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::packer::GlyphBox;

/// Where one glyph was packed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// The character this glyph renders.
    pub codepoint: char,
    /// Index of the page holding the glyph.
    pub page: u32,
    /// Cell bounds at packing time, before any export shift.
    pub glyph_box: GlyphBox,
}

impl GlyphPlacement {
    /// The `B` field of the descriptor: cell width less the two pixels of
    /// margin absorbed into it.
    pub fn export_width(&self) -> i32 {
        self.glyph_box.right - self.glyph_box.left - 2
    }
}

/// Append-only record of placements, in packing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphRegistry {
    placements: Vec<GlyphPlacement>,
}

impl GlyphRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the next placement.
    pub fn push(&mut self, placement: GlyphPlacement) {
        self.placements.push(placement);
    }

    /// Number of placements recorded.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Iterates over placements in packing order.
    pub fn iter(&self) -> core::slice::Iter<'_, GlyphPlacement> {
        self.placements.iter()
    }
}

impl<'a> IntoIterator for &'a GlyphRegistry {
    type Item = &'a GlyphPlacement;
    type IntoIter = core::slice::Iter<'a, GlyphPlacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
