// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures: a deterministic glyph source and config shorthands.

use std::collections::BTreeMap;

use crate::{FaceMetrics, FontProperties, GlyphSource, PackingConfig, PixelSize, RasterGlyph};

/// 1000 units per em with a line height of exactly one em, so the scaled
/// line height equals the pixel size.
pub(crate) const FACE: FaceMetrics = FaceMetrics {
    units_per_em: 1000,
    ascender: 800,
    descender: -200,
    height: 1000,
};

/// A glyph source serving fixed bitmaps for a handful of characters.
#[derive(Clone, Debug)]
pub(crate) struct FakeSource {
    glyphs: BTreeMap<char, RasterGlyph>,
    pub(crate) requests: Vec<char>,
}

impl FakeSource {
    /// Every character in `chars` gets a 2x2 bitmap whose bytes are derived
    /// from the codepoint, at `left = 1`, `top = 3`, advancing by `advance`.
    pub(crate) fn new(chars: &str, advance: i32) -> Self {
        let glyphs = chars
            .chars()
            .map(|ch| (ch, square_glyph(ch, advance)))
            .collect();
        Self {
            glyphs,
            requests: Vec::new(),
        }
    }

    pub(crate) fn with_glyph(mut self, ch: char, glyph: RasterGlyph) -> Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    pub(crate) fn glyph(&self, ch: char) -> &RasterGlyph {
        &self.glyphs[&ch]
    }
}

impl GlyphSource for FakeSource {
    fn face_metrics(&self) -> FaceMetrics {
        FACE
    }

    fn properties(&self) -> FontProperties {
        FontProperties {
            family_name: "Fake Sans".to_owned(),
            bold: true,
            italic: false,
        }
    }

    fn rasterize(&mut self, ch: char, _size: PixelSize) -> Option<RasterGlyph> {
        self.requests.push(ch);
        self.glyphs.get(&ch).cloned()
    }
}

pub(crate) fn square_glyph(ch: char, advance: i32) -> RasterGlyph {
    let seed = (u32::from(ch) % 200) as u8 + 1;
    RasterGlyph {
        advance,
        width: 2,
        rows: 2,
        left: 1,
        top: 3,
        data: vec![seed, seed + 10, seed + 20, seed + 30],
    }
}

/// A config with the given page size and no margins or shifts.
pub(crate) fn bare_config(page_dimension: u32) -> PackingConfig {
    PackingConfig {
        page_dimension,
        horizontal_margin: 0,
        vertical_margin: 0,
        horizontal_shift: 0,
        vertical_shift: 0,
    }
}

pub(crate) fn size(pixels: u32) -> PixelSize {
    PixelSize::new(pixels).unwrap()
}

/// Reads the little-endian `u32` at `offset`.
pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}
