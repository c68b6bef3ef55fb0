// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the packer and whatever rasterizes glyphs.

use crate::config::{PackingConfig, PixelSize};
use crate::packer::CellSize;

/// Face-wide vertical metrics, in font design units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceMetrics {
    /// Design units per em. Always positive.
    pub units_per_em: i32,
    /// Distance from the baseline to the top of the face (positive).
    pub ascender: i32,
    /// Distance from the baseline to the bottom of the face (negative).
    pub descender: i32,
    /// Baseline-to-baseline distance: ascender - descender + line gap.
    pub height: i32,
}

/// Family and style information advertised in the descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontProperties {
    /// Family name of the face.
    pub family_name: String,
    /// Whether the face is flagged bold.
    pub bold: bool,
    /// Whether the face is flagged italic (or oblique).
    pub italic: bool,
}

/// A rasterized glyph: an 8-bit coverage bitmap plus the metrics needed to
/// position it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterGlyph {
    /// Horizontal advance in whole pixels.
    pub advance: i32,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub rows: u32,
    /// Offset from the pen position to the left edge of the bitmap.
    pub left: i32,
    /// Offset from the baseline up to the top row of the bitmap.
    pub top: i32,
    /// Row-major coverage, `width * rows` bytes, top row first.
    pub data: Vec<u8>,
}

impl RasterGlyph {
    /// Size of the cell this glyph needs on a page.
    ///
    /// Saturates instead of overflowing; the packer rejects such cells.
    pub fn cell_size(
        &self,
        face: &FaceMetrics,
        size: PixelSize,
        config: &PackingConfig,
    ) -> CellSize {
        CellSize {
            width: self.advance.saturating_add(config.horizontal_margin),
            height: config
                .vertical_margin
                .saturating_add(size.scale(face.height, face.units_per_em)),
        }
    }

    /// Iterates over the bitmap rows, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let width = self.width as usize;
        self.data
            .chunks_exact(width.max(1))
            .take(if width == 0 { 0 } else { self.rows as usize })
    }
}

/// Supplies face metrics and rasterized glyphs for a single font face.
///
/// Implementations are expected to be deterministic: the same codepoint at
/// the same size always yields the same bitmap.
pub trait GlyphSource {
    /// Face-wide metrics in design units.
    fn face_metrics(&self) -> FaceMetrics;

    /// Family and style flags of the face.
    fn properties(&self) -> FontProperties;

    /// Rasterizes `ch` at `size`.
    ///
    /// Returns `None` if the face has no glyph for `ch`.
    fn rasterize(&mut self, ch: char, size: PixelSize) -> Option<RasterGlyph>;
}

impl<G: GlyphSource + ?Sized> GlyphSource for &mut G {
    fn face_metrics(&self) -> FaceMetrics {
        (**self).face_metrics()
    }

    fn properties(&self) -> FontProperties {
        (**self).properties()
    }

    fn rasterize(&mut self, ch: char, size: PixelSize) -> Option<RasterGlyph> {
        (**self).rasterize(ch, size)
    }
}
