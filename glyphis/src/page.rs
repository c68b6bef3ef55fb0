// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel storage and packing cursor for the page being filled.

use crate::config::{PackingConfig, PixelSize};
use crate::packer::GlyphBox;
use crate::source::{FaceMetrics, RasterGlyph};

/// Position where the next glyph cell will be placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Left edge of the next cell.
    pub x: i32,
    /// Bottom edge of the current shelf, counted in rows from the top of the
    /// page.
    pub y: i32,
}

/// One square page of 8-bit alpha pixels and the shelf cursor filling it.
///
/// Shelves are filled left to right starting near the bottom of the page and
/// stack upwards. Row 0 of `pixels` is the top row of the encoded texture.
#[derive(Clone)]
pub struct PageBuffer {
    dimension: u32,
    pixels: Vec<u8>,
    page_index: u32,
    cursor: Cursor,
}

impl PageBuffer {
    /// Creates page 0, zero-filled, with the cursor at the start of the
    /// first shelf.
    ///
    /// `config` is expected to pass [`PackingConfig::validate`]; the page
    /// store holds `page_dimension²` bytes.
    pub fn new(config: &PackingConfig) -> Self {
        let dimension = config.page_dimension;
        Self {
            dimension,
            pixels: vec![0; dimension as usize * dimension as usize],
            page_index: 0,
            cursor: Cursor {
                x: 1,
                y: config.first_row_bottom(),
            },
        }
    }

    /// Edge length in pixels.
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Row-major pixels, top row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Index of this page within the run.
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// The current packing cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The pixel at column `x`, row `y` (from the top).
    ///
    /// Returns `None` outside the page.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        self.pixels
            .get(y as usize * self.dimension as usize + x as usize)
            .copied()
    }

    /// Returns `true` if a cell of `width` still fits in the current shelf.
    pub fn fits_in_row(&self, width: i32) -> bool {
        self.signed_dimension() - self.cursor.x >= width
    }

    /// Returns `true` if a shelf of `height` still fits below the top of the
    /// page, given the configured vertical shift.
    pub fn fits_on_page(&self, height: i32, vertical_shift: i32) -> bool {
        self.cursor.y >= height.saturating_sub(vertical_shift)
    }

    /// Starts a new shelf above the current one.
    ///
    /// The shelf height is that of the glyph about to be placed; heights of
    /// glyphs already in the current shelf are not tracked.
    pub(crate) fn start_row(&mut self, height: i32) {
        self.cursor.y = self.cursor.y.saturating_sub(height);
        self.cursor.x = 1;
    }

    /// Moves the cursor past a cell of `width`.
    pub(crate) fn advance(&mut self, width: i32) {
        self.cursor.x = self.cursor.x.saturating_add(width);
    }

    /// Turns this buffer into the next page: zeroes the pixels, bumps the
    /// page index and resets the cursor to the first shelf.
    pub(crate) fn flip(&mut self, config: &PackingConfig) {
        self.page_index += 1;
        self.pixels.fill(0);
        self.cursor = Cursor {
            x: 1,
            y: config.first_row_bottom(),
        };
    }

    /// Copies `glyph`'s bitmap into the page at the position implied by
    /// `glyph_box` and the face's descender.
    ///
    /// The bitmap origin is derived from the baseline, which sits
    /// `size * descender / units_per_em` pixels above the bottom of the box.
    /// Rows are copied verbatim over whatever was there. The packer sizes
    /// cells so that bitmaps land inside them; bytes that would fall outside
    /// the pixel store are dropped, and a row that overhangs the right edge
    /// continues on the next row.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "clamped offsets lie within the pixel store"
    )]
    pub fn blit(
        &mut self,
        glyph: &RasterGlyph,
        face: &FaceMetrics,
        glyph_box: &GlyphBox,
        size: PixelSize,
    ) {
        let baseline = i64::from(glyph_box.bottom)
            + i64::from(size.scale(face.descender, face.units_per_em));
        let origin_x = i64::from(glyph_box.left) + i64::from(glyph.left);
        let origin_y = baseline - i64::from(glyph.top);
        let stride = i64::from(self.dimension);
        let len = self.pixels.len() as i64;

        for (row, src) in glyph.rows().enumerate() {
            let start = (origin_y + row as i64) * stride + origin_x;
            let end = start + src.len() as i64;
            let clipped_start = start.clamp(0, len);
            let clipped_end = end.clamp(0, len);
            if clipped_start >= clipped_end {
                continue;
            }
            let skip = (clipped_start - start) as usize;
            let count = (clipped_end - clipped_start) as usize;
            self.pixels[clipped_start as usize..clipped_end as usize]
                .copy_from_slice(&src[skip..skip + count]);
        }
    }

    fn signed_dimension(&self) -> i32 {
        i32::try_from(self.dimension).unwrap_or(i32::MAX)
    }
}

impl core::fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageBuffer")
            .field("dimension", &self.dimension)
            .field("page_index", &self.page_index)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
