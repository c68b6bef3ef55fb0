// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shelf strip packing across a sequence of pages.
//!
//! Glyph cells are laid out left to right along one shelf at a time. When the
//! next cell does not fit horizontally, a new shelf is started above the
//! current one; when that shelf would leave the page, the page is handed to
//! the [`PageSink`] and a fresh, zeroed page takes its place.
//!
//! The height of a new shelf is the height of the cell that starts it. The
//! tallest cell of the previous shelf is not remembered, so a shelf that
//! mixes cell heights can overlap the shelf above it. All cells share the
//! face's line height in practice, which keeps this from happening.

use crate::config::PackingConfig;
use crate::page::PageBuffer;
use crate::sink::PageSink;
use crate::Error;

/// Size of the region reserved for one glyph, margins included.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellSize {
    /// Advance width plus horizontal margin.
    pub width: i32,
    /// Scaled line height plus vertical margin.
    pub height: i32,
}

/// Pixel bounds of a placed cell, with rows counted from the top of the page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBox {
    /// Left edge.
    pub left: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Top edge.
    pub top: i32,
    /// Bottom edge; the shelf line the cell sits on.
    pub bottom: i32,
}

impl GlyphBox {
    /// Width of the box.
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Where a cell ended up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Index of the page the cell is on.
    pub page: u32,
    /// Bounds of the cell on that page.
    pub glyph_box: GlyphBox,
    /// Whether this cell started a new shelf.
    pub new_row: bool,
    /// Whether a page was flushed to make room for this cell.
    pub flipped: bool,
}

/// Owns the page being filled and decides where each cell goes.
#[derive(Debug)]
pub struct Packer<S> {
    config: PackingConfig,
    page: PageBuffer,
    sink: S,
}

impl<S: PageSink> Packer<S> {
    /// Creates a packer with an empty page 0.
    ///
    /// Fails with [`ErrorKind::InvalidConfig`](crate::ErrorKind::InvalidConfig)
    /// if `config` does not pass [`PackingConfig::validate`].
    pub fn new(config: PackingConfig, sink: S) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            page: PageBuffer::new(&config),
            config,
            sink,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &PackingConfig {
        &self.config
    }

    /// The page currently being filled.
    pub fn page(&self) -> &PageBuffer {
        &self.page
    }

    /// Mutable access to the current page, for blitting into a placement
    /// returned by [`place`](Self::place).
    pub fn page_mut(&mut self) -> &mut PageBuffer {
        &mut self.page
    }

    /// Reserves a cell for the next glyph.
    ///
    /// In order: starts a new shelf if the cell does not fit in the rest of
    /// the current one; flushes the page to the sink and starts a new page if
    /// the shelf does not fit below the top of the page; records the cell's
    /// box; advances the cursor past the cell.
    ///
    /// Fails without touching any state if the cell could not fit even on an
    /// empty page. Errors from the sink while flushing are passed through.
    pub fn place(&mut self, cell: CellSize) -> Result<Placement, Error> {
        self.check_cell(cell)?;

        let new_row = !self.page.fits_in_row(cell.width);
        if new_row {
            self.page.start_row(cell.height);
            log::debug!(
                "page {}: new shelf at y={}",
                self.page.page_index(),
                self.page.cursor().y
            );
        }

        let flipped = !self
            .page
            .fits_on_page(cell.height, self.config.vertical_shift);
        if flipped {
            self.flush()?;
            self.page.flip(&self.config);
            log::debug!("started page {}", self.page.page_index());
        }

        let cursor = self.page.cursor();
        let glyph_box = GlyphBox {
            left: cursor.x,
            right: cursor.x + cell.width,
            top: cursor.y - cell.height,
            bottom: cursor.y,
        };
        self.page.advance(cell.width);

        Ok(Placement {
            page: self.page.page_index(),
            glyph_box,
            new_row,
            flipped,
        })
    }

    /// Flushes the last page and returns the number of pages written along
    /// with the sink.
    pub fn finish(mut self) -> Result<(u32, S), Error> {
        self.flush()?;
        Ok((self.page.page_index() + 1, self.sink))
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.sink.write_page(&self.page)
    }

    fn check_cell(&self, cell: CellSize) -> Result<(), Error> {
        let dimension = self.config.dimension();
        // A fresh shelf starts at x = 1; a fresh page at first_row_bottom().
        let fits_fresh_row = cell.width < dimension;
        let fits_fresh_page = self.config.first_row_bottom()
            >= cell.height.saturating_sub(self.config.vertical_shift);
        if cell.width <= 0 || cell.height <= 0 || !fits_fresh_row || !fits_fresh_page {
            return Err(Error::invalid_cell(
                cell.width,
                cell.height,
                self.config.page_dimension,
            ));
        }
        Ok(())
    }
}
