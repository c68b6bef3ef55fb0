// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packing geometry and size configuration.

use crate::Error;

/// Edge length, in pixels, of every page unless configured otherwise.
pub const DEFAULT_PAGE_DIMENSION: u32 = 512;

/// Extra horizontal pixels reserved per glyph cell by default.
pub const DEFAULT_HORIZONTAL_MARGIN: i32 = 4;

/// Extra vertical pixels reserved per glyph cell by default.
pub const DEFAULT_VERTICAL_MARGIN: i32 = 8;

/// Largest supported pixel size.
pub const MAX_PIXEL_SIZE: u32 = 144;

/// Smallest page edge that leaves room for the one-pixel left gutter.
pub const MIN_PAGE_DIMENSION: u32 = 2;

/// Largest supported page edge.
pub const MAX_PAGE_DIMENSION: u32 = 16384;

/// Largest magnitude accepted for any margin or shift.
pub const MAX_OFFSET: i32 = 16384;

/// Geometry shared by the packer and the descriptor writer for a whole run.
///
/// Margins are part of every cell and therefore affect packing. Shifts are
/// applied only when boxes are exported to the descriptor, with one exception
/// inherited from the page layout: the vertical shift also offsets the first
/// shelf of each page and the page-flip threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PackingConfig {
    /// Edge length of every (square) page.
    pub page_dimension: u32,
    /// Extra pixels added to the advance width of every cell.
    pub horizontal_margin: i32,
    /// Extra pixels added to the line height of every cell.
    pub vertical_margin: i32,
    /// Offset added to exported `Left`/`Right` coordinates.
    pub horizontal_shift: i32,
    /// Offset added to exported `Top`/`Bottom` coordinates.
    pub vertical_shift: i32,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            page_dimension: DEFAULT_PAGE_DIMENSION,
            horizontal_margin: DEFAULT_HORIZONTAL_MARGIN,
            vertical_margin: DEFAULT_VERTICAL_MARGIN,
            horizontal_shift: 0,
            vertical_shift: 0,
        }
    }
}

impl PackingConfig {
    /// Checks that every value lies in its supported range.
    ///
    /// The page dimension must be within
    /// `MIN_PAGE_DIMENSION..=MAX_PAGE_DIMENSION`, margins within
    /// `0..=MAX_OFFSET` and shifts within `-MAX_OFFSET..=MAX_OFFSET`. Within
    /// these bounds no coordinate computed during packing or export can
    /// overflow.
    pub fn validate(&self) -> Result<(), Error> {
        if !(MIN_PAGE_DIMENSION..=MAX_PAGE_DIMENSION).contains(&self.page_dimension) {
            return Err(Error::invalid_config(format!(
                "page dimension {} is outside {MIN_PAGE_DIMENSION}..={MAX_PAGE_DIMENSION}",
                self.page_dimension
            )));
        }
        for (axis, margin) in [
            (Axis::Horizontal, self.horizontal_margin),
            (Axis::Vertical, self.vertical_margin),
        ] {
            if !(0..=MAX_OFFSET).contains(&margin) {
                return Err(Error::invalid_config(format!(
                    "{axis} margin {margin} is outside 0..={MAX_OFFSET}"
                )));
            }
        }
        for (axis, shift) in [
            (Axis::Horizontal, self.horizontal_shift),
            (Axis::Vertical, self.vertical_shift),
        ] {
            if !(-MAX_OFFSET..=MAX_OFFSET).contains(&shift) {
                return Err(Error::invalid_config(format!(
                    "{axis} shift {shift} is outside -{MAX_OFFSET}..={MAX_OFFSET}"
                )));
            }
        }
        Ok(())
    }

    /// Page dimension as a signed pixel coordinate.
    pub fn dimension(&self) -> i32 {
        i32::try_from(self.page_dimension).unwrap_or(i32::MAX)
    }

    /// Bottom edge of the first shelf on a fresh page.
    ///
    /// Saturates for configurations that do not pass [`validate`](Self::validate).
    pub fn first_row_bottom(&self) -> i32 {
        self.dimension()
            .saturating_sub(self.vertical_margin)
            .saturating_sub(self.vertical_shift)
    }

    /// Returns `true` if the shift along `axis` is larger in magnitude than
    /// the margin along the same axis.
    ///
    /// Exported boxes may then fall outside the cell that was reserved for
    /// them. This is allowed, but usually not intended.
    pub fn shift_exceeds_margin(&self, axis: Axis) -> bool {
        let (shift, margin) = match axis {
            Axis::Horizontal => (self.horizontal_shift, self.horizontal_margin),
            Axis::Vertical => (self.vertical_shift, self.vertical_margin),
        };
        shift.unsigned_abs() > margin.unsigned_abs()
    }

    /// Logs a warning for every axis whose shift exceeds its margin.
    ///
    /// Returns the number of warnings emitted.
    pub fn warn_on_oversized_shifts(&self) -> usize {
        let mut count = 0;
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if self.shift_exceeds_margin(axis) {
                log::warn!("{axis} shift exceeds margin bounds; exported boxes may leave their cells");
                count += 1;
            }
        }
        count
    }
}

/// One of the two page axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// Requested glyph size in pixels, validated to `1..=MAX_PIXEL_SIZE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelSize(u32);

impl PixelSize {
    /// Validates a pixel size.
    pub fn new(pixels: u32) -> Result<Self, Error> {
        if pixels == 0 || pixels > MAX_PIXEL_SIZE {
            return Err(Error::invalid_size(pixels));
        }
        Ok(Self(pixels))
    }

    /// The size in pixels.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The size as a signed pixel quantity, for coordinate arithmetic.
    pub fn pixels(self) -> i32 {
        self.0 as i32
    }

    /// The point size advertised in the descriptor.
    pub fn point_size(self) -> u32 {
        self.0 * 5
    }

    /// Converts a quantity in font design units to whole pixels at this size.
    ///
    /// Truncates toward zero, so negative quantities such as descenders round
    /// up. Results beyond the `i32` range saturate, and a zero
    /// `units_per_em` scales everything to zero.
    pub fn scale(self, design_units: i32, units_per_em: i32) -> i32 {
        let scaled = (i64::from(self.pixels()) * i64::from(design_units))
            .checked_div(i64::from(units_per_em))
            .unwrap_or(0);
        i32::try_from(scaled).unwrap_or(if scaled < 0 { i32::MIN } else { i32::MAX })
    }
}

impl TryFrom<u32> for PixelSize {
    type Error = Error;

    fn try_from(pixels: u32) -> Result<Self, Error> {
        Self::new(pixels)
    }
}
