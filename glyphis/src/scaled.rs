// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`GlyphSource`] backed by Skrifa for font metadata and Swash for
//! rasterization.

use skrifa::instance::{LocationRef, Size};
use skrifa::raw::tables::head::MacStyle;
use skrifa::raw::tables::os2::SelectionFlags;
use skrifa::raw::TableProvider;
use skrifa::string::StringId;
use skrifa::{FontRef, MetadataProvider};
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

use crate::config::PixelSize;
use crate::source::{FaceMetrics, FontProperties, GlyphSource, RasterGlyph};
use crate::Error;

/// One face of a font file, rasterized with hinting into 8-bit coverage.
pub struct ScaledFont<'a> {
    font: FontRef<'a>,
    raster: swash::FontRef<'a>,
    context: ScaleContext,
    face: FaceMetrics,
}

impl<'a> ScaledFont<'a> {
    /// Parses face `index` of `data`.
    ///
    /// Fails if the data is not a font, the face has no Unicode character
    /// map, or its units-per-em is zero.
    pub fn new(data: &'a [u8], index: u32) -> Result<Self, Error> {
        let font = FontRef::from_index(data, index).map_err(|err| Error::font_load(err.to_string()))?;
        let raster = swash::FontRef::from_index(data, index as usize)
            .ok_or_else(|| Error::font_load(format!("no usable face at index {index}")))?;
        if !font.charmap().has_map() {
            return Err(Error::font_load("this font doesn't have a Unicode charmap"));
        }

        let metrics = font.metrics(Size::unscaled(), LocationRef::default());
        if metrics.units_per_em == 0 {
            return Err(Error::font_load("units per em is zero"));
        }
        let ascender = round(metrics.ascent);
        let descender = round(metrics.descent);
        let face = FaceMetrics {
            units_per_em: i32::from(metrics.units_per_em),
            ascender,
            descender,
            height: ascender
                .saturating_sub(descender)
                .saturating_add(round(metrics.leading)),
        };

        Ok(Self {
            font,
            raster,
            context: ScaleContext::new(),
            face,
        })
    }
}

impl GlyphSource for ScaledFont<'_> {
    fn face_metrics(&self) -> FaceMetrics {
        self.face
    }

    fn properties(&self) -> FontProperties {
        let family_name = self
            .font
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
            .map(|name| name.chars().collect())
            .unwrap_or_default();
        let fs_selection = self.font.os2().ok().map(|os2| os2.fs_selection());
        let mac_style = self.font.head().ok().map(|head| head.mac_style());
        let (bold, italic) = style_flags(fs_selection, mac_style);
        FontProperties {
            family_name,
            bold,
            italic,
        }
    }

    fn rasterize(&mut self, ch: char, size: PixelSize) -> Option<RasterGlyph> {
        let glyph_id = self.font.charmap().map(ch)?;
        if glyph_id.to_u32() == 0 {
            return None;
        }
        let ppem = size.get() as f32;
        let advance = self
            .font
            .glyph_metrics(Size::new(ppem), LocationRef::default())
            .advance_width(glyph_id)
            .map(round)
            .unwrap_or_default();

        let Ok(raster_id) = u16::try_from(glyph_id.to_u32()) else {
            log::debug!("glyph id {} of {ch:?} is out of range for the rasterizer", glyph_id.to_u32());
            return None;
        };
        let mut scaler = self
            .context
            .builder(self.raster)
            .size(ppem)
            .hint(true)
            .build();
        let Some(image) = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, raster_id)
        else {
            // Outline-less glyphs such as the space still advance.
            return Some(RasterGlyph {
                advance,
                ..RasterGlyph::default()
            });
        };
        if !matches!(image.content, Content::Mask) {
            log::debug!("glyph {ch:?} did not rasterize to an alpha mask");
            return None;
        }

        Some(RasterGlyph {
            advance,
            width: image.placement.width,
            rows: image.placement.height,
            left: image.placement.left,
            top: image.placement.top,
            data: image.data,
        })
    }
}

impl core::fmt::Debug for ScaledFont<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScaledFont")
            .field("face", &self.face)
            .finish_non_exhaustive()
    }
}

/// Bold and italic flags from the OS/2 `fsSelection` field, or from the
/// `head` table's `macStyle` when the font has no OS/2 table.
pub(crate) fn style_flags(
    fs_selection: Option<SelectionFlags>,
    mac_style: Option<MacStyle>,
) -> (bool, bool) {
    match (fs_selection, mac_style) {
        (Some(flags), _) => (
            flags.contains(SelectionFlags::BOLD),
            flags.contains(SelectionFlags::ITALIC) || flags.contains(SelectionFlags::OBLIQUE),
        ),
        (None, Some(style)) => (style.contains(MacStyle::BOLD), style.contains(MacStyle::ITALIC)),
        (None, None) => (false, false),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "font metrics are well within i32 range"
)]
fn round(value: f32) -> i32 {
    value.round() as i32
}
