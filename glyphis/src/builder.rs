// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The linear pipeline: fetch, place, blit, record.

use crate::config::{PackingConfig, PixelSize};
use crate::descriptor::DescriptorWriter;
use crate::packer::Packer;
use crate::registry::{GlyphPlacement, GlyphRegistry};
use crate::sink::PageSink;
use crate::source::{FontProperties, GlyphSource};
use crate::Error;

/// Packs a sequence of characters from one face at one size.
#[derive(Copy, Clone, Debug)]
pub struct AtlasBuilder {
    config: PackingConfig,
    size: PixelSize,
}

impl AtlasBuilder {
    /// Creates a builder.
    pub fn new(config: PackingConfig, size: PixelSize) -> Self {
        Self { config, size }
    }

    /// The packing configuration.
    pub fn config(&self) -> &PackingConfig {
        &self.config
    }

    /// The glyph size.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Rasterizes and packs `targets` in order, handing every finished page
    /// (including the last) to `sink`.
    ///
    /// Fails before touching the source or the sink if the configuration is
    /// out of range. Characters the source has no glyph for are logged and
    /// skipped. Any other error aborts the run; pages already handed to the
    /// sink stay there.
    pub fn build<G, S>(&self, source: &mut G, targets: &[char], sink: S) -> Result<Atlas<S>, Error>
    where
        G: GlyphSource + ?Sized,
        S: PageSink,
    {
        let mut packer = Packer::new(self.config, sink)?;
        self.config.warn_on_oversized_shifts();

        let face = source.face_metrics();
        let mut glyphs = GlyphRegistry::new();
        let mut missing = Vec::new();

        for &ch in targets {
            let Some(glyph) = source.rasterize(ch, self.size) else {
                log::warn!(
                    "glyph {ch} [{:#x}] does not exist in this font",
                    u32::from(ch)
                );
                missing.push(ch);
                continue;
            };
            let cell = glyph.cell_size(&face, self.size, &self.config);
            let placement = packer.place(cell)?;
            packer
                .page_mut()
                .blit(&glyph, &face, &placement.glyph_box, self.size);
            glyphs.push(GlyphPlacement {
                codepoint: ch,
                page: placement.page,
                glyph_box: placement.glyph_box,
            });
        }

        let (page_count, sink) = packer.finish()?;
        Ok(Atlas {
            properties: source.properties(),
            size: self.size,
            config: self.config,
            page_count,
            glyphs,
            missing,
            sink,
        })
    }
}

/// The result of a finished packing run.
#[derive(Debug)]
pub struct Atlas<S> {
    properties: FontProperties,
    size: PixelSize,
    config: PackingConfig,
    page_count: u32,
    glyphs: GlyphRegistry,
    missing: Vec<char>,
    sink: S,
}

impl<S> Atlas<S> {
    /// Number of pages handed to the sink.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Placements in packing order.
    pub fn glyphs(&self) -> &GlyphRegistry {
        &self.glyphs
    }

    /// Characters that were skipped because the face lacks them.
    pub fn missing(&self) -> &[char] {
        &self.missing
    }

    /// Family and style of the face the glyphs came from.
    pub fn properties(&self) -> &FontProperties {
        &self.properties
    }

    /// The sink holding the pages.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the atlas, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// A descriptor writer for this atlas, referencing pages by `page_stem`.
    pub fn descriptor<'a>(&'a self, page_stem: &'a str) -> DescriptorWriter<'a> {
        DescriptorWriter::new(&self.properties, self.size, &self.config, page_stem)
    }

    /// Renders the descriptor for this atlas.
    pub fn render_descriptor(&self, page_stem: &str) -> Result<String, Error> {
        self.descriptor(page_stem)
            .render(self.page_count, &self.glyphs)
    }
}
