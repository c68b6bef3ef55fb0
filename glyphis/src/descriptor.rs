// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! XML descriptor listing the font properties, pages and glyph placements.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::config::{PackingConfig, PixelSize};
use crate::registry::{GlyphPlacement, GlyphRegistry};
use crate::source::FontProperties;
use crate::Error;

/// Name of the root element.
pub const ROOT_ELEMENT: &str = "GlyphisFont";

/// Weight advertised for every face.
pub const FONT_WEIGHT: u32 = 700;

/// Codepoint consumers substitute for characters missing from the atlas.
pub const INVALID_GLYPH: u32 = 127;

/// Tag identifying the page pixel encoding.
pub const OUTPUT_FORMAT: &str = "DDS_A8";

/// A glyph entry as it appears in the descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExportedGlyph {
    /// Codepoint.
    pub id: u32,
    /// Reserved, always zero.
    pub a: i32,
    /// Cell width less two pixels.
    pub b: i32,
    /// Reserved, always zero.
    pub c: i32,
    /// Page index.
    pub page: u32,
    /// Top edge plus the vertical shift.
    pub top: i32,
    /// Bottom edge plus the vertical shift.
    pub bottom: i32,
    /// Left edge plus the horizontal shift.
    pub left: i32,
    /// Right edge less the horizontal margin, plus the horizontal shift.
    pub right: i32,
}

impl ExportedGlyph {
    /// Applies the export shifts in `config` to a placement.
    pub fn new(placement: &GlyphPlacement, config: &PackingConfig) -> Self {
        let glyph_box = placement.glyph_box;
        Self {
            id: u32::from(placement.codepoint),
            a: 0,
            b: placement.export_width(),
            c: 0,
            page: placement.page,
            top: glyph_box.top.saturating_add(config.vertical_shift),
            bottom: glyph_box.bottom.saturating_add(config.vertical_shift),
            left: glyph_box.left.saturating_add(config.horizontal_shift),
            right: glyph_box
                .right
                .saturating_sub(config.horizontal_margin)
                .saturating_add(config.horizontal_shift),
        }
    }
}

/// Serializes the descriptor for one run.
///
/// Must only be used once every page has been flushed, so that the page
/// count is final.
#[derive(Debug)]
pub struct DescriptorWriter<'a> {
    font: &'a FontProperties,
    size: PixelSize,
    config: &'a PackingConfig,
    page_stem: &'a str,
}

impl<'a> DescriptorWriter<'a> {
    /// Creates a writer. `page_stem` is the file name prefix pages are
    /// referenced by, without any directory.
    pub fn new(
        font: &'a FontProperties,
        size: PixelSize,
        config: &'a PackingConfig,
        page_stem: &'a str,
    ) -> Self {
        Self {
            font,
            size,
            config,
            page_stem,
        }
    }

    /// File name of page `index` as referenced from the descriptor.
    pub fn page_file_name(&self, index: u32) -> String {
        format!("{}_{index}.dds", self.page_stem)
    }

    /// Writes the complete document to `out`.
    pub fn write(
        &self,
        out: impl Write,
        page_count: u32,
        glyphs: &GlyphRegistry,
    ) -> Result<(), Error> {
        let mut writer = Writer::new_with_indent(out, b'\t', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let dimension = self.config.page_dimension;
        writer.write_event(Event::Start(element(
            ROOT_ELEMENT,
            &[
                ("Version", "1".to_owned()),
                ("FaceName", self.font.family_name.clone()),
                ("PtSize", self.size.point_size().to_string()),
                ("Weight", FONT_WEIGHT.to_string()),
                ("Bold", u8::from(self.font.bold).to_string()),
                ("Italic", u8::from(self.font.italic).to_string()),
                ("Outline", "0".to_owned()),
                ("OutputFormat", OUTPUT_FORMAT.to_owned()),
                ("InvalidGlyph", INVALID_GLYPH.to_string()),
            ],
        )))?;

        writer.write_event(Event::Start(element("Pages", &[("Count", page_count.to_string())])))?;
        for index in 0..page_count {
            writer.write_event(Event::Empty(element(
                "Page",
                &[
                    ("FileName", self.page_file_name(index)),
                    ("Width", dimension.to_string()),
                    ("Height", dimension.to_string()),
                ],
            )))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Pages")))?;

        writer.write_event(Event::Start(element(
            "Glyphs",
            &[("Count", glyphs.len().to_string())],
        )))?;
        for placement in glyphs {
            let glyph = ExportedGlyph::new(placement, self.config);
            writer.write_event(Event::Empty(element(
                "Glyph",
                &[
                    ("ID", glyph.id.to_string()),
                    ("A", glyph.a.to_string()),
                    ("B", glyph.b.to_string()),
                    ("C", glyph.c.to_string()),
                    ("Page", glyph.page.to_string()),
                    ("Top", glyph.top.to_string()),
                    ("Bottom", glyph.bottom.to_string()),
                    ("Left", glyph.left.to_string()),
                    ("Right", glyph.right.to_string()),
                ],
            )))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Glyphs")))?;

        writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        writer.get_mut().write_all(b"\n")?;
        log::info!(
            "descriptor lists {page_count} page(s) and {} glyph(s)",
            glyphs.len()
        );
        Ok(())
    }

    /// Renders the complete document to a string.
    pub fn render(&self, page_count: u32, glyphs: &GlyphRegistry) -> Result<String, Error> {
        let mut bytes = Vec::new();
        self.write(&mut bytes, page_count, glyphs)?;
        String::from_utf8(bytes).map_err(|err| Error::internal(err.to_string()))
    }
}

fn element<'n>(name: &'n str, attributes: &[(&str, String)]) -> BytesStart<'n> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        start.push_attribute((*key, value.as_str()));
    }
    start
}
