// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::dds::HEADER_LEN;
use crate::{AtlasBuilder, ErrorKind, GlyphBox, MemorySink, PackingConfig, RasterGlyph};

use super::utils::{bare_config, size, square_glyph, FakeSource};

/// 11 pixel advances at size 12 give 11x12 cells: two per shelf on a 32
/// pixel page, two shelves per page.
fn small_atlas() -> (AtlasBuilder, FakeSource) {
    let builder = AtlasBuilder::new(bare_config(32), size(12));
    (builder, FakeSource::new("ABCDEF", 11))
}

#[test]
fn glyphs_are_packed_in_target_order() {
    let (builder, mut source) = small_atlas();

    let atlas = builder
        .build(&mut source, &['A', 'B', 'C'], MemorySink::new())
        .unwrap();

    let boxes: Vec<_> = atlas.glyphs().iter().map(|g| g.glyph_box).collect();
    assert_eq!(
        boxes,
        [
            GlyphBox {
                left: 1,
                right: 12,
                top: 20,
                bottom: 32
            },
            GlyphBox {
                left: 12,
                right: 23,
                top: 20,
                bottom: 32
            },
            GlyphBox {
                left: 1,
                right: 12,
                top: 8,
                bottom: 20
            },
        ]
    );
    assert!(atlas.glyphs().iter().all(|g| g.page == 0));
    assert_eq!(atlas.page_count(), 1);
    assert_eq!(atlas.sink().pages().len(), 1);
    assert_eq!(source.requests, ['A', 'B', 'C']);
}

#[test]
fn bitmaps_land_above_the_baseline() {
    let (builder, mut source) = small_atlas();

    let atlas = builder
        .build(&mut source, &['A'], MemorySink::new())
        .unwrap();

    // Baseline: 32 + 12 * -200 / 1000 = 30. Origin: (1 + 1, 30 - 3).
    let pixels = &atlas.sink().pages()[0][HEADER_LEN..];
    let glyph = source.glyph('A');
    assert_eq!(pixels[27 * 32 + 2], glyph.data[0]);
    assert_eq!(pixels[27 * 32 + 3], glyph.data[1]);
    assert_eq!(pixels[28 * 32 + 2], glyph.data[2]);
    assert_eq!(pixels[28 * 32 + 3], glyph.data[3]);
}

#[test]
fn page_count_follows_the_last_page_index() {
    let (builder, mut source) = small_atlas();
    let targets: Vec<char> = "ABCDEF".chars().collect();

    let atlas = builder
        .build(&mut source, &targets, MemorySink::new())
        .unwrap();

    let pages: Vec<_> = atlas.glyphs().iter().map(|g| g.page).collect();
    assert_eq!(pages, [0, 0, 0, 0, 1, 1]);
    assert_eq!(atlas.page_count(), 2);
    assert_eq!(atlas.sink().pages().len(), 2);

    let xml = atlas.render_descriptor("small").unwrap();
    assert!(xml.contains("<Pages Count=\"2\">"), "{xml}");
    assert!(xml.contains("FileName=\"small_1.dds\""), "{xml}");
    assert!(!xml.contains("small_2.dds"), "{xml}");
    assert!(xml.contains("<Glyphs Count=\"6\">"), "{xml}");
}

#[test]
fn missing_glyphs_are_skipped() {
    let (builder, mut source) = small_atlas();

    let atlas = builder
        .build(&mut source, &['A', 'Z', 'B', 'Z'], MemorySink::new())
        .unwrap();

    let placed: Vec<_> = atlas.glyphs().iter().map(|g| g.codepoint).collect();
    assert_eq!(placed, ['A', 'B']);
    assert_eq!(atlas.missing(), ['Z', 'Z']);
    assert_eq!(atlas.glyphs().iter().nth(1).unwrap().glyph_box.left, 12);
}

#[test]
fn runs_are_reproducible() {
    let targets: Vec<char> = "ABCDEFFEDCBA".chars().collect();
    let run = || {
        let (builder, mut source) = small_atlas();
        let atlas = builder
            .build(&mut source, &targets, MemorySink::new())
            .unwrap();
        let xml = atlas.render_descriptor("again").unwrap();
        (atlas.into_sink().into_pages(), xml)
    };

    let (first_pages, first_xml) = run();
    let (second_pages, second_xml) = run();

    assert_eq!(first_pages, second_pages);
    assert_eq!(first_xml, second_xml);
}

#[test]
fn no_targets_still_writes_one_page() {
    let (builder, mut source) = small_atlas();

    let atlas = builder
        .build(&mut source, &[], MemorySink::new())
        .unwrap();

    assert_eq!(atlas.page_count(), 1);
    assert!(atlas.glyphs().is_empty());
    let page = &atlas.sink().pages()[0];
    assert_eq!(page.len(), HEADER_LEN + 32 * 32);
    assert!(page[HEADER_LEN..].iter().all(|&b| b == 0));
    let xml = atlas.render_descriptor("blank").unwrap();
    assert!(xml.contains("<Glyphs Count=\"0\">"), "{xml}");
}

#[test]
fn outline_less_glyphs_still_take_a_cell() {
    let builder = AtlasBuilder::new(bare_config(32), size(12));
    let space = RasterGlyph {
        advance: 5,
        ..RasterGlyph::default()
    };
    let mut source = FakeSource::new("A", 11).with_glyph(' ', space);

    let atlas = builder
        .build(&mut source, &[' ', 'A'], MemorySink::new())
        .unwrap();

    let boxes: Vec<_> = atlas.glyphs().iter().map(|g| g.glyph_box).collect();
    assert_eq!(boxes[0].width(), 5);
    assert_eq!(boxes[1].left, 6);
}

#[test]
fn margins_widen_and_heighten_cells() {
    let config = PackingConfig {
        page_dimension: 64,
        horizontal_margin: 4,
        vertical_margin: 8,
        horizontal_shift: 0,
        vertical_shift: 0,
    };
    let builder = AtlasBuilder::new(config, size(12));
    let mut source = FakeSource::new("A", 11);

    let atlas = builder
        .build(&mut source, &['A'], MemorySink::new())
        .unwrap();

    let placed = atlas.glyphs().iter().next().unwrap().glyph_box;
    assert_eq!(placed.width(), 15);
    assert_eq!(placed.height(), 20);
    assert_eq!(placed.bottom, 56);
}

#[test]
fn oversized_glyph_aborts_the_run() {
    let builder = AtlasBuilder::new(bare_config(32), size(12));
    let mut source = FakeSource::new("A", 11).with_glyph('W', square_glyph('W', 40));
    let mut sink = MemorySink::new();

    let err = builder
        .build(&mut source, &['A', 'W'], &mut sink)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCell);
    assert!(sink.pages().is_empty());
}

#[test]
fn extreme_geometry_is_refused_before_rasterizing() {
    let configs = [
        PackingConfig {
            vertical_shift: i32::MIN,
            ..bare_config(32)
        },
        PackingConfig {
            horizontal_margin: i32::MAX,
            ..bare_config(32)
        },
    ];

    for config in configs {
        let mut source = FakeSource::new("A", 11);
        let mut sink = MemorySink::new();

        let err = AtlasBuilder::new(config, size(12))
            .build(&mut source, &['A'], &mut sink)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidConfig, "{config:?}");
        assert!(source.requests.is_empty());
        assert!(sink.pages().is_empty());
    }
}

#[test]
fn huge_advance_is_an_invalid_cell() {
    let builder = AtlasBuilder::new(PackingConfig::default(), size(12));
    let mut source = FakeSource::new("", 11).with_glyph('W', square_glyph('W', i32::MAX));

    let err = builder
        .build(&mut source, &['W'], MemorySink::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCell);
    assert!(err.to_string().contains(&format!("{}x", i32::MAX)), "{err}");
}

#[test]
fn descriptor_reflects_font_and_size() {
    let (builder, mut source) = small_atlas();

    let atlas = builder
        .build(&mut source, &['A'], MemorySink::new())
        .unwrap();
    let xml = atlas.render_descriptor("fake").unwrap();

    assert_eq!(atlas.properties().family_name, "Fake Sans");
    assert!(xml.contains("FaceName=\"Fake Sans\""), "{xml}");
    assert!(xml.contains("PtSize=\"60\""), "{xml}");
    assert!(xml.contains("Bold=\"1\""), "{xml}");
    assert!(
        xml.contains("<Page FileName=\"fake_0.dds\" Width=\"32\" Height=\"32\"/>"),
        "{xml}"
    );
}
