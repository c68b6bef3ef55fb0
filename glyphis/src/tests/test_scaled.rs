// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use skrifa::raw::tables::head::MacStyle;
use skrifa::raw::tables::os2::SelectionFlags;

use crate::scaled::style_flags;
use crate::{ErrorKind, GlyphSource, ScaledFont};

use super::utils::size;

/// Font used by the ignored tests below, e.g. a DejaVu or Noto Sans file.
const TEST_FONT_VAR: &str = "GLYPHIS_TEST_FONT";

#[test]
fn garbage_is_not_a_font() {
    let err = ScaledFont::new(b"definitely not a font file", 0).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FontLoad);
    assert!(err.to_string().starts_with("cannot load font: "), "{err}");
}

#[test]
fn empty_data_is_not_a_font() {
    let err = ScaledFont::new(&[], 0).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FontLoad);
}

#[test]
fn style_comes_from_fs_selection() {
    assert_eq!(style_flags(Some(SelectionFlags::BOLD), None), (true, false));
    assert_eq!(style_flags(Some(SelectionFlags::ITALIC), None), (false, true));
    assert_eq!(style_flags(Some(SelectionFlags::OBLIQUE), None), (false, true));
    assert_eq!(style_flags(Some(SelectionFlags::REGULAR), None), (false, false));
    assert_eq!(
        style_flags(Some(SelectionFlags::BOLD | SelectionFlags::ITALIC), None),
        (true, true)
    );
    // OS/2 wins over macStyle when both are present.
    assert_eq!(
        style_flags(
            Some(SelectionFlags::REGULAR),
            Some(MacStyle::BOLD | MacStyle::ITALIC)
        ),
        (false, false)
    );
}

#[test]
fn style_falls_back_to_mac_style() {
    assert_eq!(style_flags(None, Some(MacStyle::BOLD)), (true, false));
    assert_eq!(style_flags(None, Some(MacStyle::ITALIC)), (false, true));
    assert_eq!(
        style_flags(None, Some(MacStyle::BOLD | MacStyle::ITALIC)),
        (true, true)
    );
    assert_eq!(style_flags(None, None), (false, false));
}

fn load_test_font() -> Option<Vec<u8>> {
    let path = std::env::var_os(TEST_FONT_VAR)?;
    Some(std::fs::read(path).unwrap())
}

#[test]
#[ignore = "needs a font file named by GLYPHIS_TEST_FONT"]
fn system_font_rasterizes_letters() {
    let Some(data) = load_test_font() else {
        return;
    };
    let mut font = ScaledFont::new(&data, 0).unwrap();

    let face = font.face_metrics();
    assert!(face.units_per_em > 0);
    assert!(face.ascender > 0 && face.descender <= 0);
    assert!(face.height >= face.ascender - face.descender);
    assert!(!font.properties().family_name.is_empty());

    let glyph = font.rasterize('A', size(24)).unwrap();
    assert!(glyph.advance > 0 && glyph.advance <= 48, "{glyph:?}");
    assert!(glyph.width > 0 && glyph.rows > 0);
    assert_eq!(glyph.data.len(), (glyph.width * glyph.rows) as usize);
    assert!(glyph.data.iter().any(|&coverage| coverage > 0));
}

#[test]
#[ignore = "needs a font file named by GLYPHIS_TEST_FONT"]
fn system_font_space_and_unmapped_characters() {
    let Some(data) = load_test_font() else {
        return;
    };
    let mut font = ScaledFont::new(&data, 0).unwrap();

    let space = font.rasterize(' ', size(24)).unwrap();
    assert!(space.advance > 0);
    assert!(space.data.iter().all(|&coverage| coverage == 0));

    // Plane 16 private use; no general-purpose font maps it.
    assert!(font.rasterize('\u{10FFFD}', size(24)).is_none());
}
