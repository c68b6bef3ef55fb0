// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyphis packs rasterized glyphs into fixed-size square texture pages and
//! describes where each glyph landed.
//!
//! A run takes a [`GlyphSource`], a list of characters, a [`PixelSize`] and a
//! [`PackingConfig`]. Glyph cells are placed along one shelf at a time by the
//! [`Packer`]; full pages are encoded as uncompressed A8 DDS files through a
//! [`PageSink`]; the resulting [`GlyphRegistry`] is written out as an XML
//! descriptor by the [`DescriptorWriter`]. [`AtlasBuilder`] drives the whole
//! pipeline.
//!
//! ## Features
//!
//! - `swash` (enabled by default): Provides [`ScaledFont`], a [`GlyphSource`]
//!   reading fonts with Skrifa and rasterizing them with Swash.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod packer;
mod page;
mod registry;
mod source;

pub mod config;
pub mod dds;
pub mod descriptor;
pub mod sink;
pub mod targets;

#[cfg(feature = "swash")]
mod scaled;

#[cfg(test)]
mod tests;

pub use crate::builder::{Atlas, AtlasBuilder};
pub use crate::config::{Axis, PackingConfig, PixelSize};
pub use crate::descriptor::{DescriptorWriter, ExportedGlyph};
pub use crate::error::{Error, ErrorKind};
pub use crate::packer::{CellSize, GlyphBox, Packer, Placement};
pub use crate::page::{Cursor, PageBuffer};
pub use crate::registry::{GlyphPlacement, GlyphRegistry};
#[cfg(feature = "swash")]
pub use crate::scaled::ScaledFont;
pub use crate::sink::{DirectorySink, MemorySink, PageSink};
pub use crate::source::{FaceMetrics, FontProperties, GlyphSource, RasterGlyph};
pub use crate::targets::{decode_targets, MalformedUtf8, Utf8ErrorKind};
