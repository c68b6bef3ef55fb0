// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line front end: rasterizes the characters listed in a UTF-8 file
//! from one font face and writes `<PREFIX>_<n>.dds` pages plus a
//! `<PREFIX>.xml` descriptor.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use glyphis::config::{
    DEFAULT_HORIZONTAL_MARGIN, DEFAULT_PAGE_DIMENSION, DEFAULT_VERTICAL_MARGIN, MAX_OFFSET,
    MAX_PAGE_DIMENSION, MIN_PAGE_DIMENSION,
};
use glyphis::{AtlasBuilder, DirectorySink, PackingConfig, PixelSize, ScaledFont};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "warn,glyphis=info";

const EXIT_FAILURE: u8 = 1;
const EXIT_INTERNAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "glyphis", version, about = "Pack font glyphs into DDS A8 texture pages")]
struct Args {
    /// Font file (TrueType, OpenType or collection)
    #[arg(value_name = "FONT")]
    font: PathBuf,

    /// Output prefix; pages go to `<PREFIX>_<n>.dds`, the descriptor to `<PREFIX>.xml`
    #[arg(value_name = "PREFIX")]
    prefix: PathBuf,

    /// UTF-8 file listing the characters to pack, in order
    #[arg(value_name = "TARGETS")]
    targets: PathBuf,

    /// Glyph size in pixels (1 to 144)
    #[arg(value_name = "SIZE")]
    size: u32,

    /// Extra pixels added to the width of every glyph cell
    #[arg(
        long,
        default_value_t = DEFAULT_HORIZONTAL_MARGIN,
        value_parser = clap::value_parser!(i32).range(0..=i64::from(MAX_OFFSET))
    )]
    horizontal_margin: i32,

    /// Extra pixels added to the height of every glyph cell
    #[arg(
        long,
        default_value_t = DEFAULT_VERTICAL_MARGIN,
        value_parser = clap::value_parser!(i32).range(0..=i64::from(MAX_OFFSET))
    )]
    vertical_margin: i32,

    /// Offset added to exported left and right coordinates
    #[arg(
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-i64::from(MAX_OFFSET)..=i64::from(MAX_OFFSET))
    )]
    horizontal_shift: i32,

    /// Offset added to exported top and bottom coordinates
    #[arg(
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-i64::from(MAX_OFFSET)..=i64::from(MAX_OFFSET))
    )]
    vertical_shift: i32,

    /// Edge length of every square page, in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_DIMENSION,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_PAGE_DIMENSION)..=i64::from(MAX_PAGE_DIMENSION))
    )]
    page_size: u32,

    /// Face to use within a font collection
    #[arg(long, default_value_t = 0)]
    face_index: u32,
}

impl Args {
    fn packing_config(&self) -> PackingConfig {
        PackingConfig {
            page_dimension: self.page_size,
            horizontal_margin: self.horizontal_margin,
            vertical_margin: self.vertical_margin,
            horizontal_shift: self.horizontal_shift,
            vertical_shift: self.vertical_shift,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // `--help` and `--version` also arrive here, on stdout.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs one atlas generation. On failure, every file this run created is
/// removed again.
fn run(args: &Args) -> anyhow::Result<()> {
    let size = PixelSize::new(args.size)?;
    let page_stem = page_stem(&args.prefix)?;

    let font_data = fs::read(&args.font)
        .with_context(|| format!("cannot read font {}", args.font.display()))?;
    let mut font = ScaledFont::new(&font_data, args.face_index)
        .map_err(|err| err.with_path(&args.font))?;

    let target_bytes = fs::read(&args.targets)
        .with_context(|| format!("cannot read target list {}", args.targets.display()))?;
    let targets =
        glyphis::decode_targets(&target_bytes).map_err(|err| err.with_path(&args.targets))?;
    log::info!("packing {} character(s) at {}px", targets.len(), size.get());

    let mut sink = DirectorySink::new(&args.prefix);
    let result = write_atlas(args, &mut font, &targets, size, page_stem, &mut sink);
    if result.is_err() {
        sink.discard();
    }
    result
}

fn write_atlas(
    args: &Args,
    font: &mut ScaledFont<'_>,
    targets: &[char],
    size: PixelSize,
    page_stem: &str,
    sink: &mut DirectorySink,
) -> anyhow::Result<()> {
    let atlas = AtlasBuilder::new(args.packing_config(), size).build(font, targets, sink)?;
    if !atlas.missing().is_empty() {
        log::warn!(
            "{} character(s) were not in the font and have no entry in the descriptor",
            atlas.missing().len()
        );
    }

    let xml = atlas.render_descriptor(page_stem)?;
    let path = descriptor_path(&args.prefix);
    if let Err(err) = fs::write(&path, xml) {
        if path.exists() {
            if let Err(remove_err) = fs::remove_file(&path) {
                log::warn!("could not remove {}: {remove_err}", path.display());
            }
        }
        return Err(glyphis::Error::from(err).with_path(path).into());
    }
    log::info!(
        "wrote {} glyph(s) on {} page(s), described in {}",
        atlas.glyphs().len(),
        atlas.page_count(),
        path.display()
    );
    Ok(())
}

/// The name pages are referenced by from the descriptor: the last component
/// of the prefix.
fn page_stem(prefix: &Path) -> anyhow::Result<&str> {
    prefix
        .file_name()
        .and_then(OsStr::to_str)
        .with_context(|| format!("output prefix {} has no UTF-8 file name", prefix.display()))
}

fn descriptor_path(prefix: &Path) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(".xml");
    PathBuf::from(name)
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<glyphis::Error>() {
        Some(err) if err.is_internal() => EXIT_INTERNAL,
        _ => EXIT_FAILURE,
    }
}
