// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uncompressed single-channel (A8) DDS encoding of finished pages.
//!
//! Every page is written as a 128-byte header followed by `dimension²` alpha
//! bytes, top row first. All header fields are little-endian.

use std::io::{self, Write};

use crate::page::PageBuffer;

/// `"DDS "`, the first four bytes of every file.
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

/// Total header length including the magic.
pub const HEADER_LEN: usize = 128;

/// Length of the header proper, excluding the magic.
const HEADER_SIZE: u32 = 124;

/// Number of `u32` fields following the magic.
const HEADER_FIELDS: usize = (HEADER_LEN - DDS_MAGIC.len()) / 4;

/// Length of the pixel-format sub-block.
const PIXEL_FORMAT_SIZE: u32 = 32;

const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PIXELFORMAT: u32 = 0x1000;

const DDPF_ALPHA: u32 = 0x2;

const DDSCAPS_ALPHA: u32 = 0x2;
const DDSCAPS_TEXTURE: u32 = 0x1000;

/// The pixel-format sub-block of a DDS header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelFormat {
    /// Size of this block; always 32.
    pub size: u32,
    /// Which of the fields below are meaningful.
    pub flags: u32,
    /// Compression code; zero for uncompressed data.
    pub four_cc: u32,
    /// Bits per pixel.
    pub rgb_bit_count: u32,
    /// Mask of the red channel.
    pub r_bit_mask: u32,
    /// Mask of the green channel.
    pub g_bit_mask: u32,
    /// Mask of the blue channel.
    pub b_bit_mask: u32,
    /// Mask of the alpha channel.
    pub a_bit_mask: u32,
}

impl PixelFormat {
    /// Alpha only, 8 bits per pixel.
    pub const ALPHA8: Self = Self {
        size: PIXEL_FORMAT_SIZE,
        flags: DDPF_ALPHA,
        four_cc: 0,
        rgb_bit_count: 8,
        r_bit_mask: 0,
        g_bit_mask: 0,
        b_bit_mask: 0,
        a_bit_mask: 0xFF,
    };

    fn fields(&self) -> [u32; 8] {
        [
            self.size,
            self.flags,
            self.four_cc,
            self.rgb_bit_count,
            self.r_bit_mask,
            self.g_bit_mask,
            self.b_bit_mask,
            self.a_bit_mask,
        ]
    }
}

/// The fixed-layout DDS header, minus the magic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DdsHeader {
    /// Size of this structure; always 124.
    pub size: u32,
    /// Which of the fields below are meaningful.
    pub flags: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Surface width in pixels.
    pub width: u32,
    /// Row pitch or linear size; unused here.
    pub pitch_or_linear_size: u32,
    /// Volume depth; unused here.
    pub depth: u32,
    /// Number of mipmap levels; none here.
    pub mip_map_count: u32,
    /// Reserved, always zero.
    pub reserved1: [u32; 11],
    /// Pixel format description.
    pub pixel_format: PixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Cube map and volume capabilities; unused here.
    pub caps2: u32,
    /// Unused.
    pub caps3: u32,
    /// Unused.
    pub caps4: u32,
    /// Reserved, always zero.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Header for a square, uncompressed, mipmap-free A8 surface.
    pub fn alpha8(dimension: u32) -> Self {
        Self {
            size: HEADER_SIZE,
            flags: DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT,
            height: dimension,
            width: dimension,
            pitch_or_linear_size: 0,
            depth: 0,
            mip_map_count: 0,
            reserved1: [0; 11],
            pixel_format: PixelFormat::ALPHA8,
            caps: DDSCAPS_ALPHA | DDSCAPS_TEXTURE,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    /// Writes the magic followed by every field in on-disk order.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(&self.to_bytes())
    }

    /// The serialized header, magic included.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0; HEADER_LEN];
        let (magic, fields) = bytes.split_at_mut(DDS_MAGIC.len());
        magic.copy_from_slice(&DDS_MAGIC);
        for (chunk, field) in fields.chunks_exact_mut(4).zip(self.fields()) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        bytes
    }

    /// Every field after the magic, in on-disk order.
    fn fields(&self) -> [u32; HEADER_FIELDS] {
        let [r0, r1, r2, r3, r4, r5, r6, r7, r8, r9, r10] = self.reserved1;
        let [pf0, pf1, pf2, pf3, pf4, pf5, pf6, pf7] = self.pixel_format.fields();
        [
            self.size,
            self.flags,
            self.height,
            self.width,
            self.pitch_or_linear_size,
            self.depth,
            self.mip_map_count,
            r0,
            r1,
            r2,
            r3,
            r4,
            r5,
            r6,
            r7,
            r8,
            r9,
            r10,
            pf0,
            pf1,
            pf2,
            pf3,
            pf4,
            pf5,
            pf6,
            pf7,
            self.caps,
            self.caps2,
            self.caps3,
            self.caps4,
            self.reserved2,
        ]
    }
}

/// Writes `page` as a complete DDS file. Does not modify the page.
pub fn write_page(page: &PageBuffer, out: &mut impl Write) -> io::Result<()> {
    DdsHeader::alpha8(page.dimension()).write_to(out)?;
    out.write_all(page.pixels())
}

/// Encodes `page` as a complete DDS file in memory.
pub fn encode_page(page: &PageBuffer) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + page.pixels().len());
    bytes.extend_from_slice(&DdsHeader::alpha8(page.dimension()).to_bytes());
    bytes.extend_from_slice(page.pixels());
    bytes
}
