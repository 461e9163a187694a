//! Sepia recoloring.
//!
//! Each pixel is replaced by the entry of [`SEPIA_PALETTE`] closest to it in luminance.

use crate::{DecodedImage, Rgb};
use itertools::Itertools;

/// Dark brown to warm highlight, in the order the table is shipped.
pub const SEPIA_PALETTE: [Rgb; 13] = [
    [0xb8, 0x5e, 0x2f],
    [0xc0, 0x65, 0x33],
    [0xf0, 0x8b, 0x46],
    [0x68, 0x1f, 0x10],
    [0x88, 0x38, 0x1c],
    [0xc8, 0x6b, 0x36],
    [0xff, 0xd1, 0x69],
    [0xe0, 0x7e, 0x3f],
    [0xff, 0xb1, 0x59],
    [0xff, 0xde, 0x6f],
    [0x70, 0x25, 0x13],
    [0xff, 0xea, 0x75],
    [0xff, 0xd2, 0x69],
];

const SEPIA_LUMA: [u8; 13] = {
    let mut luma = [0; 13];
    let mut i = 0;
    while i < SEPIA_PALETTE.len() {
        luma[i] = luminance(SEPIA_PALETTE[i]);
        i += 1;
    }
    luma
};

/// Nearest [`SEPIA_PALETTE`] entry for each luma level.
const LUMA_TO_ENTRY: [u8; 256] = {
    let mut lut = [0; 256];
    let mut luma = 0;
    while luma < lut.len() {
        let mut best = 0;
        let mut i = 1;
        while i < SEPIA_LUMA.len() {
            if SEPIA_LUMA[i].abs_diff(luma as u8) < SEPIA_LUMA[best].abs_diff(luma as u8) {
                best = i;
            }
            i += 1;
        }
        lut[luma] = best as u8;
        luma += 1;
    }
    lut
};

/// Rec. 601 luma, integer arithmetic.
#[inline]
pub const fn luminance([r, g, b]: Rgb) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Index into [`SEPIA_PALETTE`] for a pixel. Ties go to the lower index.
pub fn nearest_index(pixel: Rgb) -> usize {
    let luma = luminance(pixel);
    SEPIA_LUMA
        .iter()
        .position_min_by_key(|&&l| l.abs_diff(luma))
        .unwrap_or(0)
}

/// Reprojects every pixel through [`SEPIA_PALETTE`]. Dimensions are unchanged.
pub fn remap(image: &DecodedImage) -> DecodedImage {
    image.recolor(|pixel| SEPIA_PALETTE[usize::from(LUMA_TO_ENTRY[usize::from(luminance(pixel))])])
}
