//! Decoder for 8-bit "cast bitmap" photo assets.
//!
//! A cast bitmap is the raster member of a multimedia-authoring cast file: a fixed header that
//! mixes big-endian geometry fields with little-endian chunk bookkeeping, followed by a
//! packbits-style run-length payload of palette indices.
//!
//! # Layout
//!
//! ```plain
//! offset  size  order  field
//! ------  ----  -----  ------------------------------------------------
//!      0    28     -   cast properties preamble (opaque)
//!     28     2    BE   total width (row stride), high bit is a flag
//!     30     8    BE   bounding rect: top, left, bottom, right (i16)
//!     38     1     -   reserved1
//!     39     7     -   reserved2 (skipped)
//!     46     2    BE   reserved3
//!     48     2    BE   reserved4
//!     50     1     -   reserved5
//!     51     1     -   bit depth, must be 8
//!     52     4    BE   palette kind (i32), must be -2 (system grayscale)
//!     56     4    LE   unknown
//!     60     4     -   chunk tag, `BITD` stored reversed
//!     64     4    LE   declared payload length
//!     68     ..    -   run-length payload
//! ```
//!
//! # Payload
//!
//! See [`rle`]. The decoded index buffer has `total_width * rect.height` entries; each row is
//! `total_width` indices long, of which the first `rect.width` are visible.
//!
//! # Rendering
//!
//! Indices are resolved through a [`Palette`] into RGB. [`RenderStyle::Sepia`] additionally
//! reprojects the result through the fixed [`sepia::SEPIA_PALETTE`].
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod cursor;
pub mod decode;
pub mod header;
pub mod mapper;
pub mod palette;
pub mod raster;
pub mod rle;
pub mod sepia;

pub use decode::{decode, render, DecodeError, DecodeOptions, RenderStyle};
pub use header::{Header, Rect};
pub use palette::Palette;
pub use raster::DecodedImage;

/// An RGB triple.
pub type Rgb = [u8; 3];

pub mod consts {
    /// Bytes of cast-member properties preceding the bitmap header.
    pub const CAST_PROPERTIES_OFFSET: usize = 28;

    /// The only supported bit depth.
    pub const BIT_DEPTH: u8 = 8;

    /// Palette id of the built-in system grayscale palette.
    ///
    /// The header field stores the id plus one, so the raw value reads `-2`.
    pub const PALETTE_KIND_GRAYSCALE: i32 = -3;

    /// The `BITD` chunk fourcc, as it appears in little-endian cast files.
    pub const BITD_TAG: [u8; 4] = *b"DTIB";

    /// Mask applied to the total width field; the high bit is a flag.
    pub const TOTAL_WIDTH_MASK: u16 = 0x7FFF;

    /// Default cap on decoded entries, 4096 x 4096.
    pub const MAX_PIXELS: usize = 1 << 24;
}
