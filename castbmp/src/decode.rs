use crate::{
    consts::MAX_PIXELS,
    cursor::{ByteCursor, CursorError},
    header::Header,
    mapper, rle, sepia, DecodedImage, Palette,
};
use core::str::FromStr;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    #[snafu(display("invalid {field}"))]
    InvalidFormat { field: &'static str },
    #[snafu(display("truncated input: {source}"))]
    Truncated { source: CursorError },
    #[snafu(display("decoded data exceeds the {capacity}-entry index buffer"))]
    BufferOverflow { capacity: usize },
    #[snafu(display("palette index {index} out of range for a {len}-entry palette"))]
    PaletteIndexOutOfRange { index: u8, len: usize },
    #[snafu(display("row {row} has {available} of {width} visible entries"))]
    RowTooShort {
        row: usize,
        available: usize,
        width: usize,
    },
    #[snafu(display("payload is {actual} bytes, header declares {declared}"))]
    PayloadLengthMismatch { declared: u32, actual: usize },
    #[snafu(display("{pixels} pixels exceed the {max}-pixel limit"))]
    TooLarge { pixels: usize, max: usize },
}

/// Strictness switches and limits. The default accepts everything the reference renderer
/// accepts, up to [`MAX_PIXELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail with [`DecodeError::RowTooShort`] when the row stride is narrower than the visible
    /// width, instead of leaving the missing columns black.
    pub strict_rows: bool,
    /// Require the payload to be exactly as long as the header declares.
    pub enforce_payload_length: bool,
    /// Require the chunk tag to read `BITD`.
    pub require_tag: bool,
    /// Upper bound on both the index buffer and the visible image, in entries. Checked before
    /// anything is allocated.
    pub max_pixels: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_rows: false,
            enforce_payload_length: false,
            require_tag: false,
            max_pixels: MAX_PIXELS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStyle {
    Greyscale,
    Sepia,
}

impl RenderStyle {
    /// Resolves an optional `style` request parameter. Only an exact `greyscale` renders
    /// greyscale; anything else, including other casings, renders sepia.
    pub fn from_query(style: Option<&str>) -> Self {
        match style {
            Some("greyscale") => RenderStyle::Greyscale,
            _ => RenderStyle::Sepia,
        }
    }
}

impl FromStr for RenderStyle {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(style) = s.eq_ignore_ascii_case("greyscale").then_some(RenderStyle::Greyscale)
              .or_else(|| s.eq_ignore_ascii_case("sepia").then_some(RenderStyle::Sepia))
        else { return Err("invalid style, expected `greyscale` or `sepia`"); };

        Ok(style)
    }
}

/// Decodes a cast bitmap into an RGB image, resolving indices through `palette`.
///
/// Any failure aborts the whole decode; no partial image is returned.
pub fn decode(
    data: &[u8],
    palette: &Palette,
    options: &DecodeOptions,
) -> Result<DecodedImage, DecodeError> {
    let mut cursor = ByteCursor::new(data);
    let header = Header::parse(&mut cursor, options)?;

    let indices = rle::decompress(cursor.rest(), header.index_buffer_len())?;
    mapper::map_pixels(
        &indices,
        header.total_width,
        header.rect,
        palette,
        options.strict_rows,
    )
}

/// [`decode`], followed by the sepia remap when `style` asks for it.
pub fn render(
    data: &[u8],
    palette: &Palette,
    style: RenderStyle,
    options: &DecodeOptions,
) -> Result<DecodedImage, DecodeError> {
    let image = decode(data, palette, options)?;

    Ok(match style {
        RenderStyle::Greyscale => image,
        RenderStyle::Sepia => sepia::remap(&image),
    })
}
