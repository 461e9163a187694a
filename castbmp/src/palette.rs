use crate::{
    cursor::{ByteCursor, CursorError},
    Rgb,
};
use alloc::vec::Vec;
use byteorder::LittleEndian;
use snafu::{ensure, ResultExt, Snafu};

mod greyscale;

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum PaletteError {
    #[snafu(display("truncated palette file"))]
    Truncated { source: CursorError },
    #[snafu(display("palette file declares no entries"))]
    Empty,
}

/// Ordered, index-addressable color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// The 256-entry system grayscale palette.
    pub fn greyscale() -> Self {
        Self::new(greyscale::GREYSCALE_LEVELS.iter().map(|&l| [l; 3]).collect())
    }

    /// Parses a palette file.
    ///
    /// ```plain
    /// size  field
    /// ----  ---------------------------------
    ///    4  tag
    ///    4  i32le
    ///    4  tag
    ///    4  tag
    ///    4  i32le
    ///    2  u16le
    ///    2  u16le entry count N
    ///  4*N  entries: r, g, b, padding
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self, PaletteError> {
        let colors =
            read_colors(&mut ByteCursor::new(data)).context(palette_error::TruncatedSnafu)?;
        ensure!(!colors.is_empty(), palette_error::EmptySnafu);

        Ok(Self::new(colors))
    }

    #[inline]
    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(usize::from(index)).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }
}

fn read_colors(cursor: &mut ByteCursor<'_>) -> Result<Vec<Rgb>, CursorError> {
    cursor.skip(4)?;
    cursor.read_i32::<LittleEndian>()?;
    cursor.skip(8)?;
    cursor.read_i32::<LittleEndian>()?;
    cursor.read_u16::<LittleEndian>()?;

    let count = cursor.read_u16::<LittleEndian>()?;
    (0..count)
        .map(|_| cursor.read_array::<4>().map(|[r, g, b, _]| [r, g, b]))
        .collect()
}
