use crate::{
    decode::{DecodeError, PaletteIndexOutOfRangeSnafu, RowTooShortSnafu},
    DecodedImage, Palette, Rect,
};
use snafu::{ensure, OptionExt};

/// Resolves an index buffer with row stride `total_width` into an RGB image of `rect`'s size.
///
/// Columns past `rect.width` are stride padding and are dropped. When a row holds fewer than
/// `rect.width` entries the missing pixels stay black, unless `strict_rows` is set.
pub fn map_pixels(
    indices: &[u8],
    total_width: u16,
    rect: Rect,
    palette: &Palette,
    strict_rows: bool,
) -> Result<DecodedImage, DecodeError> {
    let stride = usize::from(total_width);
    let width = usize::from(rect.width);
    let mut image = DecodedImage::new(rect.width, rect.height);

    for y in 0..rect.height {
        let start = usize::from(y) * stride;
        let row = indices.get(start..).unwrap_or(&[]);
        let row = &row[..stride.min(row.len())];

        let visible = width.min(row.len());
        ensure!(
            !strict_rows || visible == width,
            RowTooShortSnafu {
                row: usize::from(y),
                available: visible,
                width,
            }
        );

        for (out, &index) in image.row_mut(y).iter_mut().zip(&row[..visible]) {
            *out = palette.get(index).context(PaletteIndexOutOfRangeSnafu {
                index,
                len: palette.len(),
            })?;
        }
    }

    Ok(image)
}
