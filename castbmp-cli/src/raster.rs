use castbmp::DecodedImage;
use image::{
    error::{ParameterError, ParameterErrorKind},
    DynamicImage, ImageError, ImageOutputFormat, RgbImage,
};
use std::io::Cursor;

pub fn to_rgb_image(image: &DecodedImage) -> Result<RgbImage, ImageError> {
    RgbImage::from_vec(
        u32::from(image.width()),
        u32::from(image.height()),
        image.to_rgb888_bytes(),
    )
    .ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })
}

pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, ImageError> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(to_rgb_image(image)?).write_to(&mut out, ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_roundtrips_through_the_image_crate() {
        let image =
            DecodedImage::from_pixels(2, 1, vec![[1, 2, 3], [250, 251, 252]]).unwrap();
        let png = encode_png(&image).unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.into_raw(), vec![1, 2, 3, 250, 251, 252]);
    }
}
