use crate::Rgb;
use alloc::{vec, vec::Vec};

/// A decoded RGB raster, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
}

impl DecodedImage {
    /// Creates a black image.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; usize::from(width) * usize::from(height)],
        }
    }

    /// Wraps existing pixels. Returns `None` if the pixel count doesn't match the dimensions.
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<Rgb>) -> Option<Self> {
        (pixels.len() == usize::from(width) * usize::from(height)).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)])
    }

    /// Mutable access to row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: u16) -> &mut [Rgb] {
        let width = usize::from(self.width);
        let start = usize::from(y) * width;
        &mut self.pixels[start..start + width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks_exact(usize::from(self.width).max(1))
    }

    /// Flattens the image into `r, g, b` bytes, for handing to an encoder.
    pub fn to_rgb888_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// A new image of the same size with `f` applied to every pixel.
    pub fn recolor(&self, f: impl FnMut(Rgb) -> Rgb) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }
}
