use std::path::Path;

use image::{DynamicImage, GenericImageView};
use nalgebra::Point2;
use num_traits::{Float, cast};

use super::error::PickerError;

/// Anything that can hand out a square block of float RGB pixels, such as
/// the active framebuffer of a viewport.
pub trait PixelSource {
    /// Returns the `size * size` pixels covering columns `x..x+size` and
    /// rows `y..y+size`, row by row.
    ///
    /// The block must lie inside the source. Callers clamp the origin first;
    /// implementations are not required to check it.
    fn read_block(&self, origin: Point2<usize>, size: usize) -> Vec<[f32; 3]>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

impl<T> Pixel<T> {
    pub fn rgb(red: T, green: T, blue: T) -> Self {
        Pixel { red, green, blue }
    }

    pub fn map<S>(self, mut f: impl FnMut(T) -> S) -> Pixel<S> {
        Pixel {
            red: f(self.red),
            green: f(self.green),
            blue: f(self.blue),
        }
    }
}

impl<T: Float> Pixel<T> {
    fn to_f32(self) -> [f32; 3] {
        let p = self.map(|c| cast::<T, f32>(c).unwrap_or(0.0));
        [p.red, p.green, p.blue]
    }
}

#[derive(Debug, Clone)]
pub struct Buffer<T> {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) pixels: Vec<Pixel<T>>,
}

impl<T: Copy> Buffer<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Pixel<T> {
        debug_assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[x + y * self.width]
    }

    pub fn from_func(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Pixel<T>) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }

        Buffer {
            width,
            height,
            pixels,
        }
    }

    /// Whether a `size` block fits inside the buffer at all.
    pub fn fits_block(&self, size: usize) -> bool {
        size <= self.width && size <= self.height
    }

    /// Moves `origin` so that a `size` block starting there stays inside the
    /// buffer. Only meaningful when [`fits_block`](Self::fits_block) holds;
    /// otherwise the origin is pinned to 0 and the block still overruns.
    pub fn clamp_origin(&self, origin: Point2<usize>, size: usize) -> Point2<usize> {
        Point2::new(
            origin[0].min(self.width.saturating_sub(size)),
            origin[1].min(self.height.saturating_sub(size)),
        )
    }
}

impl<T: Float> PixelSource for Buffer<T> {
    fn read_block(&self, origin: Point2<usize>, size: usize) -> Vec<[f32; 3]> {
        let mut block = Vec::with_capacity(size * size);
        for y in origin[1]..origin[1] + size {
            for x in origin[0]..origin[0] + size {
                block.push(self.get(x, y).to_f32());
            }
        }
        block
    }
}

impl Buffer<f32> {
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb32f();
        let (width, height) = rgb.dimensions();
        Buffer {
            width: width as usize,
            height: height as usize,
            pixels: rgb.pixels().map(|p| Pixel::rgb(p[0], p[1], p[2])).collect(),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, PickerError> {
        let img = image::open(path.as_ref())?;
        let (width, height) = img.dimensions();
        log::debug!("loaded {}x{} image from '{}'", width, height, path.as_ref().display());
        Ok(Buffer::from_image(&img))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(width: usize, height: usize) -> Buffer<f32> {
        Buffer::from_func(width, height, |x, y| {
            Pixel::rgb(x as f32 / width as f32, y as f32 / height as f32, 0.5)
        })
    }

    #[test]
    fn test_read_block_order() {
        let buffer = gradient(10, 10);
        let block = buffer.read_block(Point2::new(2, 3), 2);
        assert_eq!(block.len(), 4);
        assert_eq!(block[0], [0.2, 0.3, 0.5]);
        assert_eq!(block[1], [0.3, 0.3, 0.5]);
        assert_eq!(block[2], [0.2, 0.4, 0.5]);
        assert_eq!(block[3], [0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_read_block_f64_source() {
        let buffer: Buffer<f64> = Buffer::from_func(3, 3, |_, _| Pixel::rgb(0.25, 0.5, 1.0));
        let block = buffer.read_block(Point2::new(0, 0), 3);
        assert_eq!(block.len(), 9);
        assert!(block.iter().all(|&p| p == [0.25, 0.5, 1.0]));
    }

    #[test]
    fn test_clamp_origin() {
        let buffer = gradient(10, 8);
        assert_eq!(buffer.clamp_origin(Point2::new(2, 2), 3), Point2::new(2, 2));
        assert_eq!(buffer.clamp_origin(Point2::new(9, 7), 3), Point2::new(7, 5));
        assert_eq!(buffer.clamp_origin(Point2::new(50, 50), 25), Point2::new(0, 0));
    }

    #[test]
    fn test_fits_block() {
        let buffer = gradient(10, 8);
        assert!(buffer.fits_block(1));
        assert!(buffer.fits_block(8));
        assert!(!buffer.fits_block(9));
        assert!(!buffer.fits_block(25));
        assert!(!gradient(0, 0).fits_block(1));
    }

    #[test]
    fn test_from_image() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        let buffer = Buffer::from_image(&DynamicImage::ImageRgb8(img));

        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 1);
        assert_eq!(buffer.get(0, 0), Pixel::rgb(1.0, 0.0, 0.0));
        assert_eq!(buffer.get(1, 0), Pixel::rgb(0.0, 0.0, 1.0));
    }
}
