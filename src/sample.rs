use nalgebra::{Point2, Vector3};
use serde::{Deserialize, Serialize};

use super::{buffer::PixelSource, color::Color, error::SampleSizeError};

/// Side length of the square block averaged by a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SampleSize(usize);

impl SampleSize {
    pub const MIN: usize = 1;
    pub const MAX: usize = 25;

    pub fn new(size: usize) -> Result<Self, SampleSizeError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(SampleSize(size))
        } else {
            Err(SampleSizeError::OutOfRange(size))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn pixel_count(self) -> usize {
        self.0 * self.0
    }
}

impl Default for SampleSize {
    fn default() -> Self {
        SampleSize(Self::MIN)
    }
}

impl TryFrom<usize> for SampleSize {
    type Error = SampleSizeError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        SampleSize::new(size)
    }
}

impl From<SampleSize> for usize {
    fn from(size: SampleSize) -> usize {
        size.0
    }
}

/// Averages the `size * size` block at `origin` into one opaque color.
///
/// `origin` must already be clamped to the source; see
/// [`Buffer::clamp_origin`](crate::Buffer::clamp_origin).
pub fn sample(source: &impl PixelSource, origin: Point2<usize>, size: SampleSize) -> Color {
    let block = source.read_block(origin, size.get());
    let sum: Vector3<f64> = block
        .iter()
        .map(|p| Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64))
        .sum();
    let mean = sum / size.pixel_count() as f64;

    log::debug!(
        "sampled {}x{} block at ({}, {}): {:.4} {:.4} {:.4}",
        size.get(), size.get(), origin[0], origin[1], mean.x, mean.y, mean.z
    );

    Color::rgb(mean.x as f32, mean.y as f32, mean.z as f32)
}
