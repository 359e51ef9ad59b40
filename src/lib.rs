//! Color picking for rendered pixels.
//!
//! A [`Picker`] samples an averaged color from any [`PixelSource`], collects
//! picks into a named [`Palette`] and exports that palette as JSON, GIMP
//! palette or CSS text.

pub mod buffer;
pub use buffer::*;

pub mod color;
pub use color::*;

pub mod config;
pub use config::*;

mod error;
pub use error::*;

pub mod export;
pub use export::*;

pub mod palette;
pub use palette::*;

mod picker;
pub use picker::*;

pub mod sample;
pub use sample::*;
