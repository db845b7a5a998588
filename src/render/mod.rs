//! Pixel canvas and line scan-conversion.

pub mod canvas;
pub mod line;

pub use canvas::Canvas;
pub use line::{line_pixels, LinePixels, LineRasterizer};
