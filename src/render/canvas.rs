//! Owned RGB pixel grid.
//!
//! The [`Canvas`] owns a `width * height` color buffer, starts all black, and
//! is mutated in place by bounds-checked point writes.

use crate::colors::{Rgb, BLACK};

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: Vec<Rgb>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            pixels: vec![BLACK; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < self.width as i64 && y >= 0 && (y as i64) < self.height as i64
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Set the pixel at (x, y).
    ///
    /// Out-of-bounds coordinates are dropped, never clamped. Returns whether
    /// the write happened.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.pixels[idx] = color;
        true
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if self.contains(x, y) {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Return every pixel to black.
    pub fn reset(&mut self) {
        self.pixels.fill(BLACK);
    }

    /// Number of pixels that differ from the background.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != BLACK).count()
    }

    /// Packed RGB24 rows, top row first, `width * 3` bytes per row.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }
}
