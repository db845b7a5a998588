//! Pixel color type and the two colors the renderer uses.

/// An 8-bit-per-channel RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Canvas background.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Line color.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
