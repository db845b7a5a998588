/// An integer pixel coordinate in device space.
///
/// Produced by truncating (not rounding) projected real coordinates, so values
/// may lie outside the canvas; writes check bounds per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

