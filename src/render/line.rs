//! Slope-evaluation line rasterization.
//!
//! Lines are scan-converted by stepping one pixel at a time along the major
//! axis and evaluating the line equation `y = slope * x + intercept` for the
//! minor coordinate:
//!
//! ```text
//!   |dx| >= |dy|  (x-major)   x = x_min + i,  y = trunc(slope * x + intercept)
//!   |dx| <  |dy|  (y-major)   y = y_min + i,  x = trunc((y - intercept) / slope)
//!   dx == 0       (vertical)  y = y_min + i,  x = x0
//! ```
//!
//! # Endpoint coverage
//!
//! The x-major and y-major cases step over both endpoints' major coordinates
//! (`|d| + 1` pixels); the minor coordinate at an endpoint is recomputed from
//! the line equation and can truncate one pixel short. The vertical case covers `[y_min, y_max)` and leaves out the far endpoint, so a
//! vertical line of length `n` lights exactly `n` pixels. A zero-length segment
//! takes the vertical branch and lights nothing.
//!
//! # Truncation
//!
//! Real coordinates are converted with truncation toward zero, not rounding,
//! which biases negative coordinates toward the origin.
//!
//! A horizontal line has slope 0, which always satisfies `|dx| >= |dy|`, so the
//! y-major branch never divides by a zero slope.

use crate::colors::{Rgb, WHITE};
use crate::math::point2::Point2;
use crate::render::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stepping {
    Vertical { x: i32 },
    XMajor { slope: f64, intercept: f64 },
    YMajor { slope: f64, intercept: f64 },
}

/// Iterator over the pixels approximating a segment, in major-axis order.
///
/// Pixels are produced regardless of any canvas; see [`LinePixels::clipped_to`]
/// to skip the part of the major axis that cannot land on a canvas.
#[derive(Debug, Clone)]
pub struct LinePixels {
    stepping: Stepping,
    next: i64,
    end: i64,
}

impl LinePixels {
    /// Narrow the major-axis range to `[0, width) x [0, height)`.
    ///
    /// Only pixels whose major coordinate is off-canvas are skipped, so the
    /// surviving sequence is exactly the in-bounds part of the full sequence
    /// along that axis. Minor-axis bounds still need a per-pixel check.
    pub fn clipped_to(mut self, width: u32, height: u32) -> Self {
        let extent = match self.stepping {
            Stepping::XMajor { .. } => width as i64,
            Stepping::Vertical { .. } | Stepping::YMajor { .. } => height as i64,
        };
        self.next = self.next.max(0);
        self.end = self.end.min(extent);
        self
    }
}

impl Iterator for LinePixels {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        if self.next >= self.end {
            return None;
        }
        let t = self.next;
        self.next += 1;

        let point = match self.stepping {
            Stepping::Vertical { x } => Point2::new(x, t as i32),
            Stepping::XMajor { slope, intercept } => {
                let y = (slope * t as f64) + intercept;
                Point2::new(t as i32, y.trunc() as i32)
            }
            Stepping::YMajor { slope, intercept } => {
                let x = (t as f64 - intercept) / slope;
                Point2::new(x.trunc() as i32, t as i32)
            }
        };
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinePixels {}

/// Compute the pixel sequence approximating the segment (x0, y0)-(x1, y1).
pub fn line_pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> LinePixels {
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();

    if x0 == x1 {
        let y_min = y0.min(y1);
        return LinePixels {
            stepping: Stepping::Vertical { x: x0 as i32 },
            next: y_min,
            end: y_min + dy,
        };
    }

    let slope = (y1 - y0) as f64 / (x1 - x0) as f64;
    let intercept = y1 as f64 - (slope * x1 as f64);

    if dx >= dy {
        let x_min = x0.min(x1);
        LinePixels {
            stepping: Stepping::XMajor { slope, intercept },
            next: x_min,
            end: x_min + dx + 1,
        }
    } else {
        let y_min = y0.min(y1);
        LinePixels {
            stepping: Stepping::YMajor { slope, intercept },
            next: y_min,
            end: y_min + dy + 1,
        }
    }
}

/// Draws segments onto a [`Canvas`] in a single color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRasterizer {
    color: Rgb,
}

impl Default for LineRasterizer {
    fn default() -> Self {
        Self { color: WHITE }
    }
}

impl LineRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(color: Rgb) -> Self {
        Self { color }
    }

    /// Draw the segment (x0, y0)-(x1, y1), skipping pixels outside the canvas.
    ///
    /// Returns the number of pixels written.
    pub fn draw_line(&self, canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32) -> usize {
        let (width, height) = (canvas.width(), canvas.height());
        line_pixels(x0, y0, x1, y1)
            .clipped_to(width, height)
            .filter(|p| canvas.set_pixel(p.x, p.y, self.color))
            .count()
    }

    pub fn draw_segment(&self, canvas: &mut Canvas, from: Point2, to: Point2) -> usize {
        self.draw_line(canvas, from.x, from.y, to.x, to.y)
    }
}
