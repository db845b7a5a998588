//! Affine transform builders.
//!
//! Every builder returns a [`Mat4`] in row-vector convention, so a point is
//! transformed as `point * matrix` and `a * b` applies `a` before `b`.
//! Angles are taken in degrees.
//!
//! [`TransformStack`] provides a fluent API for composing several transforms in
//! application order:
//!
//! ```ignore
//! let m = TransformStack::new()
//!     .translate(-1.0, 0.0, 0.0)
//!     .then(rotate_z(90.0))
//!     .translate(1.0, 0.0, 0.0)
//!     .matrix();
//! ```

use std::fmt;
use std::str::FromStr;

use crate::math::mat4::Mat4;

/// Returns a translation by (tx, ty, tz).
pub fn translate(tx: f64, ty: f64, tz: f64) -> Mat4 {
    Mat4::translation(tx, ty, tz)
}

/// Returns a scale by (sx, sy, sz) about the center (cx, cy, cz).
///
/// Built as `translate(-c) * scaling(s) * translate(c)`: the center is moved to
/// the origin, scaled, and moved back, so the center is a fixed point.
pub fn scale(sx: f64, sy: f64, sz: f64, cx: f64, cy: f64, cz: f64) -> Mat4 {
    TransformStack::new()
        .translate(-cx, -cy, -cz)
        .then(Mat4::scaling(sx, sy, sz))
        .translate(cx, cy, cz)
        .matrix()
}

pub fn rotate_x(angle_degrees: f64) -> Mat4 {
    Mat4::rotation_x(angle_degrees.to_radians())
}

pub fn rotate_y(angle_degrees: f64) -> Mat4 {
    Mat4::rotation_y(angle_degrees.to_radians())
}

pub fn rotate_z(angle_degrees: f64) -> Mat4 {
    Mat4::rotation_z(angle_degrees.to_radians())
}

/// Returns a rotation by `angle_degrees` about `axis`.
pub fn rotate(angle_degrees: f64, axis: Axis) -> Mat4 {
    match axis {
        Axis::X => rotate_x(angle_degrees),
        Axis::Y => rotate_y(angle_degrees),
        Axis::Z => rotate_z(angle_degrees),
    }
}

/// Coordinate axis for rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Error returned when an axis name is not one of `x`, `y` or `z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAxis(pub String);

impl fmt::Display for UnknownAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown axis {:?}, expected x, y or z", self.0)
    }
}

impl std::error::Error for UnknownAxis {}

impl FromStr for Axis {
    type Err = UnknownAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(UnknownAxis(s.trim().to_string())),
        }
    }
}

/// A user-selectable transform with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate {
        tx: f64,
        ty: f64,
        tz: f64,
    },
    Rotate {
        angle_degrees: f64,
        axis: Axis,
    },
    Scale {
        sx: f64,
        sy: f64,
        sz: f64,
        cx: f64,
        cy: f64,
        cz: f64,
    },
}

impl TransformOp {
    pub fn matrix(&self) -> Mat4 {
        match *self {
            TransformOp::Translate { tx, ty, tz } => translate(tx, ty, tz),
            TransformOp::Rotate {
                angle_degrees,
                axis,
            } => rotate(angle_degrees, axis),
            TransformOp::Scale {
                sx,
                sy,
                sz,
                cx,
                cy,
                cz,
            } => scale(sx, sy, sz, cx, cy, cz),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Translate { tx, ty, tz } => write!(f, "translate({tx}, {ty}, {tz})"),
            TransformOp::Rotate {
                angle_degrees,
                axis,
            } => write!(f, "rotate_{axis}({angle_degrees})"),
            TransformOp::Scale {
                sx,
                sy,
                sz,
                cx,
                cy,
                cz,
            } => write!(f, "scale({sx}, {sy}, {sz}) about ({cx}, {cy}, {cz})"),
        }
    }
}

/// Builds the matrix for a transform choice.
pub fn apply_transform(op: &TransformOp) -> Mat4 {
    op.matrix()
}

/// Composes transforms left to right, in the order they should apply.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformStack {
    matrix: Mat4,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `m`; it applies after everything already on the stack.
    pub fn then(self, m: Mat4) -> Self {
        Self {
            matrix: self.matrix * m,
        }
    }

    pub fn translate(self, tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            matrix: self.matrix.then_translate(tx, ty, tz),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }
}
