//! World-to-eye conversion and perspective projection.
//!
//! The eye coordinate system puts the viewer at the origin looking down +z,
//! with the world origin straight ahead. The conversion is the product, in
//! application order, of:
//!
//! 1. `translate(-Xw, -Yw, -Zw)`: move the viewpoint to the origin
//! 2. an axis remap swapping y and z (with a sign flip)
//! 3. a rotation about y aligning the view with the world origin horizontally
//! 4. a rotation about x aligning it vertically
//! 5. a z flip into a left-handed eye system
//! 6. a `D / S` scale of x and y
//!
//! The two alignment rotations are built from the viewpoint's coordinate
//! ratios rather than from angles:
//!
//! ```text
//!   h = sqrt(Xw² + Yw²)        r = sqrt(Zw² + h²)
//!   Ry: sin = Xw / h, cos = Yw / h
//!   Rx: sin = Zw / r, cos = h / r
//! ```
//!
//! which is undefined when the viewpoint sits on the world z axis (`h = 0`).
//! That case, and a zero depth during the perspective divide, are reported as
//! [`ProjectionError`]s instead of producing NaN.

use std::fmt;

use log::debug;

use crate::config::RenderConfig;
use crate::math::{Mat4, Point2, Vec3, Vec4};

/// A singular projection: the requested conversion has a zero denominator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    /// The viewpoint is directly above or below the world origin (Xw = Yw = 0).
    ViewpointOnZAxis { zw: f64 },
    /// The projection-plane half-height S is zero.
    ZeroHalfHeight,
    /// Some eye matrix cell is NaN or infinite.
    NonFiniteMatrix,
    /// The point lies in the eye plane (eye-space z = 0).
    ZeroDepth { x: f64, y: f64 },
    /// The perspective divide produced NaN or infinity.
    NonFiniteScreen { x: f64, y: f64, z: f64 },
    /// The point is so close to the eye plane that its pixel does not fit in an `i32`.
    ScreenOutOfRange { x: f64, y: f64, z: f64 },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "singular projection: ")?;
        match self {
            ProjectionError::ViewpointOnZAxis { zw } => write!(
                f,
                "viewpoint (0, 0, {zw}) lies on the world z axis, no view direction can be derived"
            ),
            ProjectionError::ZeroHalfHeight => write!(f, "projection plane half-height is zero"),
            ProjectionError::NonFiniteMatrix => {
                write!(f, "eye conversion matrix contains non-finite values")
            }
            ProjectionError::ZeroDepth { x, y } => {
                write!(f, "eye-space point ({x}, {y}, 0) lies in the eye plane")
            }
            ProjectionError::NonFiniteScreen { x, y, z } => {
                write!(f, "eye-space point ({x}, {y}, {z}) has no finite screen position")
            }
            ProjectionError::ScreenOutOfRange { x, y, z } => write!(
                f,
                "eye-space point ({x}, {y}, {z}) projects beyond the device coordinate range"
            ),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Returns the matrix converting world coordinates to eye coordinates.
///
/// # Arguments
/// * `xw`, `yw`, `zw` - Viewpoint position in world coordinates
/// * `d` - Distance from the viewpoint to the projection plane
/// * `s` - Half-height of the projection plane
///
/// # Errors
/// [`ProjectionError::ViewpointOnZAxis`] when `xw = yw = 0`,
/// [`ProjectionError::ZeroHalfHeight`] when `s = 0`, and
/// [`ProjectionError::NonFiniteMatrix`] when the inputs are themselves not finite.
pub fn eye_conversion(xw: f64, yw: f64, zw: f64, d: f64, s: f64) -> Result<Mat4, ProjectionError> {
    let horizontal = (xw.powi(2) + yw.powi(2)).sqrt();
    if horizontal == 0.0 {
        return Err(ProjectionError::ViewpointOnZAxis { zw });
    }
    if s == 0.0 {
        return Err(ProjectionError::ZeroHalfHeight);
    }

    let t = Mat4::translation(-xw, -yw, -zw);

    let remap = Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    let ry_cos = yw / horizontal;
    let ry_sin = xw / horizontal;
    let ry = Mat4::new([
        [-ry_cos, 0.0, ry_sin, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-ry_sin, 0.0, -ry_cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    let radius = (zw.powi(2) + horizontal.powi(2)).sqrt();
    let rx_cos = horizontal / radius;
    let rx_sin = zw / radius;
    let rx = Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, rx_cos, rx_sin, 0.0],
        [0.0, -rx_sin, rx_cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    let flip_z = Mat4::scaling(1.0, 1.0, -1.0);
    let perspective = Mat4::scaling(d / s, d / s, 1.0);

    let m = t * remap * ry * rx * flip_z * perspective;
    if !m.is_finite() {
        return Err(ProjectionError::NonFiniteMatrix);
    }
    Ok(m)
}

/// Perspective-divides an eye-space point onto the screen.
///
/// `screen = coord / z * half + half` per axis, truncated toward zero. The
/// result may fall outside the canvas; callers drop such pixels when drawing.
///
/// # Errors
/// [`ProjectionError::ZeroDepth`] when `z = 0`, and
/// [`ProjectionError::NonFiniteScreen`] when the divide is not finite, and
/// [`ProjectionError::ScreenOutOfRange`] when a coordinate does not fit in an `i32`.
pub fn project(eye: Vec3, half_width: f64, half_height: f64) -> Result<Point2, ProjectionError> {
    if eye.z == 0.0 {
        return Err(ProjectionError::ZeroDepth { x: eye.x, y: eye.y });
    }
    let screen_x = (eye.x / eye.z) * half_width + half_width;
    let screen_y = (eye.y / eye.z) * half_height + half_height;
    if !screen_x.is_finite() || !screen_y.is_finite() {
        return Err(ProjectionError::NonFiniteScreen {
            x: eye.x,
            y: eye.y,
            z: eye.z,
        });
    }
    let device_range = i32::MIN as f64..=i32::MAX as f64;
    if !device_range.contains(&screen_x.trunc()) || !device_range.contains(&screen_y.trunc()) {
        return Err(ProjectionError::ScreenOutOfRange {
            x: eye.x,
            y: eye.y,
            z: eye.z,
        });
    }
    Ok(Point2::new(
        screen_x.trunc() as i32,
        screen_y.trunc() as i32,
    ))
}

/// A fixed viewpoint and screen: converts world points to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeProjector {
    eye_matrix: Mat4,
    half_width: f64,
    half_height: f64,
}

impl EyeProjector {
    pub fn new(config: &RenderConfig) -> Result<Self, ProjectionError> {
        let v = config.viewpoint;
        let eye_matrix = eye_conversion(v.x, v.y, v.z, config.view_distance, config.half_height)?;
        let (half_width, half_height) = config.screen_half_extents();
        debug!(
            "eye projector: viewpoint ({}, {}, {}), D={}, S={}, screen half-extents {}x{}",
            v.x, v.y, v.z, config.view_distance, config.half_height, half_width, half_height
        );
        Ok(Self {
            eye_matrix,
            half_width,
            half_height,
        })
    }

    /// World point to eye space, after the optional model transform.
    pub fn to_eye(&self, world: Vec3, model: Option<&Mat4>) -> Vec3 {
        let p = Vec4::from(world);
        let p = match model {
            Some(m) => p * *m,
            None => p,
        };
        (p * self.eye_matrix).to_vec3()
    }

    /// World point to device pixel, after the optional model transform.
    pub fn project_point(&self, world: Vec3, model: Option<&Mat4>) -> Result<Point2, ProjectionError> {
        project(self.to_eye(world, model), self.half_width, self.half_height)
    }
}
