//! Render configuration.
//!
//! [`RenderConfig`] carries the canvas size and the projection parameters.
//! Defaults reproduce the reference scene: a 1024x1024 canvas viewed from
//! (6, 8, 7.5) with D = 60 and S = 15.

use std::fmt;

use crate::math::Vec3;

pub const DEFAULT_CANVAS_SIZE: u32 = 1024;
pub const DEFAULT_VIEWPOINT: Vec3 = Vec3::new(6.0, 8.0, 7.5);
pub const DEFAULT_VIEW_DISTANCE: f64 = 60.0;
pub const DEFAULT_HALF_HEIGHT: f64 = 15.0;

/// Environment variable overriding the canvas size (`1024` or `800x600`).
pub const CANVAS_ENV: &str = "WIREPROJ_CANVAS";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Viewpoint (Xw, Yw, Zw) in world coordinates.
    pub viewpoint: Vec3,
    /// Distance D from the viewpoint to the projection plane.
    pub view_distance: f64,
    /// Half-height S of the projection plane.
    pub half_height: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            viewpoint: DEFAULT_VIEWPOINT,
            view_distance: DEFAULT_VIEW_DISTANCE,
            half_height: DEFAULT_HALF_HEIGHT,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_viewpoint(mut self, x: f64, y: f64, z: f64) -> Self {
        self.viewpoint = Vec3::new(x, y, z);
        self
    }

    pub fn with_view_distance(mut self, d: f64) -> Self {
        self.view_distance = d;
        self
    }

    pub fn with_half_height(mut self, s: f64) -> Self {
        self.half_height = s;
        self
    }

    /// Half the screen resolution per axis, `(extent - 1) / 2`.
    ///
    /// 511.5 for a 1024-pixel axis, so the centers of the first and last
    /// pixels map to -1 and +1.
    pub fn screen_half_extents(&self) -> (f64, f64) {
        (
            (self.canvas_width as f64 - 1.0) / 2.0,
            (self.canvas_height as f64 - 1.0) / 2.0,
        )
    }

    /// Applies overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default();
        match std::env::var(CANVAS_ENV) {
            Ok(value) => {
                let (width, height) = parse_canvas_size(&value)?;
                Ok(config.with_canvas_size(width, height))
            }
            Err(_) => Ok(config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidCanvasSize(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCanvasSize(value) => write!(
                f,
                "invalid {CANVAS_ENV} value {value:?}, expected SIZE or WIDTHxHEIGHT"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parses `SIZE` (square) or `WIDTHxHEIGHT`. Zero extents are rejected.
pub fn parse_canvas_size(value: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidCanvasSize(value.to_string());
    let trimmed = value.trim();
    let (width, height) = match trimmed.split_once(['x', 'X']) {
        Some((w, h)) => (w.trim(), h.trim()),
        None => (trimmed, trimmed),
    };
    let width: u32 = width.parse().map_err(|_| invalid())?;
    let height: u32 = height.parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}
