//! A CPU wireframe renderer for simple polyhedra.
//!
//! Vertices go through an optional model transform, a world-to-eye
//! conversion and a perspective divide, and every edge is scan-converted onto
//! an RGB [`Canvas`]. SDL2 is used only to show the finished canvas.
//!
//! # Quick Start
//!
//! ```ignore
//! use wireproj::prelude::*;
//!
//! let mut engine = Engine::new(&RenderConfig::default())?;
//! engine.render(&Shape::new(ShapeKind::Cube), None)?;
//! save_png(engine.canvas(), "cube.png")?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod engine;
pub mod math;
pub mod output;
pub mod projection;
pub mod render;
pub mod session;
pub mod shape;
pub mod transform;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use engine::Engine;
pub use projection::{EyeProjector, ProjectionError};
pub use render::{Canvas, LineRasterizer};
pub use shape::{LoadError, Shape, ShapeKind};
pub use transform::{Axis, TransformOp, TransformStack};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use wireproj::prelude::*;
/// ```
pub mod prelude {
    // Configuration
    pub use crate::config::RenderConfig;

    // Engine
    pub use crate::engine::Engine;

    // Shapes
    pub use crate::shape::{Edge, Shape, ShapeKind, VertexTable};

    // Transforms & projection
    pub use crate::projection::{eye_conversion, project, EyeProjector, ProjectionError};
    pub use crate::transform::{
        apply_transform, rotate, rotate_x, rotate_y, rotate_z, scale, translate, Axis,
        TransformOp, TransformStack,
    };

    // Math
    pub use crate::math::{Mat4, Point2, Vec3, Vec4};

    // Rendering
    pub use crate::colors::{Rgb, BLACK, WHITE};
    pub use crate::render::{line_pixels, Canvas, LineRasterizer};

    // Output & interaction
    pub use crate::output::{save_png, PngPresenter};
    pub use crate::session::{Presenter, Session, ShapeSource};
    pub use crate::window::Window;
}
