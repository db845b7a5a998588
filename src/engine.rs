//! Render driver.
//!
//! The [`Engine`] owns the [`Canvas`] and the eye projector and runs the
//! wireframe pipeline:
//!
//! ```text
//! shape vertices -> model transform -> world-to-eye -> perspective divide
//!                -> device pixels -> one line per edge -> canvas
//! ```

use log::{debug, info, warn};

use crate::config::RenderConfig;
use crate::math::{Mat4, Point2};
use crate::projection::{EyeProjector, ProjectionError};
use crate::render::{Canvas, LineRasterizer};
use crate::shape::Shape;
use crate::transform::TransformOp;

pub struct Engine {
    canvas: Canvas,
    projector: EyeProjector,
    rasterizer: LineRasterizer,
}

impl Engine {
    pub fn new(config: &RenderConfig) -> Result<Self, ProjectionError> {
        Ok(Self {
            canvas: Canvas::new(config.canvas_width, config.canvas_height),
            projector: EyeProjector::new(config)?,
            rasterizer: LineRasterizer::new(),
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Clear the canvas back to black.
    pub fn reset_image(&mut self) {
        self.canvas.reset();
    }

    /// Project every vertex of `shape` to device pixels.
    ///
    /// Fails on the first vertex with a singular projection.
    pub fn project_vertices(
        &self,
        shape: &Shape,
        model: Option<&Mat4>,
    ) -> Result<Vec<Point2>, ProjectionError> {
        shape
            .vertices()
            .iter()
            .map(|&v| self.projector.project_point(v, model))
            .collect()
    }

    /// Draw `shape` on top of the current canvas.
    ///
    /// All vertices are projected before any pixel is written, so a singular
    /// projection leaves the canvas untouched. Returns the projected vertices.
    pub fn render(
        &mut self,
        shape: &Shape,
        model: Option<&Mat4>,
    ) -> Result<Vec<Point2>, ProjectionError> {
        let projected = self.project_vertices(shape, model).map_err(|e| {
            warn!("{} not drawn: {}", shape.kind(), e);
            e
        })?;

        let (width, height) = (self.canvas.width() as i32, self.canvas.height() as i32);
        for (i, p) in projected.iter().enumerate() {
            if p.x < 0 || p.x >= width || p.y < 0 || p.y >= height {
                debug!("vertex {} projects off-canvas at ({}, {})", i, p.x, p.y);
            }
        }

        let mut written = 0;
        for edge in shape.edges() {
            written += self
                .rasterizer
                .draw_segment(&mut self.canvas, projected[edge.a], projected[edge.b]);
        }

        info!(
            "rendered {} ({} edges, {} pixels written)",
            shape.kind(),
            shape.edges().len(),
            written
        );
        Ok(projected)
    }

    /// Clear the canvas and draw the untransformed `shape` under `op`.
    ///
    /// Transforms do not accumulate: each one applies to the base shape.
    pub fn apply_transform(
        &mut self,
        shape: &Shape,
        op: &TransformOp,
    ) -> Result<Vec<Point2>, ProjectionError> {
        debug!("applying {op} to {}", shape.kind());
        let matrix = op.matrix();
        self.reset_image();
        self.render(shape, Some(&matrix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};
    use crate::shape::ShapeKind;
    use crate::transform::Axis;
    use std::collections::HashSet;

    fn engine() -> Engine {
        Engine::new(&RenderConfig::default()).expect("default config is regular")
    }

    #[test]
    fn cube_projection_regression() {
        let engine = engine();
        let projected = engine
            .project_vertices(&Shape::new(ShapeKind::Cube), None)
            .expect("cube projects");

        let expected = [
            (540, 517),
            (295, 406),
            (477, 231),
            (732, 366),
            (542, 769),
            (273, 667),
            (473, 503),
            (755, 630),
        ];
        let actual: Vec<(i32, i32)> = projected.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(actual, expected);

        let distinct: HashSet<_> = projected.iter().collect();
        assert_eq!(distinct.len(), 8);
        assert!(projected
            .iter()
            .all(|p| (0..1024).contains(&p.x) && (0..1024).contains(&p.y)));
    }

    #[test]
    fn prism_projection_regression() {
        let engine = engine();
        let projected = engine
            .project_vertices(&Shape::new(ShapeKind::TriangularPrism), None)
            .expect("prism projects");
        let actual: Vec<(i32, i32)> = projected.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            actual,
            [(540, 517), (295, 406), (477, 231), (732, 366), (643, 703), (368, 590)]
        );
    }

    #[test]
    fn cube_render_regression() {
        let mut engine = engine();
        let shape = Shape::new(ShapeKind::Cube);
        let projected = engine.render(&shape, None).expect("cube renders");

        assert_eq!(engine.canvas().lit_pixels(), 2880);
        assert_eq!(
            engine.canvas().get_pixel(projected[0].x, projected[0].y),
            Some(WHITE)
        );
    }

    #[test]
    fn prism_render_regression() {
        let mut engine = engine();
        engine
            .render(&Shape::new(ShapeKind::TriangularPrism), None)
            .expect("prism renders");
        assert_eq!(engine.canvas().lit_pixels(), 2211);
    }

    #[test]
    fn reset_image_clears_render() {
        let mut engine = engine();
        engine
            .render(&Shape::new(ShapeKind::TriangularPrism), None)
            .expect("prism renders");
        engine.reset_image();
        assert_eq!(engine.canvas().lit_pixels(), 0);
        assert_eq!(engine.canvas().get_pixel(540, 517), Some(BLACK));
    }

    #[test]
    fn apply_transform_replaces_previous_image() {
        let mut engine = engine();
        let shape = Shape::new(ShapeKind::Cube);
        engine.render(&shape, None).expect("cube renders");

        let op = TransformOp::Translate {
            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
        };
        let before = engine.canvas().clone();
        engine.apply_transform(&shape, &op).expect("identity translate");
        assert_eq!(engine.canvas(), &before);
    }

    #[test]
    fn apply_transform_moves_the_shape() {
        let mut engine = engine();
        let shape = Shape::new(ShapeKind::Cube);
        let base = engine.render(&shape, None).expect("cube renders");

        let op = TransformOp::Rotate {
            angle_degrees: 45.0,
            axis: Axis::Z,
        };
        let rotated = engine.apply_transform(&shape, &op).expect("rotation renders");
        assert_ne!(base, rotated);
        assert!(engine.canvas().lit_pixels() > 0);
    }

    #[test]
    fn singular_projection_leaves_canvas_untouched() {
        // Viewing from (1, 0, 0) keeps every matrix cell an exact integer.
        let config = RenderConfig::default().with_viewpoint(1.0, 0.0, 0.0);
        let mut engine = Engine::new(&config).expect("viewpoint off the z axis");
        let shape = Shape::new(ShapeKind::Cube);
        // Moves vertex 0 of the cube onto the viewpoint.
        let onto_viewpoint = TransformOp::Translate {
            tx: 2.0,
            ty: 1.0,
            tz: 1.0,
        };
        let result = engine.apply_transform(&shape, &onto_viewpoint);
        assert!(matches!(result, Err(ProjectionError::ZeroDepth { .. })));
        assert_eq!(engine.canvas().lit_pixels(), 0);
    }

    #[test]
    fn singular_viewpoint_is_rejected_up_front() {
        let config = RenderConfig::default().with_viewpoint(0.0, 0.0, 10.0);
        assert!(matches!(
            Engine::new(&config),
            Err(ProjectionError::ViewpointOnZAxis { .. })
        ));
    }

    #[test]
    fn partially_off_canvas_shape_is_clipped_per_pixel() {
        let mut engine = engine();
        let shape = Shape::new(ShapeKind::Cube);
        let op = TransformOp::Translate {
            tx: -3.0,
            ty: 3.0,
            tz: 0.0,
        };
        let projected = engine.apply_transform(&shape, &op).expect("shifted cube renders");

        assert_eq!(projected[1], Point2::new(959, 345));
        assert_eq!(projected[5].x, 1006);
        let xs: Vec<i32> = projected.iter().map(|p| p.x).collect();
        assert_eq!(xs, [1166, 959, 1223, 1431, 1229, 1006, 1306, 1529]);
        assert_eq!(projected.iter().filter(|p| p.x >= 1024).count(), 6);
        assert_eq!(engine.canvas().get_pixel(959, 345), Some(WHITE));
        assert!(engine.canvas().lit_pixels() > 0);
    }

    #[test]
    fn fully_off_canvas_shape_draws_nothing() {
        let mut engine = engine();
        let shape = Shape::new(ShapeKind::Cube);
        let op = TransformOp::Translate {
            tx: 4.0,
            ty: -4.0,
            tz: 0.0,
        };
        let projected = engine.apply_transform(&shape, &op).expect("shifted cube projects");
        assert!(projected.iter().all(|p| p.x < 0));
        assert_eq!(engine.canvas().lit_pixels(), 0);
    }
}
