//! PNG output for rendered canvases.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use log::info;

use crate::colors::BLACK;
use crate::render::Canvas;
use crate::session::{PresentError, Presenter};

/// Copy the canvas into an [`RgbImage`].
pub fn to_image(canvas: &Canvas) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let color = canvas.get_pixel(x as i32, y as i32).unwrap_or(BLACK);
        image::Rgb(color.to_array())
    })
}

pub fn save_png<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), image::ImageError> {
    to_image(canvas).save_with_format(path, ImageFormat::Png)
}

/// Presents each render by overwriting one PNG file.
#[derive(Debug, Clone)]
pub struct PngPresenter {
    path: PathBuf,
}

impl PngPresenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Presenter for PngPresenter {
    fn present(&mut self, canvas: &Canvas) -> Result<(), PresentError> {
        save_png(canvas, &self.path)?;
        info!("wrote {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;

    #[test]
    fn image_matches_canvas() {
        let mut canvas = Canvas::new(4, 3);
        canvas.set_pixel(3, 2, WHITE);
        let img = to_image(&canvas);
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(3, 2).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn png_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("wireproj-{}.png", std::process::id()));
        let mut canvas = Canvas::new(8, 8);
        canvas.set_pixel(1, 6, WHITE);

        let mut presenter = PngPresenter::new(&path);
        presenter.present(&canvas).expect("png written");

        let loaded = image::open(presenter.path()).expect("png readable").to_rgb8();
        assert_eq!(loaded.get_pixel(1, 6).0, [255, 255, 255]);
        assert_eq!(loaded.get_pixel(6, 1).0, [0, 0, 0]);
        let _ = std::fs::remove_file(&path);
    }
}
