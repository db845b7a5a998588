//! Interactive control surface.
//!
//! A [`Session`] asks for a shape, draws it, then repeatedly asks for a
//! transform and redraws the shape under it until the user quits:
//!
//! ```text
//! shape menu:      1: cube, 2: triangular prism
//! transform menu:  1: translate, 2: rotate, 3: scale, 4: quit
//! ```
//!
//! Invalid input is reported and the same prompt repeats. End of input ends
//! the session without error.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, warn};

use crate::engine::Engine;
use crate::render::Canvas;
use crate::shape::{LoadError, Shape, ShapeKind};
use crate::transform::{Axis, TransformOp};

pub type PresentError = Box<dyn std::error::Error + Send + Sync>;

/// Receives the canvas after every render (a window, a file, a test probe).
pub trait Presenter {
    fn present(&mut self, canvas: &Canvas) -> Result<(), PresentError>;
}

impl<F> Presenter for F
where
    F: FnMut(&Canvas) -> Result<(), PresentError>,
{
    fn present(&mut self, canvas: &Canvas) -> Result<(), PresentError> {
        self(canvas)
    }
}

#[derive(Debug)]
pub enum SessionError {
    Io(io::Error),
    Present(PresentError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "terminal I/O failed: {e}"),
            SessionError::Present(e) => write!(f, "failed to present canvas: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(e) => Some(e),
            SessionError::Present(e) => Some(e.as_ref()),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

/// Where shape vertices come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShapeSource {
    /// The built-in vertex tables.
    #[default]
    BuiltIn,
    /// `cube_table.csv` / `tri_prism_table.csv` in this directory.
    TableDir(PathBuf),
}

impl ShapeSource {
    pub fn load(&self, kind: ShapeKind) -> Result<Shape, LoadError> {
        match self {
            ShapeSource::BuiltIn => Ok(Shape::new(kind)),
            ShapeSource::TableDir(dir) => Shape::from_table_dir(kind, dir),
        }
    }
}

const SHAPE_PROMPT: &str = "\nWould you like to draw a cube or a triangular prism?\n\
                            Enter 1 for cube, or enter 2 for triangular prism: ";
const TRANSFORM_PROMPT: &str =
    "Choose to apply a transformation:\n1: Translation\n2: Rotation\n3: Scale\n4: Quit\n";
const INVALID_INPUT: &str = "Invalid input, try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Translate,
    Rotate,
    Scale,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Translate),
            "2" => Ok(MenuChoice::Rotate),
            "3" => Ok(MenuChoice::Scale),
            "4" => Ok(MenuChoice::Quit),
            _ => Err(()),
        }
    }
}

pub struct Session<R, W> {
    engine: Engine,
    source: ShapeSource,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: Engine, source: ShapeSource, input: R, output: W) -> Self {
        Self {
            engine,
            source,
            input,
            output,
        }
    }

    /// Run the shape menu, then the transform menu, until quit or end of input.
    pub fn run<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<(), SessionError> {
        let Some(shape) = self.choose_shape()? else {
            return Ok(());
        };

        self.engine.reset_image();
        if let Err(e) = self.engine.render(&shape, None) {
            writeln!(self.output, "Cannot draw the {}: {e}", shape.kind())?;
        } else {
            presenter
                .present(self.engine.canvas())
                .map_err(SessionError::Present)?;
        }

        while let Some(op) = self.choose_transform()? {
            match self.engine.apply_transform(&shape, &op) {
                Ok(_) => presenter
                    .present(self.engine.canvas())
                    .map_err(SessionError::Present)?,
                Err(e) => writeln!(self.output, "Cannot draw the {} after {op}: {e}", shape.kind())?,
            }
        }
        Ok(())
    }

    fn choose_shape(&mut self) -> Result<Option<Shape>, SessionError> {
        loop {
            let Some(line) = self.prompt(SHAPE_PROMPT)? else {
                return Ok(None);
            };
            let kind = match line.parse::<ShapeKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    debug!("{e}");
                    writeln!(self.output, "{INVALID_INPUT}")?;
                    continue;
                }
            };
            match self.source.load(kind) {
                Ok(shape) => return Ok(Some(shape)),
                Err(e) => {
                    warn!("loading {kind} failed: {e}");
                    writeln!(self.output, "Could not load the {kind}: {e}")?;
                }
            }
        }
    }

    /// Returns `None` on quit or end of input.
    fn choose_transform(&mut self) -> Result<Option<TransformOp>, SessionError> {
        loop {
            let Some(line) = self.prompt(TRANSFORM_PROMPT)? else {
                return Ok(None);
            };
            let Ok(choice) = line.parse::<MenuChoice>() else {
                writeln!(self.output, "{INVALID_INPUT}")?;
                continue;
            };
            let op = match choice {
                MenuChoice::Quit => return Ok(None),
                MenuChoice::Translate => self.read_translate()?,
                MenuChoice::Rotate => self.read_rotate()?,
                MenuChoice::Scale => self.read_scale()?,
            };
            // A parameter prompt hit end of input.
            return Ok(op);
        }
    }

    fn read_translate(&mut self) -> Result<Option<TransformOp>, SessionError> {
        let Some(tx) = self.prompt_value("Enter x-displacement: ")? else {
            return Ok(None);
        };
        let Some(ty) = self.prompt_value("Enter y-displacement: ")? else {
            return Ok(None);
        };
        let Some(tz) = self.prompt_value("Enter z-displacement: ")? else {
            return Ok(None);
        };
        Ok(Some(TransformOp::Translate { tx, ty, tz }))
    }

    fn read_rotate(&mut self) -> Result<Option<TransformOp>, SessionError> {
        let Some(angle_degrees) =
            self.prompt_value("Enter the angle you wish to rotate the shape: ")?
        else {
            return Ok(None);
        };
        let Some(axis) = self.prompt_value::<Axis>(
            "Enter which axis you wish to perform the rotation about (x, y, z): ",
        )?
        else {
            return Ok(None);
        };
        Ok(Some(TransformOp::Rotate {
            angle_degrees,
            axis,
        }))
    }

    fn read_scale(&mut self) -> Result<Option<TransformOp>, SessionError> {
        let prompts = [
            "Enter x scaling factor: ",
            "Enter y scaling factor: ",
            "Enter z scaling factor: ",
            "Enter x-coord for center of scale: ",
            "Enter y-coord for center of scale: ",
            "Enter z-coord for center of scale: ",
        ];
        let mut values = [0.0f64; 6];
        for (value, prompt) in values.iter_mut().zip(prompts) {
            let Some(v) = self.prompt_value(prompt)? else {
                return Ok(None);
            };
            *value = v;
        }
        let [sx, sy, sz, cx, cy, cz] = values;
        Ok(Some(TransformOp::Scale {
            sx,
            sy,
            sz,
            cx,
            cy,
            cz,
        }))
    }

    /// Prompt until the answer parses as `T`.
    fn prompt_value<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>, SessionError> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{INVALID_INPUT}")?,
            }
        }
    }

    /// Write `prompt` and read one line, without its terminator.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use std::io::Cursor;

    fn run(input: &str) -> (String, Vec<usize>) {
        let engine = Engine::new(&RenderConfig::default()).expect("default config");
        let mut output = Vec::new();
        let mut lit = Vec::new();
        {
            let mut session = Session::new(
                engine,
                ShapeSource::BuiltIn,
                Cursor::new(input.as_bytes()),
                &mut output,
            );
            let mut probe = |canvas: &Canvas| -> Result<(), PresentError> {
                lit.push(canvas.lit_pixels());
                Ok(())
            };
            session.run(&mut probe).expect("session runs");
        }
        (String::from_utf8(output).expect("utf8 output"), lit)
    }

    #[test]
    fn draws_chosen_shape_and_quits() {
        let (out, lit) = run("1\n4\n");
        assert!(out.contains("Enter 1 for cube"));
        assert!(out.contains("4: Quit"));
        assert_eq!(lit, vec![2880]);
    }

    #[test]
    fn invalid_shape_choice_repeats_prompt() {
        let (out, lit) = run("7\nsquare\n2\n4\n");
        assert_eq!(out.matches(INVALID_INPUT).count(), 2);
        assert_eq!(out.matches("Enter 1 for cube").count(), 3);
        assert_eq!(lit, vec![2211]);
    }

    #[test]
    fn transforms_redraw_the_base_shape() {
        // Identity translate, then a full turn: both redraw the untouched cube.
        let (_, lit) = run("1\n1\n0\n0\n0\n2\n360\nz\n4\n");
        assert_eq!(lit.len(), 3);
        assert_eq!(lit[0], 2880);
        assert_eq!(lit[1], 2880);
    }

    #[test]
    fn invalid_parameters_are_reprompted() {
        let (out, lit) = run("1\n2\nninety\n90\nw\nx\n4\n");
        assert_eq!(out.matches(INVALID_INPUT).count(), 2);
        assert_eq!(
            out.matches("Enter the angle you wish to rotate the shape").count(),
            2
        );
        assert_eq!(lit.len(), 2);
    }

    #[test]
    fn invalid_menu_choice_repeats_prompt() {
        let (out, lit) = run("1\n9\n3\n2\n2\n2\n0\n0\n0\n4\n");
        assert_eq!(out.matches(INVALID_INPUT).count(), 1);
        assert_eq!(out.matches("Choose to apply a transformation").count(), 3);
        assert_eq!(lit.len(), 2);
    }

    #[test]
    fn end_of_input_ends_session_cleanly() {
        let (_, lit) = run("");
        assert!(lit.is_empty());

        let (_, lit) = run("2\n1\n5\n");
        assert_eq!(lit, vec![2211]);
    }

    #[test]
    fn singular_transform_is_reported_not_fatal() {
        // Scaling by zero about the viewpoint collapses every vertex onto it.
        let (out, lit) = run("1\n3\n0\n0\n0\n6\n8\n7.5\n4\n");
        assert!(out.contains("Cannot draw the cube"));
        assert_eq!(lit.len(), 1);
    }

    #[test]
    fn missing_vertex_tables_are_reported() {
        let engine = Engine::new(&RenderConfig::default()).expect("default config");
        let mut output = Vec::new();
        let mut session = Session::new(
            engine,
            ShapeSource::TableDir(PathBuf::from("/nonexistent/wireproj")),
            Cursor::new("1\n".as_bytes()),
            &mut output,
        );
        let mut probe = |_: &Canvas| -> Result<(), PresentError> { Ok(()) };
        session.run(&mut probe).expect("session ends at end of input");
        drop(session);
        let out = String::from_utf8(output).expect("utf8 output");
        assert!(out.contains("Could not load the cube"));
    }
}
