//! SDL2 window that displays a rendered canvas.
//!
//! Presenting is non-blocking: the canvas is uploaded and the call returns, so
//! the terminal menu stays usable while the last render remains on screen.
//! Closing the window (or pressing Escape) hides it for the rest of the session.

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::render::Canvas;
use crate::session::{PresentError, Presenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
}

/// Collapse a batch of pending events into the one that matters.
fn classify_events<I: IntoIterator<Item = Event>>(events: I) -> WindowEvent {
    events
        .into_iter()
        .fold(WindowEvent::None, |seen, event| match event {
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => WindowEvent::Quit,
            _ => seen,
        })
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    event_pump: sdl2::EventPump,
    closed: bool,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok(Self {
            canvas,
            texture_creator,
            event_pump,
            closed: false,
        })
    }

    /// Drain every pending event.
    pub fn poll_events(&mut self) -> WindowEvent {
        classify_events(self.event_pump.poll_iter())
    }

    /// Upload `image` and draw it stretched over the whole window.
    pub fn blit(&mut self, image: &Canvas) -> Result<(), String> {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, image.width(), image.height())
            .map_err(|e| e.to_string())?;
        texture
            .update(None, &image.to_rgb_bytes(), (image.width() * 3) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Presenter for Window {
    fn present(&mut self, canvas: &Canvas) -> Result<(), PresentError> {
        if !self.closed && self.poll_events() == WindowEvent::Quit {
            self.closed = true;
            self.canvas.window_mut().hide();
            info!("display window closed, further renders are not shown");
        }
        if self.closed {
            return Ok(());
        }
        self.blit(canvas).map_err(PresentError::from)
    }
}
