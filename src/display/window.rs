//! SDL2 presentation backend
//!
//! Uploads the finished pixel buffer into a streaming texture once per tick
//! and stretches it over the window.

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::PixelBuffer;
use crate::config::WindowConfig;
use crate::error::{Error, Result};

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    /// Top-down RGBA8888 staging copy of the buffer
    staging: Vec<u8>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
}

impl Display {
    /// Open the window described by `config`
    pub fn open(config: &WindowConfig) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(Error::Display)?;
        let video_subsystem = sdl_context.video().map_err(Error::Display)?;

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .position_centered()
            .build()
            .map_err(|e| Error::Display(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if config.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| Error::Display(e.to_string()))?;

        info!(
            "renderer: {} ({}x{} window, vsync {})",
            canvas.info().name,
            config.width,
            config.height,
            if config.vsync { "on" } else { "off" }
        );

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(Error::Display)?;

        Ok((
            Self {
                canvas,
                event_pump,
            },
            texture_creator,
        ))
    }

    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<()> {
        if buffer.width() != target.width || buffer.height() != target.height {
            return Err(Error::InvalidDimension {
                what: "render target",
                width: buffer.width(),
                height: buffer.height(),
            });
        }
        buffer.write_rgba_rows_flipped(&mut target.staging)?;
        target
            .texture
            .update(None, &target.staging, (target.width * 4) as usize)
            .map_err(|e| Error::Display(e.to_string()))?;

        self.canvas
            .copy(&target.texture, None, None)
            .map_err(Error::Display)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                _ => {},
            }
        }

        events
    }

    /// True once the window was closed or Escape pressed during this poll
    pub fn should_close(&mut self) -> bool {
        self.poll_events().iter().any(|event| {
            matches!(
                event,
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape)
            )
        })
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching the pixel buffer size
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| Error::Display(e.to_string()))?;
        Ok(Self {
            texture,
            staging: vec![0; width as usize * height as usize * 4],
            width,
            height,
        })
    }
}
