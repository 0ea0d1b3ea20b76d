//! SDL2 window, texture upload and event draining

use super::frame_buffer::FrameBuffer;
use super::layout::BlitRect;
use super::manager::{Placement, Surface, WindowStyle};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::input::{InputEvent, Key, MouseButtonKind};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext, WindowPos};
use sdl2::{EventPump, VideoSubsystem};

fn platform(e: impl ToString) -> EngineError {
    EngineError::Platform(e.to_string())
}

/// An open window and its renderer, before a texture is bound
pub struct SdlWindow {
    canvas: Canvas<Window>,
    video: VideoSubsystem,
}

/// Create the SDL context, a centred window of the configured logical size
/// and the event queue. The texture creator is returned separately so the
/// surface can borrow it.
pub fn open(config: &EngineConfig) -> Result<(SdlWindow, TextureCreator<WindowContext>, EventQueue)> {
    let sdl_context = sdl2::init().map_err(platform)?;
    let video = sdl_context.video().map_err(platform)?;

    let window = video
        .window(&config.title, config.width, config.height)
        .position_centered()
        .build()
        .map_err(platform)?;

    let mut canvas_builder = window.into_canvas().accelerated();
    if config.vsync {
        canvas_builder = canvas_builder.present_vsync();
    }
    let canvas = canvas_builder.build().map_err(platform)?;

    let texture_creator = canvas.texture_creator();
    let event_pump = sdl_context.event_pump().map_err(platform)?;

    log::info!(
        "window '{}' {}x{} (vsync {})",
        config.title,
        config.width,
        config.height,
        if config.vsync { "on" } else { "off" }
    );

    Ok((
        SdlWindow { canvas, video },
        texture_creator,
        EventQueue { pump: event_pump },
    ))
}

// ============================================================================
// Surface
// ============================================================================

/// `Surface` backed by a streaming RGB888 texture. The texture follows the
/// size of whatever buffer is blitted.
pub struct SdlSurface<'a> {
    canvas: Canvas<Window>,
    video: VideoSubsystem,
    creator: &'a TextureCreator<WindowContext>,
    texture: Option<Texture<'a>>,
    texture_size: (u32, u32),
}

impl<'a> SdlSurface<'a> {
    pub fn new(window: SdlWindow, creator: &'a TextureCreator<WindowContext>) -> Self {
        Self {
            canvas: window.canvas,
            video: window.video,
            creator,
            texture: None,
            texture_size: (0, 0),
        }
    }

    fn texture_for(&mut self, width: u32, height: u32) -> Result<&mut Texture<'a>> {
        if self.texture.is_none() || self.texture_size != (width, height) {
            let texture = self
                .creator
                .create_texture_streaming(PixelFormatEnum::RGB888, width, height)
                .map_err(platform)?;
            log::debug!("streaming texture {}x{}", width, height);
            self.texture_size = (width, height);
            self.texture = Some(texture);
        }
        self.texture
            .as_mut()
            .ok_or_else(|| EngineError::Platform("texture unavailable".into()))
    }
}

impl Surface for SdlSurface<'_> {
    fn screen_size(&self) -> Result<(u32, u32)> {
        let index = self.canvas.window().display_index().map_err(platform)?;
        let bounds = self.video.display_bounds(index).map_err(platform)?;
        Ok((bounds.width(), bounds.height()))
    }

    fn set_style(&mut self, style: WindowStyle) -> Result<()> {
        self.canvas
            .window_mut()
            .set_bordered(style == WindowStyle::Decorated);
        Ok(())
    }

    fn place(&mut self, placement: Placement) -> Result<()> {
        let window = self.canvas.window_mut();
        window
            .set_size(placement.width, placement.height)
            .map_err(platform)?;
        window.set_position(
            WindowPos::Positioned(placement.x),
            WindowPos::Positioned(placement.y),
        );
        Ok(())
    }

    fn blit(&mut self, buffer: &FrameBuffer, dest: BlitRect) -> Result<()> {
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();

        if !buffer.is_empty() && dest.width > 0 && dest.height > 0 {
            let pitch = buffer.stride() * 4;
            let texture = self.texture_for(buffer.width(), buffer.height())?;
            texture
                .update(None, buffer.as_bytes(), pitch)
                .map_err(platform)?;

            let target = sdl2::rect::Rect::new(dest.x, dest.y, dest.width, dest.height);
            if let Some(texture) = &self.texture {
                self.canvas.copy(texture, None, Some(target)).map_err(platform)?;
            }
        }

        self.canvas.present();
        Ok(())
    }
}

// ============================================================================
// Events
// ============================================================================

pub struct EventQueue {
    pump: EventPump,
}

impl EventQueue {
    /// Drain everything SDL has queued since the last call
    pub fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => {
                    if let Some(key) = map_key(k) {
                        events.push(InputEvent::KeyDown(key));
                    }
                },
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    if let Some(key) = map_key(k) {
                        events.push(InputEvent::KeyUp(key));
                    }
                },
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                Event::MouseButtonDown {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseDown { x, y, button });
                    }
                },
                Event::MouseButtonUp {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseUp { x, y, button });
                    }
                },
                _ => {},
            }
        }

        events
    }
}

fn map_key(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::Escape => Key::Escape,
        Keycode::F11 => Key::F11,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Space => Key::Space,
        Keycode::Backspace => Key::Backspace,
        Keycode::Tab => Key::Tab,
        Keycode::LShift | Keycode::RShift => Key::Shift,
        Keycode::LCtrl | Keycode::RCtrl => Key::Control,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        other => {
            // Printable keys have a one-character name
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::char(c),
                _ => return None,
            }
        },
    };
    Some(key)
}

fn map_mouse_button(btn: MouseButton) -> Option<MouseButtonKind> {
    match btn {
        MouseButton::Left => Some(MouseButtonKind::Left),
        MouseButton::Right => Some(MouseButtonKind::Right),
        MouseButton::Middle => Some(MouseButtonKind::Middle),
        _ => None,
    }
}
