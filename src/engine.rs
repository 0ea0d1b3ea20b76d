use crate::config::EngineConfig;
use crate::display::{DisplayManager, FrameBuffer, Surface};
use crate::error::Result;
use crate::input::{InputEvent, InputState, Key};

/// One explicitly owned rendering session: display manager plus input
/// snapshot. Nothing here is global.
pub struct Engine<S: Surface> {
    display: DisplayManager<S>,
    input: InputState,
}

impl<S: Surface> Engine<S> {
    /// Allocate the logical buffer described by `config`, entering fullscreen
    /// right away if asked to
    pub fn new(surface: S, config: &EngineConfig) -> Result<Self> {
        let display = DisplayManager::new(surface, config.width, config.height)?
            .with_edge_policy(config.edge_policy);
        let mut engine = Self {
            display,
            input: InputState::new(),
        };
        if config.start_fullscreen {
            engine.display.enter_fullscreen()?;
        }
        Ok(engine)
    }

    /// Fold this frame's events into the input snapshot and apply the global
    /// bindings (F11 toggles fullscreen). Window close shows up as
    /// `InputState::quit_requested`.
    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.input.apply(event, self.display.geometry());
        }

        if self.input.was_pressed(Key::F11) {
            if let Err(e) = self.display.toggle_fullscreen() {
                log::warn!("fullscreen toggle failed: {}", e);
            }
            self.input.remap_pointer(self.display.geometry());
        }
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub fn display(&self) -> &DisplayManager<S> {
        &self.display
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut DisplayManager<S> {
        &mut self.display
    }

    #[inline]
    pub fn frame_buffer(&mut self) -> &mut FrameBuffer {
        self.display.buffer_mut()
    }

    /// Show the frame and reset the per-frame input edges
    pub fn present(&mut self) -> Result<()> {
        self.display.present(&mut self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayMode, MockSurface};
    use crate::geometry::Point;
    use crate::input::MouseButtonKind;

    fn engine() -> Engine<MockSurface> {
        Engine::new(MockSurface::new(1920, 1080), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_f11_toggles_fullscreen() {
        let mut engine = engine();
        engine.handle_events(&[InputEvent::KeyDown(Key::F11)]);
        assert_eq!(engine.display().mode(), DisplayMode::Fullscreen);

        // Holding the key does not toggle again
        engine.present().unwrap();
        engine.handle_events(&[InputEvent::KeyDown(Key::F11)]);
        assert_eq!(engine.display().mode(), DisplayMode::Fullscreen);

        engine.handle_events(&[InputEvent::KeyUp(Key::F11), InputEvent::KeyDown(Key::F11)]);
        assert_eq!(engine.display().mode(), DisplayMode::Windowed);
    }

    #[test]
    fn test_mouse_uses_current_geometry() {
        let mut engine = engine();
        engine.handle_events(&[InputEvent::KeyDown(Key::F11)]);
        engine.present().unwrap();

        engine.handle_events(&[
            InputEvent::MouseDown {
                x: 960,
                y: 540,
                button: MouseButtonKind::Left,
            },
            InputEvent::MouseUp {
                x: 960,
                y: 540,
                button: MouseButtonKind::Left,
            },
        ]);
        assert_eq!(engine.input().mouse(), Point::new(450, 450));
        assert!(engine.input().left_click());
        engine.present().unwrap();
        assert!(!engine.input().left_click());
    }

    #[test]
    fn test_toggle_remaps_resting_pointer() {
        let mut engine = engine();
        engine.handle_events(&[InputEvent::MouseMove { x: 450, y: 450 }]);
        assert_eq!(engine.input().mouse(), Point::new(450, 450));
        engine.present().unwrap();

        engine.handle_events(&[InputEvent::KeyDown(Key::F11)]);
        // (450 - 420) * 900 / 1080, 450 * 900 / 1080
        assert_eq!(engine.input().mouse(), Point::new(25, 375));
        engine.present().unwrap();

        engine.handle_events(&[InputEvent::KeyUp(Key::F11), InputEvent::KeyDown(Key::F11)]);
        assert_eq!(engine.input().mouse(), Point::new(450, 450));
    }

    #[test]
    fn test_start_fullscreen_and_edge_policy_from_config() {
        let config = EngineConfig {
            start_fullscreen: true,
            edge_policy: crate::display::EdgePolicy::SkipOrigin,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(MockSurface::new(1920, 1080), &config).unwrap();
        assert!(engine.display().is_fullscreen());
        engine.frame_buffer().set_pixel(0, 5, 1);
        assert_eq!(engine.frame_buffer().count(1), 0);
    }

    #[test]
    fn test_quit_event() {
        let mut engine = engine();
        engine.handle_events(&[InputEvent::Quit]);
        assert!(engine.input().quit_requested());
    }
}
