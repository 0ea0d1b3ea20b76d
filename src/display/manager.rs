use super::frame_buffer::{EdgePolicy, FrameBuffer};
use super::layout::{BlitRect, DisplayGeometry, DisplayMode};
use crate::color::BLACK;
use crate::error::{EngineError, Result};
use crate::input::InputState;

/// Window decoration state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStyle {
    /// Caption and border
    Decorated,
    Borderless,
}

/// Window position and size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Platform services the display manager drives
pub trait Surface {
    /// Size of the physical display the window is on
    fn screen_size(&self) -> Result<(u32, u32)>;

    fn set_style(&mut self, style: WindowStyle) -> Result<()>;

    fn place(&mut self, placement: Placement) -> Result<()>;

    /// Stretch the whole of `buffer` into `dest` and show it
    fn blit(&mut self, buffer: &FrameBuffer, dest: BlitRect) -> Result<()>;
}

/// Owns the logical frame buffer, the window geometry and the
/// windowed/fullscreen state machine.
pub struct DisplayManager<S: Surface> {
    surface: S,
    buffer: FrameBuffer,
    geometry: DisplayGeometry,
    mode: DisplayMode,
}

impl<S: Surface> DisplayManager<S> {
    /// Allocate a `width` x `height` logical buffer bound to `surface`
    pub fn new(surface: S, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidSize { width, height });
        }
        Ok(Self {
            surface,
            buffer: FrameBuffer::new(width, height)?,
            geometry: DisplayGeometry::windowed(width, height),
            mode: DisplayMode::Windowed,
        })
    }

    pub fn with_edge_policy(mut self, edges: EdgePolicy) -> Self {
        self.buffer = self.buffer.with_edge_policy(edges);
        self
    }

    #[inline]
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    #[inline]
    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode == DisplayMode::Fullscreen
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Switch to borderless fullscreen, letterboxing the logical bitmap
    pub fn enter_fullscreen(&mut self) -> Result<()> {
        let (screen_w, screen_h) = self.surface.screen_size()?;
        if screen_w == 0 || screen_h == 0 {
            return Err(EngineError::InvalidSize {
                width: screen_w,
                height: screen_h,
            });
        }

        self.surface.set_style(WindowStyle::Borderless)?;
        self.surface.place(Placement {
            x: 0,
            y: 0,
            width: screen_w,
            height: screen_h,
        })?;

        self.geometry = DisplayGeometry::fullscreen(
            self.geometry.windowed_width,
            self.geometry.windowed_height,
            screen_w,
            screen_h,
        );
        self.mode = DisplayMode::Fullscreen;

        // Black out the margins once with a screen-sized scratch buffer.
        // The logical buffer stays bound for drawing.
        let mut screen = FrameBuffer::new(screen_w, screen_h)?;
        screen.clear(BLACK);
        self.surface.blit(
            &screen,
            BlitRect {
                x: 0,
                y: 0,
                width: screen_w,
                height: screen_h,
            },
        )?;

        log::info!(
            "fullscreen {}x{}, margins {}x{}, scale {:.4}x{:.4}",
            screen_w,
            screen_h,
            self.geometry.margin_horizontal,
            self.geometry.margin_vertical,
            self.geometry.scale_x,
            self.geometry.scale_y
        );
        Ok(())
    }

    /// Restore decorations, windowed size and the identity transform
    pub fn exit_fullscreen(&mut self) -> Result<()> {
        let (screen_w, screen_h) = self.surface.screen_size()?;
        let (width, height) = (self.geometry.windowed_width, self.geometry.windowed_height);

        self.surface.set_style(WindowStyle::Decorated)?;
        self.geometry = DisplayGeometry::windowed(width, height);
        self.mode = DisplayMode::Windowed;
        self.surface.place(Placement {
            x: (screen_w / 10) as i32,
            y: (screen_h / 10) as i32,
            width,
            height,
        })?;

        log::info!("windowed {}x{}", width, height);
        Ok(())
    }

    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        match self.mode {
            DisplayMode::Windowed => self.enter_fullscreen(),
            DisplayMode::Fullscreen => self.exit_fullscreen(),
        }
    }

    /// Reallocate the logical bitmap. In fullscreen the letterbox is refitted.
    /// If allocation fails the old buffer and geometry are kept.
    pub fn resize_logical(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidSize { width, height });
        }
        let edges = self.buffer.edge_policy();
        self.buffer = FrameBuffer::new(width, height)?.with_edge_policy(edges);

        self.geometry = match self.mode {
            DisplayMode::Windowed => DisplayGeometry::windowed(width, height),
            DisplayMode::Fullscreen => {
                DisplayGeometry::fullscreen(width, height, self.geometry.width, self.geometry.height)
            }
        };
        if self.mode == DisplayMode::Windowed {
            let (screen_w, screen_h) = self.surface.screen_size()?;
            self.surface.place(Placement {
                x: (screen_w / 10) as i32,
                y: (screen_h / 10) as i32,
                width,
                height,
            })?;
        }
        Ok(())
    }

    /// Blit target for this frame
    pub fn destination(&self) -> BlitRect {
        self.geometry.destination()
    }

    /// Stretch the logical buffer into the current destination, then end the
    /// input frame (click latches reset even if the blit failed).
    pub fn present(&mut self, input: &mut InputState) -> Result<()> {
        let dest = self.geometry.destination();
        let result = self.surface.blit(&self.buffer, dest);
        input.end_frame();
        result
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::{InputEvent, MouseButtonKind};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Style(WindowStyle),
        Place(Placement),
        Blit {
            src: (u32, u32),
            dest: BlitRect,
            first_pixel: u32,
        },
    }

    /// Records every platform call
    pub struct MockSurface {
        pub screen: (u32, u32),
        pub calls: Vec<Call>,
        pub fail_blit: bool,
    }

    impl MockSurface {
        pub fn new(screen_w: u32, screen_h: u32) -> Self {
            Self {
                screen: (screen_w, screen_h),
                calls: Vec::new(),
                fail_blit: false,
            }
        }

        pub fn blits(&self) -> Vec<&Call> {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Blit { .. }))
                .collect()
        }
    }

    impl Surface for MockSurface {
        fn screen_size(&self) -> Result<(u32, u32)> {
            Ok(self.screen)
        }

        fn set_style(&mut self, style: WindowStyle) -> Result<()> {
            self.calls.push(Call::Style(style));
            Ok(())
        }

        fn place(&mut self, placement: Placement) -> Result<()> {
            self.calls.push(Call::Place(placement));
            Ok(())
        }

        fn blit(&mut self, buffer: &FrameBuffer, dest: BlitRect) -> Result<()> {
            if self.fail_blit {
                return Err(EngineError::Platform("device lost".into()));
            }
            self.calls.push(Call::Blit {
                src: (buffer.width(), buffer.height()),
                dest,
                first_pixel: buffer.pixels().first().copied().unwrap_or(0),
            });
            Ok(())
        }
    }

    fn manager() -> DisplayManager<MockSurface> {
        DisplayManager::new(MockSurface::new(1920, 1080), 900, 900).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_size() {
        let err = DisplayManager::new(MockSurface::new(10, 10), 0, 5).err().unwrap();
        assert!(matches!(err, EngineError::InvalidSize { .. }));
    }

    #[test]
    fn test_enter_fullscreen_sets_margins_and_scale() {
        let mut dm = manager();
        dm.buffer_mut().clear(0x445566);
        dm.enter_fullscreen().unwrap();

        assert!(dm.is_fullscreen());
        let g = dm.geometry();
        assert_eq!(g.margin_horizontal, 420);
        assert_eq!(g.margin_vertical, 0);
        assert_eq!(g.to_logical(960, 540).x, 450);

        // Logical buffer keeps its size and contents
        assert_eq!((dm.buffer().width(), dm.buffer().height()), (900, 900));
        assert_eq!(dm.buffer().get_pixel(0, 0), Some(0x445566));

        let calls = &dm.surface().calls;
        assert_eq!(calls[0], Call::Style(WindowStyle::Borderless));
        assert_eq!(
            calls[1],
            Call::Place(Placement {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080
            })
        );
        // Transient full-screen clear
        assert_eq!(
            calls[2],
            Call::Blit {
                src: (1920, 1080),
                dest: BlitRect {
                    x: 0,
                    y: 0,
                    width: 1920,
                    height: 1080
                },
                first_pixel: BLACK,
            }
        );
    }

    #[test]
    fn test_exit_fullscreen_restores_identity() {
        let mut dm = manager();
        dm.enter_fullscreen().unwrap();
        dm.exit_fullscreen().unwrap();

        assert_eq!(dm.mode(), DisplayMode::Windowed);
        assert_eq!(*dm.geometry(), DisplayGeometry::windowed(900, 900));
        assert_eq!(
            dm.surface().calls.last(),
            Some(&Call::Place(Placement {
                x: 192,
                y: 108,
                width: 900,
                height: 900
            }))
        );
        assert!(dm
            .surface()
            .calls
            .contains(&Call::Style(WindowStyle::Decorated)));
    }

    #[test]
    fn test_toggle_alternates() {
        let mut dm = manager();
        dm.toggle_fullscreen().unwrap();
        assert!(dm.is_fullscreen());
        dm.toggle_fullscreen().unwrap();
        assert!(!dm.is_fullscreen());
        dm.toggle_fullscreen().unwrap();
        assert!(dm.is_fullscreen());
    }

    #[test]
    fn test_present_uses_margins_and_resets_clicks() {
        let mut dm = manager();
        dm.enter_fullscreen().unwrap();
        dm.surface_mut().calls.clear();

        let mut input = InputState::new();
        input.begin_frame(
            &[
                InputEvent::MouseDown {
                    x: 0,
                    y: 0,
                    button: MouseButtonKind::Left,
                },
                InputEvent::MouseUp {
                    x: 0,
                    y: 0,
                    button: MouseButtonKind::Left,
                },
            ],
            dm.geometry(),
        );
        assert!(input.left_click());

        dm.present(&mut input).unwrap();
        assert!(!input.left_click());
        assert_eq!(
            dm.surface().blits()[0],
            &Call::Blit {
                src: (900, 900),
                dest: BlitRect {
                    x: 420,
                    y: 0,
                    width: 1080,
                    height: 1080
                },
                first_pixel: 0,
            }
        );
    }

    #[test]
    fn test_failed_present_still_ends_frame() {
        let mut dm = manager();
        dm.surface_mut().fail_blit = true;
        let mut input = InputState::new();
        input.begin_frame(
            &[
                InputEvent::MouseDown {
                    x: 1,
                    y: 1,
                    button: MouseButtonKind::Right,
                },
                InputEvent::MouseUp {
                    x: 1,
                    y: 1,
                    button: MouseButtonKind::Right,
                },
            ],
            dm.geometry(),
        );
        assert!(dm.present(&mut input).is_err());
        assert!(!input.right_click());
    }

    #[test]
    fn test_resize_logical_reallocates() {
        let mut dm = manager();
        dm.resize_logical(320, 200).unwrap();
        assert_eq!(dm.buffer().len(), 320 * 200);
        assert_eq!(dm.destination().width, 320);

        dm.enter_fullscreen().unwrap();
        dm.resize_logical(400, 300).unwrap();
        assert_eq!(dm.buffer().len(), 400 * 300);
        // 4:3 on 16:9 -> pillarbox 1440 wide
        assert_eq!(dm.geometry().margin_horizontal, 240);
        assert_eq!(dm.geometry().windowed_width, 400);
    }

    #[test]
    fn test_failed_resize_keeps_buffer_and_geometry() {
        let mut dm = manager().with_edge_policy(EdgePolicy::SkipOrigin);
        let calls_before = dm.surface().calls.len();

        assert!(matches!(
            dm.resize_logical(u32::MAX, u32::MAX),
            Err(EngineError::OutOfMemory { .. })
        ));

        let g = dm.geometry();
        assert_eq!(
            dm.buffer().len(),
            g.windowed_width as usize * g.windowed_height as usize
        );
        assert_eq!((dm.buffer().width(), dm.buffer().height()), (900, 900));
        assert_eq!(dm.buffer().edge_policy(), EdgePolicy::SkipOrigin);
        assert_eq!(dm.surface().calls.len(), calls_before);
    }

    #[test]
    fn test_resize_keeps_edge_policy() {
        let mut dm = manager().with_edge_policy(EdgePolicy::SkipOrigin);
        dm.resize_logical(64, 48).unwrap();
        assert_eq!(dm.buffer().edge_policy(), EdgePolicy::SkipOrigin);
    }
}
