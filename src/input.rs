//! Per-frame input snapshot
//!
//! Platform events are folded into an [`InputState`] once per frame. Demos only
//! ever see the snapshot, never raw events.

use crate::display::DisplayGeometry;
use crate::geometry::Point;
use std::collections::HashSet;

/// Keys the engine and demos care about. Printable keys arrive as uppercase
/// `Char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F11,
    Enter,
    Space,
    Backspace,
    Tab,
    /// Either shift key
    Shift,
    /// Either control key
    Control,
    Left,
    Right,
    Up,
    Down,
    Char(char),
}

impl Key {
    /// Printable key, case folded
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonKind {
    Left,
    Right,
    Middle,
}

/// Platform event in physical window coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseDown {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
    MouseUp {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
}

/// One pointer button: level state plus the one-shot click latch
#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    down: bool,
    click: bool,
}

impl ButtonState {
    fn press(&mut self) {
        self.down = true;
    }

    /// Release after a press flips the latch
    fn release(&mut self) {
        if self.down {
            self.click = !self.click;
        }
        self.down = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    released: HashSet<Key>,
    mouse: Point,
    /// Last pointer position as reported, before mapping
    physical: (i32, i32),
    left: ButtonState,
    right: ButtonState,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the snapshot. Pointer positions are mapped to
    /// logical bitmap coordinates through `geometry`.
    pub fn apply(&mut self, event: &InputEvent, geometry: &DisplayGeometry) {
        match *event {
            InputEvent::Quit => self.quit = true,
            InputEvent::KeyDown(key) => {
                // Auto-repeat keeps the key held without a new edge
                if self.held.insert(key) {
                    self.pressed.insert(key);
                }
            }
            InputEvent::KeyUp(key) => {
                if self.held.remove(&key) {
                    self.released.insert(key);
                }
            }
            InputEvent::MouseMove { x, y } => {
                self.track_pointer(x, y, geometry);
            }
            InputEvent::MouseDown { x, y, button } => {
                self.track_pointer(x, y, geometry);
                if let Some(state) = self.button_mut(button) {
                    state.press();
                }
            }
            InputEvent::MouseUp { x, y, button } => {
                self.track_pointer(x, y, geometry);
                if let Some(state) = self.button_mut(button) {
                    state.release();
                }
            }
        }
    }

    fn track_pointer(&mut self, x: i32, y: i32, geometry: &DisplayGeometry) {
        self.physical = (x, y);
        self.mouse = geometry.to_logical(x, y);
    }

    /// Re-map the last reported pointer position after the geometry changed
    pub fn remap_pointer(&mut self, geometry: &DisplayGeometry) {
        let (x, y) = self.physical;
        self.mouse = geometry.to_logical(x, y);
    }

    /// Fold a whole frame's worth of events
    pub fn begin_frame(&mut self, events: &[InputEvent], geometry: &DisplayGeometry) {
        for event in events {
            self.apply(event, geometry);
        }
    }

    /// Reset click latches and key edges. Held state and mouse position persist.
    pub fn end_frame(&mut self) {
        self.left.click = false;
        self.right.click = false;
        self.pressed.clear();
        self.released.clear();
    }

    fn button_mut(&mut self, button: MouseButtonKind) -> Option<&mut ButtonState> {
        match button {
            MouseButtonKind::Left => Some(&mut self.left),
            MouseButtonKind::Right => Some(&mut self.right),
            MouseButtonKind::Middle => None,
        }
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Key went down during this frame
    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Key went up during this frame
    #[inline]
    pub fn was_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    /// Pointer position in logical bitmap coordinates
    #[inline]
    pub fn mouse(&self) -> Point {
        self.mouse
    }

    #[inline]
    pub fn left_click(&self) -> bool {
        self.left.click
    }

    #[inline]
    pub fn right_click(&self) -> bool {
        self.right.click
    }

    #[inline]
    pub fn left_held(&self) -> bool {
        self.left.down
    }

    #[inline]
    pub fn right_held(&self) -> bool {
        self.right.down
    }

    #[inline]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windowed() -> DisplayGeometry {
        DisplayGeometry::windowed(900, 900)
    }

    fn click(button: MouseButtonKind, x: i32, y: i32) -> [InputEvent; 2] {
        [
            InputEvent::MouseDown { x, y, button },
            InputEvent::MouseUp { x, y, button },
        ]
    }

    #[test]
    fn test_click_latch_sets_on_release() {
        let g = windowed();
        let mut input = InputState::new();
        input.apply(
            &InputEvent::MouseDown {
                x: 10,
                y: 20,
                button: MouseButtonKind::Left,
            },
            &g,
        );
        assert!(input.left_held());
        assert!(!input.left_click());

        input.apply(
            &InputEvent::MouseUp {
                x: 10,
                y: 20,
                button: MouseButtonKind::Left,
            },
            &g,
        );
        assert!(!input.left_held());
        assert!(input.left_click());
        assert!(!input.right_click());
        assert_eq!(input.mouse(), Point::new(10, 20));

        input.end_frame();
        assert!(!input.left_click());
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let mut input = InputState::new();
        input.apply(
            &InputEvent::MouseUp {
                x: 0,
                y: 0,
                button: MouseButtonKind::Right,
            },
            &windowed(),
        );
        assert!(!input.right_click());
    }

    #[test]
    fn test_double_click_in_one_frame_toggles_back() {
        let g = windowed();
        let mut input = InputState::new();
        input.begin_frame(&click(MouseButtonKind::Right, 5, 5), &g);
        input.begin_frame(&click(MouseButtonKind::Right, 5, 5), &g);
        assert!(!input.right_click());
    }

    #[test]
    fn test_key_edges_and_held() {
        let g = windowed();
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown(Key::char('d')), &g);
        assert!(input.is_held(Key::Char('D')));
        assert!(input.was_pressed(Key::Char('D')));

        input.end_frame();
        // Repeat event while held is not a new press
        input.apply(&InputEvent::KeyDown(Key::Char('D')), &g);
        assert!(input.is_held(Key::Char('D')));
        assert!(!input.was_pressed(Key::Char('D')));

        input.apply(&InputEvent::KeyUp(Key::Char('D')), &g);
        assert!(!input.is_held(Key::Char('D')));
        assert!(input.was_released(Key::Char('D')));
        input.end_frame();
        assert!(!input.was_released(Key::Char('D')));
    }

    #[test]
    fn test_mouse_is_de_letterboxed() {
        let g = DisplayGeometry::fullscreen(900, 900, 1920, 1080);
        let mut input = InputState::new();
        input.apply(&InputEvent::MouseMove { x: 960, y: 540 }, &g);
        assert_eq!(input.mouse(), Point::new(450, 450));

        input.apply(&InputEvent::MouseMove { x: 420, y: 0 }, &g);
        assert_eq!(input.mouse(), Point::new(0, 0));

        // Inside the left margin
        input.apply(&InputEvent::MouseMove { x: 100, y: 0 }, &g);
        assert!(input.mouse().x < 0);
    }

    #[test]
    fn test_quit_persists_across_frames() {
        let mut input = InputState::new();
        input.apply(&InputEvent::Quit, &windowed());
        input.end_frame();
        assert!(input.quit_requested());
    }

    #[test]
    fn test_middle_button_ignored() {
        let mut input = InputState::new();
        input.begin_frame(&click(MouseButtonKind::Middle, 1, 2), &windowed());
        assert!(!input.left_click() && !input.right_click());
        assert_eq!(input.mouse(), Point::new(1, 2));
    }
}
