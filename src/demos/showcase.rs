//! Primitive showcase
//!
//! A tic-tac-toe board with an X and an O. Pressing D switches on dev mode:
//! a blue button square, a green triangle and a ring next to the button that
//! left/right clicks on the button turn yellow or pink.

use super::{Demo, Flow};
use crate::color::{BLACK, BLUE, CHARCOAL, GREEN, PINK, YELLOW};
use crate::display::raster::{
    draw_cross, draw_empty_circle, draw_line, draw_rect, draw_triangle,
};
use crate::display::FrameBuffer;
use crate::geometry::{Point, Rect};
use crate::input::{InputState, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ring {
    Hidden,
    Yellow,
    Pink,
}

pub struct Showcase {
    dev_mode: bool,
    button: Rect,
    ring: Ring,
}

impl Showcase {
    pub fn new() -> Self {
        Self {
            dev_mode: false,
            button: Rect::new(Point::new(600, 600), 100, 100),
            ring: Ring::Hidden,
        }
    }
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new()
    }
}

/// The 3x3 board used by the showcase and tic-tac-toe
pub(crate) fn draw_board_grid(fb: &mut FrameBuffer) {
    draw_line(fb, Point::new(300, 0), Point::new(300, 900), BLACK, 10);
    draw_line(fb, Point::new(600, 0), Point::new(600, 900), BLACK, 10);
    draw_line(fb, Point::new(0, 300), Point::new(900, 300), BLACK, 10);
    draw_line(fb, Point::new(0, 600), Point::new(900, 600), BLACK, 10);
}

impl Demo for Showcase {
    fn name(&self) -> &str {
        "showcase"
    }

    fn title(&self) -> &str {
        "Showcase"
    }

    fn size(&self) -> (u32, u32) {
        (900, 900)
    }

    fn update(&mut self, input: &InputState) -> Flow {
        if input.was_pressed(Key::Escape) {
            return Flow::Quit;
        }
        if input.was_pressed(Key::Char('D')) {
            self.dev_mode = true;
        }

        if self.dev_mode && self.button.contains(input.mouse()) {
            if input.left_click() {
                self.ring = if self.ring == Ring::Yellow {
                    Ring::Hidden
                } else {
                    Ring::Yellow
                };
            }
            if input.right_click() {
                self.ring = if self.ring == Ring::Pink {
                    Ring::Hidden
                } else {
                    Ring::Pink
                };
            }
        }
        Flow::Continue
    }

    fn render(&self, fb: &mut FrameBuffer) {
        fb.clear(CHARCOAL);
        draw_board_grid(fb);
        draw_cross(fb, Point::new(150, 150), 240, BLACK, 5);
        draw_empty_circle(fb, Point::new(450, 450), 120, BLACK, 5);

        if !self.dev_mode {
            return;
        }
        draw_rect(fb, &self.button, BLUE);
        draw_triangle(
            fb,
            Point::new(200, 300),
            Point::new(300, 400),
            Point::new(150, 500),
            GREEN,
        );
        let ring = match self.ring {
            Ring::Hidden => None,
            Ring::Yellow => Some(YELLOW),
            Ring::Pink => Some(PINK),
        };
        if let Some(color) = ring {
            draw_empty_circle(fb, Point::new(500, 300), 60, color, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::tests::{clicked, keys_down};
    use crate::input::MouseButtonKind;

    #[test]
    fn test_dev_mode_off_ignores_button() {
        let mut demo = Showcase::new();
        demo.update(&clicked(MouseButtonKind::Left, 650, 650));
        assert_eq!(demo.ring, Ring::Hidden);

        let mut fb = FrameBuffer::new(900, 900).unwrap();
        demo.render(&mut fb);
        assert_eq!(fb.count(BLUE), 0);
    }

    #[test]
    fn test_button_clicks_switch_ring() {
        let mut demo = Showcase::new();
        demo.update(&keys_down(&[Key::Char('D')]));
        assert!(demo.dev_mode);

        demo.update(&clicked(MouseButtonKind::Left, 650, 650));
        assert_eq!(demo.ring, Ring::Yellow);
        demo.update(&clicked(MouseButtonKind::Right, 650, 650));
        assert_eq!(demo.ring, Ring::Pink);
        demo.update(&clicked(MouseButtonKind::Right, 650, 650));
        assert_eq!(demo.ring, Ring::Hidden);

        // Border of the button is outside
        demo.update(&clicked(MouseButtonKind::Left, 600, 650));
        assert_eq!(demo.ring, Ring::Hidden);
    }

    #[test]
    fn test_render_dev_mode() {
        let mut demo = Showcase::new();
        demo.update(&keys_down(&[Key::Char('D')]));
        demo.update(&clicked(MouseButtonKind::Left, 610, 690));
        let mut fb = FrameBuffer::new(900, 900).unwrap();
        demo.render(&mut fb);

        assert_eq!(fb.count(BLUE), 100 * 100);
        assert!(fb.count(GREEN) > 0);
        assert!(fb.count(YELLOW) > 0);
        assert_eq!(fb.get_pixel(440, 450), Some(CHARCOAL));
    }

    #[test]
    fn test_escape_quits() {
        let mut demo = Showcase::new();
        assert_eq!(demo.update(&keys_down(&[Key::Escape])), Flow::Quit);
    }
}
