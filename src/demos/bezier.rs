//! Animated Bezier curves
//!
//! One quadratic and two cubic curves sharing control points. A few control
//! points are nudged every frame by a truncated sine, so the curves wander.

use super::{Demo, Flow};
use crate::color::{BLUE, CHARCOAL, GREEN, RED};
use crate::display::raster::{draw_bezier_cubic, draw_bezier_quadratic};
use crate::display::FrameBuffer;
use crate::geometry::Point;
use crate::input::{InputState, Key};

pub struct BezierDemo {
    quadratic: [Point; 3],
    cubic: [Point; 4],
    frame: i64,
}

/// Per-frame nudge: `trunc(2 sin(5 (frame - 2)) + bias)`
fn drift(frame: i64, bias: f64) -> i32 {
    (2.0 * ((5 * (frame - 2)) as f64).sin() + bias) as i32
}

impl BezierDemo {
    pub fn new() -> Self {
        Self {
            quadratic: [Point::new(100, 100), Point::new(150, 300), Point::new(500, 150)],
            cubic: [
                Point::new(400, 300),
                Point::new(450, 200),
                Point::new(600, 650),
                Point::new(800, 150),
            ],
            frame: 0,
        }
    }

    fn step(&mut self) {
        self.frame += 1;
        let f = self.frame;
        self.quadratic[0].x += drift(f, 0.1);
        self.quadratic[1].y += drift(f, 0.2);
        self.cubic[1].x += drift(f, 0.3);
        self.cubic[2].y -= drift(f, 0.4);
        self.cubic[3].y += drift(f, 0.5);
    }
}

impl Default for BezierDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for BezierDemo {
    fn name(&self) -> &str {
        "bezier"
    }

    fn title(&self) -> &str {
        "Bezier Curves"
    }

    fn size(&self) -> (u32, u32) {
        (900, 900)
    }

    fn update(&mut self, input: &InputState) -> Flow {
        if input.was_pressed(Key::Escape) {
            return Flow::Quit;
        }
        self.step();
        Flow::Continue
    }

    fn render(&self, fb: &mut FrameBuffer) {
        fb.clear(CHARCOAL);
        let [q0, q1, q2] = self.quadratic;
        let [c0, c1, c2, c3] = self.cubic;
        draw_bezier_quadratic(fb, q0, q1, q2, RED, 1);
        draw_bezier_cubic(fb, c0, c1, c2, c3, BLUE, 1);
        // Same points, pairwise swapped
        draw_bezier_cubic(fb, c1, c0, c3, c2, GREEN, 1);
    }
}
