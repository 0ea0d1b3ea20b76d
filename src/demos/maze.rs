//! Tile editor: right click flips a tile between wall (red) and floor

use super::{Demo, Flow};
use crate::color::{BLACK, CHARCOAL, RED};
use crate::display::raster::draw_rect;
use crate::display::FrameBuffer;
use crate::geometry::{Point, Rect};
use crate::input::{InputState, Key};

const WINDOW: i32 = 900;
const TILES: usize = 10;
const GAP: i32 = 2;

#[derive(Debug, Clone, Copy)]
struct Tile {
    rect: Rect,
    on: bool,
}

pub struct Maze {
    tiles: Vec<Tile>,
}

impl Maze {
    pub fn new() -> Self {
        let pitch = WINDOW / TILES as i32;
        let tiles = (0..TILES * TILES)
            .map(|i| {
                let (row, col) = ((i / TILES) as i32, (i % TILES) as i32);
                Tile {
                    rect: Rect::from_corners(
                        Point::new(GAP + col * pitch, GAP + row * pitch),
                        Point::new(pitch - GAP + col * pitch, pitch - GAP + row * pitch),
                    ),
                    on: false,
                }
            })
            .collect();
        Self { tiles }
    }

    /// Whether the tile at (row, col) is switched on
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.tiles[row * TILES + col].on
    }

    fn toggle_at(&mut self, p: Point) {
        for tile in self.tiles.iter_mut().filter(|t| t.rect.contains(p)) {
            tile.on = !tile.on;
        }
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Maze {
    fn name(&self) -> &str {
        "maze"
    }

    fn title(&self) -> &str {
        "Maze"
    }

    fn size(&self) -> (u32, u32) {
        (WINDOW as u32, WINDOW as u32)
    }

    fn update(&mut self, input: &InputState) -> Flow {
        if input.was_pressed(Key::Escape) {
            return Flow::Quit;
        }
        if input.right_click() {
            self.toggle_at(input.mouse());
        }
        Flow::Continue
    }

    fn render(&self, fb: &mut FrameBuffer) {
        fb.clear(BLACK);
        for tile in &self.tiles {
            draw_rect(fb, &tile.rect, if tile.on { RED } else { CHARCOAL });
        }
    }
}
