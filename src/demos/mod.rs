mod bezier;
mod maze;
mod pathfinding;
mod showcase;
mod sorting;
mod tictactoe;

pub use bezier::BezierDemo;
pub use maze::Maze;
pub use pathfinding::{find_path, PathMode, Pathfinding, TileGrid};
pub use showcase::Showcase;
pub use sorting::{Algorithm, Sorting};
pub use tictactoe::{Board, Cell, TicTacToe};

use crate::display::FrameBuffer;
use crate::input::InputState;

/// What the frame loop should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A program driven by the engine's frame loop
pub trait Demo {
    /// Identifier used on the command line
    fn name(&self) -> &str;

    /// Window caption
    fn title(&self) -> &str;

    /// Logical bitmap size
    fn size(&self) -> (u32, u32);

    /// Advance one frame from the input snapshot
    fn update(&mut self, input: &InputState) -> Flow;

    /// Draw the current state. Demos that keep their picture between frames
    /// redraw everything here anyway, the buffer may have been reallocated.
    fn render(&self, buffer: &mut FrameBuffer);
}

pub const DEMO_NAMES: [&str; 6] = [
    "showcase",
    "tictactoe",
    "maze",
    "pathfinding",
    "bezier",
    "sorting",
];

/// Construct a demo from its command line name
pub fn by_name(name: &str) -> Option<Box<dyn Demo>> {
    let demo: Box<dyn Demo> = match name {
        "showcase" => Box::new(Showcase::new()),
        "tictactoe" => Box::new(TicTacToe::new()),
        "maze" => Box::new(Maze::new()),
        "pathfinding" => Box::new(Pathfinding::new()),
        "bezier" => Box::new(BezierDemo::new()),
        "sorting" => Box::new(Sorting::new()),
        _ => return None,
    };
    Some(demo)
}
