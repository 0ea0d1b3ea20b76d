pub mod cli;
pub mod color;
pub mod config;
pub mod demos;
pub mod display;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod util;

pub use config::EngineConfig;
pub use display::{DisplayManager, EdgePolicy, FrameBuffer, Surface};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use geometry::{Point, Rect, Vec2};
pub use input::{InputEvent, InputState, Key, MouseButtonKind};
