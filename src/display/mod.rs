mod font;
mod frame_buffer;
mod layout;
mod manager;
pub mod raster;
#[cfg(feature = "sdl")]
pub mod sdl;

pub use font::{
    draw_char_scaled, draw_text, draw_text_centered, draw_text_scaled, text_width,
    text_width_scaled, GLYPH_HEIGHT, GLYPH_WIDTH,
};
pub use frame_buffer::{EdgePolicy, FrameBuffer};
pub use layout::{fit_letterbox, BlitRect, DisplayGeometry, DisplayMode, Letterbox};
pub use manager::{DisplayManager, Placement, Surface, WindowStyle};

#[cfg(test)]
pub(crate) use manager::tests::MockSurface;
