//! 0xRRGGBB pixel values
//!
//! The top byte is unused. Writes always replace, there is no alpha.

pub type Pixel = u32;

pub const RED: Pixel = 0xFF0000;
pub const GREEN: Pixel = 0x00FF00;
pub const BLUE: Pixel = 0x0000FF;
pub const YELLOW: Pixel = 0xFFFF00;
pub const PINK: Pixel = 0xFFC0CB;
pub const PURPLE: Pixel = 0x800080;
pub const ORANGE: Pixel = 0xFFA500;
pub const WHITE: Pixel = 0xFFFFFF;
pub const BLACK: Pixel = 0x000000;
pub const GREY: Pixel = 0x808080;
pub const CHARCOAL: Pixel = 0x333333;

/// Pack 8-bit channels into a pixel
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Pixel {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a pixel into (r, g, b)
#[inline]
pub const fn channels(pixel: Pixel) -> (u8, u8, u8) {
    ((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
}
