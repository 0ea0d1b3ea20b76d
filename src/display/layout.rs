//! Window geometry for windowed and letterboxed fullscreen modes

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
}

/// Destination of the per-frame stretch blit, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Where the logical bitmap lands on a physical screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Extent the bitmap is stretched to
    pub fitted_width: u32,
    pub fitted_height: u32,
    /// Left/right border
    pub margin_horizontal: i32,
    /// Top/bottom border
    pub margin_vertical: i32,
}

/// Largest aspect-preserving fit of `logical` inside `screen`.
///
/// A screen relatively wider than the bitmap is height-constrained and gets
/// side margins (pillarbox); otherwise it gets top/bottom margins (letterbox).
pub fn fit_letterbox(logical_w: u32, logical_h: u32, screen_w: u32, screen_h: u32) -> Letterbox {
    let (lw, lh) = (logical_w.max(1) as u64, logical_h.max(1) as u64);
    let (sw, sh) = (screen_w as u64, screen_h as u64);

    if sw * lh > sh * lw {
        let fitted_width = (sh * lw / lh) as u32;
        Letterbox {
            fitted_width,
            fitted_height: screen_h,
            margin_horizontal: ((screen_w - fitted_width) / 2) as i32,
            margin_vertical: 0,
        }
    } else {
        let fitted_height = (sw * lh / lw) as u32;
        Letterbox {
            fitted_width: screen_w,
            fitted_height,
            margin_horizontal: 0,
            margin_vertical: ((screen_h - fitted_height) / 2) as i32,
        }
    }
}

/// Windowed size, current physical size, margins and the input scale transform.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGeometry {
    pub windowed_width: u32,
    pub windowed_height: u32,
    pub width: u32,
    pub height: u32,
    pub margin_horizontal: i32,
    pub margin_vertical: i32,
    /// Logical pixels per physical pixel. Reported in logs only;
    /// `to_logical` uses the exact integer ratio of logical to fitted size.
    pub scale_x: f32,
    pub scale_y: f32,
}

impl DisplayGeometry {
    pub fn windowed(width: u32, height: u32) -> Self {
        Self {
            windowed_width: width,
            windowed_height: height,
            width,
            height,
            margin_horizontal: 0,
            margin_vertical: 0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Occupy a `screen_w` x `screen_h` display, letterboxing the windowed size
    pub fn fullscreen(windowed_width: u32, windowed_height: u32, screen_w: u32, screen_h: u32) -> Self {
        let fit = fit_letterbox(windowed_width, windowed_height, screen_w, screen_h);
        Self {
            windowed_width,
            windowed_height,
            width: screen_w,
            height: screen_h,
            margin_horizontal: fit.margin_horizontal,
            margin_vertical: fit.margin_vertical,
            scale_x: windowed_width as f32 / fit.fitted_width.max(1) as f32,
            scale_y: windowed_height as f32 / fit.fitted_height.max(1) as f32,
        }
    }

    /// Stretched extent of the bitmap on the physical surface
    pub fn fitted_size(&self) -> (u32, u32) {
        (
            (self.width as i64 - 2 * self.margin_horizontal as i64).max(0) as u32,
            (self.height as i64 - 2 * self.margin_vertical as i64).max(0) as u32,
        )
    }

    /// `[margin, size - margin]`
    pub fn destination(&self) -> BlitRect {
        let (width, height) = self.fitted_size();
        BlitRect {
            x: self.margin_horizontal,
            y: self.margin_vertical,
            width,
            height,
        }
    }

    /// Map a physical pointer position to bitmap coordinates.
    ///
    /// Exact integer form of `(p - margin) * scale`; positions inside a margin
    /// map outside the bitmap.
    pub fn to_logical(&self, px: i32, py: i32) -> Point {
        let (fw, fh) = self.fitted_size();
        let map = |p: i32, margin: i32, logical: u32, fitted: u32| -> i32 {
            if fitted == 0 {
                return 0;
            }
            ((p - margin) as i64 * logical as i64).div_euclid(fitted as i64) as i32
        };
        Point::new(
            map(px, self.margin_horizontal, self.windowed_width, fw),
            map(py, self.margin_vertical, self.windowed_height, fh),
        )
    }
}
