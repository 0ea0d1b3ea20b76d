//! Scan-conversion primitives
//!
//! Stateless: every function mutates the `FrameBuffer` it is given and nothing else.
//! Coordinates outside the buffer are clipped pixel by pixel, so shapes may overshoot.

use super::FrameBuffer;
use crate::color::Pixel;
use crate::geometry::{Point, Rect, Vec2};

/// Parametric step used by the Bezier samplers
pub const BEZIER_SAMPLES: u32 = 10_000;

/// Set a single pixel
#[inline]
pub fn draw_pixel(fb: &mut FrameBuffer, p: Point, color: Pixel) {
    fb.set_pixel(p.x, p.y, color);
}

/// Filled disk: every offset with `dx² + dy² <= radius²`.
/// A radius of 1 or less sets only the origin pixel.
pub fn draw_circle(fb: &mut FrameBuffer, origin: Point, radius: i32, color: Pixel) {
    if radius <= 1 {
        fb.set_pixel(origin.x, origin.y, color);
        return;
    }

    let (ox, oy, r) = (origin.x as i64, origin.y as i64, radius as i64);
    let r_sq = r * r;
    // Only rows and columns inside the buffer can be written
    let (y_min, y_max) = ((oy - r).max(0), (oy + r).min(fb.height() as i64 - 1));
    let (x_min, x_max) = ((ox - r).max(0), (ox + r).min(fb.width() as i64 - 1));
    for y in y_min..=y_max {
        let dy = y - oy;
        for x in x_min..=x_max {
            let dx = x - ox;
            if dx * dx + dy * dy <= r_sq {
                fb.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}

/// Stamp at `(x, y)` if the centre is representable at all
#[inline]
fn stamp_at(fb: &mut FrameBuffer, x: i64, y: i64, radius: i32, color: Pixel) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        draw_circle(fb, Point::new(x, y), radius, color);
    }
}

/// Circle outline via the midpoint walk, each boundary point stamped with a
/// `thickness` disk.
pub fn draw_empty_circle(
    fb: &mut FrameBuffer,
    origin: Point,
    radius: i32,
    color: Pixel,
    thickness: u32,
) {
    let stamp = thickness as i32;
    if radius <= 0 {
        draw_circle(fb, origin, stamp, color);
        return;
    }

    let (cx, cy) = (origin.x as i64, origin.y as i64);
    let mut x = radius as i64;
    let mut y = 0i64;
    let mut err = 1 - x;

    while x >= y {
        for &(ox, oy) in &[
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            stamp_at(fb, cx + ox, cy + oy, stamp, color);
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Integer Bresenham line from `p1` to `p2`, inclusive of both ends.
///
/// The driving axis is whichever of |dx|, |dy| is larger. Each stepped point
/// is stamped with a disk of radius `thickness`, which gives thick lines
/// rounded caps. Deltas are 64-bit so any pair of `i32` endpoints works.
pub fn draw_line(fb: &mut FrameBuffer, p1: Point, p2: Point, color: Pixel, thickness: u32) {
    let stamp = thickness as i32;
    let dx = p2.x as i64 - p1.x as i64;
    let dy = p2.y as i64 - p1.y as i64;
    let dx_abs = dx.abs();
    let dy_abs = dy.abs();
    // Minor axis moves forward when both deltas share a sign
    let minor_step = if (dx < 0 && dy < 0) || (dx > 0 && dy > 0) {
        1
    } else {
        -1
    };

    if dx_abs >= dy_abs {
        let mut pk = 2 * dy_abs - dx_abs;
        let (mut x, mut y, end) = if dx >= 0 {
            (p1.x as i64, p1.y as i64, p2.x as i64)
        } else {
            (p2.x as i64, p2.y as i64, p1.x as i64)
        };

        stamp_at(fb, x, y, stamp, color);
        while x < end {
            x += 1;
            if pk < 0 {
                pk += 2 * dy_abs;
            } else {
                y += minor_step;
                pk += 2 * (dy_abs - dx_abs);
            }
            stamp_at(fb, x, y, stamp, color);
        }
    } else {
        let mut pk = 2 * dx_abs - dy_abs;
        let (mut x, mut y, end) = if dy >= 0 {
            (p1.x as i64, p1.y as i64, p2.y as i64)
        } else {
            (p2.x as i64, p2.y as i64, p1.y as i64)
        };

        stamp_at(fb, x, y, stamp, color);
        while y < end {
            y += 1;
            if pk <= 0 {
                pk += 2 * dx_abs;
            } else {
                x += minor_step;
                pk += 2 * (dx_abs - dy_abs);
            }
            stamp_at(fb, x, y, stamp, color);
        }
    }
}

/// Two diagonals of a `size` square centred on `origin`
pub fn draw_cross(fb: &mut FrameBuffer, origin: Point, size: i32, color: Pixel, thickness: u32) {
    let half = size / 2;
    draw_line(
        fb,
        Point::new(origin.x - half, origin.y - half),
        Point::new(origin.x + half, origin.y + half),
        color,
        thickness,
    );
    draw_line(
        fb,
        Point::new(origin.x - half, origin.y + half),
        Point::new(origin.x + half, origin.y - half),
        color,
        thickness,
    );
}

/// Fill `width` x `height` pixels starting at `origin`, row by row
pub fn draw_rectangle(fb: &mut FrameBuffer, origin: Point, width: i32, height: i32, color: Pixel) {
    if width <= 0 {
        return;
    }
    for row in 0..height {
        fb.fill_span(origin.x, origin.x + width - 1, origin.y + row, color);
    }
}

pub fn draw_rect(fb: &mut FrameBuffer, rect: &Rect, color: Pixel) {
    draw_rectangle(fb, rect.min(), rect.width(), rect.height(), color);
}

// ============================================================================
// Triangles
// ============================================================================

/// Filled triangle by scanline decomposition.
///
/// Vertices are sorted by y. A triangle with a horizontal edge is filled
/// directly, otherwise it is split at v4 on edge v1-v3 (same y as v2) into a
/// flat-bottom and a flat-top half. Collinear vertices degrade to the
/// boundary line.
pub fn draw_triangle(fb: &mut FrameBuffer, v1: Point, v2: Point, v3: Point, color: Pixel) {
    let mut v = [v1, v2, v3];
    v.sort_by_key(|p| p.y);
    let [v1, v2, v3] = v;

    if v1.y == v3.y {
        // Zero height: no inverse slope exists
        let min_x = v1.x.min(v2.x).min(v3.x);
        let max_x = v1.x.max(v2.x).max(v3.x);
        fb.fill_span(min_x, max_x, v1.y, color);
    } else if v2.y == v3.y {
        fill_bottom_flat(fb, v1, v2, v3, color);
    } else if v1.y == v2.y {
        fill_top_flat(fb, v1, v2, v3, v1.y, color);
    } else {
        let v4 = Point::new(edge_x(v1, v3, v2.y), v2.y);
        fill_bottom_flat(fb, v1, v2, v4, color);
        // v2's row already belongs to the upper half
        fill_top_flat(fb, v2, v4, v3, v2.y + 1, color);
    }
}

/// X of edge `from`-`to` on row `y`, truncated toward zero.
///
/// The inverse slope is kept as the exact ratio dx/dy so long edges do not
/// drift the way an accumulated float would. Requires `from.y != to.y`.
#[inline]
fn edge_x(from: Point, to: Point, y: i32) -> i32 {
    let dy = to.y as i128 - from.y as i128;
    let num = from.x as i128 * dy + (to.x as i128 - from.x as i128) * (y as i128 - from.y as i128);
    // Integer division truncates toward zero
    (num / dy) as i32
}

/// Apex `v1` above the horizontal edge `v2`-`v3`; rows `v1.y..=v2.y`.
/// Requires `v1.y < v2.y == v3.y`.
fn fill_bottom_flat(fb: &mut FrameBuffer, v1: Point, v2: Point, v3: Point, color: Pixel) {
    for y in v1.y..=v2.y {
        fb.fill_span(edge_x(v1, v2, y), edge_x(v1, v3, y), y, color);
    }
}

/// Horizontal edge `v1`-`v2` above the apex `v3`; walks up from `v3.y` to `top`.
/// Requires `v1.y == v2.y < v3.y`.
fn fill_top_flat(fb: &mut FrameBuffer, v1: Point, v2: Point, v3: Point, top: i32, color: Pixel) {
    for y in (top..=v3.y).rev() {
        fb.fill_span(edge_x(v3, v1, y), edge_x(v3, v2, y), y, color);
    }
}

// ============================================================================
// Bezier curves
// ============================================================================

/// Sample parameter values `0, 1/N, ..., (N-1)/N` and then exactly 1.0
fn bezier_params() -> impl Iterator<Item = f32> {
    (0..BEZIER_SAMPLES)
        .map(|i| i as f32 / BEZIER_SAMPLES as f32)
        .chain(std::iter::once(1.0))
}

/// Quadratic Bezier by nested lerp, a `thickness` disk per sample.
/// Intermediate points stay fractional; only the sample is truncated.
pub fn draw_bezier_quadratic(
    fb: &mut FrameBuffer,
    p1: Point,
    p2: Point,
    p3: Point,
    color: Pixel,
    thickness: u32,
) {
    let [p1, p2, p3] = [p1, p2, p3].map(Vec2::<f32>::from);
    for t in bezier_params() {
        let a = p1.lerp(p2, t);
        let b = p2.lerp(p3, t);
        draw_circle(fb, a.lerp(b, t).to_point(), thickness as i32, color);
    }
}

/// Cubic Bezier by nested lerp, a `thickness` disk per sample
pub fn draw_bezier_cubic(
    fb: &mut FrameBuffer,
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    color: Pixel,
    thickness: u32,
) {
    let [p1, p2, p3, p4] = [p1, p2, p3, p4].map(Vec2::<f32>::from);
    for t in bezier_params() {
        let a = p1.lerp(p2, t);
        let b = p2.lerp(p3, t);
        let c = p3.lerp(p4, t);
        let n = a.lerp(b, t);
        let m = b.lerp(c, t);
        draw_circle(fb, n.lerp(m, t).to_point(), thickness as i32, color);
    }
}
