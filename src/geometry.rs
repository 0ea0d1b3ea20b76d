//! Points, rectangles and the lerp used by curve sampling

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D coordinate pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

/// Pixel coordinates
pub type Point = Vec2<i32>;

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Point {
    /// Squared euclidean distance, exact for pixel coordinates
    #[inline]
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for Vec2<f32> {
    fn from(p: Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

impl Vec2<f32> {
    /// Point a fraction `t` of the way towards `other`
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Pixel holding this position, each axis truncated toward zero
    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Axis-aligned rectangle. `width`/`height` always equal `max - min`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Rectangle spanning two corners
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Rectangle from its top-left corner and a size
    pub fn new(origin: Point, width: i32, height: i32) -> Self {
        Self {
            min: origin,
            max: Point::new(origin.x + width, origin.y + height),
        }
    }

    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    /// Strict hit test: points on the border are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}
