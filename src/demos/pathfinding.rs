//! A* path finding on a tile grid
//!
//! Left click toggles an obstacle, Shift+click moves the start, Ctrl+click
//! moves the target and P switches between exhaustive and first-reach search.
//! The path is recomputed after every change.

use super::{Demo, Flow};
use crate::color::{Pixel, BLACK, CHARCOAL};
use crate::display::raster::{draw_line, draw_rect};
use crate::display::FrameBuffer;
use crate::geometry::{Point, Rect};
use crate::input::{InputState, Key};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const WINDOW: i32 = 900;
const TILES: usize = 16;
const GAP: i32 = 3;

const START_COLOR: Pixel = 0x3333C1;
const END_COLOR: Pixel = 0x00C100;
const OBSTACLE_COLOR: Pixel = 0x111111;
const VISITED_COLOR: Pixel = 0x262626;
const PATH_COLOR: Pixel = 0xA97700;

// ============================================================================
// Search
// ============================================================================

/// Rectangular grid of walkable or blocked tiles, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    obstacles: Vec<bool>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            obstacles: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    #[inline]
    pub fn is_obstacle(&self, idx: usize) -> bool {
        self.obstacles[idx]
    }

    pub fn set_obstacle(&mut self, idx: usize, blocked: bool) {
        self.obstacles[idx] = blocked;
    }

    /// 4-connected neighbours: right, left, down, up
    pub fn neighbours(&self, idx: usize) -> impl Iterator<Item = usize> {
        let (col, row) = self.coords(idx);
        let (w, h) = (self.width, self.height);
        [
            (col + 1 < w).then(|| idx + 1),
            (col > 0).then(|| idx - 1),
            (row + 1 < h).then(|| idx + w),
            (row > 0).then(|| idx - w),
        ]
        .into_iter()
        .flatten()
    }

    fn distance(&self, a: usize, b: usize) -> f32 {
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        let dx = ax as f32 - bx as f32;
        let dy = ay as f32 - by as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathMode {
    /// Keep searching until every reachable tile has been expanded
    #[default]
    Best,
    /// Stop as soon as the target is expanded
    FirstReach,
}

impl PathMode {
    fn toggled(self) -> Self {
        match self {
            PathMode::Best => PathMode::FirstReach,
            PathMode::FirstReach => PathMode::Best,
        }
    }
}

/// Outcome of one search
#[derive(Debug, Clone, Default)]
pub struct Search {
    /// Tiles expanded by the search
    pub visited: Vec<bool>,
    /// Start to target inclusive, empty when unreachable
    pub path: Vec<usize>,
}

/// Open-list entry ordered so the heap pops the lowest estimate first
#[derive(Debug, Clone, Copy)]
struct Open {
    estimate: f32,
    idx: usize,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

/// A* with a Euclidean heuristic over the 4-connected grid
pub fn find_path(grid: &TileGrid, start: usize, end: usize, mode: PathMode) -> Search {
    let n = grid.len();
    let mut visited = vec![false; n];
    let mut cost = vec![f32::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut open = BinaryHeap::new();

    if start >= n || end >= n {
        return Search { visited, path: Vec::new() };
    }

    cost[start] = 0.0;
    open.push(Open {
        estimate: grid.distance(start, end),
        idx: start,
    });

    while let Some(Open { idx: current, .. }) = open.pop() {
        if visited[current] {
            continue;
        }
        visited[current] = true;
        if current == end && mode == PathMode::FirstReach {
            break;
        }

        for next in grid.neighbours(current) {
            if visited[next] || grid.is_obstacle(next) {
                continue;
            }
            let candidate = cost[current] + grid.distance(current, next);
            if candidate < cost[next] {
                cost[next] = candidate;
                parent[next] = Some(current);
                open.push(Open {
                    estimate: candidate + grid.distance(next, end),
                    idx: next,
                });
            }
        }
    }

    let mut path = Vec::new();
    if visited[end] {
        let mut at = Some(end);
        while let Some(idx) = at {
            path.push(idx);
            at = parent[idx];
        }
        path.reverse();
    }
    Search { visited, path }
}

// ============================================================================
// Demo
// ============================================================================

pub struct Pathfinding {
    grid: TileGrid,
    rects: Vec<Rect>,
    start: usize,
    end: usize,
    mode: PathMode,
    search: Search,
}

impl Pathfinding {
    pub fn new() -> Self {
        let grid = TileGrid::new(TILES, TILES);
        let pitch = WINDOW / TILES as i32;
        let rects = (0..grid.len())
            .map(|idx| {
                let (col, row) = grid.coords(idx);
                let (x, y) = (col as i32 * pitch, row as i32 * pitch);
                Rect::from_corners(
                    Point::new(GAP + x, GAP + y),
                    Point::new(pitch - GAP + x, pitch - GAP + y),
                )
            })
            .collect();
        let end = grid.len() - 1;
        let mut demo = Self {
            grid,
            rects,
            start: 0,
            end,
            mode: PathMode::Best,
            search: Search::default(),
        };
        demo.solve();
        demo
    }

    fn solve(&mut self) {
        self.search = find_path(&self.grid, self.start, self.end, self.mode);
        log::debug!(
            "{:?} search: {} visited, path of {}",
            self.mode,
            self.search.visited.iter().filter(|&&v| v).count(),
            self.search.path.len()
        );
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    pub fn mode(&self) -> PathMode {
        self.mode
    }

    fn tile_at(&self, p: Point) -> Option<usize> {
        self.rects.iter().position(|r| r.contains(p))
    }

    fn click(&mut self, idx: usize, input: &InputState) {
        if input.is_held(Key::Shift) {
            self.grid.set_obstacle(idx, false);
            self.start = idx;
        } else if input.is_held(Key::Control) {
            self.grid.set_obstacle(idx, false);
            self.end = idx;
        } else if idx != self.start && idx != self.end {
            let blocked = self.grid.is_obstacle(idx);
            self.grid.set_obstacle(idx, !blocked);
        }
    }

    fn tile_color(&self, idx: usize) -> Pixel {
        if idx == self.start {
            START_COLOR
        } else if idx == self.end {
            END_COLOR
        } else if self.grid.is_obstacle(idx) {
            OBSTACLE_COLOR
        } else if self.search.visited.get(idx).copied().unwrap_or(false) {
            VISITED_COLOR
        } else {
            CHARCOAL
        }
    }
}

impl Default for Pathfinding {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Pathfinding {
    fn name(&self) -> &str {
        "pathfinding"
    }

    fn title(&self) -> &str {
        "A* Path Finding"
    }

    fn size(&self) -> (u32, u32) {
        (WINDOW as u32, WINDOW as u32)
    }

    fn update(&mut self, input: &InputState) -> Flow {
        if input.was_pressed(Key::Escape) {
            return Flow::Quit;
        }

        let mut changed = false;
        if input.was_pressed(Key::Char('P')) {
            self.mode = self.mode.toggled();
            changed = true;
        }
        if input.left_click() {
            if let Some(idx) = self.tile_at(input.mouse()) {
                self.click(idx, input);
                changed = true;
            }
        }
        if changed {
            self.solve();
        }
        Flow::Continue
    }

    fn render(&self, fb: &mut FrameBuffer) {
        fb.clear(BLACK);

        for (idx, rect) in self.rects.iter().enumerate() {
            for n in self.grid.neighbours(idx) {
                draw_line(fb, rect.center(), self.rects[n].center(), CHARCOAL, 1);
            }
        }
        for (idx, rect) in self.rects.iter().enumerate() {
            draw_rect(fb, rect, self.tile_color(idx));
        }
        for &idx in &self.search.path {
            if idx != self.start && idx != self.end {
                draw_rect(fb, &self.rects[idx], PATH_COLOR);
            }
        }
    }
}
