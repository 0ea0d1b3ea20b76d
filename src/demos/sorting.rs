//! Sorting algorithm timings
//!
//! A menu of algorithms. Picking one times it on random arrays of growing
//! length and charts the average and worst run. G swaps between the bar
//! chart and a scatter plot, R goes back to the menu (releasing R reopens the
//! last chart) and Escape leaves the chart, or the demo from the menu.

use super::{Demo, Flow};
use crate::color::{Pixel, BLACK, GREEN, GREY, RED, WHITE};
use crate::display::raster::{draw_circle, draw_line, draw_rect};
use crate::display::{draw_text_centered, draw_text_scaled, FrameBuffer};
use crate::geometry::{Point, Rect};
use crate::input::{InputState, Key};
use crate::util::{millis, Rng};
use std::time::{Duration, Instant};

const WIDTH: i32 = 960;
const HEIGHT: i32 = 600;

pub const LENGTHS: [usize; 7] = [10, 20, 50, 100, 200, 500, 1000];
const DEFAULT_RUNS: usize = 20;

const AVG_LABEL: Pixel = 0xDBFFD9;
const MAX_LABEL: Pixel = 0xFF9C9C;

// ============================================================================
// Algorithms
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Insertion,
    Selection,
    /// The standard library's unstable sort
    Std,
    /// Bubble sort without the early exit
    BubbleNoCheck,
    Merge,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Std,
        Algorithm::BubbleNoCheck,
        Algorithm::Merge,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Std => "sort()",
            Algorithm::BubbleNoCheck => "Bubble Sort 2",
            Algorithm::Merge => "Merge Sort",
        }
    }

    pub fn sort(self, v: &mut [i32]) {
        match self {
            Algorithm::Bubble => bubble_sort(v, true),
            Algorithm::BubbleNoCheck => bubble_sort(v, false),
            Algorithm::Insertion => insertion_sort(v),
            Algorithm::Selection => selection_sort(v),
            Algorithm::Std => v.sort_unstable(),
            Algorithm::Merge => merge_sort(v),
        }
    }
}

fn bubble_sort(v: &mut [i32], early_exit: bool) {
    let n = v.len();
    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - i {
            if v[j] > v[j + 1] {
                v.swap(j, j + 1);
                swapped = true;
            }
        }
        if early_exit && !swapped {
            break;
        }
    }
}

fn insertion_sort(v: &mut [i32]) {
    for i in 1..v.len() {
        let key = v[i];
        let mut j = i;
        while j > 0 && v[j - 1] > key {
            v[j] = v[j - 1];
            j -= 1;
        }
        v[j] = key;
    }
}

fn selection_sort(v: &mut [i32]) {
    let n = v.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if v[j] < v[min] {
                min = j;
            }
        }
        if min != i {
            v.swap(min, i);
        }
    }
}

/// Top-down merge sort through one scratch buffer
fn merge_sort(v: &mut [i32]) {
    let mut scratch = Vec::with_capacity(v.len());
    merge_sort_range(v, &mut scratch);
}

fn merge_sort_range(v: &mut [i32], scratch: &mut Vec<i32>) {
    if v.len() <= 1 {
        return;
    }
    let mid = v.len() / 2;
    merge_sort_range(&mut v[..mid], scratch);
    merge_sort_range(&mut v[mid..], scratch);

    scratch.clear();
    let (mut i, mut j) = (0, mid);
    while i < mid && j < v.len() {
        if v[i] < v[j] {
            scratch.push(v[i]);
            i += 1;
        } else {
            scratch.push(v[j]);
            j += 1;
        }
    }
    scratch.extend_from_slice(&v[i..mid]);
    scratch.extend_from_slice(&v[j..]);
    v.copy_from_slice(scratch);
}

/// Average and worst wall time of one algorithm at one length, in ms
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timing {
    pub avg_ms: f64,
    pub max_ms: f64,
}

/// Sort `runs` fresh arrays of `len` values drawn from `1..=2 * len`
pub fn time_sort(algorithm: Algorithm, len: usize, runs: usize, rng: &mut Rng) -> Timing {
    let mut v = vec![0; len];
    let mut total = Duration::ZERO;
    let mut worst = Duration::ZERO;

    for _ in 0..runs.max(1) {
        for x in &mut v {
            *x = rng.range_i32(1, (len * 2) as i32);
        }
        let start = Instant::now();
        algorithm.sort(&mut v);
        let elapsed = start.elapsed();
        total += elapsed;
        worst = worst.max(elapsed);
    }

    Timing {
        avg_ms: millis(total) / runs.max(1) as f64,
        max_ms: millis(worst),
    }
}

// ============================================================================
// Demo
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Chart(Algorithm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartStyle {
    Bars,
    Scatter,
}

pub struct Sorting {
    screen: Screen,
    style: ChartStyle,
    buttons: Vec<Rect>,
    /// Results of the last measured algorithm
    results: Option<(Algorithm, [Timing; LENGTHS.len()])>,
    runs: usize,
    rng: Rng,
}

impl Sorting {
    pub fn new() -> Self {
        Self::with_runs(DEFAULT_RUNS)
    }

    pub fn with_runs(runs: usize) -> Self {
        Self {
            screen: Screen::Menu,
            style: ChartStyle::Bars,
            buttons: menu_buttons(Algorithm::ALL.len()),
            results: None,
            runs,
            rng: Rng::from_time(),
        }
    }

    fn measure(&mut self, algorithm: Algorithm) {
        let mut timings = [Timing::default(); LENGTHS.len()];
        for (timing, &len) in timings.iter_mut().zip(LENGTHS.iter()) {
            *timing = time_sort(algorithm, len, self.runs, &mut self.rng);
        }
        log::info!(
            "{}: {:.3} ms avg at length {}",
            algorithm.label(),
            timings[LENGTHS.len() - 1].avg_ms,
            LENGTHS[LENGTHS.len() - 1]
        );
        self.results = Some((algorithm, timings));
    }

    /// Time `algorithm` afresh and show its chart
    fn open_chart(&mut self, algorithm: Algorithm) {
        self.measure(algorithm);
        self.screen = Screen::Chart(algorithm);
    }

    fn update_menu(&mut self, input: &InputState) -> Flow {
        if input.was_pressed(Key::Escape) {
            return Flow::Quit;
        }
        if input.was_released(Key::Char('R')) {
            if let Some((algorithm, _)) = self.results {
                self.open_chart(algorithm);
                return Flow::Continue;
            }
        }
        if input.left_click() {
            let mouse = input.mouse();
            if let Some(i) = self.buttons.iter().position(|b| b.contains(mouse)) {
                self.open_chart(Algorithm::ALL[i]);
            }
        }
        Flow::Continue
    }

    fn update_chart(&mut self, input: &InputState) {
        if input.was_pressed(Key::Escape) || input.was_pressed(Key::Char('R')) {
            self.screen = Screen::Menu;
        } else if input.was_pressed(Key::Char('G')) {
            self.style = match self.style {
                ChartStyle::Bars => ChartStyle::Scatter,
                ChartStyle::Scatter => ChartStyle::Bars,
            };
        }
    }

    fn render_menu(&self, fb: &mut FrameBuffer) {
        draw_text_centered(fb, WIDTH / 2, 100, "CHOOSE AN ALGORITHM", 3, WHITE);
        for (rect, algorithm) in self.buttons.iter().zip(Algorithm::ALL) {
            draw_rect(fb, rect, GREY);
            draw_text_centered(fb, rect.center().x, rect.min().y + 18, algorithm.label(), 2, BLACK);
        }
    }
}

impl Default for Sorting {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows of 150x50 buttons 220 px apart, wrapping at the window edge
fn menu_buttons(count: usize) -> Vec<Rect> {
    let mut buttons = Vec::with_capacity(count);
    let (mut top, mut column) = (200, 0);
    for _ in 0..count {
        if 220 + column * 220 > WIDTH {
            top += 100;
            column = 0;
        }
        buttons.push(Rect::from_corners(
            Point::new(70 + column * 220, top),
            Point::new(220 + column * 220, top + 50),
        ));
        column += 1;
    }
    buttons
}

/// Chart frame shared by both styles
struct Frame {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    /// Highest value on the y axis, whole milliseconds
    y_max: f64,
}

impl Frame {
    fn new(y_max: f64) -> Self {
        Self {
            left: 70,
            right: WIDTH - 70,
            top: 50,
            bottom: HEIGHT - 50,
            y_max: y_max.ceil().max(1.0),
        }
    }

    fn row_step(&self) -> i32 {
        (self.bottom - self.top) / 11
    }

    /// Pixel row of a value on the y axis
    fn y_of(&self, ms: f64) -> i32 {
        self.bottom - 20 - (f64::from(self.row_step() * 10) * ms / self.y_max) as i32
    }

    /// Eleven y-axis labels with their grid lines
    fn draw_y_axis(&self, fb: &mut FrameBuffer, line_from: i32, line_to: i32, skip_first: bool) {
        let unit = (self.y_max * 10.0).ceil() / 100.0;
        for i in 0..11 {
            let y = self.bottom - 30 - i * self.row_step();
            draw_text_scaled(fb, self.left, y, &format!("{:.2}", unit * f64::from(i)), 1, WHITE);
            if !(skip_first && i == 0) {
                draw_line(fb, Point::new(line_from, y + 10), Point::new(line_to, y + 10), GREY, 1);
            }
        }
    }
}

fn render_bars(fb: &mut FrameBuffer, timings: &[Timing]) {
    let n = timings.len().max(1) as i32;
    let frame = Frame::new(timings.iter().map(|t| t.max_ms).fold(0.0, f64::max));
    frame.draw_y_axis(fb, frame.left + 50, frame.right - 5, false);

    for (i, (timing, len)) in timings.iter().zip(LENGTHS).enumerate() {
        let i = i as i32;
        let x = frame.left + 90 + i * (frame.right - frame.left - 50) / n;
        let bar_right = x + (frame.right - frame.left - 40) / n - 60;
        let avg_top = frame.y_of(timing.avg_ms);
        let max_top = frame.y_of(timing.max_ms);
        let floor = frame.bottom - 20;

        draw_rect(fb, &Rect::from_corners(Point::new(x - 30, max_top), Point::new(bar_right, floor)), RED);
        draw_rect(fb, &Rect::from_corners(Point::new(x - 30, avg_top), Point::new(bar_right, floor)), GREEN);
        draw_text_scaled(fb, x - 26, avg_top - 12, &format!("{:.3}", timing.avg_ms), 1, AVG_LABEL);
        draw_text_scaled(fb, x - 26, max_top - 24, &format!("{:.3}", timing.max_ms), 1, MAX_LABEL);
        draw_text_scaled(fb, x - 10, frame.bottom - 12, &len.to_string(), 1, WHITE);
    }
}

fn render_scatter(fb: &mut FrameBuffer, timings: &[Timing]) {
    let frame = Frame::new(timings.iter().map(|t| t.avg_ms).fold(0.0, f64::max));
    frame.draw_y_axis(fb, frame.left + 40, frame.right, true);

    let longest = LENGTHS[LENGTHS.len() - 1];
    let spacing = (frame.right - frame.left - 20) / 21;
    let increment = longest / 20;
    for i in 0..21 {
        let x = frame.left + 50 + i * spacing;
        if i != 0 {
            draw_line(fb, Point::new(x, frame.bottom - 10), Point::new(x, frame.top + 20), GREY, 1);
        }
        let label = (increment * i as usize).to_string();
        draw_text_scaled(fb, x - 4 - label.len() as i32 * 2, frame.bottom + 2, &label, 1, WHITE);
    }

    let origin_x = frame.left + 50;
    let floor = frame.bottom - 20;
    draw_line(fb, Point::new(frame.left + 40, floor), Point::new(frame.right, floor), WHITE, 2);
    draw_line(fb, Point::new(origin_x, frame.bottom - 10), Point::new(origin_x, frame.top + 20), WHITE, 2);

    let x_span = f64::from(frame.right - frame.left - 20) / 21.0 * 20.0;
    for (timing, len) in timings.iter().zip(LENGTHS) {
        let x = origin_x + (x_span * len as f64 / longest as f64) as i32;
        draw_circle(fb, Point::new(x, frame.y_of(timing.avg_ms)), 5, RED);
    }
}

impl Demo for Sorting {
    fn name(&self) -> &str {
        "sorting"
    }

    fn title(&self) -> &str {
        "Sorting Algorithms"
    }

    fn size(&self) -> (u32, u32) {
        (WIDTH as u32, HEIGHT as u32)
    }

    fn update(&mut self, input: &InputState) -> Flow {
        match self.screen {
            Screen::Menu => self.update_menu(input),
            Screen::Chart(_) => {
                self.update_chart(input);
                Flow::Continue
            },
        }
    }

    fn render(&self, fb: &mut FrameBuffer) {
        fb.clear(BLACK);
        match (self.screen, &self.results) {
            (Screen::Chart(algorithm), Some((measured, timings))) if algorithm == *measured => {
                draw_text_centered(fb, WIDTH / 2, 15, algorithm.label(), 3, WHITE);
                match self.style {
                    ChartStyle::Bars => render_bars(fb, timings),
                    ChartStyle::Scatter => render_scatter(fb, timings),
                }
            },
            _ => self.render_menu(fb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::tests::{clicked, keys_down};
    use crate::display::DisplayGeometry;
    use crate::input::{InputEvent, MouseButtonKind};

    #[test]
    fn test_every_algorithm_sorts() {
        let mut rng = Rng::new(99);
        for algorithm in Algorithm::ALL {
            for len in [0usize, 1, 2, 3, 10, 57, 256] {
                let mut v: Vec<i32> = (0..len).map(|_| rng.range_i32(-50, 50)).collect();
                let mut expected = v.clone();
                expected.sort();
                algorithm.sort(&mut v);
                assert_eq!(v, expected, "{:?} len {}", algorithm, len);
            }
        }
    }

    #[test]
    fn test_sorts_presorted_and_reversed() {
        for algorithm in Algorithm::ALL {
            let mut up: Vec<i32> = (0..100).collect();
            let mut down: Vec<i32> = (0..100).rev().collect();
            algorithm.sort(&mut up);
            algorithm.sort(&mut down);
            assert_eq!(up, down);
        }
    }

    #[test]
    fn test_time_sort_avg_not_above_max() {
        let mut rng = Rng::new(5);
        let t = time_sort(Algorithm::Insertion, 200, 5, &mut rng);
        assert!(t.avg_ms >= 0.0);
        assert!(t.avg_ms <= t.max_ms + 1e-9);
    }

    #[test]
    fn test_menu_layout_wraps() {
        let buttons = menu_buttons(6);
        assert_eq!(buttons[0], Rect::from_corners(Point::new(70, 200), Point::new(220, 250)));
        assert_eq!(buttons[3].min(), Point::new(730, 200));
        assert_eq!(buttons[4].min(), Point::new(70, 300));
        assert_eq!(buttons[5].min(), Point::new(290, 300));
    }

    #[test]
    fn test_click_opens_chart_and_keys_navigate() {
        let mut demo = Sorting::with_runs(1);
        // Merge Sort is the second button on the second row
        demo.update(&clicked(MouseButtonKind::Left, 300, 320));
        assert_eq!(demo.screen, Screen::Chart(Algorithm::Merge));
        assert!(demo.results.is_some());

        demo.update(&keys_down(&[Key::Char('G')]));
        assert_eq!(demo.style, ChartStyle::Scatter);

        assert_eq!(demo.update(&keys_down(&[Key::Escape])), Flow::Continue);
        assert_eq!(demo.screen, Screen::Menu);
        assert_eq!(demo.update(&keys_down(&[Key::Escape])), Flow::Quit);
    }

    #[test]
    fn test_r_remeasures_last_chart() {
        let mut demo = Sorting::with_runs(1);
        demo.update(&clicked(MouseButtonKind::Left, 100, 220));
        assert_eq!(demo.screen, Screen::Chart(Algorithm::Bubble));

        // No real run of these sizes takes this long
        let stale = Timing {
            avg_ms: 12_345.0,
            max_ms: 12_345.0,
        };
        demo.results = Some((Algorithm::Bubble, [stale; LENGTHS.len()]));

        let mut input = InputState::new();
        let g = DisplayGeometry::windowed(960, 600);
        input.begin_frame(&[InputEvent::KeyDown(Key::Char('R'))], &g);
        demo.update(&input);
        assert_eq!(demo.screen, Screen::Menu);

        input.end_frame();
        input.begin_frame(&[InputEvent::KeyUp(Key::Char('R'))], &g);
        demo.update(&input);
        assert_eq!(demo.screen, Screen::Chart(Algorithm::Bubble));

        let (algorithm, timings) = demo.results.unwrap();
        assert_eq!(algorithm, Algorithm::Bubble);
        assert!(timings.iter().all(|t| *t != stale));
    }

    #[test]
    fn test_render_bars_and_scatter() {
        let mut demo = Sorting::with_runs(1);
        demo.results = Some((
            Algorithm::Std,
            [Timing {
                avg_ms: 0.5,
                max_ms: 1.0,
            }; LENGTHS.len()],
        ));
        demo.screen = Screen::Chart(Algorithm::Std);

        let mut fb = FrameBuffer::new(960, 600).unwrap();
        demo.render(&mut fb);
        assert!(fb.count(RED) > 0);
        assert!(fb.count(GREEN) > 0);

        demo.style = ChartStyle::Scatter;
        demo.render(&mut fb);
        assert_eq!(fb.count(GREEN), 0);
        assert!(fb.count(RED) > 0);
    }

    #[test]
    fn test_menu_render_has_buttons() {
        let demo = Sorting::with_runs(1);
        let mut fb = FrameBuffer::new(960, 600).unwrap();
        demo.render(&mut fb);
        assert_eq!(fb.get_pixel(75, 205), Some(GREY));
    }
}
