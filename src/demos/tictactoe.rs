//! Tic-tac-toe against a minimax opponent
//!
//! The player is X and moves first by clicking a free square. O replies with
//! a full minimax search. R restarts, a red line marks the winning row.

use super::showcase::draw_board_grid;
use super::{Demo, Flow};
use crate::color::{BLACK, CHARCOAL, RED};
use crate::display::raster::{draw_cross, draw_empty_circle, draw_line};
use crate::display::FrameBuffer;
use crate::geometry::{Point, Rect};
use crate::input::{InputState, Key};

const CELL: i32 = 300;
const HIT_INSET: i32 = 10;
const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Maximizing side
    X,
    /// Minimizing side
    O,
}

impl Cell {
    fn score(self) -> i32 {
        match self {
            Cell::X => WIN_SCORE,
            Cell::O => -WIN_SCORE,
            Cell::Empty => 0,
        }
    }
}

/// A completed line: winner and the (row, col) squares at either end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    pub cell: Cell,
    pub from: (usize, usize),
    pub to: (usize, usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Mark an empty square. Returns false if it was taken.
    pub fn place(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if self.cells[row][col] != Cell::Empty {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    pub fn moves_left(&self) -> bool {
        self.cells.iter().flatten().any(|&c| c == Cell::Empty)
    }

    fn empty_squares(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col] == Cell::Empty)
    }

    /// Rows are checked first, then columns, then the two diagonals
    pub fn winner(&self) -> Option<Win> {
        let b = &self.cells;
        let line = |a: (usize, usize), m: (usize, usize), z: (usize, usize)| {
            let cell = b[a.0][a.1];
            (cell != Cell::Empty && cell == b[m.0][m.1] && cell == b[z.0][z.1]).then_some(Win {
                cell,
                from: a,
                to: z,
            })
        };

        (0..3)
            .find_map(|row| line((row, 0), (row, 1), (row, 2)))
            .or_else(|| (0..3).find_map(|col| line((0, col), (1, col), (2, col))))
            .or_else(|| line((0, 2), (1, 1), (2, 0)))
            .or_else(|| line((0, 0), (1, 1), (2, 2)))
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some() || !self.moves_left()
    }

    /// Score of the position for perfect play. X wins score `10 - depth`,
    /// O wins `-10 + depth`, so faster wins and slower losses are preferred.
    pub fn minimax(&mut self, depth: i32, maximizing: bool) -> i32 {
        if let Some(win) = self.winner() {
            let score = win.cell.score();
            return score - score.signum() * depth;
        }
        if !self.moves_left() {
            return 0;
        }

        let (mover, mut best) = if maximizing {
            (Cell::X, i32::MIN)
        } else {
            (Cell::O, i32::MAX)
        };
        let squares: Vec<_> = self.empty_squares().collect();
        for (row, col) in squares {
            self.cells[row][col] = mover;
            let score = self.minimax(depth + 1, !maximizing);
            self.cells[row][col] = Cell::Empty;
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    /// Best square for `player`, first in row-major order among equals
    pub fn best_move(&mut self, player: Cell) -> Option<(usize, usize)> {
        let maximizing = player == Cell::X;
        let squares: Vec<_> = self.empty_squares().collect();
        let mut best: Option<((usize, usize), i32)> = None;

        for (row, col) in squares {
            self.cells[row][col] = player;
            let score = self.minimax(0, !maximizing);
            self.cells[row][col] = Cell::Empty;

            let better = match best {
                None => true,
                Some((_, b)) if maximizing => score > b,
                Some((_, b)) => score < b,
            };
            if better {
                best = Some(((row, col), score));
            }
        }
        best.map(|(square, _)| square)
    }
}

/// Centre of a board square in bitmap coordinates
fn square_center(row: usize, col: usize) -> Point {
    Point::new(
        CELL / 2 + col as i32 * CELL,
        CELL / 2 + row as i32 * CELL,
    )
}

pub struct TicTacToe {
    board: Board,
    player_turn: bool,
    /// Click targets, inset from the grid lines
    squares: [[Rect; 3]; 3],
}

impl TicTacToe {
    pub fn new() -> Self {
        let mut squares = [[Rect::default(); 3]; 3];
        for (row, line) in squares.iter_mut().enumerate() {
            for (col, rect) in line.iter_mut().enumerate() {
                let (x, y) = (col as i32 * CELL, row as i32 * CELL);
                *rect = Rect::from_corners(
                    Point::new(x + HIT_INSET, y + HIT_INSET),
                    Point::new(x + CELL - HIT_INSET, y + CELL - HIT_INSET),
                );
            }
        }
        Self {
            board: Board::new(),
            player_turn: true,
            squares,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn restart(&mut self) {
        self.board = Board::new();
        self.player_turn = true;
        log::debug!("tic-tac-toe restarted");
    }

    fn square_at(&self, p: Point) -> Option<(usize, usize)> {
        (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .find(|&(row, col)| self.squares[row][col].contains(p))
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for TicTacToe {
    fn name(&self) -> &str {
        "tictactoe"
    }

    fn title(&self) -> &str {
        "Tic-Tac-Toe"
    }

    fn size(&self) -> (u32, u32) {
        (900, 900)
    }

    fn update(&mut self, input: &InputState) -> Flow {
        if input.was_pressed(Key::Escape) {
            return Flow::Quit;
        }
        if input.was_pressed(Key::Char('R')) {
            self.restart();
        }
        if self.board.is_over() {
            return Flow::Continue;
        }

        if self.player_turn {
            if input.left_click() {
                if let Some((row, col)) = self.square_at(input.mouse()) {
                    if self.board.place(row, col, Cell::X) {
                        self.player_turn = false;
                    }
                }
            }
        } else {
            if let Some((row, col)) = self.board.best_move(Cell::O) {
                self.board.place(row, col, Cell::O);
            }
            self.player_turn = true;
        }

        if let Some(win) = self.board.winner() {
            log::info!("{:?} wins", win.cell);
        }
        Flow::Continue
    }

    fn render(&self, fb: &mut FrameBuffer) {
        fb.clear(CHARCOAL);
        draw_board_grid(fb);

        for row in 0..3 {
            for col in 0..3 {
                let center = square_center(row, col);
                match self.board.get(row, col) {
                    Cell::X => draw_cross(fb, center, 240, BLACK, 5),
                    Cell::O => draw_empty_circle(fb, center, 120, BLACK, 5),
                    Cell::Empty => {},
                }
            }
        }

        if let Some(win) = self.board.winner() {
            draw_line(
                fb,
                square_center(win.from.0, win.from.1),
                square_center(win.to.0, win.to.1),
                RED,
                10,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::tests::{clicked, keys_down};
    use crate::input::MouseButtonKind;

    fn board(rows: [&str; 3]) -> Board {
        let mut b = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'X' => Cell::X,
                    'O' => Cell::O,
                    _ => Cell::Empty,
                };
                b.cells[r][c] = cell;
            }
        }
        b
    }

    #[test]
    fn test_winner_lines() {
        let w = board(["XXX", "OO.", "..."]).winner().unwrap();
        assert_eq!((w.cell, w.from, w.to), (Cell::X, (0, 0), (0, 2)));

        let w = board(["O.X", "O.X", "O.."]).winner().unwrap();
        assert_eq!((w.cell, w.from, w.to), (Cell::O, (0, 0), (2, 0)));

        let w = board(["..X", ".X.", "X.."]).winner().unwrap();
        assert_eq!((w.from, w.to), ((0, 2), (2, 0)));

        assert!(board(["XOX", "XOO", "OXX"]).winner().is_none());
    }

    #[test]
    fn test_minimax_prefers_fast_win() {
        let mut b = board(["X.X", "OO.", "..."]);
        // X to move wins immediately at depth 0 of the reply
        assert_eq!(b.best_move(Cell::X), Some((0, 1)));
        // O to move also wins immediately
        assert_eq!(b.best_move(Cell::O), Some((1, 2)));
    }

    #[test]
    fn test_finished_board_scores_shrink_with_depth() {
        assert_eq!(board(["XXX", "OO.", "..."]).minimax(0, false), 10);
        assert_eq!(board(["XXX", "OO.", "..."]).minimax(3, false), 7);
        assert_eq!(board(["OOO", "XX.", "X.."]).minimax(2, true), -8);
        assert_eq!(board(["XOX", "XOO", "OXX"]).minimax(4, true), 0);
    }

    #[test]
    fn test_ai_blocks() {
        let mut b = board(["XX.", ".O.", "..."]);
        assert_eq!(b.best_move(Cell::O), Some((0, 2)));
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(Board::new().minimax(0, true), 0);
    }

    /// Every line of play by X against the AI ends in an O win or a draw
    fn explore(b: &mut Board) {
        if b.is_over() {
            assert_ne!(b.winner().map(|w| w.cell), Some(Cell::X), "{:?}", b);
            return;
        }
        let squares: Vec<_> = b.empty_squares().collect();
        for (row, col) in squares {
            let mut next = b.clone();
            next.place(row, col, Cell::X);
            if !next.is_over() {
                let (r, c) = next.best_move(Cell::O).unwrap();
                next.place(r, c, Cell::O);
            }
            explore(&mut next);
        }
    }

    #[test]
    fn test_ai_never_loses() {
        explore(&mut Board::new());
    }

    #[test]
    fn test_click_then_ai_reply() {
        let mut game = TicTacToe::new();
        game.update(&clicked(MouseButtonKind::Left, 150, 150));
        assert_eq!(game.board().get(0, 0), Cell::X);

        game.update(&InputState::new());
        let os = game
            .board()
            .cells
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::O)
            .count();
        assert_eq!(os, 1);
        // Against a corner the only safe reply is the centre
        assert_eq!(game.board().get(1, 1), Cell::O);
    }

    #[test]
    fn test_click_on_grid_line_misses() {
        let mut game = TicTacToe::new();
        game.update(&clicked(MouseButtonKind::Left, 305, 150));
        assert_eq!(*game.board(), Board::new());
        game.update(&clicked(MouseButtonKind::Left, 10, 150));
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn test_restart_and_win_line() {
        let mut game = TicTacToe::new();
        game.board = board(["OOO", "XX.", "X.."]);
        let mut fb = FrameBuffer::new(900, 900).unwrap();
        game.render(&mut fb);
        assert_eq!(fb.get_pixel(450, 150), Some(RED));

        game.update(&keys_down(&[Key::Char('R')]));
        assert_eq!(*game.board(), Board::new());
        assert!(game.player_turn);
    }
}
