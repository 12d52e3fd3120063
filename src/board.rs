//! NoGo board representation and move legality.
//!
//! NoGo is played with Go equipment and Go-style liberties, but both
//! capturing and suicide are illegal and there is no pass: the first
//! player left without a legal move loses. Because stones are never
//! removed, a committed move changes exactly one cell plus the side to
//! move, which is what makes the solver's mutate-then-undo discipline
//! exact.
//!
//! The board is a 1D array with a one-cell border ring, so neighbor
//! arithmetic never needs bounds checks.

use std::fmt;

/// Empty point.
pub const EMPTY: u8 = b'.';
/// Black stone.
pub const BLACK: u8 = b'X';
/// White stone.
pub const WHITE: u8 = b'O';
/// Out-of-bounds padding cell.
pub const BORDER: u8 = b'#';

/// A point on the board, an index into the padded 1D array.
pub type Point = usize;

/// Smallest supported board size.
pub const MIN_SIZE: usize = 1;
/// Largest supported board size (standard GTP coordinate range).
pub const MAX_SIZE: usize = 19;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// The GTP color token (`b` or `w`).
    pub fn token(self) -> &'static str {
        match self {
            Color::Black => "b",
            Color::White => "w",
        }
    }

    fn stone(self) -> u8 {
        match self {
            Color::Black => BLACK,
            Color::White => WHITE,
        }
    }
}

/// Why a move was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// Point is not empty
    Occupied,
    /// The placed stone's group would have no liberties
    Suicide,
    /// The move would capture an opponent group (forbidden in NoGo)
    Capture,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Occupied => write!(f, "occupied"),
            MoveError::Suicide => write!(f, "suicide"),
            MoveError::Capture => write!(f, "capture"),
        }
    }
}

/// A NoGo position: stone grid plus side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoBoard {
    size: usize,
    /// Row stride of the padded array (size + 2)
    width: usize,
    cells: Vec<u8>,
    pub to_play: Color,
}

impl GoBoard {
    pub fn new(size: usize) -> Self {
        let mut board = GoBoard {
            size: 0,
            width: 0,
            cells: Vec::new(),
            to_play: Color::Black,
        };
        board.reset(size);
        board
    }

    /// Reinitialize to an empty board of the given size, black to play.
    pub fn reset(&mut self, size: usize) {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        self.size = size;
        self.width = size + 2;
        self.cells = vec![BORDER; self.width * self.width];
        for row in 0..size {
            for col in 0..size {
                let pt = self.point(row, col);
                self.cells[pt] = EMPTY;
            }
        }
        self.to_play = Color::Black;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Convert (row, col), 0-based with row 0 at the bottom, to a point.
    pub fn point(&self, row: usize, col: usize) -> Point {
        (row + 1) * self.width + col + 1
    }

    /// Convert a point back to (row, col).
    pub fn coords(&self, pt: Point) -> (usize, usize) {
        (pt / self.width - 1, pt % self.width - 1)
    }

    pub fn get(&self, pt: Point) -> u8 {
        self.cells[pt]
    }

    /// The 4 orthogonal neighbors of a point (always in-array thanks to
    /// the border ring).
    fn neighbors(&self, pt: Point) -> [Point; 4] {
        [pt - self.width, pt - 1, pt + 1, pt + self.width]
    }

    /// Play a stone of `color` at `pt`. On success the side to move
    /// becomes the opponent of `color`. A rejected move leaves the
    /// position unchanged.
    pub fn play(&mut self, pt: Point, color: Color) -> Result<(), MoveError> {
        self.check_move(pt, color)?;
        self.cells[pt] = color.stone();
        self.to_play = color.opponent();
        Ok(())
    }

    /// Undo the most recent committed move at `pt`: vacate the point and
    /// give the turn back. Exact inverse of [`GoBoard::play`], since NoGo
    /// never removes stones.
    pub fn undo(&mut self, pt: Point) {
        self.cells[pt] = EMPTY;
        self.to_play = self.to_play.opponent();
    }

    pub fn is_legal(&mut self, pt: Point, color: Color) -> bool {
        self.check_move(pt, color).is_ok()
    }

    /// Legality check without committing. Places the stone temporarily to
    /// run the liberty counts, then removes it; net mutation is zero.
    fn check_move(&mut self, pt: Point, color: Color) -> Result<(), MoveError> {
        if self.cells[pt] != EMPTY {
            return Err(MoveError::Occupied);
        }
        self.cells[pt] = color.stone();
        let opp = color.opponent().stone();

        let mut verdict = Ok(());
        for n in self.neighbors(pt) {
            if self.cells[n] == opp && self.group_liberties(n) == 0 {
                verdict = Err(MoveError::Capture);
                break;
            }
        }
        if verdict.is_ok() && self.group_liberties(pt) == 0 {
            verdict = Err(MoveError::Suicide);
        }

        self.cells[pt] = EMPTY;
        verdict
    }

    /// Count the liberties of the group containing `start` via flood fill.
    fn group_liberties(&self, start: Point) -> u32 {
        let color = self.cells[start];
        let mut stack = vec![start];
        let mut visited = vec![false; self.cells.len()];
        let mut liberty_visited = vec![false; self.cells.len()];
        let mut libs = 0u32;

        while let Some(pt) = stack.pop() {
            if visited[pt] {
                continue;
            }
            visited[pt] = true;

            for n in self.neighbors(pt) {
                match self.cells[n] {
                    EMPTY => {
                        if !liberty_visited[n] {
                            liberty_visited[n] = true;
                            libs += 1;
                        }
                    }
                    c if c == color && !visited[n] => stack.push(n),
                    _ => {}
                }
            }
        }
        libs
    }

    /// All points where `color` has a legal move.
    pub fn legal_points(&mut self, color: Color) -> Vec<Point> {
        let mut points = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let pt = self.point(row, col);
                if self.cells[pt] == EMPTY && self.is_legal(pt, color) {
                    points.push(pt);
                }
            }
        }
        points
    }

    /// The winner, if the game is over. In NoGo the side to move loses
    /// exactly when it has no legal move; there are no draws.
    pub fn winner(&mut self) -> Option<Color> {
        if self.legal_points(self.to_play).is_empty() {
            Some(self.to_play.opponent())
        } else {
            None
        }
    }

    /// Static evaluation of a terminal position from the perspective of
    /// the side to move: +1 win, -1 loss.
    pub fn evaluate_for_to_play(&mut self) -> i32 {
        match self.winner() {
            Some(w) if w == self.to_play => 1,
            _ => -1,
        }
    }

    /// Check if an empty point is surrounded solely by one color (border
    /// cells are ignored). Returns that color's stone byte, or 0.
    fn eye_color(&self, pt: Point) -> u8 {
        let mut eyecolor = 0u8;
        for n in self.neighbors(pt) {
            match self.cells[n] {
                BORDER => continue,
                EMPTY => return 0,
                c if eyecolor == 0 => eyecolor = c,
                c if c != eyecolor => return 0,
                _ => {}
            }
        }
        eyecolor
    }

    /// Area score: stones plus single-color-surrounded empty points, komi
    /// credited to White. Formatted `B+<n>`, `W+<n>`, or `0`.
    pub fn final_score(&self, komi: f32) -> String {
        let mut score = -komi;
        for row in 0..self.size {
            for col in 0..self.size {
                let pt = self.point(row, col);
                let c = self.cells[pt];
                let effective = if c == EMPTY { self.eye_color(pt) } else { c };
                match effective {
                    BLACK => score += 1.0,
                    WHITE => score -= 1.0,
                    _ => {}
                }
            }
        }
        if score > 0.0 {
            format!("B+{score}")
        } else if score < 0.0 {
            format!("W+{}", -score)
        } else {
            "0".to_string()
        }
    }
}

impl fmt::Display for GoBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size).rev() {
            for col in 0..self.size {
                let ch = self.cells[self.point(row, col)] as char;
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_black_to_play() {
        let board = GoBoard::new(7);
        assert_eq!(board.size(), 7);
        assert_eq!(board.to_play, Color::Black);
        let center = board.point(3, 3);
        assert_eq!(board.get(center), EMPTY);
    }

    #[test]
    fn test_point_coords_roundtrip() {
        let board = GoBoard::new(7);
        for row in 0..7 {
            for col in 0..7 {
                let pt = board.point(row, col);
                assert_eq!(board.coords(pt), (row, col));
            }
        }
    }

    #[test]
    fn test_play_alternates_to_play() {
        let mut board = GoBoard::new(7);
        let pt = board.point(2, 2);
        board.play(pt, Color::Black).unwrap();
        assert_eq!(board.get(pt), BLACK);
        assert_eq!(board.to_play, Color::White);
    }

    #[test]
    fn test_rejected_move_leaves_position_unchanged() {
        let mut board = GoBoard::new(7);
        let pt = board.point(2, 2);
        board.play(pt, Color::Black).unwrap();
        let snapshot = board.clone();

        assert_eq!(board.play(pt, Color::White), Err(MoveError::Occupied));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_suicide_on_one_point_board() {
        let mut board = GoBoard::new(1);
        let pt = board.point(0, 0);
        assert_eq!(board.play(pt, Color::Black), Err(MoveError::Suicide));
        assert_eq!(board.get(pt), EMPTY);
    }

    #[test]
    fn test_capture_is_illegal() {
        // Black A1, White B1, Black A2; White B2 would capture A1+A2.
        let mut board = GoBoard::new(2);
        board.play(board.point(0, 0), Color::Black).unwrap();
        board.play(board.point(0, 1), Color::White).unwrap();
        board.play(board.point(1, 0), Color::Black).unwrap();

        let b2 = board.point(1, 1);
        assert_eq!(board.play(b2, Color::White), Err(MoveError::Capture));
        assert_eq!(board.get(b2), EMPTY);
    }

    #[test]
    fn test_undo_restores_exact_state() {
        let mut board = GoBoard::new(5);
        board.play(board.point(1, 1), Color::Black).unwrap();
        let snapshot = board.clone();

        let pt = board.point(2, 3);
        board.play(pt, Color::White).unwrap();
        board.undo(pt);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_legal_points_does_not_mutate() {
        let mut board = GoBoard::new(5);
        board.play(board.point(2, 2), Color::Black).unwrap();
        let snapshot = board.clone();

        let moves = board.legal_points(Color::White);
        assert_eq!(moves.len(), 24);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_winner_when_to_play_is_stuck() {
        // On 1x1 the only move is suicide, so Black is stuck immediately.
        let mut board = GoBoard::new(1);
        assert_eq!(board.winner(), Some(Color::White));
        assert_eq!(board.evaluate_for_to_play(), -1);
    }

    #[test]
    fn test_no_winner_on_open_board() {
        let mut board = GoBoard::new(3);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_final_score_counts_stones_and_komi() {
        let mut board = GoBoard::new(3);
        board.play(board.point(0, 0), Color::Black).unwrap();
        board.play(board.point(2, 2), Color::White).unwrap();
        assert_eq!(board.final_score(0.0), "0");
        assert_eq!(board.final_score(1.5), "W+1.5");

        board.play(board.point(1, 1), Color::Black).unwrap();
        assert_eq!(board.final_score(0.0), "B+1");
    }
}
