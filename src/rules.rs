//! Move encoding and legal-move enumeration.
//!
//! Converts between GTP coordinate strings and board points, maps color
//! tokens, and enumerates legal moves as formatted strings. Go
//! coordinates use letters for columns, skipping `I` to avoid confusion
//! with `J`, and numbers for rows counted from the bottom.

use crate::board::{Color, GoBoard, Point};

/// Map a GTP color token to a [`Color`]. Accepts `b`/`black`/`w`/`white`,
/// case-insensitive.
pub fn color_from_token(token: &str) -> Option<Color> {
    match token.to_ascii_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// Parse a coordinate string (e.g. "D4") into (row, col), 0-based from
/// the bottom-left. Returns `None` for malformed or out-of-range input;
/// NoGo has no pass, so "pass" is not a coordinate.
pub fn move_to_coord(s: &str, size: usize) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_alphabetic() {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if col_char == b'I' {
        return None;
    }
    let mut col = (col_char - b'A') as usize;
    if col_char > b'I' {
        col -= 1;
    }

    let row: usize = s[1..].parse().ok()?;
    if row == 0 || row > size || col >= size {
        return None;
    }
    Some((row - 1, col))
}

/// Format (row, col) as a coordinate string, skipping the `I` column.
pub fn format_point(row: usize, col: usize) -> String {
    let mut c = b'A' + col as u8;
    if c >= b'I' {
        c += 1;
    }
    format!("{}{}", c as char, row + 1)
}

/// Enumerate the legal moves for `color` as sorted coordinate strings.
pub fn legal_moves(board: &mut GoBoard, color: Color) -> Vec<String> {
    let points = board.legal_points(color);
    let mut moves: Vec<String> = points
        .into_iter()
        .map(|pt| {
            let (row, col) = board.coords(pt);
            format_point(row, col)
        })
        .collect();
    moves.sort();
    moves
}

/// Pick a uniformly random legal move for `color`, if one exists.
pub fn random_legal_move(board: &mut GoBoard, color: Color) -> Option<Point> {
    let candidates = board.legal_points(color);
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[fastrand::usize(..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_token() {
        assert_eq!(color_from_token("b"), Some(Color::Black));
        assert_eq!(color_from_token("W"), Some(Color::White));
        assert_eq!(color_from_token("BLACK"), Some(Color::Black));
        assert_eq!(color_from_token("white"), Some(Color::White));
        assert_eq!(color_from_token("x"), None);
        assert_eq!(color_from_token(""), None);
    }

    #[test]
    fn test_move_to_coord_corners() {
        assert_eq!(move_to_coord("A1", 7), Some((0, 0)));
        assert_eq!(move_to_coord("a1", 7), Some((0, 0)));
        assert_eq!(move_to_coord("G7", 7), Some((6, 6)));
    }

    #[test]
    fn test_coordinates_skip_i() {
        // On a 9x9, columns run A..H then J; I is rejected.
        assert_eq!(move_to_coord("J9", 9), Some((8, 8)));
        assert_eq!(move_to_coord("I5", 9), None);
        assert_eq!(format_point(8, 8), "J9");
    }

    #[test]
    fn test_move_to_coord_rejects_bad_input() {
        assert_eq!(move_to_coord("", 7), None);
        assert_eq!(move_to_coord("A", 7), None);
        assert_eq!(move_to_coord("A0", 7), None);
        assert_eq!(move_to_coord("A8", 7), None);
        assert_eq!(move_to_coord("H1", 7), None);
        assert_eq!(move_to_coord("4D", 7), None);
        assert_eq!(move_to_coord("pass", 7), None);
    }

    #[test]
    fn test_format_parse_roundtrip() {
        for row in 0..19 {
            for col in 0..19 {
                let s = format_point(row, col);
                assert_eq!(move_to_coord(&s, 19), Some((row, col)), "coord {s}");
            }
        }
    }

    #[test]
    fn test_legal_moves_on_empty_board() {
        let mut board = GoBoard::new(2);
        let moves = legal_moves(&mut board, Color::Black);
        assert_eq!(moves, ["A1", "A2", "B1", "B2"]);
    }

    #[test]
    fn test_legal_moves_is_idempotent() {
        let mut board = GoBoard::new(3);
        board.play(board.point(1, 1), Color::Black).unwrap();
        let snapshot = board.clone();
        let _ = legal_moves(&mut board, Color::White);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_random_legal_move_is_legal() {
        let mut board = GoBoard::new(3);
        for _ in 0..20 {
            let pt = random_legal_move(&mut board, Color::Black).unwrap();
            assert!(board.is_legal(pt, Color::Black));
        }
    }

    #[test]
    fn test_random_legal_move_none_when_stuck() {
        let mut board = GoBoard::new(1);
        assert_eq!(random_legal_move(&mut board, Color::Black), None);
    }
}
