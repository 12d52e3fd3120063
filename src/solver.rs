//! Exact game-tree solver: time-bounded negamax alpha-beta.
//!
//! NoGo is a zero-sum win/loss game with no draws, so the search deals
//! only in exact outcomes (+1 win, -1 loss for the side to move), never
//! heuristic values. The board is mutated in place and undone after each
//! branch instead of being copied per node; the solver therefore holds
//! the only mutable reference to the board for the whole search.
//!
//! The wall-clock budget is polled once per recursive entry. Cancellation
//! is an explicit abort sentinel that every frame checks and propagates
//! after undoing its move, so an aborted search still leaves the board in
//! its pre-search state.

use std::time::{Duration, Instant};

use crate::board::GoBoard;
use crate::rules::format_point;

/// Search window bound; outcomes are only ever +-1 inside it.
const INFTY: i32 = 100_000;

/// Outcome of a solve, relative to the side to move when it started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// The side to move can force a win; carries one witness move.
    Win(String),
    /// Every move loses; the search was exhaustive.
    Loss,
    /// The time budget ran out before a proof.
    Unknown,
}

/// Value returned by each recursive frame.
enum Search {
    Value(i32),
    /// Unwind immediately: the budget expired or the root already has a
    /// winning move. Callers propagate this without examining siblings.
    Abort,
}

/// Scratch state for one solve invocation.
pub struct Solver {
    limit: Duration,
    start: Instant,
    time_exceeded: bool,
    winning_moves: Vec<String>,
}

impl Solver {
    pub fn new(limit: Duration) -> Self {
        Solver {
            limit,
            start: Instant::now(),
            time_exceeded: false,
            winning_moves: Vec::new(),
        }
    }

    /// Solve the current position for the side to move.
    ///
    /// The board is mutated during the search but restored to its exact
    /// input state before this returns, whether or not the search
    /// completed.
    pub fn solve(&mut self, board: &mut GoBoard) -> SearchResult {
        self.start = Instant::now();
        self.time_exceeded = false;
        self.winning_moves.clear();

        self.alphabeta(board, -INFTY, INFTY, 0);

        if let Some(m) = self.winning_moves.first() {
            SearchResult::Win(m.clone())
        } else if self.time_exceeded {
            SearchResult::Unknown
        } else {
            SearchResult::Loss
        }
    }

    fn alphabeta(&mut self, board: &mut GoBoard, mut alpha: i32, beta: i32, depth: u32) -> Search {
        if self.time_exceeded || !self.winning_moves.is_empty() {
            return Search::Abort;
        }
        if self.start.elapsed() > self.limit {
            self.time_exceeded = true;
            return Search::Abort;
        }

        if board.winner().is_some() {
            return Search::Value(board.evaluate_for_to_play());
        }

        let to_play = board.to_play;
        let moves = board.legal_points(to_play);
        if moves.is_empty() {
            // Cannot happen: winner() fires on an empty move list. Treat
            // as a terminal loss for the side to move anyway.
            return Search::Value(-1);
        }

        for pt in moves {
            if board.play(pt, to_play).is_err() {
                // Enumeration already proved legality.
                continue;
            }
            let child = self.alphabeta(board, -beta, -alpha, depth + 1);
            board.undo(pt);

            let value = match child {
                Search::Abort => return Search::Abort,
                Search::Value(v) => -v,
            };

            if value > alpha {
                alpha = value;
                if depth == 0 && value >= 0 {
                    // One winning move at the root is enough.
                    let (row, col) = board.coords(pt);
                    self.winning_moves.push(format_point(row, col));
                    return Search::Abort;
                }
            }
            if value >= beta {
                return Search::Value(beta);
            }
        }
        Search::Value(alpha)
    }
}
