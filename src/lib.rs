//! NoGo-Rust: a GTP-driven NoGo agent with an exact solver.
//!
//! NoGo is the Go variant in which capturing and suicide are both
//! illegal and the first player without a legal move loses. This crate
//! provides the board model, a time-bounded alpha-beta solver that
//! proves exact win/loss outcomes, and a GTP front end for controllers.
//!
//! ## Modules
//!
//! - [`board`] - NoGo position, move legality, winner detection
//! - [`rules`] - Coordinate codec and legal-move enumeration
//! - [`solver`] - Exact negamax alpha-beta search with a wall-clock budget
//! - [`gtp`] - GTP command dispatcher and response framing
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use nogo_rust::board::GoBoard;
//! use nogo_rust::solver::{SearchResult, Solver};
//!
//! // 2x2 NoGo is a first-player win.
//! let mut board = GoBoard::new(2);
//! let mut solver = Solver::new(Duration::from_secs(10));
//! assert!(matches!(solver.solve(&mut board), SearchResult::Win(_)));
//! ```

pub mod board;
pub mod gtp;
pub mod rules;
pub mod solver;
