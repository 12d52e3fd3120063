//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a line-based text protocol for controlling game-playing
//! programs. This module implements the dispatcher: it parses one command
//! line at a time, validates arity, invokes the handler, and frames every
//! answer as `= <payload>\n\n` (success) or `? <message>\n\n` (failure).
//!
//! ## Supported Commands
//!
//! - `protocol_version` - Return GTP protocol version (2)
//! - `name` / `version` - Engine identity
//! - `boardsize <n>` / `clear_board` - Reinitialize the board
//! - `komi <value>` - Set komi for final scoring
//! - `showboard` - Multi-line board rendering
//! - `known_command <cmd>` / `list_commands` - Introspection
//! - `set_free_handicap <move>...` - Place handicap stones as Black
//! - `play <color> <vertex>` - Play a move
//! - `legal_moves <color>` - Enumerate legal moves
//! - `genmove <color>` - Generate and play a move
//! - `final_score` - Area score with komi
//! - `timelimit <seconds>` - Set the solver's wall-clock budget (1..100)
//! - `solve` - Prove the game-theoretic outcome of the current position
//! - `quit` - Exit
//!
//! Diagnostic text goes to stderr (enabled by the debug flag) and never
//! appears in the response stream.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};

use crate::board::{Color, GoBoard};
use crate::rules;
use crate::solver::{SearchResult, Solver};

/// Default board size when none has been requested yet.
const DEFAULT_SIZE: usize = 7;

/// The set of GTP commands, resolved at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    ProtocolVersion,
    Quit,
    Name,
    Boardsize,
    Showboard,
    ClearBoard,
    Komi,
    Version,
    KnownCommand,
    SetFreeHandicap,
    Genmove,
    ListCommands,
    Play,
    FinalScore,
    LegalMoves,
    Timelimit,
    Solve,
}

/// Command registry in registration order; `list_commands` reports names
/// in this order.
const COMMANDS: &[(&str, Command)] = &[
    ("protocol_version", Command::ProtocolVersion),
    ("quit", Command::Quit),
    ("name", Command::Name),
    ("boardsize", Command::Boardsize),
    ("showboard", Command::Showboard),
    ("clear_board", Command::ClearBoard),
    ("komi", Command::Komi),
    ("version", Command::Version),
    ("known_command", Command::KnownCommand),
    ("set_free_handicap", Command::SetFreeHandicap),
    ("genmove", Command::Genmove),
    ("list_commands", Command::ListCommands),
    ("play", Command::Play),
    ("final_score", Command::FinalScore),
    ("legal_moves", Command::LegalMoves),
    ("timelimit", Command::Timelimit),
    ("solve", Command::Solve),
];

impl Command {
    fn lookup(name: &str) -> Option<Command> {
        COMMANDS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, cmd)| cmd)
    }

    /// Minimum argument count and usage message, for commands that have
    /// one. `play` is not listed here: its arity failure has a dedicated
    /// message (see [`GtpConnection::process_line`]).
    fn arity(self) -> Option<(usize, &'static str)> {
        match self {
            Command::Boardsize => Some((1, "Usage: boardsize INT")),
            Command::Komi => Some((1, "Usage: komi FLOAT")),
            Command::KnownCommand => Some((1, "Usage: known_command CMD_NAME")),
            Command::SetFreeHandicap => Some((1, "Usage: set_free_handicap MOVE")),
            Command::Genmove => Some((1, "Usage: genmove {w,b}")),
            Command::LegalMoves => Some((1, "Usage: legal_moves {w,b}")),
            Command::Timelimit => Some((1, "Usage: timelimit seconds (1..100)")),
            _ => None,
        }
    }
}

/// What the caller should do after a line has been processed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Continue,
    Quit,
}

/// GTP session state: the board, scoring and timing parameters, and the
/// response writer. The writer is owned here so that all response framing
/// funnels through one pair of methods.
pub struct GtpConnection<W: Write> {
    board: GoBoard,
    komi: f32,
    /// Solver wall-clock budget in seconds (1..=100)
    timelimit: u64,
    out: W,
    debug: bool,
}

impl<W: Write> GtpConnection<W> {
    pub fn new(out: W, debug: bool) -> Self {
        GtpConnection {
            board: GoBoard::new(DEFAULT_SIZE),
            komi: 0.0,
            timelimit: 1,
            out,
            debug,
        }
    }

    /// Run the GTP command loop until EOF or `quit`.
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        self.debug_msg("Start up successful...\n");
        for line in input.lines() {
            let line = line.context("failed to read command line")?;
            if self.process_line(&line)? == Status::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Parse and execute one command line.
    ///
    /// Protocol errors (unknown command, wrong arity, illegal moves) are
    /// answered with a `?` response and `Ok(Continue)`; handler failures
    /// are answered with a `?` response and then re-raised.
    pub fn process_line(&mut self, line: &str) -> Result<Status> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Status::Continue);
        }

        // Strip the optional request-id prefix used by regression harnesses.
        let line = line
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start();

        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(Status::Continue);
        };
        let args: Vec<&str> = tokens.collect();

        // Protocol quirk: play reports a bad argument count as an illegal
        // move naming the first argument.
        if name == "play" && args.len() != 2 {
            let first = args.first().copied().unwrap_or("");
            self.error(&format!("illegal move: {first} wrong number of arguments"))?;
            return Ok(Status::Continue);
        }

        let Some(cmd) = Command::lookup(name) else {
            self.debug_msg(&format!("Unknown command: {name}\n"));
            self.error("Unknown command")?;
            return Ok(Status::Continue);
        };

        if let Some((min_args, usage)) = cmd.arity() {
            if args.len() < min_args {
                self.error(usage)?;
                return Ok(Status::Continue);
            }
        }

        match self.dispatch(cmd, &args) {
            Ok(status) => Ok(status),
            Err(err) => {
                self.debug_msg(&format!("Error executing command {name}: {err:#}\n"));
                self.error(&format!("{err}"))?;
                Err(err)
            }
        }
    }

    fn dispatch(&mut self, cmd: Command, args: &[&str]) -> Result<Status> {
        match cmd {
            Command::ProtocolVersion => self.respond("2")?,
            Command::Quit => {
                self.respond("")?;
                return Ok(Status::Quit);
            }
            Command::Name => self.respond("nogo-rust")?,
            Command::Version => self.respond(env!("CARGO_PKG_VERSION"))?,
            Command::Boardsize => self.boardsize_cmd(args)?,
            Command::Showboard => {
                let rendering = format!("\n{}", self.board);
                self.respond(rendering.trim_end())?;
            }
            Command::ClearBoard => {
                let size = self.board.size();
                self.board.reset(size);
                self.respond("")?;
            }
            Command::Komi => self.komi_cmd(args)?,
            Command::KnownCommand => {
                let known = Command::lookup(args[0]).is_some();
                self.respond(if known { "true" } else { "false" })?;
            }
            Command::SetFreeHandicap => self.set_free_handicap_cmd(args)?,
            Command::ListCommands => {
                let names: Vec<&str> = COMMANDS.iter().map(|&(n, _)| n).collect();
                self.respond(&names.join(" "))?;
            }
            Command::Play => self.play_cmd(args)?,
            Command::LegalMoves => self.legal_moves_cmd(args)?,
            Command::Genmove => self.genmove_cmd(args)?,
            Command::FinalScore => {
                let score = self.board.final_score(self.komi);
                self.respond(&score)?;
            }
            Command::Timelimit => self.timelimit_cmd(args)?,
            Command::Solve => self.solve_cmd()?,
        }
        Ok(Status::Continue)
    }

    fn boardsize_cmd(&mut self, args: &[&str]) -> Result<()> {
        match args[0].parse::<usize>() {
            Ok(size) if (crate::board::MIN_SIZE..=crate::board::MAX_SIZE).contains(&size) => {
                self.board.reset(size);
                self.respond("")
            }
            _ => self.error("Usage: boardsize INT"),
        }
    }

    fn komi_cmd(&mut self, args: &[&str]) -> Result<()> {
        match args[0].parse::<f32>() {
            Ok(komi) => {
                self.komi = komi;
                self.respond("")
            }
            Err(_) => self.error("Usage: komi FLOAT"),
        }
    }

    fn timelimit_cmd(&mut self, args: &[&str]) -> Result<()> {
        match args[0].parse::<u64>() {
            Ok(seconds) if (1..=100).contains(&seconds) => {
                self.timelimit = seconds;
                self.respond("")
            }
            _ => self.error("Usage: timelimit seconds (1..100)"),
        }
    }

    /// Clear the board and place each argument as a Black stone. Bad
    /// placements are logged and skipped, matching lenient GTP practice.
    fn set_free_handicap_cmd(&mut self, args: &[&str]) -> Result<()> {
        let size = self.board.size();
        self.board.reset(size);
        for vertex in args {
            let Some((row, col)) = rules::move_to_coord(vertex, size) else {
                self.debug_msg(&format!("Illegal handicap vertex: {vertex}\n"));
                continue;
            };
            let pt = self.board.point(row, col);
            if let Err(err) = self.board.play(pt, Color::Black) {
                self.debug_msg(&format!("Illegal handicap move {vertex}: {err}\n"));
            }
        }
        self.respond("")
    }

    fn play_cmd(&mut self, args: &[&str]) -> Result<()> {
        let color_arg = args[0].to_ascii_lowercase();
        let move_arg = args[1];

        let Some(color) = rules::color_from_token(&color_arg) else {
            return self.error(&format!("illegal move: {color_arg} {move_arg} wrong color"));
        };
        let Some((row, col)) = rules::move_to_coord(move_arg, self.board.size()) else {
            return self.error(&format!(
                "illegal move: {color_arg} {move_arg} wrong coordinate"
            ));
        };

        let pt = self.board.point(row, col);
        match self.board.play(pt, color) {
            Ok(()) => self.respond(""),
            Err(err) => self.error(&format!("illegal move: {color_arg} {move_arg} {err}")),
        }
    }

    fn legal_moves_cmd(&mut self, args: &[&str]) -> Result<()> {
        let Some(color) = rules::color_from_token(args[0]) else {
            return self.error("Usage: legal_moves {w,b}");
        };
        let moves = rules::legal_moves(&mut self.board, color);
        self.respond(&moves.join(" "))
    }

    /// Run the solver on the current position and report the outcome:
    /// `<color> <move>` for a proven win, the opponent's color token for
    /// a proven loss, or `unknown` when the time budget expired first.
    fn solve_cmd(&mut self) -> Result<()> {
        let to_play = self.board.to_play;
        match self.run_solver() {
            SearchResult::Win(m) => self.respond(&format!("{} {m}", to_play.token())),
            SearchResult::Loss => self.respond(to_play.opponent().token()),
            SearchResult::Unknown => self.respond("unknown"),
        }
    }

    fn genmove_cmd(&mut self, args: &[&str]) -> Result<()> {
        let Some(color) = rules::color_from_token(args[0]) else {
            return self.error("Usage: genmove {w,b}");
        };

        if self.board.winner().is_some() {
            return self.respond("resign");
        }
        self.board.to_play = color;

        let coord = match self.run_solver() {
            SearchResult::Win(m) => m,
            // No proof in time (or a proven loss): fall back to a random
            // legal move, resigning only if none exists at all.
            _ => match rules::random_legal_move(&mut self.board, color) {
                Some(pt) => {
                    let (row, col) = self.board.coords(pt);
                    rules::format_point(row, col)
                }
                None => return self.respond("resign"),
            },
        };

        // The engine must never claim a move the board would reject; a
        // failure here is a bug in move generation, not user error.
        let (row, col) = rules::move_to_coord(&coord, self.board.size())
            .ok_or_else(|| anyhow!("engine produced unparsable move {coord}"))?;
        let pt = self.board.point(row, col);
        if !self.board.is_legal(pt, color) {
            self.error(&format!("Illegal move: {coord}"))?;
            bail!("illegal move generated by engine: {coord}");
        }

        self.board
            .play(pt, color)
            .map_err(|err| anyhow!("engine move {coord} rejected: {err}"))?;
        self.debug_msg(&format!("Move: {coord}\nBoard:\n{}\n", self.board));
        self.respond(&coord)
    }

    /// One solver invocation with fresh scratch state and the session's
    /// time budget. Exclusively borrows the board for the duration.
    fn run_solver(&mut self) -> SearchResult {
        let mut solver = Solver::new(Duration::from_secs(self.timelimit));
        solver.solve(&mut self.board)
    }

    /// Write a success response: `= <payload>\n\n`, flushed.
    fn respond(&mut self, payload: &str) -> Result<()> {
        write!(self.out, "= {payload}\n\n").context("failed to write response")?;
        self.out.flush().context("failed to flush response")?;
        Ok(())
    }

    /// Write a failure response: `? <message>\n\n`, flushed.
    fn error(&mut self, message: &str) -> Result<()> {
        write!(self.out, "? {message}\n\n").context("failed to write error response")?;
        self.out.flush().context("failed to flush error response")?;
        Ok(())
    }

    /// Write to the diagnostic side channel; never interleaved with the
    /// response stream.
    fn debug_msg(&mut self, msg: &str) {
        if self.debug {
            eprint!("{msg}");
        }
    }
}
