//! NoGo-Rust: a GTP-driven NoGo agent.
//!
//! Reads GTP commands from stdin and writes responses to stdout. Use
//! with a GTP controller or regression harness:
//!
//! - `nogo-rust` - Start the GTP session
//! - `nogo-rust --debug` - Also print diagnostics to stderr

use std::io;

use anyhow::Result;
use clap::Parser;

use nogo_rust::gtp::GtpConnection;

/// NoGo agent speaking GTP on stdin/stdout
#[derive(Parser)]
#[command(name = "nogo-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print diagnostic messages to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let stdin = io::stdin();
    let mut conn = GtpConnection::new(io::stdout(), cli.debug);
    conn.run(stdin.lock())
}
