use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use chess_kernel::board::{initialize_tables, Position, SearchConfig, DEFAULT_DEPTH, MAX_DEPTH};
use chess_kernel::uci::{print::print_perft_info, run_uci_loop};

/// Chess move generator and alpha-beta search speaking UCI on stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "chess_kernel", version, about)]
struct Cli {
    /// Count leaf nodes to this depth, print per-move totals and exit
    #[arg(long, value_name = "DEPTH")]
    perft: Option<usize>,

    /// Starting position as a FEN string (defaults to the standard start)
    #[arg(long)]
    fen: Option<String>,

    /// Search depth used by `go` without an explicit depth
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH as i64))]
    depth: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let position = match cli.fen.as_deref().map(Position::try_from_fen) {
        None => Position::new(),
        Some(Ok(pos)) => pos,
        Some(Err(e)) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(depth) = cli.perft {
        let tables = initialize_tables();
        let mut position = position;
        let start = Instant::now();
        let mut total = 0;
        for (mv, nodes) in position.perft_divide(tables, depth) {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!();
        println!("Nodes searched: {total}");
        print_perft_info(depth, total, start.elapsed());
        return ExitCode::SUCCESS;
    }

    run_uci_loop(SearchConfig { depth: cli.depth }, position);
    ExitCode::SUCCESS
}
