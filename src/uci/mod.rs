//! Universal Chess Interface (UCI) protocol front end.
//!
//! A thin caller around the board API: commands are parsed, applied to the
//! current position, and searches run on a background thread over a private
//! copy of that position.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use parking_lot::Mutex;

use crate::board::{
    initialize_tables, AttackTables, FenError, MoveParseError, Position, SearchConfig,
    SearchResult, Searcher, UndoStack, MAX_DEPTH,
};

pub mod command;
pub mod print;

use command::{parse_uci_command, UciCommand};

/// Search thread stack size (8 MB); recursion depth follows search depth
const SEARCH_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Error type for protocol commands that cannot be applied
#[derive(Debug, Clone)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Invalid move in the move list
    InvalidMove { move_str: String, error: MoveParseError },
    /// Missing required parts in the command
    MissingParts,
    /// Unknown option name or unusable value
    InvalidOption { name: String, value: Option<String> },
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
            UciError::InvalidOption { name, value } => match value {
                Some(value) => write!(f, "Invalid value '{value}' for option '{name}'"),
                None => write!(f, "Unknown option '{name}'"),
            },
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::InvalidFen(e) => Some(e),
            UciError::InvalidMove { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Parse a `position` command into a new position.
///
/// Supports `position startpos` and `position fen <6 fields>`, optionally
/// followed by `moves <m1> <m2> ...`. `pos` is only replaced on success.
pub fn try_parse_position_command(
    tables: &AttackTables,
    pos: &mut Position,
    parts: &[&str],
) -> Result<(), UciError> {
    let mut i = 1;
    let mut next = match parts.get(i) {
        Some(&"startpos") => {
            i += 1;
            Position::new()
        }
        Some(&"fen") => {
            let end = parts[i + 1..]
                .iter()
                .position(|p| *p == "moves")
                .map_or(parts.len(), |offset| i + 1 + offset);
            if end == i + 1 {
                return Err(UciError::MissingParts);
            }
            let fen = parts[i + 1..end].join(" ");
            i = end;
            Position::try_from_fen(&fen)?
        }
        _ => return Err(UciError::MissingParts),
    };

    if parts.get(i) == Some(&"moves") {
        let mut stack = UndoStack::new();
        for move_str in &parts[i + 1..] {
            next.make_move_text(tables, move_str, &mut stack)
                .map_err(|error| UciError::InvalidMove {
                    move_str: (*move_str).to_string(),
                    error,
                })?;
        }
    }

    *pos = next;
    Ok(())
}

/// A search running on its own thread
struct SearchJob {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl SearchJob {
    fn stop_and_wait(self) {
        self.stop.store(true, Ordering::Relaxed);
        self.wait();
    }

    fn wait(self) {
        if self.handle.join().is_err() {
            log::warn!("search thread panicked");
        }
    }
}

/// Protocol state: the current position, settings and any running search.
pub struct UciEngine {
    tables: &'static AttackTables,
    position: Position,
    config: SearchConfig,
    last_result: Arc<Mutex<Option<SearchResult>>>,
    job: Option<SearchJob>,
}

impl UciEngine {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        UciEngine::with_position(config, Position::new())
    }

    #[must_use]
    pub fn with_position(config: SearchConfig, position: Position) -> Self {
        UciEngine {
            tables: initialize_tables(),
            position,
            config,
            last_result: Arc::new(Mutex::new(None)),
            job: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Result of the most recently finished search
    #[must_use]
    pub fn last_result(&self) -> Option<SearchResult> {
        *self.last_result.lock()
    }

    /// Handle one input line. Returns false once the engine should exit.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match parse_uci_command(line) {
            Some(cmd) => self.handle_command(cmd),
            None => true,
        }
    }

    pub fn handle_command(&mut self, cmd: UciCommand) -> bool {
        match cmd {
            UciCommand::Uci => {
                println!("id name chess_kernel");
                println!(
                    "option name Depth type spin default {} min 1 max {MAX_DEPTH}",
                    self.config.depth
                );
                println!("uciok");
            }
            UciCommand::IsReady => println!("readyok"),
            UciCommand::UciNewGame => {
                self.stop_search();
                self.position = Position::new();
                *self.last_result.lock() = None;
            }
            UciCommand::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                if let Err(e) = try_parse_position_command(self.tables, &mut self.position, &parts)
                {
                    print::print_error(&e);
                }
            }
            UciCommand::Go { depth } => {
                self.start_search(depth.unwrap_or(self.config.depth).clamp(1, MAX_DEPTH));
            }
            UciCommand::Stop => self.stop_search(),
            UciCommand::Perft(depth) => self.run_perft(depth),
            UciCommand::Display => println!("{}", self.position),
            UciCommand::SetOption { name, value } => {
                if let Err(e) = self.apply_setoption(&name, value.as_deref()) {
                    print::print_error(&e);
                }
            }
            UciCommand::Quit => {
                self.stop_search();
                return false;
            }
            UciCommand::Unknown(line) => log::debug!("ignoring unknown command: {line}"),
        }
        true
    }

    fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Result<(), UciError> {
        let invalid = || UciError::InvalidOption {
            name: name.to_string(),
            value: value.map(str::to_string),
        };
        if !name.trim().eq_ignore_ascii_case("depth") {
            return Err(UciError::InvalidOption {
                name: name.to_string(),
                value: None,
            });
        }
        let depth = value
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|d| (1..=MAX_DEPTH).contains(d))
            .ok_or_else(invalid)?;
        self.config.depth = depth;
        log::info!("search depth set to {depth}");
        Ok(())
    }

    fn start_search(&mut self, depth: u32) {
        self.stop_search();

        let tables = self.tables;
        let mut position = self.position.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let slot = Arc::clone(&self.last_result);

        let spawned = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let start = Instant::now();
                let mut searcher = Searcher::new(tables).with_stop_flag(&thread_stop);
                let result = searcher.negamax_root(&mut position, depth);
                print::print_search_info(depth, &result, start.elapsed());
                print::print_bestmove(result.best_move);
                let _ = io::stdout().flush();
                *slot.lock() = Some(result);
            });

        match spawned {
            Ok(handle) => self.job = Some(SearchJob { stop, handle }),
            Err(e) => {
                log::warn!("failed to spawn search thread: {e}");
                print::print_error(&e);
            }
        }
    }

    /// Raise the stop flag of a running search and wait for its `bestmove`
    pub fn stop_search(&mut self) {
        if let Some(job) = self.job.take() {
            job.stop_and_wait();
        }
    }

    /// Wait for a running search to finish on its own
    pub fn wait_for_search(&mut self) {
        if let Some(job) = self.job.take() {
            job.wait();
        }
    }

    fn run_perft(&mut self, depth: usize) {
        let start = Instant::now();
        let mut position = self.position.clone();
        let divide = position.perft_divide(self.tables, depth);
        let mut total = 0;
        for (mv, nodes) in &divide {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        print::print_perft_info(depth, total, start.elapsed());
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        self.stop_search();
    }
}

/// Read commands from stdin until `quit` or end of input.
pub fn run_uci_loop(config: SearchConfig, position: Position) {
    let stdin = io::stdin();
    let mut engine = UciEngine::with_position(config, position);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("stdin read failed: {e}");
                break;
            }
        };
        let keep_going = engine.handle_line(&line);
        let _ = io::stdout().flush();
        if !keep_going {
            break;
        }
    }
    engine.wait_for_search();
}
