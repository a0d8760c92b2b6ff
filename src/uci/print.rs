use std::time::Duration;

use crate::board::{Move, SearchResult, MATE_SCORE};

/// Scores this close to `MATE_SCORE` are reported as mates
const MATE_WINDOW: i32 = 1000;

/// `cp <n>` or `mate <moves>` (negative when the side to move is mated)
#[must_use]
pub fn format_score(score: i32) -> String {
    if score.abs() > MATE_SCORE - MATE_WINDOW {
        let plies = MATE_SCORE - score.abs();
        let moves = (plies + 1) / 2;
        if score > 0 || moves == 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

pub fn print_search_info(depth: u32, result: &SearchResult, elapsed: Duration) {
    println!(
        "info depth {} score {} nodes {} time {}",
        depth,
        format_score(result.score),
        result.nodes,
        elapsed.as_millis()
    );
}

pub fn print_bestmove(best_move: Option<Move>) {
    match best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
}

pub fn print_perft_info(depth: usize, nodes: u64, elapsed: Duration) {
    println!(
        "info string perft depth {} nodes {} time_ms {}",
        depth,
        nodes,
        elapsed.as_millis()
    );
}

pub fn print_error(err: &dyn std::error::Error) {
    println!("info string error: {err}");
}
