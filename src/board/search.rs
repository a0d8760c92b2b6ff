//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! The search owns its undo stack and works on a position it borrows
//! mutably; every make is paired with an unmake before a call returns, so
//! the position is unchanged afterwards. An optional shared flag lets
//! another thread stop a search early.

use std::sync::atomic::{AtomicBool, Ordering};

use super::{AttackTables, Evaluator, MaterialEvaluator, Move, Position, UndoStack};

/// Magnitude of a mate score; a mate found at ply `n` scores `MATE_SCORE - n`
pub const MATE_SCORE: i32 = 1_000_000;

/// Bound used for the initial alpha-beta window
pub const INFINITY: i32 = 2_000_000;

/// Default depth for `go` without an explicit depth
pub const DEFAULT_DEPTH: u32 = 6;

/// Deepest search the engine accepts
pub const MAX_DEPTH: u32 = 64;

/// Search settings that can be changed between searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Outcome of a root search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Score from the side to move's point of view
    pub score: i32,
    /// `None` only when the root has no legal moves (or depth was 0)
    pub best_move: Option<Move>,
    pub nodes: u64,
    /// True if the stop flag cut the search short
    pub aborted: bool,
}

/// Runs negamax searches against one set of attack tables.
pub struct Searcher<'a, E: Evaluator = MaterialEvaluator> {
    tables: &'a AttackTables,
    evaluator: E,
    stop: Option<&'a AtomicBool>,
    stack: UndoStack,
    nodes: u64,
    aborted: bool,
}

impl<'a> Searcher<'a, MaterialEvaluator> {
    #[must_use]
    pub fn new(tables: &'a AttackTables) -> Self {
        Searcher::with_evaluator(tables, MaterialEvaluator)
    }
}

impl<'a, E: Evaluator> Searcher<'a, E> {
    #[must_use]
    pub fn with_evaluator(tables: &'a AttackTables, evaluator: E) -> Self {
        Searcher {
            tables,
            evaluator,
            stop: None,
            stack: UndoStack::new(),
            nodes: 0,
            aborted: false,
        }
    }

    /// Poll `flag` during the search and unwind once it is set
    #[must_use]
    pub fn with_stop_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Nodes visited since the searcher was created
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    fn should_stop(&mut self) -> bool {
        if !self.aborted && self.stop.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            self.aborted = true;
        }
        self.aborted
    }

    /// Score for a side with no legal moves, `ply` half-moves from the root
    fn terminal_score(&self, pos: &Position, ply: usize) -> i32 {
        if pos.is_in_check(self.tables, pos.side_to_move()) {
            -(MATE_SCORE - ply as i32)
        } else {
            0
        }
    }

    /// Negamax value of `pos` searched to `depth` within `(alpha, beta)`.
    ///
    /// Depth 0 is exactly the static evaluation. After an abort the returned
    /// value is meaningless.
    pub fn negamax(&mut self, pos: &mut Position, depth: u32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return self.evaluator.evaluate(pos);
        }
        if self.should_stop() {
            return 0;
        }

        let moves = pos.generate_moves(self.tables);
        if moves.is_empty() {
            return self.terminal_score(pos, self.stack.depth());
        }

        let mut best = -INFINITY;
        for &mv in moves.iter() {
            pos.make_move(mv, &mut self.stack);
            let score = -self.negamax(pos, depth - 1, -beta, -alpha);
            pos.unmake_move(mv, &mut self.stack);

            if self.aborted {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Search the root and report the move that produced the best score.
    pub fn negamax_root(&mut self, pos: &mut Position, depth: u32) -> SearchResult {
        let start_nodes = self.nodes;
        self.aborted = false;

        if depth == 0 {
            self.nodes += 1;
            return SearchResult {
                score: self.evaluator.evaluate(pos),
                best_move: None,
                nodes: self.nodes - start_nodes,
                aborted: false,
            };
        }

        self.nodes += 1;
        let moves = pos.generate_moves(self.tables);
        if moves.is_empty() {
            return SearchResult {
                score: self.terminal_score(pos, 0),
                best_move: None,
                nodes: self.nodes - start_nodes,
                aborted: false,
            };
        }

        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;
        for &mv in moves.iter() {
            pos.make_move(mv, &mut self.stack);
            let score = -self.negamax(pos, depth - 1, -INFINITY, -alpha);
            pos.unmake_move(mv, &mut self.stack);

            if self.aborted {
                log::debug!("search stopped while searching {mv}");
                break;
            }
            log::debug!("root move {mv} score {score}");
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }
        debug_assert!(self.stack.is_empty());

        // Stopped before the first root move finished: fall back to any legal move
        let (best_move, score) = best.unwrap_or((moves[0], self.evaluator.evaluate(pos)));
        SearchResult {
            score,
            best_move: Some(best_move),
            nodes: self.nodes - start_nodes,
            aborted: self.aborted,
        }
    }
}

/// Search `pos` to `depth` with material evaluation and no stop flag.
pub fn find_best_move(tables: &AttackTables, pos: &mut Position, depth: u32) -> SearchResult {
    let mut searcher = Searcher::new(tables);
    let result = searcher.negamax_root(pos, depth);
    log::info!(
        "depth {depth} score {} nodes {} best {}",
        result.score,
        result.nodes,
        result
            .best_move
            .map_or_else(|| "(none)".to_string(), |mv| mv.to_string())
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::initialize_tables;

    #[test]
    fn test_depth_zero_is_static_eval() {
        let tables = initialize_tables();
        let mut pos = Position::from_fen("4k3/8/8/3q4/8/8/8/R3K3 b - - 0 1");
        let mut searcher = Searcher::new(tables);
        let expected = MaterialEvaluator.evaluate(&pos);
        assert_eq!(searcher.negamax(&mut pos, 0, -INFINITY, INFINITY), expected);
        assert_eq!(expected, 400);
    }

    #[test]
    fn test_default_config_depth() {
        assert_eq!(SearchConfig::default().depth, 6);
    }

    #[test]
    fn test_mate_and_stalemate_scores() {
        let tables = initialize_tables();
        let mut searcher = Searcher::new(tables);

        // Fool's mate: White is checkmated
        let mut mated =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let result = searcher.negamax_root(&mut mated, 3);
        assert_eq!(result.score, -MATE_SCORE);
        assert_eq!(result.best_move, None);

        let mut stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let result = searcher.negamax_root(&mut stalemate, 3);
        assert_eq!(result.score, 0);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_stop_flag_aborts() {
        let tables = initialize_tables();
        let stop = AtomicBool::new(true);
        let mut pos = Position::new();
        let before = pos.clone();
        let mut searcher = Searcher::new(tables).with_stop_flag(&stop);
        let result = searcher.negamax_root(&mut pos, 5);
        assert!(result.aborted);
        assert!(result.best_move.is_some());
        assert_eq!(pos, before);
    }
}
