//! Search tests to verify the engine finds correct moves in various positions.

use std::sync::atomic::AtomicBool;

use chess_kernel::board::{
    find_best_move, initialize_tables, Evaluator, MaterialEvaluator, Position, Searcher,
    INFINITY, MATE_SCORE,
};

fn best_uci(fen: &str, depth: u32) -> Option<String> {
    let tables = initialize_tables();
    let mut pos = Position::from_fen(fen);
    find_best_move(tables, &mut pos, depth)
        .best_move
        .map(|m| m.to_string())
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Qe8# is mate
    assert_eq!(
        best_uci("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 3).as_deref(),
        Some("e1e8"),
        "Should find Qe8# (back rank mate)"
    );
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    assert_eq!(
        best_uci(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4",
            2
        )
        .as_deref(),
        Some("h5f7"),
        "Should find Qxf7# (scholar's mate)"
    );
}

/// A mate in one scores one ply short of the mate constant
#[test]
fn mate_in_one_score() {
    let tables = initialize_tables();
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let result = find_best_move(tables, &mut pos, 2);
    assert_eq!(result.score, MATE_SCORE - 1);
}

/// Test that the engine captures free material
#[test]
fn captures_free_piece() {
    // Black queen on d4 is attacked by the e3 pawn and defended by nothing
    assert_eq!(
        best_uci("4k3/8/8/8/3q4/4P3/8/4K3 w - - 0 1", 2).as_deref(),
        Some("e3d4")
    );
}

/// Test that the engine does not trade a queen for a pawn
#[test]
fn avoids_defended_pawn_with_queen() {
    // Taking d5 with the queen loses it to the c6 pawn
    let best = best_uci("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1", 2);
    assert_ne!(best.as_deref(), Some("d1d5"));
}

/// Test that search handles single legal move positions
#[test]
fn single_legal_move() {
    // a2 and b1 are covered by the b2 rook, which is undefended
    assert_eq!(
        best_uci("k7/8/8/8/8/8/1r6/K7 w - - 0 1", 4).as_deref(),
        Some("a1b2"),
        "Only legal move should be Kxb2"
    );
}

/// Test that search returns no move for a checkmated side
#[test]
fn no_move_in_checkmate() {
    let tables = initialize_tables();
    let mut pos =
        Position::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert!(pos.is_checkmate(tables), "Position should be checkmate");

    let result = find_best_move(tables, &mut pos, 4);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -MATE_SCORE);
}

/// Stalemate is a draw, not a loss
#[test]
fn stalemate_scores_zero() {
    let tables = initialize_tables();
    let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let result = find_best_move(tables, &mut pos, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

/// Results at different depths are legal moves and the position is untouched
#[test]
fn search_leaves_position_unchanged() {
    let tables = initialize_tables();
    let mut pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );
    let before = pos.clone();

    for depth in 1..=3 {
        let result = find_best_move(tables, &mut pos, depth);
        assert_eq!(pos, before, "depth {depth} search changed the position");
        let mv = result.best_move.expect("position has legal moves");
        assert!(pos.generate_moves(tables).contains(&mv));
        assert!(result.nodes > 0);
    }
}

/// Alpha-beta at the root agrees with a full-window search
#[test]
fn root_score_matches_negamax() {
    let tables = initialize_tables();
    let mut pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let mut searcher = Searcher::new(tables);
    let root = searcher.negamax_root(&mut pos, 3);
    let full = searcher.negamax(&mut pos, 3, -INFINITY, INFINITY);
    assert_eq!(root.score, full);
}

/// Depth 0 returns the static evaluation and no move
#[test]
fn depth_zero_returns_static_eval() {
    let tables = initialize_tables();
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
    let result = find_best_move(tables, &mut pos, 0);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, MaterialEvaluator.evaluate(&pos));
    assert_eq!(result.score, -500);
}

/// A raised stop flag ends the search with a legal fallback move
#[test]
fn stop_flag_returns_legal_move() {
    let tables = initialize_tables();
    let stop = AtomicBool::new(true);
    let mut pos = Position::new();
    let mut searcher = Searcher::new(tables).with_stop_flag(&stop);
    let result = searcher.negamax_root(&mut pos, 6);

    assert!(result.aborted);
    let mv = result.best_move.expect("fallback move");
    assert!(pos.generate_moves(tables).contains(&mv));
}

/// A custom evaluator plugs into the same search
#[test]
fn custom_evaluator_is_used() {
    struct Constant;
    impl Evaluator for Constant {
        fn evaluate(&self, _pos: &Position) -> i32 {
            42
        }
    }

    let tables = initialize_tables();
    let mut pos = Position::new();
    let mut searcher = Searcher::with_evaluator(tables, Constant);
    // Odd depth: leaves are evaluated for the opponent, so the sign flips
    assert_eq!(searcher.negamax_root(&mut pos, 1).score, -42);
    assert_eq!(searcher.negamax_root(&mut pos, 2).score, 42);
}
