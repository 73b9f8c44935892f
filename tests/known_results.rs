use std::io;

use tinyhouse::config::Config;
use tinyhouse::core::piece::Side;
use tinyhouse::search::engine::{self, Solution};
use tinyhouse::search::line::principal_variation;
use tinyhouse::search::trace::Trace;

fn config(board: &str, promotion: bool, drop: bool) -> Config {
    Config {
        board: board.to_string(),
        enable_promotion: promotion,
        enable_drop: drop,
        print_depth: false,
        ..Config::default()
    }
}

fn solve(board: &str, promotion: bool, drop: bool) -> Solution {
    engine::run(&config(board, promotion, drop), io::sink()).unwrap()
}

/// The principal variation must start with the recorded best move of the
/// root (when the root has one).
fn assert_pv_follows_best(board: &str, solution: &Solution) {
    let mut trace = Trace::new(io::sink(), &config(board, false, false));
    let pv = principal_variation(&solution.table, &solution.root, solution.value, &mut trace);
    match solution.table.best(Side::Upper, &solution.root) {
        Some(best) => assert_eq!(pv.first().copied(), Some(best)),
        None => assert!(pv.is_empty()),
    }
}

#[test]
fn empty_board_is_a_stalemate_draw() {
    let board = "    ,    ,    ,    ";
    let solution = solve(board, false, false);
    assert_eq!(solution.value, 0);
    assert_pv_follows_best(board, &solution);
}

#[test]
fn pawns_that_cannot_meet_draw() {
    let board = "   p,    ,    ,P   ";
    let solution = solve(board, false, false);
    assert_eq!(solution.value, 0);
    assert_pv_follows_best(board, &solution);
}

#[test]
fn adjacent_kings_fall_to_the_first_capture() {
    let board = "    ,  k , K  ,    ";
    let solution = solve(board, false, false);
    assert_eq!(solution.value, 1);

    let best = solution.table.best(Side::Upper, &solution.root).unwrap();
    assert!(best.is_king_capture());
    assert_pv_follows_best(board, &solution);
}

#[test]
fn lone_kings_cannot_force_a_capture() {
    let board = "   k,    ,    ,K   ";
    let solution = solve(board, false, false);
    assert_eq!(solution.value, 0);
    assert_pv_follows_best(board, &solution);
}

#[test]
fn knight_boxed_in_by_obstacles_is_stalemated_at_the_root() {
    // Both of the knight's L-walks are blocked by obstacles on the
    // intermediate squares, so side 0 has no move at all.
    let board = "nx  ,X   ,   x,  XN";
    let solution = solve(board, false, false);
    assert_eq!(solution.value, 0);
    assert_pv_follows_best(board, &solution);
}

#[test]
fn free_knight_reaches_and_captures_through_empty_walks() {
    // Without the extra obstacles the knight is mobile again.
    let board = "nx  ,    ,    ,  XN";
    let solution = solve(board, false, false);
    assert!((-1..=1).contains(&solution.value));
    assert_pv_follows_best(board, &solution);
}

#[test]
fn promoting_capture_on_the_far_rank_takes_the_king() {
    // The pawn's diagonal promotion-capture lands on the king itself.
    let board = "k   , P  ,    ,    ";
    let solution = solve(board, true, false);
    assert_eq!(solution.value, 1);

    let best = solution.table.best(Side::Upper, &solution.root).unwrap();
    assert!(best.is_king_capture());
    assert_ne!(best.promotion(), 0);
    assert_pv_follows_best(board, &solution);
}

#[test]
fn promotion_search_with_a_boxed_king_stays_consistent() {
    // The king's escapes are walled off by its own obstacles; the win (if
    // any) runs through a promoted piece, deep in the search.
    let board = "k   ,xxP ,    ,    ";
    let solution = solve(board, true, false);
    assert!((-1..=1).contains(&solution.value));
    assert_pv_follows_best(board, &solution);
}

/// Mirrored pawn duels and piece duels without kings can never produce a
/// win; the engine must fold them all into draws.
#[test]
fn kingless_duels_draw() {
    for board in [
        "  p ,    ,    , P  ",
        " p  ,    ,    ,  P ",
        "p   ,    ,    ,   P",
        "   r,    ,    ,R   ",
        "   b,    ,    ,B   ",
    ] {
        let solution = solve(board, false, false);
        assert_eq!(solution.value, 0, "board {board:?}");
        assert_pv_follows_best(board, &solution);
    }
}

#[test]
fn pawn_walled_in_by_obstacles_draws() {
    let board = "xxx , P  ,    ,    ";
    let solution = solve(board, false, false);
    assert_eq!(solution.value, 0);
    assert_pv_follows_best(board, &solution);
}
