//! Law-style invariants that must hold after every solve.

use std::io;
use std::sync::Arc;

use tinyhouse::config::Config;
use tinyhouse::core::board::Board;
use tinyhouse::core::piece::Side;
use tinyhouse::rules::apply::{do_move, undo_move};
use tinyhouse::rules::movegen::Rules;
use tinyhouse::search::engine::{self, Solver};
use tinyhouse::search::table::Table;

fn config(board: &str) -> Config {
    Config {
        board: board.to_string(),
        print_depth: false,
        ..Config::default()
    }
}

#[test]
fn do_undo_round_trips_every_generated_move() {
    let rules = Rules::new(true, true);
    let mut boards = vec![
        Board::default(),
        Board::parse("k   ,xxP ,    ,    ").unwrap(),
        Board::parse("nx  ,    ,    ,  XN").unwrap(),
    ];
    let mut pooled = Board::parse("   k,    ,    ,K   ").unwrap();
    pooled.set_pool(Side::Upper, 0, 1);
    pooled.set_pool(Side::Upper, 3, 2);
    pooled.set_pool(Side::Lower, 2, 1);
    boards.push(pooled);

    for board in &mut boards {
        for side in [Side::Upper, Side::Lower] {
            for mv in rules.moves(board, side) {
                let before = board.clone();
                let taken = do_move(board, side, mv);
                undo_move(board, side, mv, taken);
                assert_eq!(*board, before, "move {mv:?} for side {side:?}");
            }
        }
    }
}

#[test]
fn solver_restores_its_board() {
    let mut solver = Solver::new(&config("nx  ,    ,    ,  XN"), io::sink()).unwrap();
    let before = solver.board().clone();
    solver.solve().unwrap();
    assert_eq!(*solver.board(), before);
}

#[test]
fn every_cached_value_is_ternary() {
    let solution = engine::run(&config("nx  ,    ,    ,  XN"), io::sink()).unwrap();
    for side in [Side::Upper, Side::Lower] {
        for (_, v) in solution.table.solved_snapshot(side) {
            assert!((-1..=1).contains(&v));
        }
    }
}

#[test]
fn every_recorded_best_move_is_generated_for_its_position() {
    let rules = Rules::default();
    let solution = engine::run(&config("   k,    ,    ,K   "), io::sink()).unwrap();
    for side in [Side::Upper, Side::Lower] {
        for (board, mv) in solution.table.best_snapshot(side) {
            assert!(
                rules.moves(&board, side).contains(&mv),
                "best move {mv:?} is not legal for side {side:?}"
            );
        }
    }
}

/// Negamax sign discipline: with a sole move from the root, the child's
/// value from the opponent's perspective is the exact negation.
#[test]
fn sole_move_child_negates_the_root_value() {
    let cfg = config("   p,    ,    ,P   ");
    let rules = Rules::default();

    let root = Board::parse("   p,    ,    ,P   ").unwrap();
    let moves = rules.moves(&root, Side::Upper);
    assert_eq!(moves.len(), 1, "the pawn has a single advance");

    let mut solver = Solver::new(&cfg, io::sink()).unwrap();
    let v = solver.solve().unwrap();

    let mut child = root.clone();
    do_move(&mut child, Side::Upper, moves[0]);
    let mut child_solver =
        Solver::from_parts(&cfg, io::sink(), Arc::new(Table::new()), child);
    let w = child_solver.solve_from(Side::Lower).unwrap();

    assert_eq!(w, -v);
}

#[test]
fn identical_configs_produce_identical_traces() {
    let run = || {
        let cfg = Config {
            max_print_depth: 5,
            ..config("   p,    ,    ,P   ")
        };
        let mut buf: Vec<u8> = Vec::new();
        let solution = engine::run(&cfg, &mut buf).unwrap();
        (solution.value, buf)
    };
    let (v1, t1) = run();
    let (v2, t2) = run();
    assert_eq!(v1, v2);
    assert_eq!(t1, t2);
}

#[test]
fn re_solving_yields_the_same_value_and_best_moves() {
    let solve = || engine::run(&config("nx  ,    ,    ,  XN"), io::sink()).unwrap();
    let a = solve();
    let b = solve();
    assert_eq!(a.value, b.value);
    for side in [Side::Upper, Side::Lower] {
        assert_eq!(a.table.best_snapshot(side), b.table.best_snapshot(side));
        assert_eq!(a.table.solved_snapshot(side), b.table.solved_snapshot(side));
    }
}

#[test]
fn shared_table_workers_agree_with_the_single_solver() {
    let single = engine::run(&config("    ,  k , K  ,    "), io::sink()).unwrap();
    let multi = engine::run(
        &Config {
            num_solvers: 4,
            ..config("    ,  k , K  ,    ")
        },
        io::sink(),
    )
    .unwrap();
    assert_eq!(single.value, multi.value);
}
