//! Principal-variation replay from the solved tables.
//!
//! After a solve, the `best` maps hold a concrete "what to play here"
//! choice for every fully-solved position. The walker follows them from the
//! root, mutating a scratch board progressively (moves are never undone),
//! and stops at the first repeated position or the first position without a
//! recorded best move. It does not consult the `solved` values to steer.

use std::io::Write;

use rustc_hash::FxHashSet;

use crate::core::board::Board;
use crate::core::mv::Move;
use crate::core::piece::Side;
use crate::rules::apply::do_move;
use crate::search::table::{Table, Value};
use crate::search::trace::Trace;

/// Follow the cached best moves from `root` (side 0 to move) and return the
/// principal variation. Emits replay trace events along the way.
pub fn principal_variation<W: Write>(
    table: &Table,
    root: &Board,
    root_value: Value,
    trace: &mut Trace<W>,
) -> Vec<Move> {
    let mut board = root.clone();
    let mut side = Side::Upper;
    let mut seen: [FxHashSet<Board>; 2] = [FxHashSet::default(), FxHashSet::default()];
    let mut line = Vec::new();
    let mut res = root_value;

    trace.replay("show", side, res, Move::NONE, &board);

    loop {
        if !seen[side.index()].insert(board.clone()) {
            break;
        }
        let Some(mv) = table.best(side, &board) else {
            break;
        };

        trace.replay("before move", side, res, mv, &board);
        do_move(&mut board, side, mv);
        line.push(mv);

        side = side.opponent();
        res = table.solved(side, &board).unwrap_or(0);
        trace.replay("after move", side, res, mv, &board);
    }

    line
}
