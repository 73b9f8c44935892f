//! Applying and undoing moves in place.
//!
//! The solver mutates a single board along its DFS path, so `undo_move` must
//! be the exact inverse of `do_move`: every pair leaves the board bitwise
//! identical, pools included.

use crate::core::board::Board;
use crate::core::mv::Move;
use crate::core::piece::{self, Side, EMPTY};

/// Apply `mv` for `side`, returning the displaced target glyph for [`undo_move`].
pub fn do_move(board: &mut Board, side: Side, mv: Move) -> u8 {
    let (tr, tc) = (mv.to_row(), mv.to_col());

    if mv.is_drop() {
        let slot = mv.from_col();
        board.dec_pool(side, slot);
        board.set(tr, tc, piece::drop_glyph(side, slot));
        return EMPTY;
    }

    let (fr, fc) = (mv.from_row(), mv.from_col());
    let taken = board.get(tr, tc);
    board.set(tr, tc, board.get(fr, fc));
    board.set(fr, fc, EMPTY);

    // Obstacles and kings have no pool slot; only R/B/N/P feed the pool.
    if mv.is_capture() {
        if let Some(slot) = piece::pool_slot(taken) {
            board.inc_pool(side, slot);
        }
    }

    let choice = mv.promotion();
    if choice != 0 {
        board.set(tr, tc, piece::promotion_glyph(side, choice));
    }

    taken
}

/// Exact inverse of [`do_move`], in reverse order.
pub fn undo_move(board: &mut Board, side: Side, mv: Move, taken: u8) {
    let (tr, tc) = (mv.to_row(), mv.to_col());

    if mv.is_drop() {
        board.set(tr, tc, EMPTY);
        board.inc_pool(side, mv.from_col());
        return;
    }

    if mv.is_capture() {
        if let Some(slot) = piece::pool_slot(taken) {
            board.dec_pool(side, slot);
        }
    }

    let (fr, fc) = (mv.from_row(), mv.from_col());
    if mv.promotion() != 0 {
        board.set(fr, fc, piece::pawn_of(side));
    } else {
        board.set(fr, fc, board.get(tr, tc));
    }
    board.set(tr, tc, taken);
}
