//! Per-side transposition tables and the on-stack cycle guard.
//!
//! Three structures per side-to-move: `solved` (final negamax values),
//! `best` (the move to play), and `on_stack` (positions currently being
//! expanded on some DFS path). Entries are keyed by the whole board and are
//! never evicted.
//!
//! The stored convention is `solved[s][q] == search(q, s)`: a value is keyed
//! by the side to move *in the stored position*. Callers probing after their
//! own move negate exactly once.
//!
//! Every structure sits behind its own readers-writer lock so that several
//! workers may share one table; all critical sections are point lookups and
//! point inserts. A poisoned lock is absorbed: a panicking worker cannot
//! leave a point insert half-done.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::board::Board;
use crate::core::mv::Move;
use crate::core::piece::Side;

/// Solved value of a position, from the perspective of the side to move:
/// `+1` win, `0` draw, `-1` loss.
pub type Value = i8;

#[derive(Debug, Default)]
pub struct Table {
    solved: [RwLock<FxHashMap<Board, Value>>; 2],
    best: [RwLock<FxHashMap<Board, Move>>; 2],
    on_stack: [RwLock<FxHashSet<Board>>; 2],
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value of `board` with `side` to move, if its subtree has
    /// completed.
    pub fn solved(&self, side: Side, board: &Board) -> Option<Value> {
        read(&self.solved[side.index()]).get(board).copied()
    }

    /// Record a final value. Returns `true` when the entry is new, for cache
    /// budget accounting; re-insertion (racing workers) keeps the last write.
    pub fn record_solved(&self, side: Side, board: Board, value: Value) -> bool {
        write(&self.solved[side.index()]).insert(board, value).is_none()
    }

    /// The recorded best move of `board` with `side` to move.
    pub fn best(&self, side: Side, board: &Board) -> Option<Move> {
        read(&self.best[side.index()]).get(board).copied()
    }

    pub fn record_best(&self, side: Side, board: Board, mv: Move) {
        write(&self.best[side.index()]).insert(board, mv);
    }

    /// Is `board` (with `side` to move) currently being expanded?
    pub fn is_on_stack(&self, side: Side, board: &Board) -> bool {
        read(&self.on_stack[side.index()]).contains(board)
    }

    pub fn enter(&self, side: Side, board: Board) {
        write(&self.on_stack[side.index()]).insert(board);
    }

    pub fn leave(&self, side: Side, board: &Board) {
        write(&self.on_stack[side.index()]).remove(board);
    }

    /// Snapshot of the solved map for one side. Intended for tests and
    /// post-hoc inspection, not for the hot path.
    pub fn solved_snapshot(&self, side: Side) -> FxHashMap<Board, Value> {
        read(&self.solved[side.index()]).clone()
    }

    /// Snapshot of the best-move map for one side.
    pub fn best_snapshot(&self, side: Side) -> FxHashMap<Board, Move> {
        read(&self.best[side.index()]).clone()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
