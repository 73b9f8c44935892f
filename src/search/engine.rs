//! Negamax solver with cycle-safe memoisation.
//!
//! `search(board, side)` returns the game value from the mover's
//! perspective: `+1` forced win, `0` draw, `-1` forced loss. The caller
//! negates the recursive result. Terminal conditions fold into a definite
//! value:
//!
//! - a move capturing the opposing king wins the branch immediately
//!   (no board mutation is performed for it),
//! - stalemate and the optional depth cutoff are draws,
//! - a position already on the current DFS path is a draw by repetition.
//!
//! Values and best moves are cached per side-to-move in a shared
//! [`Table`]; the `on_stack` sets are the repetition defence. Several
//! workers may solve the same root concurrently against one table:
//! duplicate work is accepted and the last writer wins, which is safe
//! because values are determinate and any recorded best move is equally
//! good.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use crate::config::{Config, SolveError};
use crate::core::board::Board;
use crate::core::mv::Move;
use crate::core::piece::Side;
use crate::rules::apply::{do_move, undo_move};
use crate::rules::movegen::Rules;
use crate::search::resources::ResourceTracker;
use crate::search::table::{Table, Value};
use crate::search::trace::Trace;

/// Worker stack size. The DFS path can grow with the number of reachable
/// positions, far past the default thread stack.
const SOLVER_STACK_BYTES: usize = 512 * 1024 * 1024;

/// Outcome of a completed solve: the root value plus the tables the
/// principal-variation walker and interactive play consume.
#[derive(Debug)]
pub struct Solution {
    pub value: Value,
    pub root: Board,
    pub table: Arc<Table>,
}

/// One depth-first solver instance. Owns its board and budgets; the table
/// may be shared with other solvers.
pub struct Solver<W> {
    rules: Rules,
    table: Arc<Table>,
    tracker: ResourceTracker,
    trace: Trace<W>,
    max_depth: i32,
    board: Board,
    turn: Side,
    depth: i32,
}

impl<W: Write> Solver<W> {
    pub fn new(config: &Config, writer: W) -> Result<Self, SolveError> {
        let board = board_from_config(config)?;
        Ok(Self::from_parts(config, writer, Arc::new(Table::new()), board))
    }

    /// A solver sharing `table`, starting from an explicit `board`.
    pub fn from_parts(config: &Config, writer: W, table: Arc<Table>, board: Board) -> Self {
        Self {
            rules: Rules::new(config.enable_promotion, config.enable_drop),
            table,
            tracker: ResourceTracker::new(config.limits),
            trace: Trace::new(writer, config),
            max_depth: config.max_depth,
            board,
            turn: Side::Upper,
            depth: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Solve with side 0 to move at the root.
    pub fn solve(&mut self) -> Result<Value, SolveError> {
        self.solve_from(Side::Upper)
    }

    /// Solve with `side` to move at the root. The board is fully restored
    /// before returning.
    pub fn solve_from(&mut self, side: Side) -> Result<Value, SolveError> {
        self.turn = side;
        self.depth = 0;
        self.search()
    }

    fn search(&mut self) -> Result<Value, SolveError> {
        self.tracker.bump_steps("search", 1)?;
        self.trace
            .node("after move", self.turn, self.depth, -1, Move::NONE, &self.board, true);
        self.trace.depth_watermark(self.depth);

        if self.max_depth >= 0 && self.depth >= self.max_depth {
            self.trace
                .node("max depth", self.turn, self.depth, 0, Move::NONE, &self.board, false);
            return Ok(0);
        }

        let moves = self.rules.moves(&self.board, self.turn);
        self.tracker.bump_edges("movegen", moves.len())?;

        if moves.is_empty() {
            self.trace
                .node("stalemate", self.turn, self.depth, 0, Move::NONE, &self.board, false);
            return Ok(0);
        }

        let mut value: Value = -1;

        for &mv in &moves {
            if mv.is_king_capture() {
                self.table.record_best(self.turn, self.board.clone(), mv);
                self.trace
                    .node("dead king", self.turn, self.depth, 1, mv, &self.board, false);
                return Ok(1);
            }

            self.trace
                .node("before move", self.turn, self.depth, value, mv, &self.board, false);

            let taken = do_move(&mut self.board, self.turn, mv);
            let child_side = self.turn.opponent();

            let next: Value = if let Some(v) = self.table.solved(child_side, &self.board) {
                self.trace
                    .node("solved[]", self.turn, self.depth, -v, mv, &self.board, false);
                -v
            } else if self.table.is_on_stack(child_side, &self.board) {
                self.trace
                    .node("repeated", self.turn, self.depth, 0, mv, &self.board, false);
                0
            } else {
                self.table.enter(child_side, self.board.clone());
                self.turn = child_side;
                self.depth += 1;
                let child = self.search()?;
                self.depth -= 1;
                self.turn = child_side.opponent();
                // Leave before recording: a position is never in `solved`
                // and `on_stack` at the same time, even mid-handoff.
                self.table.leave(child_side, &self.board);
                if self.table.record_solved(child_side, self.board.clone(), child) {
                    self.tracker.bump_cache_entries("search", 1)?;
                }
                self.trace
                    .node("solve()", self.turn, self.depth, -child, mv, &self.board, false);
                -child
            };

            undo_move(&mut self.board, self.turn, mv, taken);

            if next > value {
                value = next;
                self.table.record_best(self.turn, self.board.clone(), mv);
                self.trace
                    .node("updated res", self.turn, self.depth, value, mv, &self.board, false);
                if value == 1 {
                    break;
                }
            }
        }

        // Lost positions still get a best move so the principal-variation
        // walker has something to follow.
        if value == -1 {
            self.table.record_best(self.turn, self.board.clone(), moves[0]);
        }

        let best = self.table.best(self.turn, &self.board).unwrap_or(Move::NONE);
        self.trace
            .node("final res", self.turn, self.depth, value, best, &self.board, false);

        Ok(value)
    }
}

/// Solve `config`, fanning out `config.num_solvers` workers over one shared
/// table. Trace output is attached to the primary worker only.
///
/// Every worker runs on a dedicated thread with a large stack: the DFS path
/// is bounded only by the number of reachable positions.
pub fn run<W: Write + Send>(config: &Config, writer: W) -> Result<Solution, SolveError> {
    let root = board_from_config(config)?;
    let table = Arc::new(Table::new());

    let value = thread::scope(|s| -> Result<Value, SolveError> {
        for _ in 1..config.num_solvers.max(1) {
            let worker_table = Arc::clone(&table);
            let worker_board = root.clone();
            spawn_solver(s, move || {
                let mut solver =
                    Solver::from_parts(config, io::sink(), worker_table, worker_board);
                // Secondary workers only warm the shared table; the primary
                // worker's result is authoritative.
                let _ = solver.solve();
            })?;
        }

        let primary_table = Arc::clone(&table);
        let primary_board = root.clone();
        let handle = spawn_solver(s, move || {
            let mut solver = Solver::from_parts(config, writer, primary_table, primary_board);
            solver.solve()
        })?;

        handle.join().map_err(|_| SolveError::Worker {
            reason: "solver thread panicked".to_string(),
        })?
    })?;

    Ok(Solution { value, root, table })
}

fn spawn_solver<'scope, 'env, F, T>(
    scope: &'scope thread::Scope<'scope, 'env>,
    f: F,
) -> Result<thread::ScopedJoinHandle<'scope, T>, SolveError>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    thread::Builder::new()
        .stack_size(SOLVER_STACK_BYTES)
        .spawn_scoped(scope, f)
        .map_err(|e| SolveError::Worker {
            reason: format!("failed to spawn solver thread: {e}"),
        })
}

fn board_from_config(config: &Config) -> Result<Board, SolveError> {
    if config.board.trim().is_empty() {
        Ok(Board::default())
    } else {
        Board::parse(&config.board)
    }
}
