//! Best-effort trace output.
//!
//! The solver's observable log is a stream of fixed-format event blocks
//! written to an injected writer. Output is best-effort: I/O errors are
//! swallowed, and nothing in the solver depends on a write having happened.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::core::board::{Board, SIZE};
use crate::core::mv::Move;
use crate::core::piece::{self, Side};
use crate::search::table::Value;

const CLEAR_TERMINAL: &str = "\x1b[H\x1b[2J";

pub struct Trace<W> {
    writer: W,
    max_print_depth: i32,
    sleep_duration: Duration,
    print_depth: bool,
    deepest: i32,
}

impl<W: Write> Trace<W> {
    pub fn new(writer: W, config: &Config) -> Self {
        Self {
            writer,
            max_print_depth: config.max_print_depth,
            sleep_duration: config.sleep_duration,
            print_depth: config.print_depth,
            deepest: -1,
        }
    }

    /// Is per-node trace emitted at `depth`?
    #[inline]
    pub fn node_enabled(&self, depth: i32) -> bool {
        self.max_print_depth > 0 && depth <= self.max_print_depth
    }

    /// Is the principal-variation replay emitted at all?
    #[inline]
    pub fn replay_enabled(&self) -> bool {
        self.max_print_depth >= 0
    }

    /// Emit one per-node event block, gated by the configured trace depth.
    pub fn node(
        &mut self,
        name: &str,
        turn: Side,
        depth: i32,
        res: Value,
        mv: Move,
        board: &Board,
        clear: bool,
    ) {
        if !self.node_enabled(depth) {
            return;
        }
        self.block(name, turn, depth, res, mv, board, clear);
    }

    /// Emit one replay event block, gated only by [`Self::replay_enabled`].
    pub fn replay(&mut self, name: &str, turn: Side, res: Value, mv: Move, board: &Board) {
        if !self.replay_enabled() {
            return;
        }
        self.block(name, turn, 0, res, mv, board, false);
    }

    /// Emit a deepest-so-far counter when the search reaches a new depth.
    pub fn depth_watermark(&mut self, depth: i32) {
        if !self.print_depth || depth <= self.deepest {
            return;
        }
        self.deepest = depth;
        let _ = writeln!(self.writer, "deepest: {depth}");
    }

    fn block(
        &mut self,
        name: &str,
        turn: Side,
        depth: i32,
        res: Value,
        mv: Move,
        board: &Board,
        clear: bool,
    ) {
        let w = &mut self.writer;
        let _ = writeln!(w);
        let _ = writeln!(w, "{name}");
        let _ = writeln!(w, "turn: {}", turn.index());
        let _ = writeln!(w, "depth: {depth}");
        let _ = writeln!(w, "res: {res}");
        if !mv.is_none() {
            let from = if mv.is_drop() {
                piece::drop_glyph(turn, mv.from_col())
            } else {
                board.get(mv.from_row(), mv.from_col())
            };
            let to = board.get(mv.to_row(), mv.to_col());
            let _ = writeln!(
                w,
                "move: {} ({}, {}) => {} ({}, {})",
                from as char,
                mv.from_row(),
                mv.from_col(),
                to as char,
                mv.to_row(),
                mv.to_col(),
            );
        }
        let _ = writeln!(w, "______");
        for r in 0..SIZE {
            let _ = w.write_all(b"|");
            let _ = w.write_all(board.row(r));
            let _ = w.write_all(b"|\n");
        }
        let _ = writeln!(w, "\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}");
        if clear {
            let _ = w.flush();
            if !self.sleep_duration.is_zero() {
                thread::sleep(self.sleep_duration);
            }
            let _ = write!(w, "{CLEAR_TERMINAL}");
        }
    }

    /// Final one-line summary; always emitted.
    pub fn summary(&mut self, res: Value) {
        let _ = writeln!(self.writer, "res: {res}");
        let _ = self.writer.flush();
    }
}
