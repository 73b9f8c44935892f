//! The 4×4 board plus per-side captured pools.
//!
//! The whole value is cheap to clone, compare, and hash; it doubles as the
//! transposition key. Side-to-move is *not* part of the key; the solver
//! keeps one table per side instead.

use crate::config::SolveError;
use crate::core::piece::{self, Side, EMPTY, POOL_SLOTS};

/// Board edge length.
pub const SIZE: usize = 4;

/// Rows of the hardcoded starting position.
pub const DEFAULT_ROWS: [&str; SIZE] = ["bnrk", "   p", "P   ", "KRNB"];

/// A 4×4 piece grid and the two captured pools.
///
/// Pool slot `i` of side `s` counts captured opponent pieces of the type at
/// back-rank column `i`, in the fixed order `R B N P`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[u8; SIZE]; SIZE],
    pools: [[u8; POOL_SLOTS]; 2],
}

impl Default for Board {
    fn default() -> Self {
        let mut grid = [[EMPTY; SIZE]; SIZE];
        for (r, row) in DEFAULT_ROWS.iter().enumerate() {
            grid[r].copy_from_slice(row.as_bytes());
        }
        Self {
            grid,
            pools: [[0; POOL_SLOTS]; 2],
        }
    }
}

impl Board {
    /// Parse a board from comma-separated rows, e.g. `"bnrk,   p,P   ,KRNB"`.
    ///
    /// Rejects anything other than exactly four rows of exactly four glyphs
    /// from the piece alphabet. Pools start empty.
    pub fn parse(text: &str) -> Result<Self, SolveError> {
        let rows: Vec<&str> = text.split(',').collect();
        if rows.len() != SIZE {
            return Err(SolveError::InvalidBoard {
                reason: format!("expected {SIZE} comma-separated rows, got {}", rows.len()),
            });
        }

        let mut grid = [[EMPTY; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            let bytes = row.as_bytes();
            if bytes.len() != SIZE {
                return Err(SolveError::InvalidBoard {
                    reason: format!("row {r} has {} characters, expected {SIZE}", bytes.len()),
                });
            }
            for (c, &glyph) in bytes.iter().enumerate() {
                if !piece::ALPHABET.contains(&glyph) {
                    return Err(SolveError::InvalidBoard {
                        reason: format!("row {r} column {c} holds invalid glyph {:?}", glyph as char),
                    });
                }
                grid[r][c] = glyph;
            }
        }

        Ok(Self {
            grid,
            pools: [[0; POOL_SLOTS]; 2],
        })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.grid[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, glyph: u8) {
        self.grid[row][col] = glyph;
    }

    #[inline]
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.grid[row][col] == EMPTY
    }

    /// Raw bytes of a grid row, for rendering.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8; SIZE] {
        &self.grid[row]
    }

    #[inline]
    pub fn pool(&self, side: Side, slot: usize) -> u8 {
        self.pools[side.index()][slot]
    }

    #[inline]
    pub fn set_pool(&mut self, side: Side, slot: usize, count: u8) {
        self.pools[side.index()][slot] = count;
    }

    #[inline]
    pub fn inc_pool(&mut self, side: Side, slot: usize) {
        self.pools[side.index()][slot] += 1;
    }

    #[inline]
    pub fn dec_pool(&mut self, side: Side, slot: usize) {
        debug_assert!(self.pools[side.index()][slot] > 0);
        self.pools[side.index()][slot] -= 1;
    }
}
