//! Low-level, allocation-free primitives.
//!
//! These types are intentionally compact and hash-friendly because the solver
//! keys large maps by whole positions:
//!
//! - [`piece`]: byte-glyph pieces, sides, and fixed movement delta tables.
//! - [`board`]: the 4×4 grid plus captured pools; the transposition key.
//! - [`mv`]: a move packed into a single `u16`, with zero as "no move".

pub mod board;
pub mod mv;
pub mod piece;
