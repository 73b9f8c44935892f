//! # tinyhouse
//!
//! An exhaustive game-theoretic solver for a miniature chess variant on a
//! 4×4 board, with optional crazyhouse-style promotion and drops.
//!
//! Given a starting position, the solver determines the best move for the
//! side to move at every reachable position under perfect play, and can
//! replay the principal variation from the root.
//!
//! ## Architecture
//!
//! The codebase is structured as layered components:
//!
//! - [`core`]: allocation-free primitives (byte-glyph pieces, the hashable
//!   [`core::board::Board`], the bit-packed [`core::mv::Move`]).
//! - [`rules`]: pure movement: pseudo-move enumeration with heuristic
//!   ordering, and the exact-inverse board mutator.
//! - [`config`]: solve configuration, resource budgets, and errors.
//! - [`search`]: the negamax engine with per-side transposition tables and
//!   cycle-safe repetition handling, plus trace output and the
//!   principal-variation walker.
//!
//! ## Quick start
//!
//! ```no_run
//! use tinyhouse::config::Config;
//! use tinyhouse::search::engine;
//!
//! let config = Config {
//!     board: "   k,    ,    ,K   ".to_string(),
//!     ..Config::default()
//! };
//! let solution = engine::run(&config, std::io::sink()).unwrap();
//! assert_eq!(solution.value, 0);
//! ```

pub mod config;
pub mod core;
pub mod rules;
pub mod search;
