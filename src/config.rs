//! Solver configuration, resource budgets, and errors.

use std::fmt;
use std::time::Duration;

/// A fully specified solve: position, rule switches, trace knobs, budgets.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial position as comma-separated 4-character rows; empty selects
    /// the hardcoded starting position.
    pub board: String,

    /// Depth cutoff; negative means unlimited.
    pub max_depth: i32,

    /// Inter-frame pause used by the animated trace.
    pub sleep_duration: Duration,

    /// Per-node trace is emitted for depths up to this value. `0` keeps only
    /// the principal-variation replay; negative silences trace output.
    pub max_print_depth: i32,

    /// Emit a counter line each time the search reaches a new depth.
    pub print_depth: bool,

    /// Enable pawn promotion in move generation.
    pub enable_promotion: bool,

    /// Enable captured-piece drops in move generation.
    pub enable_drop: bool,

    /// Number of workers sharing the transposition tables.
    pub num_solvers: usize,

    pub limits: ResourceLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: String::new(),
            max_depth: -1,
            sleep_duration: Duration::ZERO,
            max_print_depth: -1,
            print_depth: true,
            enable_promotion: false,
            enable_drop: false,
            num_solvers: 1,
            limits: ResourceLimits::default(),
        }
    }
}

/// Counter budgets bounding state explosion, with graceful failure.
#[derive(Debug, Clone, Copy)]
pub struct ResourceLimits {
    pub max_edges: u64,
    pub max_cache_entries: u64,
    pub max_runtime_steps: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_edges: 500_000_000,
            max_cache_entries: 20_000_000,
            max_runtime_steps: 2_000_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceCounts {
    pub edges: u64,
    pub cache_entries: u64,
    pub runtime_steps: u64,
}

#[derive(Debug)]
pub enum SolveError {
    InvalidBoard {
        reason: String,
    },
    LimitExceeded {
        stage: &'static str,
        metric: &'static str,
        limit: u64,
        observed: u64,
        counts: ResourceCounts,
    },
    Worker {
        reason: String,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidBoard { reason } => write!(f, "invalid board: {reason}"),
            SolveError::LimitExceeded {
                stage,
                metric,
                limit,
                observed,
                counts,
            } => write!(
                f,
                "limit exceeded at {stage}: {metric} (limit={limit}, observed={observed}); \
                 counts(edges={}, cache_entries={}, runtime_steps={})",
                counts.edges, counts.cache_entries, counts.runtime_steps
            ),
            SolveError::Worker { reason } => write!(f, "worker failed: {reason}"),
        }
    }
}

impl std::error::Error for SolveError {}
