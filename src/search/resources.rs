//! Resource tracking for the solver.
//!
//! Exhaustive search can explode combinatorially. To avoid hard OOM aborts,
//! the solver counts work against budgets ([`crate::config::ResourceLimits`])
//! and surfaces an overrun as [`crate::config::SolveError`] instead of
//! grinding on.
//!
//! The tracker is intentionally lightweight: budgets are approximate but
//! correlate strongly with memory usage.

use crate::config::{ResourceCounts, ResourceLimits, SolveError};

#[derive(Debug, Clone)]
/// Tracks budgets/counters during a solve.
pub struct ResourceTracker {
    limits: ResourceLimits,
    counts: ResourceCounts,
}

impl ResourceTracker {
    #[inline]
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            limits,
            counts: ResourceCounts::default(),
        }
    }

    #[inline]
    pub fn counts(&self) -> ResourceCounts {
        self.counts
    }

    #[inline]
    pub fn bump_edges(&mut self, stage: &'static str, delta: usize) -> Result<(), SolveError> {
        self.bump(stage, "edges", delta as u64, self.limits.max_edges, |c| {
            &mut c.edges
        })
    }

    #[inline]
    pub fn bump_cache_entries(
        &mut self,
        stage: &'static str,
        delta: usize,
    ) -> Result<(), SolveError> {
        self.bump(
            stage,
            "cache_entries",
            delta as u64,
            self.limits.max_cache_entries,
            |c| &mut c.cache_entries,
        )
    }

    #[inline]
    pub fn bump_steps(&mut self, stage: &'static str, delta: u64) -> Result<(), SolveError> {
        self.bump(
            stage,
            "runtime_steps",
            delta,
            self.limits.max_runtime_steps,
            |c| &mut c.runtime_steps,
        )
    }

    fn bump(
        &mut self,
        stage: &'static str,
        metric: &'static str,
        delta: u64,
        limit: u64,
        field: impl FnOnce(&mut ResourceCounts) -> &mut u64,
    ) -> Result<(), SolveError> {
        let observed = {
            let v = field(&mut self.counts);
            *v = v.saturating_add(delta);
            *v
        };

        if observed > limit {
            return Err(SolveError::LimitExceeded {
                stage,
                metric,
                limit,
                observed,
                counts: self.counts,
            });
        }

        Ok(())
    }
}
