//! Per-run phase timings.

use std::time::Instant;

/// Accumulated wall time per phase of the iteration loop, in microseconds,
/// plus the number of iterations a worker completed.
///
/// The runner merges one of these per worker into a single report, summing
/// phase times and keeping the largest iteration count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Time spent mirroring boundary ghosts.
    pub boundary_us: u64,
    /// Time spent in halo exchange, including waiting on neighbours.
    pub exchange_us: u64,
    /// Time spent in the stencil update.
    pub stencil_us: u64,
    /// Time spent packing and sending snapshot tiles.
    pub snapshot_us: u64,
    /// Iterations this worker completed.
    pub iterations_run: u64,
}

impl RunMetrics {
    /// Fold another worker's metrics into this one.
    pub fn merge(&mut self, other: &RunMetrics) {
        self.boundary_us += other.boundary_us;
        self.exchange_us += other.exchange_us;
        self.stencil_us += other.stencil_us;
        self.snapshot_us += other.snapshot_us;
        self.iterations_run = self.iterations_run.max(other.iterations_run);
    }

    /// Total time across all phases.
    pub fn phase_total_us(&self) -> u64 {
        self.boundary_us + self.exchange_us + self.stencil_us + self.snapshot_us
    }
}

/// Microseconds elapsed since `start`, saturating into `u64`.
pub(crate) fn micros_since(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
