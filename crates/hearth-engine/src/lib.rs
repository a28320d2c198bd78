//! Iteration driver and multi-worker runner.
//!
//! [`runner::run`] is the whole show: it validates a
//! [`hearth_core::SimulationConfig`], decomposes the grid, spawns one scoped
//! worker thread per tile, and collects snapshot tiles back into numbered
//! global snapshot files. [`driver::WorkerDriver`] is the per-worker loop it
//! spawns, exposed for finer-grained embedding and testing.

pub mod driver;
pub mod error;
pub mod metrics;
pub mod runner;

pub use driver::{SnapshotPart, WorkerDriver};
pub use error::RunError;
pub use metrics::RunMetrics;
pub use runner::{percent_complete, run, RunReport};
